use crate::api::models::LookupResultDto;

/// Formats an integer with comma thousands separators.
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

/// Share of matching games, in percent with one decimal place.
pub fn match_percent(matching: u64, available: u64) -> Option<f64> {
    if available == 0 {
        return None;
    }
    let ratio = matching as f64 / available as f64;
    Some((ratio * 1000.0 + 0.5).floor() / 10.0)
}

/// A lookup result ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedLookup {
    pub matching: String,
    pub available: String,
    pub total: String,
    pub percent: Option<f64>,
}

impl From<LookupResultDto> for FormattedLookup {
    fn from(result: LookupResultDto) -> Self {
        FormattedLookup {
            matching: format_number(result.matching),
            available: format_number(result.available),
            total: format_number(result.total),
            percent: match_percent(result.matching, result.available),
        }
    }
}

impl FormattedLookup {
    pub fn percent_label(&self) -> String {
        match self.percent {
            Some(p) => format!("{}%", p),
            None => "n/a".to_string(),
        }
    }
}

use crate::error::AppError;
use std::collections::BTreeMap;
use std::fmt;

/// Shown when a metric has no data yet or not enough history for a delta.
pub const PLACEHOLDER: &str = "XX (+X%)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rounding {
    /// One decimal place for every delta.
    #[default]
    Uniform,
    /// Positive deltas scaled by 100 instead of 1000, as the old stats page
    /// displayed them.
    Legacy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Delta {
    pub latest_date: String,
    pub latest: f64,
    pub previous: f64,
    /// `None` when the previous value is zero.
    pub percent: Option<f64>,
}

/// Rounds half toward positive infinity, like the browser's `Math.round`.
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

fn percent_change(latest: f64, previous: f64, rounding: Rounding) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }

    let delta = latest / previous - 1.0;
    let scale = match rounding {
        Rounding::Legacy if delta > 0.0 => 100.0,
        _ => 1000.0,
    };
    let percent = round_half_up(delta * scale) / 10.0;

    // Keep -0 out of the display.
    Some(if percent == 0.0 { 0.0 } else { percent })
}

/// Compares the two most recent dates of one metric.
pub fn compute_delta(
    series: &BTreeMap<String, f64>,
    rounding: Rounding,
) -> Result<Delta, AppError> {
    let mut recent = series.iter().rev();

    let (latest_date, latest) = recent.next().ok_or(AppError::InsufficientHistory)?;
    let (_, previous) = recent.next().ok_or(AppError::InsufficientHistory)?;

    Ok(Delta {
        latest_date: latest_date.clone(),
        latest: *latest,
        previous: *previous,
        percent: percent_change(*latest, *previous, rounding),
    })
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.percent {
            Some(p) if p > 0.0 => write!(f, "{} (+{}%)", self.latest, p),
            Some(p) => write!(f, "{} ({}%)", self.latest, p),
            None => write!(f, "{}", self.latest),
        }
    }
}

/// Headline string for a metric, falling back to the placeholder when the
/// metric is missing or has fewer than two dates.
pub fn summary_value(series: Option<&BTreeMap<String, f64>>, rounding: Rounding) -> String {
    let Some(series) = series else {
        return PLACEHOLDER.to_string();
    };

    match compute_delta(series, rounding) {
        Ok(delta) => delta.to_string(),
        Err(_) => PLACEHOLDER.to_string(),
    }
}

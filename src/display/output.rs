use crate::analysis::format::{format_number, FormattedLookup};
use crate::analysis::metrics;
use crate::analysis::summary::{summary_value, Rounding};
use crate::analysis::timeseries::{ChartData, StatsView};
use crate::api::models::MetadataDto;
use crate::team::{Side, TeamComposition};
use chrono::{DateTime, Utc};
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct SummaryRow {
    metric: String,
    latest: String,
    days: String,
    description: String,
}

#[derive(Tabled)]
struct SeriesRow {
    date: String,
    value: String,
}

#[derive(Tabled)]
struct ChampionRow {
    #[tabled(rename = "#")]
    number: String,
    champion: String,
    shortname: String,
    games: String,
    title: String,
}

pub fn display_stats_summary(view: &StatsView, player_name: &str, rounding: Rounding) {
    println!(
        "\n{}",
        format!("📈 Stats for {} ", player_name).bold().cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());

    if view.is_empty() {
        println!("{}", "No stats recorded for this summoner yet".yellow());
        return;
    }

    let rows: Vec<SummaryRow> = view
        .metric_names
        .iter()
        .map(|id| SummaryRow {
            metric: metrics::display_name(id).to_string(),
            latest: summary_value(view.metric(id), rounding),
            days: view.series.get(id).map(Vec::len).unwrap_or(0).to_string(),
            description: metrics::subtext(id).to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    if let (Some(first), Some(last)) = (view.dates.first(), view.dates.last()) {
        println!(
            "\n{} {} days ({} to {})",
            "🗓️ Covered:".bold(),
            view.dates.len(),
            first,
            last
        );
    }
    println!();
}

pub fn display_series(chart: &ChartData) {
    println!(
        "{}",
        format!("📊 {}", metrics::display_name(&chart.metric))
            .bold()
            .cyan()
    );

    let rows: Vec<SeriesRow> = chart
        .labels
        .iter()
        .zip(&chart.data)
        .map(|(date, value)| SeriesRow {
            date: date.clone(),
            value: match value {
                Some(v) => v.to_string(),
                None => "-".dimmed().to_string(),
            },
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

fn format_timestamp(seconds: i64) -> String {
    DateTime::<Utc>::from_timestamp(seconds, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| format!("{} (invalid timestamp)", seconds))
}

pub fn display_metadata(meta: &MetadataDto, show_roster: bool) {
    println!("\n{}", "🗂️ DATASET".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());
    println!("{} {}", "Last updated:".bold(), format_timestamp(meta.last_updated));
    println!("{} {}", "Games indexed:".bold(), format_number(meta.num_games));
    println!("{} {}\n", "Champions:".bold(), meta.champions.len());

    if !show_roster || meta.champions.is_empty() {
        return;
    }

    let rows: Vec<ChampionRow> = meta
        .champions
        .iter()
        .enumerate()
        .map(|(idx, c)| ChampionRow {
            number: format!("{}", idx + 1),
            champion: c.name.clone(),
            shortname: c.shortname.clone(),
            games: format!("~{}", format_number(c.games)),
            title: c.title.clone(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_teams(composition: &TeamComposition) {
    println!("\n{}", "👥 TEAM COMPOSITION".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    for side in [Side::Ally, Side::Enemy] {
        let team = composition.team(side);
        let names: Vec<&str> = team.members().iter().map(|c| c.name.as_str()).collect();
        let label = match side {
            Side::Ally => "Allies: ".green().bold(),
            Side::Enemy => "Enemies:".red().bold(),
        };
        let roster = if names.is_empty() {
            "(none)".dimmed().to_string()
        } else {
            names.join(", ")
        };
        println!("{} {} [{}/5]", label, roster, team.len());
    }
    println!();
}

pub fn display_lookup_result(result: &FormattedLookup) {
    println!("{}", "Matching Games".bold().yellow());
    println!(
        "  {} of {} available games match ({})",
        result.matching.bold(),
        result.available,
        result.percent_label().bold()
    );
    println!("  {} games in the dataset\n", result.total);
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_warning(message: &str) {
    eprintln!("{} {}", "⚠️".yellow(), message);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

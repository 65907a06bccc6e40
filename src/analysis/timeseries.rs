use crate::api::models::{SnapshotDto, StatEntryDto};
use crate::error::AppError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use clap::ValueEnum;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Which numeric column of a stat entry becomes the plotted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StatField {
    #[default]
    Absolute,
    Value,
}

impl StatField {
    fn pick(self, entry: &StatEntryDto) -> f64 {
        match self {
            StatField::Absolute => entry.absolute,
            StatField::Value => entry.value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimelinePoint {
    pub timestamp: i64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StatsView {
    pub metric_names: Vec<String>,
    pub dates: Vec<String>,
    pub timeseries: BTreeMap<String, BTreeMap<String, f64>>,
    pub series: BTreeMap<String, Vec<TimelinePoint>>,
    /// Date keys dropped by the lenient transform.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
}

/// Label/value columns for one metric, with gaps where the metric was not
/// recorded on a date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub metric: String,
    pub labels: Vec<String>,
    pub data: Vec<Option<f64>>,
}

/// Converts a snapshot date key to unix seconds. Bare dates are read as
/// midnight UTC.
pub fn parse_date_key(key: &str) -> Result<i64, AppError> {
    let trimmed = key.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc().timestamp());
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.timestamp());
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Ok(naive.and_utc().timestamp());
    }

    Err(AppError::MalformedDate {
        key: key.to_string(),
    })
}

pub struct StatsTransformer {
    field: StatField,
}

impl StatsTransformer {
    pub fn new(field: StatField) -> Self {
        StatsTransformer { field }
    }

    /// Builds the view, failing on the first date key that does not parse.
    pub fn transform(&self, daily: &BTreeMap<String, SnapshotDto>) -> Result<StatsView, AppError> {
        self.build(daily, false)
    }

    /// Builds the view, logging and skipping snapshots whose date key does
    /// not parse.
    pub fn transform_lenient(&self, daily: &BTreeMap<String, SnapshotDto>) -> StatsView {
        // Cannot fail: the only error path is a malformed date, which is skipped.
        self.build(daily, true).unwrap_or_default()
    }

    fn build(
        &self,
        daily: &BTreeMap<String, SnapshotDto>,
        lenient: bool,
    ) -> Result<StatsView, AppError> {
        let mut view = StatsView::default();
        let mut metric_names = BTreeSet::new();
        let mut timestamps = Vec::with_capacity(daily.len());

        for (date, snapshot) in daily {
            let timestamp = match parse_date_key(date) {
                Ok(ts) => ts,
                Err(e) if lenient => {
                    log::warn!("Skipping snapshot: {}", e);
                    view.skipped.push(date.clone());
                    continue;
                }
                Err(e) => return Err(e),
            };

            view.dates.push(date.clone());
            timestamps.push(timestamp);

            for entry in snapshot.entries() {
                metric_names.insert(entry.name.clone());
                view.timeseries
                    .entry(entry.name.clone())
                    .or_default()
                    .insert(date.clone(), self.field.pick(entry));
            }
        }

        for (metric, by_date) in &view.timeseries {
            let points = view
                .dates
                .iter()
                .zip(&timestamps)
                .filter_map(|(date, &timestamp)| {
                    by_date
                        .get(date)
                        .map(|&value| TimelinePoint { timestamp, value })
                })
                .collect();
            view.series.insert(metric.clone(), points);
        }

        view.metric_names = metric_names.into_iter().collect();
        log::debug!(
            "Transformed {} snapshots into {} metric series",
            view.dates.len(),
            view.metric_names.len()
        );

        Ok(view)
    }
}

impl StatsView {
    pub fn is_empty(&self) -> bool {
        self.metric_names.is_empty()
    }

    pub fn metric(&self, name: &str) -> Option<&BTreeMap<String, f64>> {
        self.timeseries.get(name)
    }

    /// The metric shown first when none is selected.
    pub fn default_metric(&self) -> Option<&str> {
        self.metric_names.first().map(String::as_str)
    }

    pub fn chart(&self, metric: &str) -> Result<ChartData, AppError> {
        let by_date = self
            .timeseries
            .get(metric)
            .ok_or_else(|| AppError::UnknownMetric(metric.to_string()))?;

        Ok(ChartData {
            metric: metric.to_string(),
            labels: self.dates.clone(),
            data: self.dates.iter().map(|d| by_date.get(d).copied()).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::summary::{summary_value, Rounding};
    use crate::api::models::SummonerStatsDto;

    fn entry(name: &str, absolute: f64, value: f64) -> StatEntryDto {
        StatEntryDto {
            name: name.to_string(),
            absolute,
            value,
        }
    }

    fn snapshot(entries: Vec<StatEntryDto>) -> SnapshotDto {
        SnapshotDto {
            stats: Some(entries),
        }
    }

    fn sample_daily() -> BTreeMap<String, SnapshotDto> {
        let mut daily = BTreeMap::new();
        daily.insert(
            "2024-01-01".to_string(),
            snapshot(vec![entry("kda", 2.0, 0.2), entry("gamesPlayed", 4.0, 0.4)]),
        );
        daily.insert(
            "2024-01-02".to_string(),
            snapshot(vec![entry("kda", 3.0, 0.3)]),
        );
        daily.insert(
            "2024-01-03".to_string(),
            snapshot(vec![entry("kda", 2.5, 0.25), entry("wardsPlaced", 11.0, 1.1)]),
        );
        daily
    }

    #[test]
    fn parses_supported_date_formats() {
        assert_eq!(parse_date_key("2024-01-01").unwrap(), 1_704_067_200);
        assert_eq!(parse_date_key("2024-01-01T00:00:01Z").unwrap(), 1_704_067_201);
        assert_eq!(parse_date_key("2024-01-01T02:00:00+02:00").unwrap(), 1_704_067_200);
        assert_eq!(parse_date_key("2024-01-01T00:01:00").unwrap(), 1_704_067_260);
    }

    #[test]
    fn rejects_malformed_date() {
        let err = parse_date_key("yesterday").unwrap_err();
        assert!(matches!(err, AppError::MalformedDate { key } if key == "yesterday"));
        assert!(parse_date_key("2024-02-30").is_err());
    }

    #[test]
    fn collects_sorted_metric_names_and_dates() {
        let view = StatsTransformer::new(StatField::Absolute)
            .transform(&sample_daily())
            .unwrap();

        assert_eq!(view.metric_names, vec!["gamesPlayed", "kda", "wardsPlaced"]);
        assert_eq!(view.dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
        assert!(view.skipped.is_empty());
    }

    #[test]
    fn timeseries_matches_snapshots_exactly() {
        let daily = sample_daily();
        let view = StatsTransformer::new(StatField::Absolute)
            .transform(&daily)
            .unwrap();

        for (metric, by_date) in &view.timeseries {
            for (date, value) in by_date {
                let found = daily[date]
                    .entries()
                    .iter()
                    .find(|e| &e.name == metric)
                    .expect("timeseries entry must come from the snapshot");
                assert_eq!(found.absolute, *value);
            }
        }

        for (date, snap) in &daily {
            for e in snap.entries() {
                assert_eq!(view.timeseries[&e.name].get(date), Some(&e.absolute));
            }
        }
    }

    #[test]
    fn series_has_one_point_per_present_date() {
        let view = StatsTransformer::new(StatField::Absolute)
            .transform(&sample_daily())
            .unwrap();

        assert_eq!(view.series["kda"].len(), 3);
        assert_eq!(view.series["gamesPlayed"].len(), 1);
        assert_eq!(view.series["wardsPlaced"].len(), 1);

        let kda = &view.series["kda"];
        assert_eq!(
            kda[0],
            TimelinePoint {
                timestamp: 1_704_067_200,
                value: 2.0
            }
        );
        assert_eq!(kda[1].timestamp, 1_704_153_600);
        assert_eq!(view.series["wardsPlaced"][0].timestamp, 1_704_240_000);
    }

    #[test]
    fn value_field_selects_second_column() {
        let view = StatsTransformer::new(StatField::Value)
            .transform(&sample_daily())
            .unwrap();
        assert_eq!(view.timeseries["kda"]["2024-01-02"], 0.3);
    }

    #[test]
    fn transform_is_idempotent() {
        let daily = sample_daily();
        let transformer = StatsTransformer::new(StatField::Absolute);
        let first = transformer.transform(&daily).unwrap();
        let second = transformer.transform(&daily).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn malformed_date_fails_fast_or_is_skipped() {
        let mut daily = sample_daily();
        daily.insert("not-a-date".to_string(), snapshot(vec![entry("kda", 9.0, 0.9)]));
        let transformer = StatsTransformer::new(StatField::Absolute);

        let err = transformer.transform(&daily).unwrap_err();
        assert!(matches!(err, AppError::MalformedDate { key } if key == "not-a-date"));

        let view = transformer.transform_lenient(&daily);
        assert_eq!(view.skipped, vec!["not-a-date"]);
        assert_eq!(view.dates.len(), 3);
        assert_eq!(view.series["kda"].len(), 3);
        assert!(!view.timeseries["kda"].contains_key("not-a-date"));
    }

    #[test]
    fn chart_leaves_gaps_for_missing_dates() {
        let view = StatsTransformer::new(StatField::Absolute)
            .transform(&sample_daily())
            .unwrap();

        let chart = view.chart("gamesPlayed").unwrap();
        assert_eq!(chart.labels, view.dates);
        assert_eq!(chart.data, vec![Some(4.0), None, None]);

        assert!(matches!(view.chart("pentaKills"), Err(AppError::UnknownMetric(_))));
        assert_eq!(view.default_metric(), Some("gamesPlayed"));
    }

    #[test]
    fn empty_payload_gives_empty_view() {
        let view = StatsTransformer::new(StatField::Absolute)
            .transform(&BTreeMap::new())
            .unwrap();
        assert!(view.is_empty());
        assert_eq!(view.default_metric(), None);
    }

    #[test]
    fn transforms_bundled_sample_payload() {
        let dto: SummonerStatsDto =
            serde_json::from_str(include_str!("../../demos/sample.json")).unwrap();
        let view = StatsTransformer::new(StatField::Absolute)
            .transform(&dto.daily())
            .unwrap();

        assert_eq!(
            view.metric_names,
            vec!["championVariance", "gamesPlayed", "kda", "minionKills", "wardsPlaced"]
        );
        assert_eq!(view.series["minionKills"].len(), 2);
        assert_eq!(
            summary_value(view.metric("gamesPlayed"), Rounding::Uniform),
            "8 (+100%)"
        );
        assert_eq!(summary_value(view.metric("wardsPlaced"), Rounding::Uniform), "XX (+X%)");
    }
}

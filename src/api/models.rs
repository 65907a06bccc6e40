use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Summoner stats response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SummonerStatsDto {
    pub known_summoner: bool,
    #[serde(default)]
    pub player: Option<PlayerDto>,
    #[serde(default)]
    pub records: Option<SummonerRecordDto>,
}

impl SummonerStatsDto {
    pub fn into_known(self, summoner: &str) -> Result<Self, AppError> {
        if self.known_summoner {
            Ok(self)
        } else {
            Err(AppError::UnknownSummoner(summoner.to_string()))
        }
    }

    /// Daily snapshots keyed by date. The backend serializes `null` for a
    /// summoner with no records, which reads as an empty map here.
    pub fn daily(&self) -> BTreeMap<String, SnapshotDto> {
        self.records
            .as_ref()
            .and_then(|r| r.daily.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct PlayerDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub summoner_id: u32,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "PascalCase")]
pub struct SummonerRecordDto {
    #[serde(default)]
    pub daily: Option<BTreeMap<String, SnapshotDto>>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct SnapshotDto {
    #[serde(default)]
    pub stats: Option<Vec<StatEntryDto>>,
}

impl SnapshotDto {
    pub fn entries(&self) -> &[StatEntryDto] {
        self.stats.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct StatEntryDto {
    pub name: String,
    #[serde(default)]
    pub absolute: f64,
    #[serde(default, alias = "Normalized")]
    pub value: f64,
}

// Static metadata response
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDto {
    pub last_updated: i64,
    #[serde(default)]
    pub num_games: u64,
    #[serde(default)]
    pub champions: Vec<Champion>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Champion {
    pub name: String,
    pub shortname: String,
    #[serde(default)]
    pub img: String,
    #[serde(default)]
    pub games: u64,
    #[serde(default)]
    pub title: String,
}

// Team lookup response
#[derive(Debug, Deserialize)]
pub struct TeamLookupDto {
    #[serde(default)]
    pub successful: Option<bool>,
    #[serde(default)]
    pub results: Option<LookupResultDto>,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupResultDto {
    #[serde(default)]
    pub matching: u64,
    #[serde(default)]
    pub available: u64,
    #[serde(default)]
    pub total: u64,
}

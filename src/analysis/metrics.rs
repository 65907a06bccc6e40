// Display metadata for metric identifiers found in stats payloads.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub subtext: &'static str,
}

const KNOWN_METRICS: &[MetricInfo] = &[
    MetricInfo {
        id: "gamesPlayed",
        name: "Games played",
        subtext: "Number of games played",
    },
    MetricInfo {
        id: "kda",
        name: "KDA",
        subtext: "Kills and assists vs deaths",
    },
    MetricInfo {
        id: "minionKills",
        name: "Minions killed",
        subtext: "Minions killed per game",
    },
    MetricInfo {
        id: "wardsPlaced",
        name: "Wards placed",
        subtext: "Wards dropped per game",
    },
    MetricInfo {
        id: "championVariance",
        name: "Champions played",
        subtext: "Number of unique champions played",
    },
];

pub fn lookup(id: &str) -> Option<&'static MetricInfo> {
    KNOWN_METRICS.iter().find(|m| m.id == id)
}

pub fn display_name(id: &str) -> &str {
    lookup(id).map(|m| m.name).unwrap_or(id)
}

pub fn subtext(id: &str) -> &'static str {
    lookup(id).map(|m| m.subtext).unwrap_or("")
}

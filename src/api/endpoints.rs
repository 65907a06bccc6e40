// URL builders for the stats and team lookup frontends.

pub const SUMMONER_PATH: &str = "summoners";
pub const TEAM_PATH: &str = "team/";

pub fn summoner_url(base_url: &str, summoner: &str) -> String {
    format!("{}/{}/{}", base_url, SUMMONER_PATH, summoner.trim())
}

pub fn metadata_url(base_url: &str, metadata_path: &str) -> String {
    format!("{}/{}", base_url, metadata_path)
}

pub fn team_url(base_url: &str) -> String {
    format!("{}/{}", base_url, TEAM_PATH)
}

/// Comma-joined shortname list for the `allies` / `enemies` query parameters.
pub fn join_shortnames(shortnames: &[String]) -> String {
    shortnames.join(",")
}

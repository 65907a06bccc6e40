use crate::config::Config;
use crate::error::AppError;
use governor::{
    clock::{Clock, DefaultClock},
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use serde::de::DeserializeOwned;
use std::fs;
use std::num::NonZeroU32;
use std::path::Path;
use std::thread;
use std::time::Duration;

use super::endpoints;
use super::models::*;

const USER_AGENT: &str = "lol_stats/0.1.0";
const MAX_RETRIES: u32 = 3;

pub struct StatsApiClient {
    config: Config,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    clock: DefaultClock,
}

impl StatsApiClient {
    pub fn new(config: Config) -> Self {
        let per_second = NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = RateLimiter::direct(Quota::per_second(per_second));
        StatsApiClient {
            config,
            rate_limiter,
            clock: DefaultClock::default(),
        }
    }

    fn wait_for_slot(&self) {
        while let Err(not_until) = self.rate_limiter.check() {
            thread::sleep(not_until.wait_time_from(self.clock.now()));
        }
    }

    fn execute_request(&self, url: &str, query: &[(&str, &str)]) -> Result<String, AppError> {
        let mut retry_count = 0;

        loop {
            self.wait_for_slot();
            log::debug!("GET {}", url);

            let mut request = ureq::get(url).set("User-Agent", USER_AGENT);
            for (key, value) in query {
                request = request.query(key, value);
            }

            match request.call() {
                Ok(resp) => {
                    return resp
                        .into_string()
                        .map_err(|e| AppError::HttpError(e.to_string()));
                }
                Err(ureq::Error::Status(429, _)) => {
                    if retry_count >= MAX_RETRIES {
                        return Err(AppError::RateLimited);
                    }
                    let wait_ms = 2000 * (retry_count + 1) as u64;
                    log::warn!("Rate limited, waiting {}ms before retry...", wait_ms);
                    thread::sleep(Duration::from_millis(wait_ms));
                    retry_count += 1;
                }
                Err(ureq::Error::Status(code, _)) => {
                    return Err(AppError::HttpError(format!("{} returned status {}", url, code)));
                }
                Err(e) => {
                    return Err(AppError::HttpError(e.to_string()));
                }
            }
        }
    }

    pub fn get_summoner_stats(&self, summoner: &str) -> Result<SummonerStatsDto, AppError> {
        let url = endpoints::summoner_url(&self.config.base_url, summoner);

        let body = self.execute_request(&url, &[])?;
        parse_json(&body)
    }

    pub fn get_metadata(&self) -> Result<MetadataDto, AppError> {
        let url = endpoints::metadata_url(&self.config.base_url, &self.config.metadata_path);

        let body = self.execute_request(&url, &[])?;
        parse_json(&body)
    }

    pub fn lookup_team(
        &self,
        allies: &[String],
        enemies: &[String],
    ) -> Result<LookupResultDto, AppError> {
        let url = endpoints::team_url(&self.config.base_url);
        let allies = endpoints::join_shortnames(allies);
        let enemies = endpoints::join_shortnames(enemies);

        let body = self.execute_request(&url, &[("allies", &allies), ("enemies", &enemies)])?;
        let dto: TeamLookupDto = parse_json(&body)?;
        dto.into_results()
    }
}

impl TeamLookupDto {
    pub fn into_results(self) -> Result<LookupResultDto, AppError> {
        if self.successful == Some(false) {
            return Err(AppError::LookupFailed(
                "backend reported an unsuccessful query".to_string(),
            ));
        }

        self.results
            .ok_or_else(|| AppError::LookupFailed("response carried no results".to_string()))
    }
}

pub fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, AppError> {
    serde_json::from_str(body).map_err(|e| AppError::JsonError(e.to_string()))
}

/// Reads a payload from disk instead of the network (the frontends served
/// sample payloads as static files).
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::IoError(format!("{}: {}", path.display(), e)))?;

    serde_json::from_str(&content)
        .map_err(|e| AppError::JsonError(format!("{}: {}", path.display(), e)))
}

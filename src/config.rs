use crate::error::AppError;
use std::env;

const DEFAULT_BASE_URL: &str = "http://localhost:8088";
const DEFAULT_METADATA_PATH: &str = "static/data/metadata.json";
const DEFAULT_REQUESTS_PER_SECOND: u32 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub metadata_path: String,
    pub requests_per_second: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            metadata_path: DEFAULT_METADATA_PATH.to_string(),
            requests_per_second: DEFAULT_REQUESTS_PER_SECOND,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        Self::from_values(
            env::var("LOLSTAT_BASE_URL").ok(),
            env::var("LOLSTAT_METADATA_PATH").ok(),
            env::var("LOLSTAT_REQUESTS_PER_SECOND").ok(),
        )
    }

    fn from_values(
        base_url: Option<String>,
        metadata_path: Option<String>,
        requests_per_second: Option<String>,
    ) -> Result<Self, AppError> {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(AppError::ConfigError(format!(
                "LOLSTAT_BASE_URL must start with http:// or https:// (got {})",
                base_url
            )));
        }

        let metadata_path = metadata_path
            .map(|p| p.trim_start_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_METADATA_PATH.to_string());

        let requests_per_second = match requests_per_second {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(AppError::ConfigError(format!(
                        "LOLSTAT_REQUESTS_PER_SECOND must be a positive integer (got {})",
                        raw
                    )))
                }
            },
            None => DEFAULT_REQUESTS_PER_SECOND,
        };

        Ok(Config {
            base_url,
            metadata_path,
            requests_per_second,
        })
    }
}

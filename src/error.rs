use thiserror::Error;

use crate::team::Side;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP error: {0} (check your connection and try again)")]
    HttpError(String),

    #[error("Rate limit exceeded, please try again later")]
    RateLimited,

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Summoner not tracked: {0}")]
    UnknownSummoner(String),

    #[error("Malformed date key in stats payload: {key:?}")]
    MalformedDate { key: String },

    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    #[error("No champion named {0:?}")]
    NoSuchChampion(String),

    #[error("The {side} team already has 5 champions")]
    TeamFull { side: Side },

    #[error("{name} is not on the {side} team")]
    NotOnTeam { name: String, side: Side },

    #[error("Team lookup failed: {0}")]
    LookupFailed(String),

    #[error("Not enough history to compute a change")]
    InsufficientHistory,
}

pub mod format;
pub mod metrics;
pub mod summary;
pub mod timeseries;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid visible count: {0} (must be at least 1)")]
    InvalidVisibleCount(usize),

    #[error("Invalid carousel timing: transition {transition_ms}ms must be shorter than interval {interval_ms}ms")]
    InvalidTiming { interval_ms: u64, transition_ms: u64 },

    #[error("Catalog not found: {0}")]
    CatalogNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("Selector error: {0}")]
    Selector(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("No day view available for {day}")]
    FetchUnavailable { day: NaiveDate },
    #[error("Malformed clue block: {reason}")]
    MalformedClueBlock { reason: String },
    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("{0}")]
    Other(String),
}

impl ScrapeError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        ScrapeError::MalformedClueBlock {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

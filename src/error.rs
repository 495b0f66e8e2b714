//! Error types for job-finder

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobSearchError {
    #[error("File not found or unreadable: {path:?}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not parse dataset: {0}")]
    DatasetParse(String),

    #[error("Dataset has {columns} columns; the title column needs at least 8")]
    Schema { columns: usize },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("An error occurred while fetching data: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed provider response: {0}")]
    Decode(String),

    #[error("Invalid input: {0}")]
    InputValidation(String),
}

pub type Result<T> = std::result::Result<T, JobSearchError>;

impl From<csv::Error> for JobSearchError {
    fn from(e: csv::Error) -> Self {
        JobSearchError::DatasetParse(e.to_string())
    }
}

impl From<calamine::Error> for JobSearchError {
    fn from(e: calamine::Error) -> Self {
        JobSearchError::DatasetParse(e.to_string())
    }
}

//! Error types for Swiftdial core logic

use thiserror::Error;

/// Main error type for core operations
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("invalid time of day {0:?}, expected HH:MM")]
    InvalidTime(String),

    #[error("calling window may not cross midnight ({start}-{end})")]
    WindowCrossesMidnight { start: String, end: String },

    #[error("invalid duration {0:?}, expected HH:MM:SS")]
    InvalidDuration(String),

    #[error("CSV is missing required column {0:?}")]
    MissingColumn(&'static str),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;

//! Session log entries

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Severity of a session log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

/// One line of the session log. Presentational only, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub message: String,
    #[serde(default, rename = "type")]
    pub level: LogLevel,
}

impl LogEntry {
    /// Entry stamped with the current local time.
    pub fn now(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            message: message.into(),
            level,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::now(LogLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::now(LogLevel::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::now(LogLevel::Error, message)
    }
}

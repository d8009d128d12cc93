use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Conditions under which an aggregate is undefined.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("{operation} is undefined over an empty record set")]
    EmptyInput { operation: &'static str },
}

/// Failures while reading record files or writing report artifacts.
#[derive(Debug, Error)]
pub enum FileError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported record file '{}': expected .json or .csv", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// Failures while reading or validating an `AnalyticsConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

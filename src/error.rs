//! Errors raised while loading networks and computing their properties.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while resolving, loading, analysing or writing networks.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid settings or an unusable input directory, detected before any analysis runs.
    #[error("configuration error: {0}")]
    Config(String),
    /// Malformed input file.
    #[error("{}:{line}: {message}", path.display())]
    Format {
        path: PathBuf,
        /// 1-based line number of the offending record.
        line: u64,
        message: String,
    },
    /// An analyzer was handed a graph it can't process, or produced inconsistent output.
    #[error("analysis error: {0}")]
    Analysis(String),
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Delimited text error.
    #[error("delimited text error: {0}")]
    Csv(#[from] csv::Error),
    /// Settings deserialization error.
    #[error("settings error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn format(path: impl Into<PathBuf>, line: u64, message: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

use std::path::PathBuf;

use thiserror::Error;

/// Errors from validating a [crate::config::PredictorConfig].
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} index width of {bits} bits exceeds the maximum of {max}")]
    IndexWidthTooLarge { name: &'static str, bits: usize, max: usize },

    #[error("gshare history length N={n} exceeds index width M1={m1}")]
    HistoryTooLong { n: usize, m1: usize },
}

/// Errors from reading a trace file.
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Failed to read trace '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

pub type TraceResult<T> = Result<T, TraceError>;

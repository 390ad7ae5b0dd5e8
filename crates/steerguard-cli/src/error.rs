//! Error types for the steerguard CLI

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Log parse error at line {line}: {reason}")]
    LogParse { line: usize, reason: String },

    #[error("Invalid limits: {0}")]
    InvalidLimits(#[from] steerguard_safety::ConfigError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::IoError(_) => 2,
            Self::LogParse { .. } | Self::JsonError(_) => 4,
            Self::InvalidLimits(_) => 5,
        }
    }
}

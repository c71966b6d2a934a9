//! Application-level error type for the CLI.

use thiserror::Error;

use crate::config::ConfigError;
use crate::diagnostics::DiagnosticsError;
use crate::flags::FlagError;
use crate::probe::ProbeError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Flag(#[from] FlagError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Diagnostics(#[from] DiagnosticsError),

    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Process exit code: 2 for caller contract violations, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Flag(FlagError::InvalidArgument(_))
            | AppError::Config(ConfigError::Flag(FlagError::InvalidArgument(_))) => 2,
            _ => 1,
        }
    }
}

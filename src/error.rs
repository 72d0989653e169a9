//! Error types for portsweep.
//!
//! Uses `thiserror` for ergonomic error definitions. Per-port conditions
//! (refused, timed out, unexpected socket errors) are never errors here;
//! they are recorded as states in the scan report.

use std::path::PathBuf;
use thiserror::Error;

pub use crate::types::PortError;

/// Failure to turn a hostname into a single address.
#[derive(Error, Debug, Clone)]
pub enum ResolutionError {
    #[error("empty hostname")]
    EmptyHostname,

    #[error("failed to resolve hostname '{0}': {1}")]
    LookupFailed(String, String),

    #[error("no IP addresses found for hostname '{0}'")]
    NoAddressesFound(String),
}

/// Fatal errors for a scan run.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Errors while loading or saving application settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("failed to write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("invalid settings format: {0}")]
    InvalidFormat(String),

    #[error("unknown output format '{0}'")]
    UnknownOutputFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidFormat(e.to_string())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level error for the command-line front end.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Port(#[from] PortError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;

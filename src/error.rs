//! Error types for bstrap operations.
//!
//! This module defines [`BstrapError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Environment mismatches (interpreter version, failed installs) are errors
//!   and propagate to `main`
//! - Missing tools are not errors; they are reported outcomes with remediation
//! - Use `anyhow::Error` (via `BstrapError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for bstrap operations.
#[derive(Debug, Error)]
pub enum BstrapError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// No usable Python interpreter could be located.
    #[error("Python interpreter not found: {message}")]
    InterpreterNotFound { message: String },

    /// The interpreter version is outside the supported range.
    #[error("This script requires Python {required} or higher (found {found})")]
    UnsupportedInterpreter { required: String, found: String },

    /// The interpreter ran but its version could not be determined.
    #[error("Could not determine version of {interpreter}: {message}")]
    VersionUnreadable {
        interpreter: PathBuf,
        message: String,
    },

    /// Package installer exited unsuccessfully.
    #[error("Failed to install '{package}' (exit code {code:?})")]
    InstallFailed { package: String, code: Option<i32> },

    /// Command could not be spawned or waited on.
    #[error("Failed to run {command}: {message}")]
    CommandFailed { command: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BstrapError {
    /// Process exit code for this error.
    ///
    /// A failed install surfaces the installer's own status; everything
    /// else exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            BstrapError::InstallFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

/// Result type alias for bstrap operations.
pub type Result<T> = std::result::Result<T, BstrapError>;

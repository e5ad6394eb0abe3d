//! CLI-specific error types
//!
//! Every CLI error is fatal: it is printed and the process exits non-zero.

use std::fmt;

use crate::db::DbError;
use crate::persona::RepoError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// Database file already exists
    AlreadyInitialized,
    /// Database file missing
    NotInitialized,
    /// Store could not be opened
    StoreError,
    /// Server failed to start or stopped with an error
    ServeFailed,
}

impl CliErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "PERSONAS_CLI_CONFIG_ERROR",
            Self::AlreadyInitialized => "PERSONAS_CLI_ALREADY_INITIALIZED",
            Self::NotInitialized => "PERSONAS_CLI_NOT_INITIALIZED",
            Self::StoreError => "PERSONAS_CLI_STORE_ERROR",
            Self::ServeFailed => "PERSONAS_CLI_SERVE_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn already_initialized(path: &str) -> Self {
        Self::new(
            CliErrorCode::AlreadyInitialized,
            format!("Database '{}' already exists", path),
        )
    }

    pub fn not_initialized(path: &str) -> Self {
        Self::new(
            CliErrorCode::NotInitialized,
            format!("Database '{}' not found. Run 'personas init' first.", path),
        )
    }

    pub fn serve_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ServeFailed, msg)
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<DbError> for CliError {
    fn from(e: DbError) -> Self {
        Self::new(CliErrorCode::StoreError, e.to_string())
    }
}

impl From<RepoError> for CliError {
    fn from(e: RepoError) -> Self {
        Self::new(CliErrorCode::StoreError, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

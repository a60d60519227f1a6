//! Global error handling for fsascan
//!
//! This module provides a centralized error type that can represent errors
//! from all modules in the project, split along the failure taxonomy the
//! analyzer cares about: invalid arguments fail fast, missing paths and
//! generic I/O failures are recoverable per entry.

use std::io;
use thiserror::Error;

/// Global error type for fsascan operations
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Invalid argument (bad threshold string, negative size, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Path not found (e.g. entry deleted between listing and stat)
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON processing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unexpected error
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl AnalyzerError {
    /// Whether this error may be logged and skipped during traversal
    /// rather than aborting the whole run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AnalyzerError::Io(_) | AnalyzerError::PathNotFound(_) | AnalyzerError::Unexpected(_)
        )
    }
}

/// Specialized Result type for fsascan operations
pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Creates an AnalyzerError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::AnalyzerError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

/// Extension trait for adding context to errors
pub trait ResultExt<T, E> {
    /// Add additional context to an error
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;
}

impl<T, E: std::error::Error + 'static> ResultExt<T, E> for std::result::Result<T, E> {
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|e| {
            let context = f();
            AnalyzerError::Unexpected(format!("{}: {}", context, e))
        })
    }
}

// Allow converting AnalyzerError to io::Error for interop with io-based
// callers and tests
impl From<AnalyzerError> for io::Error {
    fn from(err: AnalyzerError) -> Self {
        io::Error::new(io::ErrorKind::Other, err.to_string())
    }
}

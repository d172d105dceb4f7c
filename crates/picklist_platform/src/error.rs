//! Platform error types

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// A listener was released that the source does not know about
    #[error("Keyboard listener {0} is not registered")]
    UnknownListener(u64),

    /// Platform signal source not available
    #[error("Platform not available: {0}")]
    Unavailable(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;

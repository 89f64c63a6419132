//! Error types for wayline-core

use thiserror::Error;
use wayline_pattern::{BuildError, PatternError};

/// Result type alias for wayline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the navigation core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Raw location could not be parsed into a snapshot
    #[error("Invalid location {location:?}: {reason}")]
    InvalidLocation { location: String, reason: String },

    /// Template or dispatch table misconfigured
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// URL builder failed
    #[error(transparent)]
    Build(#[from] BuildError),

    /// The platform history API rejected a write
    #[error("Platform error: {0}")]
    Platform(String),

    /// Operation not available on this platform
    #[error("Unsupported: {0}")]
    Unsupported(&'static str),
}

impl Error {
    pub(crate) fn invalid_location(location: &str, reason: impl ToString) -> Self {
        Error::InvalidLocation {
            location: location.to_string(),
            reason: reason.to_string(),
        }
    }
}

//! Protocol mapper error types.
//!
//! Mapper failures are returned to the host rather than recovered locally.
//! The host decides whether a failure aborts token issuance.

use thiserror::Error;

/// Errors raised by protocol mappers and the mapper registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapperError {
    /// A required configuration value is absent or empty.
    #[error("required mapper configuration '{key}' is missing")]
    ConfigurationMissing {
        /// The configuration key that was expected.
        key: String,
    },

    /// No mapper is registered under the given identifier.
    #[error("unknown protocol mapper: {0}")]
    UnknownMapper(String),

    /// A mapper representation could not be parsed.
    #[error("invalid mapper representation: {0}")]
    InvalidRepresentation(String),
}

impl MapperError {
    /// Creates a [`MapperError::ConfigurationMissing`] for `key`.
    #[must_use]
    pub fn configuration_missing(key: impl Into<String>) -> Self {
        Self::ConfigurationMissing { key: key.into() }
    }

    /// Returns a stable error code suitable for host logs and events.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigurationMissing { .. } => "mapper_configuration_missing",
            Self::UnknownMapper(_) => "unknown_mapper",
            Self::InvalidRepresentation(_) => "invalid_mapper_representation",
        }
    }

    /// Returns whether this error points at a broken deployment.
    ///
    /// Deployment errors should stop issuance or be logged loudly by the host.
    #[must_use]
    pub const fn is_deployment_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigurationMissing { .. } | Self::UnknownMapper(_)
        )
    }
}

impl From<serde_json::Error> for MapperError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidRepresentation(err.to_string())
    }
}

/// Result type for mapper operations.
pub type MapperResult<T> = Result<T, MapperError>;

//! Error types for `queryparams`.
//!
//! A single error type covers every fallible operation of the store, the
//! navigators and the configuration loader. Each message is prefixed with a
//! stable code (`QP-XXX`) so that failures surfacing in a browser console or a
//! CLI transcript can be matched without parsing the free-form text.

use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for `queryparams` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing query parameters.
#[derive(Error, Debug)]
pub enum Error {
    /// The store was used without its navigation context (QP-001).
    ///
    /// Raised when a store is built without a navigator or a change provider,
    /// or when the hosting environment exposes no browser window.
    #[error("[QP-001] Missing context: {0}")]
    MissingContext(String),

    /// The navigator could not push or replace a history entry (QP-002).
    #[error("[QP-002] Navigation error: {0}")]
    Navigation(String),

    /// A typed view could not be converted to or from a parameter set (QP-003).
    #[error("[QP-003] Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (QP-004).
    #[error("[QP-004] Configuration error: {0}")]
    Config(String),

    /// A change observer failed (QP-005).
    ///
    /// Observer failures are reported through `tracing` and never abort the
    /// write that triggered them.
    #[error("[QP-005] Observer error: {0}")]
    Observer(String),
}

impl Error {
    /// Returns the error code (e.g., "QP-001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingContext(_) => "QP-001",
            Self::Navigation(_) => "QP-002",
            Self::Serialization(_) => "QP-003",
            Self::Config(_) => "QP-004",
            Self::Observer(_) => "QP-005",
        }
    }

    /// Returns true if retrying the operation may succeed.
    ///
    /// A missing context or a bad configuration will fail the same way every
    /// time.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::MissingContext(_) | Self::Config(_))
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

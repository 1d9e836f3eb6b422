//! crates/logging/src/error.rs
//! Error taxonomy shared by every fallible logging operation.

use crate::levels::LogLevel;

/// Boxed error raised by a caller-supplied formatter or output.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Reasons a level value fails validation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LevelError {
    /// The value is not part of the level table at all.
    #[error("invalid log level ({0})")]
    Unknown(String),
    /// A special level was supplied where only standard levels are accepted.
    #[error("special log levels cannot be set as default log level ({0})")]
    SpecialLevel(LogLevel),
}

/// Errors surfaced by the logger, its registry and its configuration.
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A level value failed validation.
    #[error(transparent)]
    InvalidLevel(#[from] LevelError),

    /// The configuration input was missing or malformed.
    #[error("invalid logger configuration: {reason}")]
    InvalidConfig {
        /// Description of the rejected input.
        reason: String,
    },

    /// `create` was called while a logger is already registered.
    #[error("logger instance already created; call reset() first")]
    AlreadyCreated,

    /// The registry was consulted before any logger was created.
    #[error("logger instance not created; call create() first")]
    NotCreated,

    /// The active formatter failed.
    #[error("formatter failed: {0}")]
    Format(#[source] BoxError),

    /// The output selected for the record failed.
    #[error("log output failed: {0}")]
    Output(#[source] BoxError),
}

impl LoggerError {
    /// Builds an [`LoggerError::InvalidConfig`] from a reason.
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors produced by level validation.
    #[must_use]
    pub const fn is_invalid_level(&self) -> bool {
        matches!(self, Self::InvalidLevel(_))
    }
}

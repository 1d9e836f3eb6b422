//! crates/logging/src/record.rs
//! Immutable log records and the payload handed to outputs.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use time::OffsetDateTime;

use crate::levels::LogLevel;

/// Parsed result of a single log call.
///
/// Records are frozen once built: fields are private and the structured
/// argument list is shared behind an [`Arc`], so clones never expose a
/// mutable view of the original call's arguments.
#[derive(Clone, Debug, PartialEq)]
pub struct LogRecord {
    level: LogLevel,
    message: String,
    args: Arc<[Value]>,
    timestamp: OffsetDateTime,
}

impl LogRecord {
    /// Assembles a record from already-parsed parts.
    #[must_use]
    pub fn new(
        level: LogLevel,
        message: impl Into<String>,
        args: Vec<Value>,
        timestamp: OffsetDateTime,
    ) -> Self {
        Self {
            level,
            message: message.into(),
            args: args.into(),
            timestamp,
        }
    }

    /// Level the record was produced for.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Upper-case label of [`level`](Self::level).
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.level.label()
    }

    /// Free-text message assembled from the leading primitive arguments.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Structured arguments, in call order.
    #[must_use]
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Instant attached to the record, normalized to UTC.
    #[must_use]
    pub const fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }
}

/// Output of a formatter, passed verbatim to the selected output.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// Rendered text.
    Text(String),
    /// The record itself, for outputs that do their own rendering.
    Record(LogRecord),
}

impl Payload {
    /// Returns the rendered text, if the payload is textual.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Record(_) => None,
        }
    }

    /// Returns the record, if the formatter passed it through.
    #[must_use]
    pub const fn as_record(&self) -> Option<&LogRecord> {
        match self {
            Self::Text(_) => None,
            Self::Record(record) => Some(record),
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Record(record) => write!(f, "[{}] {}", record.label(), record.message()),
        }
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<LogRecord> for Payload {
    fn from(record: LogRecord) -> Self {
        Self::Record(record)
    }
}

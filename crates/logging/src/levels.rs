//! crates/logging/src/levels.rs
//! Level table: standard severities, special levels, labels and ranks.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::LevelError;

/// Number of entries in the level table.
pub const LEVEL_COUNT: usize = 10;

/// Severity attached to every log call.
///
/// Standard levels (`Off` through `Trace`) participate in threshold filtering;
/// their value doubles as the rank, so a smaller value means a more severe,
/// less verbose level. The special levels carry negative values and are never
/// valid as a configured threshold.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum LogLevel {
    /// Disables every standard level.
    Off,
    /// Unrecoverable failures.
    Fatal,
    /// Failures of a single operation.
    Error,
    /// Suspicious but tolerated conditions.
    Warn,
    /// Routine operational messages.
    Info,
    /// Diagnostic detail for developers.
    Debug,
    /// Finest-grained tracing output.
    Trace,
    /// Gated by the verbose flag instead of the threshold.
    Verbose,
    /// Always emitted regardless of the threshold.
    Log,
    /// Fallback bucket for outputs without a level-specific mapping.
    Default,
}

impl LogLevel {
    /// Every level in table order.
    pub const ALL: [Self; LEVEL_COUNT] = [
        Self::Off,
        Self::Fatal,
        Self::Error,
        Self::Warn,
        Self::Info,
        Self::Debug,
        Self::Trace,
        Self::Verbose,
        Self::Log,
        Self::Default,
    ];

    /// Levels that may be configured as a threshold, least verbose first.
    pub const STANDARD: [Self; 7] = [
        Self::Off,
        Self::Fatal,
        Self::Error,
        Self::Warn,
        Self::Info,
        Self::Debug,
        Self::Trace,
    ];

    /// Returns the numeric value of the level.
    pub const fn value(self) -> i32 {
        match self {
            Self::Off => 0,
            Self::Fatal => 1,
            Self::Error => 2,
            Self::Warn => 3,
            Self::Info => 4,
            Self::Debug => 5,
            Self::Trace => 6,
            Self::Verbose => -11,
            Self::Log => -12,
            Self::Default => -99,
        }
    }

    /// Returns the comparison rank; identical to [`value`](Self::value).
    pub const fn rank(self) -> i32 {
        self.value()
    }

    /// Returns the upper-case label of the level.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::Fatal => "FATAL",
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
            Self::Verbose => "VERBOSE",
            Self::Log => "LOG",
            Self::Default => "DEFAULT",
        }
    }

    /// Reports whether the level participates in threshold filtering.
    pub const fn is_standard(self) -> bool {
        self.value() >= 0
    }

    /// Reports whether the level is one of `Verbose`, `Log` or `Default`.
    pub const fn is_special(self) -> bool {
        !self.is_standard()
    }

    /// Position of the level inside [`LogLevel::ALL`].
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Off => 0,
            Self::Fatal => 1,
            Self::Error => 2,
            Self::Warn => 3,
            Self::Info => 4,
            Self::Debug => 5,
            Self::Trace => 6,
            Self::Verbose => 7,
            Self::Log => 8,
            Self::Default => 9,
        }
    }

    /// Resolves a numeric level value.
    pub fn from_value(value: i32) -> Result<Self, LevelError> {
        Self::ALL
            .into_iter()
            .find(|level| level.value() == value)
            .ok_or_else(|| LevelError::Unknown(value.to_string()))
    }

    /// Resolves a label, ignoring ASCII case.
    pub fn from_label(label: &str) -> Result<Self, LevelError> {
        Self::ALL
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(label))
            .ok_or_else(|| LevelError::Unknown(label.to_owned()))
    }

    /// Resolves a level from a JSON value holding a label or a numeric value.
    ///
    /// `null` and every non-string, non-integer value are rejected with
    /// [`LevelError::Unknown`].
    pub fn from_json(value: &Value) -> Result<Self, LevelError> {
        match value {
            Value::String(text) => text.parse(),
            Value::Number(number) => number
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .map_or_else(
                    || Err(LevelError::Unknown(number.to_string())),
                    Self::from_value,
                ),
            Value::Null => Err(LevelError::Unknown("undefined".to_owned())),
            other => Err(LevelError::Unknown(other.to_string())),
        }
    }

    /// Checks that the level may be used as a threshold.
    pub fn validate_threshold(self) -> Result<Self, LevelError> {
        if self.is_standard() {
            Ok(self)
        } else {
            Err(LevelError::SpecialLevel(self))
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LogLevel {
    type Err = LevelError;

    /// Parses a label (`"info"`, `"WARN"`) or a numeric value (`"4"`, `"-12"`).
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();
        if token.is_empty() {
            return Err(LevelError::Unknown("empty level token".to_owned()));
        }

        match token.parse::<i32>() {
            Ok(value) => Self::from_value(value),
            Err(_) => Self::from_label(token),
        }
    }
}

impl TryFrom<i32> for LogLevel {
    type Error = LevelError;

    fn try_from(value: i32) -> Result<Self, LevelError> {
        Self::from_value(value)
    }
}

impl From<LogLevel> for i32 {
    fn from(level: LogLevel) -> Self {
        level.value()
    }
}

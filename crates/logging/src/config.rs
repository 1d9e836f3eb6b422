//! crates/logging/src/config.rs
//! Partial logger configuration, typed or decoded from a JSON object.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::LoggerError;
use crate::formatter::{Formatter, formatter_by_name};
use crate::levels::LogLevel;
use crate::output::{Sink, null_sink};

/// Partial configuration update.
///
/// Every field is optional; absent fields leave the logger untouched. The
/// same type seeds a new logger, where absent fields take the defaults
/// (threshold `OFF`, verbose off, plain formatter, no-op outputs).
#[derive(Clone, Default)]
pub struct LoggerOptions {
    /// New threshold. Must be a standard level.
    pub log_level: Option<LogLevel>,
    /// New state of the verbose flag.
    pub verbose: Option<bool>,
    /// Replacement formatter.
    pub formatter: Option<Arc<dyn Formatter>>,
    /// New `DEFAULT` output. Supplying it clears level-specific mappings
    /// before [`outputs`](Self::outputs) are applied.
    pub default_output: Option<Arc<dyn Sink>>,
    /// Level-specific bindings, applied in order.
    pub outputs: Vec<(LogLevel, Arc<dyn Sink>)>,
}

impl LoggerOptions {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the threshold.
    #[must_use]
    pub const fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Sets the verbose flag.
    #[must_use]
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    /// Replaces the formatter.
    #[must_use]
    pub fn with_formatter(mut self, formatter: Arc<dyn Formatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Replaces the `DEFAULT` output.
    #[must_use]
    pub fn with_default_output(mut self, output: Arc<dyn Sink>) -> Self {
        self.default_output = Some(output);
        self
    }

    /// Adds a level-specific binding.
    #[must_use]
    pub fn with_output(mut self, level: LogLevel, output: Arc<dyn Sink>) -> Self {
        self.outputs.push((level, output));
        self
    }

    /// Reports whether the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log_level.is_none()
            && self.verbose.is_none()
            && self.formatter.is_none()
            && self.default_output.is_none()
            && self.outputs.is_empty()
    }

    /// Checks every present field without applying anything.
    pub fn validate(&self) -> Result<(), LoggerError> {
        if let Some(level) = self.log_level {
            level.validate_threshold()?;
        }
        Ok(())
    }

    /// Decodes an update from a JSON object, resolving only the `null`
    /// output name.
    ///
    /// See [`from_value_with`](Self::from_value_with) for the accepted keys.
    pub fn from_value(value: &Value) -> Result<Self, LoggerError> {
        Self::from_value_with(value, |name| (name == "null").then(null_sink))
    }

    /// Decodes an update from a JSON object.
    ///
    /// Recognized keys:
    ///
    /// - `logLevel`: level label (any case) or numeric level value
    /// - `verbose`: boolean
    /// - `formatter`: `plain`, `json`, `passthrough` or `null`
    /// - `defaultLogger`: output name passed to `resolve`
    /// - `loggerMap`: object from level label or value to output name
    ///
    /// Unknown keys are ignored. A present key always counts as supplied, so
    /// a `null` value goes through validation like any other.
    ///
    /// # Errors
    ///
    /// [`LoggerError::InvalidConfig`] for a non-object input, a wrongly typed
    /// field or an unresolvable name; [`LoggerError::InvalidLevel`] for an
    /// unknown level or a special level used as the threshold.
    pub fn from_value_with<R>(value: &Value, resolve: R) -> Result<Self, LoggerError>
    where
        R: Fn(&str) -> Option<Arc<dyn Sink>>,
    {
        let object = match value {
            Value::Object(object) => object,
            Value::Null => {
                return Err(LoggerError::invalid_config("configuration is null"));
            }
            other => {
                return Err(LoggerError::invalid_config(format!(
                    "configuration must be an object, got {}",
                    type_name(other)
                )));
            }
        };

        let mut options = Self::default();

        if let Some(level) = object.get("logLevel") {
            options.log_level = Some(LogLevel::from_json(level)?.validate_threshold()?);
        }

        if let Some(verbose) = object.get("verbose") {
            let flag = verbose
                .as_bool()
                .ok_or_else(|| wrong_type("verbose", "a boolean", verbose))?;
            options.verbose = Some(flag);
        }

        if let Some(formatter) = object.get("formatter") {
            let name = formatter
                .as_str()
                .ok_or_else(|| wrong_type("formatter", "a string", formatter))?;
            let resolved = formatter_by_name(name).ok_or_else(|| {
                LoggerError::invalid_config(format!("unknown formatter '{name}'"))
            })?;
            options.formatter = Some(resolved);
        }

        if let Some(output) = object.get("defaultLogger") {
            options.default_output = Some(resolve_output("defaultLogger", output, &resolve)?);
        }

        if let Some(map) = object.get("loggerMap") {
            options.outputs = decode_output_map(map, &resolve)?;
        }

        Ok(options)
    }
}

impl fmt::Debug for LoggerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outputs: Vec<&'static str> = self
            .outputs
            .iter()
            .map(|(level, _)| level.label())
            .collect();
        f.debug_struct("LoggerOptions")
            .field("log_level", &self.log_level)
            .field("verbose", &self.verbose)
            .field("formatter", &self.formatter.is_some())
            .field("default_output", &self.default_output.is_some())
            .field("outputs", &outputs)
            .finish()
    }
}

fn decode_output_map<R>(
    map: &Value,
    resolve: &R,
) -> Result<Vec<(LogLevel, Arc<dyn Sink>)>, LoggerError>
where
    R: Fn(&str) -> Option<Arc<dyn Sink>>,
{
    let entries: &Map<String, Value> = map
        .as_object()
        .ok_or_else(|| wrong_type("loggerMap", "an object", map))?;

    entries
        .iter()
        .map(|(key, output)| -> Result<_, LoggerError> {
            let level: LogLevel = key.parse()?;
            Ok((level, resolve_output("loggerMap", output, resolve)?))
        })
        .collect()
}

fn resolve_output<R>(
    field: &str,
    value: &Value,
    resolve: &R,
) -> Result<Arc<dyn Sink>, LoggerError>
where
    R: Fn(&str) -> Option<Arc<dyn Sink>>,
{
    let name = value
        .as_str()
        .ok_or_else(|| wrong_type(field, "an output name", value))?;
    resolve(name).ok_or_else(|| {
        LoggerError::invalid_config(format!("{field}: unknown output '{name}'"))
    })
}

fn wrong_type(field: &str, expected: &str, found: &Value) -> LoggerError {
    LoggerError::invalid_config(format!(
        "{field} must be {expected}, got {}",
        type_name(found)
    ))
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

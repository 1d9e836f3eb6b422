//! crates/logging/src/formatter.rs
//! Formatter capability and the built-in renderings.
//!
//! A formatter turns a [`LogRecord`] into the [`Payload`] handed to the
//! selected output. Text formatters render into [`Payload::Text`]; the
//! [`PassthroughFormatter`] forwards the record untouched for outputs that do
//! their own rendering.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use time::format_description::well_known::Rfc3339;

use crate::error::BoxError;
use crate::record::{LogRecord, Payload};

/// Renders a record for an output.
pub trait Formatter: Send + Sync {
    /// Produces the payload for `record`.
    fn format(&self, record: &LogRecord) -> Result<Payload, BoxError>;
}

impl<F> Formatter for F
where
    F: Fn(&LogRecord) -> Result<Payload, BoxError> + Send + Sync,
{
    fn format(&self, record: &LogRecord) -> Result<Payload, BoxError> {
        self(record)
    }
}

/// Wraps an infallible closure as a shared formatter.
pub fn formatter_fn<F, P>(format: F) -> Arc<dyn Formatter>
where
    F: Fn(&LogRecord) -> P + Send + Sync + 'static,
    P: Into<Payload>,
{
    Arc::new(FnFormatter(format))
}

struct FnFormatter<F>(F);

impl<F, P> Formatter for FnFormatter<F>
where
    F: Fn(&LogRecord) -> P + Send + Sync,
    P: Into<Payload>,
{
    fn format(&self, record: &LogRecord) -> Result<Payload, BoxError> {
        Ok((self.0)(record).into())
    }
}

impl<F> fmt::Debug for FnFormatter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnFormatter")
    }
}

/// Single-line text: `<rfc3339> [LABEL] message <args as compact JSON>`.
///
/// This is the formatter a freshly constructed logger uses.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainFormatter;

impl Formatter for PlainFormatter {
    fn format(&self, record: &LogRecord) -> Result<Payload, BoxError> {
        let mut line = record.timestamp().format(&Rfc3339)?;
        line.push_str(" [");
        line.push_str(record.label());
        line.push(']');

        if !record.message().is_empty() {
            line.push(' ');
            line.push_str(record.message());
        }

        for arg in record.args() {
            line.push(' ');
            line.push_str(&serde_json::to_string(arg)?);
        }

        Ok(Payload::Text(line))
    }
}

/// One JSON object per record.
///
/// Keys: `timestamp`, `level`, `message` and, when present, `args`.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, record: &LogRecord) -> Result<Payload, BoxError> {
        let mut object = Map::new();
        object.insert(
            "timestamp".to_owned(),
            Value::String(record.timestamp().format(&Rfc3339)?),
        );
        object.insert("level".to_owned(), Value::from(record.label()));
        object.insert("message".to_owned(), Value::from(record.message()));
        if !record.args().is_empty() {
            object.insert("args".to_owned(), Value::Array(record.args().to_vec()));
        }

        Ok(Payload::Text(serde_json::to_string(&Value::Object(object))?))
    }
}

/// Hands the record itself to the output.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassthroughFormatter;

impl Formatter for PassthroughFormatter {
    fn format(&self, record: &LogRecord) -> Result<Payload, BoxError> {
        Ok(Payload::Record(record.clone()))
    }
}

/// Renders every record as empty text.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullFormatter;

impl Formatter for NullFormatter {
    fn format(&self, _record: &LogRecord) -> Result<Payload, BoxError> {
        Ok(Payload::Text(String::new()))
    }
}

/// Looks up a built-in formatter by its configuration name.
///
/// Recognized names are `plain`, `json`, `passthrough` and `null`, matched
/// without regard to ASCII case.
#[must_use]
pub fn formatter_by_name(name: &str) -> Option<Arc<dyn Formatter>> {
    let formatter: Arc<dyn Formatter> = match name.to_ascii_lowercase().as_str() {
        "plain" => Arc::new(PlainFormatter),
        "json" => Arc::new(JsonFormatter),
        "passthrough" => Arc::new(PassthroughFormatter),
        "null" => Arc::new(NullFormatter),
        _ => return None,
    };
    Some(formatter)
}

//! crates/logging/src/tracing_bridge.rs
//! Bridge from the `tracing` ecosystem into a [`Logger`].
//!
//! [`LoggerLayer`] is a `tracing-subscriber` layer that turns every event it
//! sees into a log call on the wrapped logger, so code instrumented with the
//! standard `tracing` macros reaches the same formatter and outputs as direct
//! log calls.
//!
//! # Mapping
//!
//! - `ERROR`, `WARN`, `INFO`, `DEBUG`, `TRACE` map to the level of the same name
//! - the `message` field becomes the first argument
//! - every other field is collected into one JSON object argument
//! - events whose target starts with `logging` are skipped, which keeps this
//!   crate's own diagnostics from looping back into the logger
//!
//! Threshold filtering is left to the logger, so the usual rules apply.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use logging::{init_tracing, LogLevel, Logger, LoggerOptions};
//!
//! let logger = Arc::new(Logger::with_options(
//!     &LoggerOptions::new().with_log_level(LogLevel::Info),
//! )?);
//! init_tracing(logger);
//!
//! tracing::info!(user = "alice", "signed in");
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use super::levels::LogLevel;
use super::logger::Logger;

/// A tracing layer that forwards events to a [`Logger`].
#[derive(Clone, Debug)]
pub struct LoggerLayer {
    logger: Arc<Logger>,
}

impl LoggerLayer {
    /// Create a layer writing to `logger`.
    #[must_use]
    pub const fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }

    /// Map a tracing level to the log level of the same name.
    const fn map_level(level: &Level) -> LogLevel {
        match *level {
            Level::ERROR => LogLevel::Error,
            Level::WARN => LogLevel::Warn,
            Level::INFO => LogLevel::Info,
            Level::DEBUG => LogLevel::Debug,
            Level::TRACE => LogLevel::Trace,
        }
    }

    fn is_own_target(target: &str) -> bool {
        target == "logging" || target.starts_with("logging::")
    }
}

impl<S> Layer<S> for LoggerLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if Self::is_own_target(metadata.target()) {
            return;
        }

        let level = Self::map_level(metadata.level());
        if !self.logger.is_enabled(level) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        // A layer has no caller to report to; output failures are dropped.
        let _ = self.logger.emit(level, visitor.into_args());
    }
}

/// Visitor collecting the message and the remaining fields of an event.
#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl FieldVisitor {
    fn into_args(self) -> Vec<Value> {
        let mut args = Vec::with_capacity(2);
        if let Some(message) = self.message {
            args.push(Value::String(message));
        }
        if !self.fields.is_empty() {
            args.push(Value::Object(self.fields));
        }
        args
    }

    fn insert(&mut self, field: &Field, value: Value) {
        if field.name() == "message" {
            self.message = Some(match value {
                Value::String(text) => text,
                other => other.to_string(),
            });
        } else {
            self.fields.insert(field.name().to_owned(), value);
        }
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, Value::String(format!("{value:?}")));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::from(value));
    }
}

/// Install [`LoggerLayer`] as the global tracing subscriber.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_tracing(logger: Arc<Logger>) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(LoggerLayer::new(logger))
        .init();
}

/// Install [`LoggerLayer`] behind an additional filter layer.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use logging::{init_tracing_with_filter, Logger};
/// use tracing_subscriber::EnvFilter;
///
/// init_tracing_with_filter(Arc::new(Logger::new()), EnvFilter::from_default_env());
/// ```
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_tracing_with_filter<F>(logger: Arc<Logger>, filter: F)
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(filter)
        .with(LoggerLayer::new(logger))
        .init();
}

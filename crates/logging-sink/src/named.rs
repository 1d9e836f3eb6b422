//! crates/logging-sink/src/named.rs
//! Console routing and output lookup by configuration name.

use std::sync::Arc;

use logging::{LogLevel, LoggerError, LoggerOptions, Sink, Value, null_sink};

use crate::writer::WriterSink;

/// Levels written to standard error by [`console_outputs`].
const STDERR_LEVELS: [LogLevel; 3] = [LogLevel::Fatal, LogLevel::Error, LogLevel::Warn];

/// Resolves an output name used in configuration data.
///
/// | Name | Output |
/// |------|--------|
/// | `stdout`, `console` | standard output |
/// | `stderr` | standard error |
/// | `null` | discards everything |
///
/// Names are matched without regard to ASCII case.
#[must_use]
pub fn sink_by_name(name: &str) -> Option<Arc<dyn Sink>> {
    let sink: Arc<dyn Sink> = match name.to_ascii_lowercase().as_str() {
        "stdout" | "console" => Arc::new(WriterSink::stdout()),
        "stderr" => Arc::new(WriterSink::stderr()),
        "null" => null_sink(),
        _ => {
            tracing::debug!(target: "logging::sink", name, "unknown output name");
            return None;
        }
    };
    Some(sink)
}

/// Per-level console bindings: `FATAL`, `ERROR` and `WARN` go to standard
/// error, every other level to standard output.
///
/// The returned list binds `DEFAULT` as well, so levels without their own
/// entry still reach standard output.
#[must_use]
pub fn console_outputs() -> Vec<(LogLevel, Arc<dyn Sink>)> {
    let stdout: Arc<dyn Sink> = Arc::new(WriterSink::stdout());
    let stderr: Arc<dyn Sink> = Arc::new(WriterSink::stderr());

    LogLevel::ALL
        .into_iter()
        .filter(|level| *level != LogLevel::Off)
        .map(|level| {
            let output = if STDERR_LEVELS.contains(&level) {
                Arc::clone(&stderr)
            } else {
                Arc::clone(&stdout)
            };
            (level, output)
        })
        .collect()
}

/// Configuration update binding every level to the console.
#[must_use]
pub fn console_options() -> LoggerOptions {
    LoggerOptions {
        outputs: console_outputs(),
        ..LoggerOptions::default()
    }
}

/// Decodes configuration data, resolving output names with [`sink_by_name`].
pub fn options_from_value(value: &Value) -> Result<LoggerOptions, LoggerError> {
    LoggerOptions::from_value_with(value, sink_by_name)
}

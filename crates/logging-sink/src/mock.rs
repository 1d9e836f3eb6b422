//! crates/logging-sink/src/mock.rs
//! Test doubles: a capturing output, a failing output and a failing
//! formatter.

use std::fmt;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use logging::{BoxError, Formatter, LogLevel, LogRecord, LoggerOptions, Payload, Sink};

/// Captures every payload together with the level it was bound to.
///
/// One buffer serves all levels: [`sink_for`](Self::sink_for) hands out an
/// output tagged with a level, and the query methods filter by that tag.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use logging::{log_args, LogLevel, Logger};
/// use logging_sink::BufferSink;
///
/// let buffer = Arc::new(BufferSink::new());
/// let logger = Logger::with_options(&buffer.options().with_log_level(LogLevel::Info)).unwrap();
///
/// logger.warn(log_args!["careful"]).unwrap();
/// logger.debug(log_args!["hidden"]).unwrap();
///
/// assert_eq!(buffer.message_count(LogLevel::Warn), 1);
/// assert_eq!(buffer.total_message_count(), 1);
/// ```
#[derive(Default)]
pub struct BufferSink {
    entries: Mutex<Vec<(LogLevel, Payload)>>,
}

impl BufferSink {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, Vec<(LogLevel, Payload)>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records `payload` under `level`.
    pub fn record(&self, level: LogLevel, payload: Payload) {
        self.entries().push((level, payload));
    }

    /// Output that records into this buffer under `level`.
    #[must_use]
    pub fn sink_for(self: &Arc<Self>, level: LogLevel) -> Arc<dyn Sink> {
        Arc::new(LevelCapture {
            buffer: Arc::clone(self),
            level,
        })
    }

    /// Bindings for every level except `OFF`, each tagged with its own level.
    #[must_use]
    pub fn outputs(self: &Arc<Self>) -> Vec<(LogLevel, Arc<dyn Sink>)> {
        LogLevel::ALL
            .into_iter()
            .filter(|level| *level != LogLevel::Off)
            .map(|level| (level, self.sink_for(level)))
            .collect()
    }

    /// Configuration update routing every level into this buffer.
    #[must_use]
    pub fn options(self: &Arc<Self>) -> LoggerOptions {
        LoggerOptions {
            outputs: self.outputs(),
            ..LoggerOptions::default()
        }
    }

    /// Payloads captured under `level`, oldest first.
    #[must_use]
    pub fn messages(&self, level: LogLevel) -> Vec<Payload> {
        self.entries()
            .iter()
            .filter(|(tag, _)| *tag == level)
            .map(|(_, payload)| payload.clone())
            .collect()
    }

    /// Text renderings of the payloads captured under `level`.
    #[must_use]
    pub fn lines(&self, level: LogLevel) -> Vec<String> {
        self.messages(level).iter().map(ToString::to_string).collect()
    }

    /// Most recent payload captured under `level`.
    #[must_use]
    pub fn last_message(&self, level: LogLevel) -> Option<Payload> {
        self.entries()
            .iter()
            .rev()
            .find(|(tag, _)| *tag == level)
            .map(|(_, payload)| payload.clone())
    }

    /// Number of payloads captured under `level`.
    #[must_use]
    pub fn message_count(&self, level: LogLevel) -> usize {
        self.entries().iter().filter(|(tag, _)| *tag == level).count()
    }

    /// Number of payloads captured under any level.
    #[must_use]
    pub fn total_message_count(&self) -> usize {
        self.entries().len()
    }

    /// Reports whether anything was captured under `level`.
    #[must_use]
    pub fn has_messages(&self, level: LogLevel) -> bool {
        self.entries().iter().any(|(tag, _)| *tag == level)
    }

    /// Reports whether anything was captured at all.
    #[must_use]
    pub fn has_any_messages(&self) -> bool {
        !self.entries().is_empty()
    }

    /// Drops the payloads captured under `level`.
    pub fn clear(&self, level: LogLevel) {
        self.entries().retain(|(tag, _)| *tag != level);
    }

    /// Drops every captured payload.
    pub fn clear_all(&self) {
        self.entries().clear();
    }
}

impl fmt::Debug for BufferSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferSink")
            .field("captured", &self.total_message_count())
            .finish()
    }
}

struct LevelCapture {
    buffer: Arc<BufferSink>,
    level: LogLevel,
}

impl Sink for LevelCapture {
    fn write(&self, payload: &Payload) -> Result<(), BoxError> {
        self.buffer.record(self.level, payload.clone());
        Ok(())
    }
}

/// Output that fails every write with a fixed message.
#[derive(Clone, Debug)]
pub struct FailingSink {
    message: String,
}

impl FailingSink {
    /// Creates an output failing with `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Shared handle, ready to bind to a level.
    #[must_use]
    pub fn shared(message: impl Into<String>) -> Arc<dyn Sink> {
        Arc::new(Self::new(message))
    }
}

impl Sink for FailingSink {
    fn write(&self, _payload: &Payload) -> Result<(), BoxError> {
        Err(io::Error::other(self.message.clone()).into())
    }
}

#[derive(Debug, Default)]
struct FormatterCalls {
    count: usize,
    last: Option<LogRecord>,
}

/// Formatter that records each call and then fails.
#[derive(Debug)]
pub struct FailingFormatter {
    message: Mutex<String>,
    calls: Mutex<FormatterCalls>,
}

impl FailingFormatter {
    /// Creates a formatter failing with `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Mutex::new(message.into()),
            calls: Mutex::new(FormatterCalls::default()),
        }
    }

    fn calls(&self) -> MutexGuard<'_, FormatterCalls> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the failure message for subsequent calls.
    pub fn set_error_message(&self, message: impl Into<String>) {
        *self.message.lock().unwrap_or_else(PoisonError::into_inner) = message.into();
    }

    /// Current failure message.
    #[must_use]
    pub fn error_message(&self) -> String {
        self.message
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of records the formatter was asked to render.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls().count
    }

    /// The record of the most recent call.
    #[must_use]
    pub fn last_record(&self) -> Option<LogRecord> {
        self.calls().last.clone()
    }

    /// Clears the call statistics.
    pub fn reset(&self) {
        *self.calls() = FormatterCalls::default();
    }
}

impl Formatter for FailingFormatter {
    fn format(&self, record: &LogRecord) -> Result<Payload, BoxError> {
        {
            let mut calls = self.calls();
            calls.count += 1;
            calls.last = Some(record.clone());
        }
        Err(io::Error::other(self.error_message()).into())
    }
}

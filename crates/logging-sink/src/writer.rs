//! crates/logging-sink/src/writer.rs
//! Output backed by any [`io::Write`] implementor.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use logging::{BoxError, Payload, Sink};

/// Writes each payload's text rendering to an [`io::Write`] target.
///
/// The writer sits behind a mutex so one sink can be bound to several levels
/// and shared across threads. Each payload is rendered first and written with
/// a single `write_all`, so concurrent payloads never interleave within a
/// line.
///
/// # Examples
///
/// ```
/// use logging::{Payload, Sink};
/// use logging_sink::WriterSink;
///
/// let sink = WriterSink::new(Vec::new());
/// sink.write(&Payload::from("first")).unwrap();
/// sink.write_payload(&Payload::from("second"), false).unwrap();
///
/// assert_eq!(sink.into_inner(), b"first\nsecond".to_vec());
/// ```
pub struct WriterSink<W> {
    writer: Mutex<W>,
    newline: bool,
}

impl<W> WriterSink<W> {
    /// Creates a sink that terminates every payload with a newline.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            newline: true,
        }
    }

    /// Creates a sink that writes payloads back to back.
    ///
    /// Useful when the formatter already supplies its own terminator.
    #[must_use]
    pub const fn without_newline(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            newline: false,
        }
    }

    /// Reports whether [`Sink::write`] terminates payloads with a newline.
    #[must_use]
    pub const fn appends_newline(&self) -> bool {
        self.newline
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W> WriterSink<W>
where
    W: Write,
{
    /// Writes `payload`, appending a newline when `newline` is set and
    /// ignoring the sink's own setting.
    pub fn write_payload(&self, payload: &Payload, newline: bool) -> io::Result<()> {
        let mut rendered = payload.to_string();
        if newline {
            rendered.push('\n');
        }

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(rendered.as_bytes())
    }

    /// Flushes the underlying writer.
    pub fn flush(&self) -> io::Result<()> {
        self.writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()
    }
}

impl WriterSink<io::Stdout> {
    /// Sink writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl WriterSink<io::Stderr> {
    /// Sink writing to standard error.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W> Sink for WriterSink<W>
where
    W: Write + Send,
{
    fn write(&self, payload: &Payload) -> Result<(), BoxError> {
        self.write_payload(payload, self.newline)?;
        Ok(())
    }
}

impl<W> fmt::Debug for WriterSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterSink")
            .field("newline", &self.newline)
            .finish_non_exhaustive()
    }
}

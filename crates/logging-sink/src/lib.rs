#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` provides concrete outputs for the `logging` façade. The
//! façade only knows the [`Sink`](logging::Sink) capability; this crate
//! supplies the implementations that actually move bytes, plus the doubles
//! used to observe a logger in tests.
//!
//! # Design
//!
//! - [`WriterSink`] wraps any [`std::io::Write`] implementor behind a mutex
//!   and writes each payload's text rendering, newline terminated unless
//!   built with [`WriterSink::without_newline`].
//! - [`console_outputs`] binds every level to the console, sending `FATAL`,
//!   `ERROR` and `WARN` to standard error and the rest to standard output.
//! - [`sink_by_name`] maps configuration names (`stdout`, `stderr`,
//!   `console`, `null`) to outputs; [`options_from_value`] plugs it into
//!   [`LoggerOptions::from_value_with`](logging::LoggerOptions::from_value_with).
//! - [`BufferSink`], [`FailingSink`] and [`FailingFormatter`] are test
//!   doubles.
//!
//! # Errors
//!
//! Writer failures are returned as boxed [`std::io::Error`] values, which the
//! logger surfaces to the emitting caller as
//! [`LoggerError::Output`](logging::LoggerError::Output).
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use logging::{log_args, LogLevel, Logger, LoggerOptions};
//! use logging_sink::WriterSink;
//!
//! let sink = Arc::new(WriterSink::new(Vec::new()));
//! let logger = Logger::with_options(
//!     &LoggerOptions::new()
//!         .with_log_level(LogLevel::Info)
//!         .with_default_output(sink.clone()),
//! )
//! .unwrap();
//!
//! logger.info(log_args!["2025-01-01T00:00:00Z", "ready"]).unwrap();
//! drop(logger);
//!
//! let sink = Arc::try_unwrap(sink).unwrap();
//! assert_eq!(sink.into_inner(), b"2025-01-01T00:00:00Z [INFO] ready\n".to_vec());
//! ```

mod mock;
mod named;
mod writer;

pub use mock::{BufferSink, FailingFormatter, FailingSink};
pub use named::{console_options, console_outputs, options_from_value, sink_by_name};
pub use writer::WriterSink;

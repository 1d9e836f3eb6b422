#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` is a level-filtered logging façade. Application code calls one
//! of the level methods on a [`Logger`] with a heterogeneous argument list;
//! the logger decides whether the call passes its filter, turns the arguments
//! into a [`LogRecord`], renders it with the active [`Formatter`] and hands
//! the result to the [`Sink`] bound to that level. Formatters and sinks are
//! capabilities supplied by the caller, so the crate itself performs no I/O.
//!
//! # Design
//!
//! - [`LogLevel`] is the level table: seven standard levels ordered by
//!   severity (`OFF` through `TRACE`) and three special levels. `LOG` bypasses
//!   the threshold, `VERBOSE` follows a separate flag and `DEFAULT` is the
//!   fallback output slot.
//! - [`parse_args`] builds records. Leading primitives form the message, the
//!   first structured argument starts the argument list, and a leading
//!   ISO-8601 timestamp string replaces the record's capture time.
//! - [`DispatchTable`] maps every level to an output. Unmapped levels read as
//!   a no-op output; emission falls back to the `DEFAULT` mapping.
//! - [`Logger`] holds threshold, verbose flag, formatter and table as one
//!   immutable snapshot. Updates swap the snapshot wholesale.
//! - [`LoggerRegistry`] owns at most one shared logger; the
//!   [`thread_local`] helpers keep one registry per thread.
//!
//! # Invariants
//!
//! - The threshold is always a standard level. Special levels are rejected
//!   and the previous threshold is kept.
//! - A failed [`Logger::configure`] changes nothing.
//! - Each emission observes a single configuration snapshot taken when the
//!   call starts.
//! - [`DispatchTable::get`] never fails; a missing mapping is a no-op output.
//!
//! # Errors
//!
//! Fallible operations return [`LoggerError`]. Validation failures are
//! reported synchronously and never logged. Errors raised by a formatter or a
//! sink reach the emitting caller unchanged as [`LoggerError::Format`] and
//! [`LoggerError::Output`].
//!
//! # Examples
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use logging::{log_args, sink_fn, LogLevel, LoggerOptions, LoggerRegistry, Payload};
//!
//! let lines = Arc::new(Mutex::new(Vec::new()));
//! let captured = Arc::clone(&lines);
//!
//! let mut registry = LoggerRegistry::new();
//! let logger = registry
//!     .create(
//!         &LoggerOptions::new()
//!             .with_log_level(LogLevel::Info)
//!             .with_default_output(sink_fn(move |payload: &Payload| {
//!                 captured.lock().unwrap().push(payload.to_string());
//!             })),
//!     )
//!     .unwrap();
//!
//! logger.info(log_args!["2025-07-22T02:45:00Z", "started", 3, "workers"]).unwrap();
//! logger.debug(log_args!["suppressed"]).unwrap();
//!
//! let lines = lines.lock().unwrap();
//! assert_eq!(lines.as_slice(), ["2025-07-22T02:45:00Z [INFO] started 3 workers"]);
//! ```
//!
//! # See also
//!
//! - `logging-sink` for writer-backed and console outputs and test doubles.

mod config;
mod dispatch;
mod error;
mod formatter;
mod levels;
mod logger;
mod macros;
mod output;
mod parser;
mod record;
mod registry;
pub mod thread_local;
mod timestamp;

#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use config::LoggerOptions;
pub use dispatch::DispatchTable;
pub use error::{BoxError, LevelError, LoggerError};
pub use formatter::{
    Formatter, JsonFormatter, NullFormatter, PassthroughFormatter, PlainFormatter,
    formatter_by_name, formatter_fn,
};
pub use levels::{LEVEL_COUNT, LogLevel};
pub use logger::Logger;
pub use output::{NullSink, Sink, null_sink, sink_fn};
pub use parser::{is_primitive, parse_args, parse_args_at};
pub use record::{LogRecord, Payload};
pub use registry::LoggerRegistry;
pub use serde_json::Value;
pub use thread_local::{create_logger, get_logger, reset_logger, with_registry};
pub use timestamp::parse_timestamp;

#[cfg(feature = "tracing")]
pub use tracing_bridge::{LoggerLayer, init_tracing, init_tracing_with_filter};

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! src/lib.rs
//!
//! # Overview
//!
//! `levelgate` bundles the `logging` façade with the outputs from
//! `logging-sink` behind a single dependency. Everything the façade exports is
//! available at the crate root; concrete outputs and test doubles live under
//! [`sink`].
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use levelgate::sink::BufferSink;
//! use levelgate::{log_args, LogLevel, LoggerRegistry};
//!
//! let buffer = Arc::new(BufferSink::new());
//! let mut registry = LoggerRegistry::new();
//! let logger = registry
//!     .create(&buffer.options().with_log_level(LogLevel::Warn))
//!     .unwrap();
//!
//! logger.error(log_args!["disk", "full"]).unwrap();
//! logger.info(log_args!["ignored"]).unwrap();
//!
//! assert_eq!(buffer.message_count(LogLevel::Error), 1);
//! assert!(!buffer.has_messages(LogLevel::Info));
//! ```

pub use logging::*;

/// Concrete outputs, console routing and test doubles.
pub mod sink {
    pub use logging_sink::*;
}

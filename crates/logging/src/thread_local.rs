//! crates/logging/src/thread_local.rs
//! Per-thread registry and convenience accessors.

use super::config::LoggerOptions;
use super::error::LoggerError;
use super::logger::Logger;
use super::registry::LoggerRegistry;
use std::cell::RefCell;
use std::sync::Arc;

thread_local! {
    static REGISTRY: RefCell<LoggerRegistry> = const { RefCell::new(LoggerRegistry::new()) };
}

/// Run `f` with exclusive access to the current thread's registry.
pub fn with_registry<R>(f: impl FnOnce(&mut LoggerRegistry) -> R) -> R {
    REGISTRY.with(|registry| f(&mut registry.borrow_mut()))
}

/// Create the current thread's logger.
pub fn create_logger(options: &LoggerOptions) -> Result<Arc<Logger>, LoggerError> {
    with_registry(|registry| registry.create(options))
}

/// Fetch the current thread's logger.
pub fn get_logger() -> Result<Arc<Logger>, LoggerError> {
    REGISTRY.with(|registry| registry.borrow().get())
}

/// Discard the current thread's logger, if any.
pub fn reset_logger() {
    with_registry(LoggerRegistry::reset);
}

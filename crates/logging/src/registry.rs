//! crates/logging/src/registry.rs
//! Lifecycle owner for the single shared logger.
//!
//! The registry is either empty or holds exactly one [`Logger`]. It performs
//! no locking of its own: whoever owns the registry serializes `create`,
//! `reset` and configuration calls. The [`thread_local`](crate::thread_local)
//! helpers give each thread its own registry for that reason.

use std::sync::Arc;

use crate::config::LoggerOptions;
use crate::error::LoggerError;
use crate::levels::LogLevel;
use crate::logger::Logger;
use crate::output::Sink;

/// Holder of at most one shared logger.
#[derive(Debug, Default)]
pub struct LoggerRegistry {
    instance: Option<Arc<Logger>>,
}

impl LoggerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self { instance: None }
    }

    /// Builds the logger from `options` and registers it.
    ///
    /// Fails with [`LoggerError::AlreadyCreated`] while a logger is
    /// registered, and with the validation error of `options` otherwise; in
    /// both cases the registry is left as it was.
    pub fn create(&mut self, options: &LoggerOptions) -> Result<Arc<Logger>, LoggerError> {
        if self.instance.is_some() {
            return Err(LoggerError::AlreadyCreated);
        }

        let logger = Arc::new(Logger::with_options(options)?);
        self.instance = Some(Arc::clone(&logger));
        tracing::debug!(target: "logging::registry", "logger created");
        Ok(logger)
    }

    /// Registers a logger built elsewhere.
    pub fn install(&mut self, logger: Arc<Logger>) -> Result<(), LoggerError> {
        if self.instance.is_some() {
            return Err(LoggerError::AlreadyCreated);
        }

        self.instance = Some(logger);
        tracing::debug!(target: "logging::registry", "logger installed");
        Ok(())
    }

    /// Returns the registered logger.
    pub fn get(&self) -> Result<Arc<Logger>, LoggerError> {
        self.instance.clone().ok_or(LoggerError::NotCreated)
    }

    /// Reports whether a logger is registered.
    #[must_use]
    pub const fn is_created(&self) -> bool {
        self.instance.is_some()
    }

    /// Drops the registered logger, if any. Calling it on an empty registry
    /// is a no-op.
    ///
    /// Handles obtained earlier keep working; they are simply no longer
    /// reachable through the registry.
    pub fn reset(&mut self) {
        if self.instance.take().is_some() {
            tracing::debug!(target: "logging::registry", "logger reset");
        }
    }

    /// Applies a partial update to the registered logger.
    pub fn configure(&self, options: &LoggerOptions) -> Result<(), LoggerError> {
        self.get()?.configure(options)
    }

    /// Binds `level` to `output` on the registered logger.
    pub fn bind_output(&self, level: LogLevel, output: Arc<dyn Sink>) -> Result<(), LoggerError> {
        self.get()?.set_output(level, output);
        Ok(())
    }

    /// Binds several levels at once on the registered logger.
    pub fn update_outputs<I>(&self, outputs: I) -> Result<(), LoggerError>
    where
        I: IntoIterator<Item = (LogLevel, Arc<dyn Sink>)>,
    {
        let logger = self.get()?;
        let options = LoggerOptions {
            outputs: outputs.into_iter().collect(),
            ..LoggerOptions::default()
        };
        logger.configure(&options)
    }

    /// Silences `level` on the registered logger.
    pub fn remove_output(&self, level: LogLevel) -> Result<(), LoggerError> {
        self.get()?.remove_output(level);
        Ok(())
    }
}

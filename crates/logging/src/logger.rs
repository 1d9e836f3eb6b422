//! crates/logging/src/logger.rs
//! The logger: filtering, formatting and dispatch over a configuration
//! snapshot.
//!
//! Configuration lives behind a lock as an immutable `LoggerState`. Every
//! mutation validates its input, builds a new state and swaps it in, so a
//! failed update never leaves a partial change behind. Every emission clones
//! the current state handle once and releases the lock before formatting and
//! writing, so it observes one consistent configuration even while another
//! thread reconfigures the logger.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;

use crate::config::LoggerOptions;
use crate::dispatch::DispatchTable;
use crate::error::LoggerError;
use crate::formatter::{Formatter, PlainFormatter};
use crate::levels::LogLevel;
use crate::output::Sink;
use crate::parser::parse_args;

#[derive(Clone)]
struct LoggerState {
    threshold: LogLevel,
    verbose: bool,
    formatter: Arc<dyn Formatter>,
    outputs: DispatchTable,
}

impl Default for LoggerState {
    fn default() -> Self {
        Self {
            threshold: LogLevel::Off,
            verbose: false,
            formatter: Arc::new(PlainFormatter),
            outputs: DispatchTable::new(),
        }
    }
}

impl LoggerState {
    fn is_enabled(&self, level: LogLevel) -> bool {
        match level {
            LogLevel::Log => true,
            LogLevel::Verbose => self.verbose,
            LogLevel::Off | LogLevel::Default => false,
            standard => {
                self.threshold != LogLevel::Off && standard.rank() <= self.threshold.rank()
            }
        }
    }

    fn apply(&mut self, options: &LoggerOptions) {
        if let Some(level) = options.log_level {
            self.threshold = level;
        }
        if let Some(verbose) = options.verbose {
            self.verbose = verbose;
        }
        if let Some(formatter) = &options.formatter {
            self.formatter = Arc::clone(formatter);
        }
        if let Some(output) = &options.default_output {
            self.outputs.reset_to_default(Arc::clone(output));
        }
        self.outputs.extend(
            options
                .outputs
                .iter()
                .map(|(level, output)| (*level, Arc::clone(output))),
        );
    }
}

/// Level-filtered logger with a pluggable formatter and per-level outputs.
///
/// A new logger is silent: threshold `OFF`, verbose off, plain formatter and
/// no-op outputs.
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use logging::{log_args, sink_fn, LogLevel, Logger, LoggerOptions, Payload};
///
/// let lines = Arc::new(Mutex::new(Vec::new()));
/// let captured = Arc::clone(&lines);
/// let logger = Logger::with_options(
///     &LoggerOptions::new()
///         .with_log_level(LogLevel::Warn)
///         .with_default_output(sink_fn(move |payload: &Payload| {
///             captured.lock().unwrap().push(payload.to_string());
///         })),
/// )
/// .unwrap();
///
/// logger.error(log_args!["disk", 97, "% full"]).unwrap();
/// logger.info(log_args!["not shown"]).unwrap();
///
/// let lines = lines.lock().unwrap();
/// assert_eq!(lines.len(), 1);
/// assert!(lines[0].ends_with("[ERROR] disk 97 % full"));
/// ```
pub struct Logger {
    state: RwLock<Arc<LoggerState>>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Creates a logger with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(Arc::new(LoggerState::default())),
        }
    }

    /// Creates a logger and applies `options` on top of the defaults.
    pub fn with_options(options: &LoggerOptions) -> Result<Self, LoggerError> {
        let logger = Self::new();
        logger.configure(options)?;
        Ok(logger)
    }

    fn snapshot(&self) -> Arc<LoggerState> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn update<F>(&self, mutate: F)
    where
        F: FnOnce(&mut LoggerState),
    {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = LoggerState::clone(&guard);
        mutate(&mut next);
        *guard = Arc::new(next);
    }

    /// Current threshold.
    #[must_use]
    pub fn threshold(&self) -> LogLevel {
        self.snapshot().threshold
    }

    /// Sets the threshold. Special levels are rejected and leave the
    /// threshold unchanged.
    pub fn set_threshold(&self, level: LogLevel) -> Result<(), LoggerError> {
        let level = level.validate_threshold()?;
        self.update(|state| state.threshold = level);
        Ok(())
    }

    /// Current state of the verbose flag.
    #[must_use]
    pub fn is_verbose(&self) -> bool {
        self.snapshot().verbose
    }

    /// Turns `VERBOSE` emission on or off.
    pub fn set_verbose(&self, verbose: bool) {
        self.update(|state| state.verbose = verbose);
    }

    /// Active formatter.
    #[must_use]
    pub fn formatter(&self) -> Arc<dyn Formatter> {
        Arc::clone(&self.snapshot().formatter)
    }

    /// Replaces the formatter.
    pub fn set_formatter(&self, formatter: Arc<dyn Formatter>) {
        self.update(|state| state.formatter = formatter);
    }

    /// Output bound to `level`, or a no-op output when unmapped.
    #[must_use]
    pub fn output(&self, level: LogLevel) -> Arc<dyn Sink> {
        self.snapshot().outputs.get(level)
    }

    /// Output an emission at `level` reaches, after `DEFAULT` fallback.
    #[must_use]
    pub fn resolved_output(&self, level: LogLevel) -> Arc<dyn Sink> {
        self.snapshot().outputs.resolve(level)
    }

    /// Binds `level` to `output`.
    pub fn set_output(&self, level: LogLevel, output: Arc<dyn Sink>) {
        self.update(|state| state.outputs.set(level, output));
    }

    /// Silences `level`. The level no longer falls back to `DEFAULT`.
    pub fn remove_output(&self, level: LogLevel) {
        self.update(|state| state.outputs.remove(level));
    }

    /// Applies a partial update atomically.
    ///
    /// Every present field is validated before anything changes; on failure
    /// the previous configuration stays in place and the first failure is
    /// returned.
    pub fn configure(&self, options: &LoggerOptions) -> Result<(), LoggerError> {
        if let Err(error) = options.validate() {
            tracing::debug!(target: "logging::config", %error, "rejected logger configuration");
            return Err(error);
        }
        self.update(|state| state.apply(options));
        tracing::trace!(target: "logging::config", ?options, "applied logger configuration");
        Ok(())
    }

    /// Reports whether a call at `level` would reach an output.
    #[must_use]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.snapshot().is_enabled(level)
    }

    /// Emits `args` at `level` if the level is enabled.
    ///
    /// Arguments are only collected once the level has passed the filter.
    /// Formatter and output failures are returned to the caller unchanged.
    pub fn emit<I, A>(&self, level: LogLevel, args: I) -> Result<(), LoggerError>
    where
        I: IntoIterator<Item = A>,
        A: Into<Value>,
    {
        let state = self.snapshot();
        if !state.is_enabled(level) {
            return Ok(());
        }

        let record = parse_args(level, args.into_iter().map(Into::into));
        let payload = state.formatter.format(&record).map_err(LoggerError::Format)?;
        state
            .outputs
            .resolve(level)
            .write(&payload)
            .map_err(LoggerError::Output)
    }

    /// Emits at a raw numeric level, validating it first.
    ///
    /// An unknown value fails with [`LoggerError::InvalidLevel`] before any
    /// record is built.
    pub fn emit_raw<I, A>(&self, level: i32, args: I) -> Result<(), LoggerError>
    where
        I: IntoIterator<Item = A>,
        A: Into<Value>,
    {
        let level = LogLevel::from_value(level)?;
        self.emit(level, args)
    }

    /// Emits at `FATAL`.
    pub fn fatal<I, A>(&self, args: I) -> Result<(), LoggerError>
    where
        I: IntoIterator<Item = A>,
        A: Into<Value>,
    {
        self.emit(LogLevel::Fatal, args)
    }

    /// Emits at `ERROR`.
    pub fn error<I, A>(&self, args: I) -> Result<(), LoggerError>
    where
        I: IntoIterator<Item = A>,
        A: Into<Value>,
    {
        self.emit(LogLevel::Error, args)
    }

    /// Emits at `WARN`.
    pub fn warn<I, A>(&self, args: I) -> Result<(), LoggerError>
    where
        I: IntoIterator<Item = A>,
        A: Into<Value>,
    {
        self.emit(LogLevel::Warn, args)
    }

    /// Emits at `INFO`.
    pub fn info<I, A>(&self, args: I) -> Result<(), LoggerError>
    where
        I: IntoIterator<Item = A>,
        A: Into<Value>,
    {
        self.emit(LogLevel::Info, args)
    }

    /// Emits at `DEBUG`.
    pub fn debug<I, A>(&self, args: I) -> Result<(), LoggerError>
    where
        I: IntoIterator<Item = A>,
        A: Into<Value>,
    {
        self.emit(LogLevel::Debug, args)
    }

    /// Emits at `TRACE`.
    pub fn trace<I, A>(&self, args: I) -> Result<(), LoggerError>
    where
        I: IntoIterator<Item = A>,
        A: Into<Value>,
    {
        self.emit(LogLevel::Trace, args)
    }

    /// Emits at `LOG`, bypassing the threshold.
    pub fn log<I, A>(&self, args: I) -> Result<(), LoggerError>
    where
        I: IntoIterator<Item = A>,
        A: Into<Value>,
    {
        self.emit(LogLevel::Log, args)
    }

    /// Emits at `VERBOSE` when the verbose flag is set.
    pub fn verbose<I, A>(&self, args: I) -> Result<(), LoggerError>
    where
        I: IntoIterator<Item = A>,
        A: Into<Value>,
    {
        self.emit(LogLevel::Verbose, args)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.snapshot();
        f.debug_struct("Logger")
            .field("threshold", &state.threshold)
            .field("verbose", &state.verbose)
            .field("outputs", &state.outputs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BoxError, LevelError};
    use crate::output::sink_fn;
    use crate::record::{LogRecord, Payload};
    use serde_json::json;
    use std::sync::Mutex;

    type Captured = Arc<Mutex<Vec<Payload>>>;

    fn capture() -> (Captured, Arc<dyn Sink>) {
        let seen: Captured = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = Arc::clone(&seen);
        let sink = sink_fn(move |payload: &Payload| {
            sink_seen.lock().expect("lock").push(payload.clone());
        });
        (seen, sink)
    }

    fn passthrough_logger(threshold: LogLevel) -> (Logger, Captured) {
        let (seen, sink) = capture();
        let logger = Logger::with_options(
            &LoggerOptions::new()
                .with_log_level(threshold)
                .with_formatter(Arc::new(crate::formatter::PassthroughFormatter))
                .with_default_output(sink),
        )
        .expect("valid options");
        (logger, seen)
    }

    fn records(seen: &Captured) -> Vec<LogRecord> {
        seen.lock()
            .expect("lock")
            .iter()
            .filter_map(|payload| payload.as_record().cloned())
            .collect()
    }

    mod defaults_tests {
        use super::*;

        #[test]
        fn new_logger_is_silent() {
            let logger = Logger::new();
            assert_eq!(logger.threshold(), LogLevel::Off);
            assert!(!logger.is_verbose());
            for level in LogLevel::ALL {
                if level != LogLevel::Log {
                    assert!(!logger.is_enabled(level), "{level}");
                }
            }
        }

        #[test]
        fn default_formatter_is_plain() {
            let (seen, sink) = capture();
            let logger = Logger::new();
            logger.set_output(LogLevel::Log, sink);
            logger.log(["hello"]).expect("emit");
            let text = seen.lock().expect("lock")[0].to_string();
            assert!(text.ends_with(" [LOG] hello"), "{text}");
        }
    }

    mod filtering_tests {
        use super::*;

        #[test]
        fn threshold_is_a_minimum_severity() {
            let (logger, seen) = passthrough_logger(LogLevel::Warn);
            logger.fatal(["f"]).expect("emit");
            logger.error(["e"]).expect("emit");
            logger.warn(["w"]).expect("emit");
            logger.info(["i"]).expect("emit");
            logger.debug(["d"]).expect("emit");
            logger.trace(["t"]).expect("emit");

            let messages: Vec<String> = records(&seen)
                .iter()
                .map(|record| record.message().to_owned())
                .collect();
            assert_eq!(messages, vec!["f", "e", "w"]);
        }

        #[test]
        fn off_suppresses_everything_but_log() {
            let (logger, seen) = passthrough_logger(LogLevel::Off);
            logger.fatal(["f"]).expect("emit");
            logger.log(["always"]).expect("emit");
            let captured = records(&seen);
            assert_eq!(captured.len(), 1);
            assert_eq!(captured[0].level(), LogLevel::Log);
        }

        #[test]
        fn verbose_follows_flag_not_threshold() {
            let (logger, seen) = passthrough_logger(LogLevel::Trace);
            logger.verbose(["hidden"]).expect("emit");
            assert!(records(&seen).is_empty());

            logger.set_verbose(true);
            logger.set_threshold(LogLevel::Off).expect("standard");
            logger.verbose(["shown"]).expect("emit");
            assert_eq!(records(&seen).len(), 1);
        }

        #[test]
        fn off_and_default_are_never_emitted() {
            let (logger, seen) = passthrough_logger(LogLevel::Trace);
            logger.emit(LogLevel::Off, ["x"]).expect("emit");
            logger.emit(LogLevel::Default, ["x"]).expect("emit");
            assert!(records(&seen).is_empty());
        }

        #[test]
        fn suppressed_calls_do_not_consume_arguments() {
            let logger = Logger::new();
            let args = std::iter::from_fn(|| -> Option<Value> {
                panic!("arguments must not be collected")
            });
            logger.info(args).expect("suppressed");
        }
    }

    mod configuration_tests {
        use super::*;

        #[test]
        fn special_threshold_is_rejected_without_change() {
            let logger = Logger::new();
            logger.set_threshold(LogLevel::Info).expect("standard");
            for special in [LogLevel::Verbose, LogLevel::Log, LogLevel::Default] {
                let error = logger.set_threshold(special).expect_err("special");
                assert!(matches!(
                    error,
                    LoggerError::InvalidLevel(LevelError::SpecialLevel(level)) if level == special
                ));
                assert_eq!(logger.threshold(), LogLevel::Info);
            }
        }

        #[test]
        fn failed_configure_is_all_or_nothing() {
            let logger = Logger::new();
            logger.set_threshold(LogLevel::Error).expect("standard");
            let (_, sink) = capture();

            let error = logger
                .configure(
                    &LoggerOptions::new()
                        .with_verbose(true)
                        .with_output(LogLevel::Info, Arc::clone(&sink))
                        .with_log_level(LogLevel::Log),
                )
                .expect_err("special threshold");
            assert!(error.is_invalid_level());

            assert_eq!(logger.threshold(), LogLevel::Error);
            assert!(!logger.is_verbose());
            assert!(!Arc::ptr_eq(&logger.output(LogLevel::Info), &sink));
        }

        #[test]
        fn configure_merges_present_fields_only() {
            let logger = Logger::new();
            logger.set_verbose(true);
            logger
                .configure(&LoggerOptions::new().with_log_level(LogLevel::Debug))
                .expect("valid");
            assert_eq!(logger.threshold(), LogLevel::Debug);
            assert!(logger.is_verbose());
        }

        #[test]
        fn default_output_reseeds_table_before_specific_outputs() {
            let logger = Logger::new();
            let (_, old) = capture();
            let (_, fallback) = capture();
            let (_, specific) = capture();
            logger.set_output(LogLevel::Warn, Arc::clone(&old));

            logger
                .configure(
                    &LoggerOptions::new()
                        .with_default_output(Arc::clone(&fallback))
                        .with_output(LogLevel::Error, Arc::clone(&specific)),
                )
                .expect("valid");

            assert!(Arc::ptr_eq(&logger.resolved_output(LogLevel::Warn), &fallback));
            assert!(Arc::ptr_eq(&logger.resolved_output(LogLevel::Error), &specific));
        }

        #[test]
        fn set_output_then_output_returns_it() {
            let logger = Logger::new();
            let (_, sink) = capture();
            logger.set_output(LogLevel::Trace, Arc::clone(&sink));
            assert!(Arc::ptr_eq(&logger.output(LogLevel::Trace), &sink));
        }

        #[test]
        fn removed_output_silences_level() {
            let (logger, seen) = passthrough_logger(LogLevel::Info);
            logger.remove_output(LogLevel::Info);
            logger.info(["gone"]).expect("emit");
            logger.warn(["kept"]).expect("emit");
            let captured = records(&seen);
            assert_eq!(captured.len(), 1);
            assert_eq!(captured[0].message(), "kept");
        }

        #[test]
        fn formatter_can_be_swapped() {
            let logger = Logger::new();
            let formatter: Arc<dyn Formatter> = Arc::new(crate::formatter::NullFormatter);
            logger.set_formatter(Arc::clone(&formatter));
            assert!(Arc::ptr_eq(&logger.formatter(), &formatter));
        }
    }

    mod failure_tests {
        use super::*;

        #[test]
        fn raw_level_is_validated_before_dispatch() {
            let (logger, seen) = passthrough_logger(LogLevel::Trace);
            let error = logger.emit_raw(42, ["x"]).expect_err("unknown level");
            assert!(error.is_invalid_level());
            assert!(seen.lock().expect("lock").is_empty());

            logger.emit_raw(4, ["ok"]).expect("INFO");
            assert_eq!(records(&seen).len(), 1);
        }

        #[test]
        fn formatter_error_propagates() {
            let (logger, seen) = passthrough_logger(LogLevel::Info);
            let failing =
                |_: &LogRecord| -> Result<Payload, BoxError> { Err("Formatter error".into()) };
            logger.set_formatter(Arc::new(failing));

            let error = logger.info(["x"]).expect_err("formatter fails");
            assert!(matches!(
                error,
                LoggerError::Format(ref source) if source.to_string() == "Formatter error"
            ));
            assert!(seen.lock().expect("lock").is_empty());
        }

        #[test]
        fn output_error_propagates() {
            let logger = Logger::new();
            logger.set_threshold(LogLevel::Info).expect("standard");
            let failing = |_: &Payload| -> Result<(), BoxError> { Err("Logger error".into()) };
            logger.set_output(LogLevel::Info, Arc::new(failing));

            let error = logger.info(["x"]).expect_err("output fails");
            assert!(matches!(
                error,
                LoggerError::Output(ref source) if source.to_string() == "Logger error"
            ));
        }
    }

    #[test]
    fn structured_arguments_reach_the_output() {
        let (logger, seen) = passthrough_logger(LogLevel::Debug);
        logger
            .debug([json!("user"), json!({"id": 1}), json!("after")])
            .expect("emit");
        let captured = records(&seen);
        assert_eq!(captured[0].message(), "user");
        assert_eq!(captured[0].args(), &[json!({"id": 1}), json!("after")]);
    }

    #[test]
    fn logger_is_shareable_across_threads() {
        let (logger, seen) = passthrough_logger(LogLevel::Info);
        let logger = Arc::new(logger);
        let handles: Vec<_> = (0..4)
            .map(|n| {
                let logger = Arc::clone(&logger);
                std::thread::spawn(move || logger.info([json!("worker"), json!(n)]))
            })
            .collect();
        for handle in handles {
            handle.join().expect("join").expect("emit");
        }
        assert_eq!(records(&seen).len(), 4);
    }
}

//! crates/logging/src/macros.rs
//! Convenience macros for building argument lists and emitting at a level.
//!
//! Log calls take heterogeneous arguments. [`log_args!`] converts each one to
//! a [`Value`](crate::Value); the level macros wrap that in a call on a
//! [`Logger`](crate::Logger) and evaluate to the call's `Result`.

/// Build a heterogeneous argument list.
///
/// # Example
/// ```
/// use logging::{log_args, Value};
///
/// let args = log_args!["user", 42, true, Value::Null];
/// assert_eq!(args.len(), 4);
/// ```
#[macro_export]
macro_rules! log_args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($arg)),+]
    };
}

/// Emit at an explicit level.
///
/// # Example
/// ```ignore
/// log_at!(logger, LogLevel::Warn, "retrying", attempt)?;
/// ```
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr $(, $arg:expr)* $(,)?) => {
        $logger.emit($level, $crate::log_args![$($arg),*])
    };
}

/// Emit at `FATAL`.
///
/// # Example
/// ```ignore
/// log_fatal!(logger, "cannot continue", details)?;
/// ```
#[macro_export]
macro_rules! log_fatal {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_at!($logger, $crate::LogLevel::Fatal $(, $arg)*)
    };
}

/// Emit at `ERROR`.
///
/// # Example
/// ```ignore
/// log_error!(logger, "request failed", status)?;
/// ```
#[macro_export]
macro_rules! log_error {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_at!($logger, $crate::LogLevel::Error $(, $arg)*)
    };
}

/// Emit at `WARN`.
#[macro_export]
macro_rules! log_warn {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_at!($logger, $crate::LogLevel::Warn $(, $arg)*)
    };
}

/// Emit at `INFO`.
///
/// # Example
/// ```ignore
/// log_info!(logger, "listening on", port)?;
/// ```
#[macro_export]
macro_rules! log_info {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_at!($logger, $crate::LogLevel::Info $(, $arg)*)
    };
}

/// Emit at `DEBUG`.
#[macro_export]
macro_rules! log_debug {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_at!($logger, $crate::LogLevel::Debug $(, $arg)*)
    };
}

/// Emit at `TRACE`.
#[macro_export]
macro_rules! log_trace {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_at!($logger, $crate::LogLevel::Trace $(, $arg)*)
    };
}

#[cfg(test)]
mod tests {
    use crate::{LogLevel, Logger, LoggerOptions, Payload, PassthroughFormatter, Value, sink_fn};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[test]
    fn log_args_converts_each_argument() {
        let args = log_args!["text", 1, 2.5, false, json!({"k": "v"}), Value::Null];
        assert_eq!(
            args,
            vec![
                json!("text"),
                json!(1),
                json!(2.5),
                json!(false),
                json!({"k": "v"}),
                Value::Null
            ]
        );
        assert!(log_args![].is_empty());
    }

    #[test]
    fn level_macros_emit_through_the_logger() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&seen);
        let logger = Logger::with_options(
            &LoggerOptions::new()
                .with_log_level(LogLevel::Trace)
                .with_formatter(Arc::new(PassthroughFormatter))
                .with_default_output(sink_fn(move |payload: &Payload| {
                    if let Some(record) = payload.as_record() {
                        captured
                            .lock()
                            .expect("lock")
                            .push((record.level(), record.message().to_owned()));
                    }
                })),
        )
        .expect("valid options");

        log_fatal!(logger, "f").expect("emit");
        log_error!(logger, "e", 1).expect("emit");
        log_warn!(logger, "w").expect("emit");
        log_info!(logger, "i").expect("emit");
        log_debug!(logger, "d").expect("emit");
        log_trace!(logger).expect("emit");
        log_at!(logger, LogLevel::Log, "always").expect("emit");

        let seen = seen.lock().expect("lock");
        assert_eq!(
            *seen,
            vec![
                (LogLevel::Fatal, "f".to_owned()),
                (LogLevel::Error, "e 1".to_owned()),
                (LogLevel::Warn, "w".to_owned()),
                (LogLevel::Info, "i".to_owned()),
                (LogLevel::Debug, "d".to_owned()),
                (LogLevel::Trace, String::new()),
                (LogLevel::Log, "always".to_owned()),
            ]
        );
    }
}

//! crates/logging/src/parser.rs
//! Turns a level and a variadic argument list into a [`LogRecord`].
//!
//! Leading primitives (strings, numbers, booleans) are joined into the
//! message. The first non-primitive argument (object, array or `null`) ends
//! message accumulation: it and every argument after it, primitive or not,
//! are kept verbatim as structured arguments. Blank strings contribute
//! nothing to the message but do not end accumulation.

use serde_json::Value;
use time::OffsetDateTime;

use crate::levels::LogLevel;
use crate::record::LogRecord;
use crate::timestamp::parse_timestamp;

/// Parses call arguments into a record stamped with the current instant
/// unless the first argument is a strict ISO-8601 timestamp.
#[must_use]
pub fn parse_args<I>(level: LogLevel, args: I) -> LogRecord
where
    I: IntoIterator<Item = Value>,
{
    parse_args_at(level, args, OffsetDateTime::now_utc)
}

/// Like [`parse_args`] but takes the fallback clock as a parameter.
///
/// `now` is consulted only when no leading timestamp is supplied.
pub fn parse_args_at<I, F>(level: LogLevel, args: I, now: F) -> LogRecord
where
    I: IntoIterator<Item = Value>,
    F: FnOnce() -> OffsetDateTime,
{
    let mut args = args.into_iter().peekable();

    let leading = match args.peek() {
        Some(Value::String(text)) => parse_timestamp(text),
        _ => None,
    };
    let timestamp = match leading {
        Some(timestamp) => {
            args.next();
            timestamp
        }
        None => now(),
    };

    let mut tokens: Vec<String> = Vec::new();
    let mut structured: Vec<Value> = Vec::new();

    for arg in args {
        if !structured.is_empty() {
            structured.push(arg);
            continue;
        }

        match arg {
            Value::String(text) => {
                if !is_blank(&text) {
                    tokens.push(text);
                }
            }
            Value::Number(number) => tokens.push(number.to_string()),
            Value::Bool(flag) => tokens.push(flag.to_string()),
            other @ (Value::Null | Value::Array(_) | Value::Object(_)) => structured.push(other),
        }
    }

    LogRecord::new(level, tokens.join(" "), structured, timestamp)
}

/// Whitespace or byte-order marks only.
fn is_blank(text: &str) -> bool {
    text.chars().all(|c| c.is_whitespace() || c == '\u{feff}')
}

/// Reports whether an argument is folded into the message text.
#[must_use]
pub const fn is_primitive(arg: &Value) -> bool {
    matches!(arg, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;
    use time::macros::datetime;

    const FIXED: OffsetDateTime = datetime!(2024-02-29 12:00:00 UTC);

    fn parse(level: LogLevel, args: Vec<Value>) -> LogRecord {
        parse_args_at(level, args, || FIXED)
    }

    #[test]
    fn empty_arguments_give_empty_record() {
        let record = parse(LogLevel::Info, vec![]);
        assert_eq!(record.message(), "");
        assert!(record.args().is_empty());
        assert_eq!(record.timestamp(), FIXED);
        assert_eq!(record.label(), "INFO");
    }

    #[test]
    fn primitives_are_joined_with_single_spaces() {
        let record = parse(LogLevel::Info, vec![json!("a"), json!(1), json!(true)]);
        assert_eq!(record.message(), "a 1 true");
        assert!(record.args().is_empty());
    }

    #[test]
    fn first_structured_argument_ends_the_message() {
        let record = parse(LogLevel::Error, vec![json!("x"), json!({"k": 1}), json!("y")]);
        assert_eq!(record.message(), "x");
        assert_eq!(record.args(), &[json!({"k": 1}), json!("y")]);
    }

    #[test]
    fn null_counts_as_structured() {
        let record = parse(
            LogLevel::Debug,
            vec![json!("Testing"), Value::Null, json!("values")],
        );
        assert_eq!(record.message(), "Testing");
        assert_eq!(record.args(), &[Value::Null, json!("values")]);
    }

    #[test]
    fn arrays_count_as_structured() {
        let record = parse(LogLevel::Trace, vec![json!([1, 2, 3]), json!(4)]);
        assert_eq!(record.message(), "");
        assert_eq!(record.args(), &[json!([1, 2, 3]), json!(4)]);
    }

    #[test]
    fn blank_strings_are_skipped_without_ending_the_message() {
        let record = parse(
            LogLevel::Warn,
            vec![json!(""), json!("a"), json!("   "), json!("\t\n "), json!("b")],
        );
        assert_eq!(record.message(), "a b");
        assert!(record.args().is_empty());
    }

    #[test]
    fn byte_order_mark_counts_as_blank() {
        let record = parse(
            LogLevel::Info,
            vec![json!("\u{feff}"), json!("a"), json!(" \u{feff}\u{a0} "), json!("b")],
        );
        assert_eq!(record.message(), "a b");
    }

    #[test]
    fn inner_whitespace_is_preserved() {
        let record = parse(LogLevel::Info, vec![json!("two  spaces"), json!("end")]);
        assert_eq!(record.message(), "two  spaces end");
    }

    #[test]
    fn numbers_render_like_json() {
        let record = parse(LogLevel::Info, vec![json!(-3), json!(2.5), json!(u64::MAX)]);
        assert_eq!(record.message(), "-3 2.5 18446744073709551615");
    }

    #[test]
    fn leading_timestamp_is_consumed() {
        let record = parse(
            LogLevel::Info,
            vec![json!("2025-07-22T02:45:00.000Z"), json!("m")],
        );
        assert_eq!(record.timestamp(), datetime!(2025-07-22 02:45:00 UTC));
        assert_eq!(record.message(), "m");
    }

    #[test]
    fn malformed_timestamp_stays_in_message() {
        let record = parse(
            LogLevel::Info,
            vec![json!("2025-13-01T00:00:00Z"), json!("m")],
        );
        assert_eq!(record.message(), "2025-13-01T00:00:00Z m");
        assert_eq!(record.timestamp(), FIXED);
    }

    #[test]
    fn only_the_first_argument_is_a_timestamp_candidate() {
        let record = parse(
            LogLevel::Info,
            vec![json!("at"), json!("2025-07-22T02:45:00Z")],
        );
        assert_eq!(record.message(), "at 2025-07-22T02:45:00Z");
        assert_eq!(record.timestamp(), FIXED);
    }

    #[test]
    fn timestamp_alone_yields_empty_message() {
        let record = parse(LogLevel::Info, vec![json!("2025-07-22T02:45:00Z")]);
        assert_eq!(record.message(), "");
        assert_eq!(record.timestamp(), datetime!(2025-07-22 02:45:00 UTC));
    }

    #[test]
    fn clock_is_not_consulted_when_timestamp_supplied() {
        let record = parse_args_at(
            LogLevel::Info,
            vec![json!("2025-07-22T02:45:00Z")],
            || panic!("clock must not be read"),
        );
        assert_eq!(record.timestamp(), datetime!(2025-07-22 02:45:00 UTC));
    }

    #[test]
    fn unicode_is_preserved_verbatim() {
        let record = parse(
            LogLevel::Info,
            vec![json!("こんにちは 🌍"), json!("e\u{301}"), json!({"user": "テスト"})],
        );
        assert_eq!(record.message(), "こんにちは 🌍 e\u{301}");
        assert_eq!(record.args(), &[json!({"user": "テスト"})]);
    }

    #[test]
    fn current_time_is_used_by_default() {
        let before = OffsetDateTime::now_utc();
        let record = parse_args(LogLevel::Info, vec![json!("test message")]);
        let after = OffsetDateTime::now_utc();
        assert!(record.timestamp() >= before);
        assert!(record.timestamp() <= after);
    }

    fn primitive_arg() -> impl Strategy<Value = Value> {
        prop_oneof![
            "[ a-z\\t]{0,8}".prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            any::<bool>().prop_map(Value::from),
        ]
    }

    proptest! {
        #[test]
        fn message_never_has_outer_or_doubled_separator_spaces(
            args in proptest::collection::vec(primitive_arg(), 0..8)
        ) {
            let record = parse(LogLevel::Info, args.clone());
            let expected: Vec<String> = args
                .iter()
                .filter_map(|arg| match arg {
                    Value::String(text) if text.trim().is_empty() => None,
                    Value::String(text) => Some(text.clone()),
                    other => Some(other.to_string()),
                })
                .collect();
            prop_assert_eq!(record.message(), expected.join(" "));
            prop_assert!(record.args().is_empty());
        }

        #[test]
        fn everything_after_first_structured_argument_is_kept(
            head in proptest::collection::vec(primitive_arg(), 0..4),
            tail in proptest::collection::vec(primitive_arg(), 0..4)
        ) {
            let mut args = head;
            args.push(json!({"marker": true}));
            args.extend(tail.iter().cloned());
            let record = parse(LogLevel::Debug, args);
            prop_assert_eq!(record.args().len(), tail.len() + 1);
            prop_assert_eq!(&record.args()[1..], tail.as_slice());
        }
    }
}

//! crates/logging/src/timestamp.rs
//! Strict recognition of a leading ISO-8601 timestamp argument.
//!
//! Only `YYYY-MM-DDTHH:MM:SS[.fraction](Z|±HH:MM)` is accepted. The literal
//! shape is checked first so that separators, the upper-case `T` and the
//! seconds range are enforced independently of the RFC 3339 parser, which
//! then validates the remaining component ranges and the offset.

use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};

/// Shortest accepted input: `YYYY-MM-DDTHH:MM:SSZ`.
const MIN_LEN: usize = 20;

/// Parses `text` as a strict ISO-8601 date-time, normalized to UTC.
///
/// Returns `None` for anything that is not a complete, in-range date-time
/// with an explicit offset. Never panics.
#[must_use]
pub fn parse_timestamp(text: &str) -> Option<OffsetDateTime> {
    if !has_date_time_shape(text.as_bytes()) {
        return None;
    }

    OffsetDateTime::parse(text, &Rfc3339)
        .ok()
        .map(|parsed| parsed.to_offset(UtcOffset::UTC))
}

fn has_date_time_shape(bytes: &[u8]) -> bool {
    if bytes.len() < MIN_LEN {
        return false;
    }

    let digits_at = |positions: &[usize]| positions.iter().all(|&i| bytes[i].is_ascii_digit());

    digits_at(&[0, 1, 2, 3, 5, 6, 8, 9, 11, 12, 14, 15, 17, 18])
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes[10] == b'T'
        && bytes[13] == b':'
        && bytes[16] == b':'
        // Seconds stop at 59; leap-second notation is not a valid timestamp here.
        && bytes[17] <= b'5'
        && has_offset_suffix(skip_fraction(&bytes[19..]))
}

fn skip_fraction(rest: &[u8]) -> &[u8] {
    match rest.split_first() {
        Some((b'.', tail)) => {
            let digits = tail.iter().take_while(|b| b.is_ascii_digit()).count();
            &tail[digits..]
        }
        _ => rest,
    }
}

/// Upper-case `Z` or `±HH:MM`, and nothing after it.
fn has_offset_suffix(suffix: &[u8]) -> bool {
    match suffix {
        [b'Z'] => true,
        [sign, h1, h2, b':', m1, m2] => {
            matches!(sign, b'+' | b'-')
                && [h1, h2, m1, m2].iter().all(|b| b.is_ascii_digit())
        }
        _ => false,
    }
}

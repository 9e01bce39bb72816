//! Strict timestamp grammar
//!
//! Definition files carry instants as `YYYY-MM-DDTHH:mm[:ss[.mmm]](Z|±HH:mm)`.
//! Seconds and milliseconds are optional, but when present must be complete,
//! and the offset is never optional. Syntax alone is not enough: the string
//! must also denote a real calendar date, so a well-formed `2021-02-30T...`
//! is rejected.

use std::sync::OnceLock;

use chrono::{DateTime, FixedOffset};
use regex::Regex;

/// Grammar: date, `T`, hours:minutes, optional `:seconds[.millis]`, explicit offset.
pub(crate) const GRAMMAR: &str =
    r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}(:\d{2}(\.\d{3})?)?(Z|[+-]\d{2}:\d{2})$";

fn grammar() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(GRAMMAR).expect("timestamp grammar is a valid regex"))
}

/// Parse a timestamp under the strict grammar.
///
/// Returns `None` when the string fails the grammar or does not denote a
/// real date.
pub fn parse(input: &str) -> Option<DateTime<FixedOffset>> {
    if !grammar().is_match(input) {
        return None;
    }

    // RFC 3339 requires seconds; splice `:00` in front of the offset when
    // the grammar's optional time tail was omitted.
    let offset_at = input
        .rfind(['Z', '+'])
        .max(input.rfind('-').filter(|&i| i > 10))?;
    let has_seconds = input[..offset_at].len() > 16;
    let normalized = if has_seconds {
        input.to_string()
    } else {
        format!("{}:00{}", &input[..offset_at], &input[offset_at..])
    };

    DateTime::parse_from_rfc3339(&normalized).ok()
}

/// Whether the string is a valid timestamp under the strict grammar
pub fn is_valid(input: &str) -> bool {
    parse(input).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_full_form_parses() {
        let parsed = parse("2020-06-15T12:30:45.123Z").unwrap();
        assert_eq!(parsed.nanosecond(), 123_000_000);
    }

    #[test]
    fn test_seconds_optional() {
        let parsed = parse("2020-06-15T12:30Z").unwrap();
        assert_eq!(parsed.second(), 0);
        assert!(is_valid("2020-06-15T12:30+09:00"));
    }

    #[test]
    fn test_offset_forms() {
        assert!(is_valid("1999-12-31T23:59:59+09:00"));
        assert!(is_valid("1999-12-31T23:59:59-05:30"));
        assert!(is_valid("1999-12-31T23:59:59Z"));
    }

    #[test]
    fn test_offset_required() {
        assert!(!is_valid("2020-06-15T12:30:45"));
        assert!(!is_valid("2020-06-15T12:30:45.123"));
    }

    #[test]
    fn test_partial_components_must_be_complete() {
        // Milliseconds without seconds, or truncated milliseconds
        assert!(!is_valid("2020-06-15T12:30.123Z"));
        assert!(!is_valid("2020-06-15T12:30:45.1Z"));
        assert!(!is_valid("2020-06-15T12Z"));
    }

    #[test]
    fn test_real_looking_but_invalid_date_rejected() {
        assert!(!is_valid("2021-02-30T00:00:00.000Z"));
        assert!(!is_valid("2021-13-01T00:00Z"));
        assert!(!is_valid("2021-04-31T06:00Z"));
    }

    #[test]
    fn test_leap_day_accepted_only_in_leap_years() {
        assert!(is_valid("2020-02-29T00:00Z"));
        assert!(!is_valid("2021-02-29T00:00Z"));
    }
}

//! Timestamp and numeric field parsing shared by both file formats.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};
use traffic_map_traffic_models::UTC8_OFFSET_HOURS;

/// Naive formats accepted after RFC 3339 fails, most specific first.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// A timestamp as written in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawTimestamp {
    /// No offset given; the wall-clock value as written.
    Naive(NaiveDateTime),
    /// An explicit offset was given; normalised to UTC.
    Utc(NaiveDateTime),
}

impl RawTimestamp {
    /// Interprets naive values as UTC and returns the UTC+8 wall clock.
    #[must_use]
    pub fn shifted_to_utc8(self) -> Option<NaiveDateTime> {
        let (Self::Naive(t) | Self::Utc(t)) = self;
        t.checked_add_signed(TimeDelta::hours(UTC8_OFFSET_HOURS))
    }

    /// Interprets naive values as already UTC+8; offset-aware values are
    /// converted to the UTC+8 wall clock.
    #[must_use]
    pub fn as_utc8(self) -> Option<NaiveDateTime> {
        match self {
            Self::Naive(t) => Some(t),
            Self::Utc(t) => t.checked_add_signed(TimeDelta::hours(UTC8_OFFSET_HOURS)),
        }
    }
}

/// Parses an ISO-8601 style timestamp.
///
/// Accepts RFC 3339 with an offset, the naive forms in `NAIVE_FORMATS`, and
/// a bare `YYYY-MM-DD` date (midnight).
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<RawTimestamp> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(RawTimestamp::Utc(dt.naive_utc()));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(RawTimestamp::Naive(naive));
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(RawTimestamp::Naive)
}

/// Everything after the first line of `text`, which is always a header.
#[must_use]
pub fn skip_header_line(text: &str) -> &str {
    text.split_once('\n').map_or("", |(_, rest)| rest)
}

/// A reader that splits each line on commas with no quote handling.
#[must_use]
pub fn line_reader(body: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes())
}

fn leading_digits(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

/// Parses the leading unsigned integer of `s`, ignoring trailing junk
/// (`"12"`, `"12.0"` and `"12 veh"` all give 12).
///
/// Returns `None` when `s` does not start with a digit, which includes
/// negative values.
#[must_use]
pub fn parse_count(s: &str) -> Option<u64> {
    let s = s.trim();
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = leading_digits(s);
    if end == 0 {
        return None;
    }
    s[..end].parse().ok()
}

/// Parses the longest decimal prefix of `s` (`"12.5veh"` gives 12.5).
///
/// Accepts an optional sign, digits with an optional fraction, an optional
/// exponent, or `Infinity`. Returns `None` when no digits lead the field.
#[must_use]
pub fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    let bytes = s.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    if s[end..].starts_with("Infinity") {
        let sign = if s.starts_with('-') { -1.0 } else { 1.0 };
        return Some(sign * f64::INFINITY);
    }

    let int_digits = leading_digits(&s[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = leading_digits(&s[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = leading_digits(&s[exp..]);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    s[..end].parse().ok()
}

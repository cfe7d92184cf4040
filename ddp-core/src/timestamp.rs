//! Timestamp detection and normalization
//!
//! Export schemas carry timestamps as epoch seconds, ISO 8601 strings, or
//! locale-formatted dates, and switch between them across app versions.
//! Detection works on a small sample of a candidate column rather than the
//! whole column; it is a heuristic, not a guarantee.

use chrono::{NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{DdpError, Result};

/// Inclusive lower bound of the epoch acceptance window: 2000-01-01 UTC.
pub const EPOCH_WINDOW_START: i64 = 946_684_800;
/// Inclusive upper bound of the epoch acceptance window: 2040-01-01 UTC.
pub const EPOCH_WINDOW_END: i64 = 2_208_988_800;
/// Recommended number of leading values to inspect during detection.
pub const DETECTION_SAMPLE_SIZE: usize = 10;

static ISO8601_FULL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(-?(?:[1-9][0-9]*)?[0-9]{4})-(1[0-2]|0[1-9])-(3[01]|0[1-9]|[12][0-9])T(2[0-3]|[01][0-9]):([0-5][0-9]):([0-5][0-9])(\.[0-9]+)?(Z|[+-](?:2[0-3]|[01][0-9]):[0-5][0-9])?$",
    )
    .expect("valid ISO 8601 pattern")
});

static ISO8601_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(-?(?:[1-9][0-9]*)?[0-9]{4})-(1[0-2]|0[1-9])-(3[01]|0[1-9]|[12][0-9])$")
        .expect("valid ISO 8601 date pattern")
});

/// Check whether the leading values of a column are epoch seconds.
///
/// Every one of the first `sample_size` values must parse as an integer
/// inside the [2000, 2040] window. Numeric values outside the window are
/// not epoch timestamps (they are ids, counters, or milliseconds).
///
/// An empty column is never an epoch column: vacuous acceptance would let
/// an absent field classify as timestamps downstream. Deliberate, do not
/// relax.
pub fn is_epoch_seconds<T: ToString>(values: &[T], sample_size: usize) -> bool {
    if values.is_empty() {
        return false;
    }
    for value in values.iter().take(sample_size) {
        let raw = value.to_string();
        match raw.trim().parse::<i64>() {
            Ok(secs) if (EPOCH_WINDOW_START..=EPOCH_WINDOW_END).contains(&secs) => {}
            _ => {
                debug!(raw = %raw, "not an epoch timestamp");
                return false;
            }
        }
    }
    true
}

/// Check whether the leading values of a column are ISO 8601 strings.
///
/// `date_only` restricts the pattern to the date part (`YYYY-MM-DD`); the
/// full form additionally accepts a time with optional fractional seconds
/// and a `Z` or `±hh:mm` suffix.
pub fn is_iso8601<S: AsRef<str>>(values: &[S], sample_size: usize, date_only: bool) -> bool {
    if values.is_empty() {
        return false;
    }
    let pattern: &Regex = if date_only { &ISO8601_DATE } else { &ISO8601_FULL };
    for value in values.iter().take(sample_size) {
        if !pattern.is_match(value.as_ref()) {
            debug!(raw = value.as_ref(), date_only, "not an ISO 8601 timestamp");
            return false;
        }
    }
    true
}

/// Convert epoch seconds to an ISO 8601 string, strict policy.
///
/// Always assumes UTC; output carries an explicit `+00:00` offset. Fails
/// with [`DdpError::TimestampConversion`] carrying the raw input when it is
/// not an integer or is outside chrono's representable range. Use this at
/// call sites where a bad timestamp should be visible to the caller.
pub fn epoch_to_iso<T: ToString>(raw: T) -> Result<String> {
    let raw = raw.to_string();
    let secs: i64 = raw
        .trim()
        .parse()
        .map_err(|_| DdpError::TimestampConversion { raw: raw.clone() })?;
    match Utc.timestamp_opt(secs, 0) {
        chrono::LocalResult::Single(dt) => Ok(dt.to_rfc3339_opts(SecondsFormat::Secs, false)),
        _ => Err(DdpError::TimestampConversion { raw }),
    }
}

/// Convert epoch seconds to an ISO 8601 string, lenient policy.
///
/// On failure the original input is returned unchanged, so a field that was
/// never a timestamp passes through as-is. Use this at call sites where one
/// bad value must not cost the donor the whole row.
pub fn epoch_to_iso_lenient<T: ToString>(raw: T) -> String {
    let raw = raw.to_string();
    match epoch_to_iso(raw.as_str()) {
        Ok(iso) => iso,
        Err(_) => {
            debug!(raw = %raw, "lenient epoch conversion fell through");
            raw
        }
    }
}

/// Whether a single string reads as a timestamp.
///
/// Bare digit runs are excluded here: a lone number is only a timestamp in
/// the context of a whole column, which [`is_epoch_seconds`] decides.
pub fn is_timestamp(s: &str) -> bool {
    if s.is_empty() || s.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    if ISO8601_FULL.is_match(s) || ISO8601_DATE.is_match(s) {
        return true;
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").is_ok()
        || chrono::DateTime::parse_from_rfc2822(s).is_ok()
        || parse_ordered(s, DateOrder::DayFirst).is_some()
        || parse_ordered(s, DateOrder::MonthFirst).is_some()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateOrder {
    DayFirst,
    MonthFirst,
}

impl DateOrder {
    fn flipped(self) -> Self {
        match self {
            DateOrder::DayFirst => DateOrder::MonthFirst,
            DateOrder::MonthFirst => DateOrder::DayFirst,
        }
    }
}

const DAY_FIRST_DATETIME: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M",
];
const DAY_FIRST_DATE: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];
const MONTH_FIRST_DATETIME: &[&str] = &[
    "%m/%d/%Y %H:%M:%S",
    "%m-%d-%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m-%d-%Y %H:%M",
];
const MONTH_FIRST_DATE: &[&str] = &["%m/%d/%Y", "%m-%d-%Y", "%m.%d.%Y"];

fn parse_ordered(s: &str, order: DateOrder) -> Option<NaiveDateTime> {
    let (datetime_formats, date_formats) = match order {
        DateOrder::DayFirst => (DAY_FIRST_DATETIME, DAY_FIRST_DATE),
        DateOrder::MonthFirst => (MONTH_FIRST_DATETIME, MONTH_FIRST_DATE),
    };
    for format in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }
    for format in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, format) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Normalize a column of raw timestamp strings to ISO 8601, best effort.
///
/// ISO 8601 values (full or date-only) pass through unchanged; epoch
/// columns are converted per value. Anything else goes through locale
/// parsing with day-before-month preferred: if a day-first reading is
/// impossible for the first parseable value, the order silently switches to
/// month-first for the remainder of the sequence. Values that resist every
/// reading come back as `None`. Detection samples the first
/// [`DETECTION_SAMPLE_SIZE`] values only.
pub fn normalize_sequence<S: AsRef<str> + ToString>(values: &[S]) -> Vec<Option<String>> {
    if is_iso8601(values, DETECTION_SAMPLE_SIZE, false)
        || is_iso8601(values, DETECTION_SAMPLE_SIZE, true)
    {
        return values
            .iter()
            .map(|v| {
                let s = v.as_ref();
                (!s.is_empty()).then(|| s.to_string())
            })
            .collect();
    }

    if is_epoch_seconds(values, DETECTION_SAMPLE_SIZE) {
        return values.iter().map(|v| epoch_to_iso(v.as_ref()).ok()).collect();
    }

    let mut order = DateOrder::DayFirst;
    let mut decided = false;
    values
        .iter()
        .map(|v| {
            let s = v.as_ref().trim();
            if s.is_empty() {
                return None;
            }
            if !decided {
                if parse_ordered(s, DateOrder::DayFirst).is_some() {
                    decided = true;
                } else if parse_ordered(s, DateOrder::MonthFirst).is_some() {
                    debug!(raw = s, "day-first impossible, switching to month-first");
                    order = DateOrder::MonthFirst;
                    decided = true;
                }
            }
            let dt = parse_ordered(s, order).or_else(|| parse_ordered(s, order.flipped()))?;
            Some(dt.format("%Y-%m-%dT%H:%M:%S").to_string())
        })
        .collect()
}

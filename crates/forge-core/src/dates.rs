//! Strict parsing for date boundaries and instants.
//!
//! Calendar dates carry no time-of-day meaning; instants are wall-clock
//! readings in whatever zone the caller interprets days in. Parsing never
//! falls back to a lenient guess: anything unrecognised is `InvalidDate`.

use crate::error::{ForgeError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use regex::Regex;
use std::sync::OnceLock;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

static DATE_SHAPE_RE: OnceLock<Regex> = OnceLock::new();

/// Zero-padded four-digit year, two-digit month and day, then either the end
/// of input or a date-time separator. chrono alone accepts `2025-6-1` and
/// `+2025-06-01`.
fn date_shape_re() -> &'static Regex {
    DATE_SHAPE_RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}(?:$|[T ])").unwrap())
}

fn check_shape<'a>(input: &str, trimmed: &'a str) -> Result<&'a str> {
    if date_shape_re().is_match(trimmed) {
        Ok(trimmed)
    } else {
        Err(ForgeError::InvalidDate(input.to_string()))
    }
}

/// Parse a date boundary.
///
/// Accepts `YYYY-MM-DD`, a naive date-time, or an RFC 3339 timestamp. For
/// date-times the calendar date in the timestamp's own offset is kept.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let s = check_shape(input, input.trim())?;
    if let Ok(date) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Ok(date);
    }
    parse_datetime(s)
        .map(|dt| dt.date())
        .ok_or_else(|| ForgeError::InvalidDate(input.to_string()))
}

/// Parse an optional boundary. `None` stays `None`; a present but malformed
/// string is an error, never coerced to absence.
pub fn parse_optional_date(input: Option<&str>) -> Result<Option<NaiveDate>> {
    input.map(parse_date).transpose()
}

/// Parse an instant as wall-clock time.
///
/// A bare date is read as midnight at the start of that day. Leap seconds
/// (`23:59:60`) are rejected: they would fall after the end-of-day boundary
/// while still belonging to that day.
pub fn parse_instant(input: &str) -> Result<NaiveDateTime> {
    let s = check_shape(input, input.trim())?;
    if let Some(dt) = parse_datetime(s) {
        return Ok(dt);
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| ForgeError::InvalidDate(input.to_string()))
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let dt = match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => dt.naive_local(),
        Err(_) => DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())?,
    };
    // chrono encodes a leap second as nanosecond >= 1_000_000_000.
    (dt.nanosecond() < 1_000_000_000).then_some(dt)
}

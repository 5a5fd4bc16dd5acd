//! Timestamp parsing for the built-in `DateTime<Utc>` converter.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Layouts carrying an explicit offset.
const OFFSET_LAYOUTS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M:%S %z",
    "%Y-%m-%d %H:%M:%S %:z",
    "%Y-%m-%d %H:%M:%S%:z",
    "%a %b %e %H:%M:%S %z %Y",
];

/// Layouts without an offset, interpreted as UTC.
const NAIVE_LAYOUTS: [&str; 8] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%a %b %e %H:%M:%S %Y",
    "%d %b %Y %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_LAYOUTS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d %b %Y", "%b %d, %Y"];

/// Parses a timestamp written in one of many common layouts.
///
/// RFC 3339 and RFC 2822 are tried first, followed by ISO-like layouts with
/// and without offsets and plain dates (midnight UTC).
///
/// # Errors
///
/// Returns a message when no known layout matches.
///
/// # Examples
///
/// ```
/// use prop_bind::parse_timestamp;
/// let ts = parse_timestamp("2024-03-01T12:30:00+02:00").expect("rfc3339");
/// assert_eq!(ts.to_rfc3339(), "2024-03-01T10:30:00+00:00");
/// ```
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let text = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(text) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Some(parsed) = OFFSET_LAYOUTS
        .iter()
        .find_map(|layout| DateTime::parse_from_str(text, layout).ok())
    {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Some(parsed) = NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(text, layout).ok())
    {
        return Ok(parsed.and_utc());
    }
    DATE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(text, layout).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| format!("unrecognised timestamp '{text}'"))
}

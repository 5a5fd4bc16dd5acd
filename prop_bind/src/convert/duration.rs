//! Duration parsing for the built-in `Duration` converter.
//!
//! Accepts one or more `<number><unit>` terms such as `1h30m` or `1.5s`.
//! Units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`. A bare integer is
//! read as nanoseconds and `0` needs no unit.

use std::time::Duration;

const UNITS: [(&str, u128); 8] = [
    ("ns", 1),
    ("us", 1_000),
    ("µs", 1_000),
    ("μs", 1_000),
    ("ms", 1_000_000),
    ("s", 1_000_000_000),
    ("m", 60_000_000_000),
    ("h", 3_600_000_000_000),
];

/// Parses a duration string.
///
/// # Errors
///
/// Returns a message when the text is empty, negative, carries an unknown
/// unit or overflows.
///
/// # Examples
///
/// ```
/// use prop_bind::parse_duration;
/// use std::time::Duration;
/// assert_eq!(parse_duration("1m30s"), Ok(Duration::from_secs(90)));
/// assert_eq!(parse_duration("250ms"), Ok(Duration::from_millis(250)));
/// ```
pub fn parse_duration(raw: &str) -> Result<Duration, String> {
    let trimmed = raw.trim();
    let text = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if text.is_empty() {
        return Err("empty duration".to_owned());
    }
    if text.starts_with('-') {
        return Err(format!("negative duration '{raw}'"));
    }
    if text.chars().all(|c| c.is_ascii_digit()) {
        let nanos: u64 = text
            .parse()
            .map_err(|err| format!("invalid duration '{raw}': {err}"))?;
        return Ok(Duration::from_nanos(nanos));
    }

    let mut total: u128 = 0;
    let mut rest = text;
    while !rest.is_empty() {
        let (term, remaining) = parse_term(rest).ok_or_else(|| format!("invalid duration '{raw}'"))?;
        total = total
            .checked_add(term)
            .ok_or_else(|| format!("duration '{raw}' overflows"))?;
        rest = remaining;
    }
    nanos_to_duration(total).ok_or_else(|| format!("duration '{raw}' overflows"))
}

/// Parses one `<number><unit>` term, returning its nanoseconds and the rest.
fn parse_term(input: &str) -> Option<(u128, &str)> {
    let number_len = input
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(input.len());
    let (number, after) = input.split_at(number_len);
    let unit_len = after
        .find(|c: char| c.is_ascii_digit() || c == '.')
        .unwrap_or(after.len());
    let (unit, rest) = after.split_at(unit_len);
    let scale = UNITS
        .iter()
        .find_map(|(name, nanos)| (*name == unit).then_some(*nanos))?;

    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    let whole_value: u128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut nanos = whole_value.checked_mul(scale)?;
    if !fraction.is_empty() {
        let digits = u32::try_from(fraction.len()).ok()?;
        let denominator = 10_u128.checked_pow(digits)?;
        let numerator: u128 = fraction.parse().ok()?;
        let part = numerator.checked_mul(scale)?.checked_div(denominator)?;
        nanos = nanos.checked_add(part)?;
    }
    Some((nanos, rest))
}

fn nanos_to_duration(nanos: u128) -> Option<Duration> {
    let secs = u64::try_from(nanos.checked_div(1_000_000_000)?).ok()?;
    let sub = u32::try_from(nanos.checked_rem(1_000_000_000)?).ok()?;
    Some(Duration::new(secs, sub))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rstest::rstest;

    use super::parse_duration;

    #[rstest]
    #[case("0", Duration::ZERO)]
    #[case("1500", Duration::from_nanos(1500))]
    #[case("10ns", Duration::from_nanos(10))]
    #[case("3us", Duration::from_micros(3))]
    #[case("3µs", Duration::from_micros(3))]
    #[case("20ms", Duration::from_millis(20))]
    #[case("2s", Duration::from_secs(2))]
    #[case("1.5s", Duration::from_millis(1500))]
    #[case(".5s", Duration::from_millis(500))]
    #[case("5m", Duration::from_secs(300))]
    #[case("2h45m", Duration::from_secs(9900))]
    #[case("1h0m1s", Duration::from_secs(3601))]
    fn parses_durations(#[case] raw: &str, #[case] expected: Duration) {
        assert_eq!(parse_duration(raw), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("-1s")]
    #[case("5x")]
    #[case("s")]
    #[case("1.2.3s")]
    #[case("10 s")]
    fn rejects_malformed_durations(#[case] raw: &str) {
        assert!(parse_duration(raw).is_err(), "{raw} should not parse");
    }
}

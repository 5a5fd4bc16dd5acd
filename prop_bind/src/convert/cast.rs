//! Textual casts into native scalar types.

/// Splits `raw` into a sign flag and an unsigned magnitude.
///
/// Accepts one optional sign, a `0x`, `0o` or `0b` prefix (either case) and
/// `_` separators. A second sign after the first one or after the prefix is
/// rejected.
fn parse_magnitude(raw: &str) -> Result<(bool, u128), String> {
    let trimmed = raw.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let (radix, digits) = split_radix(unsigned);
    if digits.starts_with(['+', '-']) {
        return Err(format!("invalid integer '{trimmed}': unexpected sign"));
    }
    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    let magnitude = u128::from_str_radix(&cleaned, radix)
        .map_err(|err| format!("invalid integer '{trimmed}': {err}"))?;
    Ok((negative, magnitude))
}

/// Parses a signed integer with optional sign, radix prefix and `_` separators.
pub(crate) fn parse_integer(raw: &str) -> Result<i128, String> {
    let (negative, magnitude) = parse_magnitude(raw)?;
    let value = if negative {
        0_i128.checked_sub_unsigned(magnitude)
    } else {
        i128::try_from(magnitude).ok()
    };
    value.ok_or_else(|| format!("'{}' is out of range for i128", raw.trim()))
}

/// Parses an unsigned integer; only zero may carry a minus sign.
pub(crate) fn parse_unsigned(raw: &str) -> Result<u128, String> {
    match parse_magnitude(raw)? {
        (true, magnitude) if magnitude != 0 => {
            Err(format!("'{}' is negative", raw.trim()))
        }
        (_, magnitude) => Ok(magnitude),
    }
}

fn split_radix(digits: &str) -> (u32, &str) {
    [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)]
        .into_iter()
        .find_map(|(prefix, radix)| digits.strip_prefix(prefix).map(|rest| (radix, rest)))
        .unwrap_or((10, digits))
}

/// Parses a boolean, accepting `1`, `t`, `true`, `0`, `f`, `false` in any case.
pub(crate) fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Ok(true),
        "0" | "f" | "false" => Ok(false),
        other => Err(format!("invalid boolean '{other}'")),
    }
}

/// Splits a scalar feeding a sequence on whitespace and commas, dropping
/// empty items.
pub(crate) fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|item| !item.is_empty())
}

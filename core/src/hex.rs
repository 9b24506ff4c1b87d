/// Parses a quantity like `0x1b4`. The prefix is optional.
///
/// Blank input, non-hex digits and values that don't fit in an `i64` yield `None`.
pub fn try_parse_hex(value: &str) -> Option<i64> {
    let value = value.trim();
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);

    // from_str_radix would accept a leading sign
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    i64::from_str_radix(digits, 16).ok()
}

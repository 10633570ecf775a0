/// Reorder a `"DD-MM-YYYY"` date into `"YYYY-MM-DD"`.
///
/// No validation: segments are taken positionally, a missing one renders as
/// `undefined` and anything past the third is ignored.
pub fn format_date(s: &str) -> String {
    let mut parts = s.split('-');
    let day = parts.next().unwrap_or("undefined");
    let month = parts.next().unwrap_or("undefined");
    let year = parts.next().unwrap_or("undefined");
    format!("{}-{}-{}", year, month, day)
}

/// Leading-integer parse: `" 1990abc"` → `Some(1990)`, `"abc"` → `None`.
///
/// `None` stands in for "not a number"; it is stored as NULL.
pub fn parse_int(s: &str) -> Option<i64> {
    let s = s.trim();
    let (neg, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let n: i64 = digits[..end].parse().ok()?;
    Some(if neg { -n } else { n })
}

//! Human-readable size string parsing.
//!
//! Used when loading configuration (cache limits, upload caps); not part of
//! the render path. Accepts a bare number or a number followed by one unit
//! letter, case-insensitive, with surrounding whitespace ignored.

/// Parses a size string like `"512"`, `"10M"`, or `"1.5g"` into bytes.
///
/// Units scale by 1024: `B`, `K`, `M`, `G`, `T`. Integer inputs are exact
/// with overflow checked; fractional inputs go through floating point and
/// truncate. Returns `None` for empty input, unknown units, negative or
/// non-finite numbers, and overflow.
///
/// # Examples
///
/// ```rust
/// use serde_afd::parse_size;
///
/// assert_eq!(parse_size("10M"), Some(10_485_760));
/// assert_eq!(parse_size(" 512 "), Some(512));
/// assert_eq!(parse_size("1.5K"), Some(1536));
/// assert_eq!(parse_size("-10M"), None);
/// ```
#[must_use]
pub fn parse_size(s: &str) -> Option<u64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let last = s.as_bytes()[s.len() - 1];
    let (num_str, mult): (&str, u64) = match last {
        b'B' | b'b' => (&s[..s.len() - 1], 1),
        b'K' | b'k' => (&s[..s.len() - 1], 1024),
        b'M' | b'm' => (&s[..s.len() - 1], 1024 * 1024),
        b'G' | b'g' => (&s[..s.len() - 1], 1024 * 1024 * 1024),
        b'T' | b't' => (&s[..s.len() - 1], 1024u64.pow(4)),
        b'0'..=b'9' | b'.' => (s, 1),
        _ => return None,
    };
    if num_str.is_empty() {
        return None;
    }
    if let Ok(n) = num_str.parse::<u64>() {
        return n.checked_mul(mult);
    }
    let f = num_str.parse::<f64>().ok()?;
    if f < 0.0 || !f.is_finite() {
        return None;
    }
    let result = f * mult as f64;
    if result > u64::MAX as f64 {
        return None;
    }
    Some(result as u64)
}

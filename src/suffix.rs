//! Suffix resolution and field processing.
//!
//! Field names carry trailing unit markers (`latency_ms`, `size_bytes`,
//! `api_key_secret`, `price_usd_cents`, ...) that the human-readable
//! renderers use to reformat values without any external schema. This module
//! holds the suffix table, the per-field processor, the same-object collision
//! resolver, and the deterministic key ordering used by both human forms.
//!
//! Matching is priority-ordered: compound suffixes are checked before the
//! short ones they end with, so `_epoch_s` can never be consumed as `_s`.
//! A suffix matches only in its exact lowercase or exact uppercase form;
//! mixed-case variants are not recognized.
//!
//! The processor's single failure mode, a suffix matching a value that
//! fails the formatter's type guard, is not an error. It degrades to
//! "no match" and the field renders with its original key and raw value.

use std::cmp::Ordering;

use chrono::{DateTime, SecondsFormat};

use crate::Value;

/// The token substituted for sensitive values.
pub const REDACTION_TOKEN: &str = "***";

/// The suffix that marks a field as sensitive.
pub(crate) const SECRET_SUFFIX: &str = "_secret";

/// Returns `true` for keys carrying the sensitive marker in its exact
/// lowercase or exact uppercase form.
pub(crate) fn is_secret_key(key: &str) -> bool {
    key.ends_with("_secret") || key.ends_with("_SECRET")
}

/// Strips `suffix_lower` from the key's tail, accepting the exact lowercase
/// or exact uppercase spelling only.
fn strip_suffix_exact(key: &str, suffix_lower: &str) -> Option<String> {
    if let Some(stripped) = key.strip_suffix(suffix_lower) {
        return Some(stripped.to_string());
    }
    let suffix_upper = suffix_lower.to_uppercase();
    key.strip_suffix(suffix_upper.as_str()).map(str::to_string)
}

/// Extracts the currency code from a `_{code}_cents` / `_{CODE}_CENTS` tail.
///
/// The code segment between the last underscore and the cents marker must be
/// non-empty: `fare_thb_cents` yields `thb`, bare `_cents` yields nothing.
fn extract_currency_code(key: &str) -> Option<&str> {
    let without_cents = key
        .strip_suffix("_cents")
        .or_else(|| key.strip_suffix("_CENTS"))?;
    let idx = without_cents.rfind('_')?;
    let code = &without_cents[idx + 1..];
    if code.is_empty() {
        None
    } else {
        Some(code)
    }
}

/// Strips a generic `_{code}_cents` suffix, returning (stripped key, code).
/// The stripped key must itself be non-empty.
fn try_strip_generic_cents(key: &str) -> Option<(String, String)> {
    let code = extract_currency_code(key)?;
    let suffix_len = code.len() + "_cents".len() + 1;
    let stripped = &key[..key.len() - suffix_len];
    if stripped.is_empty() {
        return None;
    }
    Some((stripped.to_string(), code.to_string()))
}

/// Attempts suffix-driven processing of one field.
///
/// Returns `Some((stripped_key, formatted_value))` when a suffix matches and
/// the value passes its type guard, `None` otherwise. A guard failure stops
/// matching for this key entirely; it never falls through to a shorter
/// suffix.
///
/// # Examples
///
/// ```rust
/// use serde_afd::{process_field, Value};
///
/// let got = process_field("latency_ms", &Value::from(1280));
/// assert_eq!(got, Some(("latency".to_string(), "1.28s".to_string())));
///
/// // Guard failure: _bytes needs an integer
/// assert_eq!(process_field("size_bytes", &Value::from("big")), None);
/// ```
pub fn process_field(key: &str, value: &Value) -> Option<(String, String)> {
    // Group 1: compound timestamp suffixes
    if let Some(stripped) = strip_suffix_exact(key, "_epoch_ms") {
        let n = value.as_i64()?;
        return Some((stripped, format_timestamp_ms(n)));
    }
    if let Some(stripped) = strip_suffix_exact(key, "_epoch_s") {
        let n = value.as_i64()?;
        return Some((stripped, format_timestamp_ms(n.saturating_mul(1000))));
    }
    if let Some(stripped) = strip_suffix_exact(key, "_epoch_ns") {
        let n = value.as_i64()?;
        return Some((stripped, format_timestamp_ms(n.div_euclid(1_000_000))));
    }

    // Group 2: compound currency suffixes
    if let Some(stripped) = strip_suffix_exact(key, "_usd_cents") {
        let n = as_non_neg_i64(value)?;
        return Some((stripped, format!("${}.{:02}", n / 100, n % 100)));
    }
    if let Some(stripped) = strip_suffix_exact(key, "_eur_cents") {
        let n = as_non_neg_i64(value)?;
        return Some((stripped, format!("€{}.{:02}", n / 100, n % 100)));
    }
    if let Some((stripped, code)) = try_strip_generic_cents(key) {
        let n = as_non_neg_i64(value)?;
        return Some((
            stripped,
            format!("{}.{:02} {}", n / 100, n % 100, code.to_uppercase()),
        ));
    }

    // Group 3: multi-character suffixes
    if let Some(stripped) = strip_suffix_exact(key, "_rfc3339") {
        let s = value.as_str()?;
        return Some((stripped, s.to_string()));
    }
    if let Some(stripped) = strip_suffix_exact(key, "_minutes") {
        value.as_f64()?;
        return Some((stripped, format!("{} minutes", plain_scalar(value))));
    }
    if let Some(stripped) = strip_suffix_exact(key, "_hours") {
        value.as_f64()?;
        return Some((stripped, format!("{} hours", plain_scalar(value))));
    }
    if let Some(stripped) = strip_suffix_exact(key, "_days") {
        value.as_f64()?;
        return Some((stripped, format!("{} days", plain_scalar(value))));
    }

    // Group 4: single-unit suffixes
    if let Some(stripped) = strip_suffix_exact(key, "_msats") {
        value.as_f64()?;
        return Some((stripped, format!("{}msats", plain_scalar(value))));
    }
    if let Some(stripped) = strip_suffix_exact(key, "_sats") {
        value.as_f64()?;
        return Some((stripped, format!("{}sats", plain_scalar(value))));
    }
    if let Some(stripped) = strip_suffix_exact(key, "_bytes") {
        let n = value.as_i64()?;
        return Some((stripped, format_bytes_human(n)));
    }
    if let Some(stripped) = strip_suffix_exact(key, "_percent") {
        value.as_f64()?;
        return Some((stripped, format!("{}%", plain_scalar(value))));
    }
    if let Some(stripped) = strip_suffix_exact(key, SECRET_SUFFIX) {
        // Any value type, including containers.
        return Some((stripped, REDACTION_TOKEN.to_string()));
    }

    // Group 5: short suffixes, last so they cannot shadow the compounds above
    if let Some(stripped) = strip_suffix_exact(key, "_btc") {
        value.as_f64()?;
        return Some((stripped, format!("{} BTC", plain_scalar(value))));
    }
    if let Some(stripped) = strip_suffix_exact(key, "_jpy") {
        let n = as_non_neg_i64(value)?;
        return Some((stripped, format!("¥{}", format_with_commas(n as u64))));
    }
    if let Some(stripped) = strip_suffix_exact(key, "_ns") {
        value.as_f64()?;
        return Some((stripped, format!("{}ns", plain_scalar(value))));
    }
    if let Some(stripped) = strip_suffix_exact(key, "_us") {
        value.as_f64()?;
        return Some((stripped, format!("{}μs", plain_scalar(value))));
    }
    if let Some(stripped) = strip_suffix_exact(key, "_ms") {
        let formatted = format_ms_value(value)?;
        return Some((stripped, formatted));
    }
    if let Some(stripped) = strip_suffix_exact(key, "_s") {
        value.as_f64()?;
        return Some((stripped, format!("{}s", plain_scalar(value))));
    }

    None
}

/// One field of a mapping after suffix processing and collision resolution.
#[derive(Debug)]
pub(crate) struct ProcessedField<'a> {
    /// Display key: the stripped candidate, or the original on no-match or
    /// collision reversal.
    pub key: String,
    /// The raw value, always available for unformatted rendering.
    pub value: &'a Value,
    /// The formatted string, when a suffix matched and survived collisions.
    pub formatted: Option<String>,
}

/// Processes all fields of one mapping: strip keys, format values, revert
/// colliding fields, and sort siblings by display key.
///
/// When two or more original keys strip to the same candidate, every
/// contributing field whose original key differs from the candidate reverts
/// to its original key and raw value, so no information is silently merged
/// away.
pub(crate) fn process_fields(map: &crate::Map) -> Vec<ProcessedField<'_>> {
    struct Entry<'a> {
        stripped: String,
        original: &'a str,
        value: &'a Value,
        formatted: Option<String>,
    }

    let mut entries: Vec<Entry<'_>> = Vec::with_capacity(map.len());
    for (k, v) in map.iter() {
        match process_field(k, v) {
            Some((stripped, formatted)) => entries.push(Entry {
                stripped,
                original: k,
                value: v,
                formatted: Some(formatted),
            }),
            None => entries.push(Entry {
                stripped: k.clone(),
                original: k,
                value: v,
                formatted: None,
            }),
        }
    }

    let mut counts: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();
    for e in &entries {
        *counts.entry(e.stripped.as_str()).or_insert(0) += 1;
    }

    let mut result: Vec<ProcessedField<'_>> = entries
        .iter()
        .map(|e| {
            let collided = counts[e.stripped.as_str()] > 1 && e.original != e.stripped;
            if collided {
                ProcessedField {
                    key: e.original.to_string(),
                    value: e.value,
                    formatted: None,
                }
            } else {
                ProcessedField {
                    key: e.stripped.clone(),
                    value: e.value,
                    formatted: e.formatted.clone(),
                }
            }
        })
        .collect();

    result.sort_by(|a, b| compare_keys(&a.key, &b.key));
    result
}

/// Compares two keys by UTF-16 code unit order (JCS, RFC 8785).
///
/// This is the sibling ordering rule for both human-readable forms. For
/// ASCII-only keys it coincides with bytewise ascending sort; outside the
/// basic plane, surrogate expansion makes the order identical across
/// ecosystems whose native strings are UTF-16.
///
/// # Examples
///
/// ```rust
/// use std::cmp::Ordering;
/// use serde_afd::compare_keys;
///
/// assert_eq!(compare_keys("alpha", "beta"), Ordering::Less);
/// assert_eq!(compare_keys("a", "ab"), Ordering::Less);
/// ```
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    a.encode_utf16().cmp(b.encode_utf16())
}

// ── Formatting helpers ──────────────────────────────────────────────

/// Renders a scalar for unquoted display: strings bare, null as `null`,
/// numbers via their Display form (whole floats print without a fraction).
pub(crate) fn plain_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Formats a `_ms` value: below one second stays in milliseconds, one
/// second and above converts to seconds.
fn format_ms_value(value: &Value) -> Option<String> {
    let n = value.as_f64()?;
    if n.abs() >= 1000.0 {
        Some(format_ms_as_seconds(n))
    } else {
        Some(format!("{}ms", plain_scalar(value)))
    }
}

/// Formats milliseconds as seconds: three decimals, trailing zeros trimmed,
/// at least one decimal kept.
fn format_ms_as_seconds(ms: f64) -> String {
    let formatted = format!("{:.3}", ms / 1000.0);
    let trimmed = formatted.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{}0s", trimmed)
    } else {
        format!("{}s", trimmed)
    }
}

/// Converts signed unix milliseconds to a fixed-width UTC timestamp with
/// millisecond precision. Negative values render pre-1970 dates. Falls back
/// to the raw number if the instant is outside chrono's representable range.
fn format_timestamp_ms(ms: i64) -> String {
    let secs = ms.div_euclid(1000);
    let nanos = (ms.rem_euclid(1000) * 1_000_000) as u32;
    match DateTime::from_timestamp(secs, nanos) {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => ms.to_string(),
    }
}

/// Formats a byte count as a human-readable size with binary units and one
/// decimal above the bytes tier. The sign is preserved.
fn format_bytes_human(bytes: i64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;
    const TB: f64 = GB * 1024.0;

    let sign = if bytes < 0 { "-" } else { "" };
    let b = (bytes as f64).abs();
    if b >= TB {
        format!("{sign}{:.1}TB", b / TB)
    } else if b >= GB {
        format!("{sign}{:.1}GB", b / GB)
    } else if b >= MB {
        format!("{sign}{:.1}MB", b / MB)
    } else if b >= KB {
        format!("{sign}{:.1}KB", b / KB)
    } else {
        format!("{bytes}B")
    }
}

/// Formats an integer with thousands separators.
fn format_with_commas(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

fn as_non_neg_i64(value: &Value) -> Option<i64> {
    match value.as_i64() {
        Some(n) if n >= 0 => Some(n),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::afd;

    fn field(key: &str, value: Value) -> Option<(String, String)> {
        process_field(key, &value)
    }

    #[test]
    fn duration_units() {
        assert_eq!(
            field("gc_pause_ns", Value::from(450_000)),
            Some(("gc_pause".into(), "450000ns".into()))
        );
        assert_eq!(
            field("query_us", Value::from(830)),
            Some(("query".into(), "830μs".into()))
        );
        assert_eq!(
            field("timeout_s", Value::from(30)),
            Some(("timeout".into(), "30s".into()))
        );
        assert_eq!(
            field("uptime_days", Value::from(14)),
            Some(("uptime".into(), "14 days".into()))
        );
        assert_eq!(
            field("window_minutes", Value::from(5)),
            Some(("window".into(), "5 minutes".into()))
        );
        assert_eq!(
            field("ttl_hours", Value::from(2.5)),
            Some(("ttl".into(), "2.5 hours".into()))
        );
    }

    #[test]
    fn ms_below_one_second_stays_ms() {
        assert_eq!(
            field("latency_ms", Value::from(42)),
            Some(("latency".into(), "42ms".into()))
        );
    }

    #[test]
    fn ms_at_and_above_one_second_converts() {
        assert_eq!(
            field("latency_ms", Value::from(1280)),
            Some(("latency".into(), "1.28s".into()))
        );
        assert_eq!(
            field("latency_ms", Value::from(1000)),
            Some(("latency".into(), "1.0s".into()))
        );
        assert_eq!(
            field("latency_ms", Value::from(1001)),
            Some(("latency".into(), "1.001s".into()))
        );
        assert_eq!(
            field("latency_ms", Value::from(2500)),
            Some(("latency".into(), "2.5s".into()))
        );
        // negative durations keep their sign
        assert_eq!(
            field("drift_ms", Value::from(-1280)),
            Some(("drift".into(), "-1.28s".into()))
        );
    }

    #[test]
    fn epoch_suffixes_render_utc_timestamps() {
        assert_eq!(
            field("created_at_epoch_ms", Value::from(0)),
            Some(("created_at".into(), "1970-01-01T00:00:00.000Z".into()))
        );
        assert_eq!(
            field("created_at_epoch_s", Value::from(1)),
            Some(("created_at".into(), "1970-01-01T00:00:01.000Z".into()))
        );
        assert_eq!(
            field("created_at_epoch_ns", Value::from(1_500_000i64)),
            Some(("created_at".into(), "1970-01-01T00:00:00.001Z".into()))
        );
        // negative epochs land before 1970
        assert_eq!(
            field("born_epoch_ms", Value::from(-1)),
            Some(("born".into(), "1969-12-31T23:59:59.999Z".into()))
        );
    }

    #[test]
    fn epoch_guard_requires_integer() {
        assert_eq!(field("t_epoch_ms", Value::from(1.5)), None);
        assert_eq!(field("t_epoch_ms", Value::from("now")), None);
        // whole floats are accepted as integers
        assert!(field("t_epoch_ms", Value::from(1000.0)).is_some());
    }

    #[test]
    fn epoch_seconds_not_consumed_by_short_s() {
        // A guard failure on _epoch_s must not fall through to _s.
        assert_eq!(field("t_epoch_s", Value::from("soon")), None);
    }

    #[test]
    fn rfc3339_passthrough_requires_string() {
        assert_eq!(
            field("seen_rfc3339", Value::from("2026-02-07T00:00:00Z")),
            Some(("seen".into(), "2026-02-07T00:00:00Z".into()))
        );
        assert_eq!(field("seen_rfc3339", Value::from(5)), None);
    }

    #[test]
    fn bytes_scaling() {
        assert_eq!(
            field("size_bytes", Value::from(512)),
            Some(("size".into(), "512B".into()))
        );
        assert_eq!(
            field("size_bytes", Value::from(456_789)),
            Some(("size".into(), "446.1KB".into()))
        );
        assert_eq!(
            field("size_bytes", Value::from(5_242_880)),
            Some(("size".into(), "5.0MB".into()))
        );
        assert_eq!(
            field("size_bytes", Value::from(-5_242_880)),
            Some(("size".into(), "-5.0MB".into()))
        );
        assert_eq!(
            field("size_bytes", Value::from(1_099_511_627_776i64)),
            Some(("size".into(), "1.0TB".into()))
        );
    }

    #[test]
    fn percent_and_bitcoin_units() {
        assert_eq!(
            field("cpu_percent", Value::from(93.5)),
            Some(("cpu".into(), "93.5%".into()))
        );
        assert_eq!(
            field("fee_msats", Value::from(1500)),
            Some(("fee".into(), "1500msats".into()))
        );
        assert_eq!(
            field("fee_sats", Value::from(21)),
            Some(("fee".into(), "21sats".into()))
        );
        assert_eq!(
            field("balance_btc", Value::from(0.5)),
            Some(("balance".into(), "0.5 BTC".into()))
        );
    }

    #[test]
    fn currency_cents() {
        assert_eq!(
            field("price_usd_cents", Value::from(1999)),
            Some(("price".into(), "$19.99".into()))
        );
        assert_eq!(
            field("price_eur_cents", Value::from(50)),
            Some(("price".into(), "€0.50".into()))
        );
        assert_eq!(
            field("fare_thb_cents", Value::from(12345)),
            Some(("fare".into(), "123.45 THB".into()))
        );
        // negative amounts fail the non-negative guard
        assert_eq!(field("price_usd_cents", Value::from(-1)), None);
        // bare _cents with no code segment does not match
        assert_eq!(field("price_cents", Value::from(100)), None);
    }

    #[test]
    fn yen_thousands_grouping() {
        assert_eq!(
            field("price_jpy", Value::from(1500)),
            Some(("price".into(), "¥1,500".into()))
        );
        assert_eq!(
            field("price_jpy", Value::from(999)),
            Some(("price".into(), "¥999".into()))
        );
        assert_eq!(field("price_jpy", Value::from(-1)), None);
    }

    #[test]
    fn secret_matches_any_value_type() {
        assert_eq!(
            field("api_key_secret", Value::from("sk-123")),
            Some(("api_key".into(), "***".into()))
        );
        assert_eq!(
            field("count_secret", Value::from(42)),
            Some(("count".into(), "***".into()))
        );
        assert_eq!(
            field("nested_secret", afd!({"inner": 1})),
            Some(("nested".into(), "***".into()))
        );
    }

    #[test]
    fn uppercase_suffixes_match_lowercase_mixed_do_not() {
        assert_eq!(
            field("LATENCY_MS", Value::from(42)),
            Some(("LATENCY".into(), "42ms".into()))
        );
        assert_eq!(
            field("API_KEY_SECRET", Value::from("x")),
            Some(("API_KEY".into(), "***".into()))
        );
        assert_eq!(field("latency_Ms", Value::from(42)), None);
    }

    #[test]
    fn guard_failure_does_not_fall_through() {
        // _bytes guard fails on a string; the key must not be re-matched
        // against the shorter _s suffix.
        assert_eq!(field("size_bytes", Value::from("big")), None);
    }

    #[test]
    fn no_suffix_no_match() {
        assert_eq!(field("plain_key", Value::from(1)), None);
        assert_eq!(field("", Value::from(1)), None);
    }

    #[test]
    fn collision_reverts_both_fields() {
        let map = match afd!({"size_bytes": 5242880, "size_human": "5 MB", "size_ms": 10}) {
            Value::Object(m) => m,
            _ => unreachable!(),
        };
        // size_bytes and size_ms both strip to "size"; size_human does not
        // strip at all, so it keeps its key.
        let fields = process_fields(&map);
        let keys: Vec<&str> = fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["size_bytes", "size_human", "size_ms"]);
        assert!(fields.iter().all(|f| f.formatted.is_none()));
    }

    #[test]
    fn unsuffixed_field_sharing_candidate_is_untouched() {
        let map = match afd!({"size": "raw", "size_bytes": 1024}) {
            Value::Object(m) => m,
            _ => unreachable!(),
        };
        let fields = process_fields(&map);
        let keys: Vec<&str> = fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["size", "size_bytes"]);
        // the suffixed field reverted; the plain one never had formatting
        assert!(fields.iter().all(|f| f.formatted.is_none()));
    }

    #[test]
    fn compare_keys_ascii_matches_byte_order() {
        let mut keys = vec!["b", "a", "ab", "A", "z", ""];
        keys.sort_by(|a, b| compare_keys(a, b));
        let mut bytewise = vec!["b", "a", "ab", "A", "z", ""];
        bytewise.sort();
        assert_eq!(keys, bytewise);
    }

    #[test]
    fn compare_keys_shorter_prefix_first() {
        assert_eq!(compare_keys("abc", "abcd"), Ordering::Less);
        assert_eq!(compare_keys("abcd", "abc"), Ordering::Greater);
        assert_eq!(compare_keys("abc", "abc"), Ordering::Equal);
    }

    #[test]
    fn compare_keys_surrogate_expansion() {
        // U+FF21 (fullwidth A) is a single code unit 0xFF21; U+1D400
        // (mathematical bold A) encodes as a surrogate pair starting 0xD835,
        // so it sorts first under UTF-16 code unit order despite the higher
        // scalar value.
        assert_eq!(compare_keys("\u{1D400}", "\u{FF21}"), Ordering::Less);
    }

    #[test]
    fn currency_code_extraction() {
        assert_eq!(extract_currency_code("fare_thb_cents"), Some("thb"));
        // single-letter code still needs an underscore before it
        assert_eq!(extract_currency_code("_x_cents"), Some("x"));
        assert_eq!(extract_currency_code("x_cents"), None);
        assert_eq!(extract_currency_code("cents"), None);
        assert_eq!(extract_currency_code("_cents"), None);
        assert_eq!(extract_currency_code("no_marker"), None);
    }

    #[test]
    fn cents_without_code_segment_falls_back_to_raw() {
        // "x" left after removing _cents has no underscore, so the generic
        // cents rule cannot apply and the field renders unformatted.
        assert_eq!(field("x_cents", Value::from(100)), None);
        let map = match afd!({"x_cents": 100}) {
            Value::Object(m) => m,
            _ => unreachable!(),
        };
        let fields = process_fields(&map);
        assert_eq!(fields[0].key, "x_cents");
        assert!(fields[0].formatted.is_none());
    }
}

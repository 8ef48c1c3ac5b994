//! Command-line glue: flag value parsing and the standard CLI error
//! envelope.
//!
//! These helpers sit between argument parsing and the render path. A binary
//! parses `--output` with [`parse_output`], normalizes `--log` filters with
//! [`parse_log_filters`], and on any flag error prints
//! [`build_cli_error`] through the machine form and exits with code 2.

use crate::{build_envelope, Map, OutputFormat, Result, Value};

/// Parses a `--output` flag value into an [`OutputFormat`].
///
/// On unknown values the error message is suitable for embedding in
/// [`build_cli_error`].
pub fn parse_output(s: &str) -> Result<OutputFormat> {
    s.parse()
}

/// Normalizes `--log` filter entries: trim, lowercase, drop empties,
/// deduplicate while preserving first-seen order.
///
/// Accepts pre-split entries (e.g. after splitting a flag value on commas).
///
/// # Examples
///
/// ```rust
/// use serde_afd::parse_log_filters;
///
/// let filters = parse_log_filters(&[" HTTP ", "db", "", "http"]);
/// assert_eq!(filters, vec!["http", "db"]);
/// ```
#[must_use]
pub fn parse_log_filters(entries: &[&str]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for entry in entries {
        let s = entry.trim().to_lowercase();
        if s.is_empty() || out.contains(&s) {
            continue;
        }
        out.push(s);
    }
    out
}

/// Builds the standard CLI parse error envelope.
///
/// Print it with [`output_json`](crate::output_json) and exit with code 2.
#[must_use]
pub fn build_cli_error(message: &str) -> Value {
    let mut fields = Map::new();
    fields.insert("error_code".to_string(), Value::from("invalid_request"));
    fields.insert("error".to_string(), Value::from(message));
    fields.insert("retryable".to_string(), Value::from(false));
    let mut trace = Map::new();
    trace.insert("duration_ms".to_string(), Value::from(0));
    build_envelope("error", Value::Object(fields), Some(Value::Object(trace)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output_json;

    #[test]
    fn parse_output_accepts_the_three_forms() {
        assert_eq!(parse_output("json").unwrap(), OutputFormat::Json);
        assert_eq!(parse_output("yaml").unwrap(), OutputFormat::Yaml);
        assert_eq!(parse_output("plain").unwrap(), OutputFormat::Plain);
        assert!(parse_output("toml").is_err());
    }

    #[test]
    fn log_filters_normalize_and_dedup() {
        assert_eq!(
            parse_log_filters(&["HTTP", " db ", "http", "", "  "]),
            vec!["http", "db"]
        );
        assert!(parse_log_filters(&[]).is_empty());
    }

    #[test]
    fn cli_error_envelope_shape() {
        let envelope = build_cli_error("invalid --output format \"toml\"");
        let obj = envelope.as_object().unwrap();
        assert_eq!(obj.get("code"), Some(&Value::from("error")));
        assert_eq!(obj.get("error_code"), Some(&Value::from("invalid_request")));
        assert_eq!(obj.get("retryable"), Some(&Value::from(false)));
        let trace = obj.get("trace").unwrap().as_object().unwrap();
        assert_eq!(trace.get("duration_ms"), Some(&Value::from(0)));
    }

    #[test]
    fn cli_error_routes_through_machine_form() {
        let out = output_json(&build_cli_error("bad flag"));
        assert!(out.starts_with('{'));
        assert!(out.contains(r#""error":"bad flag""#));
        assert!(out.contains(r#""code":"error""#));
    }
}

//! The three output renderers.
//!
//! - [`output_json`]: lossless machine form, single-line JSON with original
//!   keys and raw values, secrets redacted.
//! - [`output_yaml`]: structured human form, multi-line indented YAML with
//!   suffix-stripped keys and formatted values.
//! - [`output_plain`]: single-line human form, logfmt-style `key=value`
//!   pairs with dot-joined paths.
//!
//! The machine form is the only lossless one: parsing it back yields the
//! redacted input with every original key intact. Both human forms run the
//! field processor and collision resolver at each mapping level and order
//! siblings with [`compare_keys`](crate::compare_keys).
//!
//! ```rust
//! use serde_afd::{afd, output_plain};
//!
//! let value = afd!({"latency_ms": 1280, "status": "ok"});
//! assert_eq!(output_plain(&value), "latency=1.28s status=ok");
//! ```

use crate::redact::redact;
use crate::suffix::{compare_keys, plain_scalar, process_fields};
use crate::{Number, Value};

/// Renders the lossless machine form: single-line JSON, original keys, raw
/// values, secrets redacted. No sibling sorting is applied; keys emit in
/// insertion order.
///
/// # Examples
///
/// ```rust
/// use serde_afd::{afd, output_json};
///
/// let value = afd!({"api_key_secret": "sk-123"});
/// assert_eq!(output_json(&value), r#"{"api_key_secret":"***"}"#);
/// ```
#[must_use]
pub fn output_json(value: &Value) -> String {
    let redacted = redact(value);
    let mut out = String::new();
    write_json(&redacted, &mut out);
    out
}

/// Renders the structured human form: a `---` document marker followed by
/// indented lines with suffix-stripped keys and formatted values.
///
/// Formatted values always render as quoted strings. Raw string values are
/// quoted with escaping; other raw scalars render bare. Empty containers
/// render as `{}` and `[]` markers.
///
/// # Examples
///
/// ```rust
/// use serde_afd::{afd, output_yaml};
///
/// let value = afd!({"price_jpy": 1500});
/// assert_eq!(output_yaml(&value), "---\nprice: \"¥1,500\"");
/// ```
#[must_use]
pub fn output_yaml(value: &Value) -> String {
    let mut lines = vec!["---".to_string()];
    render_yaml(value, 0, &mut lines);
    lines.join("\n")
}

/// Renders the single-line human form: suffix-stripped dot-path keys joined
/// as `key=value` pairs, sorted by full path.
///
/// Arrays of scalars join by comma; null renders as an empty value; values
/// containing a space are quoted.
#[must_use]
pub fn output_plain(value: &Value) -> String {
    let mut pairs: Vec<(String, String)> = Vec::new();
    collect_plain_pairs(value, "", &mut pairs);
    pairs.sort_by(|a, b| compare_keys(&a.0, &b.0));
    let parts: Vec<String> = pairs
        .into_iter()
        .map(|(k, v)| {
            if v.contains(' ') {
                format!("{k}=\"{v}\"")
            } else {
                format!("{k}={v}")
            }
        })
        .collect();
    parts.join(" ")
}

// ── JSON machine form ───────────────────────────────────────────────

fn write_json(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(Number::Integer(i)) => out.push_str(&i.to_string()),
        Value::Number(Number::Float(f)) => {
            // Non-finite floats have no JSON form.
            if !f.is_finite() {
                out.push_str("null");
            } else if f.fract() == 0.0 {
                // Keep a decimal point so the value parses back as a float.
                out.push_str(&format!("{f:.1}"));
            } else {
                out.push_str(&f.to_string());
            }
        }
        Value::String(s) => write_json_string(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_json(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (k, v)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_json_string(k, out);
                out.push(':');
                write_json(v, out);
            }
            out.push('}');
        }
    }
}

fn write_json_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

// ── YAML structured human form ──────────────────────────────────────

fn render_yaml(value: &Value, indent: usize, lines: &mut Vec<String>) {
    let prefix = "  ".repeat(indent);
    let map = match value.as_object() {
        Some(m) => m,
        None => {
            lines.push(format!("{prefix}{}", yaml_scalar(value)));
            return;
        }
    };

    for pf in process_fields(map) {
        if let Some(formatted) = &pf.formatted {
            lines.push(format!(
                "{prefix}{}: \"{}\"",
                pf.key,
                escape_yaml_str(formatted)
            ));
            continue;
        }
        match pf.value {
            Value::Object(obj) => {
                if obj.is_empty() {
                    lines.push(format!("{prefix}{}: {{}}", pf.key));
                } else {
                    lines.push(format!("{prefix}{}:", pf.key));
                    render_yaml(pf.value, indent + 1, lines);
                }
            }
            Value::Array(items) => {
                if items.is_empty() {
                    lines.push(format!("{prefix}{}: []", pf.key));
                } else {
                    lines.push(format!("{prefix}{}:", pf.key));
                    for item in items {
                        if item.is_object() {
                            lines.push(format!("{prefix}  -"));
                            render_yaml(item, indent + 2, lines);
                        } else {
                            lines.push(format!("{prefix}  - {}", yaml_scalar(item)));
                        }
                    }
                }
            }
            other => {
                lines.push(format!("{prefix}{}: {}", pf.key, yaml_scalar(other)));
            }
        }
    }
}

fn escape_yaml_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

fn yaml_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", escape_yaml_str(s)),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => format!("\"{}\"", escape_yaml_str(&other.to_string())),
    }
}

// ── Plain single-line human form ────────────────────────────────────

fn collect_plain_pairs(value: &Value, prefix: &str, pairs: &mut Vec<(String, String)>) {
    let map = match value.as_object() {
        Some(m) => m,
        None => return,
    };
    for pf in process_fields(map) {
        let full_key = if prefix.is_empty() {
            pf.key.clone()
        } else {
            format!("{prefix}.{}", pf.key)
        };
        if let Some(formatted) = pf.formatted {
            pairs.push((full_key, formatted));
            continue;
        }
        match pf.value {
            Value::Object(_) => collect_plain_pairs(pf.value, &full_key, pairs),
            Value::Array(items) => {
                let joined: Vec<String> = items.iter().map(plain_scalar).collect();
                pairs.push((full_key, joined.join(",")));
            }
            Value::Null => pairs.push((full_key, String::new())),
            other => pairs.push((full_key, plain_scalar(other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::afd;

    #[test]
    fn json_preserves_insertion_order_and_raw_values() {
        let value = afd!({"zebra": 1, "alpha": 2, "latency_ms": 1280});
        assert_eq!(output_json(&value), r#"{"zebra":1,"alpha":2,"latency_ms":1280}"#);
    }

    #[test]
    fn json_redacts_secrets() {
        let value = afd!({"api_key_secret": "sk-123", "user": "alice"});
        assert_eq!(
            output_json(&value),
            r#"{"api_key_secret":"***","user":"alice"}"#
        );
    }

    #[test]
    fn json_escapes_strings() {
        let value = afd!({"msg": "line1\nline2 \"quoted\" \\ tab\t"});
        assert_eq!(
            output_json(&value),
            r#"{"msg":"line1\nline2 \"quoted\" \\ tab\t"}"#
        );
    }

    #[test]
    fn json_scalar_and_array_forms() {
        assert_eq!(output_json(&Value::Null), "null");
        assert_eq!(output_json(&afd!([1, "two", true, null])), r#"[1,"two",true,null]"#);
        assert_eq!(output_json(&afd!({})), "{}");
    }

    #[test]
    fn json_nonfinite_floats_become_null() {
        let value = afd!({"x": (f64::NAN), "y": (f64::INFINITY)});
        assert_eq!(output_json(&value), r#"{"x":null,"y":null}"#);
    }

    #[test]
    fn yaml_begins_with_document_marker() {
        let value = afd!({"status": "ok"});
        assert_eq!(output_yaml(&value), "---\nstatus: \"ok\"");
    }

    #[test]
    fn yaml_formats_and_quotes_suffixed_values() {
        let value = afd!({"price_jpy": 1500, "latency_ms": 42});
        assert_eq!(
            output_yaml(&value),
            "---\nlatency: \"42ms\"\nprice: \"¥1,500\""
        );
    }

    #[test]
    fn yaml_raw_scalars_unquoted_except_strings() {
        let value = afd!({"count": 3, "ratio": 0.5, "on": true, "gone": null, "name": "x"});
        assert_eq!(
            output_yaml(&value),
            "---\ncount: 3\ngone: null\nname: \"x\"\non: true\nratio: 0.5"
        );
    }

    #[test]
    fn yaml_empty_container_markers() {
        let value = afd!({"obj": {}, "arr": []});
        assert_eq!(output_yaml(&value), "---\narr: []\nobj: {}");
    }

    #[test]
    fn yaml_nested_objects_indent() {
        let value = afd!({"outer": {"inner_ms": 1280}});
        assert_eq!(output_yaml(&value), "---\nouter:\n  inner: \"1.28s\"");
    }

    #[test]
    fn yaml_array_of_scalars_and_objects() {
        let value = afd!({"items": [1, {"n_ms": 42}]});
        assert_eq!(
            output_yaml(&value),
            "---\nitems:\n  - 1\n  -\n    n: \"42ms\""
        );
    }

    #[test]
    fn plain_flattens_with_dot_paths() {
        let value = afd!({"request": {"latency_ms": 1280, "path": "/health"}});
        assert_eq!(
            output_plain(&value),
            "request.latency=1.28s request.path=/health"
        );
    }

    #[test]
    fn plain_sorts_all_pairs_by_full_path() {
        let value = afd!({"z": 1, "a": {"b": 2}, "m": 3});
        assert_eq!(output_plain(&value), "a.b=2 m=3 z=1");
    }

    #[test]
    fn plain_quotes_values_with_spaces() {
        let value = afd!({"msg": "hello world", "n": 1});
        assert_eq!(output_plain(&value), "msg=\"hello world\" n=1");
    }

    #[test]
    fn plain_null_renders_empty_and_arrays_join() {
        let value = afd!({"gone": null, "tags": ["a", "b", "c"]});
        assert_eq!(output_plain(&value), "gone= tags=a,b,c");
    }

    #[test]
    fn plain_secret_redacted() {
        let value = afd!({"api_key_secret": "sk-123"});
        assert_eq!(output_plain(&value), "api_key=***");
    }

    #[test]
    fn plain_negative_bytes_strip() {
        let value = afd!({"file_size_bytes": (-5242880)});
        assert_eq!(output_plain(&value), "file_size=-5.0MB");
    }

    #[test]
    fn plain_non_object_input_is_empty() {
        assert_eq!(output_plain(&Value::from(42)), "");
    }

    #[test]
    fn collision_renders_original_keys_raw_in_both_human_forms() {
        let value = afd!({"size_bytes": 5242880, "size_ms": 10});
        assert_eq!(
            output_plain(&value),
            "size_bytes=5242880 size_ms=10"
        );
        assert_eq!(
            output_yaml(&value),
            "---\nsize_bytes: 5242880\nsize_ms: 10"
        );
    }
}

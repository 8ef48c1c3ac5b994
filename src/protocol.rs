//! Protocol envelope builders.
//!
//! Tools speaking the agent protocol wrap every response in an envelope with
//! a `code` field before rendering: `{"code": "ok", "result": ...}` on
//! success, `{"code": "error", "error": "..."}` on failure, with an optional
//! `trace` mapping carrying execution metadata. The renderers have no
//! awareness of envelope semantics; these builders just produce ordinary
//! value trees.

use crate::{Map, Value};

/// Builds a success envelope: `{"code": "ok", "result": ..., "trace"?: ...}`.
///
/// # Examples
///
/// ```rust
/// use serde_afd::{afd, build_ok, output_json};
///
/// let envelope = build_ok(afd!({"count": 3}), None);
/// assert_eq!(output_json(&envelope), r#"{"code":"ok","result":{"count":3}}"#);
/// ```
#[must_use]
pub fn build_ok(result: Value, trace: Option<Value>) -> Value {
    let mut map = Map::new();
    map.insert("code".to_string(), Value::from("ok"));
    map.insert("result".to_string(), result);
    if let Some(trace) = trace {
        map.insert("trace".to_string(), trace);
    }
    Value::Object(map)
}

/// Builds an error envelope: `{"code": "error", "error": msg, "trace"?: ...}`.
#[must_use]
pub fn build_error(message: &str, trace: Option<Value>) -> Value {
    let mut map = Map::new();
    map.insert("code".to_string(), Value::from("error"));
    map.insert("error".to_string(), Value::from(message));
    if let Some(trace) = trace {
        map.insert("trace".to_string(), trace);
    }
    Value::Object(map)
}

/// Builds an envelope with a custom status code and arbitrary fields.
///
/// `fields` contributes its entries when it is an object; any other value is
/// ignored. The `code` entry always reflects the given status code, even if
/// `fields` carried one, and `trace` likewise wins over a field of the same
/// name.
#[must_use]
pub fn build_envelope(code: &str, fields: Value, trace: Option<Value>) -> Value {
    let mut map = Map::new();
    if let Value::Object(obj) = fields {
        map.extend(obj);
    }
    map.insert("code".to_string(), Value::from(code));
    if let Some(trace) = trace {
        map.insert("trace".to_string(), trace);
    }
    Value::Object(map)
}

/// Builds the startup diagnostic event a tool emits when startup logging is
/// enabled: `{"code": "log", "event": "startup", "config", "args", "env"}`.
///
/// Environment values routinely carry `_SECRET`-suffixed keys; the machine
/// form redacts them on render, so passing raw environment data here is
/// safe.
#[must_use]
pub fn build_startup(config: Value, args: Value, env: Value) -> Value {
    let mut fields = Map::new();
    fields.insert("event".to_string(), Value::from("startup"));
    fields.insert("config".to_string(), config);
    fields.insert("args".to_string(), args);
    fields.insert("env".to_string(), env);
    build_envelope("log", Value::Object(fields), None)
}

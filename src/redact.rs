//! Secret redaction for the lossless machine form.
//!
//! The human-readable renderers neutralize `_secret` fields through the
//! suffix table, but the JSON form emits raw values. This pass walks a value
//! tree and replaces every scalar under a secret-marked key with the
//! redaction token before emission, so secrets never reach machine output
//! either.
//!
//! Container values under a secret key are not replaced wholesale; they are
//! descended into, which redacts their scalar leaves only when those leaves
//! carry the marker themselves. The pass is idempotent: the token is a plain
//! string and re-redacting it is a no-op.

use crate::suffix::{is_secret_key, REDACTION_TOKEN};
use crate::Value;

/// Returns a copy of `value` with secret-marked scalars replaced by `***`.
///
/// # Examples
///
/// ```rust
/// use serde_afd::{afd, redact, Value};
///
/// let value = afd!({"user": "alice", "api_key_secret": "sk-123"});
/// let clean = redact(&value);
/// let obj = clean.as_object().unwrap();
/// assert_eq!(obj.get("api_key_secret"), Some(&Value::from("***")));
/// assert_eq!(obj.get("user"), Some(&Value::from("alice")));
/// ```
#[must_use]
pub fn redact(value: &Value) -> Value {
    let mut copy = value.clone();
    redact_in_place(&mut copy);
    copy
}

/// Redacts secret-marked scalars in place, avoiding a tree copy.
pub fn redact_in_place(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, v) in map.iter_mut() {
                if is_secret_key(key) && !v.is_container() {
                    *v = Value::String(REDACTION_TOKEN.to_string());
                } else {
                    redact_in_place(v);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                redact_in_place(item);
            }
        }
        _ => {}
    }
}

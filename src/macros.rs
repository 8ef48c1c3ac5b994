/// Builds a [`Value`](crate::Value) from JSON-like literal syntax.
///
/// Objects, arrays, and scalar literals nest freely; any other expression
/// falls back to [`to_value`](crate::to_value) and becomes `Null` if it
/// cannot be represented. Non-literal values (negative numbers, paths,
/// method calls) need parentheses: `afd!({"drift": (-5)})`.
///
/// # Examples
///
/// ```rust
/// use serde_afd::{afd, output_plain};
///
/// let event = afd!({
///     "status": "ok",
///     "latency_ms": 42,
///     "tags": ["auth", "v2"],
/// });
/// assert_eq!(output_plain(&event), "latency=42ms status=ok tags=auth,v2");
/// ```
#[macro_export]
macro_rules! afd {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::afd!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Map::new();
        $(
            object.insert($key.to_string(), $crate::afd!($value));
        )*
        $crate::Value::Object(object)
    }};

    // Fallback for any other expression
    ($e:expr) => {{
        $crate::to_value(&$e).unwrap_or($crate::Value::Null)
    }};
}

#[cfg(test)]
mod tests {
    use crate::{Map, Number, Value};

    #[test]
    fn primitives() {
        assert_eq!(afd!(null), Value::Null);
        assert_eq!(afd!(true), Value::Bool(true));
        assert_eq!(afd!(false), Value::Bool(false));
        assert_eq!(afd!(42), Value::Number(Number::Integer(42)));
        assert_eq!(afd!(3.5), Value::Number(Number::Float(3.5)));
        assert_eq!(afd!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn arrays() {
        assert_eq!(afd!([]), Value::Array(vec![]));
        let arr = afd!([1, "two", null]);
        match arr {
            Value::Array(vec) => {
                assert_eq!(vec.len(), 3);
                assert_eq!(vec[0], Value::Number(Number::Integer(1)));
                assert_eq!(vec[1], Value::String("two".to_string()));
                assert_eq!(vec[2], Value::Null);
            }
            _ => panic!("Expected array"),
        }
    }

    #[test]
    fn objects_preserve_insertion_order() {
        assert_eq!(afd!({}), Value::Object(Map::new()));
        let obj = afd!({
            "zebra": 1,
            "alpha": 2,
        });
        match obj {
            Value::Object(map) => {
                let keys: Vec<&str> = map.keys().map(String::as_str).collect();
                assert_eq!(keys, vec!["zebra", "alpha"]);
            }
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn parenthesized_expressions() {
        assert_eq!(afd!((-5)), Value::Number(Number::Integer(-5)));
        let n = 7;
        assert_eq!(afd!((n * 2)), Value::Number(Number::Integer(14)));
    }

    #[test]
    fn nesting() {
        let value = afd!({
            "request": {"path": "/health", "latency_ms": 42},
            "tags": [["a"], []],
        });
        let obj = match value {
            Value::Object(m) => m,
            _ => panic!("Expected object"),
        };
        assert!(obj.get("request").unwrap().is_object());
        assert_eq!(obj.get("tags").unwrap().as_array().unwrap().len(), 2);
    }
}

/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Object keys keep the order they are written in, which matters for the
/// tabular array form.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{encode, toon};
///
/// let value = toon!({
///     "id": 1,
///     "tags": ["reading", "gaming"]
/// });
/// assert_eq!(encode(&value), "id: 1\ntags[2]: reading,gaming");
/// ```
#[macro_export]
macro_rules! toon {
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

    ([ $($element:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::toon!($element)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Map::new();
        $(
            object.insert($key.to_string(), $crate::toon!($value));
        )*
        $crate::Value::Object(object)
    }};

    // Fallback for expressions: numbers, strings, variables.
    ($other:expr) => {
        $crate::to_value(&$other).unwrap_or($crate::Value::Null)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Map, Number, Value};

    #[test]
    fn primitives() {
        assert_eq!(toon!(null), Value::Null);
        assert_eq!(toon!(true), Value::Bool(true));
        assert_eq!(toon!(false), Value::Bool(false));
        assert_eq!(toon!(42), Value::Number(Number::Integer(42)));
        assert_eq!(toon!(3.5), Value::Number(Number::Float(3.5)));
        assert_eq!(toon!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn arrays() {
        assert_eq!(toon!([]), Value::Array(vec![]));
        assert_eq!(
            toon!([1, 2, 3]),
            Value::Array(vec![Value::from(1), Value::from(2), Value::from(3)])
        );
    }

    #[test]
    fn objects_keep_order() {
        assert_eq!(toon!({}), Value::Object(Map::new()));

        let value = toon!({
            "z": 1,
            "a": [true, null]
        });
        let obj = value.as_object().unwrap();
        let keys: Vec<_> = obj.keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn nesting() {
        let value = toon!({
            "user": {
                "name": "Ada",
                "scores": [1, 2]
            }
        });
        let user = value.as_object().unwrap().get("user").unwrap();
        assert_eq!(
            user.as_object().unwrap().get("name").and_then(Value::as_str),
            Some("Ada")
        );
    }
}

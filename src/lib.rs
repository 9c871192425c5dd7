//! # toon-codec
//!
//! A bidirectional codec between a JSON-compatible value model and TOON
//! (Token-Oriented Object Notation), a compact indentation-based text
//! format designed to minimize tokens when embedding structured data into
//! LLM prompts.
//!
//! ## The format in one example
//!
//! The JSON document
//!
//! ```json
//! {"users": [{"id": 1, "name": "Alice", "role": "admin"},
//!            {"id": 2, "name": "Bob", "role": "user"}]}
//! ```
//!
//! encodes as
//!
//! ```text
//! users[2]{id,name,role}:
//!   1,Alice,admin
//!   2,Bob,user
//! ```
//!
//! Nesting uses indentation instead of braces, strings are quoted only when
//! the text would otherwise be ambiguous, and every array declares its
//! length once up front. Uniform arrays of scalar-valued objects collapse
//! into the tabular form above; arrays of scalars inline onto a single line
//! (`tags[2]: reading,gaming`); everything else falls back to a `- ` list.
//!
//! ## Encoding and decoding
//!
//! ```rust
//! use toon_codec::{decode, encode, toon};
//!
//! let value = toon!({
//!     "id": 123,
//!     "name": "Ada",
//!     "tags": ["reading", "gaming"]
//! });
//!
//! let text = encode(&value);
//! assert_eq!(text, "id: 123\nname: Ada\ntags[2]: reading,gaming");
//! assert_eq!(decode(&text).unwrap(), value);
//! ```
//!
//! Rust types reach the value model through serde:
//!
//! ```rust
//! use serde::Serialize;
//! use toon_codec::{encode, to_value};
//!
//! #[derive(Serialize)]
//! struct User {
//!     id: u32,
//!     name: String,
//! }
//!
//! let value = to_value(&User { id: 1, name: "Ada".into() }).unwrap();
//! assert_eq!(encode(&value), "id: 1\nname: Ada");
//! ```
//!
//! JSON interop goes through [`serde_json::Value`] conversions in either
//! direction; object key order is preserved.
//!
//! ## Options
//!
//! [`ToonOptions`] controls the indent width, the delimiter (comma, tab, or
//! pipe), the optional `#` length marker, and strict versus lenient
//! decoding. All of them are round-trip neutral: text encoded with a given
//! set of options decodes back to the same value under those options.
//!
//! ```rust
//! use toon_codec::{decode_with_options, encode_with_options, toon, Delimiter, ToonOptions};
//!
//! let value = toon!({"items": ["a", "b,c"]});
//! let options = ToonOptions::new().with_delimiter(Delimiter::Tab);
//!
//! let text = encode_with_options(&value, &options);
//! assert_eq!(text, "items[2\t]: a\tb,c");
//! assert_eq!(decode_with_options(&text, &options).unwrap(), value);
//! ```
//!
//! ## Guarantees
//!
//! - Pure, synchronous transformations: no I/O, no shared state, safe to
//!   call concurrently on disjoint inputs.
//! - O(input) time and O(tree) memory in both directions.
//! - Strict decoding is all-or-nothing; lenient decoding degrades malformed
//!   nodes to null instead of failing.

mod decode;
mod encode;
pub mod error;
mod format;
mod macros;
pub mod map;
mod normalize;
pub mod options;
pub mod value;

pub use error::{Error, Result};
pub use map::Map;
pub use normalize::to_value;
pub use options::{Delimiter, ToonOptions};
pub use value::{Number, Value};

/// Encodes a value as TOON text with default options.
///
/// Encoding is infallible for in-model values: non-finite numbers have
/// already been normalized to null by the `Value` constructors, and every
/// remaining value has a textual form.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{encode, toon};
///
/// let value = toon!({"id": 1, "name": "Ada"});
/// assert_eq!(encode(&value), "id: 1\nname: Ada");
/// ```
#[must_use]
pub fn encode(value: &Value) -> String {
    encode::encode(value, &ToonOptions::default())
}

/// Encodes a value as TOON text with the given options.
#[must_use]
pub fn encode_with_options(value: &Value, options: &ToonOptions) -> String {
    encode::encode(value, options)
}

/// Decodes TOON text into a [`Value`] with default options.
///
/// Empty or blank input decodes to [`Value::Null`].
///
/// # Examples
///
/// ```rust
/// use toon_codec::{decode, Value};
///
/// let value = decode("id: 123\nname: Ada").unwrap();
/// let obj = value.as_object().unwrap();
/// assert_eq!(obj.get("id").and_then(Value::as_i64), Some(123));
/// ```
///
/// # Errors
///
/// In strict mode (the default), malformed headers, unexpected root
/// indentation, header decoration that contradicts the options, and
/// invalid escapes are errors carrying the offending line number.
#[must_use = "this returns the decoded value, errors must be handled"]
pub fn decode(input: &str) -> Result<Value> {
    decode::decode(input, &ToonOptions::default())
}

/// Decodes TOON text into a [`Value`] with the given options.
#[must_use = "this returns the decoded value, errors must be handled"]
pub fn decode_with_options(input: &str, options: &ToonOptions) -> Result<Value> {
    decode::decode(input, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_round_trip() {
        let value = toon!({
            "id": 123,
            "name": "Ada",
            "active": true,
            "tags": ["reading", "gaming"]
        });

        let text = encode(&value);
        assert_eq!(decode(&text).unwrap(), value);
    }

    #[test]
    fn blank_input_decodes_to_null() {
        assert_eq!(decode("").unwrap(), Value::Null);
        assert_eq!(decode("   \n  ").unwrap(), Value::Null);
    }

    #[test]
    fn empty_root_object_encodes_to_empty_string() {
        assert_eq!(encode(&Value::Object(Map::new())), "");
    }

    #[test]
    fn options_round_trip_each_delimiter() {
        let value = toon!({"items": ["a", "b,c", "d|e"]});
        for delimiter in [Delimiter::Comma, Delimiter::Tab, Delimiter::Pipe] {
            let options = ToonOptions::new().with_delimiter(delimiter);
            let text = encode_with_options(&value, &options);
            assert_eq!(
                decode_with_options(&text, &options).unwrap(),
                value,
                "delimiter {:?}",
                delimiter
            );
        }
    }
}

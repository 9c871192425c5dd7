use num_bigint::BigInt;
use toon_codec::{
    decode, decode_with_options, toon, Delimiter, Error, Number, ToonOptions, Value,
};

mod primitives {
    use super::*;

    #[test]
    fn decodes_null() {
        assert_eq!(decode("null").unwrap(), Value::Null);
    }

    #[test]
    fn decodes_blank_input_as_null() {
        assert_eq!(decode("").unwrap(), Value::Null);
        assert_eq!(decode(" \n \n").unwrap(), Value::Null);
    }

    #[test]
    fn decodes_booleans() {
        assert_eq!(decode("true").unwrap(), Value::Bool(true));
        assert_eq!(decode("false").unwrap(), Value::Bool(false));
    }

    #[test]
    fn decodes_integers() {
        assert_eq!(decode("0").unwrap(), Value::from(0));
        assert_eq!(decode("42").unwrap(), Value::from(42));
        assert_eq!(decode("-7").unwrap(), Value::from(-7));
    }

    #[test]
    fn decodes_floats() {
        assert_eq!(decode("3.14").unwrap(), Value::from(3.14));
        assert_eq!(decode("-0.5").unwrap(), Value::from(-0.5));
    }

    #[test]
    fn decodes_out_of_range_integers_exactly() {
        assert_eq!(
            decode("18446744073709551615").unwrap(),
            Value::Number(Number::BigInt(BigInt::from(u64::MAX)))
        );
    }

    #[test]
    fn decodes_safe_strings() {
        assert_eq!(decode("hello").unwrap(), Value::from("hello"));
        assert_eq!(decode("Ada_99").unwrap(), Value::from("Ada_99"));
    }

    #[test]
    fn decodes_quoted_strings() {
        assert_eq!(decode("\"\"").unwrap(), Value::from(""));
        assert_eq!(decode("\"hello world\"").unwrap(), Value::from("hello world"));
    }

    #[test]
    fn quoted_literals_stay_strings() {
        assert_eq!(decode("\"true\"").unwrap(), Value::from("true"));
        assert_eq!(decode("\"42\"").unwrap(), Value::from("42"));
        assert_eq!(decode("\"a:b\"").unwrap(), Value::from("a:b"));
    }

    #[test]
    fn decodes_escape_sequences() {
        assert_eq!(decode("\"line1\\nline2\"").unwrap(), Value::from("line1\nline2"));
        assert_eq!(decode("\"tab\\there\"").unwrap(), Value::from("tab\there"));
        assert_eq!(decode("\"quote\\\"here\"").unwrap(), Value::from("quote\"here"));
        assert_eq!(decode("\"back\\\\slash\"").unwrap(), Value::from("back\\slash"));
    }

    #[test]
    fn tokens_outside_the_number_grammar_stay_strings() {
        // These parse as floats in Rust but are not numbers in the format.
        assert_eq!(decode("1.").unwrap(), Value::from("1."));
        assert_eq!(decode("+5").unwrap(), Value::from("+5"));
        assert_eq!(decode("1e5").unwrap(), Value::from("1e5"));
    }
}

mod objects {
    use super::*;

    #[test]
    fn decodes_simple_object() {
        let value = decode("id: 123\nname: Ada\nactive: true").unwrap();
        assert_eq!(value, toon!({"id": 123, "name": "Ada", "active": true}));
    }

    #[test]
    fn decodes_nested_objects() {
        let value = decode("name: Alice\naddress:\n  city: Springfield\n  zip: \"12345\"").unwrap();
        assert_eq!(
            value,
            toon!({"name": "Alice", "address": {"city": "Springfield", "zip": "12345"}})
        );
    }

    #[test]
    fn decodes_deeply_nested_objects() {
        let value = decode("a:\n  b:\n    c: deep").unwrap();
        assert_eq!(value, toon!({"a": {"b": {"c": "deep"}}}));
    }

    #[test]
    fn decodes_quoted_keys() {
        let value = decode("\"order:id\": 7\n\"full name\": Ada").unwrap();
        assert_eq!(value, toon!({"order:id": 7, "full name": "Ada"}));
    }

    #[test]
    fn deeper_lines_win_over_inline_values() {
        // The inline scalar is discarded when the next line nests.
        let value = decode("a: 1\n  b: 2").unwrap();
        assert_eq!(value, toon!({"a": {"b": 2}}));
    }

    #[test]
    fn collects_root_fields_after_nested_object() {
        let value = decode("a:\n  x: 1\nb: 2").unwrap();
        assert_eq!(value, toon!({"a": {"x": 1}, "b": 2}));
    }

    #[test]
    fn preserves_field_order() {
        let value = decode("z: 1\na: 2\nm: 3").unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }
}

mod primitive_arrays {
    use super::*;

    #[test]
    fn decodes_inline_array() {
        let value = decode("tags[3]: reading,gaming,coding").unwrap();
        assert_eq!(value, toon!({"tags": ["reading", "gaming", "coding"]}));
    }

    #[test]
    fn decodes_empty_array() {
        let value = decode("items[0]:").unwrap();
        assert_eq!(value, toon!({"items": []}));
    }

    #[test]
    fn decodes_mixed_primitives() {
        let value = decode("data[4]: text,42,true,null").unwrap();
        assert_eq!(value, toon!({"data": ["text", 42, true, null]}));
    }

    #[test]
    fn decodes_quoted_values() {
        let value = decode("items[3]: a,\"b,c\",\"d:e\"").unwrap();
        assert_eq!(value, toon!({"items": ["a", "b,c", "d:e"]}));
    }

    #[test]
    fn quoted_numbers_in_arrays_stay_strings() {
        let value = decode("items[2]: \"42\",\"true\"").unwrap();
        assert_eq!(value, toon!({"items": ["42", "true"]}));
    }

    #[test]
    fn decodes_values_on_a_continuation_line() {
        let value = decode("nums[2]:\n  1,2").unwrap();
        assert_eq!(value, toon!({"nums": [1, 2]}));
    }

    #[test]
    fn trailing_delimiter_yields_trailing_empty_string() {
        let value = decode("items[2]: a,b,").unwrap();
        assert_eq!(value, toon!({"items": ["a", "b", ""]}));
    }

    #[test]
    fn declared_size_is_not_validated() {
        let value = decode("items[5]: a,b").unwrap();
        assert_eq!(value, toon!({"items": ["a", "b"]}));
    }

    #[test]
    fn decodes_root_level_array() {
        assert_eq!(decode("[3]: x,y,z").unwrap(), toon!(["x", "y", "z"]));
        assert_eq!(decode("[0]:").unwrap(), toon!([]));
    }

    #[test]
    fn collects_root_fields_after_keyed_array() {
        let value = decode("tags[2]: a,b\nactive: true").unwrap();
        assert_eq!(value, toon!({"tags": ["a", "b"], "active": true}));
    }
}

mod tabular_arrays {
    use super::*;

    #[test]
    fn decodes_table() {
        let value = decode("users[2]{id,name,role}:\n  1,Alice,admin\n  2,Bob,user").unwrap();
        assert_eq!(
            value,
            toon!({
                "users": [
                    {"id": 1, "name": "Alice", "role": "admin"},
                    {"id": 2, "name": "Bob", "role": "user"}
                ]
            })
        );
    }

    #[test]
    fn handles_null_values_in_rows() {
        let value = decode("items[2]{id,value}:\n  1,null\n  2,test").unwrap();
        assert_eq!(
            value,
            toon!({"items": [{"id": 1, "value": null}, {"id": 2, "value": "test"}]})
        );
    }

    #[test]
    fn decodes_quoted_row_values() {
        let value = decode("items[2]{sku,desc}:\n  \"A,1\",cool\n  B2,\"test:value\"").unwrap();
        assert_eq!(
            value,
            toon!({"items": [{"sku": "A,1", "desc": "cool"}, {"sku": "B2", "desc": "test:value"}]})
        );
    }

    #[test]
    fn decodes_quoted_table_keys() {
        let value = decode("rows[1]{\"a,b\",plain}:\n  1,2").unwrap();
        assert_eq!(value, toon!({"rows": [{"a,b": 1, "plain": 2}]}));
    }

    #[test]
    fn decodes_single_column_table() {
        let value = decode("items[2]{id}:\n  1\n  2").unwrap();
        assert_eq!(value, toon!({"items": [{"id": 1}, {"id": 2}]}));
    }

    #[test]
    fn excess_values_drop_and_missing_values_leave_keys_absent() {
        let value = decode("items[2]{id,name}:\n  1\n  2,Bob,extra").unwrap();
        assert_eq!(value, toon!({"items": [{"id": 1}, {"id": 2, "name": "Bob"}]}));
    }

    #[test]
    fn decodes_root_level_table() {
        let value = decode("[2]{id,name}:\n  1,Alice\n  2,Bob").unwrap();
        assert_eq!(value, toon!([{"id": 1, "name": "Alice"}, {"id": 2, "name": "Bob"}]));
    }
}

mod list_arrays {
    use super::*;

    #[test]
    fn decodes_scalar_items() {
        let value = decode("items[3]:\n  - 1\n  - text\n  - true").unwrap();
        assert_eq!(value, toon!({"items": [1, "text", true]}));
    }

    #[test]
    fn decodes_object_items() {
        let input = "items[2]:\n  - id: 1\n    name: First\n  - id: 2\n    name: Second\n    extra: true";
        let value = decode(input).unwrap();
        assert_eq!(
            value,
            toon!({
                "items": [
                    {"id": 1, "name": "First"},
                    {"id": 2, "name": "Second", "extra": true}
                ]
            })
        );
    }

    #[test]
    fn decodes_mixed_items() {
        let value = decode("items[3]:\n  - 1\n  - a: 1\n  - text").unwrap();
        assert_eq!(value, toon!({"items": [1, {"a": 1}, "text"]}));
    }

    #[test]
    fn decodes_nested_object_fields_in_items() {
        let value = decode("items[1]:\n  - id: 1\n    nested:\n      x: 1").unwrap();
        assert_eq!(value, toon!({"items": [{"id": 1, "nested": {"x": 1}}]}));
    }

    #[test]
    fn decodes_table_nested_in_item() {
        let input = "data[1]:\n  - id: 1\n    points[2]{x,y}:\n      1,2\n      3,4";
        let value = decode(input).unwrap();
        assert_eq!(
            value,
            toon!({"data": [{"id": 1, "points": [{"x": 1, "y": 2}, {"x": 3, "y": 4}]}]})
        );
    }

    #[test]
    fn decodes_inline_array_on_marker_line() {
        let value = decode("items[1]:\n  - tags[2]: a,b").unwrap();
        assert_eq!(value, toon!({"items": [{"tags": ["a", "b"]}]}));
    }

    #[test]
    fn decodes_nested_keyless_arrays() {
        let value = decode("grid[2]:\n  - [2]: 1,2\n  - [1]: 3").unwrap();
        assert_eq!(value, toon!({"grid": [[1, 2], [3]]}));
    }

    #[test]
    fn container_first_fields_absorb_deeper_lines() {
        let value = decode("items[1]:\n  - meta:\n    x: 1").unwrap();
        assert_eq!(value, toon!({"items": [{"meta": {"x": 1}}]}));
    }
}

mod delimiters {
    use super::*;

    #[test]
    fn decodes_with_tab_delimiter() {
        let options = ToonOptions::new().with_delimiter(Delimiter::Tab);
        let value = decode_with_options("tags[3\t]: a\tb\tc", &options).unwrap();
        assert_eq!(value, toon!({"tags": ["a", "b", "c"]}));
    }

    #[test]
    fn decodes_with_pipe_delimiter() {
        let options = ToonOptions::new().with_delimiter(Delimiter::Pipe);
        let value = decode_with_options("tags[3|]: a|b|c", &options).unwrap();
        assert_eq!(value, toon!({"tags": ["a", "b", "c"]}));
    }

    #[test]
    fn decodes_table_with_tab_delimiter() {
        let options = ToonOptions::new().with_delimiter(Delimiter::Tab);
        let value =
            decode_with_options("users[2\t]{id\tname}:\n  1\tAlice\n  2\tBob", &options).unwrap();
        assert_eq!(
            value,
            toon!({"users": [{"id": 1, "name": "Alice"}, {"id": 2, "name": "Bob"}]})
        );
    }

    #[test]
    fn commas_are_plain_text_under_other_delimiters() {
        let options = ToonOptions::new().with_delimiter(Delimiter::Tab);
        let value = decode_with_options("items[2\t]: a,b\tc,d", &options).unwrap();
        assert_eq!(value, toon!({"items": ["a,b", "c,d"]}));
    }
}

mod length_marker {
    use super::*;

    #[test]
    fn decodes_marked_arrays() {
        let options = ToonOptions::new().with_length_marker(true);
        let value = decode_with_options("tags[#3]: a,b,c", &options).unwrap();
        assert_eq!(value, toon!({"tags": ["a", "b", "c"]}));
    }

    #[test]
    fn decodes_marked_tables() {
        let options = ToonOptions::new().with_length_marker(true);
        let value = decode_with_options("items[#2]{id}:\n  1\n  2", &options).unwrap();
        assert_eq!(value, toon!({"items": [{"id": 1}, {"id": 2}]}));
    }
}

mod strict_mode {
    use super::*;

    #[test]
    fn rejects_indented_root() {
        let err = decode("  a: 1").unwrap_err();
        assert!(matches!(err, Error::UnexpectedIndent { line: 1 }));
    }

    #[test]
    fn rejects_malformed_headers() {
        let err = decode("[abc]: x").unwrap_err();
        assert!(matches!(err, Error::MalformedHeader { line: 1, .. }));

        let err = decode("[2] x").unwrap_err();
        assert!(matches!(err, Error::MalformedHeader { line: 1, .. }));
    }

    #[test]
    fn unclosed_brackets_are_not_headers() {
        // Without a closing bracket the line is just text.
        assert_eq!(decode("items[2").unwrap(), Value::from("items[2"));
    }

    #[test]
    fn rejects_unexpected_length_marker() {
        let err = decode("tags[#3]: a,b,c").unwrap_err();
        assert!(matches!(err, Error::HeaderMismatch { line: 1, .. }));
    }

    #[test]
    fn rejects_missing_length_marker() {
        let options = ToonOptions::new().with_length_marker(true);
        let err = decode_with_options("tags[3]: a,b,c", &options).unwrap_err();
        assert!(matches!(err, Error::HeaderMismatch { line: 1, .. }));
    }

    #[test]
    fn rejects_mismatched_delimiter_indicator() {
        let err = decode("tags[3|]: a|b|c").unwrap_err();
        assert!(matches!(err, Error::HeaderMismatch { line: 1, .. }));

        let options = ToonOptions::new().with_delimiter(Delimiter::Pipe);
        let err = decode_with_options("tags[3]: a,b", &options).unwrap_err();
        assert!(matches!(err, Error::HeaderMismatch { line: 1, .. }));
    }

    #[test]
    fn rejects_invalid_escapes() {
        let err = decode("note: \"a\\qb\"").unwrap_err();
        assert!(matches!(err, Error::InvalidEscape { escape: 'q', .. }));
    }

    #[test]
    fn errors_carry_the_offending_line() {
        let err = decode("ok: 1\nbad[#2]: a,b").unwrap_err();
        assert_eq!(err.line(), Some(2));
    }
}

mod lenient_mode {
    use super::*;

    fn lenient() -> ToonOptions {
        ToonOptions::new().lenient()
    }

    #[test]
    fn indented_root_degrades_to_null() {
        assert_eq!(decode_with_options("  a: 1", &lenient()).unwrap(), Value::Null);
    }

    #[test]
    fn malformed_header_degrades_to_null() {
        assert_eq!(decode_with_options("[abc]: x", &lenient()).unwrap(), Value::Null);
    }

    #[test]
    fn tolerates_header_decoration_mismatches() {
        let value = decode_with_options("tags[#3]: a,b,c", &lenient()).unwrap();
        assert_eq!(value, toon!({"tags": ["a", "b", "c"]}));

        // The configured delimiter still drives the split.
        let value = decode_with_options("tags[2|]: a|b", &lenient()).unwrap();
        assert_eq!(value, toon!({"tags": ["a|b"]}));
    }

    #[test]
    fn unknown_escapes_emit_the_raw_character() {
        let value = decode_with_options("note: \"a\\qb\"", &lenient()).unwrap();
        assert_eq!(value, toon!({"note": "aqb"}));
    }
}

mod indentation {
    use super::*;

    #[test]
    fn decodes_custom_indent_width() {
        let options = ToonOptions::new().with_indent(4);
        let value = decode_with_options("outer:\n    value: 1", &options).unwrap();
        assert_eq!(value, toon!({"outer": {"value": 1}}));
    }
}

mod complex_structures {
    use super::*;

    #[test]
    fn decodes_mixed_nesting() {
        let input = "user:\n  id: 123\n  name: Ada\n  tags[2]: reading,gaming\n  active: true";
        let value = decode(input).unwrap();
        assert_eq!(
            value,
            toon!({
                "user": {
                    "id": 123,
                    "name": "Ada",
                    "tags": ["reading", "gaming"],
                    "active": true
                }
            })
        );
    }
}

//! TOON encoding.
//!
//! The encoder walks a [`Value`] tree and emits complete output lines,
//! carrying only the current depth and an optional key context. Arrays are
//! classified into one of three physical shapes before emission:
//!
//! - **tabular** for uniform arrays of scalar-valued objects, which declare
//!   their keys once in the header and then emit one delimited row per
//!   element;
//! - **primitive** for arrays of scalars, emitted inline on the header line;
//! - **list** for everything else, one `- ` item per element.

use crate::format::{format_key, format_string_value};
use crate::{Map, ToonOptions, Value};

/// Encodes `value` as TOON text.
pub(crate) fn encode(value: &Value, options: &ToonOptions) -> String {
    let mut writer = LineWriter::new(options.indent.max(1));
    encode_value(value, &mut writer, 0, options, None);
    writer.into_string()
}

/// Accumulates indented output lines into a single buffer.
struct LineWriter {
    out: String,
    indent: usize,
    first: bool,
}

impl LineWriter {
    fn new(indent: usize) -> Self {
        LineWriter {
            out: String::with_capacity(256),
            indent,
            first: true,
        }
    }

    fn write_line(&mut self, depth: usize, content: &str) {
        if !self.first {
            self.out.push('\n');
        }
        self.first = false;
        for _ in 0..depth * self.indent {
            self.out.push(' ');
        }
        self.out.push_str(content);
    }

    fn into_string(self) -> String {
        self.out
    }
}

fn encode_value(
    value: &Value,
    writer: &mut LineWriter,
    depth: usize,
    options: &ToonOptions,
    key: Option<&str>,
) {
    match value {
        Value::Array(array) => encode_array(array, writer, depth, options, key),
        Value::Object(map) => encode_object(map, writer, depth, options, key),
        scalar => write_primitive(writer, depth, key, &format_scalar(scalar, options)),
    }
}

fn write_primitive(writer: &mut LineWriter, depth: usize, key: Option<&str>, value: &str) {
    match key {
        Some(key) => writer.write_line(depth, &format!("{}: {}", key, value)),
        None => writer.write_line(depth, value),
    }
}

/// Formats a scalar for inline positions (primitive arrays, tabular rows,
/// list items, and the value side of `key: value` lines).
fn format_scalar(value: &Value, options: &ToonOptions) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format_string_value(s, options.delimiter.as_char()).into_owned(),
        // Containers never reach inline positions; shape detection routes
        // them elsewhere. An empty object degrades to null.
        Value::Array(_) | Value::Object(_) => "null".to_string(),
    }
}

fn encode_object(
    map: &Map,
    writer: &mut LineWriter,
    depth: usize,
    options: &ToonOptions,
    key: Option<&str>,
) {
    if map.is_empty() {
        if let Some(key) = key {
            writer.write_line(depth, &format!("{}:", key));
        }
        return;
    }

    let mut depth = depth;
    if let Some(key) = key {
        writer.write_line(depth, &format!("{}:", key));
        depth += 1;
    }

    for (name, value) in map.iter() {
        let formatted = format_key(name);
        encode_value(value, writer, depth, options, Some(&formatted));
    }
}

fn encode_array(
    array: &[Value],
    writer: &mut LineWriter,
    depth: usize,
    options: &ToonOptions,
    key: Option<&str>,
) {
    if let Some(keys) = detect_tabular(array) {
        encode_tabular_array(array, &keys, writer, depth, options, key);
        return;
    }

    if array.iter().all(Value::is_scalar) {
        encode_primitive_array(array, writer, depth, options, key);
        return;
    }

    encode_list_array(array, writer, depth, options, key);
}

/// `[size]`, `[#size]`, `[size|]`, `[#size\t]`, ... The delimiter indicator
/// is omitted for comma.
fn array_header(size: usize, options: &ToonOptions) -> String {
    let marker = if options.length_marker { "#" } else { "" };
    let delimiter = match options.delimiter {
        crate::Delimiter::Comma => "",
        other => other.as_str(),
    };
    format!("[{}{}{}]", marker, size, delimiter)
}

fn encode_primitive_array(
    array: &[Value],
    writer: &mut LineWriter,
    depth: usize,
    options: &ToonOptions,
    key: Option<&str>,
) {
    let header = array_header(array.len(), options);
    let line = if array.is_empty() {
        format!("{}:", header)
    } else {
        let values: Vec<String> = array.iter().map(|v| format_scalar(v, options)).collect();
        format!("{}: {}", header, values.join(options.delimiter.as_str()))
    };

    match key {
        Some(key) => writer.write_line(depth, &format!("{}{}", key, line)),
        None => writer.write_line(depth, &line),
    }
}

fn encode_tabular_array(
    array: &[Value],
    keys: &[String],
    writer: &mut LineWriter,
    depth: usize,
    options: &ToonOptions,
    key: Option<&str>,
) {
    let delimiter = options.delimiter.as_str();
    let formatted_keys: Vec<String> = keys.iter().map(|k| format_key(k).into_owned()).collect();
    let header = format!(
        "{}{{{}}}:",
        array_header(array.len(), options),
        formatted_keys.join(delimiter)
    );

    match key {
        Some(key) => writer.write_line(depth, &format!("{}{}", key, header)),
        None => writer.write_line(depth, &header),
    }

    for element in array {
        let Value::Object(obj) = element else {
            continue;
        };
        let row: Vec<String> = keys
            .iter()
            .map(|k| format_scalar(obj.get(k).unwrap_or(&Value::Null), options))
            .collect();
        writer.write_line(depth + 1, &row.join(delimiter));
    }
}

fn encode_list_array(
    array: &[Value],
    writer: &mut LineWriter,
    depth: usize,
    options: &ToonOptions,
    key: Option<&str>,
) {
    let header = array_header(array.len(), options);
    match key {
        Some(key) => writer.write_line(depth, &format!("{}{}:", key, header)),
        None => writer.write_line(depth, &format!("{}:", header)),
    }

    for item in array {
        match item {
            Value::Object(obj) if !obj.is_empty() => {
                encode_list_item(obj, writer, depth + 1, options);
            }
            // A nested array fuses the list marker with its own header
            // ("- [2]: 1,2") and indents any body one level further.
            Value::Array(inner) => encode_array(inner, writer, depth + 1, options, Some("- ")),
            other => {
                writer.write_line(depth + 1, &format!("- {}", format_scalar(other, options)));
            }
        }
    }
}

/// Emits one object list item: the first field shares the `- ` line, the
/// remaining fields sit one level deeper.
fn encode_list_item(obj: &Map, writer: &mut LineWriter, depth: usize, options: &ToonOptions) {
    let mut first = true;
    for (name, value) in obj.iter() {
        let key = format_key(name);
        if first {
            first = false;
            if value.is_scalar() {
                let line = format!("- {}: {}", key, format_scalar(value, options));
                writer.write_line(depth, &line);
            } else {
                encode_value(value, writer, depth, options, Some(&format!("- {}", key)));
            }
        } else {
            encode_value(value, writer, depth + 1, options, Some(&key));
        }
    }
}

/// Returns the shared key list when every element is a non-empty object
/// with the first element's keys in the same insertion order and only
/// scalar values. Key-order equality is deliberate: it is what lets the
/// header speak for every row.
fn detect_tabular(array: &[Value]) -> Option<Vec<String>> {
    let Some(Value::Object(first)) = array.first() else {
        return None;
    };
    if first.is_empty() {
        return None;
    }

    let keys: Vec<&String> = first.keys().collect();

    for element in array {
        let Value::Object(obj) = element else {
            return None;
        };
        if obj.len() != keys.len() {
            return None;
        }
        if !obj.keys().zip(keys.iter()).all(|(a, &b)| a == b) {
            return None;
        }
        if !obj.values().all(Value::is_scalar) {
            return None;
        }
    }

    Some(keys.into_iter().cloned().collect())
}

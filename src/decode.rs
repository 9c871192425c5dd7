//! TOON decoding.
//!
//! The decoder splits its input on LF and walks the lines with a
//! monotonically advancing cursor; it never rewinds and looks ahead at most
//! one line (to decide between an inline scalar and a nested block).
//! Indentation depth, measured in complete runs of `indent` spaces, is the
//! only structural signal.
//!
//! Within a line, three small state machines do the context-sensitive work:
//! a delimiter splitter and a colon finder that both track quote/escape
//! state, and the unescaper for quoted tokens. Quoted tokens are carried
//! through the splitter verbatim so scalar coercion can still tell `"42"`
//! (a string) from `42` (a number).

use num_bigint::BigInt;

use crate::format::looks_like_number;
use crate::{Error, Map, Number, Result, ToonOptions, Value};

/// Decodes TOON text into a [`Value`] tree.
pub(crate) fn decode(input: &str, options: &ToonOptions) -> Result<Value> {
    let trimmed = input.trim_ascii();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }
    Parser::new(trimmed, options).parse_document()
}

/// A parsed array header: `[` `#`? digits (`\t` | `|`)? `]`.
struct ArrayHeader {
    size: usize,
    length_marker: bool,
    /// The in-bracket delimiter indicator; absent means comma.
    delimiter: Option<char>,
    /// Byte offset just past the closing `]`.
    end: usize,
}

fn match_array_header(s: &str) -> Option<ArrayHeader> {
    let b = s.as_bytes();
    if b.first() != Some(&b'[') {
        return None;
    }
    let mut i = 1;
    let length_marker = if b.get(i) == Some(&b'#') {
        i += 1;
        true
    } else {
        false
    };
    let digits_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    if i == digits_start {
        return None;
    }
    let size: usize = s[digits_start..i].parse().ok()?;
    let delimiter = match b.get(i) {
        Some(&b'\t') => {
            i += 1;
            Some('\t')
        }
        Some(&b'|') => {
            i += 1;
            Some('|')
        }
        _ => None,
    };
    if b.get(i) != Some(&b']') {
        return None;
    }
    Some(ArrayHeader {
        size,
        length_marker,
        delimiter,
        end: i + 1,
    })
}

/// Accepts what may legally follow a header's `]`: a bare `:` or a
/// `{fields}:` block.
fn is_header_tail(after: &str) -> bool {
    match after.strip_prefix('{') {
        Some(fields) => fields.rfind("}:").is_some(),
        None => after.starts_with(':'),
    }
}

/// Splits `content` into the key text and the offset of a keyed-array
/// header (`key[2]:`, `data[3]{a,b}:`), if the line is one. The `[` must
/// sit outside quotes so quoted keys containing brackets stay keys.
fn match_keyed_array(content: &str) -> Option<(&str, usize)> {
    let mut in_quotes = false;
    let mut escaped = false;
    for (idx, c) in content.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => in_quotes = !in_quotes,
            '[' if !in_quotes && idx > 0 => {
                let rest = &content[idx..];
                if let Some(header) = match_array_header(rest) {
                    if is_header_tail(&rest[header.end..]) {
                        return Some((&content[..idx], idx));
                    }
                }
            }
            _ => {}
        }
    }
    None
}

/// Returns the byte index of the first colon outside quotes, if any.
fn find_unquoted_colon(content: &str) -> Option<usize> {
    let mut in_quotes = false;
    let mut escaped = false;
    for (idx, c) in content.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => in_quotes = !in_quotes,
            ':' if !in_quotes => return Some(idx),
            _ => {}
        }
    }
    None
}

struct Parser<'a> {
    lines: Vec<&'a str>,
    options: &'a ToonOptions,
    delim: char,
    indent: usize,
    line: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, options: &'a ToonOptions) -> Self {
        Parser {
            lines: input.split('\n').collect(),
            options,
            delim: options.delimiter.as_char(),
            indent: options.indent.max(1),
            line: 0,
        }
    }

    /// Indentation depth: the number of complete `indent`-space runs at the
    /// start of the line.
    fn depth_of(&self, line: &str) -> usize {
        let spaces = line.bytes().take_while(|&b| b == b' ').count();
        spaces / self.indent
    }

    fn content_of(&self, line: &'a str, depth: usize) -> &'a str {
        &line[depth * self.indent..]
    }

    fn parse_document(&mut self) -> Result<Value> {
        let line = self.lines[0];
        let depth = self.depth_of(line);
        if depth > 0 {
            if self.options.strict {
                return Err(Error::unexpected_indent(1));
            }
            return Ok(Value::Null);
        }

        if line.starts_with('[') {
            return self.parse_array(line, 0);
        }

        if let Some((raw_key, offset)) = match_keyed_array(line) {
            let key = self.unquote(raw_key.trim_ascii())?;
            let array = self.parse_array(&line[offset..], 0)?;
            let mut map = Map::new();
            map.insert(key, array);
            self.parse_sibling_fields(&mut map, 0)?;
            return Ok(Value::Object(map));
        }

        if let Some(colon) = find_unquoted_colon(line).filter(|&i| i > 0) {
            let mut map = Map::new();
            self.parse_entry(&mut map, line, colon, 0)?;
            self.parse_sibling_fields(&mut map, 0)?;
            return Ok(Value::Object(map));
        }

        self.line += 1;
        self.parse_scalar(line)
    }

    /// Collects further `key: value` and keyed-array lines at exactly
    /// `depth`, stopping at the first line that is neither.
    fn parse_sibling_fields(&mut self, map: &mut Map, depth: usize) -> Result<()> {
        while self.line < self.lines.len() {
            let line = self.lines[self.line];
            if self.depth_of(line) != depth {
                break;
            }
            let content = self.content_of(line, depth);

            if let Some((raw_key, offset)) = match_keyed_array(content) {
                let key = self.unquote(raw_key.trim_ascii())?;
                let value = self.parse_array(&content[offset..], depth)?;
                map.insert(key, value);
                continue;
            }

            match find_unquoted_colon(content).filter(|&i| i > 0) {
                Some(colon) => self.parse_entry(map, content, colon, depth)?,
                None => break,
            }
        }
        Ok(())
    }

    /// Parses one `key: value` line at `depth`, probing the next line: if
    /// it is deeper, the value is a nested map and the inline text is
    /// discarded; otherwise the inline text is a scalar. Consumes every
    /// line it parses.
    fn parse_entry(
        &mut self,
        map: &mut Map,
        content: &str,
        colon: usize,
        depth: usize,
    ) -> Result<()> {
        let key = self.unquote(content[..colon].trim_ascii())?;
        let inline = content[colon + 1..].trim_ascii();

        if let Some(next) = self.lines.get(self.line + 1) {
            if self.depth_of(next) > depth {
                self.line += 1;
                let value = self.parse_nested_map(depth)?;
                map.insert(key, value);
                return Ok(());
            }
        }

        self.line += 1;
        let value = self.parse_scalar(inline)?;
        map.insert(key, value);
        Ok(())
    }

    /// Parses a map body: lines deeper than `parent_depth`, with entries at
    /// `parent_depth + 1`. Deeper lines belong to those entries and are
    /// consumed by recursion; stray lines are skipped.
    fn parse_nested_map(&mut self, parent_depth: usize) -> Result<Value> {
        let mut map = Map::new();
        self.parse_map_entries(&mut map, parent_depth)?;
        Ok(Value::Object(map))
    }

    fn parse_map_entries(&mut self, map: &mut Map, parent_depth: usize) -> Result<()> {
        while self.line < self.lines.len() {
            let line = self.lines[self.line];
            let depth = self.depth_of(line);
            if depth <= parent_depth {
                break;
            }
            if depth == parent_depth + 1 {
                let content = self.content_of(line, depth);

                if let Some((raw_key, offset)) = match_keyed_array(content) {
                    let key = self.unquote(raw_key.trim_ascii())?;
                    let value = self.parse_array(&content[offset..], depth)?;
                    map.insert(key, value);
                    continue;
                }

                if let Some(colon) = find_unquoted_colon(content).filter(|&i| i > 0) {
                    self.parse_entry(map, content, colon, depth)?;
                    continue;
                }
            }
            self.line += 1;
        }
        Ok(())
    }

    /// Parses an array whose header line sits at `depth`; `header` is the
    /// line content starting at `[`. The cursor is on the header line and
    /// ends past everything the array consumed.
    fn parse_array(&mut self, header: &str, depth: usize) -> Result<Value> {
        let Some(h) = match_array_header(header) else {
            if self.options.strict {
                return Err(Error::malformed_header(self.line + 1, header));
            }
            self.line += 1;
            return Ok(Value::Null);
        };

        if self.options.strict {
            if h.length_marker != self.options.length_marker {
                let reason = if h.length_marker {
                    "length marker present but not configured"
                } else {
                    "length marker configured but absent"
                };
                return Err(Error::header_mismatch(self.line + 1, reason));
            }
            let announced = h.delimiter.unwrap_or(',');
            if announced != self.delim {
                return Err(Error::header_mismatch(
                    self.line + 1,
                    format!("header announces {:?} delimiter", announced),
                ));
            }
        }

        let after = &header[h.end..];

        if let Some(fields) = after.strip_prefix('{') {
            let Some(end) = fields.rfind("}:") else {
                if self.options.strict {
                    return Err(Error::malformed_header(self.line + 1, header));
                }
                self.line += 1;
                return Ok(Value::Null);
            };
            let keys = self.parse_tabular_keys(&fields[..end])?;
            self.line += 1;
            return self.parse_tabular_rows(&keys, depth, h.size);
        }

        let Some(rest) = after.strip_prefix(':') else {
            if self.options.strict {
                return Err(Error::malformed_header(self.line + 1, header));
            }
            self.line += 1;
            return Ok(Value::Null);
        };

        let inline = rest.trim_ascii();
        if !inline.is_empty() {
            let values = self.parse_delimited_scalars(inline)?;
            self.line += 1;
            return Ok(Value::Array(values));
        }

        self.line += 1;
        if h.size == 0 {
            return Ok(Value::Array(Vec::new()));
        }

        let Some(&next) = self.lines.get(self.line) else {
            return Ok(Value::Array(Vec::new()));
        };
        let next_depth = self.depth_of(next);
        let next_content = self.content_of(next, next_depth);

        if next_content.starts_with("- ") {
            self.parse_list_items(depth, h.size)
        } else {
            // A single continuation line of delimited values.
            let values = self.parse_delimited_scalars(next_content)?;
            self.line += 1;
            Ok(Value::Array(values))
        }
    }

    /// Consumes tabular rows at `depth + 1`, pairing values positionally
    /// with `keys`. Excess values are dropped; missing values leave the
    /// trailing keys absent. The declared size only pre-sizes the result.
    fn parse_tabular_rows(&mut self, keys: &[String], depth: usize, size: usize) -> Result<Value> {
        // The declared size is a hint; never let it drive allocation past
        // what the remaining input could hold.
        let mut rows = Vec::with_capacity(size.min(self.lines.len() - self.line));
        while self.line < self.lines.len() {
            let line = self.lines[self.line];
            let line_depth = self.depth_of(line);
            if line_depth < depth + 1 {
                break;
            }
            if line_depth == depth + 1 {
                let content = self.content_of(line, depth + 1);
                let values = self.parse_delimited_scalars(content)?;
                let mut row = Map::with_capacity(keys.len());
                for (key, value) in keys.iter().zip(values) {
                    row.insert(key.clone(), value);
                }
                rows.push(Value::Object(row));
            }
            self.line += 1;
        }
        Ok(Value::Array(rows))
    }

    /// Consumes `- ` items at `depth + 1`.
    fn parse_list_items(&mut self, depth: usize, size: usize) -> Result<Value> {
        let mut items = Vec::with_capacity(size.min(self.lines.len() - self.line));
        while self.line < self.lines.len() {
            let line = self.lines[self.line];
            let line_depth = self.depth_of(line);
            if line_depth < depth + 1 {
                break;
            }
            if line_depth == depth + 1 {
                let content = self.content_of(line, depth + 1);
                if let Some(rest) = content.strip_prefix("- ") {
                    items.push(self.parse_list_item(rest, depth)?);
                    continue;
                }
            }
            self.line += 1;
        }
        Ok(Value::Array(items))
    }

    /// Parses one list item, whose line sits at `depth + 1`. The item is a
    /// nested array (the marker fused with a header), a map whose first
    /// entry shares the marker line, or a bare scalar. Map items collect
    /// further fields at `depth + 2`.
    fn parse_list_item(&mut self, rest: &str, depth: usize) -> Result<Value> {
        let item = rest.trim_ascii();

        if item.starts_with('[') {
            if let Some(h) = match_array_header(item) {
                if is_header_tail(&item[h.end..]) {
                    return self.parse_array(item, depth + 1);
                }
            }
        }

        if let Some((raw_key, offset)) = match_keyed_array(item) {
            let key = self.unquote(raw_key.trim_ascii())?;
            let value = self.parse_array(&item[offset..], depth + 1)?;
            let mut map = Map::new();
            map.insert(key, value);
            self.parse_map_entries(&mut map, depth + 1)?;
            return Ok(Value::Object(map));
        }

        let Some(colon) = find_unquoted_colon(item).filter(|&i| i > 0) else {
            self.line += 1;
            return self.parse_scalar(item);
        };

        let key = self.unquote(item[..colon].trim_ascii())?;
        let inline = item[colon + 1..].trim_ascii();
        let mut map = Map::new();

        // `- key:` with deeper lines: the first value is a container. Its
        // body shares depth + 2 with any remaining item fields, so the
        // container absorbs them.
        if inline.is_empty()
            && self
                .lines
                .get(self.line + 1)
                .is_some_and(|next| self.depth_of(next) > depth + 1)
        {
            self.line += 1;
            let value = self.parse_nested_map(depth + 1)?;
            map.insert(key, value);
            return Ok(Value::Object(map));
        }

        self.line += 1;
        let value = self.parse_scalar(inline)?;
        map.insert(key, value);
        self.parse_map_entries(&mut map, depth + 1)?;
        Ok(Value::Object(map))
    }

    fn parse_tabular_keys(&self, input: &str) -> Result<Vec<String>> {
        self.split_delimited(input)
            .iter()
            .map(|raw| self.unquote(raw))
            .collect()
    }

    fn parse_delimited_scalars(&self, input: &str) -> Result<Vec<Value>> {
        self.split_delimited(input)
            .iter()
            .map(|token| self.parse_scalar(token))
            .collect()
    }

    /// Splits on the configured delimiter outside quotes. Tokens keep their
    /// quotes and escapes intact for [`Parser::parse_scalar`]; only
    /// surrounding whitespace is trimmed. A trailing delimiter yields a
    /// trailing empty token.
    fn split_delimited(&self, input: &str) -> Vec<String> {
        let mut result = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        let mut escaped = false;

        for c in input.chars() {
            if escaped {
                current.push(c);
                escaped = false;
                continue;
            }
            match c {
                '\\' => {
                    escaped = true;
                    current.push(c);
                }
                '"' => {
                    in_quotes = !in_quotes;
                    current.push(c);
                }
                c if c == self.delim && !in_quotes => {
                    result.push(current.trim_ascii().to_string());
                    current = String::new();
                }
                c => current.push(c),
            }
        }

        if !current.is_empty() || input.ends_with(self.delim) {
            result.push(current.trim_ascii().to_string());
        }

        result
    }

    /// Coerces one trimmed token: literals, quoted strings, numbers (only
    /// tokens matching the shared number grammar), then the raw text.
    fn parse_scalar(&self, token: &str) -> Result<Value> {
        if token.is_empty() {
            return Ok(Value::String(String::new()));
        }
        match token {
            "null" => return Ok(Value::Null),
            "true" => return Ok(Value::Bool(true)),
            "false" => return Ok(Value::Bool(false)),
            _ => {}
        }
        if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
            return self.unquote(token).map(Value::String);
        }
        if looks_like_number(token) {
            if token.contains('.') {
                if let Ok(f) = token.parse::<f64>() {
                    return Ok(Value::from(f));
                }
            } else if let Ok(i) = token.parse::<i64>() {
                return Ok(Value::Number(Number::Integer(i)));
            } else if let Ok(big) = token.parse::<BigInt>() {
                return Ok(Value::Number(Number::BigInt(big)));
            }
        }
        Ok(Value::String(token.to_string()))
    }

    /// Strips surrounding quotes and decodes escapes; bare tokens pass
    /// through unchanged. Unknown escapes are an error in strict mode and
    /// the raw character otherwise.
    fn unquote(&self, token: &str) -> Result<String> {
        if token.len() < 2 || !(token.starts_with('"') && token.ends_with('"')) {
            return Ok(token.to_string());
        }
        let inner = &token[1..token.len() - 1];
        let mut out = String::with_capacity(inner.len());
        let mut escaped = false;
        for c in inner.chars() {
            if escaped {
                escaped = false;
                match c {
                    'n' => out.push('\n'),
                    'r' => out.push('\r'),
                    't' => out.push('\t'),
                    '"' | '\\' => out.push(c),
                    other => {
                        if self.options.strict {
                            return Err(Error::invalid_escape(self.line + 1, other));
                        }
                        out.push(other);
                    }
                }
            } else if c == '\\' {
                escaped = true;
            } else {
                out.push(c);
            }
        }
        Ok(out)
    }
}

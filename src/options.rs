//! Configuration options for TOON encoding and decoding.
//!
//! [`ToonOptions`] is the entire configurable surface of the codec:
//! indentation width, the delimiter used in inline and tabular rows, the
//! optional `#` length marker in array headers, and whether the decoder
//! rejects malformed input (`strict`) or makes best-effort progress.
//!
//! ## Examples
//!
//! ```rust
//! use toon_codec::{encode_with_options, Delimiter, ToonOptions, Value};
//!
//! let value = Value::from(vec![Value::from(1), Value::from(2)]);
//!
//! let options = ToonOptions::new().with_delimiter(Delimiter::Pipe);
//! assert_eq!(encode_with_options(&value, &options), "[2|]: 1|2");
//!
//! let options = ToonOptions::new().with_length_marker(true);
//! assert_eq!(encode_with_options(&value, &options), "[#2]: 1,2");
//! ```

/// Delimiter used in inline arrays, tabular rows, and between tabular keys.
///
/// Non-comma delimiters are announced inside the array header brackets
/// (e.g. `[3|]`), so the text carries its own delimiter indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
}

impl Delimiter {
    /// Returns the delimiter as a single character.
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }

    /// Returns the string representation of this delimiter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Delimiter::Comma => ",",
            Delimiter::Tab => "\t",
            Delimiter::Pipe => "|",
        }
    }
}

/// Options controlling TOON output and parsing.
///
/// The defaults (2-space indent, comma delimiter, no length marker, strict
/// decoding) match the format's canonical form.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{Delimiter, ToonOptions};
///
/// let options = ToonOptions::new()
///     .with_indent(4)
///     .with_delimiter(Delimiter::Tab)
///     .with_length_marker(true);
/// assert_eq!(options.indent, 4);
///
/// // Lenient decoding replaces local failures with null instead of erroring.
/// let options = ToonOptions::new().lenient();
/// assert!(!options.strict);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ToonOptions {
    /// Spaces per nesting level. Values below 1 are treated as 1.
    pub indent: usize,
    /// Separator for inline values, tabular rows, and tabular key lists.
    pub delimiter: Delimiter,
    /// Prefix array sizes with `#` (e.g. `[#3]` instead of `[3]`).
    pub length_marker: bool,
    /// Reject malformed input when decoding instead of degrading to null.
    pub strict: bool,
}

impl Default for ToonOptions {
    fn default() -> Self {
        ToonOptions {
            indent: 2,
            delimiter: Delimiter::default(),
            length_marker: false,
            strict: true,
        }
    }
}

impl ToonOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation width (spaces per nesting level, minimum 1).
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent.max(1);
        self
    }

    /// Sets the delimiter for inline arrays and tabular rows.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Enables or disables the `#` length marker in array headers.
    #[must_use]
    pub fn with_length_marker(mut self, length_marker: bool) -> Self {
        self.length_marker = length_marker;
        self
    }

    /// Switches the decoder to lenient mode: malformed nodes become null
    /// and header decoration mismatches are tolerated.
    #[must_use]
    pub fn lenient(mut self) -> Self {
        self.strict = false;
        self
    }

    /// Sets strict mode explicitly.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

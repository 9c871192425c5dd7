//! Error types for TOON decoding and value conversion.
//!
//! All decoder errors carry the 1-based line number of the offending input
//! line and a short reason. Strict failures are all-or-nothing: no partial
//! value is returned. In lenient mode the decoder replaces local failures
//! with null sub-values instead of raising these errors.

use std::fmt;
use thiserror::Error;

/// Errors raised while decoding TOON text or converting host values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An array header bracket expression could not be parsed.
    #[error("malformed array header at line {line}: {header:?}")]
    MalformedHeader { line: usize, header: String },

    /// A depth-0 parse encountered indented content first.
    #[error("unexpected indentation at line {line}")]
    UnexpectedIndent { line: usize },

    /// Header decoration disagrees with the configured delimiter or
    /// length-marker setting (strict mode only).
    #[error("array header at line {line} does not match configured options: {reason}")]
    HeaderMismatch { line: usize, reason: String },

    /// An unrecognized escape sequence appeared in a quoted token
    /// (strict mode only; lenient decoding emits the raw character).
    #[error("invalid escape sequence '\\{escape}' at line {line}")]
    InvalidEscape { line: usize, escape: char },

    /// A host value could not be normalized into the TOON data model.
    #[error("unsupported value: {0}")]
    Unsupported(String),

    /// Generic message, used by the serde bridge.
    #[error("{0}")]
    Message(String),
}

impl Error {
    pub(crate) fn malformed_header(line: usize, header: &str) -> Self {
        Error::MalformedHeader {
            line,
            header: header.to_string(),
        }
    }

    pub(crate) fn unexpected_indent(line: usize) -> Self {
        Error::UnexpectedIndent { line }
    }

    pub(crate) fn header_mismatch(line: usize, reason: impl Into<String>) -> Self {
        Error::HeaderMismatch {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_escape(line: usize, escape: char) -> Self {
        Error::InvalidEscape { line, escape }
    }

    pub(crate) fn unsupported(msg: impl Into<String>) -> Self {
        Error::Unsupported(msg.into())
    }

    /// Creates an error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }

    /// Returns the input line the error refers to, if it has one.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::MalformedHeader { line, .. }
            | Error::UnexpectedIndent { line }
            | Error::HeaderMismatch { line, .. }
            | Error::InvalidEscape { line, .. } => Some(*line),
            Error::Unsupported(_) | Error::Message(_) => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

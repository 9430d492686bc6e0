//! Structural validation of raw record bytes.
//!
//! A pure decision procedure: decode, parse, and report exactly where it
//! failed. Nothing here attempts a repair; see [`crate::repair`] for that.

use std::fmt;

use serde::Serialize;
use serde_json::error::Category;

use crate::record::ContentRecord;

/// Left and right double quotation marks.
pub const TYPOGRAPHIC_QUOTES: [char; 2] = ['\u{201C}', '\u{201D}'];

/// What kind of structural failure was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyntaxCategory {
    /// The bytes are not valid UTF-8.
    Encoding,
    /// Not syntactically valid JSON.
    Syntax,
    /// The input ended in the middle of a value.
    Eof,
    /// Valid JSON, but not shaped like a content record.
    Data,
}

impl fmt::Display for SyntaxCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Encoding => "encoding",
            Self::Syntax => "syntax",
            Self::Eof => "eof",
            Self::Data => "data",
        })
    }
}

/// Why a record's bytes could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}")]
#[non_exhaustive]
pub struct SyntaxError {
    pub category: SyntaxCategory,
    /// 1-indexed line of the failure (0 when unknown).
    pub line: usize,
    /// 1-indexed column of the failure (0 when unknown).
    pub column: usize,
    pub message: String,
    /// Number of typographic double quotes in the raw text.
    pub typographic_quotes: usize,
}

impl SyntaxError {
    /// Format the error for human-readable output.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        if self.typographic_quotes > 0 {
            format!(
                "[{}] {} (contains {} typographic quote(s))",
                self.category, self.message, self.typographic_quotes
            )
        } else {
            format!("[{}] {}", self.category, self.message)
        }
    }
}

/// Count `“` and `”` in `text`.
#[must_use]
pub fn count_typographic_quotes(text: &str) -> usize {
    text.chars().filter(|c| TYPOGRAPHIC_QUOTES.contains(c)).count()
}

/// Decode and parse raw bytes into a [`ContentRecord`].
///
/// # Errors
///
/// Returns a [`SyntaxError`] if the bytes are not UTF-8, not JSON, or not
/// shaped like a content record (e.g. a non-string `title`).
pub fn parse_record(bytes: &[u8]) -> Result<ContentRecord, SyntaxError> {
    let text = match std::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => return Err(encoding_error(bytes, &e)),
    };

    serde_json::from_str(text).map_err(|e| SyntaxError {
        category: match e.classify() {
            Category::Eof => SyntaxCategory::Eof,
            Category::Data => SyntaxCategory::Data,
            Category::Syntax | Category::Io => SyntaxCategory::Syntax,
        },
        line: e.line(),
        column: e.column(),
        message: format!("JSON parse error: {e}"),
        typographic_quotes: count_typographic_quotes(text),
    })
}

/// Check that raw bytes parse as a content record, discarding the record.
///
/// # Errors
///
/// Returns the same [`SyntaxError`] as [`parse_record`].
pub fn check_syntax(bytes: &[u8]) -> Result<(), SyntaxError> {
    parse_record(bytes).map(|_| ())
}

fn encoding_error(bytes: &[u8], err: &std::str::Utf8Error) -> SyntaxError {
    let valid = &bytes[..err.valid_up_to()];
    let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = valid.iter().rposition(|&b| b == b'\n').map_or(0, |pos| pos + 1);
    let column = String::from_utf8_lossy(&valid[line_start..]).chars().count() + 1;
    let lossy = String::from_utf8_lossy(bytes);
    SyntaxError {
        category: SyntaxCategory::Encoding,
        line,
        column,
        message: format!(
            "Record is not valid UTF-8: invalid byte at offset {}",
            err.valid_up_to()
        ),
        typographic_quotes: count_typographic_quotes(&lossy),
    }
}

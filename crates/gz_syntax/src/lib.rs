//! Shared types for the GenZLang toolchain.
//!
//! GenZLang is JavaScript with its keywords re-skinned as slang. There is no
//! AST: the pipeline works on a lossless stream of classified source
//! segments. This crate holds the pieces every other crate agrees on:
//!
//! - [`Segment`] / [`SegmentKind`]: scanner output
//! - [`KeywordTable`]: slang → JavaScript keyword mapping
//! - [`OutputLine`]: one line of program output
//! - [`GzSyntax`]: dialect feature flags

pub mod keywords;

pub use keywords::{keyword_table, KeywordEntry, KeywordTable, TableError, KEYWORDS};

use serde::{Deserialize, Serialize};

/// Classification of a run of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// A `"`, `'` or backtick string literal, quotes included.
    String,
    /// A `//` line comment (newline excluded) or a `/* */` block comment.
    Comment,
    /// An identifier-like word. The only kind keyword substitution looks at.
    Word,
    /// A numeric literal. Styling only; passes treat it like [`SegmentKind::Other`].
    Number,
    /// Operators, punctuation and whitespace.
    Other,
}

impl SegmentKind {
    /// True for segments whose text is program code rather than literal or
    /// comment content.
    pub fn is_code(self) -> bool {
        !matches!(self, SegmentKind::String | SegmentKind::Comment)
    }
}

/// A classified slice of the source. Offsets are byte offsets into the
/// scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment<'a> {
    pub kind: SegmentKind,
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Feature flags controlling how GenZLang source is scanned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GzSyntax {
    /// Recognise `/* ... */` comments.
    pub block_comments: bool,
    /// Tag digit runs as [`SegmentKind::Number`] instead of [`SegmentKind::Other`].
    pub tag_numbers: bool,
}

impl Default for GzSyntax {
    fn default() -> Self {
        Self {
            block_comments: true,
            tag_numbers: true,
        }
    }
}

/// Kind of an [`OutputLine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    Log,
    Error,
    Info,
}

/// One externally observable line produced by a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputLine {
    pub kind: OutputKind,
    pub text: String,
}

impl OutputLine {
    pub fn log(text: impl Into<String>) -> Self {
        Self {
            kind: OutputKind::Log,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: OutputKind::Error,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: OutputKind::Info,
            text: text.into(),
        }
    }
}

impl std::fmt::Display for OutputLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// True if `c` can start a scanner word.
pub fn is_word_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c == b'$'
}

/// True if `c` can continue a scanner word.
pub fn is_word_continue(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c == b'$'
}

//! The slang → JavaScript keyword table.
//!
//! [`KEYWORDS`] is the single source of truth: the transpiler substitutes
//! from it, and presentation layers read it for autocomplete and docs.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Serialize;

use crate::{is_word_continue, is_word_start};

/// One slang token and the JavaScript it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeywordEntry {
    pub slang: &'static str,
    pub target: &'static str,
}

const fn entry(slang: &'static str, target: &'static str) -> KeywordEntry {
    KeywordEntry { slang, target }
}

/// Built-in GenZLang keywords, in documentation order.
pub static KEYWORDS: &[KeywordEntry] = &[
    entry("yap", "console.log"),
    entry("fr", "const"),
    entry("rn", "let"),
    entry("lowkey", "var"),
    entry("cook", "function"),
    entry("bet", "return"),
    entry("pov", "if"),
    entry("sike", "else"),
    entry("spam", "while"),
    entry("grind", "for"),
    entry("dip", "break"),
    entry("skip", "continue"),
    entry("no_cap", "true"),
    entry("cap", "false"),
    entry("ghosted", "null"),
    entry("mid", "undefined"),
    entry("tryna", "try"),
    entry("oops", "catch"),
    entry("periodt", "finally"),
    entry("yeet", "throw"),
    entry("finna", "new"),
    entry("squad", "class"),
];

/// Why a keyword table could not be built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("duplicate slang keyword `{0}`")]
    DuplicateSlang(String),

    #[error("slang keyword `{0}` is not a single word")]
    NotAWord(String),
}

/// Lookup structure over a list of [`KeywordEntry`].
///
/// Slang keys are unique and each is a single scanner word. Substitution
/// only ever compares a complete scanned word against a key, so a longer
/// slang token can never be shadowed by a shorter one that prefixes it.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    entries: &'static [KeywordEntry],
    by_slang: HashMap<&'static str, &'static str>,
}

impl KeywordTable {
    pub fn new(entries: &'static [KeywordEntry]) -> Result<Self, TableError> {
        let mut by_slang = HashMap::with_capacity(entries.len());
        for e in entries {
            if !is_single_word(e.slang) {
                return Err(TableError::NotAWord(e.slang.to_string()));
            }
            if by_slang.insert(e.slang, e.target).is_some() {
                return Err(TableError::DuplicateSlang(e.slang.to_string()));
            }
        }
        Ok(Self { entries, by_slang })
    }

    /// The JavaScript replacement for `word`, if it is a slang keyword.
    pub fn lookup(&self, word: &str) -> Option<&'static str> {
        self.by_slang.get(word).copied()
    }

    pub fn entries(&self) -> &'static [KeywordEntry] {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Autocomplete candidates for a partially typed word.
    ///
    /// Matches are case-insensitive prefix matches in table order. A keyword
    /// equal to `prefix` is not suggested, and an empty prefix suggests nothing.
    pub fn suggest(&self, prefix: &str, limit: usize) -> Vec<&'static KeywordEntry> {
        if prefix.is_empty() {
            return Vec::new();
        }
        let prefix = prefix.to_ascii_lowercase();
        self.entries
            .iter()
            .filter(|e| e.slang.to_ascii_lowercase().starts_with(&prefix) && e.slang != prefix)
            .take(limit)
            .collect()
    }
}

fn is_single_word(s: &str) -> bool {
    let bytes = s.as_bytes();
    match bytes.split_first() {
        Some((&first, rest)) => is_word_start(first) && rest.iter().all(|&b| is_word_continue(b)),
        None => false,
    }
}

/// The process-wide table built from [`KEYWORDS`].
pub fn keyword_table() -> &'static KeywordTable {
    static TABLE: OnceLock<KeywordTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        // Covered by `builtin_table_is_valid`; an invalid table substitutes nothing.
        KeywordTable::new(KEYWORDS).unwrap_or_else(|_| KeywordTable {
            entries: KEYWORDS,
            by_slang: HashMap::new(),
        })
    })
}

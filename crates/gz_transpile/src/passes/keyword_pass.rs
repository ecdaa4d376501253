//! Keyword substitution over scanned segments.
//!
//! Only `Word` segments are candidates, and only when the whole word is a
//! slang key. Strings, comments and everything else are copied verbatim.

use gz_syntax::{KeywordTable, Segment, SegmentKind};

/// Rebuild the source with every slang word replaced by its JavaScript keyword.
pub fn substitute(segments: &[Segment<'_>], table: &KeywordTable) -> String {
    let mut out = String::with_capacity(segments.iter().map(|s| s.text.len()).sum());

    for seg in segments {
        match seg.kind {
            SegmentKind::Word => out.push_str(table.lookup(seg.text).unwrap_or(seg.text)),
            SegmentKind::String | SegmentKind::Comment | SegmentKind::Number | SegmentKind::Other => {
                out.push_str(seg.text)
            }
        }
    }

    out
}

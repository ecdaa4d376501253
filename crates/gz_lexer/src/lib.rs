//! Lossless scanner for GenZLang source.
//!
//! Splits source text into [`Segment`]s in a single left-to-right pass:
//!
//! - string literals (`"…"`, `'…'`, `` `…` ``), backslash escapes honoured
//! - `//` line comments and `/* */` block comments
//! - words (`[A-Za-z_$][A-Za-z0-9_$]*`)
//! - number literals
//! - everything else as maximal `Other` runs
//!
//! Concatenating the segment texts reproduces the input exactly. The scanner
//! never fails: an unterminated string or block comment runs to end of input.

use gz_syntax::{is_word_continue, is_word_start, GzSyntax, Segment, SegmentKind};

/// Scan `source` into classified segments.
pub fn scan<'a>(source: &'a str, syntax: &GzSyntax) -> Vec<Segment<'a>> {
    let bytes = source.as_bytes();
    let mut segments = Vec::new();
    let mut other_start: Option<usize> = None;
    let mut i = 0;

    // Every delimiter is ASCII, so each segment boundary lands on a char
    // boundary and slicing `source` is safe.
    while i < bytes.len() {
        let Some((kind, end)) = classify_at(bytes, i, syntax) else {
            other_start.get_or_insert(i);
            i += 1;
            continue;
        };

        if kind == SegmentKind::Other {
            // Untagged number: fold into the surrounding Other run.
            other_start.get_or_insert(i);
            i = end;
            continue;
        }

        if let Some(start) = other_start.take() {
            segments.push(segment(source, SegmentKind::Other, start, i));
        }
        segments.push(segment(source, kind, i, end));
        i = end;
    }

    if let Some(start) = other_start {
        segments.push(segment(source, SegmentKind::Other, start, bytes.len()));
    }

    segments
}

fn segment(source: &str, kind: SegmentKind, start: usize, end: usize) -> Segment<'_> {
    Segment {
        kind,
        text: &source[start..end],
        start,
        end,
    }
}

/// If a string, comment, word or number starts at `i`, return its kind and
/// the byte offset just past it.
fn classify_at(bytes: &[u8], i: usize, syntax: &GzSyntax) -> Option<(SegmentKind, usize)> {
    let c = bytes[i];
    let next = bytes.get(i + 1).copied();

    if c == b'/' && next == Some(b'/') {
        let end = bytes[i..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(bytes.len(), |p| i + p);
        return Some((SegmentKind::Comment, end));
    }

    if syntax.block_comments && c == b'/' && next == Some(b'*') {
        let mut j = i + 2;
        while j + 1 < bytes.len() {
            if bytes[j] == b'*' && bytes[j + 1] == b'/' {
                return Some((SegmentKind::Comment, j + 2));
            }
            j += 1;
        }
        return Some((SegmentKind::Comment, bytes.len()));
    }

    if matches!(c, b'"' | b'\'' | b'`') {
        return Some((SegmentKind::String, scan_string(bytes, i)));
    }

    if is_word_start(c) {
        let mut j = i + 1;
        while j < bytes.len() && is_word_continue(bytes[j]) {
            j += 1;
        }
        return Some((SegmentKind::Word, j));
    }

    if c.is_ascii_digit() {
        let end = scan_number(bytes, i);
        let kind = if syntax.tag_numbers {
            SegmentKind::Number
        } else {
            SegmentKind::Other
        };
        return Some((kind, end));
    }

    None
}

fn scan_string(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut j = start + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b if b == quote => return j + 1,
            _ => j += 1,
        }
    }
    bytes.len()
}

/// Digits plus any identifier characters glued to them (`0xff`, `1e5`,
/// `10n`), and a fractional part when `.` is followed by a digit.
fn scan_number(bytes: &[u8], start: usize) -> usize {
    let is_part = |b: u8| b.is_ascii_alphanumeric() || b == b'_';
    let mut j = start;
    while j < bytes.len() && is_part(bytes[j]) {
        j += 1;
    }
    if j + 1 < bytes.len() && bytes[j] == b'.' && bytes[j + 1].is_ascii_digit() {
        j += 1;
        while j < bytes.len() && is_part(bytes[j]) {
            j += 1;
        }
    }
    j
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<(SegmentKind, &str)> {
        scan(source, &GzSyntax::default())
            .into_iter()
            .map(|s| (s.kind, s.text))
            .collect()
    }

    fn concat(source: &str, syntax: &GzSyntax) -> String {
        scan(source, syntax).iter().map(|s| s.text).collect()
    }

    #[test]
    fn classifies_a_call() {
        use SegmentKind::*;
        assert_eq!(
            kinds(r#"yap("spam")"#),
            vec![(Word, "yap"), (Other, "("), (String, r#""spam""#), (Other, ")")]
        );
    }

    #[test]
    fn concatenation_is_lossless() {
        let inputs = [
            "",
            "rn count = 3\nspam (count > 0) {\n  yap(count)\n  count = count - 1\n}\n",
            "yap('it\\'s giving') // comment with spam\n/* block\n pov */ sike",
            "fr s = `multi\nline ${x}` + \"unterminated",
            "/* never closed",
            "café = 1.5e3 + 0xff // ünïcode",
            "\\ stray backslash \"esc\\\"aped\"",
        ];
        for syntax in [
            GzSyntax::default(),
            GzSyntax {
                block_comments: false,
                tag_numbers: false,
            },
        ] {
            for input in inputs {
                assert_eq!(concat(input, &syntax), input, "input: {input:?}");
            }
        }
    }

    #[test]
    fn offsets_match_text() {
        let source = "pov (x) { yap(\"é\") } // done";
        for seg in scan(source, &GzSyntax::default()) {
            assert_eq!(&source[seg.start..seg.end], seg.text);
        }
    }

    #[test]
    fn escaped_quote_does_not_close_string() {
        let segs = scan(r#"'a\'b' rest"#, &GzSyntax::default());
        assert_eq!(segs[0].kind, SegmentKind::String);
        assert_eq!(segs[0].text, r#"'a\'b'"#);
    }

    #[test]
    fn unterminated_string_runs_to_end() {
        let segs = scan("yap(\"oops spam", &GzSyntax::default());
        let last = segs.last().unwrap();
        assert_eq!(last.kind, SegmentKind::String);
        assert_eq!(last.text, "\"oops spam");
    }

    #[test]
    fn line_comment_excludes_newline() {
        use SegmentKind::*;
        assert_eq!(
            kinds("// spam\nspam"),
            vec![(Comment, "// spam"), (Other, "\n"), (Word, "spam")]
        );
    }

    #[test]
    fn block_comment_can_be_disabled() {
        let on = scan("/* pov */", &GzSyntax::default());
        assert_eq!(on.len(), 1);
        assert_eq!(on[0].kind, SegmentKind::Comment);

        let off = scan(
            "/* pov */",
            &GzSyntax {
                block_comments: false,
                ..Default::default()
            },
        );
        assert!(off
            .iter()
            .any(|s| s.kind == SegmentKind::Word && s.text == "pov"));
    }

    #[test]
    fn template_literal_is_one_string() {
        let segs = scan("`${spam}`", &GzSyntax::default());
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].kind, SegmentKind::String);
    }

    #[test]
    fn words_are_maximal() {
        use SegmentKind::*;
        assert_eq!(
            kinds("yapper $yap yap_2"),
            vec![
                (Word, "yapper"),
                (Other, " "),
                (Word, "$yap"),
                (Other, " "),
                (Word, "yap_2"),
            ]
        );
    }

    #[test]
    fn numbers_swallow_suffixes() {
        use SegmentKind::*;
        assert_eq!(
            kinds("1e5+0xff-3.25"),
            vec![
                (Number, "1e5"),
                (Other, "+"),
                (Number, "0xff"),
                (Other, "-"),
                (Number, "3.25"),
            ]
        );
    }

    #[test]
    fn untagged_numbers_merge_into_other() {
        let syntax = GzSyntax {
            tag_numbers: false,
            ..Default::default()
        };
        let segs = scan("(10) ", &syntax);
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].kind, SegmentKind::Other);
        assert_eq!(segs[0].text, "(10) ");
    }

    #[test]
    fn no_word_starts_inside_string_or_comment() {
        let source = "fr a = 'pov sike' /* spam */ // bet\n`cook ${fr}`";
        for seg in scan(source, &GzSyntax::default()) {
            if seg.kind == SegmentKind::Word {
                assert!(matches!(seg.text, "fr" | "a"), "unexpected word {:?}", seg.text);
            }
        }
    }
}

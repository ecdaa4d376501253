//! Syntax check for emitted JavaScript.
//!
//! Parses the text with the standard SWC parser as a classic script (the
//! same goal the sandbox evaluates it under) and reports the first error.

use swc_common::{sync::Lrc, FileName, SourceMap, Spanned};
use swc_ecma_ast::EsVersion;
use swc_ecma_parser::{EsSyntax, Syntax};

/// First syntax error found in a JavaScript text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{filename}:{line}:{column}: {message}")]
pub struct CheckError {
    pub filename: String,
    /// 1-based line.
    pub line: usize,
    /// 1-based column, in characters.
    pub column: usize,
    pub message: String,
}

/// Parse `code` as a script and fail on the first syntax error, including
/// errors the parser recovered from.
pub fn check_javascript(code: &str, filename: &str) -> Result<(), CheckError> {
    let source_map: Lrc<SourceMap> = Default::default();
    let source_file = source_map.new_source_file(
        Lrc::new(FileName::Custom(filename.to_string())),
        code.to_string(),
    );

    let mut recovered = vec![];
    let parsed = swc_ecma_parser::parse_file_as_script(
        &source_file,
        Syntax::Es(EsSyntax::default()),
        EsVersion::latest(),
        None,
        &mut recovered,
    );

    let error = match parsed {
        Err(e) => e,
        Ok(_) => match recovered.into_iter().next() {
            Some(e) => e,
            None => return Ok(()),
        },
    };

    let loc = source_map.lookup_char_pos(error.span().lo);
    Err(CheckError {
        filename: filename.to_string(),
        line: loc.line,
        column: loc.col.0 + 1,
        message: error.kind().msg().into_owned(),
    })
}

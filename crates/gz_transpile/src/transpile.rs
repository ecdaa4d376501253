use gz_lexer::scan;
use gz_syntax::{keyword_table, GzSyntax};

use crate::passes::{inject_guards, substitute, LoopGuard};

/// Transpile GenZLang to plain JavaScript (keywords only, no loop guards).
pub fn transpile(source: &str) -> String {
    transpile_with(source, &GzSyntax::default())
}

/// [`transpile`] with explicit dialect flags.
pub fn transpile_with(source: &str, syntax: &GzSyntax) -> String {
    let segments = scan(source, syntax);
    tracing::debug!(segments = segments.len(), bytes = source.len(), "scanned source");
    substitute(&segments, keyword_table())
}

/// Transpile GenZLang to the JavaScript handed to the sandbox: keywords
/// substituted and every `while` loop bounded by the default [`LoopGuard`].
pub fn transpile_for_execution(source: &str) -> String {
    transpile_for_execution_with(source, &GzSyntax::default(), &LoopGuard::default())
}

/// [`transpile_for_execution`] with explicit dialect flags and loop budget.
pub fn transpile_for_execution_with(source: &str, syntax: &GzSyntax, guard: &LoopGuard) -> String {
    inject_guards(&transpile_with(source, syntax), guard, syntax)
}

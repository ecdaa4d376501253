//! Loop guard injection.
//!
//! Every `while (cond)` becomes
//! `while (__loopGuard++ < __MAX_LOOPS && (cond))`, and a one-line prelude
//! declares the counter and the ceiling. The counter is shared by all
//! guarded loops of one execution unit, so the ceiling bounds the total
//! number of condition checks across the whole program.
//!
//! `for` loops and recursion are left alone.

use gz_lexer::scan;
use gz_syntax::{GzSyntax, SegmentKind};
use serde::{Deserialize, Serialize};

/// Name of the injected iteration counter.
pub const COUNTER_NAME: &str = "__loopGuard";
/// Name of the injected ceiling constant.
pub const CEILING_NAME: &str = "__MAX_LOOPS";
/// Default total number of guarded loop iterations per run.
pub const DEFAULT_LOOP_CEILING: u32 = 10_000;

/// Iteration budget for one execution unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopGuard {
    pub ceiling: u32,
}

impl Default for LoopGuard {
    fn default() -> Self {
        Self {
            ceiling: DEFAULT_LOOP_CEILING,
        }
    }
}

impl LoopGuard {
    pub fn new(ceiling: u32) -> Self {
        Self { ceiling }
    }

    /// Declarations placed at the top of the execution unit.
    pub fn prelude(&self) -> String {
        format!(
            "let {COUNTER_NAME} = 0; const {CEILING_NAME} = {};\n",
            self.ceiling
        )
    }

    fn condition_prefix() -> String {
        format!("({COUNTER_NAME}++ < {CEILING_NAME} && (")
    }
}

/// Prepend the guard prelude to `code` and bound every `while` condition.
pub fn inject_guards(code: &str, guard: &LoopGuard, syntax: &GzSyntax) -> String {
    let mut rewriter = LoopRewriter::new(code.len());

    for seg in scan(code, syntax) {
        match seg.kind {
            SegmentKind::Comment => rewriter.out.push_str(seg.text),
            SegmentKind::Word => rewriter.word(seg.text),
            SegmentKind::String | SegmentKind::Number => rewriter.opaque(seg.text),
            SegmentKind::Other => {
                for ch in seg.text.chars() {
                    rewriter.other_char(ch);
                }
            }
        }
    }

    tracing::debug!(
        guarded = rewriter.guarded,
        ceiling = guard.ceiling,
        "injected loop guards"
    );

    let mut out = guard.prelude();
    out.push_str(&rewriter.out);
    out
}

struct LoopRewriter {
    out: String,
    /// Just saw a `while` keyword and no significant code since.
    pending_while: bool,
    /// Last significant code character was `.`, so a following word is a
    /// property name rather than a keyword.
    after_dot: bool,
    /// Current parenthesis depth over code text.
    depth: usize,
    /// Depths whose closing `)` also closes a guarded condition.
    closers: Vec<usize>,
    guarded: usize,
}

impl LoopRewriter {
    fn new(capacity: usize) -> Self {
        Self {
            out: String::with_capacity(capacity + 64),
            pending_while: false,
            after_dot: false,
            depth: 0,
            closers: Vec::new(),
            guarded: 0,
        }
    }

    fn word(&mut self, text: &str) {
        self.pending_while = text == "while" && !self.after_dot;
        self.after_dot = false;
        self.out.push_str(text);
    }

    fn opaque(&mut self, text: &str) {
        self.pending_while = false;
        self.after_dot = false;
        self.out.push_str(text);
    }

    fn other_char(&mut self, ch: char) {
        if ch.is_whitespace() {
            self.out.push(ch);
            return;
        }

        match ch {
            '(' => {
                self.depth += 1;
                if self.pending_while {
                    self.closers.push(self.depth);
                    self.out.push_str(&LoopGuard::condition_prefix());
                    self.guarded += 1;
                } else {
                    self.out.push('(');
                }
            }
            ')' => {
                if self.closers.last() == Some(&self.depth) {
                    self.closers.pop();
                    self.out.push_str("))");
                } else {
                    self.out.push(')');
                }
                self.depth = self.depth.saturating_sub(1);
            }
            _ => self.out.push(ch),
        }

        self.pending_while = false;
        self.after_dot = ch == '.';
    }
}

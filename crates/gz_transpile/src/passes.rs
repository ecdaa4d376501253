//! Text-level passes that rewrite GenZLang into JavaScript.
//!
//! Processing order:
//! 1. Keywords: slang words → JavaScript keywords
//! 2. Loop guards: bound `while` conditions (execution text only)

mod guard_pass;
mod keyword_pass;

pub use guard_pass::{inject_guards, LoopGuard, CEILING_NAME, COUNTER_NAME, DEFAULT_LOOP_CEILING};
pub use keyword_pass::substitute;

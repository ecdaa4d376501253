//! GenZLang → JavaScript transpiler.
//!
//! Works at the text level on the scanner's segment stream; there is no AST.
//!
//! - [`transpile`]: keyword substitution only, for display
//! - [`transpile_for_execution`]: substitution plus loop guards, for the sandbox
//! - [`check_javascript`]: parse emitted text with SWC and report the first
//!   syntax error

pub mod check;
pub mod passes;
pub mod transpile;

pub use check::{check_javascript, CheckError};
pub use passes::{LoopGuard, DEFAULT_LOOP_CEILING};
pub use transpile::{
    transpile, transpile_for_execution, transpile_for_execution_with, transpile_with,
};

//! Execution side of GenZLang.
//!
//! Transpiled JavaScript runs behind the [`Sandbox`] trait, whose only
//! capability is `console.log`. Uncaught exceptions come back as a
//! [`HostError`] (kind + message) and are rewritten by the error
//! [`translate`]r before any caller sees them.
//!
//! [`Runner`] ties the pieces together: transpile for execution, execute,
//! translate.

pub mod config;
pub mod quickjs;
pub mod rules;
pub mod run;
pub mod sandbox;
pub mod translate;

pub use config::{ConfigError, RunConfig};
pub use quickjs::{QuickJsSandbox, SandboxConfig};
pub use rules::{error_rules, ErrorRule, ErrorRuleTable, ERROR_RULES, FALLBACK_PREFIX};
pub use run::{run, run_collecting_output, ExecutionResult, RunError, Runner};
pub use sandbox::{HostError, Sandbox, SandboxError, SandboxFailure};
pub use translate::translate;

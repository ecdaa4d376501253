//! The sandboxed-execution seam.

use gz_syntax::OutputLine;
use serde::Serialize;

/// An uncaught script exception as reported by the host engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostError {
    /// Error class name, e.g. `ReferenceError`.
    pub kind: String,
    pub message: String,
}

impl HostError {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Engine failures outside the script error taxonomy. These are never
/// translated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SandboxError {
    #[error("script engine failure: {0}")]
    Engine(String),

    #[error("script engine ran out of memory")]
    OutOfMemory,
}

/// Why an execution did not complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SandboxFailure {
    /// The program threw. `output` holds the lines logged before the throw.
    Script {
        error: HostError,
        output: Vec<OutputLine>,
    },
    Fatal(SandboxError),
}

impl From<SandboxError> for SandboxFailure {
    fn from(e: SandboxError) -> Self {
        SandboxFailure::Fatal(e)
    }
}

/// Runs JavaScript text with `console.log` as its only capability.
///
/// Implementations must give every call its own evaluation context and
/// output buffer: nothing a program does may be visible to the next call.
pub trait Sandbox: Send + Sync {
    /// Evaluate `code` as a classic script and return the logged lines.
    fn execute(&self, code: &str) -> Result<Vec<OutputLine>, SandboxFailure>;
}

//! End-to-end run: transpile for execution, execute, translate failures.

use gz_syntax::OutputLine;
use gz_transpile::transpile_for_execution_with;
use serde::Serialize;

use crate::config::RunConfig;
use crate::quickjs::QuickJsSandbox;
use crate::sandbox::{Sandbox, SandboxError, SandboxFailure};
use crate::translate::translate;

/// First line of a framed transcript.
pub const START_BANNER: &str = "> Letting it cook...";
/// Last line of a framed transcript when the program completed.
pub const SUCCESS_BANNER: &str = "> Ran without Ls ✓";

/// Outcome of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ExecutionResult {
    Completed {
        output: Vec<OutputLine>,
    },
    /// The program threw. `output` holds what it logged first, `message` the
    /// translated error.
    Failed {
        output: Vec<OutputLine>,
        message: String,
    },
}

impl ExecutionResult {
    pub fn output(&self) -> &[OutputLine] {
        match self {
            ExecutionResult::Completed { output } | ExecutionResult::Failed { output, .. } => {
                output
            }
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ExecutionResult::Completed { .. } => None,
            ExecutionResult::Failed { message, .. } => Some(message),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionResult::Completed { .. })
    }

    /// The output framed the way the playground shows it: a start banner,
    /// the logged lines, then a success banner or the error line.
    pub fn transcript(&self) -> Vec<OutputLine> {
        let mut lines = Vec::with_capacity(self.output().len() + 2);
        lines.push(OutputLine::info(START_BANNER));
        lines.extend_from_slice(self.output());
        lines.push(match self.error_message() {
            None => OutputLine::info(SUCCESS_BANNER),
            Some(message) => OutputLine::error(message),
        });
        lines
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RunError {
    /// The program threw; `message` is already translated.
    #[error("{message}")]
    Translated {
        message: String,
        output: Vec<OutputLine>,
    },

    #[error(transparent)]
    Fatal(#[from] SandboxError),
}

/// Runs GenZLang programs with a fixed configuration and sandbox.
#[derive(Debug, Clone)]
pub struct Runner<S = QuickJsSandbox> {
    config: RunConfig,
    sandbox: S,
}

impl Runner<QuickJsSandbox> {
    pub fn new(config: RunConfig) -> Self {
        let sandbox = QuickJsSandbox::new(config.sandbox.clone());
        Self { config, sandbox }
    }
}

impl Default for Runner<QuickJsSandbox> {
    fn default() -> Self {
        Self::new(RunConfig::default())
    }
}

impl<S: Sandbox> Runner<S> {
    pub fn with_sandbox(config: RunConfig, sandbox: S) -> Self {
        Self { config, sandbox }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// The exact JavaScript handed to the sandbox for `source`.
    pub fn transpile(&self, source: &str) -> String {
        transpile_for_execution_with(source, &self.config.syntax, &self.config.loop_guard())
    }

    /// Run `source` and return its logged lines, or the translated failure.
    pub fn run(&self, source: &str) -> Result<Vec<OutputLine>, RunError> {
        match self.run_collecting_output(source)? {
            ExecutionResult::Completed { output } => Ok(output),
            ExecutionResult::Failed { output, message } => {
                Err(RunError::Translated { message, output })
            }
        }
    }

    /// Run `source` and report script failures as data. Only engine
    /// failures are returned as `Err`, untranslated.
    pub fn run_collecting_output(&self, source: &str) -> Result<ExecutionResult, SandboxError> {
        let code = self.transpile(source);

        match self.sandbox.execute(&code) {
            Ok(output) => {
                tracing::debug!(lines = output.len(), "run completed");
                Ok(ExecutionResult::Completed { output })
            }
            Err(SandboxFailure::Script { error, output }) => {
                tracing::debug!(%error, "run failed, translating");
                let message = translate(&error.kind, &error.message);
                Ok(ExecutionResult::Failed { output, message })
            }
            Err(SandboxFailure::Fatal(e)) => {
                tracing::warn!(error = %e, "script engine failure");
                Err(e)
            }
        }
    }
}

/// [`Runner::run`] with the default configuration.
pub fn run(source: &str) -> Result<Vec<OutputLine>, RunError> {
    Runner::default().run(source)
}

/// [`Runner::run_collecting_output`] with the default configuration.
pub fn run_collecting_output(source: &str) -> Result<ExecutionResult, SandboxError> {
    Runner::default().run_collecting_output(source)
}

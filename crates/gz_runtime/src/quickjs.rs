//! [`Sandbox`] backed by an embedded QuickJS engine.
//!
//! Each [`QuickJsSandbox::execute`] call creates a fresh runtime and context.
//! The global scope gets a `console` object with a single `log` function and
//! nothing else from the host: no module loader, no timers, no I/O.

use std::cell::RefCell;
use std::rc::Rc;

use gz_syntax::OutputLine;
use rquickjs::prelude::{Coerced, Rest};
use rquickjs::{CatchResultExt, CaughtError, Context, Ctx, FromJs, Function, Object, Runtime, Value};
use serde::{Deserialize, Serialize};

use crate::sandbox::{HostError, Sandbox, SandboxError, SandboxFailure};

/// Resource limits for one QuickJS execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Heap limit in bytes.
    pub memory_limit: usize,
    /// Native stack budget in bytes. Unbounded recursion fails here.
    pub max_stack_size: usize,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            memory_limit: 64 * 1024 * 1024,
            max_stack_size: 512 * 1024,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct QuickJsSandbox {
    config: SandboxConfig,
}

impl QuickJsSandbox {
    pub fn new(config: SandboxConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }
}

impl Sandbox for QuickJsSandbox {
    fn execute(&self, code: &str) -> Result<Vec<OutputLine>, SandboxFailure> {
        let runtime = Runtime::new().map_err(engine_error)?;
        runtime.set_memory_limit(self.config.memory_limit);
        runtime.set_max_stack_size(self.config.max_stack_size);
        let context = Context::full(&runtime).map_err(engine_error)?;

        let output: Rc<RefCell<Vec<OutputLine>>> = Rc::default();

        let thrown = context.with(|ctx| -> Result<Option<HostError>, SandboxError> {
            install_console(&ctx, Rc::clone(&output)).map_err(engine_error)?;
            match ctx.eval::<Value, _>(code).catch(&ctx) {
                Ok(_) => Ok(None),
                Err(caught) => host_error(&ctx, caught).map(Some),
            }
        })?;

        let lines = std::mem::take(&mut *output.borrow_mut());
        tracing::debug!(lines = lines.len(), failed = thrown.is_some(), "quickjs execution finished");

        match thrown {
            None => Ok(lines),
            Some(error) => Err(SandboxFailure::Script {
                error,
                output: lines,
            }),
        }
    }
}

/// `console.log(...args)`: one line per call, each argument converted with
/// `String(x)` and joined by a single space.
///
/// `String` is captured before any program code runs, so reassigning the
/// global does not change how output is rendered.
fn install_console<'js>(
    ctx: &Ctx<'js>,
    sink: Rc<RefCell<Vec<OutputLine>>>,
) -> rquickjs::Result<()> {
    let to_string: Function<'js> = ctx.globals().get("String")?;
    let log = Function::new(
        ctx.clone(),
        move |args: Rest<Value<'js>>| -> rquickjs::Result<()> {
            let mut parts = Vec::with_capacity(args.0.len());
            for arg in args.0 {
                parts.push(to_string.call::<_, String>((arg,))?);
            }
            sink.borrow_mut().push(OutputLine::log(parts.join(" ")));
            Ok(())
        },
    )?;

    let console = Object::new(ctx.clone())?;
    console.set("log", log)?;
    ctx.globals().set("console", console)?;
    Ok(())
}

fn host_error<'js>(ctx: &Ctx<'js>, caught: CaughtError<'js>) -> Result<HostError, SandboxError> {
    match caught {
        CaughtError::Exception(exception) => {
            let kind = exception
                .as_object()
                .get::<_, Option<String>>("name")
                .ok()
                .flatten()
                .unwrap_or_else(|| "Error".to_string());
            let message = exception.message().unwrap_or_default();

            if kind == "InternalError" && message.contains("out of memory") {
                return Err(SandboxError::OutOfMemory);
            }
            Ok(HostError::new(kind, message))
        }
        CaughtError::Value(value) => {
            let message = Coerced::<String>::from_js(ctx, value)
                .map(|c| c.0)
                .unwrap_or_default();
            Ok(HostError::new("Error", message))
        }
        CaughtError::Error(e) => Err(engine_error(e)),
    }
}

fn engine_error(e: rquickjs::Error) -> SandboxError {
    match e {
        rquickjs::Error::Allocation => SandboxError::OutOfMemory,
        other => SandboxError::Engine(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gz_syntax::OutputKind;

    fn exec(code: &str) -> Result<Vec<OutputLine>, SandboxFailure> {
        QuickJsSandbox::default().execute(code)
    }

    fn texts(lines: &[OutputLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn log_joins_arguments_with_space() {
        let lines = exec("console.log(1, 'a', true, null, undefined, [1, 2], {})").unwrap();
        assert_eq!(
            texts(&lines),
            vec!["1 a true null undefined 1,2 [object Object]"]
        );
        assert!(lines.iter().all(|l| l.kind == OutputKind::Log));
    }

    #[test]
    fn log_renders_symbols_like_string() {
        let lines = exec("console.log(Symbol('x'), Symbol())").unwrap();
        assert_eq!(texts(&lines), vec!["Symbol(x) Symbol()"]);
    }

    #[test]
    fn log_ignores_reassigned_string_global() {
        let lines = exec("String = null; console.log(1, 'a')").unwrap();
        assert_eq!(texts(&lines), vec!["1 a"]);
    }

    #[test]
    fn one_line_per_call() {
        let lines = exec("console.log('a'); console.log(); console.log('b')").unwrap();
        assert_eq!(texts(&lines), vec!["a", "", "b"]);
    }

    #[test]
    fn exception_keeps_partial_output() {
        let failure = exec("console.log('before'); ghost; console.log('after')").unwrap_err();
        match failure {
            SandboxFailure::Script { error, output } => {
                assert_eq!(error.kind, "ReferenceError");
                assert!(error.message.contains("ghost"));
                assert_eq!(texts(&output), vec!["before"]);
            }
            other => panic!("unexpected failure: {other:?}"),
        }
    }

    #[test]
    fn thrown_primitive_is_stringified() {
        match exec("throw 'boom'").unwrap_err() {
            SandboxFailure::Script { error, .. } => {
                assert_eq!(error, HostError::new("Error", "boom"));
            }
            other => panic!("unexpected failure: {other:?}"),
        }
    }

    #[test]
    fn custom_error_class_name_is_kind() {
        match exec("throw new TypeError('nope')").unwrap_err() {
            SandboxFailure::Script { error, .. } => {
                assert_eq!(error, HostError::new("TypeError", "nope"));
            }
            other => panic!("unexpected failure: {other:?}"),
        }
    }

    #[test]
    fn syntax_error_is_reported() {
        match exec("const = 3").unwrap_err() {
            SandboxFailure::Script { error, output } => {
                assert_eq!(error.kind, "SyntaxError");
                assert!(output.is_empty());
            }
            other => panic!("unexpected failure: {other:?}"),
        }
    }

    #[test]
    fn no_host_capabilities_leak() {
        let lines = exec(
            "console.log(typeof require, typeof process, typeof setTimeout, typeof fetch, typeof std, typeof os)",
        )
        .unwrap();
        assert_eq!(
            texts(&lines),
            vec!["undefined undefined undefined undefined undefined undefined"]
        );
    }

    #[test]
    fn globals_do_not_survive_between_runs() {
        let sandbox = QuickJsSandbox::default();
        sandbox.execute("var leaked = 1").unwrap();
        let lines = sandbox.execute("console.log(typeof leaked)").unwrap();
        assert_eq!(texts(&lines), vec!["undefined"]);
    }
}

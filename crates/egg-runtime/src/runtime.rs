//! Top-level runner
//!
//! [`Egg`] owns the root environment (built-ins installed once) and the
//! interpreter. Every [`Egg::run`] evaluates the program in a fresh child of
//! the root, so definitions never leak between runs. A [`Session`] keeps one
//! child alive across calls for interactive use.

use crate::ast::Expr;
use crate::environment::{Env, Environment};
use crate::error::EggError;
use crate::interpreter::Interpreter;
use crate::parser;
use crate::stdlib::{self, OutputWriter};
use crate::value::Value;
use egg_config::RuntimeSettings;
use tracing::debug;

/// Egg runtime instance
///
/// # Examples
///
/// ```
/// use egg_runtime::{Egg, Value};
///
/// let egg = Egg::new();
/// let result = egg.eval("+(1, 2)").unwrap();
/// assert_eq!(result, Value::Number(3.0));
/// ```
pub struct Egg {
    root: Env,
    interpreter: Interpreter,
}

impl Egg {
    /// Create a runtime with default settings, printing to stdout
    pub fn new() -> Self {
        Self::with_settings(RuntimeSettings::default())
    }

    pub fn with_settings(settings: RuntimeSettings) -> Self {
        debug!(max_depth = settings.max_depth, "creating runtime");
        Self {
            root: stdlib::root_environment(),
            interpreter: Interpreter::with_settings(&settings),
        }
    }

    /// Redirect `print` output
    pub fn set_output_writer(&mut self, writer: OutputWriter) {
        self.interpreter.set_output_writer(writer);
    }

    /// The environment holding the built-ins
    pub fn root(&self) -> &Env {
        &self.root
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// Parse a program without running it. Nesting is limited by the same
    /// depth as evaluation.
    pub fn parse(&self, source: &str) -> Result<Expr, EggError> {
        Ok(parser::parse_with_limit(source, self.interpreter.max_depth())?)
    }

    /// Join `fragments` with newlines, parse the result as one program and
    /// evaluate it in a fresh child of the root environment.
    pub fn run<S: AsRef<str>>(&self, fragments: &[S]) -> Result<Value, EggError> {
        let source = fragments
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join("\n");
        debug!(fragments = fragments.len(), bytes = source.len(), "run");

        let env = Environment::child(&self.root);
        self.eval_in(&source, &env)
    }

    /// Run a single source text
    pub fn eval(&self, source: &str) -> Result<Value, EggError> {
        self.run(&[source])
    }

    /// Start an interactive session whose definitions persist between calls
    pub fn session(&self) -> Session<'_> {
        Session {
            egg: self,
            env: Environment::child(&self.root),
        }
    }

    fn eval_in(&self, source: &str, env: &Env) -> Result<Value, EggError> {
        let program = self.parse(source).inspect_err(|err| {
            debug!(code = err.code(), "parse failed");
        })?;
        let value = self.interpreter.evaluate(&program, env).map_err(|err| {
            debug!(error = %err, "evaluation failed");
            EggError::from(err)
        })?;
        debug!(result = value.type_name(), "run finished");
        Ok(value)
    }
}

impl Default for Egg {
    fn default() -> Self {
        Self::new()
    }
}

/// A persistent top-level scope over an [`Egg`] runtime
pub struct Session<'a> {
    egg: &'a Egg,
    env: Env,
}

impl Session<'_> {
    /// Evaluate `source` in the session scope
    pub fn eval(&self, source: &str) -> Result<Value, EggError> {
        self.egg.eval_in(source, &self.env)
    }

    /// Drop every session definition and rebind every built-in name that a
    /// `set` may have overwritten in the root
    pub fn reset(&mut self) {
        debug!("session reset");
        stdlib::install(&self.egg.root);
        self.env = Environment::child(&self.egg.root);
    }

    /// Names defined so far in this session, sorted
    pub fn names(&self) -> Vec<String> {
        self.env.names()
    }
}

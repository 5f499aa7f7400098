//! AST interpreter (tree-walking)
//!
//! Direct AST evaluation against chained environments.
//! Supports:
//! - Literals and word lookup
//! - Application of builtins and closures
//! - Special forms (control flow, bindings, function construction)
//! - A nesting limit that turns runaway recursion into `StackExhausted`

mod call;
mod forms;

use crate::ast::{Expr, Literal};
use crate::environment::Env;
use crate::error::RuntimeError;
use crate::stack::ensure_sufficient_stack;
use crate::stdlib::{stdout_writer, OutputWriter};
use crate::value::Value;
use egg_config::RuntimeSettings;
use std::cell::Cell;

/// Interpreter state
///
/// Holds no program state of its own: bindings live in the environments
/// passed to [`Interpreter::evaluate`].
pub struct Interpreter {
    /// Destination for `print`
    output: OutputWriter,
    /// Nested evaluations allowed before failing
    max_depth: usize,
    /// Current nesting of `evaluate` calls
    depth: Cell<usize>,
}

impl Interpreter {
    /// Create an interpreter with default settings, printing to stdout
    pub fn new() -> Self {
        Self::with_settings(&RuntimeSettings::default())
    }

    pub fn with_settings(settings: &RuntimeSettings) -> Self {
        Self {
            output: stdout_writer(),
            max_depth: settings.max_depth,
            depth: Cell::new(0),
        }
    }

    /// Redirect `print` output
    pub fn set_output_writer(&mut self, writer: OutputWriter) {
        self.output = writer;
    }

    pub fn output(&self) -> &OutputWriter {
        &self.output
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Evaluate `expr` in `env`
    pub fn evaluate(&self, expr: &Expr, env: &Env) -> Result<Value, RuntimeError> {
        let _guard = self.enter()?;
        ensure_sufficient_stack(|| match expr {
            Expr::Literal(Literal::Number(n)) => Ok(Value::Number(*n)),
            Expr::Literal(Literal::String(s)) => Ok(Value::string(s)),
            Expr::Word(name) => env
                .lookup(name)
                .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.clone() }),
            Expr::Apply { operator, args } => self.eval_apply(operator, args, env),
            Expr::Form(form) => self.eval_form(form, env),
        })
    }

    fn eval_apply(&self, operator: &Expr, args: &[Expr], env: &Env) -> Result<Value, RuntimeError> {
        let callee = self.evaluate(operator, env)?;
        if !callee.is_callable() {
            return Err(RuntimeError::NotCallable {
                type_name: callee.type_name(),
            });
        }

        let args = args
            .iter()
            .map(|arg| self.evaluate(arg, env))
            .collect::<Result<Vec<_>, _>>()?;

        self.call_value(&callee, args)
    }

    fn enter(&self) -> Result<DepthGuard<'_>, RuntimeError> {
        let depth = self.depth.get() + 1;
        if depth > self.max_depth {
            return Err(RuntimeError::StackExhausted {
                limit: self.max_depth,
            });
        }
        self.depth.set(depth);
        Ok(DepthGuard { depth: &self.depth })
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Decrements the nesting counter when an evaluation finishes
struct DepthGuard<'a> {
    depth: &'a Cell<usize>,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get() - 1);
    }
}

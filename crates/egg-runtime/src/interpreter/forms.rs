//! Special form evaluation
//!
//! Forms receive their argument expressions unevaluated. Shapes were already
//! checked by the parser, so only runtime conditions can fail here.

use super::Interpreter;
use crate::ast::Form;
use crate::environment::{Env, SetResult};
use crate::error::RuntimeError;
use crate::value::{Closure, Value};
use std::rc::Rc;
use tracing::trace;

impl Interpreter {
    pub(super) fn eval_form(&self, form: &Form, env: &Env) -> Result<Value, RuntimeError> {
        trace!(form = form.kind().name(), "special form");
        match form {
            Form::If {
                cond,
                then,
                otherwise,
            } => {
                if self.evaluate(cond, env)?.is_false() {
                    self.evaluate(otherwise, env)
                } else {
                    self.evaluate(then, env)
                }
            }
            Form::While { cond, body } => {
                while !self.evaluate(cond, env)?.is_false() {
                    self.evaluate(body, env)?;
                }
                Ok(Value::Bool(false))
            }
            Form::For {
                init,
                cond,
                step,
                body,
            } => {
                self.evaluate(init, env)?;
                while !self.evaluate(cond, env)?.is_false() {
                    self.evaluate(body, env)?;
                    self.evaluate(step, env)?;
                }
                Ok(Value::Bool(false))
            }
            Form::Fun { params, body } => Ok(Value::Closure(Rc::new(Closure {
                params: Rc::clone(params),
                body: Rc::clone(body),
                env: Rc::clone(env),
            }))),
            Form::Do(exprs) => {
                let mut value = Value::Bool(false);
                for expr in exprs {
                    value = self.evaluate(expr, env)?;
                }
                Ok(value)
            }
            Form::Define { name, value } => {
                let value = self.evaluate(value, env)?;
                env.define(name.as_str(), value.clone());
                Ok(value)
            }
            Form::Set { name, value } => {
                // Undeclared names fail before the value is evaluated
                if !env.is_bound(name) {
                    return Err(undeclared(name));
                }
                let value = self.evaluate(value, env)?;
                match env.set(name, value.clone()) {
                    SetResult::Success => Ok(value),
                    SetResult::Undeclared => Err(undeclared(name)),
                }
            }
        }
    }
}

fn undeclared(name: &str) -> RuntimeError {
    RuntimeError::UndeclaredVariable {
        name: name.to_string(),
    }
}

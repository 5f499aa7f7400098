//! Function application

use super::Interpreter;
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::value::{Closure, Value};
use tracing::trace;

impl Interpreter {
    /// Call an already-evaluated callee with evaluated arguments
    pub fn call_value(&self, callee: &Value, args: Vec<Value>) -> Result<Value, RuntimeError> {
        match callee {
            Value::Builtin(builtin) => builtin.call(self, args),
            Value::Closure(closure) => self.call_closure(closure, args),
            other => Err(RuntimeError::NotCallable {
                type_name: other.type_name(),
            }),
        }
    }

    /// Bind arguments in a fresh frame whose parent is the closure's
    /// defining environment, then evaluate the body there.
    fn call_closure(&self, closure: &Closure, args: Vec<Value>) -> Result<Value, RuntimeError> {
        if args.len() != closure.params.len() {
            return Err(RuntimeError::ArityMismatch {
                name: format!("fun({})", closure.params.join(", ")),
                expected: closure.params.len().to_string(),
                got: args.len(),
            });
        }

        trace!(params = closure.params.len(), "calling closure");
        let local = Environment::child(&closure.env);
        for (param, arg) in closure.params.iter().zip(args) {
            local.define(param.as_str(), arg);
        }
        self.evaluate(&closure.body, &local)
    }
}

//! Standard library: the builtins bound in every root environment

pub mod array;
pub mod operators;

use crate::environment::{Env, Environment};
use crate::error::RuntimeError;
use crate::interpreter::Interpreter;
use crate::value::{Arity, Builtin, Value};
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// Shared sink for `print`
pub type OutputWriter = Rc<RefCell<dyn Write>>;

/// Writer that forwards to the process's stdout
pub fn stdout_writer() -> OutputWriter {
    Rc::new(RefCell::new(io::stdout()))
}

/// In-memory output sink; clones share the same buffer
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// An [`OutputWriter`] appending to this buffer
    pub fn writer(&self) -> OutputWriter {
        Rc::new(RefCell::new(self.clone()))
    }

    /// Everything written so far, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

const fn builtin(name: &'static str, arity: usize, func: crate::value::BuiltinFn) -> Builtin {
    Builtin {
        name,
        arity: Arity::Exact(arity),
        func,
    }
}

/// Every builtin, in registration order
pub static BUILTINS: &[Builtin] = &[
    builtin("+", 2, operators::add),
    builtin("-", 2, operators::sub),
    builtin("*", 2, operators::mul),
    builtin("/", 2, operators::div),
    builtin("==", 2, operators::eq),
    builtin("<", 2, operators::lt),
    builtin(">", 2, operators::gt),
    builtin("<=", 2, operators::le),
    builtin(">=", 2, operators::ge),
    builtin("print", 1, print),
    Builtin {
        name: "array",
        arity: Arity::Any,
        func: array::array,
    },
    builtin("length", 1, array::length),
    builtin("element", 2, array::element),
    builtin("sort", 1, array::sort),
    builtin("sum", 1, array::sum),
    builtin("sumarray", 2, array::sumarray),
];

/// Bind `true`, `false` and every builtin in `env`
pub fn install(env: &Environment) {
    env.define("true", Value::Bool(true));
    env.define("false", Value::Bool(false));
    for builtin in BUILTINS {
        env.define(builtin.name, Value::Builtin(*builtin));
    }
}

/// A fresh root environment holding the standard library
pub fn root_environment() -> Env {
    let env = Environment::root();
    install(&env);
    env
}

/// Destructure exactly `N` arguments
pub(crate) fn take<const N: usize>(name: &str, args: Vec<Value>) -> Result<[Value; N], RuntimeError> {
    let got = args.len();
    args.try_into().map_err(|_| RuntimeError::ArityMismatch {
        name: name.to_string(),
        expected: N.to_string(),
        got,
    })
}

/// `print(v)`: write the display form of `v` and a newline; returns `v`
pub fn print(interpreter: &Interpreter, args: Vec<Value>) -> Result<Value, RuntimeError> {
    let [value] = take("print", args)?;
    writeln!(interpreter.output().borrow_mut(), "{}", value).map_err(|e| RuntimeError::Output {
        message: e.to_string(),
    })?;
    Ok(value)
}

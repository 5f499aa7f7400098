//! Runtime value representation
//!
//! - Numbers, Bools: immediate values
//! - Strings: reference-counted, immutable
//! - Arrays: shared, mutable (`Rc<RefCell<Vec<Value>>>`); cloning a value
//!   aliases the same array
//! - Builtins: host functions from the static library table
//! - Closures: parameters + body + defining environment

use crate::ast::Expr;
use crate::environment::Env;
use crate::error::RuntimeError;
use crate::interpreter::Interpreter;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

/// Shared mutable array. Cheap to clone (refcount bump); clones alias.
#[derive(Clone, Debug, Default)]
pub struct ValueArray(Rc<RefCell<Vec<Value>>>);

impl ValueArray {
    pub fn from_vec(v: Vec<Value>) -> Self {
        ValueArray(Rc::new(RefCell::new(v)))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Get a copy of the element at `index`
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    /// Borrow the elements for reading
    pub fn borrow(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }

    /// Snapshot of the current elements
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    /// True when both handles refer to the same array
    pub fn ptr_eq(&self, other: &ValueArray) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ValueArray {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.0.borrow() == *other.0.borrow()
    }
}

impl FromIterator<Value> for ValueArray {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        ValueArray::from_vec(iter.into_iter().collect())
    }
}

/// Host function signature
pub type BuiltinFn = fn(&Interpreter, Vec<Value>) -> Result<Value, RuntimeError>;

/// Accepted argument counts for a builtin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Any,
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{}", n),
            Arity::Any => write!(f, "any number"),
        }
    }
}

/// A primitive provided by the host
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub arity: Arity,
    pub func: BuiltinFn,
}

impl Builtin {
    /// Check arity, then run the host function
    pub fn call(&self, interpreter: &Interpreter, args: Vec<Value>) -> Result<Value, RuntimeError> {
        if let Arity::Exact(n) = self.arity {
            if args.len() != n {
                return Err(RuntimeError::ArityMismatch {
                    name: self.name.to_string(),
                    expected: self.arity.to_string(),
                    got: args.len(),
                });
            }
        }
        (self.func)(interpreter, args)
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

/// A user-defined function value
pub struct Closure {
    pub params: Rc<[String]>,
    pub body: Rc<Expr>,
    /// Environment active where the `fun` form was evaluated
    pub env: Env,
}

impl fmt::Debug for Closure {
    // The defining environment may contain this closure; never print it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("params", &self.params)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

/// Runtime value
#[derive(Debug, Clone)]
pub enum Value {
    Number(f64),
    Bool(bool),
    String(Rc<str>),
    Array(ValueArray),
    Builtin(Builtin),
    Closure(Rc<Closure>),
}

impl Value {
    pub fn string(s: impl AsRef<str>) -> Value {
        Value::String(Rc::from(s.as_ref()))
    }

    pub fn array(elements: Vec<Value>) -> Value {
        Value::Array(ValueArray::from_vec(elements))
    }

    /// Name of the value's kind, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Bool(_) => "boolean",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Builtin(_) => "builtin",
            Value::Closure(_) => "function",
        }
    }

    /// Only the boolean `false` is false; every other value counts as true
    pub fn is_false(&self) -> bool {
        matches!(self, Value::Bool(false))
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Builtin(_) | Value::Closure(_))
    }

    /// Identity-based equality used by the `==` builtin: scalars compare by
    /// value, arrays and callables by reference.
    pub fn same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Builtin(a), Value::Builtin(b)) => a.name == b.name,
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "\"{}\"", s),
            other => write!(f, "{}", other),
        }
    }
}

/// Structural equality (arrays compare element-wise)
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Array(a), Value::Array(b)) => a == b,
            _ => self.same(other),
        }
    }
}

pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::Bool(b) => write!(f, "{}", b),
            Value::String(s) => write!(f, "{}", s),
            Value::Array(arr) => {
                write!(f, "[")?;
                for (i, elem) in arr.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    elem.fmt_nested(f)?;
                }
                write!(f, "]")
            }
            Value::Builtin(b) => write!(f, "<builtin {}>", b.name),
            Value::Closure(c) => write!(f, "<fun({})>", c.params.join(", ")),
        }
    }
}

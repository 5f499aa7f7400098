//! Arithmetic and comparison operators
//!
//! Every operator takes exactly two arguments.

use super::take;
use crate::error::RuntimeError;
use crate::interpreter::Interpreter;
use crate::value::Value;
use std::cmp::Ordering;

/// `+`: numeric addition, or concatenation of two strings
pub fn add(_: &Interpreter, args: Vec<Value>) -> Result<Value, RuntimeError> {
    let [a, b] = take("+", args)?;
    add_values(&a, &b)
}

pub(crate) fn add_values(a: &Value, b: &Value) -> Result<Value, RuntimeError> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => Ok(Value::Number(x + y)),
        (Value::String(x), Value::String(y)) => Ok(Value::string(format!("{}{}", x, y))),
        _ => Err(operand_error("+", a, b)),
    }
}

pub fn sub(_: &Interpreter, args: Vec<Value>) -> Result<Value, RuntimeError> {
    arithmetic("-", args, |x, y| x - y)
}

pub fn mul(_: &Interpreter, args: Vec<Value>) -> Result<Value, RuntimeError> {
    arithmetic("*", args, |x, y| x * y)
}

/// IEEE division: `/(1, 0)` is Infinity
pub fn div(_: &Interpreter, args: Vec<Value>) -> Result<Value, RuntimeError> {
    arithmetic("/", args, |x, y| x / y)
}

fn arithmetic(name: &str, args: Vec<Value>, op: fn(f64, f64) -> f64) -> Result<Value, RuntimeError> {
    match take(name, args)? {
        [Value::Number(x), Value::Number(y)] => Ok(Value::Number(op(x, y))),
        [a, b] => Err(operand_error(name, &a, &b)),
    }
}

/// `==`: scalars by value, arrays and functions by identity
pub fn eq(_: &Interpreter, args: Vec<Value>) -> Result<Value, RuntimeError> {
    let [a, b] = take("==", args)?;
    Ok(Value::Bool(a.same(&b)))
}

pub fn lt(_: &Interpreter, args: Vec<Value>) -> Result<Value, RuntimeError> {
    compare("<", args, |o| o == Ordering::Less)
}

pub fn gt(_: &Interpreter, args: Vec<Value>) -> Result<Value, RuntimeError> {
    compare(">", args, |o| o == Ordering::Greater)
}

pub fn le(_: &Interpreter, args: Vec<Value>) -> Result<Value, RuntimeError> {
    compare("<=", args, |o| o != Ordering::Greater)
}

pub fn ge(_: &Interpreter, args: Vec<Value>) -> Result<Value, RuntimeError> {
    compare(">=", args, |o| o != Ordering::Less)
}

/// Order two numbers or two strings. Comparisons involving NaN are false.
fn compare(name: &str, args: Vec<Value>, test: fn(Ordering) -> bool) -> Result<Value, RuntimeError> {
    let [a, b] = take(name, args)?;
    let ordering = match (&a, &b) {
        (Value::Number(x), Value::Number(y)) => x.partial_cmp(y),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => return Err(operand_error(name, &a, &b)),
    };
    Ok(Value::Bool(ordering.is_some_and(test)))
}

fn operand_error(name: &str, a: &Value, b: &Value) -> RuntimeError {
    RuntimeError::type_mismatch(format!(
        "cannot apply {} to {} and {}",
        name,
        a.type_name(),
        b.type_name()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn n(x: f64) -> Value {
        Value::Number(x)
    }

    #[rstest]
    #[case(add as fn(&Interpreter, Vec<Value>) -> Result<Value, RuntimeError>, 7.0, 2.0, 9.0)]
    #[case(sub, 7.0, 2.0, 5.0)]
    #[case(mul, 7.0, 2.0, 14.0)]
    #[case(div, 7.0, 2.0, 3.5)]
    fn test_arithmetic(
        #[case] op: fn(&Interpreter, Vec<Value>) -> Result<Value, RuntimeError>,
        #[case] a: f64,
        #[case] b: f64,
        #[case] expected: f64,
    ) {
        assert_eq!(op(&Interpreter::new(), vec![n(a), n(b)]), Ok(n(expected)));
    }

    #[test]
    fn test_division_by_zero_is_infinite() {
        let result = div(&Interpreter::new(), vec![n(1.0), n(0.0)]).unwrap();
        assert_eq!(result, n(f64::INFINITY));
    }

    #[test]
    fn test_string_concatenation() {
        let result = add(&Interpreter::new(), vec![Value::string("eg"), Value::string("g")]);
        assert_eq!(result, Ok(Value::string("egg")));
    }

    #[test]
    fn test_mixed_operands_rejected() {
        let err = add(&Interpreter::new(), vec![n(1.0), Value::string("1")]).unwrap_err();
        assert_eq!(
            err,
            RuntimeError::type_mismatch("cannot apply + to number and string")
        );
        assert!(sub(&Interpreter::new(), vec![Value::string("a"), Value::string("b")]).is_err());
    }

    #[rstest]
    #[case(lt as fn(&Interpreter, Vec<Value>) -> Result<Value, RuntimeError>, 1.0, 2.0, true)]
    #[case(lt, 2.0, 2.0, false)]
    #[case(gt, 3.0, 2.0, true)]
    #[case(le, 2.0, 2.0, true)]
    #[case(ge, 1.0, 2.0, false)]
    #[case(lt, f64::NAN, 2.0, false)]
    #[case(ge, f64::NAN, f64::NAN, false)]
    fn test_numeric_comparison(
        #[case] op: fn(&Interpreter, Vec<Value>) -> Result<Value, RuntimeError>,
        #[case] a: f64,
        #[case] b: f64,
        #[case] expected: bool,
    ) {
        assert_eq!(op(&Interpreter::new(), vec![n(a), n(b)]), Ok(Value::Bool(expected)));
    }

    #[test]
    fn test_string_comparison() {
        let result = lt(&Interpreter::new(), vec![Value::string("abc"), Value::string("abd")]);
        assert_eq!(result, Ok(Value::Bool(true)));
        assert!(lt(&Interpreter::new(), vec![n(1.0), Value::string("2")]).is_err());
    }

    #[test]
    fn test_equality_by_identity_for_arrays() {
        let interpreter = Interpreter::new();
        let a = Value::array(vec![n(1.0)]);
        let b = Value::array(vec![n(1.0)]);
        assert_eq!(eq(&interpreter, vec![a.clone(), a.clone()]), Ok(Value::Bool(true)));
        assert_eq!(eq(&interpreter, vec![a, b]), Ok(Value::Bool(false)));
        assert_eq!(
            eq(&interpreter, vec![n(1.0), Value::string("1")]),
            Ok(Value::Bool(false))
        );
    }
}

//! Array builtins
//!
//! Arrays are shared by reference; none of these functions mutate their
//! inputs.

use super::operators::add_values;
use super::take;
use crate::error::RuntimeError;
use crate::interpreter::Interpreter;
use crate::value::{format_number, Value, ValueArray};
use std::cmp::Ordering;

/// `array(...)`: a new array of the arguments, in order
pub fn array(_: &Interpreter, args: Vec<Value>) -> Result<Value, RuntimeError> {
    Ok(Value::array(args))
}

/// `length(a)`: element count of an array, or character count of a string
pub fn length(_: &Interpreter, args: Vec<Value>) -> Result<Value, RuntimeError> {
    let [value] = take("length", args)?;
    let len = match &value {
        Value::Array(arr) => arr.len(),
        Value::String(s) => s.chars().count(),
        other => {
            return Err(RuntimeError::type_mismatch(format!(
                "length expects an array or string, got {}",
                other.type_name()
            )))
        }
    };
    Ok(Value::Number(len as f64))
}

/// `element(a, i)`: the element at zero-based integral index `i`
pub fn element(_: &Interpreter, args: Vec<Value>) -> Result<Value, RuntimeError> {
    let [target, index] = take("element", args)?;
    let arr = expect_array("element", &target)?;
    let Value::Number(i) = index else {
        return Err(RuntimeError::type_mismatch(format!(
            "element index must be a number, got {}",
            index.type_name()
        )));
    };

    let out_of_range = || RuntimeError::IndexOutOfRange {
        index: format_number(i),
        len: arr.len(),
    };
    if i.fract() != 0.0 || i < 0.0 {
        return Err(out_of_range());
    }
    arr.get(i as usize).ok_or_else(out_of_range)
}

/// `sort(a)`: a new array with the elements in ascending order.
///
/// Numbers sort numerically, strings by code point, booleans false first.
/// Mixing kinds is a type error.
pub fn sort(_: &Interpreter, args: Vec<Value>) -> Result<Value, RuntimeError> {
    let [target] = take("sort", args)?;
    let mut elements = expect_array("sort", &target)?.to_vec();

    if let Some(first) = elements.first() {
        let kind = first.type_name();
        if let Some(odd) = elements.iter().find(|v| v.type_name() != kind) {
            return Err(RuntimeError::type_mismatch(format!(
                "cannot sort an array mixing {} and {}",
                kind,
                odd.type_name()
            )));
        }
        if !matches!(first, Value::Number(_) | Value::String(_) | Value::Bool(_)) {
            return Err(RuntimeError::type_mismatch(format!(
                "cannot sort an array of {}",
                kind
            )));
        }
    }

    elements.sort_by(compare_sortable);
    Ok(Value::array(elements))
}

fn compare_sortable(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.total_cmp(y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

/// `sum(a)`: `+` folded over the elements, starting from 0
pub fn sum(_: &Interpreter, args: Vec<Value>) -> Result<Value, RuntimeError> {
    let [target] = take("sum", args)?;
    let elements = expect_array("sum", &target)?.to_vec();
    let total = elements
        .iter()
        .try_fold(Value::Number(0.0), |acc, v| add_values(&acc, v))?;
    Ok(total)
}

/// `sumarray(a, b)`: element-wise `+` of two arrays of equal length
pub fn sumarray(_: &Interpreter, args: Vec<Value>) -> Result<Value, RuntimeError> {
    let [left, right] = take("sumarray", args)?;
    let left = expect_array("sumarray", &left)?;
    let right = expect_array("sumarray", &right)?;

    if left.len() != right.len() {
        return Err(RuntimeError::LengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }

    let (left, right) = (left.to_vec(), right.to_vec());
    let sums = left
        .iter()
        .zip(&right)
        .map(|(a, b)| add_values(a, b))
        .collect::<Result<ValueArray, _>>()?;
    Ok(Value::Array(sums))
}

fn expect_array<'a>(name: &str, value: &'a Value) -> Result<&'a ValueArray, RuntimeError> {
    match value {
        Value::Array(arr) => Ok(arr),
        other => Err(RuntimeError::type_mismatch(format!(
            "{} expects an array, got {}",
            name,
            other.type_name()
        ))),
    }
}

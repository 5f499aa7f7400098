//! Shared test helpers

#![allow(dead_code)]

use egg_runtime::{Egg, EggError, ErrorKind, SharedBuffer, Value};

// Re-export testing utilities
pub use pretty_assertions::{assert_eq, assert_ne};

/// Assert that source code evaluates to a number
pub fn assert_eval_number(source: &str, expected: f64) {
    match Egg::new().eval(source) {
        Ok(Value::Number(n)) => assert_eq!(n, expected, "Expected {}, got {}", expected, n),
        other => panic!("Expected Number({}), got {:?}", expected, other),
    }
}

/// Assert that source code evaluates to a string
pub fn assert_eval_string(source: &str, expected: &str) {
    match Egg::new().eval(source) {
        Ok(Value::String(s)) => assert_eq!(s.as_ref(), expected),
        other => panic!("Expected String({:?}), got {:?}", expected, other),
    }
}

/// Assert that source code evaluates to a boolean
pub fn assert_eval_bool(source: &str, expected: bool) {
    match Egg::new().eval(source) {
        Ok(Value::Bool(b)) => assert_eq!(b, expected, "Expected {}, got {}", expected, b),
        other => panic!("Expected Bool({}), got {:?}", expected, other),
    }
}

/// Assert that source code evaluates to an array of numbers
pub fn assert_eval_numbers(source: &str, expected: &[f64]) {
    let expected = Value::array(expected.iter().map(|&n| Value::Number(n)).collect());
    match Egg::new().eval(source) {
        Ok(value) => assert_eq!(value, expected),
        Err(err) => panic!("Expected {}, got error {}", expected, err),
    }
}

/// Assert that evaluation fails with the given error kind
pub fn assert_error_kind(source: &str, kind: ErrorKind) -> EggError {
    match Egg::new().eval(source) {
        Err(err) => {
            assert_eq!(err.kind(), kind, "unexpected error: {}", err);
            err
        }
        Ok(value) => panic!("Expected {:?} error, got {}", kind, value),
    }
}

/// Run fragments and capture everything printed
pub fn run_capturing(fragments: &[&str]) -> (Result<Value, EggError>, String) {
    let buffer = SharedBuffer::new();
    let mut egg = Egg::new();
    egg.set_output_writer(buffer.writer());
    let result = egg.run(fragments);
    (result, buffer.contents())
}

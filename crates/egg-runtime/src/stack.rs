//! Host stack growth for nested programs
//!
//! The parser recurses once per nested expression and the evaluator once per
//! nested evaluation. Both run their recursive step through
//! [`ensure_sufficient_stack`], so how deep a program may go is decided by
//! the configured `max_depth` alone and never by the size of the thread's
//! stack.

/// Space that must remain on the current stack segment before recursing
const RED_ZONE: usize = 128 * 1024;

/// Size of each new segment allocated when the red zone is reached
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first switching to a fresh stack segment if less than the red
/// zone is left.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[cfg(test)]
mod tests {
    use crate::error::{EggError, RuntimeError};
    use crate::runtime::Egg;
    use crate::value::Value;
    use egg_config::RuntimeSettings;

    fn egg_with_depth(max_depth: usize) -> Egg {
        Egg::with_settings(RuntimeSettings { max_depth })
    }

    #[test]
    fn test_deeply_nested_arrays_evaluate() {
        let depth = 1_500;
        let source = format!("{}7{}", "array(".repeat(depth), ")".repeat(depth));
        let mut value = egg_with_depth(50_000).eval(&source).unwrap();

        let mut levels = 0;
        while let Value::Array(arr) = value {
            assert_eq!(arr.len(), 1);
            value = arr.to_vec().remove(0);
            levels += 1;
        }
        assert_eq!(levels, depth);
        assert_eq!(value, Value::Number(7.0));
    }

    #[test]
    fn test_deep_closure_recursion() {
        let source = "do(define(count, fun(n, if(==(n, 0), 0, +(1, count(-(n, 1)))))), count(5000))";
        assert_eq!(
            egg_with_depth(100_000).eval(source),
            Ok(Value::Number(5000.0))
        );
    }

    #[test]
    fn test_limit_reached_before_host_stack() {
        let source = "do(define(loop, fun(n, loop(+(n, 1)))), loop(0))";
        assert_eq!(
            egg_with_depth(20_000).eval(source),
            Err(EggError::Runtime(RuntimeError::StackExhausted { limit: 20_000 }))
        );
    }
}

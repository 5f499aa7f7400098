//! Egg Runtime - Core language implementation
//!
//! This library provides the complete Egg language runtime:
//! - Comment/whitespace skipping and recursive-descent parsing
//! - The expression tree (literals, words, applications, special forms)
//! - Chained lexical environments
//! - Tree-walking evaluation
//! - The built-in library (operators, arrays, print)

/// Egg runtime version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Public API modules
pub mod ast;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod runtime;
pub mod skipper;
pub mod stack;
pub mod stdlib;
pub mod value;

// Re-export commonly used types
pub use ast::{Expr, Form, Literal};
pub use egg_config::RuntimeSettings;
pub use environment::{Env, Environment};
pub use error::{EggError, ErrorKind, RuntimeError, SyntaxError};
pub use interpreter::Interpreter;
pub use parser::parse;
pub use runtime::{Egg, Session};
pub use stdlib::{OutputWriter, SharedBuffer};
pub use value::{Builtin, Closure, Value, ValueArray};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoke() {
        assert_eq!(VERSION, "0.1.0");
    }
}

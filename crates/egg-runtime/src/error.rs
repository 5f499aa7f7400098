//! Error types
//!
//! Syntax errors come only from parsing (including special-form shape
//! checks and the nesting limit). Runtime errors come only from evaluation. Both abort the current
//! run and propagate to the top-level runner unchanged.

use thiserror::Error;

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Syntax,
    Reference,
    Type,
    Value,
    IndexOutOfRange,
    StackExhausted,
    Output,
}

/// Parse-time errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxError {
    #[error("Unexpected syntax: {text}")]
    UnexpectedSyntax { text: String },

    #[error("Expected ',' or ')', found {found}")]
    ExpectedCommaOrParen { found: String },

    #[error("Unexpected text after program: {text}")]
    TrailingText { text: String },

    #[error("Bad use of {form}: {reason}")]
    BadSpecialForm { form: String, reason: String },

    #[error("Maximum nesting depth of {limit} exceeded")]
    NestingTooDeep { limit: usize },
}

impl SyntaxError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SyntaxError::NestingTooDeep { .. } => ErrorKind::StackExhausted,
            _ => ErrorKind::Syntax,
        }
    }
}

/// Evaluation-time errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// Lookup of a word bound in no frame of the chain
    #[error("Undefined variable: {name}")]
    UndefinedVariable { name: String },

    /// `set` on a name bound in no frame of the chain
    #[error("Variable not declared: {name}")]
    UndeclaredVariable { name: String },

    #[error("Applying a non-function: {type_name}")]
    NotCallable { type_name: &'static str },

    #[error("Wrong number of arguments to {name}: expected {expected}, got {got}")]
    ArityMismatch {
        name: String,
        expected: String,
        got: usize,
    },

    #[error("Type error: {msg}")]
    TypeMismatch { msg: String },

    #[error("Array length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Index {index} out of range for array of length {len}")]
    IndexOutOfRange { index: String, len: usize },

    #[error("Maximum evaluation depth of {limit} exceeded")]
    StackExhausted { limit: usize },

    #[error("Failed to write output: {message}")]
    Output { message: String },
}

impl RuntimeError {
    pub(crate) fn type_mismatch(msg: impl Into<String>) -> Self {
        RuntimeError::TypeMismatch { msg: msg.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RuntimeError::UndefinedVariable { .. } | RuntimeError::UndeclaredVariable { .. } => {
                ErrorKind::Reference
            }
            RuntimeError::NotCallable { .. }
            | RuntimeError::ArityMismatch { .. }
            | RuntimeError::TypeMismatch { .. } => ErrorKind::Type,
            RuntimeError::LengthMismatch { .. } => ErrorKind::Value,
            RuntimeError::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            RuntimeError::StackExhausted { .. } => ErrorKind::StackExhausted,
            RuntimeError::Output { .. } => ErrorKind::Output,
        }
    }
}

/// Any error a run can end with
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EggError {
    #[error("{label}: {0}", label = .0.kind().label())]
    Syntax(#[from] SyntaxError),

    #[error("{label}: {0}", label = .0.kind().label())]
    Runtime(#[from] RuntimeError),
}

impl EggError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EggError::Syntax(err) => err.kind(),
            EggError::Runtime(err) => err.kind(),
        }
    }

    /// Stable diagnostic code
    pub fn code(&self) -> &'static str {
        match self {
            EggError::Syntax(SyntaxError::UnexpectedSyntax { .. }) => "EG0101",
            EggError::Syntax(SyntaxError::ExpectedCommaOrParen { .. }) => "EG0102",
            EggError::Syntax(SyntaxError::TrailingText { .. }) => "EG0103",
            EggError::Syntax(SyntaxError::BadSpecialForm { .. }) => "EG0104",
            EggError::Syntax(SyntaxError::NestingTooDeep { .. }) => "EG0503",
            EggError::Runtime(RuntimeError::UndefinedVariable { .. }) => "EG0201",
            EggError::Runtime(RuntimeError::UndeclaredVariable { .. }) => "EG0202",
            EggError::Runtime(RuntimeError::NotCallable { .. }) => "EG0301",
            EggError::Runtime(RuntimeError::ArityMismatch { .. }) => "EG0302",
            EggError::Runtime(RuntimeError::TypeMismatch { .. }) => "EG0303",
            EggError::Runtime(RuntimeError::LengthMismatch { .. }) => "EG0401",
            EggError::Runtime(RuntimeError::IndexOutOfRange { .. }) => "EG0402",
            EggError::Runtime(RuntimeError::StackExhausted { .. }) => "EG0501",
            EggError::Runtime(RuntimeError::Output { .. }) => "EG0502",
        }
    }
}

impl ErrorKind {
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::Syntax => "SyntaxError",
            ErrorKind::Reference => "ReferenceError",
            ErrorKind::Type => "TypeError",
            ErrorKind::Value | ErrorKind::IndexOutOfRange => "ValueError",
            ErrorKind::StackExhausted => "StackExhausted",
            ErrorKind::Output => "OutputError",
        }
    }
}

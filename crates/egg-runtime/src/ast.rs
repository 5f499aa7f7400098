//! Abstract Syntax Tree (AST) definitions
//!
//! Nodes are immutable once the parser has produced them. Applications whose
//! operator is a word naming a special form are resolved into [`Form`] nodes
//! at construction time, so the evaluator dispatches on a tag instead of
//! looking names up at runtime.

use crate::error::SyntaxError;
use serde::Serialize;
use std::fmt;
use std::rc::Rc;

/// An expression node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    /// A number or string constant
    Literal(Literal),
    /// A bare identifier reference
    Word(String),
    /// An ordinary call; `operator` may itself be an application
    Apply {
        operator: Box<Expr>,
        args: Vec<Expr>,
    },
    /// A resolved special form (receives its arguments unevaluated)
    Form(Form),
}

/// Literal values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    Number(f64),
    String(String),
}

/// Special forms, with their arity already checked
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Form {
    If {
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    While {
        cond: Box<Expr>,
        body: Box<Expr>,
    },
    For {
        init: Box<Expr>,
        cond: Box<Expr>,
        step: Box<Expr>,
        body: Box<Expr>,
    },
    /// Closure constructor; params and body are shared with every closure
    /// value created from this node.
    Fun {
        params: Rc<[String]>,
        body: Rc<Expr>,
    },
    Do(Vec<Expr>),
    Define {
        name: String,
        value: Box<Expr>,
    },
    Set {
        name: String,
        value: Box<Expr>,
    },
}

/// Names of the special forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    If,
    While,
    For,
    Fun,
    Do,
    Define,
    Set,
}

impl FormKind {
    /// Look up the special form named `name`
    pub fn from_name(name: &str) -> Option<FormKind> {
        match name {
            "if" => Some(FormKind::If),
            "while" => Some(FormKind::While),
            "for" => Some(FormKind::For),
            "fun" => Some(FormKind::Fun),
            "do" => Some(FormKind::Do),
            "define" => Some(FormKind::Define),
            "set" => Some(FormKind::Set),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FormKind::If => "if",
            FormKind::While => "while",
            FormKind::For => "for",
            FormKind::Fun => "fun",
            FormKind::Do => "do",
            FormKind::Define => "define",
            FormKind::Set => "set",
        }
    }
}

impl Expr {
    pub fn number(n: f64) -> Expr {
        Expr::Literal(Literal::Number(n))
    }

    pub fn string(s: impl Into<String>) -> Expr {
        Expr::Literal(Literal::String(s.into()))
    }

    pub fn word(name: impl Into<String>) -> Expr {
        Expr::Word(name.into())
    }

    /// Pretty-printed JSON form of the tree
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Build an application node.
    ///
    /// When `operator` is a word naming a special form the result is the
    /// resolved [`Form`]; shape errors (arity, non-word names) are reported
    /// here, while the program is still being parsed.
    pub fn apply(operator: Expr, args: Vec<Expr>) -> Result<Expr, SyntaxError> {
        if let Expr::Word(name) = &operator {
            if let Some(kind) = FormKind::from_name(name) {
                return Form::resolve(kind, args).map(Expr::Form);
            }
        }
        Ok(Expr::Apply {
            operator: Box::new(operator),
            args,
        })
    }
}

impl Form {
    /// Check the argument shape of a special form and build its node
    pub fn resolve(kind: FormKind, args: Vec<Expr>) -> Result<Form, SyntaxError> {
        let bad = |reason: &str| SyntaxError::BadSpecialForm {
            form: kind.name().to_string(),
            reason: reason.to_string(),
        };

        match kind {
            FormKind::If => {
                let [cond, then, otherwise] = exact::<3>(args).map_err(|_| bad("expected 3 arguments"))?;
                Ok(Form::If {
                    cond: Box::new(cond),
                    then: Box::new(then),
                    otherwise: Box::new(otherwise),
                })
            }
            FormKind::While => {
                let [cond, body] = exact::<2>(args).map_err(|_| bad("expected 2 arguments"))?;
                Ok(Form::While {
                    cond: Box::new(cond),
                    body: Box::new(body),
                })
            }
            FormKind::For => {
                let [init, cond, step, body] =
                    exact::<4>(args).map_err(|_| bad("expected 4 arguments"))?;
                Ok(Form::For {
                    init: Box::new(init),
                    cond: Box::new(cond),
                    step: Box::new(step),
                    body: Box::new(body),
                })
            }
            FormKind::Fun => {
                let mut args = args;
                let body = args.pop().ok_or_else(|| bad("functions need a body"))?;
                let params = args
                    .into_iter()
                    .map(|param| match param {
                        Expr::Word(name) => Ok(name),
                        _ => Err(bad("parameter names must be words")),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Form::Fun {
                    params: params.into(),
                    body: Rc::new(body),
                })
            }
            FormKind::Do => Ok(Form::Do(args)),
            FormKind::Define | FormKind::Set => {
                let [target, value] = exact::<2>(args).map_err(|_| bad("expected 2 arguments"))?;
                let Expr::Word(name) = target else {
                    return Err(bad("first argument must be a word"));
                };
                let value = Box::new(value);
                Ok(if kind == FormKind::Define {
                    Form::Define { name, value }
                } else {
                    Form::Set { name, value }
                })
            }
        }
    }

    pub fn kind(&self) -> FormKind {
        match self {
            Form::If { .. } => FormKind::If,
            Form::While { .. } => FormKind::While,
            Form::For { .. } => FormKind::For,
            Form::Fun { .. } => FormKind::Fun,
            Form::Do(_) => FormKind::Do,
            Form::Define { .. } => FormKind::Define,
            Form::Set { .. } => FormKind::Set,
        }
    }
}

fn exact<const N: usize>(args: Vec<Expr>) -> Result<[Expr; N], Vec<Expr>> {
    args.try_into()
}

/// Renders source text that parses back to an equal tree
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(Literal::Number(n)) => write!(f, "{}", n),
            Expr::Literal(Literal::String(s)) => write!(f, "\"{}\"", s),
            Expr::Word(name) => write!(f, "{}", name),
            Expr::Apply { operator, args } => {
                write!(f, "{}(", operator)?;
                write_args(f, args.iter())?;
                write!(f, ")")
            }
            Expr::Form(form) => write!(f, "{}", form),
        }
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.kind().name())?;
        match self {
            Form::If {
                cond,
                then,
                otherwise,
            } => write_args(f, [&**cond, &**then, &**otherwise].into_iter())?,
            Form::While { cond, body } => write_args(f, [&**cond, &**body].into_iter())?,
            Form::For {
                init,
                cond,
                step,
                body,
            } => write_args(f, [&**init, &**cond, &**step, &**body].into_iter())?,
            Form::Fun { params, body } => {
                for param in params.iter() {
                    write!(f, "{}, ", param)?;
                }
                write!(f, "{}", body)?;
            }
            Form::Do(exprs) => write_args(f, exprs.iter())?,
            Form::Define { name, value } | Form::Set { name, value } => {
                write!(f, "{}, {}", name, value)?
            }
        }
        write!(f, ")")
    }
}

fn write_args<'a>(
    f: &mut fmt::Formatter<'_>,
    args: impl Iterator<Item = &'a Expr>,
) -> fmt::Result {
    for (i, arg) in args.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", arg)?;
    }
    Ok(())
}

//! Recursive-descent parser
//!
//! Comments are stripped from the program once; after that the parser walks
//! borrowed slices of the result, trimming whitespace before every token.
//! Each step recognizes one primitive, then looks for argument lists.
//! Primitive recognition order (first match wins):
//! 1. `"..."` string (no escapes, no embedded quotes)
//! 2. integer: optional `-`, digits, word boundary
//! 3. float: optional sign, digits `.` digits, word boundary
//! 4. word: longest run without whitespace, `(`, `)`, `,` or `"`
//!
//! Nesting is capped at a configurable depth so that a deeply nested program
//! fails with [`SyntaxError::NestingTooDeep`] instead of exhausting memory.

use crate::ast::Expr;
use crate::error::SyntaxError;
use crate::skipper::strip_comments;
use crate::stack::ensure_sufficient_stack;
use egg_config::DEFAULT_MAX_DEPTH;
use regex::Regex;
use std::sync::LazyLock;

static STRING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^"([^"]*)""#).expect("string pattern is valid"));
static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+\b").expect("integer pattern is valid"));
static FLOAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+\.[0-9]+\b").expect("float pattern is valid"));
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^[^\s(),"]+"#).expect("word pattern is valid"));

/// Longest excerpt of source quoted in an error message
const EXCERPT_LEN: usize = 40;

/// Parse a complete program: one expression and nothing but whitespace or
/// comments after it. Nesting is limited to [`DEFAULT_MAX_DEPTH`].
pub fn parse(text: &str) -> Result<Expr, SyntaxError> {
    parse_with_limit(text, DEFAULT_MAX_DEPTH)
}

/// Parse a complete program, allowing at most `max_depth` nested
/// expressions.
pub fn parse_with_limit(text: &str, max_depth: usize) -> Result<Expr, SyntaxError> {
    let source = strip_comments(text);
    let (expr, rest) = Parser::new(max_depth).expression(&source)?;
    let rest = rest.trim_start();
    if !rest.is_empty() {
        return Err(SyntaxError::TrailingText {
            text: excerpt(rest),
        });
    }
    Ok(expr)
}

/// Parse one expression from the front of `text`, returning it together with
/// the unconsumed remainder (comments removed, leading whitespace trimmed).
pub fn parse_expression(text: &str) -> Result<(Expr, String), SyntaxError> {
    let source = strip_comments(text);
    let (expr, rest) = Parser::new(DEFAULT_MAX_DEPTH).expression(&source)?;
    Ok((expr, rest.trim_start().to_string()))
}

/// Wrap `expr` in applications for every argument list at the front of
/// `text`, returning the result and the unconsumed remainder.
pub fn parse_apply(expr: Expr, text: &str) -> Result<(Expr, String), SyntaxError> {
    let source = strip_comments(text);
    let (expr, rest) = Parser::new(DEFAULT_MAX_DEPTH).apply(expr, &source)?;
    Ok((expr, rest.to_string()))
}

struct Parser {
    max_depth: usize,
    depth: usize,
}

impl Parser {
    fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            depth: 0,
        }
    }

    fn expression<'s>(&mut self, text: &'s str) -> Result<(Expr, &'s str), SyntaxError> {
        if self.depth >= self.max_depth {
            return Err(SyntaxError::NestingTooDeep {
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        let result = ensure_sufficient_stack(|| {
            let program = text.trim_start();
            let (expr, len) = parse_primitive(program)?;
            self.apply(expr, &program[len..])
        });
        self.depth -= 1;
        result
    }

    /// Wrap `expr` in applications for every argument list that follows it.
    ///
    /// `f(a)(b)` applies the result of `f(a)` to `b`.
    fn apply<'s>(&mut self, mut expr: Expr, text: &'s str) -> Result<(Expr, &'s str), SyntaxError> {
        let mut program = text.trim_start();

        while let Some(after_paren) = program.strip_prefix('(') {
            let mut rest = after_paren.trim_start();
            let mut args = Vec::new();

            while !rest.starts_with(')') {
                let (arg, after_arg) = self.expression(rest)?;
                args.push(arg);
                rest = after_arg.trim_start();
                if let Some(after_comma) = rest.strip_prefix(',') {
                    rest = after_comma.trim_start();
                } else if !rest.starts_with(')') {
                    return Err(SyntaxError::ExpectedCommaOrParen {
                        found: found_excerpt(rest),
                    });
                }
            }

            expr = Expr::apply(expr, args)?;
            program = rest[1..].trim_start();
        }

        Ok((expr, program))
    }
}

/// Recognize one primitive at the start of `program`; returns the node and
/// the number of bytes it spans.
fn parse_primitive(program: &str) -> Result<(Expr, usize), SyntaxError> {
    if let Some(caps) = STRING.captures(program) {
        let whole = caps.get(0).map_or(0, |m| m.end());
        let value = caps.get(1).map_or("", |m| m.as_str());
        return Ok((Expr::string(value), whole));
    }

    if let Some(m) = INTEGER.find(program) {
        // `12.5` is a float, not the integer `12` followed by `.5`
        if !starts_fraction(&program[m.end()..]) {
            return Ok((Expr::number(parse_number(m.as_str())?), m.end()));
        }
    }

    if let Some(m) = FLOAT.find(program) {
        return Ok((Expr::number(parse_number(m.as_str())?), m.end()));
    }

    if let Some(m) = WORD.find(program) {
        return Ok((Expr::word(m.as_str()), m.end()));
    }

    Err(SyntaxError::UnexpectedSyntax {
        text: excerpt(program),
    })
}

fn starts_fraction(rest: &str) -> bool {
    let mut chars = rest.chars();
    chars.next() == Some('.') && chars.next().is_some_and(|c| c.is_ascii_digit())
}

fn parse_number(digits: &str) -> Result<f64, SyntaxError> {
    digits
        .parse::<f64>()
        .map_err(|_| SyntaxError::UnexpectedSyntax {
            text: digits.to_string(),
        })
}

fn excerpt(text: &str) -> String {
    match text.char_indices().nth(EXCERPT_LEN) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

fn found_excerpt(text: &str) -> String {
    if text.is_empty() {
        "end of input".to_string()
    } else {
        format!("'{}'", excerpt(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Form;
    use pretty_assertions::assert_eq;

    fn call(name: &str, args: Vec<Expr>) -> Expr {
        Expr::Apply {
            operator: Box::new(Expr::word(name)),
            args,
        }
    }

    #[test]
    fn test_parse_primitives() {
        assert_eq!(parse("42").unwrap(), Expr::number(42.0));
        assert_eq!(parse("-7").unwrap(), Expr::number(-7.0));
        assert_eq!(parse("2.5").unwrap(), Expr::number(2.5));
        assert_eq!(parse("+2.5").unwrap(), Expr::number(2.5));
        assert_eq!(parse("-0.25").unwrap(), Expr::number(-0.25));
        assert_eq!(parse("\"hi there\"").unwrap(), Expr::string("hi there"));
        assert_eq!(parse("foo").unwrap(), Expr::word("foo"));
        assert_eq!(parse("<=").unwrap(), Expr::word("<="));
    }

    #[test]
    fn test_digits_followed_by_letters_are_words() {
        assert_eq!(parse("12abc").unwrap(), Expr::word("12abc"));
        assert_eq!(parse("-x").unwrap(), Expr::word("-x"));
        assert_eq!(parse("+5").unwrap(), Expr::word("+5"));
    }

    #[test]
    fn test_float_must_start_the_token() {
        assert_eq!(parse("abc1.5").unwrap(), Expr::word("abc1.5"));
    }

    #[test]
    fn test_parse_application() {
        assert_eq!(
            parse("+(a, 10)").unwrap(),
            call("+", vec![Expr::word("a"), Expr::number(10.0)])
        );
        assert_eq!(parse("f()").unwrap(), call("f", vec![]));
    }

    #[test]
    fn test_chained_application() {
        assert_eq!(
            parse("f(1)(2)").unwrap(),
            Expr::Apply {
                operator: Box::new(call("f", vec![Expr::number(1.0)])),
                args: vec![Expr::number(2.0)],
            }
        );
    }

    #[test]
    fn test_trailing_comma_is_accepted() {
        assert_eq!(parse("f(1,)").unwrap(), call("f", vec![Expr::number(1.0)]));
    }

    #[test]
    fn test_special_forms_are_resolved() {
        let expr = parse("define(x, 1)").unwrap();
        assert_eq!(
            expr,
            Expr::Form(Form::Define {
                name: "x".to_string(),
                value: Box::new(Expr::number(1.0)),
            })
        );
    }

    #[test]
    fn test_whitespace_and_comments_between_tokens() {
        let expr = parse("  f /* a */ ( // b\n 1 ,\n\t 2 ) // end").unwrap();
        assert_eq!(expr, call("f", vec![Expr::number(1.0), Expr::number(2.0)]));
    }

    #[test]
    fn test_missing_separator() {
        assert_eq!(
            parse("f(1 2)").unwrap_err(),
            SyntaxError::ExpectedCommaOrParen {
                found: "'2)'".to_string()
            }
        );
    }

    #[test]
    fn test_unclosed_argument_list() {
        assert!(matches!(
            parse("f(1, 2").unwrap_err(),
            SyntaxError::ExpectedCommaOrParen { .. }
        ));
        assert!(matches!(
            parse("f(").unwrap_err(),
            SyntaxError::UnexpectedSyntax { .. }
        ));
    }

    #[test]
    fn test_trailing_text() {
        assert_eq!(
            parse("x y").unwrap_err(),
            SyntaxError::TrailingText {
                text: "y".to_string()
            }
        );
        assert_eq!(
            parse("1.5.2").unwrap_err(),
            SyntaxError::TrailingText {
                text: ".2".to_string()
            }
        );
    }

    #[test]
    fn test_unexpected_syntax() {
        assert!(matches!(
            parse(")").unwrap_err(),
            SyntaxError::UnexpectedSyntax { .. }
        ));
        assert!(matches!(
            parse("\"open").unwrap_err(),
            SyntaxError::UnexpectedSyntax { .. }
        ));
        assert!(matches!(
            parse("").unwrap_err(),
            SyntaxError::UnexpectedSyntax { .. }
        ));
    }

    #[test]
    fn test_parse_expression_returns_rest() {
        let (expr, rest) = parse_expression("a(1) tail").unwrap();
        assert_eq!(expr, call("a", vec![Expr::number(1.0)]));
        assert_eq!(rest, "tail");
    }

    #[test]
    fn test_parse_apply_on_existing_expression() {
        let (expr, rest) = parse_apply(Expr::word("g"), " (1)(2) rest").unwrap();
        assert_eq!(
            expr,
            Expr::Apply {
                operator: Box::new(call("g", vec![Expr::number(1.0)])),
                args: vec![Expr::number(2.0)],
            }
        );
        assert_eq!(rest, "rest");

        let (expr, rest) = parse_apply(Expr::word("g"), "x").unwrap();
        assert_eq!(expr, Expr::word("g"));
        assert_eq!(rest, "x");
    }

    fn nested(depth: usize) -> String {
        format!("{}0{}", "array(".repeat(depth), ")".repeat(depth))
    }

    #[test]
    fn test_deep_nesting() {
        assert!(parse(&nested(2_000)).is_ok());
    }

    #[test]
    fn test_nesting_limit() {
        // 3 calls plus the innermost literal
        assert!(parse_with_limit(&nested(3), 4).is_ok());
        assert_eq!(
            parse_with_limit(&nested(4), 4).unwrap_err(),
            SyntaxError::NestingTooDeep { limit: 4 }
        );
    }

    #[test]
    fn test_very_deep_program_fails_cleanly() {
        assert_eq!(
            parse(&nested(40_000)).unwrap_err(),
            SyntaxError::NestingTooDeep {
                limit: DEFAULT_MAX_DEPTH
            }
        );
    }

    #[test]
    fn test_wide_argument_list() {
        let source = format!("do({}1)", "1, ".repeat(20_000));
        match parse(&source).unwrap() {
            Expr::Form(Form::Do(body)) => assert_eq!(body.len(), 20_001),
            other => panic!("expected do form, got {other:?}"),
        }
    }
}

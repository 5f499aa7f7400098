//! Property-based tests

use egg_runtime::ast::FormKind;
use egg_runtime::{parse, Egg, EggError, Expr, ErrorKind, RuntimeError, Value};
use proptest::prelude::*;

fn word() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,5}".prop_filter("special form names resolve differently", |w| {
        FormKind::from_name(w).is_none()
    })
}

fn number() -> impl Strategy<Value = f64> {
    // Quarter steps keep both integer and fractional literals exact
    (-4000i32..4000).prop_map(|q| f64::from(q) / 4.0)
}

/// Trees of literals, words and applications
fn expr() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        number().prop_map(Expr::number),
        "[a-zA-Z0-9 .,()+-]{0,8}".prop_map(Expr::string),
        word().prop_map(Expr::word),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        (inner.clone(), prop::collection::vec(inner, 0..4)).prop_map(|(operator, args)| {
            Expr::Apply {
                operator: Box::new(operator),
                args,
            }
        })
    })
}

/// Arithmetic over small integers, rendered with optional comments
#[derive(Debug, Clone)]
enum Arith {
    Num(i32),
    Op(&'static str, Box<Arith>, Box<Arith>),
}

fn arith() -> impl Strategy<Value = Arith> {
    let leaf = (-50i32..50).prop_map(Arith::Num);
    leaf.prop_recursive(4, 24, 2, |inner| {
        (
            prop_oneof![Just("+"), Just("-"), Just("*")],
            inner.clone(),
            inner,
        )
            .prop_map(|(op, a, b)| Arith::Op(op, Box::new(a), Box::new(b)))
    })
}

fn render(tree: &Arith, comments: &mut impl Iterator<Item = bool>) -> String {
    let mut gap = || match comments.next() {
        Some(true) => " /* gap */ ",
        Some(false) => " // gap\n",
        None => "",
    };
    match tree {
        Arith::Num(n) => n.to_string(),
        Arith::Op(op, a, b) => {
            let (g1, g2, g3) = (gap(), gap(), gap());
            let left = render(a, comments);
            let right = render(b, comments);
            format!("{}{}({}{},{}{})", op, g1, left, g2, right, g3)
        }
    }
}

fn comment_pattern() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 0..64)
}

proptest! {
    #[test]
    fn prop_render_then_parse_round_trips(tree in expr()) {
        let source = tree.to_string();
        prop_assert_eq!(parse(&source), Ok(tree));
    }

    #[test]
    fn prop_comments_do_not_change_results(tree in arith(), pattern in comment_pattern()) {
        let plain = render(&tree, &mut std::iter::empty());
        let commented = render(&tree, &mut pattern.into_iter());
        let egg = Egg::new();
        prop_assert_eq!(egg.eval(&plain), egg.eval(&commented));
    }

    #[test]
    fn prop_define_then_lookup(name in word(), n in number()) {
        let source = format!("do(define({0}, {1}), {0})", name, n);
        prop_assert_eq!(Egg::new().eval(&source), Ok(Value::Number(n)));
    }

    #[test]
    fn prop_closure_arity_mismatch(params in 0usize..5, args in 0usize..5) {
        prop_assume!(params != args);
        let names: Vec<String> = (0..params).map(|i| format!("p{}", i)).collect();
        let values: Vec<String> = (0..args).map(|i| i.to_string()).collect();
        let mut fun_args = names.clone();
        fun_args.push("0".to_string());
        let source = format!("fun({})({})", fun_args.join(", "), values.join(", "));

        let err = Egg::new().eval(&source).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::Type);
        let is_arity = matches!(err, EggError::Runtime(RuntimeError::ArityMismatch { .. }));
        prop_assert!(is_arity);
    }

    #[test]
    fn prop_sumarray_length_mismatch(
        left in prop::collection::vec(-100i32..100, 0..6),
        right in prop::collection::vec(-100i32..100, 0..6),
    ) {
        prop_assume!(left.len() != right.len());
        let join = |xs: &[i32]| xs.iter().map(|x| x.to_string()).collect::<Vec<_>>().join(", ");
        let source = format!("sumarray(array({}), array({}))", join(&left), join(&right));

        prop_assert_eq!(
            Egg::new().eval(&source),
            Err(EggError::Runtime(RuntimeError::LengthMismatch {
                left: left.len(),
                right: right.len(),
            }))
        );
    }
}

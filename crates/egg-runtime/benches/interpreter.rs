//! Interpreter benchmarks
//!
//! Measures parsing and evaluation separately on small canonical programs:
//! - Loop and arithmetic throughput
//! - Closure call overhead
//! - Array builtins

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use egg_runtime::{parse, Egg};

const WHILE_LOOP: &str = "do(define(total, 0), define(count, 1),
    while(<=(count, 1000), do(define(total, +(total, count)), define(count, +(count, 1)))),
    total)";

const FIBONACCI: &str = "do(define(fib, fun(n, if(<(n, 2), n, +(fib(-(n, 1)), fib(-(n, 2)))))), fib(15))";

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_while_loop", |b| {
        b.iter(|| parse(black_box(WHILE_LOOP)))
    });
}

fn bench_while_loop(c: &mut Criterion) {
    let egg = Egg::new();
    c.bench_function("eval_while_loop_1k", |b| {
        b.iter(|| egg.eval(black_box(WHILE_LOOP)))
    });
}

fn bench_fibonacci(c: &mut Criterion) {
    let egg = Egg::new();
    c.bench_function("eval_fibonacci_15", |b| {
        b.iter(|| egg.eval(black_box(FIBONACCI)))
    });
}

fn bench_array_builtins(c: &mut Criterion) {
    let egg = Egg::new();
    let mut group = c.benchmark_group("array_builtins");
    for size in [10usize, 100, 1000] {
        let items = (0..size)
            .rev()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let source = format!(
            "do(define(a, array({0})), sumarray(sort(a), a), sum(a))",
            items
        );
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, source| {
            b.iter(|| egg.eval(black_box(source)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_parse,
    bench_while_loop,
    bench_fibonacci,
    bench_array_builtins
);
criterion_main!(benches);

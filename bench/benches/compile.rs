use bench::INPUT;
use criterion::{criterion_group, criterion_main, Criterion};
use ooc::{compile, Target};
use std::hint::black_box;

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("compile", |b| {
        b.iter(|| black_box(compile(black_box(INPUT), Target::JavaScript).unwrap()))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

use std::fmt::Write;
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use hanbunko_core::{RandomRoundGenerator, RoundConfig, RoundGenerator, WordPool};

fn word_list(n: usize) -> String {
    let mut text = String::new();
    for i in 0..n {
        let _ = writeln!(text, "{:04}{:04}", 2 * i, 2 * i + 1);
    }
    text
}

fn bench_generate(c: &mut Criterion) {
    let text = word_list(10_000);
    let pool = WordPool::from_text(&text, 8).unwrap();

    let mut group = c.benchmark_group("generate_round");
    for pool_bound in [500, 2_500, 10_000] {
        let config = RoundConfig::new(6, 30, pool_bound);
        group.bench_with_input(
            BenchmarkId::from_parameter(pool_bound),
            &config,
            |b, &config| {
                let mut seed = 0u64;
                b.iter(|| {
                    seed = seed.wrapping_add(1);
                    RandomRoundGenerator::new(seed)
                        .generate(black_box(&pool), config)
                        .unwrap()
                });
            },
        );
    }
    group.finish();
}

fn bench_parse_pool(c: &mut Criterion) {
    let text = word_list(10_000);

    c.bench_function("parse_pool_10k", |b| {
        b.iter(|| WordPool::from_text(black_box(&text), 8).unwrap())
    });
}

criterion_group!(benches, bench_generate, bench_parse_pool);
criterion_main!(benches);

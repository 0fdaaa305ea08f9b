use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dnacst::{lcs, BuildAlgorithm, SuffixTrie};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Benchmarks comparing the on-line and quadratic trie builders, lookup, and LCS.

fn generate_text(len: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let bases = b"ACGT";
    (0..len).map(|_| bases[rng.gen_range(0..4)] as char).collect()
}

/// Text built from a short motif with sparse point mutations: many long repeats.
fn generate_repetitive_text(len: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let motif = b"ACGTTGCA";
    let bases = b"ACGT";
    (0..len)
        .map(|i| {
            if rng.gen_bool(0.01) {
                bases[rng.gen_range(0..4)] as char
            } else {
                motif[i % motif.len()] as char
            }
        })
        .collect()
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("trie_construction");
    group.measurement_time(Duration::from_secs(10));

    for n in [1_000, 10_000].iter() {
        for (label, text) in [
            ("random", generate_text(*n, 42)),
            ("repetitive", generate_repetitive_text(*n, 42)),
        ] {
            group.bench_with_input(
                BenchmarkId::new(format!("ukkonen_{label}"), n),
                &text,
                |b, text| {
                    b.iter(|| {
                        SuffixTrie::with_algorithm(black_box(text.as_str()), BuildAlgorithm::Ukkonen)
                    });
                },
            );
            group.bench_with_input(
                BenchmarkId::new(format!("quadratic_{label}"), n),
                &text,
                |b, text| {
                    b.iter(|| {
                        SuffixTrie::with_algorithm(
                            black_box(text.as_str()),
                            BuildAlgorithm::Quadratic,
                        )
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let text = generate_text(100_000, 7);
    let trie = SuffixTrie::from_text(text.as_str()).expect("valid DNA");
    let patterns: Vec<String> = (0..1_000)
        .map(|i| {
            let start = (i * 97) % (text.len() - 32);
            text[start..start + 32].to_string()
        })
        .collect();

    c.bench_function("find_32mers", |b| {
        b.iter(|| {
            for pattern in &patterns {
                black_box(trie.find(pattern.as_bytes()));
            }
        })
    });

    c.bench_function("find_many_32mers", |b| {
        b.iter(|| black_box(trie.find_many(patterns.as_slice())))
    });
}

fn bench_lcs(c: &mut Criterion) {
    let mut group = c.benchmark_group("lcs");
    for n in [500, 2_000].iter() {
        let x = generate_text(*n, 1);
        let y = generate_text(*n, 2);
        group.bench_with_input(BenchmarkId::new("table_and_traceback", n), &(x, y), |b, (x, y)| {
            b.iter(|| lcs(black_box(x.as_bytes()), black_box(y.as_bytes())))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_construction, bench_lookup, bench_lcs);
criterion_main!(benches);

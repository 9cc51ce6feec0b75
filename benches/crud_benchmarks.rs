use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::{BTreeMap, BTreeSet};

use rubra_tree::{RBTreeMap, RBTreeMultiSet, RBTreeSet};

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

/// Duplicate-heavy sequence: random draws from a small key universe.
fn colliding_keys(n: usize) -> Vec<i64> {
    random_keys(n).into_iter().map(|k| k % 64).collect()
}

// ─── Map Benchmarks ─────────────────────────────────────────────────────────

fn bench_map_insert(c: &mut Criterion) {
    for (order, keys) in [
        ("ordered", ordered_keys(N)),
        ("reverse", reverse_ordered_keys(N)),
        ("random", random_keys(N)),
    ] {
        let mut group = c.benchmark_group(format!("map_insert_{order}"));

        group.bench_function(BenchmarkId::new("RBTreeMap", N), |b| {
            b.iter(|| {
                let mut map = RBTreeMap::new();
                for &k in &keys {
                    map.insert(k, k);
                }
                map
            });
        });

        group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
            b.iter(|| {
                let mut map = BTreeMap::new();
                for &k in &keys {
                    map.insert(k, k);
                }
                map
            });
        });

        group.finish();
    }
}

fn bench_map_get(c: &mut Criterion) {
    for (order, keys) in [
        ("ordered", ordered_keys(N)),
        ("reverse", reverse_ordered_keys(N)),
        ("random", random_keys(N)),
    ] {
        let rb_map: RBTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
        let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

        let mut group = c.benchmark_group(format!("map_get_{order}"));

        group.bench_function(BenchmarkId::new("RBTreeMap", N), |b| {
            b.iter(|| {
                let mut sum = 0i64;
                for &k in &keys {
                    if let Some(&v) = rb_map.get(&k) {
                        sum = sum.wrapping_add(v);
                    }
                }
                sum
            });
        });

        group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
            b.iter(|| {
                let mut sum = 0i64;
                for &k in &keys {
                    if let Some(&v) = bt_map.get(&k) {
                        sum = sum.wrapping_add(v);
                    }
                }
                sum
            });
        });

        group.finish();
    }
}

fn bench_map_remove(c: &mut Criterion) {
    for (order, keys) in [
        ("ordered", ordered_keys(N)),
        ("reverse", reverse_ordered_keys(N)),
        ("random", random_keys(N)),
    ] {
        let mut group = c.benchmark_group(format!("map_remove_{order}"));

        group.bench_function(BenchmarkId::new("RBTreeMap", N), |b| {
            b.iter_batched(
                || keys.iter().map(|&k| (k, k)).collect::<RBTreeMap<i64, i64>>(),
                |mut map| {
                    for &k in &keys {
                        map.remove(&k);
                    }
                    map
                },
                criterion::BatchSize::SmallInput,
            );
        });

        group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
            b.iter_batched(
                || keys.iter().map(|&k| (k, k)).collect::<BTreeMap<i64, i64>>(),
                |mut map| {
                    for &k in &keys {
                        map.remove(&k);
                    }
                    map
                },
                criterion::BatchSize::SmallInput,
            );
        });

        group.finish();
    }
}

fn bench_map_iter(c: &mut Criterion) {
    let keys = random_keys(N);
    let rb_map: RBTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("map_iter");

    group.bench_function(BenchmarkId::new("RBTreeMap", N), |b| {
        b.iter(|| rb_map.iter().map(|(_, &v)| v).fold(0i64, i64::wrapping_add));
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| bt_map.iter().map(|(_, &v)| v).fold(0i64, i64::wrapping_add));
    });

    group.finish();
}

// ─── Set Benchmarks ─────────────────────────────────────────────────────────

fn bench_set_insert(c: &mut Criterion) {
    for (order, keys) in [
        ("ordered", ordered_keys(N)),
        ("reverse", reverse_ordered_keys(N)),
        ("random", random_keys(N)),
    ] {
        let mut group = c.benchmark_group(format!("set_insert_{order}"));

        group.bench_function(BenchmarkId::new("RBTreeSet", N), |b| {
            b.iter(|| {
                let mut set = RBTreeSet::new();
                for &k in &keys {
                    set.insert(k);
                }
                set
            });
        });

        group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
            b.iter(|| {
                let mut set = BTreeSet::new();
                for &k in &keys {
                    set.insert(k);
                }
                set
            });
        });

        group.finish();
    }
}

fn bench_set_contains(c: &mut Criterion) {
    for (order, keys) in [
        ("ordered", ordered_keys(N)),
        ("reverse", reverse_ordered_keys(N)),
        ("random", random_keys(N)),
    ] {
        let rb_set: RBTreeSet<i64> = keys.iter().copied().collect();
        let bt_set: BTreeSet<i64> = keys.iter().copied().collect();

        let mut group = c.benchmark_group(format!("set_contains_{order}"));

        group.bench_function(BenchmarkId::new("RBTreeSet", N), |b| {
            b.iter(|| {
                let mut count = 0usize;
                for &k in &keys {
                    if rb_set.contains(&k) {
                        count += 1;
                    }
                }
                count
            });
        });

        group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
            b.iter(|| {
                let mut count = 0usize;
                for &k in &keys {
                    if bt_set.contains(&k) {
                        count += 1;
                    }
                }
                count
            });
        });

        group.finish();
    }
}

fn bench_set_remove(c: &mut Criterion) {
    for (order, keys) in [
        ("ordered", ordered_keys(N)),
        ("reverse", reverse_ordered_keys(N)),
        ("random", random_keys(N)),
    ] {
        let mut group = c.benchmark_group(format!("set_remove_{order}"));

        group.bench_function(BenchmarkId::new("RBTreeSet", N), |b| {
            b.iter_batched(
                || keys.iter().copied().collect::<RBTreeSet<i64>>(),
                |mut set| {
                    for &k in &keys {
                        set.remove(&k);
                    }
                    set
                },
                criterion::BatchSize::SmallInput,
            );
        });

        group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
            b.iter_batched(
                || keys.iter().copied().collect::<BTreeSet<i64>>(),
                |mut set| {
                    for &k in &keys {
                        set.remove(&k);
                    }
                    set
                },
                criterion::BatchSize::SmallInput,
            );
        });

        group.finish();
    }
}

// ─── Multiset Benchmarks ────────────────────────────────────────────────────
//
// std has no multiset; the comparison baseline is BTreeMap<key, count>, the
// usual stand-in.

fn bench_multiset_insert(c: &mut Criterion) {
    let keys = colliding_keys(N);
    let mut group = c.benchmark_group("multiset_insert_colliding");

    group.bench_function(BenchmarkId::new("RBTreeMultiSet", N), |b| {
        b.iter(|| {
            let mut bag = RBTreeMultiSet::new();
            for &k in &keys {
                bag.insert(k);
            }
            bag
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap<i64, usize>", N), |b| {
        b.iter(|| {
            let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
            for &k in &keys {
                *counts.entry(k).or_insert(0) += 1;
            }
            counts
        });
    });

    group.finish();
}

fn bench_multiset_count(c: &mut Criterion) {
    let keys = colliding_keys(N);
    let bag: RBTreeMultiSet<i64> = keys.iter().copied().collect();
    let counts: BTreeMap<i64, usize> = keys.iter().fold(BTreeMap::new(), |mut m, &k| {
        *m.entry(k).or_insert(0) += 1;
        m
    });

    let mut group = c.benchmark_group("multiset_count_colliding");

    group.bench_function(BenchmarkId::new("RBTreeMultiSet", N), |b| {
        b.iter(|| {
            let mut total = 0usize;
            for k in 0..64i64 {
                total += bag.count(&k);
            }
            total
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap<i64, usize>", N), |b| {
        b.iter(|| {
            let mut total = 0usize;
            for k in 0..64i64 {
                total += counts.get(&k).copied().unwrap_or(0);
            }
            total
        });
    });

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(map_benches, bench_map_insert, bench_map_get, bench_map_remove, bench_map_iter,);

criterion_group!(set_benches, bench_set_insert, bench_set_contains, bench_set_remove,);

criterion_group!(multiset_benches, bench_multiset_insert, bench_multiset_count,);

criterion_main!(map_benches, set_benches, multiset_benches,);

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};
use std::hint::black_box;
use wbt_collections::{TreePriorityQueue, WBTreeList, WBTreeMap, WBTreeMultiSet, WBTreeSet};

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

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

// ─── Set Benchmarks ─────────────────────────────────────────────────────────

fn bench_set_insert_ordered(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_insert_ordered");

    group.bench_function(BenchmarkId::new("WBTreeSet", N), |b| {
        b.iter(|| {
            let mut set = WBTreeSet::new();
            for i in 0..N as i64 {
                set.insert(i);
            }
            set
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for i in 0..N as i64 {
                set.insert(i);
            }
            set
        });
    });

    group.finish();
}

fn bench_set_insert_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("set_insert_random");

    group.bench_function(BenchmarkId::new("WBTreeSet", N), |b| {
        b.iter(|| {
            let mut set = WBTreeSet::new();
            for &k in &keys {
                set.insert(k);
            }
            set
        });
    });

    group.bench_function(BenchmarkId::new("WBTreeMultiSet", N), |b| {
        b.iter(|| {
            let mut set = WBTreeMultiSet::new();
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

fn bench_set_initialize(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("set_initialize");

    group.bench_function(BenchmarkId::new("WBTreeMultiSet", N), |b| {
        b.iter(|| {
            let mut set = WBTreeMultiSet::new();
            set.initialize(keys.iter().copied()).unwrap();
            set
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| keys.iter().copied().collect::<BTreeSet<_>>());
    });

    group.finish();
}

fn bench_set_remove_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("set_remove_random");

    let wb_set: WBTreeSet<i64> = keys.iter().copied().collect();
    group.bench_function(BenchmarkId::new("WBTreeSet", N), |b| {
        b.iter_batched(
            || wb_set.clone(),
            |mut set| {
                for k in &keys {
                    set.remove(k);
                }
                set
            },
            criterion::BatchSize::SmallInput,
        );
    });

    let bt_set: BTreeSet<i64> = keys.iter().copied().collect();
    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter_batched(
            || bt_set.clone(),
            |mut set| {
                for k in &keys {
                    set.remove(k);
                }
                set
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ─── Map Benchmarks ─────────────────────────────────────────────────────────

fn bench_map_get_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("map_get_random");

    let wb_map: WBTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    group.bench_function(BenchmarkId::new("WBTreeMap", N), |b| {
        b.iter(|| {
            for k in &keys {
                black_box(wb_map.get_value(k));
            }
        });
    });

    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            for k in &keys {
                black_box(bt_map.get(k));
            }
        });
    });

    group.finish();
}

fn bench_map_entry_counting(c: &mut Criterion) {
    let keys: Vec<i64> = random_keys(N).into_iter().map(|k| k % 512).collect();
    let mut group = c.benchmark_group("map_entry_counting");

    group.bench_function(BenchmarkId::new("WBTreeMap", N), |b| {
        b.iter(|| {
            let mut map: WBTreeMap<i64, usize> = WBTreeMap::new();
            for &k in &keys {
                *map.entry(k).or_default() += 1;
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map: BTreeMap<i64, usize> = BTreeMap::new();
            for &k in &keys {
                *map.entry(k).or_default() += 1;
            }
            map
        });
    });

    group.finish();
}

// ─── Order-statistic Benchmarks ─────────────────────────────────────────────

fn bench_rank_queries(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("rank_queries");
    let probes: Vec<usize> = (0..100).map(|i| i * N / 100).collect();

    let wb_set: WBTreeSet<i64> = keys.iter().copied().collect();
    group.bench_function(BenchmarkId::new("WBTreeSet::get_by_rank", N), |b| {
        b.iter(|| {
            for &rank in &probes {
                black_box(wb_set.get_by_rank(rank));
            }
        });
    });

    group.bench_function(BenchmarkId::new("WBTreeSet::rank_of", N), |b| {
        b.iter(|| {
            for k in keys.iter().take(100) {
                black_box(wb_set.rank_of(k));
            }
        });
    });

    let bt_set: BTreeSet<i64> = keys.iter().copied().collect();
    group.bench_function(BenchmarkId::new("BTreeSet::iter().nth", N), |b| {
        b.iter(|| {
            for &rank in &probes {
                black_box(bt_set.iter().nth(rank));
            }
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet::range().count", N), |b| {
        b.iter(|| {
            for k in keys.iter().take(100) {
                black_box(bt_set.range(..k).count());
            }
        });
    });

    group.finish();
}

// ─── List Benchmarks ────────────────────────────────────────────────────────

fn bench_list_insert_middle(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_insert_middle");

    group.bench_function(BenchmarkId::new("WBTreeList", N), |b| {
        b.iter(|| {
            let mut list = WBTreeList::new();
            for i in 0..N {
                list.insert(list.len() / 2, i).unwrap();
            }
            list
        });
    });

    group.bench_function(BenchmarkId::new("Vec", N), |b| {
        b.iter(|| {
            let mut list = Vec::new();
            for i in 0..N {
                list.insert(list.len() / 2, i);
            }
            list
        });
    });

    group.finish();
}

// ─── Priority Queue Benchmarks ──────────────────────────────────────────────

fn bench_priority_queue_push_pop(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("priority_queue_push_pop");

    group.bench_function(BenchmarkId::new("TreePriorityQueue", N), |b| {
        b.iter(|| {
            let mut queue = TreePriorityQueue::new();
            queue.push_items(keys.iter().copied());
            while let Ok(k) = queue.pop_first() {
                black_box(k);
            }
        });
    });

    group.bench_function(BenchmarkId::new("BinaryHeap", N), |b| {
        b.iter(|| {
            let mut heap: BinaryHeap<Reverse<i64>> = keys.iter().copied().map(Reverse).collect();
            while let Some(Reverse(k)) = heap.pop() {
                black_box(k);
            }
        });
    });

    group.finish();
}

criterion_group!(
    set_benches,
    bench_set_insert_ordered,
    bench_set_insert_random,
    bench_set_initialize,
    bench_set_remove_random,
);
criterion_group!(map_benches, bench_map_get_random, bench_map_entry_counting);
criterion_group!(rank_benches, bench_rank_queries);
criterion_group!(list_benches, bench_list_insert_middle);
criterion_group!(queue_benches, bench_priority_queue_push_pop);
criterion_main!(set_benches, map_benches, rank_benches, list_benches, queue_benches);

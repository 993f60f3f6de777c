use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use seq_hashmap::{Handle, SeqHashMap};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_insert_fresh_100k(c: &mut Criterion) {
    c.bench_function("seq::insert_fresh_100k", |b| {
        b.iter_batched(
            SeqHashMap::<String, u64>::new,
            |mut m| {
                for (i, x) in lcg(1).take(100_000).enumerate() {
                    let _ = m.insert(key(x), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_insert_duplicates_100k(c: &mut Criterion) {
    // First-write-wins path: every key already present, no growth, no append.
    c.bench_function("seq::insert_duplicates_100k", |b| {
        b.iter_batched(
            || {
                let mut m = SeqHashMap::new();
                for (i, x) in lcg(2).take(100_000).enumerate() {
                    m.insert(key(x), i as u64);
                }
                m
            },
            |mut m| {
                for x in lcg(2).take(100_000) {
                    let _ = m.insert(key(x), 0);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit_10k(c: &mut Criterion) {
    c.bench_function("seq::get_hit_10k_on_100k", |b| {
        let mut m = SeqHashMap::new();
        let keys: Vec<_> = lcg(7).take(100_000).map(key).collect();
        for (i, k) in keys.iter().enumerate() {
            m.insert(k.clone(), i as u64);
        }
        // Precompute 10k random query keys using LCG
        let n = keys.len();
        let mut s = 0x9e3779b97f4a7c15u64;
        let queries: Vec<String> = (0..10_000)
            .map(|_| {
                s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
                keys[(s as usize) % n].clone()
            })
            .collect();
        b.iter(|| {
            for k in &queries {
                black_box(m.get(k.as_str()));
            }
        })
    });
}

fn bench_get_miss_10k(c: &mut Criterion) {
    c.bench_function("seq::get_miss_10k_on_100k", |b| {
        let mut m = SeqHashMap::new();
        for (i, x) in lcg(11).take(100_000).enumerate() {
            m.insert(key(x), i as u64);
        }
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            for _ in 0..10_000 {
                let k = key(miss.next().unwrap());
                black_box(m.get(&k));
            }
        })
    });
}

fn bench_remove_random_10k(c: &mut Criterion) {
    c.bench_function("seq::remove_random_10k_of_110k", |b| {
        b.iter_batched(
            || {
                let mut m = SeqHashMap::new();
                let keys: Vec<String> = lcg(5).take(110_000).map(key).collect();
                for (i, k) in keys.iter().enumerate() {
                    m.insert(k.clone(), i as u64);
                }
                // Precompute 10k unique victim indices via LCG
                let n = keys.len();
                let mut sel = std::collections::HashSet::with_capacity(10_000);
                let mut s = 0x9e3779b97f4a7c15u64;
                while sel.len() < 10_000 {
                    s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
                    sel.insert((s as usize) % n);
                }
                let victims: Vec<String> = sel.into_iter().map(|i| keys[i].clone()).collect();
                (m, victims)
            },
            |(mut m, victims)| {
                for k in victims {
                    let _ = m.remove(k.as_str());
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_handle_access_increment(c: &mut Criterion) {
    c.bench_function("seq::handle_access_increment_10k", |b| {
        b.iter_batched(
            || {
                let mut m = SeqHashMap::new();
                let handles: Vec<Handle> = lcg(123)
                    .take(100_000)
                    .enumerate()
                    .map(|(i, x)| m.insert(key(x), i as u64))
                    .collect();
                let n = handles.len();
                let mut s = 0x9e3779b97f4a7c15u64;
                let targets: Vec<Handle> = (0..10_000)
                    .map(|_| {
                        s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
                        handles[(s as usize) % n]
                    })
                    .collect();
                (m, targets)
            },
            |(mut m, targets)| {
                for h in targets {
                    if let Some(v) = h.value_mut(&mut m) {
                        *v = v.wrapping_add(1);
                    }
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_iter_in_order(c: &mut Criterion) {
    c.bench_function("seq::iter_all_100k", |b| {
        let mut m = SeqHashMap::new();
        for (i, x) in lcg(999).take(100_000).enumerate() {
            m.insert(key(x), i as u64);
        }
        b.iter(|| {
            let mut sum = 0u64;
            for (_k, v) in m.iter() {
                sum = sum.wrapping_add(*v);
            }
            black_box(sum)
        })
    });
}

fn bench_clone_100k(c: &mut Criterion) {
    c.bench_function("seq::clone_100k", |b| {
        let mut m = SeqHashMap::new();
        for (i, x) in lcg(321).take(100_000).enumerate() {
            m.insert(key(x), i as u64);
        }
        b.iter(|| black_box(m.clone()))
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches_insert;
    config = bench_config();
    targets = bench_insert_fresh_100k, bench_insert_duplicates_100k
}
criterion_group! {
    name = benches_ops;
    config = bench_config();
    targets = bench_remove_random_10k,
              bench_get_hit_10k,
              bench_get_miss_10k,
              bench_handle_access_increment,
              bench_iter_in_order,
              bench_clone_100k
}
criterion_main!(benches_insert, benches_ops);

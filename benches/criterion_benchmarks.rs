use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pinned_lru::config::PinnedLruCacheConfig;
use pinned_lru::PinnedLruCache;
use std::num::NonZeroUsize;

// Helper function to create caches with the init pattern
fn make_cache<K: std::hash::Hash + Eq + Clone, V: Clone>(cap: usize) -> PinnedLruCache<K, V> {
    let config = PinnedLruCacheConfig {
        capacity: NonZeroUsize::new(cap).unwrap(),
    };
    PinnedLruCache::init(config, None)
}

pub fn criterion_benchmark(c: &mut Criterion) {
    const CACHE_SIZE: usize = 1000;
    let mut group = c.benchmark_group("Cache Operations");

    // Unpinned workload
    {
        let mut cache = make_cache(CACHE_SIZE);
        for i in 0..CACHE_SIZE {
            cache.put(i, i);
        }

        group.bench_function("PinnedLRU get hit", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&(i % CACHE_SIZE)));
                }
            });
        });

        group.bench_function("PinnedLRU get miss", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&(i + CACHE_SIZE)));
                }
            });
        });

        group.bench_function("PinnedLRU put existing", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.put(i % CACHE_SIZE, i));
                }
            });
        });

        let mut next = CACHE_SIZE;
        group.bench_function("PinnedLRU put new", |b| {
            b.iter(|| {
                for _ in 0..100 {
                    black_box(cache.put(next, next));
                    next += 1;
                }
            });
        });
    }

    // Half of the entries pinned, so every eviction rotates past pinned tails
    {
        let mut cache = make_cache(CACHE_SIZE);
        for i in 0..CACHE_SIZE {
            cache.put(i, i);
            if i % 2 == 0 {
                cache.set_persistent(&i);
            }
        }

        let mut next = CACHE_SIZE;
        group.bench_function("PinnedLRU put new, half pinned", |b| {
            b.iter(|| {
                for _ in 0..100 {
                    black_box(cache.put(next, next));
                    next += 1;
                }
            });
        });

        group.bench_function("PinnedLRU toggle persistent", |b| {
            b.iter(|| {
                for i in 0..100 {
                    cache.toggle_persistent(&(i % CACHE_SIZE));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

//! Pinning Demonstration
//!
//! Fills a small cache, pins a couple of entries and keeps inserting, then
//! prints what survived together with the cache's metrics.

use core::num::NonZeroUsize;
use pinned_lru::{config::PinnedLruCacheConfig, metrics::CacheMetrics, PinnedLruCache};

fn main() {
    let config: PinnedLruCacheConfig = match std::env::args().nth(1) {
        Some(arg) => match arg.parse() {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(1);
            }
        },
        None => PinnedLruCacheConfig::from(NonZeroUsize::new(3).unwrap()),
    };

    println!("Pinned LRU cache demo");
    println!("=====================\n");
    println!("Capacity: {} items\n", config.capacity);

    let mut cache: PinnedLruCache<String, String> = PinnedLruCache::init(config, None);

    cache.put("config".to_string(), "{ \"debug\": false }".to_string());
    cache.put("session".to_string(), "user-42".to_string());
    cache.set_persistent("config");
    cache.set_persistent("session");
    println!("Pinned: config, session");

    for i in 1..=5 {
        let key = format!("page-{i}");
        let cached = cache.put(key.clone(), format!("<html>{i}</html>"));
        println!("put {key:<8} -> {}", if cached { "cached" } else { "dropped" });
    }

    println!("\nEntries, least recently used first:");
    for (key, value) in &cache {
        let pin = match cache.is_pinned(key) {
            Some(true) => "pinned",
            _ => "",
        };
        println!("  {key:<10} {value:<22} {pin}");
    }

    cache.remove_persistent("session");
    cache.put("page-6".to_string(), "<html>6</html>".to_string());
    println!("\nAfter unpinning session and inserting page-6:");
    println!("  session cached: {}", cache.contains("session"));

    println!("\n{} metrics:", cache.algorithm_name());
    for (name, value) in CacheMetrics::metrics(&cache) {
        println!("  {name:<20} {value:.2}");
    }
}

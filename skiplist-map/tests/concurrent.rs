//! Multithreaded scenarios. Each test spawns real OS threads against a
//! single shared map and checks the invariants the optimistic algorithm
//! promises, not just "it didn't crash".

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

use skiplist_map::OptimisticSkipList;

/// Enables `trace!`/`debug!` output from the retry/backoff paths under
/// `RUST_LOG`, e.g. `RUST_LOG=trace cargo test --test concurrent`. Safe to
/// call from every test in this binary: `try_init` only installs the
/// logger once and ignores the "already initialized" error on later calls.
fn init_logging() {
    let _ = env_logger::try_init();
}

/// S4: many threads race to insert the same key. Exactly one succeeds;
/// the rest observe it as a duplicate. The map ends up with one entry
/// holding one of the attempted values.
#[test]
fn s4_concurrent_insert_same_key_exactly_one_wins() {
    init_logging();
    const THREADS: usize = 16;
    let map = Arc::new(OptimisticSkipList::new(16));
    let barrier = Arc::new(Barrier::new(THREADS));
    let wins = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let map = Arc::clone(&map);
            let barrier = Arc::clone(&barrier);
            let wins = Arc::clone(&wins);
            thread::spawn(move || {
                barrier.wait();
                if map.insert(1, i).unwrap() {
                    wins.fetch_add(1, Ordering::Relaxed);
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(wins.load(Ordering::Relaxed), 1);
    assert_eq!(map.size(), 1);
    assert!(map.find(1));
}

/// S5: 4 producer threads insert a disjoint share of keys `1..=N`; 4
/// consumer threads race to delete the same range as it fills in. By
/// the end, size is 0 and every key in range reports absent.
#[test]
fn s5_producer_consumer_over_a_key_range() {
    init_logging();
    const N: i64 = 10_000;
    const PRODUCERS: i64 = 4;
    const CONSUMERS: usize = 4;

    let map: Arc<OptimisticSkipList<i64>> = Arc::new(OptimisticSkipList::new(24));
    let deleted_count = Arc::new(AtomicUsize::new(0));

    let producers: Vec<_> = (0..PRODUCERS)
        .map(|p| {
            let map = Arc::clone(&map);
            thread::spawn(move || {
                let mut k = 1 + p;
                while k <= N {
                    map.insert(k, k).unwrap();
                    k += PRODUCERS;
                }
            })
        })
        .collect();

    let consumers: Vec<_> = (0..CONSUMERS)
        .map(|_| {
            let map = Arc::clone(&map);
            let deleted_count = Arc::clone(&deleted_count);
            thread::spawn(move || {
                let deadline = Instant::now() + Duration::from_secs(60);
                let mut remaining: HashSet<i64> = (1..=N).collect();
                while !remaining.is_empty() && Instant::now() < deadline {
                    remaining.retain(|&k| {
                        if map.delete(k).unwrap() {
                            deleted_count.fetch_add(1, Ordering::Relaxed);
                            false
                        } else {
                            true
                        }
                    });
                }
            })
        })
        .collect();

    for h in producers {
        h.join().unwrap();
    }
    for h in consumers {
        h.join().unwrap();
    }

    // Every key was deleted by exactly one consumer: the producer side
    // never double-inserts (disjoint shares) and delete only returns
    // true once per key (invariant 4, "marked is terminal").
    assert_eq!(deleted_count.load(Ordering::Relaxed), N as usize);
    assert_eq!(map.size(), 0);
    for k in 1..=N {
        assert!(!map.find(k));
    }
}

/// S6: a mixed find/insert/delete workload across several threads for a
/// bounded duration. No thread should panic, and whatever state the map
/// ends up in must be internally consistent (every key found is gettable
/// with a value that was actually inserted for it).
#[test]
fn s6_mixed_workload_stays_consistent() {
    init_logging();
    const THREADS: usize = 8;
    const KEY_SPACE: i64 = 256;
    const DURATION: Duration = Duration::from_millis(1500);

    let map: Arc<OptimisticSkipList<i64>> = Arc::new(OptimisticSkipList::new(16));
    let stop_at = Instant::now() + DURATION;

    let handles: Vec<_> = (0..THREADS)
        .map(|seed| {
            let map = Arc::clone(&map);
            thread::spawn(move || {
                let mut rng_state = 0x9E3779B9u64 ^ (seed as u64).wrapping_mul(0x2545F4914F6CDD1D);
                let mut next = move || {
                    // xorshift64*, good enough for picking test workload keys
                    rng_state ^= rng_state << 13;
                    rng_state ^= rng_state >> 7;
                    rng_state ^= rng_state << 17;
                    rng_state
                };

                while Instant::now() < stop_at {
                    let roll = next() % 100;
                    let key = (next() % KEY_SPACE as u64) as i64;

                    if roll < 80 {
                        if let Some(v) = map.get(key) {
                            assert_eq!(v, key, "value stored under a key must equal that key");
                        }
                    } else if roll < 90 {
                        map.insert(key, key).unwrap();
                    } else {
                        map.delete(key).unwrap();
                    }
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    // Quiescent check: every key in range is either absent or present
    // with exactly the value that was inserted for it.
    for key in 0..KEY_SPACE {
        match map.get(key) {
            Some(v) => assert_eq!(v, key),
            None => assert!(!map.find(key)),
        }
    }
}

/// Threads inserting disjoint key ranges never lose or corrupt each
/// other's entries.
#[test]
fn disjoint_ranges_insert_cleanly_under_contention() {
    init_logging();
    const THREADS: i64 = 8;
    const PER_THREAD: i64 = 500;

    let map = Arc::new(OptimisticSkipList::new(20));
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let map = Arc::clone(&map);
            thread::spawn(move || {
                let base = t * PER_THREAD;
                for k in base..base + PER_THREAD {
                    assert!(map.insert(k, k * 10).unwrap());
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(map.size(), (THREADS * PER_THREAD) as usize);
    for k in 0..THREADS * PER_THREAD {
        assert_eq!(map.get(k), Some(k * 10));
    }
}

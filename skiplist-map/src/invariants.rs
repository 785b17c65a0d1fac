//! White-box structural checks, single-threaded only.
//!
//! These reach into node internals that are not exposed outside the
//! crate, so unlike the black-box scenarios in `tests/`, they live here
//! as an ordinary `#[cfg(test)]` module.

use crossbeam::epoch::{self, Shared};
use std::sync::atomic::Ordering;

use crate::list::OptimisticSkipList;
use crate::node::Node;

impl<V> OptimisticSkipList<V> {
    /// Collects the key at each level-0 node, head and tail included.
    /// Used only to assert sortedness after a batch of mutations.
    fn level0_keys(&self) -> Vec<i64> {
        self.level_keys(0)
    }

    /// Collects the keys reachable at `level`, head and tail included.
    fn level_keys(&self, level: usize) -> Vec<i64> {
        let guard = &epoch::pin();
        let mut keys = Vec::new();
        let mut curr: Shared<'_, Node<V>> = self.head.load(Ordering::Acquire, guard);
        loop {
            let node = unsafe { curr.deref() };
            keys.push(node.key);
            if node.key == skiplist_core::TAIL_KEY {
                break;
            }
            curr = node.next[level].load(Ordering::Acquire, guard);
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_subsequence(needle: &[i64], haystack: &[i64]) -> bool {
        let mut it = haystack.iter();
        needle.iter().all(|k| it.any(|h| h == k))
    }

    #[test]
    fn level0_stays_sorted_after_random_inserts_and_deletes() {
        let map = OptimisticSkipList::new(12);
        let mut rng_state = 0xA5A5_5A5Au64;
        let mut next = move || {
            rng_state ^= rng_state << 13;
            rng_state ^= rng_state >> 7;
            rng_state ^= rng_state << 17;
            rng_state
        };

        for _ in 0..2000 {
            let key = (next() % 200) as i64 - 100;
            if next() % 2 == 0 {
                map.insert(key, ()).unwrap();
            } else {
                map.delete(key).unwrap();
            }
        }

        let keys = map.level0_keys();
        for pair in keys.windows(2) {
            assert!(pair[0] < pair[1], "level-0 chain must be strictly sorted: {:?}", pair);
        }
    }

    #[test]
    fn every_level_is_a_subsequence_of_the_one_below() {
        let map = OptimisticSkipList::new(10);
        for k in 0..500i64 {
            map.insert(k, ()).unwrap();
        }
        for k in (0..500i64).step_by(3) {
            map.delete(k).unwrap();
        }

        for level in 1..map.levelmax() {
            let upper = map.level_keys(level);
            let lower = map.level_keys(level - 1);
            assert!(
                is_subsequence(&upper, &lower),
                "level {} chain {:?} is not a subsequence of level {} chain {:?}",
                level,
                upper,
                level - 1,
                lower
            );
        }
    }
}

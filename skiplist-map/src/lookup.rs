//! `find` and `get`: read-only queries. Neither ever takes a lock or
//! spins — each runs the search primitive once and checks the two
//! status flags of whatever it found.

use crossbeam::epoch;
use std::sync::atomic::Ordering;

use crate::list::OptimisticSkipList;
use crate::search::find_node;

impl<V> OptimisticSkipList<V> {
    /// Returns `true` if `key` is currently visible (fully linked and
    /// not marked).
    pub fn find(&self, key: i64) -> bool {
        let guard = &epoch::pin();
        let head = self.head.load(Ordering::Acquire, guard);
        let search = find_node(head, self.levelmax, key, guard);

        match search.found_level {
            Some(level) => {
                // SAFETY: observed reachable under `guard` this instant.
                let node = unsafe { search.succs[level].deref() };
                node.is_fullylinked() && !node.is_marked()
            }
            None => false,
        }
    }
}

impl<V: Clone> OptimisticSkipList<V> {
    /// Returns a clone of the value stored at `key`, or `None` if the
    /// key is absent or not yet/no longer visible.
    ///
    /// Returns an owned clone rather than a borrowed reference: a
    /// borrowed handle into the node would only remain valid while the
    /// node stays live, which under epoch reclamation means "until some
    /// other thread's delete finishes and the epoch advances" — a
    /// window the caller has no way to observe. Cloning sidesteps that
    /// entirely.
    pub fn get(&self, key: i64) -> Option<V> {
        let guard = &epoch::pin();
        let head = self.head.load(Ordering::Acquire, guard);
        let search = find_node(head, self.levelmax, key, guard);

        let level = search.found_level?;
        // SAFETY: observed reachable under `guard` this instant.
        let node = unsafe { search.succs[level].deref() };
        if node.is_fullylinked() && !node.is_marked() {
            node.value.clone()
        } else {
            None
        }
    }
}

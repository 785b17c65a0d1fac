//! The map container itself: construction, teardown, and the
//! non-linearizable `size` debug affordance.
//!
//! Insert, delete, and lookup are implemented as separate `impl` blocks
//! in `insert.rs`, `delete.rs`, and `lookup.rs` respectively.

use crossbeam::epoch::{self, Atomic, Owned};
use std::sync::atomic::{AtomicUsize, Ordering};

use skiplist_core::{is_sentinel, Error, TAIL_KEY};

use crate::node::Node;

/// A concurrent ordered map from `i64` to `V`, implemented as a
/// fine-grained locking skip list.
///
/// Lookup, insert, and delete are linearizable with respect to each
/// other (see the crate docs for the exact linearization points); `size`
/// is not — it is a debug/test affordance only.
///
/// No range queries, no snapshot iteration, no persistence. This is a
/// library primitive, not a storage engine.
pub struct OptimisticSkipList<V> {
    pub(crate) head: Atomic<Node<V>>,
    pub(crate) levelmax: usize,
    pub(crate) size: AtomicUsize,
}

impl<V> OptimisticSkipList<V> {
    /// Creates an empty map whose towers never exceed `levelmax` levels.
    ///
    /// `levelmax` is typically `ceil(log2(expected_len))`; it is fixed
    /// for the lifetime of the map. Panics if `levelmax` is `0` or
    /// exceeds [`skiplist_core::MAX_LEVELS`], the hard bound the
    /// stack-allocated predecessor/successor arrays are sized to.
    pub fn new(levelmax: usize) -> Self {
        assert!(levelmax >= 1, "levelmax must be at least 1");
        assert!(
            levelmax <= skiplist_core::MAX_LEVELS,
            "levelmax must not exceed MAX_LEVELS ({})",
            skiplist_core::MAX_LEVELS
        );

        let guard = &epoch::pin();
        let tail = Owned::new(Node::tail(levelmax)).into_shared(guard);

        let head_node = Node::head(levelmax);
        for i in 0..levelmax {
            head_node.next[i].store(tail, Ordering::Release);
        }

        Self {
            head: Atomic::new(head_node),
            levelmax,
            size: AtomicUsize::new(0),
        }
    }

    /// The configured tower-height bound for this map.
    pub fn levelmax(&self) -> usize {
        self.levelmax
    }

    /// Number of live entries. **Not linearizable**: it is a relaxed
    /// counter updated by insert/delete, intended for tests and
    /// debugging, not for any correctness-sensitive decision.
    pub fn size(&self) -> usize {
        self.size.load(Ordering::Relaxed)
    }

    /// Returns `true` if the map currently has no entries, by the same
    /// non-linearizable counter as [`Self::size`].
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub(crate) fn reject_sentinel(key: i64) -> Result<(), Error> {
        if is_sentinel(key) {
            Err(Error::ReservedKey(key))
        } else {
            Ok(())
        }
    }
}

impl<V> Drop for OptimisticSkipList<V> {
    /// Releases every live node. The caller must ensure no other thread
    /// is still operating on the map — ordinary Rust borrowing rules
    /// already guarantee this for `OptimisticSkipList<V>` directly, but
    /// if it is shared via `Arc`, the last `Arc` to drop runs this.
    fn drop(&mut self) {
        let guard = &epoch::pin();
        let mut curr = self.head.load(Ordering::Acquire, guard);

        loop {
            // SAFETY: Drop has exclusive access; no concurrent reader
            // can be mid-traversal, so retiring every node immediately
            // is sound.
            let curr_ref = unsafe { curr.deref() };
            let next = curr_ref.next[0].load(Ordering::Acquire, guard);
            let key = curr_ref.key;
            unsafe {
                guard.defer_destroy(curr);
            }
            if key == TAIL_KEY {
                break;
            }
            curr = next;
        }
    }
}

// `OptimisticSkipList<V>` is automatically `Send + Sync` for
// `V: Send + Sync`: every field bottoms out in `crossbeam::epoch::Atomic`,
// `AtomicUsize`, or `parking_lot::Mutex`, all of which propagate those
// bounds structurally.

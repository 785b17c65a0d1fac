//! The skip list node.
//!
//! A node owns one forward pointer per level of its tower, a pair of
//! one-shot status flags, and a lock used only while its own outgoing
//! pointers are being spliced or unlinked. See the crate-level docs for
//! the full node lifecycle (`BUILDING -> LIVE -> MARKED -> UNLINKED`).

use crossbeam::epoch::Atomic;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use skiplist_core::{HEAD_KEY, TAIL_KEY};

pub(crate) struct Node<V> {
    pub(crate) key: i64,
    /// `None` only for the two sentinels, which are never read through
    /// `get`.
    pub(crate) value: Option<V>,
    pub(crate) toplevel: usize,
    /// One forward pointer per level, `0..toplevel`. Allocated once at
    /// construction time and never resized.
    pub(crate) next: Box<[Atomic<Node<V>>]>,
    /// Written exactly once, false -> true. Logical deletion.
    pub(crate) marked: AtomicBool,
    /// Written exactly once, false -> true, by the inserter after every
    /// level has been spliced. Until set, the node is invisible to
    /// lookups.
    pub(crate) fullylinked: AtomicBool,
    /// Held only while this node's own `next` entries are mutated.
    pub(crate) lock: Mutex<()>,
}

impl<V> Node<V> {
    pub(crate) fn new(key: i64, value: Option<V>, toplevel: usize) -> Self {
        let next = (0..toplevel)
            .map(|_| Atomic::null())
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Self {
            key,
            value,
            toplevel,
            next,
            marked: AtomicBool::new(false),
            fullylinked: AtomicBool::new(false),
            lock: Mutex::new(()),
        }
    }

    /// Builds the head sentinel. Its tower spans every level and it is
    /// immediately visible and never marked.
    pub(crate) fn head(levelmax: usize) -> Self {
        let node = Self::new(HEAD_KEY, None, levelmax);
        node.fullylinked.store(true, Ordering::Release);
        node
    }

    /// Builds the tail sentinel, analogous to [`Node::head`].
    pub(crate) fn tail(levelmax: usize) -> Self {
        let node = Self::new(TAIL_KEY, None, levelmax);
        node.fullylinked.store(true, Ordering::Release);
        node
    }

    #[inline]
    pub(crate) fn is_marked(&self) -> bool {
        self.marked.load(Ordering::Acquire)
    }

    #[inline]
    pub(crate) fn is_fullylinked(&self) -> bool {
        self.fullylinked.load(Ordering::Acquire)
    }
}

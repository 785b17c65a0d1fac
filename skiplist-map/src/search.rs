//! The lock-free search primitive (`find_node` in the paper).
//!
//! A top-down traversal that fills parallel predecessor/successor arrays
//! and reports the highest level at which the key was observed. Takes no
//! locks; the arrays it returns are snapshots, not reservations — the
//! caller must re-validate them under lock before mutating anything.

use crossbeam::epoch::{Guard, Shared};
use std::sync::atomic::Ordering;

use skiplist_core::MAX_LEVELS;

use crate::node::Node;

pub(crate) struct SearchResult<'g, V> {
    pub(crate) found_level: Option<usize>,
    pub(crate) preds: [Shared<'g, Node<V>>; MAX_LEVELS],
    pub(crate) succs: [Shared<'g, Node<V>>; MAX_LEVELS],
}

/// Traverses the list from `head` starting at level `levelmax - 1`,
/// descending one level at a time. On each level, walks forward while
/// the current node's key is less than `key`. `pred` is carried across
/// levels without re-starting from `head`: it is, by construction, the
/// rightmost node with `key < search_key` on every level `<=` the one it
/// was found at (invariant 2: a lower-level chain is a superset of every
/// higher-level chain).
pub(crate) fn find_node<'g, V>(
    head: Shared<'g, Node<V>>,
    levelmax: usize,
    key: i64,
    guard: &'g Guard,
) -> SearchResult<'g, V> {
    let mut preds = [Shared::null(); MAX_LEVELS];
    let mut succs = [Shared::null(); MAX_LEVELS];
    let mut found_level = None;

    let mut pred = head;
    for level in (0..levelmax).rev() {
        // SAFETY: `pred` was either `head` (always live) or a node
        // observed reachable from `head` in this same traversal, under
        // the current epoch guard.
        let pred_ref = unsafe { pred.deref() };
        let mut curr = pred_ref.next[level].load(Ordering::Acquire, guard);

        loop {
            let curr_ref = unsafe { curr.deref() };
            if curr_ref.key < key {
                pred = curr;
                curr = curr_ref.next[level].load(Ordering::Acquire, guard);
            } else {
                break;
            }
        }

        preds[level] = pred;
        succs[level] = curr;

        if found_level.is_none() {
            let curr_ref = unsafe { curr.deref() };
            if curr_ref.key == key {
                found_level = Some(level);
            }
        }
    }

    SearchResult {
        found_level,
        preds,
        succs,
    }
}

//! `delete`: mark the target node logically deleted under its own lock,
//! then physically unlink it top-down under the predecessor locks. See
//! §4.G of the crate's design notes.
//!
//! Unlike `insert`, a single `delete` call keeps one `epoch::Guard`
//! pinned for its entire retry loop instead of re-pinning per attempt.
//! Once the target is marked, its `MutexGuard` must stay held across
//! retries (the target is locked before any predecessor, and the lock
//! isn't released until the physical unlink succeeds); tying that guard
//! and the target's `Shared` pointer to one `epoch::Guard` lifetime
//! keeps this safe without resorting to a raw, unbounded pointer. The
//! cost is that a backoff sleep during the physical-unlink retry loop
//! holds back this thread's epoch, delaying reclamation of other
//! threads' garbage until the delete completes — acceptable since a
//! delete that's already marked its target finishes in a bounded number
//! of retries.

use crossbeam::epoch::{self, Shared};
use parking_lot::MutexGuard;
use std::sync::atomic::Ordering;

use skiplist_core::Error;

use crate::backoff::Backoff;
use crate::list::OptimisticSkipList;
use crate::lock::lock_and_validate;
use crate::node::Node;
use crate::search::find_node;

impl<V> OptimisticSkipList<V> {
    /// Removes `key`. Returns `true` if it was present and is now gone,
    /// `false` if it was already absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReservedKey`] if `key` equals one of the
    /// sentinel bounds.
    pub fn delete(&self, key: i64) -> Result<bool, Error> {
        Self::reject_sentinel(key)?;

        let guard = &epoch::pin();
        let mut backoff = Backoff::new();

        // Set once the target is found and marked; carried across
        // retries of the physical-unlink step.
        let mut marked: Option<(Shared<'_, Node<V>>, MutexGuard<'_, ()>, usize)> = None;

        loop {
            let head = self.head.load(Ordering::Acquire, guard);
            let search = find_node(head, self.levelmax, key, guard);

            if marked.is_none() {
                let Some(found) = search.found_level else {
                    return Ok(false);
                };
                let candidate = search.succs[found];
                // SAFETY: observed reachable under `guard` this instant.
                let candidate_ref = unsafe { candidate.deref() };

                let ok_to_delete = candidate_ref.is_fullylinked()
                    && candidate_ref.toplevel - 1 == found
                    && !candidate_ref.is_marked();
                if !ok_to_delete {
                    return Ok(false);
                }

                let node_lock = candidate_ref.lock.lock();
                if candidate_ref.is_marked() {
                    // Another deleter won the race while we waited for the lock.
                    log::trace!("delete key={key} lost the race to another deleter");
                    return Ok(false);
                }

                // Linearization point of delete.
                candidate_ref.marked.store(true, Ordering::Release);
                marked = Some((candidate, node_lock, candidate_ref.toplevel));
            }

            let (node, _node_lock, toplevel) = marked.as_ref().unwrap();
            let toplevel = *toplevel;

            let Some(_locked_preds) =
                lock_and_validate(&search.preds, &search.succs, toplevel, true, guard)
            else {
                log::trace!("delete key={key} failed predecessor validation, backing off");
                backoff.spin();
                continue;
            };

            let node = *node;
            // SAFETY: `node` was marked by this thread and is still
            // reachable; it cannot have been retired by anyone else.
            let node_ref = unsafe { node.deref() };
            for i in (0..toplevel).rev() {
                let next = node_ref.next[i].load(Ordering::Acquire, guard);
                // SAFETY: `preds[i]` is locked by `_locked_preds`.
                unsafe { search.preds[i].deref() }
                    .next[i]
                    .store(next, Ordering::Release);
            }

            let (node, node_lock, _) = marked.take().unwrap();
            drop(node_lock);
            self.size.fetch_sub(1, Ordering::Relaxed);
            // SAFETY: unlinked from every level above, under predecessor
            // locks; no thread beginning a traversal from this point on
            // can reach it.
            unsafe {
                guard.defer_destroy(node);
            }
            return Ok(true);
        }
    }
}

//! `insert`: compose the search primitive with the validation+locking
//! protocol, then physically splice a new node bottom-up and publish it
//! by setting `fullylinked`. See §4.F of the crate's design notes for
//! the full step list; this file is a direct translation of it.

use crossbeam::epoch::{self, Owned};
use std::sync::atomic::Ordering;

use skiplist_core::Error;

use crate::backoff::Backoff;
use crate::level::random_level;
use crate::list::OptimisticSkipList;
use crate::lock::lock_and_validate;
use crate::node::Node;
use crate::search::find_node;

enum Attempt {
    Inserted,
    Duplicate,
    /// A concurrent delete is racing the same key; retry immediately,
    /// no backoff growth (mirrors the reference's bare `continue`).
    RetryNow,
    /// Validation failed; back off before retrying.
    RetryBackoff,
}

impl<V> OptimisticSkipList<V> {
    /// Inserts `key -> value`. Returns `true` if the key was absent and
    /// is now present with `value`; returns `false` if the key was
    /// already present, in which case `value` is simply dropped and the
    /// existing entry is left untouched — this map never updates an
    /// existing key's value on insert.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReservedKey`] if `key` equals one of the
    /// sentinel bounds.
    pub fn insert(&self, key: i64, value: V) -> Result<bool, Error> {
        Self::reject_sentinel(key)?;

        let toplevel = random_level(self.levelmax);
        let mut value = Some(value);
        let mut backoff = Backoff::new();

        loop {
            match self.try_insert(key, &mut value, toplevel) {
                Attempt::Inserted => return Ok(true),
                Attempt::Duplicate => return Ok(false),
                Attempt::RetryNow => continue,
                Attempt::RetryBackoff => backoff.spin(),
            }
        }
    }

    fn try_insert(&self, key: i64, value: &mut Option<V>, toplevel: usize) -> Attempt {
        let guard = &epoch::pin();
        let head = self.head.load(Ordering::Acquire, guard);
        let search = find_node(head, self.levelmax, key, guard);

        if let Some(found) = search.found_level {
            // SAFETY: observed reachable under `guard` this instant.
            let existing = unsafe { search.succs[found].deref() };
            if !existing.is_marked() {
                while !existing.is_fullylinked() {
                    std::hint::spin_loop();
                }
                return Attempt::Duplicate;
            }
            log::trace!("insert key={key} found a concurrently-marked node, retrying");
            return Attempt::RetryNow;
        }

        let Some(_locked) =
            lock_and_validate(&search.preds, &search.succs, toplevel, false, guard)
        else {
            log::trace!("insert key={key} failed predecessor validation, backing off");
            return Attempt::RetryBackoff;
        };

        let owned_value = value
            .take()
            .expect("try_insert only reaches the splice path once");
        let new_node = Owned::new(Node::new(key, Some(owned_value), toplevel));
        for i in 0..toplevel {
            new_node.next[i].store(search.succs[i], Ordering::Relaxed);
        }
        let new_shared = new_node.into_shared(guard);

        for i in 0..toplevel {
            // SAFETY: `preds[i]` is locked by `_locked` for the whole of
            // this splice, so no other thread can mutate its `next[i]`
            // concurrently.
            unsafe { search.preds[i].deref() }.next[i].store(new_shared, Ordering::Release);
        }

        // Linearization point: the node becomes visible to lookups.
        unsafe { new_shared.deref() }
            .fullylinked
            .store(true, Ordering::Release);

        self.size.fetch_add(1, Ordering::Relaxed);
        Attempt::Inserted
    }
}

//! A concurrent ordered map from `i64` to an opaque value, implemented
//! as a fine-grained locking skip list following the optimistic
//! algorithm of Herlihy, Lev, Luchangco, and Shavit ("A Simple
//! Optimistic Skiplist Algorithm", SIROCCO 2007).
//!
//! Four operations — [`OptimisticSkipList::find`],
//! [`OptimisticSkipList::get`], [`OptimisticSkipList::insert`], and
//! [`OptimisticSkipList::delete`] — run concurrently across any number
//! of threads without a global mutex:
//!
//! - An unsynchronized top-down traversal ([`search`]) fills
//!   predecessor/successor snapshots.
//! - Before any physical mutation, the snapshot is re-validated under
//!   per-node locks, bottom-up, over distinct predecessors only
//!   ([`lock`]).
//! - An inserted node becomes visible in two phases: linked bottom-up,
//!   then published by setting `fullylinked`.
//! - A deleted node is removed in two phases too: marked under its own
//!   lock (the linearization point), then physically unlinked under the
//!   predecessor locks.
//! - Nodes are reclaimed via `crossbeam`'s epoch-based scheme rather
//!   than a tracing collector, so a freed node is never dereferenced by
//!   a reader that started before it was unlinked.
//!
//! # Thread safety
//!
//! [`OptimisticSkipList`] is `Send + Sync` for any `V: Send + Sync`.
//! Lookups never block; insert and delete block only on a node lock
//! (per-node `parking_lot::Mutex`), never on a global one. This is a
//! blocking (not wait-free) structure — progress under contention
//! depends on the fairness of the underlying lock.
//!
//! # Non-goals
//!
//! No range queries, no snapshot iteration, no linearizable `len`
//! (`size` is a relaxed counter for tests/debugging), no persistence, no
//! wait-free guarantee, no uniqueness guarantee on value equality — only
//! on key.
//!
//! # Example
//!
//! ```
//! use skiplist_map::OptimisticSkipList;
//!
//! let map = OptimisticSkipList::new(16);
//! assert!(map.insert(5, "a").unwrap());
//! assert!(!map.insert(5, "b").unwrap()); // key already present
//! assert_eq!(map.get(5), Some("a"));
//! assert!(map.delete(5).unwrap());
//! assert!(!map.find(5));
//! ```

mod backoff;
mod delete;
mod insert;
#[cfg(test)]
mod invariants;
mod level;
mod list;
mod lock;
mod lookup;
mod node;
mod search;

pub use list::OptimisticSkipList;
pub use skiplist_core::{Error, Result};

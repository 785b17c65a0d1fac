//! Error types for the optimistic skip list.
//!
//! Most outcomes of a map operation are plain `bool` (already present,
//! absent) rather than errors — see the crate-level docs. The error type
//! here is reserved for the two kinds of failure that are not part of
//! ordinary operation: a caller passing a reserved key, and a poisoned
//! lock (unreachable with `parking_lot`, kept for documentation parity
//! with the "lock-acquire errors are fatal" failure class).

use thiserror::Error;

/// Errors that can occur when operating on the skip list.
#[derive(Error, Debug)]
pub enum Error {
    /// The key equals one of the sentinel bounds (`i64::MIN`/`i64::MAX`)
    /// and cannot be stored.
    #[error("key {0} is reserved for a sentinel and cannot be inserted")]
    ReservedKey(i64),

    /// A node's lock was found poisoned. Unreachable with `parking_lot`
    /// mutexes, which never poison; kept as a documented failure mode.
    #[error("lock poisoned for node with key {0}")]
    LockPoisoned(i64),
}

/// A specialized `Result` type for skip list operations.
pub type Result<T> = std::result::Result<T, Error>;

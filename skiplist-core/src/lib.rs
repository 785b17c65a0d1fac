//! Core vocabulary types shared by the skip list crates.
//!
//! This crate contains the error type and the sentinel-key constants
//! used by [`skiplist-map`](https://docs.rs/skiplist-map). It provides:
//!
//! - Common error handling with [`Error`] and [`Result`]
//! - The sentinel key bounds ([`HEAD_KEY`], [`TAIL_KEY`]) and the hard
//!   upper bound on tower height ([`MAX_LEVELS`])
//!
//! # Example
//!
//! ```
//! use skiplist_core::{HEAD_KEY, TAIL_KEY};
//!
//! assert!(HEAD_KEY < 0 && TAIL_KEY > 0);
//! ```

pub mod error;

pub use error::{Error, Result};

/// Sentinel key bounding every key from below. No user key may equal it.
pub const HEAD_KEY: i64 = i64::MIN;

/// Sentinel key bounding every key from above. No user key may equal it.
pub const TAIL_KEY: i64 = i64::MAX;

/// Hard upper bound on tower height (`LEVELMAX`), independent of what a
/// particular map instance configures. Bounds the stack-allocated
/// predecessor/successor arrays used during search and mutation so they
/// never need heap allocation — see the re-architecture notes on the
/// reference C implementation, which allocated these per call.
pub const MAX_LEVELS: usize = 32;

/// Returns `true` if `key` is one of the two sentinel bounds and
/// therefore not a valid user key.
#[inline]
pub fn is_sentinel(key: i64) -> bool {
    key == HEAD_KEY || key == TAIL_KEY
}

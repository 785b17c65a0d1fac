//! Random tower height generator.
//!
//! Per-thread RNG state, so concurrent inserters never contend on a
//! shared generator. A prior design here protected a single
//! `rand::rngs::ThreadRng` behind a mutex, which turns every insert into
//! a serialization point on the RNG alone; a `thread_local!` generator
//! removes that bottleneck entirely.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_entropy());
}

/// Samples a tower height `L` in `[1, levelmax]` such that
/// `P(L >= k) ~= 2^-(k-1)`: a fair coin flip per level, stopping at the
/// first tail.
pub(crate) fn random_level(levelmax: usize) -> usize {
    RNG.with(|rng| {
        let mut rng = rng.borrow_mut();
        let mut level = 1;
        while level < levelmax && rng.gen_bool(0.5) {
            level += 1;
        }
        level
    })
}

//! Retry backoff used after a failed validation.
//!
//! Doubles a counter starting at 1; once it exceeds 5000 the thread
//! sleeps instead of spinning, for a duration derived from the counter.
//! There is no retry cap — validation failure is normal, not an error,
//! and the caller loops back to the search step.
//!
//! The reference C computes the sleep as
//! `tv_sec = backoff / 5000, tv_nsec = (backoff % 5000) * 1_000_000` in
//! `optimistic_insert`, but divides instead of multiplying by
//! `1_000_000` in `optimistic_delete` — almost certainly a typo, since it
//! turns a millisecond-scale sleep into a sub-microsecond one. This port
//! uses the multiply on both paths, preserving the millisecond-scale
//! intent rather than the letter of either call site.

use std::thread;
use std::time::Duration;

const SLEEP_THRESHOLD: u32 = 5000;

pub(crate) struct Backoff {
    counter: u32,
}

impl Backoff {
    pub(crate) fn new() -> Self {
        Self { counter: 1 }
    }

    /// Spins or sleeps, then doubles the counter for next time.
    pub(crate) fn spin(&mut self) {
        if self.counter > SLEEP_THRESHOLD {
            let millis = self.counter / SLEEP_THRESHOLD;
            let nanos = (self.counter % SLEEP_THRESHOLD) * 1_000_000;
            let duration = Duration::from_millis(u64::from(millis)) + Duration::from_nanos(u64::from(nanos));
            log::trace!(
                "backoff counter {} exceeded sleep threshold {}, sleeping {:?}",
                self.counter,
                SLEEP_THRESHOLD,
                duration
            );
            thread::sleep(duration);
        } else {
            std::hint::spin_loop();
        }
        self.counter = self.counter.saturating_mul(2);
    }
}

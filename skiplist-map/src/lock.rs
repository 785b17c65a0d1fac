//! The validation + locking protocol shared by insert and delete.
//!
//! Predecessors are locked bottom-up, skipping a predecessor already
//! locked at a lower level (two levels sharing the same predecessor is
//! common at low `levelmax`, and locking it twice would deadlock). Each
//! lock is a `parking_lot::MutexGuard` held in a `Vec`; releasing is
//! just dropping that `Vec`, so there is no hand-written unlock pass to
//! get wrong — the reference C tracks a `highestlevel` index and calls
//! an explicit `unlock_levels` helper, which this port replaces with
//! RAII.

use crossbeam::epoch::{Guard, Shared};
use parking_lot::MutexGuard;
use std::sync::atomic::Ordering;

use crate::node::Node;

/// Holds every distinct predecessor lock acquired for one validation
/// attempt. Dropping this releases them all; order doesn't matter since
/// unlock is commutative.
pub(crate) struct LockedPreds<'g> {
    #[allow(dead_code)] // held for its Drop impl only
    guards: Vec<MutexGuard<'g, ()>>,
}

/// Locks the distinct predecessors in `preds[0..height)`, bottom-up, then
/// checks that each `preds[i]` is still unmarked, still points at
/// `succs[i]`, and (unless `skip_succ_marked_check` is set, which delete
/// uses because it has already marked its own target) that `succs[i]` is
/// still unmarked.
///
/// Returns `None` if validation fails at any level; the caller should
/// back off and retry the whole operation from the search step. The
/// locks taken before the failing level are released when the returned
/// value (or, on failure, the function's local guards) is dropped.
pub(crate) fn lock_and_validate<'g, V>(
    preds: &[Shared<'g, Node<V>>],
    succs: &[Shared<'g, Node<V>>],
    height: usize,
    skip_succ_marked_check: bool,
    guard: &'g Guard,
) -> Option<LockedPreds<'g>> {
    let mut guards = Vec::with_capacity(height);
    let mut prev_pred: Option<Shared<'g, Node<V>>> = None;

    for i in 0..height {
        let pred = preds[i];
        let succ = succs[i];

        if prev_pred != Some(pred) {
            // SAFETY: `pred` was observed reachable under this epoch guard.
            let pred_ref = unsafe { pred.deref() };
            guards.push(pred_ref.lock.lock());
            prev_pred = Some(pred);
        }

        let pred_ref = unsafe { pred.deref() };
        let succ_ref = unsafe { succ.deref() };

        let succ_ok = skip_succ_marked_check || !succ_ref.is_marked();
        let adjacent = pred_ref.next[i].load(Ordering::Acquire, guard) == succ;

        if pred_ref.is_marked() || !succ_ok || !adjacent {
            return None;
        }
    }

    Some(LockedPreds { guards })
}

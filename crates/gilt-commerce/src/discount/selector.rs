//! Best-candidate selection for a single line.

use super::rule::AppliedDiscount;

/// Pick the best valuation from a line's candidate set.
///
/// The strictly greatest saving wins; ties go to the lowest discount ID so
/// the outcome is reproducible regardless of candidate iteration order.
/// An empty set means the line stays undiscounted.
pub fn select_best(candidates: Vec<AppliedDiscount>) -> Option<AppliedDiscount> {
    candidates.into_iter().reduce(|best, candidate| {
        let better = candidate.amount.cents > best.amount.cents
            || (candidate.amount.cents == best.amount.cents
                && candidate.discount_id < best.discount_id);
        if better {
            candidate
        } else {
            best
        }
    })
}

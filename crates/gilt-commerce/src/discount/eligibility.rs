//! Candidate filtering for a pricing run.

use super::rule::Discount;
use crate::ids::DiscountId;

/// Filter the catalog down to discounts valid at `now`.
///
/// With a non-empty `allowed` list (user-scoped mode) a discount must also
/// appear on the list. With an empty list (global mode) temporal eligibility
/// alone decides. Per-line applicability is evaluated later, during
/// valuation.
pub fn filter_eligible<'a>(
    discounts: &'a [Discount],
    now: i64,
    allowed: &[DiscountId],
) -> Vec<&'a Discount> {
    discounts
        .iter()
        .filter(|d| d.is_live(now))
        .filter(|d| allowed.is_empty() || allowed.contains(&d.id))
        .collect()
}

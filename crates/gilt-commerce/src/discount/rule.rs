//! Validated discount rules.

use crate::cart::CartLine;
use crate::ids::{DiscountId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Validity window in Unix seconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Schedule {
    /// Start of the window.
    pub starts_at: i64,
    /// End of the window; `None` means open-ended.
    pub ends_at: Option<i64>,
}

impl Schedule {
    /// Whether `now` falls inside the window (inclusive on both ends).
    pub fn contains(&self, now: i64) -> bool {
        now >= self.starts_at && self.ends_at.map_or(true, |end| now <= end)
    }
}

/// How a discount prices a line.
///
/// An exhaustive sum type so valuation dispatch is statically checked; the
/// variant also travels on [`AppliedDiscount`] as the audit record of which
/// rule produced a saving.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiscountRule {
    /// Percentage off the line subtotal.
    Percentage { percent: f64 },
    /// Flat amount off the line subtotal, capped at the subtotal.
    FixedAmount { amount: Money },
    /// Every `buy` units purchased grant `free` units at no charge.
    BuyXGetY { buy: i64, free: i64 },
}

impl DiscountRule {
    pub fn kind_name(&self) -> &'static str {
        match self {
            DiscountRule::Percentage { .. } => "percentage",
            DiscountRule::FixedAmount { .. } => "fixed_amount",
            DiscountRule::BuyXGetY { .. } => "buy_x_get_y",
        }
    }
}

/// A validated promotional rule.
///
/// Owned and lifecycle-managed by the external catalog; immutable during a
/// calculation. Produced from wire records by
/// [`DiscountRecord::compile`](crate::discount::DiscountRecord::compile).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Discount {
    /// Unique discount identifier.
    pub id: DiscountId,
    /// The pricing rule.
    pub rule: DiscountRule,
    /// Validity window.
    pub schedule: Schedule,
    /// Whether the discount is switched on at all.
    pub active: bool,
    /// Eligible products; empty means store-wide.
    pub product_ids: Vec<ProductId>,
    /// Minimum line quantity for the rule to apply.
    pub min_quantity: Option<i64>,
    /// Maximum line quantity for the rule to apply.
    pub max_quantity: Option<i64>,
}

impl Discount {
    /// Temporal eligibility: active and inside the validity window.
    pub fn is_live(&self, now: i64) -> bool {
        self.active && self.schedule.contains(now)
    }

    /// Whether the discount applies to every product.
    pub fn is_store_wide(&self) -> bool {
        self.product_ids.is_empty()
    }

    /// Per-line applicability: product scope and quantity bounds.
    ///
    /// A line failing these checks is simply not a candidate, never an
    /// error. For `BuyXGetY` the quantity fields encode the rule's threshold
    /// and reward, not applicability bounds; below-threshold lines stay
    /// candidates so valuation can report upsell progress.
    pub fn applies_to(&self, line: &CartLine) -> bool {
        if !line.is_discountable() {
            return false;
        }
        if !self.is_store_wide() && !self.product_ids.contains(&line.product_id) {
            return false;
        }
        match self.rule {
            DiscountRule::BuyXGetY { .. } => true,
            DiscountRule::Percentage { .. } | DiscountRule::FixedAmount { .. } => {
                if line.quantity < self.min_quantity.unwrap_or(0) {
                    return false;
                }
                if let Some(max) = self.max_quantity {
                    if line.quantity > max {
                        return false;
                    }
                }
                true
            }
        }
    }
}

/// The single discount applied to a cart line.
///
/// At most one per line; discounts never stack. The order record persists
/// these for audit, so the full rule that produced the saving rides along.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppliedDiscount {
    /// Which discount produced this saving.
    pub discount_id: DiscountId,
    /// Which line it was applied to.
    pub product_id: ProductId,
    /// The rule, for audit.
    pub rule: DiscountRule,
    /// Amount saved on this line.
    pub amount: Money,
    /// Line subtotal before the discount.
    pub line_subtotal: Money,
    /// Line subtotal after the discount.
    pub line_total: Money,
    /// Advisory upsell text; never alters the numeric outcome.
    pub message: Option<String>,
}

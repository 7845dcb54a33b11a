//! Cart-level pricing results.

use crate::cart::CartLine;
use crate::discount::AppliedDiscount;
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Which resolution path produced a pricing result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingMode {
    /// Candidates restricted to the user's entitlement allow-list.
    UserScoped,
    /// Store-wide promotions, allow-list not consulted.
    Global,
    /// No discounting performed at all.
    Identity,
}

impl PricingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingMode::UserScoped => "user_scoped",
            PricingMode::Global => "global",
            PricingMode::Identity => "identity",
        }
    }
}

/// Complete pricing breakdown for a cart.
///
/// `grand_total` is always derived as `subtotal - discount_total`; it is
/// never computed independently. Checkout persists the whole structure into
/// the order record for audit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Sum of undiscounted line subtotals.
    pub subtotal: Money,
    /// Sum of all per-line savings.
    pub discount_total: Money,
    /// What the customer pays: `subtotal - discount_total`.
    pub grand_total: Money,
    /// One entry per discounted line, in line order.
    pub line_discounts: Vec<AppliedDiscount>,
    /// The single best-performing entry, for the summary badge.
    pub headline: Option<AppliedDiscount>,
    /// Which path produced this result.
    pub mode: PricingMode,
}

impl CartPricing {
    /// The undiscounted outcome: every line at full price.
    ///
    /// Used directly by the engine when no discounts are eligible, and by
    /// callers degrading after a failed catalog fetch. The failure itself
    /// travels on the caller's own error channel, never inside the result.
    pub fn identity(lines: &[CartLine], currency: Currency) -> Result<Self, CommerceError> {
        let mut subtotal = Money::zero(currency);
        for line in lines {
            let line_subtotal = line.subtotal()?;
            if line_subtotal.currency != currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: currency.code().to_string(),
                    got: line_subtotal.currency.code().to_string(),
                });
            }
            subtotal = subtotal
                .try_add(&line_subtotal)
                .ok_or(CommerceError::Overflow)?;
        }
        Ok(Self {
            subtotal,
            discount_total: Money::zero(currency),
            grand_total: subtotal,
            line_discounts: Vec::new(),
            headline: None,
            mode: PricingMode::Identity,
        })
    }

    /// Whether any line carries a saving.
    pub fn has_discounts(&self) -> bool {
        self.discount_total.is_positive()
    }

    /// Savings as a share of the subtotal, for display.
    pub fn savings_percent(&self) -> f64 {
        if self.subtotal.cents == 0 {
            return 0.0;
        }
        self.discount_total.cents as f64 / self.subtotal.cents as f64 * 100.0
    }
}

//! Cart line items.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One product entry in the cart.
///
/// Lines are supplied fresh by the cart UI on every pricing call and are not
/// persisted here. Quantity is expected to be >= 1; a line that arrives with
/// a zero or negative quantity still contributes its (empty) subtotal but is
/// never considered for discounting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Product name (denormalized for display and audit).
    pub product_name: String,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: i64,
}

impl CartLine {
    /// Create a new cart line.
    pub fn new(
        product_id: ProductId,
        product_name: impl Into<String>,
        unit_price: Money,
        quantity: i64,
    ) -> Self {
        Self {
            product_id,
            product_name: product_name.into(),
            unit_price,
            quantity,
        }
    }

    /// Line subtotal before any discount.
    ///
    /// A non-positive quantity contributes zero rather than a negative
    /// amount, keeping cart totals non-negative for any input.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .try_mul(self.quantity.max(0))
            .ok_or(CommerceError::Overflow)
    }

    /// Whether this line may carry a discount at all.
    ///
    /// Requires a positive quantity and a non-negative unit price.
    pub fn is_discountable(&self) -> bool {
        self.quantity >= 1 && !self.unit_price.is_negative()
    }
}

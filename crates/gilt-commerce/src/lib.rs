//! Commerce domain types and discount resolution for the Gilt storefront.
//!
//! The storefront and back office live elsewhere; this crate owns the part
//! that has to be exact and reproducible: deciding, per cart line and for
//! the cart as a whole, which promotional rule gives the customer the best
//! price, and computing the monetary outcome for checkout and audit.
//!
//! Everything here is a pure, synchronous, in-memory computation. Catalog
//! and entitlement fetching belong to the caller (see `gilt-data`); the
//! reference instant is always passed in, so results are deterministic.
//!
//! # Example
//!
//! ```rust,ignore
//! use gilt_commerce::prelude::*;
//!
//! let lines = vec![CartLine::new(
//!     ProductId::new("ring-aurora"),
//!     "Aurora Ring",
//!     Money::new(45000, Currency::USD),
//!     2,
//! )];
//! let catalog = compile_catalog(&records, Currency::USD);
//! let pricing = price_cart(&lines, &catalog, &[], Currency::USD, now)?;
//! println!("pay {}", pricing.grand_total);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod discount;

pub use error::CommerceError;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::{DiscountId, ProductId, UserId};
    pub use crate::money::{Currency, Money};

    pub use crate::cart::{CartLine, CartPricing, PricingMode};

    pub use crate::discount::{
        compile_catalog, price_cart, AppliedDiscount, Discount, DiscountRecord, DiscountRule,
        RecordError, RecordKind, Schedule,
    };
}

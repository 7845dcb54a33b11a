//! Discount rules and the pricing resolution engine.
//!
//! Wire records from the catalog are compiled into typed rules, filtered for
//! eligibility, valuated per line, and the best saving per line is kept.
//! Discounts never stack.

mod eligibility;
mod engine;
mod record;
mod rule;
mod selector;
mod valuation;

pub use eligibility::filter_eligible;
pub use engine::price_cart;
pub use record::{compile_catalog, DiscountRecord, RecordError, RecordKind};
pub use rule::{AppliedDiscount, Discount, DiscountRule, Schedule};
pub use selector::select_best;
pub use valuation::valuate;

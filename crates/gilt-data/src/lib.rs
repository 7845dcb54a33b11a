//! Catalog and entitlement access for the Gilt pricing core.
//!
//! The pricing engine in `gilt-commerce` is a pure function; this crate is
//! the async boundary in front of it. It fetches the promotion catalog and
//! user entitlements from their owning services, compiles the records, runs
//! the engine once per request, and degrades to undiscounted prices when a
//! fetch fails. Cart-change events drive recomputation explicitly; there
//! is no hidden reactive state.

pub mod error;
pub mod feed;
pub mod quote;
pub mod source;

pub use error::CatalogError;
pub use feed::{CartEvent, QuoteFeed};
pub use quote::{current_timestamp, Quote, QuoteService};
pub use source::{EntitlementSource, PromotionSource, StaticEntitlements, StaticPromotions};

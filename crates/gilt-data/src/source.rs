//! Promotion and entitlement sources.
//!
//! Both catalogs are owned by external systems; the engine only ever sees
//! the data these traits hand back. Implementations over HTTP live with the
//! services that own them; the in-memory sources here back tests and the
//! operator CLI.

use std::collections::HashMap;

use async_trait::async_trait;
use gilt_commerce::discount::DiscountRecord;
use gilt_commerce::ids::{DiscountId, UserId};

use crate::error::CatalogError;

/// Supplies the store-wide promotion catalog.
#[async_trait]
pub trait PromotionSource: Send + Sync {
    async fn promotions(&self) -> Result<Vec<DiscountRecord>, CatalogError>;
}

/// Supplies the discount IDs a user is entitled to.
#[async_trait]
pub trait EntitlementSource: Send + Sync {
    async fn entitlements(&self, user: &UserId) -> Result<Vec<DiscountId>, CatalogError>;
}

/// Fixed promotion catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticPromotions {
    records: Vec<DiscountRecord>,
}

impl StaticPromotions {
    pub fn new(records: Vec<DiscountRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl PromotionSource for StaticPromotions {
    async fn promotions(&self) -> Result<Vec<DiscountRecord>, CatalogError> {
        Ok(self.records.clone())
    }
}

/// Fixed entitlement table keyed by user.
///
/// Users without a row are simply not entitled to anything; that is not an
/// error, it routes them to global pricing.
#[derive(Debug, Clone, Default)]
pub struct StaticEntitlements {
    by_user: HashMap<UserId, Vec<DiscountId>>,
}

impl StaticEntitlements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant a user an allow-list of discounts.
    pub fn grant(mut self, user: UserId, discounts: Vec<DiscountId>) -> Self {
        self.by_user.insert(user, discounts);
        self
    }
}

#[async_trait]
impl EntitlementSource for StaticEntitlements {
    async fn entitlements(&self, user: &UserId) -> Result<Vec<DiscountId>, CatalogError> {
        Ok(self.by_user.get(user).cloned().unwrap_or_default())
    }
}

//! Quote orchestration over external catalog sources.

use gilt_commerce::cart::{CartLine, CartPricing, PricingMode};
use gilt_commerce::discount::{compile_catalog, price_cart};
use gilt_commerce::error::CommerceError;
use gilt_commerce::ids::UserId;
use gilt_commerce::money::{Currency, Money};
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::source::{EntitlementSource, PromotionSource};

/// A pricing outcome plus the degradation notice, if any.
///
/// A failed catalog fetch never reaches the engine: the quote falls back to
/// undiscounted prices and the failure string travels here, beside the
/// result, for the UI to surface on its own channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quote {
    /// The pricing breakdown.
    pub pricing: CartPricing,
    /// Why discounting was skipped, when it was.
    pub degraded: Option<String>,
}

impl Quote {
    /// The quote for a cart nobody has touched yet.
    pub fn empty(currency: Currency) -> Self {
        Self {
            pricing: CartPricing {
                subtotal: Money::zero(currency),
                discount_total: Money::zero(currency),
                grand_total: Money::zero(currency),
                line_discounts: Vec::new(),
                headline: None,
                mode: PricingMode::Identity,
            },
            degraded: None,
        }
    }
}

/// Prices carts against externally fetched promotion data.
///
/// Fetching happens here, once, before the engine runs; the engine itself
/// never suspends. Each call is independent; the service holds no state
/// between quotes.
pub struct QuoteService<P, E> {
    promotions: P,
    entitlements: E,
    currency: Currency,
}

impl<P, E> QuoteService<P, E>
where
    P: PromotionSource,
    E: EntitlementSource,
{
    pub fn new(promotions: P, entitlements: E, currency: Currency) -> Self {
        Self {
            promotions,
            entitlements,
            currency,
        }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Price a cart for an optional signed-in user at `now`.
    ///
    /// A user with entitlements gets user-scoped pricing; a user without
    /// any, or no user at all, gets global pricing. Source failures degrade
    /// to the identity outcome with the failure reported on
    /// [`Quote::degraded`].
    pub async fn quote(
        &self,
        user: Option<&UserId>,
        lines: &[CartLine],
        now: i64,
    ) -> Result<Quote, CommerceError> {
        let allowed = match user {
            Some(user) => match self.entitlements.entitlements(user).await {
                Ok(ids) => ids,
                Err(err) => return self.degrade(lines, &err),
            },
            None => Vec::new(),
        };

        let records = match self.promotions.promotions().await {
            Ok(records) => records,
            Err(err) => return self.degrade(lines, &err),
        };

        let catalog = compile_catalog(&records, self.currency);
        let pricing = price_cart(lines, &catalog, &allowed, self.currency, now)?;
        Ok(Quote {
            pricing,
            degraded: None,
        })
    }

    fn degrade(&self, lines: &[CartLine], err: &CatalogError) -> Result<Quote, CommerceError> {
        tracing::error!(error = %err, "catalog resolution failed, serving undiscounted prices");
        Ok(Quote {
            pricing: CartPricing::identity(lines, self.currency)?,
            degraded: Some(err.to_string()),
        })
    }
}

/// Current Unix timestamp, the default reference instant for quoting.
pub fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

//! Wire-format discount records and their validation.

use super::rule::{Discount, DiscountRule, Schedule};
use crate::ids::{DiscountId, ProductId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Discount kind tag as the catalog publishes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordKind {
    Percentage,
    Fixed,
    BuyXGetY,
}

/// Problems that make a record unusable for its declared kind.
///
/// A malformed record is skipped and the calculation proceeds with the
/// remaining candidates; it never aborts a pricing run.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RecordError {
    /// Percentage or fixed value that is not a finite, non-negative number.
    #[error("discount {id}: value {value} is not a finite non-negative number")]
    InvalidValue { id: String, value: f64 },

    /// BUY_X_GET_Y without a positive purchase threshold.
    #[error("discount {id}: BUY_X_GET_Y requires a positive min_quantity threshold")]
    MissingThreshold { id: String },

    /// BUY_X_GET_Y whose derived free-unit count is not positive.
    #[error("discount {id}: derived free-unit count {free} is not positive")]
    DegenerateReward { id: String, free: i64 },
}

/// A promotional rule as the external catalog publishes it.
///
/// The shape is generic across kinds (`value` and the quantity fields mean
/// different things per kind), so [`compile`](Self::compile) narrows each
/// record into a typed [`DiscountRule`] and is the only place a shape
/// problem can surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiscountRecord {
    /// Catalog identifier.
    pub id: String,
    /// Declared kind.
    #[serde(rename = "type")]
    pub kind: RecordKind,
    /// Percent for PERCENTAGE, minor-unit amount for FIXED, unused for
    /// BUY_X_GET_Y.
    pub value: f64,
    /// Window start, Unix seconds.
    pub starts_at: i64,
    /// Window end; absent means open-ended.
    #[serde(default)]
    pub ends_at: Option<i64>,
    /// Whether the discount is switched on.
    pub active: bool,
    /// Quantity floor for flat kinds; purchase threshold X for BUY_X_GET_Y.
    #[serde(default)]
    pub min_quantity: Option<i64>,
    /// Quantity ceiling for flat kinds; encodes the reward for BUY_X_GET_Y.
    #[serde(default)]
    pub max_quantity: Option<i64>,
    /// Eligible products; empty means store-wide.
    #[serde(default)]
    pub product_ids: Vec<String>,
}

impl DiscountRecord {
    /// Validate and narrow this record into a typed [`Discount`].
    ///
    /// Fixed amounts are read as minor units of `currency`; the catalog
    /// publishes per-line-subtotal amounts, applied once with a cap.
    pub fn compile(&self, currency: Currency) -> Result<Discount, RecordError> {
        let rule = match self.kind {
            RecordKind::Percentage => {
                self.require_finite_value()?;
                DiscountRule::Percentage {
                    percent: self.value,
                }
            }
            RecordKind::Fixed => {
                self.require_finite_value()?;
                DiscountRule::FixedAmount {
                    amount: Money::new(self.value.round() as i64, currency),
                }
            }
            RecordKind::BuyXGetY => {
                let buy = self
                    .min_quantity
                    .filter(|threshold| *threshold > 0)
                    .ok_or_else(|| RecordError::MissingThreshold {
                        id: self.id.clone(),
                    })?;
                // Reward encoding: Y = max - min when both are present,
                // one free unit per threshold otherwise.
                let free = match self.max_quantity {
                    Some(max) => max - buy,
                    None => 1,
                };
                if free <= 0 {
                    return Err(RecordError::DegenerateReward {
                        id: self.id.clone(),
                        free,
                    });
                }
                DiscountRule::BuyXGetY { buy, free }
            }
        };

        Ok(Discount {
            id: DiscountId::new(&self.id),
            rule,
            schedule: Schedule {
                starts_at: self.starts_at,
                ends_at: self.ends_at,
            },
            active: self.active,
            product_ids: self
                .product_ids
                .iter()
                .map(|p| ProductId::new(p.as_str()))
                .collect(),
            min_quantity: self.min_quantity,
            max_quantity: self.max_quantity,
        })
    }

    fn require_finite_value(&self) -> Result<(), RecordError> {
        if self.value.is_finite() && self.value >= 0.0 {
            Ok(())
        } else {
            Err(RecordError::InvalidValue {
                id: self.id.clone(),
                value: self.value,
            })
        }
    }
}

/// Compile a catalog batch, skipping malformed records.
pub fn compile_catalog(records: &[DiscountRecord], currency: Currency) -> Vec<Discount> {
    records
        .iter()
        .filter_map(|record| match record.compile(currency) {
            Ok(discount) => Some(discount),
            Err(err) => {
                tracing::warn!(
                    discount = %record.id,
                    error = %err,
                    "skipping malformed discount record"
                );
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, kind: RecordKind, value: f64) -> DiscountRecord {
        DiscountRecord {
            id: id.to_string(),
            kind,
            value,
            starts_at: 0,
            ends_at: None,
            active: true,
            min_quantity: None,
            max_quantity: None,
            product_ids: Vec::new(),
        }
    }

    #[test]
    fn percentage_compiles() {
        let d = record("p15", RecordKind::Percentage, 15.0)
            .compile(Currency::USD)
            .unwrap();
        assert_eq!(d.rule, DiscountRule::Percentage { percent: 15.0 });
    }

    #[test]
    fn fixed_amount_reads_minor_units() {
        let d = record("f500", RecordKind::Fixed, 500.0)
            .compile(Currency::USD)
            .unwrap();
        assert_eq!(
            d.rule,
            DiscountRule::FixedAmount {
                amount: Money::new(500, Currency::USD)
            }
        );
    }

    #[test]
    fn non_finite_value_is_malformed() {
        let err = record("bad", RecordKind::Percentage, f64::NAN)
            .compile(Currency::USD)
            .unwrap_err();
        assert!(matches!(err, RecordError::InvalidValue { .. }));

        let err = record("neg", RecordKind::Fixed, -100.0)
            .compile(Currency::USD)
            .unwrap_err();
        assert!(matches!(err, RecordError::InvalidValue { .. }));
    }

    #[test]
    fn buy_x_get_y_derives_reward_from_bounds() {
        let mut r = record("b3g1", RecordKind::BuyXGetY, 0.0);
        r.min_quantity = Some(3);
        r.max_quantity = Some(4);
        let d = r.compile(Currency::USD).unwrap();
        assert_eq!(d.rule, DiscountRule::BuyXGetY { buy: 3, free: 1 });
    }

    #[test]
    fn buy_x_get_y_defaults_to_one_free_unit() {
        let mut r = record("b5", RecordKind::BuyXGetY, 0.0);
        r.min_quantity = Some(5);
        let d = r.compile(Currency::USD).unwrap();
        assert_eq!(d.rule, DiscountRule::BuyXGetY { buy: 5, free: 1 });
    }

    #[test]
    fn buy_x_get_y_without_threshold_is_malformed() {
        let err = record("b?", RecordKind::BuyXGetY, 0.0)
            .compile(Currency::USD)
            .unwrap_err();
        assert!(matches!(err, RecordError::MissingThreshold { .. }));
    }

    #[test]
    fn inverted_bounds_are_malformed_not_coerced() {
        let mut r = record("b3g0", RecordKind::BuyXGetY, 0.0);
        r.min_quantity = Some(3);
        r.max_quantity = Some(3);
        let err = r.compile(Currency::USD).unwrap_err();
        assert_eq!(
            err,
            RecordError::DegenerateReward {
                id: "b3g0".to_string(),
                free: 0
            }
        );
    }

    #[test]
    fn batch_compile_skips_malformed_records() {
        let good = record("p10", RecordKind::Percentage, 10.0);
        let bad = record("b?", RecordKind::BuyXGetY, 0.0);
        let compiled = compile_catalog(&[bad, good], Currency::USD);
        assert_eq!(compiled.len(), 1);
        assert_eq!(compiled[0].id.as_str(), "p10");
    }

    #[test]
    fn wire_format_round_trips() {
        let json = r#"{
            "id": "summer-b2g1",
            "type": "BUY_X_GET_Y",
            "value": 0,
            "starts_at": 1700000000,
            "active": true,
            "min_quantity": 2,
            "max_quantity": 3,
            "product_ids": ["ring-aurora"]
        }"#;
        let r: DiscountRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.kind, RecordKind::BuyXGetY);
        assert_eq!(r.ends_at, None);
        let d = r.compile(Currency::USD).unwrap();
        assert_eq!(d.rule, DiscountRule::BuyXGetY { buy: 2, free: 1 });
        assert!(!d.is_store_wide());
    }
}

//! Per-rule valuation of a single cart line.

use super::rule::{AppliedDiscount, Discount, DiscountRule};
use crate::cart::CartLine;
use crate::money::Money;

/// Price one line under one discount.
///
/// Pure and deterministic: identical inputs always produce identical output.
/// Returns `None` when the discount does not apply to the line: wrong
/// product scope, quantity out of bounds, or a fixed amount in a foreign
/// currency. A below-threshold `BuyXGetY` line is *not* `None`: it yields a
/// zero saving with an advisory upsell message.
pub fn valuate(discount: &Discount, line: &CartLine, line_subtotal: Money) -> Option<AppliedDiscount> {
    if !discount.applies_to(line) {
        return None;
    }

    match discount.rule {
        DiscountRule::Percentage { percent } => {
            let raw = line_subtotal.percentage(percent);
            let amount = Money::new(
                raw.cents.max(0).min(line_subtotal.cents),
                line_subtotal.currency,
            );
            applied(discount, line, line_subtotal, amount, None)
        }
        DiscountRule::FixedAmount { amount } => {
            if amount.currency != line_subtotal.currency {
                tracing::warn!(
                    discount = %discount.id,
                    rule_currency = %amount.currency,
                    line_currency = %line_subtotal.currency,
                    "fixed discount currency does not match line; not applicable"
                );
                return None;
            }
            applied(discount, line, line_subtotal, amount.min(line_subtotal), None)
        }
        DiscountRule::BuyXGetY { buy, free } => {
            let thresholds_met = line.quantity / buy;
            let free_units = thresholds_met.checked_mul(free)?.min(line.quantity);
            let amount = line.unit_price.try_mul(free_units)?;
            let remainder = line.quantity % buy;
            let message = (remainder != 0).then(|| {
                let needed = buy - remainder;
                if free == 1 {
                    format!("Add {needed} more to unlock a free item")
                } else {
                    format!("Add {needed} more to unlock {free} free items")
                }
            });
            applied(discount, line, line_subtotal, amount, message)
        }
    }
}

fn applied(
    discount: &Discount,
    line: &CartLine,
    line_subtotal: Money,
    amount: Money,
    message: Option<String>,
) -> Option<AppliedDiscount> {
    Some(AppliedDiscount {
        discount_id: discount.id.clone(),
        product_id: line.product_id.clone(),
        rule: discount.rule.clone(),
        amount,
        line_subtotal,
        line_total: line_subtotal.try_sub(&amount)?,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discount::Schedule;
    use crate::ids::{DiscountId, ProductId};
    use crate::money::Currency;

    fn discount(id: &str, rule: DiscountRule) -> Discount {
        Discount {
            id: DiscountId::new(id),
            rule,
            schedule: Schedule {
                starts_at: 0,
                ends_at: None,
            },
            active: true,
            product_ids: Vec::new(),
            min_quantity: None,
            max_quantity: None,
        }
    }

    fn line(price_cents: i64, quantity: i64) -> CartLine {
        CartLine::new(
            ProductId::new("ring-1"),
            "Aurora Ring",
            Money::new(price_cents, Currency::USD),
            quantity,
        )
    }

    fn run(d: &Discount, l: &CartLine) -> Option<AppliedDiscount> {
        valuate(d, l, l.subtotal().unwrap())
    }

    #[test]
    fn percentage_of_line_subtotal() {
        // 15% off 2 x 100.00 saves 30.00
        let d = discount("p15", DiscountRule::Percentage { percent: 15.0 });
        let a = run(&d, &line(10000, 2)).unwrap();
        assert_eq!(a.amount.cents, 3000);
        assert_eq!(a.line_total.cents, 17000);
        assert!(a.message.is_none());
    }

    #[test]
    fn percentage_above_hundred_is_clamped() {
        let d = discount("p150", DiscountRule::Percentage { percent: 150.0 });
        let a = run(&d, &line(10000, 1)).unwrap();
        assert_eq!(a.amount.cents, 10000);
        assert_eq!(a.line_total.cents, 0);
    }

    #[test]
    fn fixed_amount_caps_at_subtotal() {
        // 80.00 off a 50.00 line never goes negative
        let d = discount(
            "f80",
            DiscountRule::FixedAmount {
                amount: Money::new(8000, Currency::USD),
            },
        );
        let a = run(&d, &line(5000, 1)).unwrap();
        assert_eq!(a.amount.cents, 5000);
        assert_eq!(a.line_total.cents, 0);
    }

    #[test]
    fn fixed_amount_in_foreign_currency_is_not_applicable() {
        let d = discount(
            "f-eur",
            DiscountRule::FixedAmount {
                amount: Money::new(500, Currency::EUR),
            },
        );
        assert!(run(&d, &line(5000, 1)).is_none());
    }

    #[test]
    fn buy_three_get_one_at_threshold() {
        let d = discount("b3g1", DiscountRule::BuyXGetY { buy: 3, free: 1 });
        let a = run(&d, &line(1000, 3)).unwrap();
        assert_eq!(a.amount.cents, 1000);
        assert_eq!(a.line_total.cents, 2000);
        assert!(a.message.is_none());
    }

    #[test]
    fn buy_three_get_one_below_threshold_reports_progress() {
        let d = discount("b3g1", DiscountRule::BuyXGetY { buy: 3, free: 1 });
        let a = run(&d, &line(1000, 2)).unwrap();
        assert_eq!(a.amount.cents, 0);
        assert_eq!(a.line_total.cents, 2000);
        assert_eq!(
            a.message.as_deref(),
            Some("Add 1 more to unlock a free item")
        );
    }

    #[test]
    fn buy_x_get_y_accumulates_per_threshold() {
        // 7 units at buy-3-get-1: two thresholds met, one unit short of the next
        let d = discount("b3g1", DiscountRule::BuyXGetY { buy: 3, free: 1 });
        let a = run(&d, &line(1000, 7)).unwrap();
        assert_eq!(a.amount.cents, 2000);
        assert_eq!(
            a.message.as_deref(),
            Some("Add 2 more to unlock a free item")
        );
    }

    #[test]
    fn free_units_never_exceed_line_quantity() {
        let d = discount("b1g9", DiscountRule::BuyXGetY { buy: 1, free: 9 });
        let a = run(&d, &line(1000, 4)).unwrap();
        assert_eq!(a.amount.cents, 4000);
        assert_eq!(a.line_total.cents, 0);
    }

    #[test]
    fn out_of_scope_line_is_not_applicable() {
        let mut d = discount("p10", DiscountRule::Percentage { percent: 10.0 });
        d.product_ids = vec![ProductId::new("necklace-9")];
        assert!(run(&d, &line(1000, 1)).is_none());
    }

    #[test]
    fn quantity_bounds_exclude_the_line() {
        let mut d = discount("p10", DiscountRule::Percentage { percent: 10.0 });
        d.min_quantity = Some(2);
        assert!(run(&d, &line(1000, 1)).is_none());
    }
}

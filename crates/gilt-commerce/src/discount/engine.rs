//! Cart pricing resolution.
//!
//! The single entry point [`price_cart`] decides which discount pool is in
//! play, valuates every candidate against every line, keeps the best result
//! per line, and aggregates cart totals. It is a pure synchronous function:
//! all inputs arrive explicitly, including the reference instant, so
//! identical inputs always produce identical results.

use super::eligibility::filter_eligible;
use super::rule::{AppliedDiscount, Discount};
use super::selector::select_best;
use super::valuation::valuate;
use crate::cart::{CartLine, CartPricing, PricingMode};
use crate::error::CommerceError;
use crate::ids::DiscountId;
use crate::money::{Currency, Money};

/// Price a cart against a discount catalog.
///
/// Mode resolution:
/// - a non-empty `allowed` list runs user-scoped pricing and is terminal:
///   store-wide promotions are not consulted even when the list matches
///   nothing;
/// - an empty list runs global pricing over whatever is temporally eligible;
/// - with no eligible discounts at all, the identity outcome is returned.
///
/// Only programmer-error-class problems (overflow, a line priced in a
/// foreign currency) surface as `Err`. Shape problems in the catalog never
/// reach this function; they are skipped during record compilation.
pub fn price_cart(
    lines: &[CartLine],
    catalog: &[Discount],
    allowed: &[DiscountId],
    currency: Currency,
    now: i64,
) -> Result<CartPricing, CommerceError> {
    let (mode, candidates) = if allowed.is_empty() {
        let live = filter_eligible(catalog, now, &[]);
        if live.is_empty() {
            tracing::debug!("no eligible discounts, returning identity pricing");
            return CartPricing::identity(lines, currency);
        }
        (PricingMode::Global, live)
    } else {
        (PricingMode::UserScoped, filter_eligible(catalog, now, allowed))
    };

    tracing::debug!(
        mode = mode.as_str(),
        candidates = candidates.len(),
        lines = lines.len(),
        "pricing cart"
    );

    let mut subtotal = Money::zero(currency);
    let mut line_discounts: Vec<AppliedDiscount> = Vec::new();

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

        let valuations = candidates
            .iter()
            .filter_map(|d| valuate(d, line, line_subtotal))
            .collect();
        if let Some(best) = select_best(valuations) {
            line_discounts.push(best);
        }
    }

    let discount_total = Money::try_sum(line_discounts.iter().map(|a| &a.amount), currency)
        .ok_or(CommerceError::Overflow)?;
    // The equality grand_total == subtotal - discount_total is the result's
    // defining invariant; it is derived here and nowhere else.
    let grand_total = subtotal
        .try_sub(&discount_total)
        .ok_or(CommerceError::Overflow)?;
    let headline = pick_headline(&line_discounts);

    Ok(CartPricing {
        subtotal,
        discount_total,
        grand_total,
        line_discounts,
        headline,
        mode,
    })
}

/// The summary badge: largest saving across the cart, earliest line on ties.
fn pick_headline(line_discounts: &[AppliedDiscount]) -> Option<AppliedDiscount> {
    let mut best: Option<&AppliedDiscount> = None;
    for applied in line_discounts {
        match best {
            Some(current) if applied.amount.cents <= current.amount.cents => {}
            _ => best = Some(applied),
        }
    }
    best.cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discount::{DiscountRule, Schedule};
    use crate::ids::ProductId;

    const NOW: i64 = 1_700_000_000;

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

    fn line(product: &str, price_cents: i64, quantity: i64) -> CartLine {
        CartLine::new(
            ProductId::new(product),
            product,
            Money::new(price_cents, Currency::USD),
            quantity,
        )
    }

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    #[test]
    fn no_eligible_discounts_yields_identity() {
        let lines = [line("ring", 10000, 2)];
        let pricing = price_cart(&lines, &[], &[], Currency::USD, NOW).unwrap();
        assert_eq!(pricing.mode, PricingMode::Identity);
        assert_eq!(pricing.subtotal.cents, 20000);
        assert_eq!(pricing.discount_total.cents, 0);
        assert_eq!(pricing.grand_total.cents, 20000);
        assert!(pricing.headline.is_none());
    }

    #[test]
    fn best_candidate_wins_per_line() {
        // 10% of 20.00 saves 2.00; 5.00 flat saves more
        let lines = [line("ring", 2000, 1)];
        let catalog = vec![
            discount("pct-10", DiscountRule::Percentage { percent: 10.0 }),
            discount(
                "flat-5",
                DiscountRule::FixedAmount { amount: usd(500) },
            ),
        ];
        let pricing = price_cart(&lines, &catalog, &[], Currency::USD, NOW).unwrap();
        assert_eq!(pricing.mode, PricingMode::Global);
        assert_eq!(pricing.line_discounts.len(), 1);
        assert_eq!(pricing.line_discounts[0].discount_id.as_str(), "flat-5");
        assert_eq!(pricing.discount_total.cents, 500);
        assert_eq!(pricing.grand_total.cents, 1500);
    }

    #[test]
    fn totals_balance_across_mixed_lines() {
        let lines = [
            line("ring", 10000, 2),    // 15% -> 3000
            line("necklace", 5000, 1), // 15% -> 750
        ];
        let catalog = vec![discount("pct-15", DiscountRule::Percentage { percent: 15.0 })];
        let pricing = price_cart(&lines, &catalog, &[], Currency::USD, NOW).unwrap();
        assert_eq!(pricing.subtotal.cents, 25000);
        assert_eq!(pricing.discount_total.cents, 3750);
        assert_eq!(
            pricing.grand_total.cents,
            pricing.subtotal.cents - pricing.discount_total.cents
        );
        assert_eq!(pricing.line_discounts.len(), 2);
        // Same rule on two lines appears once per line.
        assert!(pricing
            .line_discounts
            .iter()
            .all(|a| a.discount_id.as_str() == "pct-15"));
    }

    #[test]
    fn headline_is_largest_saving_earliest_line_on_ties() {
        let lines = [
            line("studs", 2000, 1),  // 10% -> 200
            line("band-a", 6000, 1), // 10% -> 600
            line("band-b", 6000, 1), // 10% -> 600
        ];
        let catalog = vec![discount("pct-10", DiscountRule::Percentage { percent: 10.0 })];
        let pricing = price_cart(&lines, &catalog, &[], Currency::USD, NOW).unwrap();
        let headline = pricing.headline.unwrap();
        assert_eq!(headline.amount.cents, 600);
        assert_eq!(headline.product_id.as_str(), "band-a");
    }

    #[test]
    fn user_mode_is_terminal_even_when_it_matches_nothing() {
        let catalog = vec![discount("public-20", DiscountRule::Percentage { percent: 20.0 })];
        let allowed = vec![DiscountId::new("vip-only")];
        let lines = [line("ring", 10000, 1)];
        let pricing = price_cart(&lines, &catalog, &allowed, Currency::USD, NOW).unwrap();
        // The live public discount is not consulted in user-scoped mode.
        assert_eq!(pricing.mode, PricingMode::UserScoped);
        assert_eq!(pricing.discount_total.cents, 0);
        assert_eq!(pricing.grand_total.cents, 10000);
    }

    #[test]
    fn user_mode_uses_only_entitled_discounts() {
        let catalog = vec![
            discount("vip-25", DiscountRule::Percentage { percent: 25.0 }),
            discount("public-50", DiscountRule::Percentage { percent: 50.0 }),
        ];
        let allowed = vec![DiscountId::new("vip-25")];
        let lines = [line("ring", 10000, 1)];
        let pricing = price_cart(&lines, &catalog, &allowed, Currency::USD, NOW).unwrap();
        assert_eq!(pricing.discount_total.cents, 2500);
        assert_eq!(
            pricing.headline.unwrap().discount_id.as_str(),
            "vip-25"
        );
    }

    #[test]
    fn invalid_quantity_line_still_contributes_subtotal() {
        let lines = [line("ring", 10000, 0), line("necklace", 5000, 2)];
        let catalog = vec![discount("pct-10", DiscountRule::Percentage { percent: 10.0 })];
        let pricing = price_cart(&lines, &catalog, &[], Currency::USD, NOW).unwrap();
        // The zero-quantity line adds nothing and carries no discount;
        // the valid line is discounted normally.
        assert_eq!(pricing.subtotal.cents, 10000);
        assert_eq!(pricing.line_discounts.len(), 1);
        assert_eq!(pricing.line_discounts[0].product_id.as_str(), "necklace");
        assert_eq!(pricing.discount_total.cents, 1000);
    }

    #[test]
    fn adding_a_candidate_never_worsens_the_outcome() {
        let lines = [line("ring", 20000, 1)];
        let base = vec![discount("pct-10", DiscountRule::Percentage { percent: 10.0 })];
        let before = price_cart(&lines, &base, &[], Currency::USD, NOW).unwrap();

        let mut extended = base.clone();
        extended.push(discount(
            "flat-1",
            DiscountRule::FixedAmount { amount: usd(100) },
        ));
        let after = price_cart(&lines, &extended, &[], Currency::USD, NOW).unwrap();
        assert!(after.discount_total.cents >= before.discount_total.cents);
    }

    #[test]
    fn identical_inputs_produce_identical_results() {
        let lines = [line("ring", 9999, 3), line("necklace", 1234, 2)];
        let catalog = vec![
            discount("pct-15", DiscountRule::Percentage { percent: 15.0 }),
            discount("b3g1", DiscountRule::BuyXGetY { buy: 3, free: 1 }),
        ];
        let a = price_cart(&lines, &catalog, &[], Currency::USD, NOW).unwrap();
        let b = price_cart(&lines, &catalog, &[], Currency::USD, NOW).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn discount_total_never_exceeds_subtotal() {
        let lines = [line("ring", 5000, 1)];
        let catalog = vec![discount(
            "flat-80",
            DiscountRule::FixedAmount { amount: usd(8000) },
        )];
        let pricing = price_cart(&lines, &catalog, &[], Currency::USD, NOW).unwrap();
        assert_eq!(pricing.discount_total.cents, 5000);
        assert_eq!(pricing.grand_total.cents, 0);
        assert!(pricing.discount_total.cents <= pricing.subtotal.cents);
    }

    #[test]
    fn upsell_only_line_still_surfaces_its_message() {
        let lines = [line("ring", 1000, 2)];
        let catalog = vec![discount("b3g1", DiscountRule::BuyXGetY { buy: 3, free: 1 })];
        let pricing = price_cart(&lines, &catalog, &[], Currency::USD, NOW).unwrap();
        assert_eq!(pricing.discount_total.cents, 0);
        assert_eq!(pricing.grand_total.cents, 2000);
        let applied = &pricing.line_discounts[0];
        assert_eq!(applied.amount.cents, 0);
        assert!(applied.message.is_some());
    }

    #[test]
    fn expired_discounts_are_invisible() {
        let mut expired = discount("old-50", DiscountRule::Percentage { percent: 50.0 });
        expired.schedule.ends_at = Some(NOW - 1);
        let lines = [line("ring", 10000, 1)];
        let pricing = price_cart(&lines, &[expired], &[], Currency::USD, NOW).unwrap();
        assert_eq!(pricing.mode, PricingMode::Identity);
        assert_eq!(pricing.grand_total.cents, 10000);
    }
}

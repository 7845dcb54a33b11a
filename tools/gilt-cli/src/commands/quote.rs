//! Price a cart fixture against a promotion catalog.

use std::fs;

use anyhow::{Context, Result};
use chrono::DateTime;
use serde::de::DeserializeOwned;

use gilt_commerce::cart::CartLine;
use gilt_commerce::discount::DiscountRecord;
use gilt_commerce::ids::{DiscountId, UserId};
use gilt_data::{current_timestamp, QuoteService, StaticEntitlements, StaticPromotions};

use super::QuoteArgs;
use crate::output::Output;

/// Run the quote command.
pub async fn run(args: QuoteArgs, output: &Output) -> Result<()> {
    let currency = super::parse_currency(&args.currency)?;
    let at = match &args.at {
        Some(instant) => DateTime::parse_from_rfc3339(instant)
            .with_context(|| format!("invalid --at instant: {instant}"))?
            .timestamp(),
        None => current_timestamp(),
    };

    let lines: Vec<CartLine> = read_json(&args.cart)?;
    let records: Vec<DiscountRecord> = read_json(&args.promotions)?;
    output.debug(&format!(
        "{} cart lines, {} catalog records, at={at}",
        lines.len(),
        records.len()
    ));

    let operator = UserId::new("operator");
    let entitled: Vec<DiscountId> = args
        .entitled
        .iter()
        .map(|id| DiscountId::new(id.as_str()))
        .collect();
    let service = QuoteService::new(
        StaticPromotions::new(records),
        StaticEntitlements::new().grant(operator.clone(), entitled.clone()),
        currency,
    );
    let user = if entitled.is_empty() {
        None
    } else {
        Some(&operator)
    };

    let quote = service.quote(user, &lines, at).await?;

    if output.is_json() {
        output.json(&quote);
        return Ok(());
    }

    if let Some(reason) = &quote.degraded {
        output.warn(&format!("discounting degraded: {reason}"));
    }

    output.header("Cart");
    for line in &lines {
        output.info(&format!(
            "{} x {} @ {} = {}",
            line.quantity,
            line.product_name,
            line.unit_price,
            line.subtotal()?
        ));
    }

    output.header("Discounts");
    if quote.pricing.line_discounts.is_empty() {
        output.info("none applied");
    }
    for applied in &quote.pricing.line_discounts {
        output.success(&format!(
            "{} ({}) on {}: -{}",
            applied.discount_id,
            applied.rule.kind_name(),
            applied.product_id,
            applied.amount
        ));
        if let Some(message) = &applied.message {
            output.info(message);
        }
    }

    output.header("Totals");
    output.amount("subtotal", &quote.pricing.subtotal.to_string());
    output.amount("discount", &format!("-{}", quote.pricing.discount_total));
    output.amount("total", &quote.pricing.grand_total.to_string());
    output.amount("mode", quote.pricing.mode.as_str());
    if let Some(headline) = &quote.pricing.headline {
        output.success(&format!(
            "Best deal: {} saves {}",
            headline.discount_id, headline.amount
        ));
    }

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &str) -> Result<T> {
    let content = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&content).with_context(|| format!("decoding {path}"))
}

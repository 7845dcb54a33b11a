//! CLI command implementations.

pub mod lint;
pub mod quote;

use anyhow::{anyhow, Result};
use clap::Args;
use gilt_commerce::money::Currency;

/// Arguments for the quote command.
#[derive(Args)]
pub struct QuoteArgs {
    /// Path to the cart fixture (JSON array of cart lines).
    #[arg(short, long)]
    pub cart: String,

    /// Path to the promotion catalog (JSON array of discount records).
    #[arg(short, long)]
    pub promotions: String,

    /// Comma-separated discount IDs the customer is entitled to.
    #[arg(short, long, value_delimiter = ',')]
    pub entitled: Vec<String>,

    /// Reference instant, RFC 3339 (default: now).
    #[arg(long)]
    pub at: Option<String>,

    /// Cart currency code.
    #[arg(long, default_value = "USD")]
    pub currency: String,
}

/// Arguments for the lint command.
#[derive(Args)]
pub struct LintArgs {
    /// Path to the promotion catalog (JSON array of discount records).
    #[arg(short, long)]
    pub promotions: String,

    /// Currency used to read fixed amounts.
    #[arg(long, default_value = "USD")]
    pub currency: String,
}

pub(crate) fn parse_currency(code: &str) -> Result<Currency> {
    Currency::from_code(code).ok_or_else(|| anyhow!("unsupported currency: {code}"))
}

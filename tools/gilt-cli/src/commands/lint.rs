//! Validate a promotion catalog file.

use std::fs;

use anyhow::{bail, Context, Result};

use gilt_commerce::discount::DiscountRecord;

use super::LintArgs;
use crate::output::Output;

/// Run the lint command.
pub fn run(args: LintArgs, output: &Output) -> Result<()> {
    let currency = super::parse_currency(&args.currency)?;
    let content = fs::read_to_string(&args.promotions)
        .with_context(|| format!("reading {}", args.promotions))?;
    let records: Vec<DiscountRecord> =
        serde_json::from_str(&content).context("decoding promotion catalog")?;

    let mut invalid = 0usize;
    for record in &records {
        match record.compile(currency) {
            Ok(discount) => {
                output.debug(&format!("{}: {}", record.id, discount.rule.kind_name()));
            }
            Err(err) => {
                invalid += 1;
                output.warn(&err.to_string());
            }
        }
    }

    if invalid > 0 {
        bail!("{invalid} of {} records are malformed", records.len());
    }
    output.success(&format!("{} records OK", records.len()));
    Ok(())
}

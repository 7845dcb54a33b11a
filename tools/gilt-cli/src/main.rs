//! Gilt CLI - operator tooling for the storefront pricing core.
//!
//! Commands:
//! - `gilt quote` - price a cart fixture against a promotion catalog
//! - `gilt lint` - validate a promotion catalog file

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{LintArgs, QuoteArgs};

/// Gilt CLI - price carts and validate promotion catalogs
#[derive(Parser)]
#[command(name = "gilt")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a cart against a promotion catalog
    Quote(QuoteArgs),

    /// Validate a promotion catalog file
    Lint(LintArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let result = match cli.command {
        Commands::Quote(args) => commands::quote::run(args, &output).await,
        Commands::Lint(args) => commands::lint::run(args, &output),
    };

    if let Err(e) = result {
        output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

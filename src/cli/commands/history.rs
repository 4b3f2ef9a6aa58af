//! History command - show or clear the calculation history.

use anyhow::Result;
use colored::Colorize;

use deskmate_cli::storage::{LineStore, HISTORY_LIMIT};

use crate::cli::context::Context;
use crate::cli::format::OutputFormat;

/// Arguments for the history command.
#[derive(clap::Args)]
pub struct Args {
    /// Remove every entry
    #[arg(long)]
    pub clear: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Executes the history command.
pub fn run(args: Args, ctx: &Context) -> Result<()> {
    if args.clear {
        ctx.history.clear()?;
        println!("{}", "Calculation history cleared".green());
        return Ok(());
    }

    let entries = ctx.history.read_recent()?;

    if args.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!(
            "{}",
            format!("No calculations in {}", ctx.history.store().location()).dimmed()
        );
        return Ok(());
    }

    println!(
        "{}",
        format!("Last {} calculations (oldest first):", HISTORY_LIMIT).bold()
    );
    for entry in &entries {
        println!("  {entry}");
    }
    Ok(())
}

//! Remind command - print a reminder after a delay.

use std::time::Duration;

use anyhow::{bail, Result};
use colored::Colorize;

use crate::cli::context::Context;

/// Longest accepted delay (one week).
const MAX_DELAY_SECS: u64 = 7 * 24 * 60 * 60;

/// Arguments for the remind command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    remind 600 Take a break             Reminder in ten minutes\n    \
    remind 30 --title Tea Tea is ready  Custom title")]
pub struct Args {
    /// Delay in seconds
    #[arg(value_name = "SECONDS")]
    pub seconds: u64,

    /// Title shown in front of the message
    #[arg(long, default_value = "Reminder")]
    pub title: String,

    /// Reminder text; words are joined with spaces
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub message: Vec<String>,
}

/// Executes the remind command.
pub fn run(args: Args, ctx: &Context) -> Result<()> {
    if args.seconds == 0 || args.seconds > MAX_DELAY_SECS {
        bail!("Delay must be between 1 and {MAX_DELAY_SECS} seconds");
    }

    let delay = Duration::from_secs(args.seconds);
    let message = args.message.join(" ");

    if ctx.interactive {
        ctx.reminders.schedule(delay, args.title, message)?;
        println!(
            "{}",
            format!("Reminder set for {} seconds.", args.seconds).green()
        );
    } else {
        println!(
            "{}",
            format!("Waiting {} seconds for reminder...", args.seconds).dimmed()
        );
        ctx.reminders.wait(delay, &args.title, &message)?;
    }
    Ok(())
}

//! Calc command - evaluate an arithmetic expression.
//!
//! Successful results are appended to the bounded calculation history.
//! The result is printed even when saving it fails; the failure is then
//! reported as the command's error.

use anyhow::{Context as _, Result};
use colored::Colorize;

use deskmate_cli::calc;

use crate::cli::context::Context;

/// Arguments for the calc command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    calc 2+3*4          Prints 14\n    \
    calc 1500 / 3.5     Division always yields a decimal\n    \
    calc 2**10 % 7      Powers and remainders\n    \
    calc pi * 2**2      Area of a circle with radius 2")]
pub struct Args {
    /// Expression to evaluate; words are joined with spaces
    #[arg(
        value_name = "EXPRESSION",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub expression: Vec<String>,
}

/// Executes the calc command.
pub fn run(args: Args, ctx: &Context) -> Result<()> {
    let expr = args.expression.join(" ");
    if expr.trim().is_empty() {
        println!("Usage: calc <expression> (e.g. calc 1500 / 3.5)");
        return Ok(());
    }

    let value = calc::evaluate(&expr)?;
    let result = value.to_string();
    println!("{} {} = {}", "Result:".bold(), expr, result.green());

    ctx.history
        .record(&expr, &result)
        .context("Failed to save calculation history")?;
    Ok(())
}

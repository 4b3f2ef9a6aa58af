//! Convert command - convert between units.

use anyhow::{bail, Result};
use colored::Colorize;

use deskmate_cli::convert::{self, ConvertError, UnitKind};

use crate::cli::format::trim_float;

/// Arguments for the convert command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    convert length 10 km mi     Kilometres to miles\n    \
    convert weight 5 lb kg      Reverse conversions work too\n    \
    convert temp -40 C F        Celsius to Fahrenheit")]
pub struct Args {
    /// Conversion type: length, weight or temp
    #[arg(value_name = "TYPE")]
    pub kind: String,

    /// Value to convert
    #[arg(allow_negative_numbers = true)]
    pub value: f64,

    /// Source unit
    pub from: String,

    /// Target unit
    pub to: String,
}

/// Executes the convert command.
pub fn run(args: Args) -> Result<()> {
    let kind: UnitKind = args.kind.parse()?;

    match convert::convert(kind, args.value, &args.from, &args.to) {
        Ok(result) => {
            println!(
                "{} {} = {} {}",
                trim_float(args.value),
                args.from,
                trim_float(result).green(),
                args.to
            );
            Ok(())
        }
        Err(e @ ConvertError::Unsupported { .. }) => {
            bail!("{e}\nSupported conversions:\n  {}", convert::supported().join("\n  "))
        }
        Err(e) => Err(e.into()),
    }
}

//! Open command - open a file, folder or URL with the default application.

use anyhow::Result;
use colored::Colorize;

use deskmate_cli::system;

/// Arguments for the open command.
#[derive(clap::Args)]
pub struct Args {
    /// Path or URL; words are joined with spaces
    #[arg(required = true, trailing_var_arg = true)]
    pub path: Vec<String>,
}

/// Executes the open command.
pub fn run(args: Args) -> Result<()> {
    let opened = system::open_path(&args.path.join(" "))?;
    println!("{} {}", "Opened:".green(), opened);
    Ok(())
}

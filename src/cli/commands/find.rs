//! Find command - list files matching a glob pattern.

use anyhow::Result;
use colored::Colorize;

use deskmate_cli::system;

/// Arguments for the find command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    find \"*.txt\"                Text files in the current directory\n    \
    find \"src/**/*.rs\"          Rust files under src, recursively")]
pub struct Args {
    /// Glob pattern (quote it so the shell does not expand it)
    pub pattern: String,

    /// Maximum number of paths to print
    #[arg(short, long, default_value = "50")]
    pub limit: usize,
}

/// Executes the find command.
pub fn run(args: Args) -> Result<()> {
    let (paths, total) = system::find_paths(&args.pattern, args.limit)?;

    if paths.is_empty() {
        println!("{}", format!("Nothing matches {}", args.pattern).dimmed());
        return Ok(());
    }

    for path in &paths {
        println!("  {}", path.display());
    }
    if total > paths.len() {
        println!(
            "{}",
            format!("... and {} more (use --limit to show more)", total - paths.len()).dimmed()
        );
    }
    Ok(())
}

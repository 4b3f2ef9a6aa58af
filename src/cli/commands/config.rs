//! Config command - manage configuration

use std::path::Path;

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use deskmate_cli::config::{Config, CONFIG_KEYS};

#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    deskmate config show                       Show settings and file locations\n    \
    deskmate config set password_length 20     Longer generated passwords\n    \
    deskmate config set data_dir ~/Notes       Keep notes somewhere else")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<ConfigCommand>,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// Print the path of the config file
    Path,
}

pub fn run(args: Args, data_dir_override: Option<&Path>) -> Result<()> {
    match args.command {
        Some(ConfigCommand::Show) | None => show_config(data_dir_override),
        Some(ConfigCommand::Get { key }) => get_config(&key),
        Some(ConfigCommand::Set { key, value }) => set_config(&key, &value),
        Some(ConfigCommand::Path) => {
            println!("{}", Config::config_path()?.display());
            Ok(())
        }
    }
}

fn show_config(data_dir_override: Option<&Path>) -> Result<()> {
    let config = Config::load()?;
    let paths = config.data_paths(data_dir_override)?;

    println!("{}", "Deskmate Configuration".bold());
    println!();
    println!(
        "  {}  {}",
        "Config file:".dimmed(),
        Config::config_path()?.display()
    );
    println!("  {}  {}", "Data dir:   ".dimmed(), paths.data_dir.display());
    println!("  {}  {}", "Notes:      ".dimmed(), paths.notes.display());
    println!("  {}  {}", "History:    ".dimmed(), paths.history.display());

    println!();
    println!("{}", "Settings:".bold());
    for key in CONFIG_KEYS {
        match config.get(key)? {
            Some(value) => println!("  {} {} = {}", "✓".green(), key, value),
            None => println!("  {} {} (default)", "○".dimmed(), key),
        }
    }

    Ok(())
}

fn get_config(key: &str) -> Result<()> {
    let config = Config::load()?;
    match config.get(key)? {
        Some(value) => println!("{value}"),
        None => println!("{}", format!("Config key '{key}' is not set").yellow()),
    }
    Ok(())
}

fn set_config(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;
    println!("{} {} = {}", "Set".green(), key, value);
    Ok(())
}

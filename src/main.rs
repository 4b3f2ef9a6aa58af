use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deskmate_cli::config::Config;

mod cli;

use cli::commands::{self, AssistantCommand};
use cli::context::Context;

/// The main CLI command line interface.
#[derive(Parser)]
#[command(name = "deskmate")]
#[command(version)]
#[command(about = "A local personal-assistant shell: notes, calculator and everyday utilities")]
#[command(long_about = "Deskmate is a small text-driven assistant. Run it without a command\n\
    to start the interactive shell, or pass a command to run it once.\n\n\
    Notes and calculation history are stored as plain text under\n\
    ~/.deskmate/data unless configured otherwise.")]
#[command(after_help = "EXAMPLES:\n    \
    deskmate                         Start the interactive shell\n    \
    deskmate note add \"Call mom\"     Add a note\n    \
    deskmate note show               List notes\n    \
    deskmate calc 2+3*4              Evaluate an expression\n    \
    deskmate convert temp 100 C F    Convert units\n\n\
    For more information about a command, run 'deskmate <command> --help'.")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory for the note and history files
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Start the interactive shell (the default)
    Shell,

    /// View and manage configuration settings
    #[command(long_about = "Provides subcommands to show, get, and set configuration values.\n\
        Configuration is stored in ~/.deskmate/config.yaml.")]
    Config(commands::config::Args),

    /// Generate shell completion scripts
    Completions(commands::completions::Args),

    #[command(flatten)]
    Assistant(AssistantCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "deskmate=debug,deskmate_cli=debug"
    } else {
        "deskmate=info,deskmate_cli=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Some(Commands::Config(args)) => commands::config::run(args, cli.data_dir.as_deref()),
        Some(Commands::Completions(args)) => {
            commands::completions::generate_completions(
                &mut Cli::command(),
                args.shell,
                &mut std::io::stdout(),
            );
            Ok(())
        }
        Some(Commands::Shell) | None => {
            let ctx = build_context(cli.data_dir, true)?;
            cli::shell::run(&ctx)
        }
        Some(Commands::Assistant(command)) => {
            let ctx = build_context(cli.data_dir, false)?;
            commands::dispatch(command, &ctx)
        }
    }
}

fn build_context(data_dir: Option<PathBuf>, interactive: bool) -> Result<Context> {
    let config = Config::load()?;
    let paths = config.data_paths(data_dir.as_deref())?;
    Ok(Context::new(config, paths, interactive))
}

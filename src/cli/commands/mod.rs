//! CLI commands for Deskmate.
//!
//! Each submodule implements a single command with its argument parsing
//! and execution logic. [`AssistantCommand`] is the grammar shared by
//! one-shot invocations and the interactive shell.

use anyhow::Result;
use clap::Subcommand;

use super::context::Context;

/// Calculator.
pub mod calc;

/// Shell completion scripts.
pub mod completions;

/// Configuration viewing and management.
pub mod config;

/// Unit conversion.
pub mod convert;

/// Base64 encoding and decoding.
pub mod encode;

/// Glob file search.
pub mod find;

/// Calculation history.
pub mod history;

/// Jokes, quotes and passwords.
pub mod misc;

/// Timestamped notes.
pub mod note;

/// Opening files and URLs.
pub mod open;

/// Background reminders.
pub mod remind;

/// Host, battery and network information.
pub mod sysinfo;

/// Commands available both from the command line and inside the shell.
#[derive(Subcommand)]
pub enum AssistantCommand {
    /// Add, list, search, edit and delete timestamped notes
    #[command(long_about = "Manages notes stored one per line as '[YYYY-MM-DD HH:MM:SS] text'.\n\
        Notes are addressed by their position in 'note show'. Positions\n\
        are renumbered after every delete, so list again before reusing one.")]
    Note(note::Args),

    /// Evaluate an arithmetic expression
    #[command(long_about = "Evaluates numbers, parentheses, the constant 'pi' and the operators\n\
        + - * / // % **. Each result is recorded in the calculation history,\n\
        which keeps the 10 most recent entries.")]
    Calc(calc::Args),

    /// Show or clear the calculation history
    History(history::Args),

    /// Convert between units of length, weight or temperature
    Convert(convert::Args),

    /// Show the current date and time
    Time,

    /// Open a file, folder or URL with the default application
    Open(open::Args),

    /// Show platform, CPU, memory and disk usage
    Sysinfo(sysinfo::Args),

    /// Show battery charge and status
    Battery(sysinfo::Args),

    /// Show the local IP address and default gateway
    Network(sysinfo::Args),

    /// Generate a random password
    Password(misc::PasswordArgs),

    /// Base64-encode text
    Encode(encode::EncodeArgs),

    /// Decode base64 text
    Decode(encode::DecodeArgs),

    /// List files matching a glob pattern
    Find(find::Args),

    /// Tell a programming joke
    Joke,

    /// Fetch a random programming quote
    Quote,

    /// Print a reminder after a delay
    #[command(long_about = "Schedules a reminder that is printed after the given number of\n\
        seconds. Inside the shell the reminder runs in the background;\n\
        from the command line the command waits for it.")]
    Remind(remind::Args),

    /// Clear the terminal screen
    Clear,
}

/// Runs one assistant command.
pub fn dispatch(command: AssistantCommand, ctx: &Context) -> Result<()> {
    match command {
        AssistantCommand::Note(args) => note::run(args, ctx),
        AssistantCommand::Calc(args) => calc::run(args, ctx),
        AssistantCommand::History(args) => history::run(args, ctx),
        AssistantCommand::Convert(args) => convert::run(args),
        AssistantCommand::Time => {
            println!("{}", deskmate_cli::system::now_string());
            Ok(())
        }
        AssistantCommand::Open(args) => open::run(args),
        AssistantCommand::Sysinfo(args) => sysinfo::run(args),
        AssistantCommand::Battery(args) => sysinfo::battery(args),
        AssistantCommand::Network(args) => sysinfo::network(args),
        AssistantCommand::Password(args) => misc::password(args, ctx),
        AssistantCommand::Encode(args) => encode::run_encode(args),
        AssistantCommand::Decode(args) => encode::run_decode(args),
        AssistantCommand::Find(args) => find::run(args),
        AssistantCommand::Joke => misc::joke(),
        AssistantCommand::Quote => misc::quote(),
        AssistantCommand::Remind(args) => remind::run(args, ctx),
        AssistantCommand::Clear => misc::clear(),
    }
}

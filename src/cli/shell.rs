//! Interactive shell.
//!
//! Reads one line at a time, splits it into words and parses the words
//! with the same clap grammar the one-shot CLI uses. A command runs to
//! completion before the next line is read. Errors are reported and the
//! loop carries on; only `exit`, `quit`, end of input or Ctrl-C leave it.

use std::io::{self, BufRead, Write};

use anyhow::{Context as _, Result};
use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;

use super::commands::{self, AssistantCommand};
use super::context::Context;

const PROMPT: &str = ">> ";

/// A single line typed at the prompt.
#[derive(Parser)]
#[command(name = "deskmate")]
#[command(no_binary_name = true)]
#[command(disable_version_flag = true)]
#[command(override_usage = "<COMMAND> [ARGS]...")]
#[command(help_template = "Available commands:\n{subcommands}\n\n\
    Type '<command> --help' for details, 'exit' or 'quit' to leave.")]
struct ShellLine {
    #[command(subcommand)]
    command: AssistantCommand,
}

/// What the loop should do after a line.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

/// Runs the read-eval-print loop until the user leaves.
pub fn run(ctx: &Context) -> Result<()> {
    println!(
        "{} {}",
        "Deskmate".bold().cyan(),
        "ready. Type 'help' for commands.".dimmed()
    );
    println!(
        "{}",
        format!("Data directory: {}", ctx.paths.data_dir.display()).dimmed()
    );
    if let Err(e) = ctx.reminders.exit_on_ctrl_c() {
        tracing::warn!("Ctrl-C handler not installed: {:#}", e);
    }

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("{PROMPT}");
        io::stdout().flush()?;

        line.clear();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            println!("\nExiting.");
            break;
        }

        if handle_line(&line, ctx) == Outcome::Exit {
            println!("Goodbye.");
            break;
        }
    }

    let pending = ctx.reminders.pending();
    if pending > 0 {
        println!(
            "{}",
            format!("{pending} pending reminder(s) cancelled.").dimmed()
        );
    }
    Ok(())
}

/// Parses and runs one input line.
pub fn handle_line(line: &str, ctx: &Context) -> Outcome {
    let words = match split_words(line) {
        Ok(words) => words,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            return Outcome::Continue;
        }
    };

    let words = normalize_command(words);
    match words.first().map(String::as_str) {
        None => return Outcome::Continue,
        Some("exit" | "quit") => return Outcome::Exit,
        Some(_) => {}
    }

    match ShellLine::try_parse_from(words) {
        Ok(parsed) => {
            if let Err(e) = commands::dispatch(parsed.command, ctx) {
                eprintln!("{} {:#}", "Error:".red(), e);
            }
        }
        Err(e) if e.kind() == ErrorKind::InvalidSubcommand => {
            println!("Unknown command. Type 'help' to see available commands.");
        }
        Err(e) => {
            let _ = e.print();
        }
    }
    Outcome::Continue
}

/// Lowercases the command word, and the subcommand word after `note`.
fn normalize_command(mut words: Vec<String>) -> Vec<String> {
    if let Some(first) = words.first_mut() {
        *first = first.to_lowercase();
    }
    if words.first().map(String::as_str) == Some("note") {
        if let Some(sub) = words.get_mut(1) {
            *sub = sub.to_lowercase();
        }
    }
    words
}

/// Splits a line into words.
///
/// Whitespace separates words; single or double quotes group text
/// (quotes themselves are removed, `""` yields an empty word).
/// Backslashes are literal so Windows paths survive unchanged.
pub fn split_words(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(format!("Unterminated {q} quote"));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

//! Small one-line commands: password, joke, quote and clear.

use std::io::{self, Write};

use anyhow::Result;

use deskmate_cli::system::{fun, text};

use crate::cli::context::Context;

/// Arguments for the password command.
#[derive(clap::Args)]
pub struct PasswordArgs {
    /// Number of characters (defaults to the configured length, 12)
    pub length: Option<usize>,
}

/// Prints a random password.
pub fn password(args: PasswordArgs, ctx: &Context) -> Result<()> {
    let length = args.length.unwrap_or_else(|| ctx.config.password_length());
    let password = text::generate_password(&mut rand::thread_rng(), length)?;
    println!("{password}");
    Ok(())
}

pub fn joke() -> Result<()> {
    println!("{}", fun::random_joke(&mut rand::thread_rng()));
    Ok(())
}

pub fn quote() -> Result<()> {
    println!("{}", fun::fetch_quote());
    Ok(())
}

/// Clears the terminal with ANSI escapes.
pub fn clear() -> Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "\x1B[2J\x1B[1;1H")?;
    stdout.flush()?;
    Ok(())
}

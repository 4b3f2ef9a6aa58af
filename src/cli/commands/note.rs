//! Note command - manage timestamped notes.
//!
//! Notes are addressed by position. A position is only valid until the
//! next delete, so every mutating subcommand echoes the note it touched.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use deskmate_cli::storage::{LineStore, Note};

use crate::cli::context::Context;
use crate::cli::format::OutputFormat;

/// Arguments for the note command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    note add \"Buy milk\"          Add a note\n    \
    note show                    List notes with their positions\n    \
    note search milk             Find notes containing 'milk'\n    \
    note edit 2 Buy oat milk     Replace the text of note 2\n    \
    note delete 2                Delete note 2\n    \
    note delete-matching milk    Delete every note containing 'milk'")]
pub struct Args {
    #[command(subcommand)]
    pub command: NoteCommand,
}

#[derive(Subcommand)]
pub enum NoteCommand {
    /// Add a timestamped note
    Add {
        /// Note text; surrounding quotes are removed
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// List all notes with their positions
    #[command(visible_alias = "list")]
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Find notes containing a keyword (case-insensitive)
    Search {
        /// Text to look for, timestamp included
        keyword: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Delete the note at a position
    Delete {
        /// Position shown by 'note show'
        #[arg(value_name = "INDEX")]
        index: usize,
    },

    /// Delete every note containing a keyword (case-insensitive)
    DeleteMatching {
        /// Text to look for, timestamp included
        keyword: String,
    },

    /// Replace the text of a note, keeping its timestamp
    Edit {
        /// Position shown by 'note show'
        #[arg(value_name = "INDEX")]
        index: usize,

        /// New note text
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
}

/// Executes the note command.
pub fn run(args: Args, ctx: &Context) -> Result<()> {
    match args.command {
        NoteCommand::Add { text } => add(ctx, &text.join(" ")),
        NoteCommand::Show { format } => show(ctx, format),
        NoteCommand::Search { keyword, format } => search(ctx, &keyword, format),
        NoteCommand::Delete { index } => delete(ctx, index),
        NoteCommand::DeleteMatching { keyword } => delete_matching(ctx, &keyword),
        NoteCommand::Edit { index, text } => edit(ctx, index, &text.join(" ")),
    }
}

fn add(ctx: &Context, text: &str) -> Result<()> {
    let note = ctx.notes.add(text)?;
    println!(
        "{} {} {}",
        "Note added".green(),
        format!("#{}", note.position).cyan(),
        format!("to {}", ctx.notes.store().location()).dimmed()
    );
    Ok(())
}

fn show(ctx: &Context, format: OutputFormat) -> Result<()> {
    let notes = ctx.notes.list_all()?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
        return Ok(());
    }

    if notes.is_empty() {
        println!(
            "{}",
            format!("No notes found in {}", ctx.notes.store().location()).dimmed()
        );
        return Ok(());
    }

    println!("{}", "Your notes:".bold());
    println!("{}", "-".repeat(40).dimmed());
    for note in &notes {
        println!("{}", render_note(note));
    }
    println!("{}", "-".repeat(40).dimmed());
    Ok(())
}

fn render_note(note: &Note) -> String {
    match &note.timestamp {
        Some(ts) => format!(
            "  {:>3}. {} {}",
            note.position.to_string().cyan(),
            format!("[{ts}]").dimmed(),
            note.text
        ),
        None => format!("  {:>3}. {}", note.position.to_string().cyan(), note.text),
    }
}

fn search(ctx: &Context, keyword: &str, format: OutputFormat) -> Result<()> {
    let hits = ctx.notes.search(keyword)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    if hits.is_empty() {
        println!("{}", format!("No notes match '{keyword}'").dimmed());
        return Ok(());
    }

    println!(
        "{}",
        format!("{} note(s) match '{keyword}':", hits.len()).bold()
    );
    for hit in &hits {
        println!("  {:>3}. {}", hit.position.to_string().cyan(), hit.line);
    }
    Ok(())
}

fn delete(ctx: &Context, index: usize) -> Result<()> {
    let removed = ctx.notes.delete_by_index(index)?;
    println!("{} {}", "Deleted:".green(), removed.to_line());
    Ok(())
}

fn delete_matching(ctx: &Context, keyword: &str) -> Result<()> {
    let count = ctx.notes.delete_by_keyword(keyword)?;
    if count == 0 {
        println!("{}", format!("No notes match '{keyword}'").dimmed());
    } else {
        println!(
            "{}",
            format!("Deleted {count} note(s) containing '{keyword}'").green()
        );
    }
    Ok(())
}

fn edit(ctx: &Context, index: usize, text: &str) -> Result<()> {
    let old = ctx.notes.edit_by_index(index, text)?;
    let new = ctx.notes.get(index)?;
    println!("{} {}", "Was:".dimmed(), old);
    println!("{} {}", "Now:".green(), new.to_line());
    Ok(())
}

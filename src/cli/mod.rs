//! Command-line interface for Deskmate.
//!
//! The same set of assistant commands is reachable two ways: as one-shot
//! subcommands (`deskmate note show`) and as lines typed into the
//! interactive shell (`>> note show`).

/// Individual CLI command implementations.
pub mod commands;

/// Shared state handed to every command.
pub mod context;

/// Output formatting helpers.
pub mod format;

/// Background reminder timers.
pub mod reminders;

/// The interactive read-eval-print loop.
pub mod shell;

//! Completions command - print a tab-completion script.
//!
//! Completion covers the one-shot form (`deskmate note add ...`); inside
//! the interactive shell, `help` and `<command> --help` list the same
//! commands.

use std::io::Write;

use clap::Command;
use clap_complete::{generate, Shell};

/// Arguments for the completions command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    deskmate completions bash >> ~/.bashrc.d/deskmate.bash\n    \
    deskmate completions zsh > \"${fpath[1]}/_deskmate\"\n    \
    deskmate completions fish | source")]
pub struct Args {
    /// Shell the script is written for
    #[arg(value_name = "SHELL", value_enum)]
    pub shell: Shell,
}

/// Writes the completion script for `cmd` to `out`, named after the
/// command itself.
pub fn generate_completions(cmd: &mut Command, shell: Shell, out: &mut dyn Write) {
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, out);
}

//! Completions command.
//!
//! Emits a completion script for `cici encrypt`, `cici decrypt --set <SET_NAME>`
//! and the global `--verbose`/`--debug` flags, in the selected shell's syntax.

use clap::CommandFactory;
use clap_complete::{generate, Shell as CompletionShell};

use crate::cli::{Cli, Shell};
use crate::error::Result;

/// Write the completion script for `shell` to stdout.
pub fn execute(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
    };

    generate(shell, &mut cmd, "cici", &mut std::io::stdout());
    Ok(())
}

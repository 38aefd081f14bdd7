//! Command-line interface.

pub mod completions;
pub mod decrypt;
pub mod encrypt;
pub mod output;
pub mod prompt;

use clap::{Parser, Subcommand};

/// cici - keep CI secrets encrypted in source control.
#[derive(Parser)]
#[command(
    name = "cici",
    about = "Keep your CI secrets encrypted in source control",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Debug output (also turns on verbose)
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Pack and encrypt all configured secrets
    Encrypt,

    /// Decrypt the archive and copy a set's secrets into place
    Decrypt {
        /// Set to restore (default set when omitted)
        #[arg(long, value_name = "SET_NAME")]
        set: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub fn execute(command: Command) -> crate::error::Result<()> {
    use Command::*;

    match command {
        Encrypt => encrypt::execute(),
        Decrypt { set } => decrypt::execute(set.as_deref()),
        Completions { shell } => completions::execute(shell),
    }
}

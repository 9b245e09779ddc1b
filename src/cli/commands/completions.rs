//! `pwdvault completions` — generate shell completion scripts.
//!
//! Usage:
//!   pwdvault completions bash > ~/.bash_completion.d/pwdvault
//!   pwdvault completions zsh
//!   pwdvault completions fish
//!   pwdvault completions powershell

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::Result;

/// Execute the `completions` command.
pub fn execute(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "pwdvault", &mut io::stdout());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Commands;
    use clap::Parser;

    fn parse_shell(name: &str) -> Option<Shell> {
        match Cli::try_parse_from(["pwdvault", "completions", name]).ok()?.command {
            Commands::Completions { shell } => Some(shell),
            _ => None,
        }
    }

    #[test]
    fn known_shells_parse() {
        assert_eq!(parse_shell("bash"), Some(Shell::Bash));
        assert_eq!(parse_shell("zsh"), Some(Shell::Zsh));
        assert_eq!(parse_shell("fish"), Some(Shell::Fish));
        assert_eq!(parse_shell("powershell"), Some(Shell::PowerShell));
    }

    #[test]
    fn unknown_shell_is_rejected() {
        assert_eq!(parse_shell("csh"), None);
        assert_eq!(parse_shell(""), None);
    }
}

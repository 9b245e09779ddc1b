//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_complete::Shell;

use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{PwdVaultError, Result};
use crate::vault::VaultRepository;

/// pwdvault CLI: local password vault and generator.
#[derive(Parser)]
#[command(
    name = "pwdvault",
    about = "Local password vault and generator",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (default: vault_dir from .pwdvault.toml, else .pwdvault)
    #[arg(long, global = true)]
    pub vault_dir: Option<String>,

    /// Print debug logs to stderr (RUST_LOG overrides the filter)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Store a new password under a name
    New {
        /// Entry name
        name: String,
        /// Replace an existing entry without asking
        #[arg(long)]
        overwrite: bool,
    },

    /// Decode and show a stored password
    Read {
        /// Entry name
        name: String,
    },

    /// List all stored passwords
    List {
        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a random password
    Generate {
        /// Total length (default from config: 12)
        #[arg(short, long)]
        length: Option<usize>,

        /// Minimum number of letters
        #[arg(long)]
        letters_min: Option<usize>,
        /// Maximum number of letters
        #[arg(long)]
        letters_max: Option<usize>,

        /// Minimum number of digits
        #[arg(long)]
        digits_min: Option<usize>,
        /// Maximum number of digits
        #[arg(long)]
        digits_max: Option<usize>,

        /// Minimum number of symbols
        #[arg(long)]
        symbols_min: Option<usize>,
        /// Maximum number of symbols
        #[arg(long)]
        symbols_max: Option<usize>,

        /// Store the generated password under this name
        #[arg(long)]
        store: Option<String>,
    },

    /// Rename a stored password
    Rename {
        /// Current name
        old: String,
        /// New name
        new: String,
    },

    /// Delete a stored password
    Delete {
        /// Entry name
        name: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Import .pwd files into the vault
    Import {
        /// Files to import
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// What to do with files that collide with stored entries
        #[arg(long, value_enum, default_value_t = OverwriteMode::Ask)]
        overwrite: OverwriteMode,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export stored passwords to <DESTINATION>/passwords/
    Export {
        /// Destination directory
        destination: PathBuf,

        /// Export only this entry
        #[arg(long)]
        name: Option<String>,

        /// What to do with files that already exist at the destination
        #[arg(long, value_enum, default_value_t = OverwriteMode::Ask)]
        overwrite: OverwriteMode,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the summary of the last import or export again
    Last,

    /// View the audit log of vault operations
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 2w, 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// How an import or export settles collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OverwriteMode {
    /// Ask which ones to overwrite
    Ask,
    /// Overwrite all of them
    All,
    /// Keep all existing files
    None,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load `.pwdvault.toml` from the working directory.
pub fn load_settings() -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    Settings::load(&cwd)
}

/// Resolve the storage root from the CLI arguments and settings.
///
/// Example: `<cwd>/.pwdvault`
pub fn vault_root(cli: &Cli, settings: &Settings) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(settings.vault_root(&cwd, cli.vault_dir.as_deref()))
}

/// Open the repository at the resolved storage root.
pub fn open_repo(cli: &Cli, settings: &Settings) -> Result<VaultRepository> {
    VaultRepository::open(&vault_root(cli, settings)?)
}

/// Whether prompts can be shown (stdin is a terminal).
pub fn interactive() -> bool {
    io::stdin().is_terminal()
}

/// Prompt for a password, masked unless `show` is set.
///
/// When stdin is piped, the next input line is taken instead.
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_secret(prompt: &str, show: bool) -> Result<Zeroizing<String>> {
    if !interactive() {
        let mut line = Zeroizing::new(String::new());
        io::stdin().lock().read_line(&mut line)?;
        let len = line.trim_end_matches(&['\n', '\r'][..]).len();
        line.truncate(len);
        return Ok(line);
    }

    let value = if show {
        dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
    } else {
        dialoguer::Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
    }
    .map_err(|e| PwdVaultError::CommandFailed(format!("password prompt: {e}")))?;

    Ok(Zeroizing::new(value))
}

/// Prompt for a password and, when `confirm_twice` is set and a terminal
/// is attached, for its confirmation.
pub fn prompt_secret_pair(
    prompt: &str,
    confirm_prompt: &str,
    show: bool,
    confirm_twice: bool,
) -> Result<(Zeroizing<String>, Option<Zeroizing<String>>)> {
    let value = prompt_secret(prompt, show)?;
    let confirmation = if confirm_twice && interactive() {
        Some(prompt_secret(confirm_prompt, show)?)
    } else {
        None
    };
    Ok((value, confirmation))
}

/// Ask a yes/no question, defaulting to "no". Esc aborts the command.
pub fn confirm(prompt: &str) -> Result<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact_opt()
        .map_err(|e| PwdVaultError::CommandFailed(format!("confirm prompt: {e}")))?
        .ok_or(PwdVaultError::UserCancelled)
}

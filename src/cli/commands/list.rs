//! `pwdvault list` — display all stored passwords in a table.

use crate::cli::output;
use crate::cli::{load_settings, open_repo, Cli};
use crate::errors::{PwdVaultError, Result};

/// Execute the `list` command.
pub fn execute(cli: &Cli, json: bool) -> Result<()> {
    let settings = load_settings()?;
    let repo = open_repo(cli, &settings)?;
    let listing = repo.list();

    if json {
        let body = serde_json::json!({
            "vault": repo.root().display().to_string(),
            "entries": listing.names(),
        });
        let text = serde_json::to_string_pretty(&body)
            .map_err(|e| PwdVaultError::CommandFailed(format!("JSON output: {e}")))?;
        println!("{text}");
        return Ok(());
    }

    output::info(&format!(
        "{} — {} password(s)",
        repo.root().display(),
        repo.entry_count()
    ));
    output::print_entries_table(&listing);

    Ok(())
}

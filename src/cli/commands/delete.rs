//! `pwdvault delete` — remove a stored password.

use crate::audit::log_audit;
use crate::cli::output;
use crate::cli::{confirm, load_settings, open_repo, Cli};
use crate::errors::{PwdVaultError, Result};
use crate::vault::entry::normalize_name;

/// Execute the `delete` command.
pub fn execute(cli: &Cli, name: &str, force: bool) -> Result<()> {
    let settings = load_settings()?;
    let mut repo = open_repo(cli, &settings)?;

    let name = normalize_name(name)?;
    let Some(stored) = repo.find_on_disk(&name)? else {
        return Err(PwdVaultError::NotFound(name));
    };

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = confirm(&format!("Delete password '{stored}'?"))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    repo.delete(&stored)?;

    log_audit(repo.root(), "delete", Some(&stored), None);
    output::success(&format!(
        "Deleted password '{stored}' ({} left)",
        repo.entry_count()
    ));

    Ok(())
}

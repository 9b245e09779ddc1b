//! `pwdvault rename` — give a stored password a new name.

use crate::audit::log_audit;
use crate::cli::output;
use crate::cli::{load_settings, open_repo, Cli};
use crate::errors::Result;

/// Execute the `rename` command.
pub fn execute(cli: &Cli, old: &str, new: &str) -> Result<()> {
    let settings = load_settings()?;
    let mut repo = open_repo(cli, &settings)?;

    let stored = repo.rename(old, new)?;

    log_audit(repo.root(), "rename", Some(&stored), Some(&format!("from '{old}'")));
    output::success(&format!("Renamed '{old}' to '{stored}'"));

    Ok(())
}

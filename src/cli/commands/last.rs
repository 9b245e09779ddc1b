//! `pwdvault last` — show the summary of the latest import or export again.

use crate::audit::AuditLog;
use crate::cli::output;
use crate::cli::{load_settings, vault_root, Cli};
use crate::errors::{PwdVaultError, Result};

/// Execute the `last` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings()?;
    let vault_dir = vault_root(cli, &settings)?;

    if !vault_dir.is_dir() {
        output::info("No import or export has run yet.");
        return Ok(());
    }

    let audit = AuditLog::open(&vault_dir)
        .ok_or_else(|| PwdVaultError::Audit("failed to open audit database".into()))?;

    match audit.last_message()? {
        Some(message) => {
            for line in message.lines() {
                output::info(line);
            }
        }
        None => output::info("No import or export has run yet."),
    }

    Ok(())
}

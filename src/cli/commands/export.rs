//! `pwdvault export` — copy stored passwords to `<destination>/passwords/`.
//!
//! Usage:
//!   pwdvault export /media/usb                         # every entry
//!   pwdvault export /media/usb --name bank             # a single entry
//!   pwdvault export /media/usb --overwrite all --json

use std::path::Path;

use crate::audit::log_audit;
use crate::cli::commands::import_cmd::{report, run_batch};
use crate::cli::output;
use crate::cli::{confirm, interactive, load_settings, open_repo, Cli, OverwriteMode};
use crate::errors::{PwdVaultError, Result};
use crate::transfer;
use crate::vault::VaultRepository;

/// Execute the `export` command.
pub fn execute(
    cli: &Cli,
    destination: &Path,
    name: Option<&str>,
    mode: OverwriteMode,
    json: bool,
) -> Result<()> {
    let settings = load_settings()?;
    let repo = open_repo(cli, &settings)?;

    if let Some(name) = name {
        return export_single(&repo, name, destination, mode);
    }

    let batch = transfer::plan_export(&repo, destination)?;
    let outcome = run_batch(batch, mode)?;
    report(repo.root(), &outcome, json)
}

/// Export one entry, asking before an existing file is replaced.
fn export_single(
    repo: &VaultRepository,
    name: &str,
    destination: &Path,
    mode: OverwriteMode,
) -> Result<()> {
    let exported = match transfer::export_one(repo, name, destination, mode == OverwriteMode::All) {
        Ok(exported) => exported,
        Err(PwdVaultError::Collision(stored)) => {
            let overwrite = match mode {
                OverwriteMode::All => true,
                OverwriteMode::None => false,
                OverwriteMode::Ask => {
                    interactive()
                        && confirm(&format!(
                            "'{stored}' was already exported there. Do you want to overwrite it?"
                        ))?
                }
            };
            if !overwrite {
                let summary = "Chose not to export 1 password(s).";
                log_audit(repo.root(), "export", Some(&stored), Some(summary));
                output::info(summary);
                return Ok(());
            }
            transfer::export_one(repo, name, destination, true)?
        }
        Err(e) => return Err(e),
    };

    let summary = "Successfully exported 1 password(s).";
    log_audit(repo.root(), "export", Some(&exported.name), Some(summary));
    output::success(&format!("{summary} ({})", exported.destination.display()));

    Ok(())
}

//! `pwdvault new` — store a password under a name.

use crate::audit::log_audit;
use crate::cli::output;
use crate::cli::{confirm, interactive, load_settings, open_repo, prompt_secret_pair, Cli};
use crate::crypto;
use crate::errors::{PwdVaultError, Result};
use crate::vault::{NewEntryRequest, VaultRepository};

/// Execute the `new` command.
pub fn execute(cli: &Cli, name: &str, overwrite: bool) -> Result<()> {
    let settings = load_settings()?;
    let mut repo = open_repo(cli, &settings)?;
    let show = settings.show_passwords;
    let twice = settings.confirm_passwords;

    let (secret, secret_confirmation) = prompt_secret_pair(
        &format!("Password for '{name}'"),
        "Confirm password",
        show,
        twice,
    )?;
    let (master, master_confirmation) =
        prompt_secret_pair("Master password", "Confirm master password", show, twice)?;

    let request = NewEntryRequest {
        name,
        secret: &secret,
        secret_confirmation: secret_confirmation.as_deref().map(String::as_str),
        master: &master,
        master_confirmation: master_confirmation.as_deref().map(String::as_str),
    };
    let name = request.validate()?;

    let ciphertext = crypto::encode(&secret, &master)?;
    if let Some(stored) = store_confirmed(&mut repo, &name, &ciphertext, overwrite)? {
        output::success(&format!(
            "Password '{stored}' stored ({} total)",
            repo.entry_count()
        ));
    }

    Ok(())
}

/// Store `ciphertext`, asking before an existing entry is replaced.
///
/// Returns the stored name, or `None` if the user kept the existing entry.
pub(crate) fn store_confirmed(
    repo: &mut VaultRepository,
    name: &str,
    ciphertext: &str,
    overwrite: bool,
) -> Result<Option<String>> {
    let existed = repo.find_on_disk(name)?.is_some();
    let (stored, replaced) = match repo.create(name, ciphertext, overwrite) {
        Ok(stored) => (stored, existed),
        Err(PwdVaultError::Collision(existing)) => {
            if !interactive() {
                return Err(PwdVaultError::CommandFailed(format!(
                    "a password named '{existing}' already exists — pass --overwrite to replace it"
                )));
            }
            let question =
                format!("A password named '{existing}' already exists. Do you want to overwrite it?");
            if !confirm(&question)? {
                output::info("Kept the existing password.");
                return Ok(None);
            }
            (repo.create(name, ciphertext, true)?, true)
        }
        Err(e) => return Err(e),
    };

    let detail = if replaced { "overwritten" } else { "created" };
    log_audit(repo.root(), "new", Some(&stored), Some(detail));
    Ok(Some(stored))
}

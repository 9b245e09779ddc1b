//! `pwdvault import` — copy external `.pwd` files into the vault.
//!
//! Usage:
//!   pwdvault import ~/backup/*.pwd                    # ask about collisions
//!   pwdvault import a.pwd b.pwd --overwrite all
//!   pwdvault import old/*.pwd --overwrite none --json

use std::path::{Path, PathBuf};

use dialoguer::MultiSelect;

use crate::audit::log_audit;
use crate::cli::output;
use crate::cli::{interactive, load_settings, open_repo, Cli, OverwriteMode};
use crate::errors::{PwdVaultError, Result};
use crate::transfer::{self, BatchOutcome, BatchState, Resolution, TransferBatch};

/// Execute the `import` command.
pub fn execute(cli: &Cli, files: &[PathBuf], mode: OverwriteMode, json: bool) -> Result<()> {
    let settings = load_settings()?;
    let mut repo = open_repo(cli, &settings)?;

    let batch = transfer::plan_import(&repo, files)?;
    let outcome = run_batch(batch, mode)?;

    repo.note_added(outcome.copied_names());
    report(repo.root(), &outcome, json)
}

/// Copy the direct items, then settle collisions the way `mode` says.
pub(crate) fn run_batch(mut batch: TransferBatch, mode: OverwriteMode) -> Result<BatchOutcome> {
    batch.copy_direct()?;

    if batch.state() != BatchState::AwaitingResolution {
        return Ok(batch.outcome().clone());
    }

    let resolution = ask_resolution(&batch, mode)?;
    batch.apply_resolutions(resolution)
}

/// Turn the overwrite mode (and the user's picks, when asking) into a
/// resolution for the pending collisions.
fn ask_resolution(batch: &TransferBatch, mode: OverwriteMode) -> Result<Resolution> {
    match mode {
        OverwriteMode::All => return Ok(Resolution::AcceptAll),
        OverwriteMode::None => return Ok(Resolution::Cancel),
        OverwriteMode::Ask => {}
    }

    let count = batch.collisions().len();
    if !interactive() {
        output::warning(&format!(
            "{count} password(s) already exist and there is no terminal to ask — keeping them. Use --overwrite all to replace them."
        ));
        return Ok(Resolution::Cancel);
    }

    let names: Vec<&str> = batch
        .collisions()
        .iter()
        .map(|task| task.name.as_str())
        .collect();

    let chosen = MultiSelect::new()
        .with_prompt(format!(
            "{count} password(s) already exist. Select the ones to overwrite (Esc to keep all)"
        ))
        .items(&names)
        .interact_opt()
        .map_err(|e| PwdVaultError::CommandFailed(format!("selection prompt: {e}")))?;

    let Some(indices) = chosen else {
        return Ok(Resolution::Cancel);
    };

    let mut accepted = vec![false; count];
    for index in indices {
        if let Some(flag) = accepted.get_mut(index) {
            *flag = true;
        }
    }
    Ok(Resolution::PerItem(accepted))
}

/// Record the summary as the last message and print it.
pub(crate) fn report(vault_dir: &Path, outcome: &BatchOutcome, json: bool) -> Result<()> {
    let summary = outcome.summary();
    log_audit(vault_dir, outcome.direction().verb(), None, Some(&summary));

    if json {
        let text = serde_json::to_string_pretty(outcome)
            .map_err(|e| PwdVaultError::CommandFailed(format!("JSON output: {e}")))?;
        println!("{text}");
    } else {
        output::print_outcome(outcome);
    }

    Ok(())
}

//! Import/export of entry files between the storage root and the outside.
//!
//! Files are copied byte for byte; their (already obfuscated) content is
//! never inspected. Planning classifies every candidate as direct, collision,
//! unknown type or unusable, and the returned [`TransferBatch`] drives the
//! copies in two phases so the caller can ask about collisions in between.

pub mod batch;
pub mod outcome;

use std::collections::HashMap;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use crate::errors::{PwdVaultError, Result};
use crate::vault::entry::{self, file_name_for, name_from_file, normalize_name};
use crate::vault::VaultRepository;

pub use batch::{BatchState, Resolution, TransferBatch, TransferTask};
pub use outcome::{BatchOutcome, Direction};

/// Exports land in this subdirectory of the chosen destination.
pub const EXPORT_DIR_NAME: &str = "passwords";

/// Classify external files for import into `repo`.
///
/// - no file name at all: counted as failed
/// - name without the `.pwd` suffix: unknown type
/// - the stored entry's own file: skipped, there is nothing to copy
/// - name matching an entry (any letter case) or an earlier file of the
///   same batch: collision
/// - otherwise: direct
pub fn plan_import(repo: &VaultRepository, sources: &[PathBuf]) -> Result<TransferBatch> {
    let mut batch = TransferBatch::new(Direction::Import);
    let existing = repo.names_on_disk()?;
    // Lowercased name -> spelling of the first file planned under it.
    let mut planned: HashMap<String, String> = HashMap::new();

    for source in sources {
        let Some(file_name) = source.file_name().and_then(|n| n.to_str()) else {
            tracing::warn!(source = %source.display(), "Import source has no usable file name");
            batch.push_unusable();
            continue;
        };

        let Some(raw_name) = name_from_file(file_name) else {
            tracing::debug!(file = file_name, "Skipping file with unknown type");
            batch.push_unknown();
            continue;
        };

        let name = match normalize_name(raw_name) {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!(file = file_name, error = %e, "Import source has an invalid name");
                batch.push_unusable();
                continue;
            }
        };

        let matching = existing
            .iter()
            .find(|stored| entry::same_name(stored, &name))
            .or_else(|| planned.get(&name.to_lowercase()))
            .cloned();

        match matching {
            Some(stored) if same_file(source, &repo.entry_path(&stored)) => {
                tracing::debug!(name = %stored, "Import source is the stored entry itself");
                batch.push_unchanged();
            }
            Some(stored) => batch.push_collision(TransferTask {
                source: source.clone(),
                destination: repo.entry_path(&stored),
                name: stored,
            }),
            None => {
                planned.insert(name.to_lowercase(), name.clone());
                batch.push_direct(TransferTask {
                    source: source.clone(),
                    destination: repo.entry_path(&name),
                    name,
                });
            }
        }
    }

    tracing::debug!(
        direct = batch.direct_tasks().len(),
        collisions = batch.collisions().len(),
        unknown = batch.outcome().unknown_type(),
        "Planned import"
    );
    Ok(batch)
}

/// Classify every entry of `repo` for export under
/// `<destination_root>/passwords/`, creating that directory when missing.
pub fn plan_export(repo: &VaultRepository, destination_root: &Path) -> Result<TransferBatch> {
    let export_dir = prepare_export_dir(destination_root)?;
    let mut batch = TransferBatch::new(Direction::Export);

    let mut names = repo.names_on_disk()?;
    names.sort_by(|a, b| entry::cmp_names(a, b));

    for name in names {
        let task = TransferTask {
            source: repo.entry_path(&name),
            destination: export_dir.join(file_name_for(&name)),
            name,
        };
        if task.destination.exists() {
            batch.push_collision(task);
        } else {
            batch.push_direct(task);
        }
    }

    tracing::debug!(
        destination = %export_dir.display(),
        direct = batch.direct_tasks().len(),
        collisions = batch.collisions().len(),
        "Planned export"
    );
    Ok(batch)
}

/// Export a single entry to `<destination_root>/passwords/<name>.pwd`.
///
/// An existing destination file yields `Collision` unless `overwrite` is
/// set, so the caller can confirm and call again. The returned task carries
/// the stored spelling of the name.
pub fn export_one(
    repo: &VaultRepository,
    name: &str,
    destination_root: &Path,
    overwrite: bool,
) -> Result<TransferTask> {
    let name = normalize_name(name)?;
    let stored = repo
        .find_on_disk(&name)?
        .ok_or_else(|| PwdVaultError::NotFound(name.clone()))?;

    let export_dir = prepare_export_dir(destination_root)?;
    let destination = export_dir.join(file_name_for(&stored));
    if destination.exists() && !overwrite {
        return Err(PwdVaultError::Collision(stored));
    }

    let source = repo.entry_path(&stored);
    copy_file(&source, &destination)?;
    tracing::debug!(name = %stored, destination = %destination.display(), "Exported entry");
    Ok(TransferTask {
        source,
        destination,
        name: stored,
    })
}

/// Resolve (and create if needed) the export subdirectory.
pub fn prepare_export_dir(destination_root: &Path) -> Result<PathBuf> {
    let export_dir = destination_root.join(EXPORT_DIR_NAME);
    if export_dir.exists() && !export_dir.is_dir() {
        return Err(PwdVaultError::Validation(format!(
            "Can't export to {}: it's an existing file.",
            export_dir.display()
        )));
    }
    fs::create_dir_all(&export_dir)?;
    Ok(export_dir)
}

/// Copy one file through a temp file next to `destination`.
///
/// The destination is replaced by a rename only after the whole source was
/// read, so a failed copy leaves an existing destination untouched and
/// never leaves a partial file behind.
pub fn copy_file(source: &Path, destination: &Path) -> io::Result<u64> {
    let parent = destination.parent().unwrap_or_else(|| Path::new("."));
    let file_name = destination
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp_path = parent.join(format!(".{file_name}.tmp"));

    let result = copy_into(source, &tmp_path).and_then(|copied| {
        fs::rename(&tmp_path, destination)?;
        Ok(copied)
    });
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn copy_into(source: &Path, target: &Path) -> io::Result<u64> {
    let mut reader = File::open(source)?;
    let mut writer = File::create(target)?;
    let copied = io::copy(&mut reader, &mut writer)?;
    writer.sync_all()?;
    Ok(copied)
}

/// Whether `a` and `b` name the same existing file.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

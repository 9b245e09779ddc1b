//! File-backed vault operations used by CLI commands.
//!
//! `VaultRepository` owns one storage root directory. Every entry is a
//! `<name>.pwd` file whose content is the ciphertext on a single line. The
//! repository also keeps a cached list of entry names that is updated by
//! each mutating call and can be refreshed from disk at any time.

use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::errors::{PwdVaultError, Result};

use super::entry::{self, EntryListing, VaultEntry};

/// Handle on a storage root.  Create one with `VaultRepository::open`,
/// then use its methods to manage entries.
pub struct VaultRepository {
    /// Directory holding the `.pwd` files.
    root: PathBuf,

    /// Cached entry names. Best-effort: files can change behind our back.
    names: Vec<String>,
}

impl VaultRepository {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Open the storage root at `root`, creating the directory if needed,
    /// and load the current entry names.
    pub fn open(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)?;

        let mut repo = Self {
            root: root.to_path_buf(),
            names: Vec::new(),
        };
        repo.refresh()?;

        tracing::debug!(root = %root.display(), entries = repo.names.len(), "Opened vault");
        Ok(repo)
    }

    /// Re-read the entry names from disk, replacing the cache.
    pub fn refresh(&mut self) -> Result<()> {
        self.names = scan_names(&self.root)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Entry operations
    // ------------------------------------------------------------------

    /// The cached names, sorted case-insensitively, or the empty sentinel.
    pub fn list(&self) -> EntryListing {
        EntryListing::from_names(self.names.clone())
    }

    /// Store `ciphertext` under `name`.
    ///
    /// With `overwrite == false`, an existing entry with the same name (in
    /// any letter case) yields `Collision` so the caller can ask first and
    /// call again with `overwrite == true`. Overwriting keeps the stored
    /// spelling of the existing name.
    ///
    /// Returns the name the entry is stored under.
    pub fn create(&mut self, name: &str, ciphertext: &str, overwrite: bool) -> Result<String> {
        let name = entry::normalize_name(name)?;
        if ciphertext.contains(&['\n', '\r'][..]) {
            return Err(PwdVaultError::Validation(
                "stored passwords cannot contain line breaks".into(),
            ));
        }

        let stored_name = match self.find_on_disk(&name)? {
            Some(existing) if !overwrite => return Err(PwdVaultError::Collision(existing)),
            Some(existing) => existing,
            None => name,
        };

        write_atomic(&self.entry_path(&stored_name), ciphertext.as_bytes())?;
        self.remember(&stored_name);

        tracing::debug!(name = %stored_name, overwrite, "Stored entry");
        Ok(stored_name)
    }

    /// Load the ciphertext stored under `name`.
    ///
    /// A missing file is `NotFound` and drops the name from the cache.
    pub fn read(&mut self, name: &str) -> Result<VaultEntry> {
        let name = entry::normalize_name(name)?;
        let stored_name = self.resolve(&name)?;

        let file = match fs::File::open(self.entry_path(&stored_name)) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.forget(&stored_name);
                return Err(PwdVaultError::NotFound(stored_name));
            }
            Err(e) => return Err(e.into()),
        };

        // Only the first line carries the ciphertext.
        let mut line = String::new();
        BufReader::new(file).read_line(&mut line)?;
        let ciphertext = line.trim_end_matches(&['\n', '\r'][..]).to_string();

        Ok(VaultEntry {
            name: stored_name,
            ciphertext,
        })
    }

    /// Rename an entry. The content is moved untouched.
    ///
    /// Renaming onto a different existing entry is a `Collision`; changing
    /// only the letter case of the same entry is allowed.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> Result<String> {
        let old_name = entry::normalize_name(old_name)?;
        let new_name = entry::normalize_name(new_name)?;
        let stored_old = self.resolve(&old_name)?;

        if let Some(existing) = self.find_on_disk(&new_name)? {
            if existing != stored_old {
                return Err(PwdVaultError::Collision(existing));
            }
        }

        match fs::rename(self.entry_path(&stored_old), self.entry_path(&new_name)) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.forget(&stored_old);
                return Err(PwdVaultError::NotFound(stored_old));
            }
            Err(e) => return Err(e.into()),
        }

        self.forget(&stored_old);
        self.remember(&new_name);

        tracing::debug!(from = %stored_old, to = %new_name, "Renamed entry");
        Ok(new_name)
    }

    /// Delete an entry's file.
    pub fn delete(&mut self, name: &str) -> Result<()> {
        let name = entry::normalize_name(name)?;
        let stored_name = self.resolve(&name)?;

        match fs::remove_file(self.entry_path(&stored_name)) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.forget(&stored_name);
                return Err(PwdVaultError::NotFound(stored_name));
            }
            Err(e) => return Err(e.into()),
        }

        self.forget(&stored_name);
        tracing::debug!(name = %stored_name, "Deleted entry");
        Ok(())
    }

    /// Add names copied in from outside (e.g. by an import batch).
    pub fn note_added<S: AsRef<str>>(&mut self, names: &[S]) {
        for name in names {
            self.remember(name.as_ref());
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of cached entries.
    pub fn entry_count(&self) -> usize {
        self.names.len()
    }

    /// Returns the path of the file that stores `name`.
    pub fn entry_path(&self, name: &str) -> PathBuf {
        self.root.join(entry::file_name_for(name))
    }

    /// Entry names as currently present on disk, bypassing the cache.
    pub fn names_on_disk(&self) -> Result<Vec<String>> {
        scan_names(&self.root)
    }

    /// Stored spelling of an entry matching `name` in any letter case,
    /// looked up on disk rather than in the cache.
    pub fn find_on_disk(&self, name: &str) -> Result<Option<String>> {
        let names = scan_names(&self.root)?;
        if names.iter().any(|existing| existing == name) {
            return Ok(Some(name.to_string()));
        }
        Ok(names
            .into_iter()
            .find(|existing| entry::same_name(existing, name)))
    }

    // ------------------------------------------------------------------
    // Cache maintenance
    // ------------------------------------------------------------------

    /// Stored spelling of `name`, or `NotFound` (also dropping it from the cache).
    fn resolve(&mut self, name: &str) -> Result<String> {
        match self.find_on_disk(name)? {
            Some(stored) => Ok(stored),
            None => {
                self.forget(name);
                Err(PwdVaultError::NotFound(name.to_string()))
            }
        }
    }

    fn remember(&mut self, name: &str) {
        if !self.names.iter().any(|n| n == name) {
            self.names.push(name.to_string());
        }
    }

    fn forget(&mut self, name: &str) {
        self.names.retain(|n| !entry::same_name(n, name));
    }
}

/// Names of all `.pwd` files directly inside `root`.
fn scan_names(root: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for dir_entry in fs::read_dir(root)? {
        let dir_entry = dir_entry?;
        if !dir_entry.file_type()?.is_file() {
            continue;
        }
        let file_name = dir_entry.file_name();
        if let Some(name) = file_name.to_str().and_then(entry::name_from_file) {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

/// Write `contents` to `path` via a temp file in the same directory and a rename.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp_path = parent.join(format!(".{file_name}.tmp"));

    if let Err(e) = fs::write(&tmp_path, contents) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}

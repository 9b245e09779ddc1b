//! Entry types, name rules and the listing snapshot handed to the UI.

use std::cmp::Ordering;

use serde::Serialize;

use crate::errors::{PwdVaultError, Result};

/// File suffix of every entry in the storage root.
pub const ENTRY_SUFFIX: &str = ".pwd";

/// What an empty vault shows instead of a name. Never a valid entry name.
pub const NO_ENTRIES: &str = "<no passwords>";

/// One stored secret: its name and its obfuscated content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultEntry {
    pub name: String,
    pub ciphertext: String,
}

/// Snapshot of the entry names in a vault.
///
/// `Empty` is the sentinel state; it carries no name so nothing downstream
/// can mistake it for an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EntryListing {
    Empty,
    Names(Vec<String>),
}

impl EntryListing {
    /// Build a listing from unsorted names.
    pub fn from_names(mut names: Vec<String>) -> Self {
        if names.is_empty() {
            return EntryListing::Empty;
        }
        names.sort_by(|a, b| cmp_names(a, b));
        EntryListing::Names(names)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, EntryListing::Empty)
    }

    /// Real entry names, empty for the sentinel.
    pub fn names(&self) -> &[String] {
        match self {
            EntryListing::Empty => &[],
            EntryListing::Names(names) => names,
        }
    }

    /// Lines to display: the names, or the sentinel text.
    pub fn display_lines(&self) -> Vec<&str> {
        match self {
            EntryListing::Empty => vec![NO_ENTRIES],
            EntryListing::Names(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

/// Case-insensitive ordering, ties broken by the exact spelling.
pub fn cmp_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Case-insensitive name equality.
pub fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Strip one trailing `.pwd` and validate what remains.
///
/// Allowed: anything except an empty name, `.`/`..`, path separators, NUL,
/// line breaks, and the empty-vault sentinel.
pub fn normalize_name(raw: &str) -> Result<String> {
    let name = raw.strip_suffix(ENTRY_SUFFIX).unwrap_or(raw);

    if name.is_empty() {
        return Err(PwdVaultError::Validation("Empty filename!".into()));
    }
    if name == "." || name == ".." {
        return Err(PwdVaultError::Validation(format!(
            "'{name}' is not a valid password name"
        )));
    }
    if name
        .chars()
        .any(|c| c == '/' || c == '\\' || c == '\0' || c == '\n' || c == '\r')
    {
        return Err(PwdVaultError::Validation(format!(
            "password name '{name}' contains invalid characters — path separators and line breaks are not allowed"
        )));
    }
    if name == NO_ENTRIES {
        return Err(PwdVaultError::Validation(format!(
            "'{NO_ENTRIES}' is reserved and cannot be used as a password name"
        )));
    }

    Ok(name.to_string())
}

/// Entry name for a file name, if it carries the vault suffix.
pub fn name_from_file(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(ENTRY_SUFFIX)
        .filter(|name| !name.is_empty())
}

/// File name that stores the entry `name`.
pub fn file_name_for(name: &str) -> String {
    format!("{name}{ENTRY_SUFFIX}")
}

/// The fields a caller collects before storing a new entry.
#[derive(Debug, Clone, Default)]
pub struct NewEntryRequest<'a> {
    pub name: &'a str,
    pub secret: &'a str,
    pub secret_confirmation: Option<&'a str>,
    pub master: &'a str,
    pub master_confirmation: Option<&'a str>,
}

impl NewEntryRequest<'_> {
    /// Check required fields and, when present, the confirmations.
    ///
    /// Returns the normalized entry name.
    pub fn validate(&self) -> Result<String> {
        let name = normalize_name(self.name)?;

        let confirmations_empty = self.secret_confirmation.is_some_and(str::is_empty)
            || self.master_confirmation.is_some_and(str::is_empty);
        if self.secret.is_empty() || self.master.is_empty() || confirmations_empty {
            return Err(PwdVaultError::Validation("Empty password field!".into()));
        }

        let secret_mismatch = self.secret_confirmation.is_some_and(|c| c != self.secret);
        let master_mismatch = self.master_confirmation.is_some_and(|c| c != self.master);
        if secret_mismatch || master_mismatch {
            return Err(PwdVaultError::Validation("Passwords don't match!".into()));
        }

        Ok(name)
    }
}

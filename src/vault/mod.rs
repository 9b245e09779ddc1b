//! Vault module — name-addressed storage of obfuscated entries.
//!
//! This module provides:
//! - Entry types, name rules and the listing snapshot (`entry`)
//! - The file-backed `VaultRepository` (`store`)

pub mod entry;
pub mod store;

// Re-export the most commonly used items.
pub use entry::{EntryListing, NewEntryRequest, VaultEntry, ENTRY_SUFFIX, NO_ENTRIES};
pub use store::VaultRepository;

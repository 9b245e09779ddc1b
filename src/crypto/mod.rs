//! Obfuscation primitives for pwdvault.
//!
//! This module provides:
//! - The printable-range character shift used for every stored entry (`shift`)
//!
//! The shift is **obfuscation, not encryption**: it has no diffusion and is
//! trivially inverted under known plaintext. Its arithmetic is kept exactly as
//! is so that existing `.pwd` files stay readable.

pub mod shift;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encode, decode};
pub use shift::{decode, encode, ALPHABET_LEN, CHAR_HIGHEST, CHAR_LOWEST};

//! Keyed character shift over the 94 printable ASCII characters.
//!
//! Every character of the input is rotated inside the cyclic alphabet
//! `'!'..='~'` (code points 33 to 126) by the offset of the key character at
//! the same position, with the key repeated cyclically.
//!
//! # Preconditions
//!
//! Input characters are expected to lie in `'!'..='~'`. Anything else is not
//! validated; the output is still printable but will not round-trip.

use crate::errors::{PwdVaultError, Result};

/// Lowest printable code point in the alphabet (`'!'`).
pub const CHAR_LOWEST: u32 = 33;

/// Highest printable code point in the alphabet (`'~'`).
pub const CHAR_HIGHEST: u32 = 126;

/// Number of symbols in the alphabet.
pub const ALPHABET_LEN: i64 = (CHAR_HIGHEST - CHAR_LOWEST + 1) as i64;

/// Obfuscate `plaintext` with `key`.
///
/// `out[i] = wrap((in[i] - 33) + (key[i mod len] - 33), 94) + 33`
///
/// Returns a `Validation` error if `key` is empty.
pub fn encode(plaintext: &str, key: &str) -> Result<String> {
    apply(plaintext, key, |input, offset| input + offset)
}

/// Reveal `ciphertext` with `key`. Inverse of [`encode`] for the same key.
///
/// `out[i] = wrap((in[i] - 33) - (key[i mod len] - 33), 94) + 33`
///
/// A wrong key yields a different printable string, never an error.
pub fn decode(ciphertext: &str, key: &str) -> Result<String> {
    apply(ciphertext, key, |input, offset| input - offset)
}

fn apply(input: &str, key: &str, combine: impl Fn(i64, i64) -> i64) -> Result<String> {
    let key: Vec<char> = key.chars().collect();
    if key.is_empty() {
        return Err(PwdVaultError::Validation(
            "Empty password field! A master password is required.".into(),
        ));
    }

    Ok(input
        .chars()
        .zip(key.iter().cycle())
        .map(|(c, k)| {
            let shifted = combine(offset(c), offset(*k)).rem_euclid(ALPHABET_LEN);
            to_char(shifted)
        })
        .collect())
}

/// Position of `c` relative to the start of the alphabet.
fn offset(c: char) -> i64 {
    i64::from(u32::from(c)) - i64::from(CHAR_LOWEST)
}

/// Map an alphabet position in `0..94` back to its character.
fn to_char(position: i64) -> char {
    // `position` is already reduced into 0..94, so this stays in '!'..='~'.
    let code = u32::try_from(position).unwrap_or(0) + CHAR_LOWEST;
    char::from_u32(code).unwrap_or('!')
}

//! Integration tests for the keyed character shift.

use pwdvault::crypto::{decode, encode, CHAR_HIGHEST, CHAR_LOWEST};
use pwdvault::errors::PwdVaultError;

fn printable(s: &str) -> bool {
    s.chars()
        .all(|c| (CHAR_LOWEST..=CHAR_HIGHEST).contains(&u32::from(c)))
}

// ---------------------------------------------------------------------------
// Round trip
// ---------------------------------------------------------------------------

#[test]
fn secret_survives_encode_then_decode() {
    let encoded = encode("Secret!1", "key").unwrap();
    assert_ne!(encoded, "Secret!1");
    assert_eq!(decode(&encoded, "key").unwrap(), "Secret!1");
}

#[test]
fn round_trip_over_the_whole_alphabet() {
    let alphabet: String = (CHAR_LOWEST..=CHAR_HIGHEST)
        .filter_map(char::from_u32)
        .collect();

    for key in ["!", "~", "k3y", "correct-horse-battery-staple", "~~~~~~~~~~~~"] {
        let encoded = encode(&alphabet, key).unwrap();
        assert_eq!(decode(&encoded, key).unwrap(), alphabet, "key {key:?}");
    }
}

#[test]
fn key_longer_than_plaintext_round_trips() {
    let encoded = encode("ab", "a-much-longer-master-password").unwrap();
    assert_eq!(
        decode(&encoded, "a-much-longer-master-password").unwrap(),
        "ab"
    );
}

// ---------------------------------------------------------------------------
// Shape of the output
// ---------------------------------------------------------------------------

#[test]
fn output_keeps_length_and_charset() {
    let plaintext = "P@ssw0rd{with}[brackets]~";
    let encoded = encode(plaintext, "master").unwrap();

    assert_eq!(encoded.chars().count(), plaintext.chars().count());
    assert!(printable(&encoded));
    assert!(printable(&decode(&encoded, "master").unwrap()));
}

#[test]
fn repeating_a_key_changes_nothing() {
    let plaintext = "periodic-key-check";
    assert_eq!(
        encode(plaintext, "ab").unwrap(),
        encode(plaintext, "abab").unwrap()
    );
    assert_eq!(
        decode(plaintext, "xyz").unwrap(),
        decode(plaintext, "xyzxyzxyz").unwrap()
    );
}

#[test]
fn wrong_key_decodes_to_other_printable_text() {
    let encoded = encode("hunter22", "right").unwrap();
    let garbage = decode(&encoded, "wrong").unwrap();

    assert_ne!(garbage, "hunter22");
    assert_eq!(garbage.len(), "hunter22".len());
    assert!(printable(&garbage));
}

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

#[test]
fn empty_key_is_a_validation_error() {
    assert!(matches!(
        encode("anything", ""),
        Err(PwdVaultError::Validation(_))
    ));
    assert!(matches!(
        decode("anything", ""),
        Err(PwdVaultError::Validation(_))
    ));
}

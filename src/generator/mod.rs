//! Quota-driven random password generation.
//!
//! A password is built in three steps:
//! 1. decide how many letters, digits and symbols it contains (starting from
//!    each class minimum, then topping up random classes below their maximum),
//! 2. sample that many characters from each class,
//! 3. Fisher-Yates shuffle the result so the classes are not grouped.
//!
//! The default entry point [`generate`] draws from `rand`'s thread-local
//! generator. That is fine for producing passwords a human then stores, but
//! this module is not a vetted CSPRNG wrapper and should not be reused for
//! keys, nonces or tokens.

pub mod policy;

use rand::Rng;

use crate::errors::{PwdVaultError, Result};

pub use policy::{ClassQuota, GenerationPolicy};

/// The three character classes a policy can constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Letters,
    Digits,
    Symbols,
}

/// Symbol sub-ranges: 33-47, 58-64, 91-96, 123-126 (32 characters total).
const SYMBOL_RANGES: [(u8, u8); 4] = [(b'!', b'/'), (b':', b'@'), (b'[', b'`'), (b'{', b'~')];

impl CharClass {
    pub const ALL: [CharClass; 3] = [CharClass::Letters, CharClass::Digits, CharClass::Symbols];

    /// Number of distinct characters in the class.
    pub const fn size(self) -> u8 {
        match self {
            CharClass::Letters => 52,
            CharClass::Digits => 10,
            CharClass::Symbols => 32,
        }
    }

    /// Map an index in `0..size()` to its character.
    pub fn nth(self, index: u8) -> char {
        debug_assert!(index < self.size());
        match self {
            CharClass::Letters if index < 26 => char::from(b'A' + index),
            CharClass::Letters => char::from(b'a' + (index - 26)),
            CharClass::Digits => char::from(b'0' + index),
            CharClass::Symbols => {
                let mut rest = index;
                for (lo, hi) in SYMBOL_RANGES {
                    let width = hi - lo + 1;
                    if rest < width {
                        return char::from(lo + rest);
                    }
                    rest -= width;
                }
                '~'
            }
        }
    }

    /// Does `c` belong to this class?
    pub fn contains(self, c: char) -> bool {
        match self {
            CharClass::Letters => c.is_ascii_alphabetic(),
            CharClass::Digits => c.is_ascii_digit(),
            CharClass::Symbols => {
                c.is_ascii() && SYMBOL_RANGES.iter().any(|&(lo, hi)| (lo..=hi).contains(&(c as u8)))
            }
        }
    }

    /// Classify a character, if it is in any class.
    pub fn of(c: char) -> Option<CharClass> {
        Self::ALL.into_iter().find(|class| class.contains(c))
    }

    /// Draw one character uniformly from the whole class.
    fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> char {
        self.nth(rng.random_range(0..self.size()))
    }
}

/// Per-class character counts chosen for one password.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Composition {
    pub letters: usize,
    pub digits: usize,
    pub symbols: usize,
}

impl Composition {
    pub fn get(&self, class: CharClass) -> usize {
        match class {
            CharClass::Letters => self.letters,
            CharClass::Digits => self.digits,
            CharClass::Symbols => self.symbols,
        }
    }

    fn slot(&mut self, class: CharClass) -> &mut usize {
        match class {
            CharClass::Letters => &mut self.letters,
            CharClass::Digits => &mut self.digits,
            CharClass::Symbols => &mut self.symbols,
        }
    }

    /// Count the classes of an existing password.
    pub fn of(password: &str) -> Self {
        let mut counts = Self::default();
        for class in password.chars().filter_map(CharClass::of) {
            *counts.slot(class) += 1;
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.letters
            .saturating_add(self.digits)
            .saturating_add(self.symbols)
    }
}

/// Generate a password satisfying `policy` using the thread-local RNG.
pub fn generate(policy: &GenerationPolicy) -> Result<String> {
    generate_with_rng(policy, &mut rand::rng())
}

/// Generate a password satisfying `policy` from the given RNG.
///
/// Deterministic for a seeded RNG, which is what the tests rely on.
pub fn generate_with_rng<R: Rng + ?Sized>(policy: &GenerationPolicy, rng: &mut R) -> Result<String> {
    let counts = choose_composition(policy, rng)?;

    let mut chars: Vec<char> = Vec::with_capacity(counts.total());
    for class in CharClass::ALL {
        for _ in 0..counts.get(class) {
            chars.push(class.sample(rng));
        }
    }

    // Fisher-Yates, last index down to 1.
    for i in (1..chars.len()).rev() {
        let j = rng.random_range(0..=i);
        chars.swap(i, j);
    }

    tracing::debug!(
        length = chars.len(),
        letters = counts.letters,
        digits = counts.digits,
        symbols = counts.symbols,
        "Generated password"
    );

    Ok(chars.into_iter().collect())
}

/// Decide how many characters of each class the password gets.
pub fn choose_composition<R: Rng + ?Sized>(
    policy: &GenerationPolicy,
    rng: &mut R,
) -> Result<Composition> {
    policy.validate()?;

    let mut counts = Composition {
        letters: policy.letters.min,
        digits: policy.digits.min,
        symbols: policy.symbols.min,
    };

    let remaining = policy
        .total_length
        .checked_sub(counts.total())
        .ok_or_else(|| PwdVaultError::Policy("class minimums exceed the length".into()))?;

    for _ in 0..remaining {
        let eligible: Vec<CharClass> = CharClass::ALL
            .into_iter()
            .filter(|&class| counts.get(class) < quota(policy, class).max)
            .collect();

        if eligible.is_empty() {
            return Err(PwdVaultError::Policy(
                "every class reached its maximum before the length".into(),
            ));
        }

        let pick = eligible[rng.random_range(0..eligible.len())];
        *counts.slot(pick) += 1;
    }

    Ok(counts)
}

fn quota(policy: &GenerationPolicy, class: CharClass) -> ClassQuota {
    match class {
        CharClass::Letters => policy.letters,
        CharClass::Digits => policy.digits,
        CharClass::Symbols => policy.symbols,
    }
}

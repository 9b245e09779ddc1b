//! Generation policy: total length plus per-class quotas.

use serde::{Deserialize, Serialize};

use crate::errors::{PwdVaultError, Result};

/// Inclusive lower/upper bound on how many characters of one class appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassQuota {
    pub min: usize,
    pub max: usize,
}

impl ClassQuota {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// A quota that forbids the class entirely.
    pub const fn none() -> Self {
        Self { min: 0, max: 0 }
    }
}

/// What a generated password must look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationPolicy {
    /// Exact length of the generated password.
    pub total_length: usize,
    /// Letters (A-Z, a-z).
    pub letters: ClassQuota,
    /// Digits (0-9).
    pub digits: ClassQuota,
    /// Printable ASCII symbols.
    pub symbols: ClassQuota,
}

impl GenerationPolicy {
    /// Check that the quotas can produce exactly `total_length` characters.
    ///
    /// Every failure is a `Policy` error; the message names the first
    /// violated constraint but callers should not branch on it.
    pub fn validate(&self) -> Result<()> {
        for (label, quota) in self.quotas() {
            if quota.min > quota.max {
                return Err(PwdVaultError::Policy(format!(
                    "minimum {label} ({}) exceeds maximum ({})",
                    quota.min, quota.max
                )));
            }
        }

        let max_sum = self.max_sum();
        if self.total_length > 0 && max_sum == 0 {
            return Err(PwdVaultError::Policy(
                "every character class is disabled".into(),
            ));
        }
        if max_sum < self.total_length {
            return Err(PwdVaultError::Policy(format!(
                "length {} is unreachable, class maximums only allow {max_sum}",
                self.total_length
            )));
        }

        let min_sum = self
            .quotas()
            .iter()
            .try_fold(0usize, |acc, (_, q)| acc.checked_add(q.min))
            .ok_or_else(|| PwdVaultError::Policy("class minimums are too large to add up".into()))?;
        if min_sum > self.total_length {
            return Err(PwdVaultError::Policy(format!(
                "class minimums require {min_sum} characters but length is {}",
                self.total_length
            )));
        }

        Ok(())
    }

    fn quotas(&self) -> [(&'static str, ClassQuota); 3] {
        [
            ("letters", self.letters),
            ("digits", self.digits),
            ("symbols", self.symbols),
        ]
    }

    fn max_sum(&self) -> usize {
        self.quotas()
            .iter()
            .map(|(_, q)| q.max)
            .fold(0usize, usize::saturating_add)
    }
}

impl Default for GenerationPolicy {
    /// Length 12, every class allowed 0..=20 characters.
    fn default() -> Self {
        Self {
            total_length: 12,
            letters: ClassQuota::new(0, 20),
            digits: ClassQuota::new(0, 20),
            symbols: ClassQuota::new(0, 20),
        }
    }
}

//! `pwdvault generate` — produce a random password, optionally storing it.
//!
//! Usage:
//!   pwdvault generate                                  # config defaults
//!   pwdvault generate --length 16 --symbols-min 2
//!   pwdvault generate --digits-max 0 --store wifi      # generate and store

use zeroize::Zeroizing;

use crate::cli::commands::new::store_confirmed;
use crate::cli::output;
use crate::cli::{load_settings, open_repo, prompt_secret_pair, Cli};
use crate::crypto;
use crate::errors::Result;
use crate::generator::{self, ClassQuota, GenerationPolicy};
use crate::vault::NewEntryRequest;

/// Command-line values that replace the configured generator defaults.
#[derive(Debug, Clone, Default)]
pub struct PolicyOverrides {
    pub length: Option<usize>,
    pub letters_min: Option<usize>,
    pub letters_max: Option<usize>,
    pub digits_min: Option<usize>,
    pub digits_max: Option<usize>,
    pub symbols_min: Option<usize>,
    pub symbols_max: Option<usize>,
}

impl PolicyOverrides {
    /// Apply every given value on top of `base`.
    pub fn apply(&self, base: GenerationPolicy) -> GenerationPolicy {
        let quota = |q: ClassQuota, min: Option<usize>, max: Option<usize>| {
            ClassQuota::new(min.unwrap_or(q.min), max.unwrap_or(q.max))
        };

        GenerationPolicy {
            total_length: self.length.unwrap_or(base.total_length),
            letters: quota(base.letters, self.letters_min, self.letters_max),
            digits: quota(base.digits, self.digits_min, self.digits_max),
            symbols: quota(base.symbols, self.symbols_min, self.symbols_max),
        }
    }
}

/// Execute the `generate` command.
pub fn execute(cli: &Cli, overrides: &PolicyOverrides, store: Option<&str>) -> Result<()> {
    let settings = load_settings()?;
    let policy = overrides.apply(settings.generator.policy());

    let password = Zeroizing::new(generator::generate(&policy)?);

    let Some(name) = store else {
        println!("{}", password.as_str());
        return Ok(());
    };

    let mut repo = open_repo(cli, &settings)?;
    let (master, master_confirmation) = prompt_secret_pair(
        "Master password",
        "Confirm master password",
        settings.show_passwords,
        settings.confirm_passwords,
    )?;

    let request = NewEntryRequest {
        name,
        secret: &password,
        secret_confirmation: None,
        master: &master,
        master_confirmation: master_confirmation.as_deref().map(String::as_str),
    };
    let name = request.validate()?;

    let ciphertext = crypto::encode(&password, &master)?;
    if let Some(stored) = store_confirmed(&mut repo, &name, &ciphertext, false)? {
        output::success(&format!("Generated password stored as '{stored}'"));
        output::tip(&format!("Run `pwdvault read {stored}` to see it."));
    }

    Ok(())
}

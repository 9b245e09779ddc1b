//! `pwdvault read` — decode and print a stored password.

use zeroize::Zeroizing;

use crate::cli::{load_settings, open_repo, prompt_secret, Cli};
use crate::crypto;
use crate::errors::Result;

/// Execute the `read` command.
pub fn execute(cli: &Cli, name: &str) -> Result<()> {
    let settings = load_settings()?;
    let mut repo = open_repo(cli, &settings)?;

    // Fails with NotFound before asking anything if the file is gone.
    let entry = repo.read(name)?;

    let master = prompt_secret("Master password", settings.show_passwords)?;
    let plaintext = Zeroizing::new(crypto::decode(&entry.ciphertext, &master)?);

    // A wrong master password still decodes, just to the wrong text.
    println!("{}", plaintext.as_str());

    Ok(())
}

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{PwdVaultError, Result};
use crate::generator::{ClassQuota, GenerationPolicy};

/// Project-level configuration, loaded from `.pwdvault.toml`.
///
/// Every field has a sensible default so pwdvault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to the working directory) holding the `.pwd` files.
    #[serde(default = "default_vault_dir")]
    pub vault_dir: String,

    /// Ask for every password twice when storing a new entry.
    #[serde(default = "default_confirm_passwords")]
    pub confirm_passwords: bool,

    /// Echo passwords while they are typed.
    #[serde(default)]
    pub show_passwords: bool,

    /// Defaults for `pwdvault generate`.
    #[serde(default)]
    pub generator: GeneratorSettings,
}

/// The `[generator]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorSettings {
    #[serde(default = "default_length")]
    pub length: usize,
    #[serde(default)]
    pub letters_min: usize,
    #[serde(default = "default_class_max")]
    pub letters_max: usize,
    #[serde(default)]
    pub digits_min: usize,
    #[serde(default = "default_class_max")]
    pub digits_max: usize,
    #[serde(default)]
    pub symbols_min: usize,
    #[serde(default = "default_class_max")]
    pub symbols_max: usize,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_dir() -> String {
    ".pwdvault".to_string()
}

fn default_confirm_passwords() -> bool {
    true
}

fn default_length() -> usize {
    12
}

fn default_class_max() -> usize {
    20
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_dir: default_vault_dir(),
            confirm_passwords: default_confirm_passwords(),
            show_passwords: false,
            generator: GeneratorSettings::default(),
        }
    }
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            length: default_length(),
            letters_min: 0,
            letters_max: default_class_max(),
            digits_min: 0,
            digits_max: default_class_max(),
            symbols_min: 0,
            symbols_max: default_class_max(),
        }
    }
}

impl GeneratorSettings {
    /// The configured defaults as a generation policy.
    pub fn policy(&self) -> GenerationPolicy {
        GenerationPolicy {
            total_length: self.length,
            letters: ClassQuota::new(self.letters_min, self.letters_max),
            digits: ClassQuota::new(self.digits_min, self.digits_max),
            symbols: ClassQuota::new(self.symbols_min, self.symbols_max),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    const FILE_NAME: &'static str = ".pwdvault.toml";

    /// Load settings from `<project_dir>/.pwdvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PwdVaultError::Config(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Storage root for `project_dir`, honoring an explicit override.
    ///
    /// Example: `project_dir/.pwdvault`
    pub fn vault_root(&self, project_dir: &Path, override_dir: Option<&str>) -> PathBuf {
        project_dir.join(override_dir.unwrap_or(&self.vault_dir))
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.vault_dir, ".pwdvault");
        assert!(s.confirm_passwords);
        assert!(!s.show_passwords);
        assert_eq!(s.generator.policy(), GenerationPolicy::default());
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_dir, ".pwdvault");
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
vault_dir = "secrets"
confirm_passwords = false
show_passwords = true

[generator]
length = 16
letters_min = 4
digits_min = 2
symbols_max = 0
"#;
        fs::write(tmp.path().join(".pwdvault.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_dir, "secrets");
        assert!(!settings.confirm_passwords);
        assert!(settings.show_passwords);

        let policy = settings.generator.policy();
        assert_eq!(policy.total_length, 16);
        assert_eq!(policy.letters, ClassQuota::new(4, 20));
        assert_eq!(policy.digits, ClassQuota::new(2, 20));
        assert_eq!(policy.symbols, ClassQuota::none());
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".pwdvault.toml"), "show_passwords = true\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert!(settings.show_passwords);
        // Rest should be defaults
        assert_eq!(settings.vault_dir, ".pwdvault");
        assert!(settings.confirm_passwords);
        assert_eq!(settings.generator.length, 12);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".pwdvault.toml"), "not valid {{toml").unwrap();

        let result = Settings::load(tmp.path());
        assert!(matches!(result, Err(PwdVaultError::Config(_))));
    }

    #[test]
    fn vault_root_builds_correct_path() {
        let s = Settings::default();
        let project = Path::new("/home/user/project");
        assert_eq!(
            s.vault_root(project, None),
            PathBuf::from("/home/user/project/.pwdvault")
        );
        assert_eq!(
            s.vault_root(project, Some("other")),
            PathBuf::from("/home/user/project/other")
        );
    }
}

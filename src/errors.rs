use thiserror::Error;

/// All errors that can occur in pwdvault.
#[derive(Debug, Error)]
pub enum PwdVaultError {
    // --- Input errors ---
    #[error("{0}")]
    Validation(String),

    #[error("Password policy cannot be satisfied: {0}")]
    Policy(String),

    // --- Vault errors ---
    #[error("A password named '{0}' already exists")]
    Collision(String),

    #[error("Password '{0}' not found — it may have been removed outside pwdvault")]
    NotFound(String),

    // --- Transfer errors ---
    #[error("Invalid batch state: {0}")]
    InvalidBatchState(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    Config(String),

    // --- Audit errors ---
    #[error("Audit error: {0}")]
    Audit(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

/// Convenience type alias for pwdvault results.
pub type Result<T> = std::result::Result<T, PwdVaultError>;

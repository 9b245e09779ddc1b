//! Configuration loaded from `.pwdvault.toml`.

pub mod settings;

pub use settings::{GeneratorSettings, Settings};

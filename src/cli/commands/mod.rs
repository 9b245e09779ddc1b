//! One module per subcommand, each exposing an `execute` function.

pub mod audit_cmd;
pub mod completions;
pub mod delete;
pub mod export;
pub mod generate;
pub mod import_cmd;
pub mod last;
pub mod list;
pub mod new;
pub mod read;
pub mod rename;

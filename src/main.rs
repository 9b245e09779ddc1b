use clap::Parser;
use pwdvault::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    init_tracing(if cli.verbose { "debug" } else { "warn" });

    let result = match cli.command {
        Commands::New {
            ref name,
            overwrite,
        } => pwdvault::cli::commands::new::execute(&cli, name, overwrite),
        Commands::Read { ref name } => pwdvault::cli::commands::read::execute(&cli, name),
        Commands::List { json } => pwdvault::cli::commands::list::execute(&cli, json),
        Commands::Generate {
            length,
            letters_min,
            letters_max,
            digits_min,
            digits_max,
            symbols_min,
            symbols_max,
            ref store,
        } => {
            let overrides = pwdvault::cli::commands::generate::PolicyOverrides {
                length,
                letters_min,
                letters_max,
                digits_min,
                digits_max,
                symbols_min,
                symbols_max,
            };
            pwdvault::cli::commands::generate::execute(&cli, &overrides, store.as_deref())
        }
        Commands::Rename { ref old, ref new } => {
            pwdvault::cli::commands::rename::execute(&cli, old, new)
        }
        Commands::Delete { ref name, force } => {
            pwdvault::cli::commands::delete::execute(&cli, name, force)
        }
        Commands::Import {
            ref files,
            overwrite,
            json,
        } => pwdvault::cli::commands::import_cmd::execute(&cli, files, overwrite, json),
        Commands::Export {
            ref destination,
            ref name,
            overwrite,
            json,
        } => pwdvault::cli::commands::export::execute(
            &cli,
            destination,
            name.as_deref(),
            overwrite,
            json,
        ),
        Commands::Last => pwdvault::cli::commands::last::execute(&cli),
        Commands::Audit { last, ref since } => {
            pwdvault::cli::commands::audit_cmd::execute(&cli, last, since.as_deref())
        }
        Commands::Completions { shell } => pwdvault::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        pwdvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` wins over the `--verbose` default.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pwdvault={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

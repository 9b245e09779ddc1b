//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::audit::AuditEntry;
use crate::transfer::BatchOutcome;
use crate::vault::EntryListing;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print the entry listing as a one-column table.
///
/// An empty vault prints the `<no passwords>` row so the output always
/// has something to show.
pub fn print_entries_table(listing: &EntryListing) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name"]);

    for line in listing.display_lines() {
        table.add_row(vec![line]);
    }

    println!("{table}");

    if listing.is_empty() {
        tip("Run `pwdvault new <NAME>` to store your first password.");
    }
}

/// Print a batch summary, one styled line per counter.
pub fn print_outcome(outcome: &BatchOutcome) {
    let summary = outcome.summary();
    if outcome.failed() > 0 {
        warning(&summary);
    } else if outcome.copied() > 0 {
        success(&summary);
    } else {
        info(&summary);
    }
}

/// Print audit rows as a table.
pub fn print_audit_table(entries: &[AuditEntry]) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["When (UTC)", "Operation", "Entry", "Details"]);

    for entry in entries {
        table.add_row(vec![
            entry.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            entry.operation.clone(),
            entry.entry_name.clone().unwrap_or_default(),
            entry.details.clone().unwrap_or_default(),
        ]);
    }

    println!("{table}");
    tip(&format!("{} row(s). Use --last or --since to see more or fewer.", entries.len()));
}

//! `pwdvault audit` — show which vault operations ran, newest first.
//!
//! Usage:
//!   pwdvault audit               # latest 50 rows
//!   pwdvault audit --last 20
//!   pwdvault audit --since 2w    # w, d, h or m

use chrono::{DateTime, TimeDelta, Utc};

use crate::audit::AuditLog;
use crate::cli::output;
use crate::cli::{load_settings, vault_root, Cli};
use crate::errors::{PwdVaultError, Result};

/// Execute the `audit` command.
pub fn execute(cli: &Cli, last: usize, since: Option<&str>) -> Result<()> {
    let settings = load_settings()?;
    let root = vault_root(cli, &settings)?;

    let cutoff = since.map(|s| since_cutoff(s, Utc::now())).transpose()?;

    // Don't create a vault just to report that it has no history.
    if !root.is_dir() {
        output::info("No audit entries found.");
        return Ok(());
    }

    let log = AuditLog::open(&root)
        .ok_or_else(|| PwdVaultError::Audit("failed to open audit database".into()))?;
    let entries = log.query(last, cutoff)?;

    if entries.is_empty() {
        output::info("No audit entries found.");
    } else {
        output::print_audit_table(&entries);
    }
    Ok(())
}

/// Turn `--since` text such as `2w`, `7d`, `24h` or `30m` into the instant
/// that long before `now`.
fn since_cutoff(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let input = input.trim();
    let invalid = || {
        PwdVaultError::CommandFailed(format!(
            "invalid --since value '{input}' (expected a count and one of w, d, h, m, e.g. 7d)"
        ))
    };

    let (split, unit) = input.char_indices().last().ok_or_else(invalid)?;
    let amount: i64 = input[..split].parse().map_err(|_| invalid())?;
    if amount < 0 {
        return Err(invalid());
    }

    let span = match unit {
        'w' => TimeDelta::try_weeks(amount),
        'd' => TimeDelta::try_days(amount),
        'h' => TimeDelta::try_hours(amount),
        'm' => TimeDelta::try_minutes(amount),
        _ => None,
    }
    .ok_or_else(invalid)?;

    now.checked_sub_signed(span).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-10T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn since_accepts_every_unit() {
        let cases = [
            ("2w", "2024-02-25T12:00:00Z"),
            ("7d", "2024-03-03T12:00:00Z"),
            ("24h", "2024-03-09T12:00:00Z"),
            (" 90m ", "2024-03-10T10:30:00Z"),
            ("0d", "2024-03-10T12:00:00Z"),
        ];
        for (input, expected) in cases {
            let cutoff = since_cutoff(input, now()).unwrap();
            assert_eq!(cutoff.to_rfc3339(), expected.replace('Z', "+00:00"), "{input}");
        }
    }

    #[test]
    fn since_rejects_malformed_values() {
        for input in ["", "d", "7", "7x", "-3d", "1.5h", "seven d"] {
            assert!(
                matches!(since_cutoff(input, now()), Err(PwdVaultError::CommandFailed(_))),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn since_rejects_spans_out_of_range() {
        let input = format!("{}w", i64::MAX);
        assert!(since_cutoff(&input, now()).is_err());
        assert!(since_cutoff("999999999d", now()).is_err());
    }

    #[test]
    fn cutoff_filters_the_log() {
        let dir = tempfile::TempDir::new().unwrap();
        let log = AuditLog::open(dir.path()).unwrap();
        log.log("rename", Some("old"), Some("old -> new"));

        let recent = since_cutoff("1h", Utc::now()).unwrap();
        assert_eq!(log.query(10, Some(recent)).unwrap().len(), 1);

        let future = Utc::now() + TimeDelta::hours(1);
        assert!(log.query(10, Some(future)).unwrap().is_empty());
    }
}

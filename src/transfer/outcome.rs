//! Counters accumulated while a batch is copied.

use std::fmt;

use serde::Serialize;

/// Which way files move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// External files into the storage root.
    Import,
    /// Storage root entries out to a destination directory.
    Export,
}

impl Direction {
    pub fn verb(self) -> &'static str {
        match self {
            Direction::Import => "import",
            Direction::Export => "export",
        }
    }
}

/// Aggregate result of one import or export batch.
///
/// Every candidate ends up in exactly one bucket, so
/// `copied + skipped + unknown_type + failed + pending == total`, and once
/// the batch is applied `pending` is zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    direction: Direction,
    copied: usize,
    skipped: usize,
    unknown_type: usize,
    failed: usize,
    /// Collisions still waiting for a decision.
    pending: usize,
    total: usize,
    /// Entry names copied by this batch, in copy order.
    copied_names: Vec<String>,
}

impl BatchOutcome {
    pub(crate) fn new(direction: Direction) -> Self {
        Self {
            direction,
            copied: 0,
            skipped: 0,
            unknown_type: 0,
            failed: 0,
            pending: 0,
            total: 0,
            copied_names: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Classification
    // ------------------------------------------------------------------

    pub(crate) fn record_unknown(&mut self) {
        self.total += 1;
        self.unknown_type += 1;
    }

    /// A candidate settled as skipped while planning.
    pub(crate) fn record_skipped(&mut self) {
        self.total += 1;
        self.skipped += 1;
    }

    /// A candidate that could not even be classified.
    pub(crate) fn record_unusable(&mut self) {
        self.total += 1;
        self.failed += 1;
    }

    /// A candidate queued for copying (direct or collision).
    pub(crate) fn record_queued(&mut self) {
        self.total += 1;
        self.pending += 1;
    }

    // ------------------------------------------------------------------
    // Settlement of queued candidates
    // ------------------------------------------------------------------

    pub(crate) fn settle_copied(&mut self, name: &str) {
        self.pending -= 1;
        self.copied += 1;
        self.copied_names.push(name.to_string());
    }

    pub(crate) fn settle_skipped(&mut self) {
        self.pending -= 1;
        self.skipped += 1;
    }

    pub(crate) fn settle_failed(&mut self) {
        self.pending -= 1;
        self.failed += 1;
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn copied(&self) -> usize {
        self.copied
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn unknown_type(&self) -> usize {
        self.unknown_type
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Names the caller should add to its listing after an import.
    pub fn copied_names(&self) -> &[String] {
        &self.copied_names
    }

    /// Human-readable summary, one line per non-zero counter.
    pub fn summary(&self) -> String {
        let verb = self.direction.verb();
        let mut lines = Vec::new();

        if self.copied > 0 {
            lines.push(format!("Successfully {verb}ed {} password(s).", self.copied));
        }
        if self.skipped > 0 {
            lines.push(format!("Chose not to {verb} {} password(s).", self.skipped));
        }
        if self.unknown_type > 0 {
            lines.push(format!(
                "{} file(s) with unknown type skipped.",
                self.unknown_type
            ));
        }
        if self.failed > 0 {
            lines.push(format!("{} file(s) couldn't be {verb}ed.", self.failed));
        }

        if lines.is_empty() {
            format!("Nothing to {verb}.")
        } else {
            lines.join("\n")
        }
    }
}

impl fmt::Display for BatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

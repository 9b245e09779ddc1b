//! Two-phase copy batches: classify, copy what is safe, then settle collisions.
//!
//! ```text
//! plan_import / plan_export        -> Planned
//! copy_direct                      -> AwaitingResolution (or Applied if no collisions)
//! apply_resolutions(resolution)    -> Applied
//! ```

use std::path::PathBuf;

use crate::errors::{PwdVaultError, Result};

use super::copy_file;
use super::outcome::{BatchOutcome, Direction};

/// One file to copy. Used the same way for import and export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferTask {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Entry name (without the `.pwd` suffix).
    pub name: String,
}

/// Where a batch is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Planned,
    AwaitingResolution,
    Applied,
}

/// The caller's decision about pending collisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Overwrite every colliding destination.
    AcceptAll,
    /// Skip every colliding item.
    Cancel,
    /// One accept (`true`) / skip (`false`) flag per collision, in
    /// [`TransferBatch::collisions`] order.
    PerItem(Vec<bool>),
}

/// A classified batch of copies.
#[derive(Debug)]
pub struct TransferBatch {
    state: BatchState,
    direct: Vec<TransferTask>,
    collisions: Vec<TransferTask>,
    outcome: BatchOutcome,
}

impl TransferBatch {
    pub(crate) fn new(direction: Direction) -> Self {
        Self {
            state: BatchState::Planned,
            direct: Vec::new(),
            collisions: Vec::new(),
            outcome: BatchOutcome::new(direction),
        }
    }

    pub(crate) fn push_direct(&mut self, task: TransferTask) {
        self.outcome.record_queued();
        self.direct.push(task);
    }

    pub(crate) fn push_collision(&mut self, task: TransferTask) {
        self.outcome.record_queued();
        self.collisions.push(task);
    }

    /// A candidate whose source already is its destination.
    pub(crate) fn push_unchanged(&mut self) {
        self.outcome.record_skipped();
    }

    pub(crate) fn push_unknown(&mut self) {
        self.outcome.record_unknown();
    }

    pub(crate) fn push_unusable(&mut self) {
        self.outcome.record_unusable();
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn state(&self) -> BatchState {
        self.state
    }

    pub fn direction(&self) -> Direction {
        self.outcome.direction()
    }

    /// Items with nothing at their destination.
    pub fn direct_tasks(&self) -> &[TransferTask] {
        &self.direct
    }

    /// Items that would overwrite something and need a decision.
    pub fn collisions(&self) -> &[TransferTask] {
        &self.collisions
    }

    /// Counters so far. Final once the state is `Applied`.
    pub fn outcome(&self) -> &BatchOutcome {
        &self.outcome
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Copy every direct item. Failures are counted, never propagated.
    pub fn copy_direct(&mut self) -> Result<&BatchOutcome> {
        self.expect_state(BatchState::Planned, "copy_direct")?;

        let tasks = std::mem::take(&mut self.direct);
        for task in &tasks {
            match copy_file(&task.source, &task.destination) {
                Ok(_) => self.outcome.settle_copied(&task.name),
                Err(e) => {
                    tracing::warn!(
                        name = %task.name,
                        source = %task.source.display(),
                        destination = %task.destination.display(),
                        error = %e,
                        "Copy failed"
                    );
                    self.outcome.settle_failed();
                }
            }
        }
        self.direct = tasks;

        self.state = if self.collisions.is_empty() {
            BatchState::Applied
        } else {
            BatchState::AwaitingResolution
        };
        tracing::debug!(
            direction = self.direction().verb(),
            copied = self.outcome.copied(),
            pending = self.outcome.pending(),
            "Direct copies done"
        );
        Ok(&self.outcome)
    }

    /// Settle the pending collisions and finalize the outcome.
    pub fn apply_resolutions(&mut self, resolution: Resolution) -> Result<BatchOutcome> {
        self.expect_state(BatchState::AwaitingResolution, "apply_resolutions")?;

        let accepted = match resolution {
            Resolution::AcceptAll => vec![true; self.collisions.len()],
            Resolution::Cancel => vec![false; self.collisions.len()],
            Resolution::PerItem(flags) => {
                if flags.len() != self.collisions.len() {
                    return Err(PwdVaultError::Validation(format!(
                        "expected {} overwrite decisions, got {}",
                        self.collisions.len(),
                        flags.len()
                    )));
                }
                flags
            }
        };

        for (task, accept) in self.collisions.iter().zip(accepted) {
            if !accept {
                self.outcome.settle_skipped();
                continue;
            }
            match copy_file(&task.source, &task.destination) {
                Ok(_) => self.outcome.settle_copied(&task.name),
                Err(e) => {
                    tracing::warn!(
                        name = %task.name,
                        destination = %task.destination.display(),
                        error = %e,
                        "Overwrite failed"
                    );
                    self.outcome.settle_failed();
                }
            }
        }

        self.state = BatchState::Applied;
        Ok(self.outcome.clone())
    }

    /// Run whatever phases remain with a decision made up front.
    pub fn finish(mut self, resolution: Resolution) -> Result<BatchOutcome> {
        if self.state == BatchState::Planned {
            self.copy_direct()?;
        }
        if self.state == BatchState::AwaitingResolution {
            return self.apply_resolutions(resolution);
        }
        Ok(self.outcome)
    }

    fn expect_state(&self, expected: BatchState, operation: &str) -> Result<()> {
        if self.state != expected {
            return Err(PwdVaultError::InvalidBatchState(format!(
                "{operation} needs a {expected:?} batch, this one is {:?}",
                self.state
            )));
        }
        Ok(())
    }
}

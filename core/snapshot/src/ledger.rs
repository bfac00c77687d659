//! The snapshot/undo ledger (C8): captures before/after file bytes around
//! mutating tool calls, keyed by the turn that produced them, and reverts
//! or replays those captures on undo/redo.

use std::path::PathBuf;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use tracing::debug;
use tracing::warn;

use crate::capture::FileState;
use crate::capture::OmittedReason;
use crate::capture::capture_file_state;
use crate::capture::remove_file;
use crate::capture::restore_file;
use crate::error::Result;

/// A before-capture taken on entry to a mutating tool, not yet committed to
/// the ledger. Dropping it without calling [`SnapshotLedger::commit`] (the
/// tool-failure path) leaves the ledger untouched.
#[derive(Debug, Clone)]
pub struct PendingCapture {
    pub path: PathBuf,
    before: FileState,
}

/// One committed snapshot entry: the file state before and after a
/// mutating tool ran, for one turn.
#[derive(Debug, Clone)]
pub struct SnapshotEntry {
    pub turn_id: String,
    pub turn_number: i32,
    pub path: PathBuf,
    pub before: FileState,
    pub after: FileState,
    pub captured_at_ms: i64,
}

/// What happened to one entry during an undo or redo pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoOutcome {
    /// The filesystem was reverted/replayed for this path.
    Applied { path: PathBuf },
    /// Nothing was written because the relevant side was omitted
    /// (binary/too-large/absent) at capture time.
    Noop { path: PathBuf, reason: OmittedReason },
}

/// Ledger of snapshot entries for one session, indexed by turn.
#[derive(Debug)]
pub struct SnapshotLedger {
    max_capture_bytes: u64,
    entries: Vec<SnapshotEntry>,
    redo_stack: Vec<SnapshotEntry>,
}

impl SnapshotLedger {
    pub fn new() -> Self {
        Self::with_max_capture_bytes(crate::capture::DEFAULT_MAX_CAPTURE_BYTES)
    }

    pub fn with_max_capture_bytes(max_capture_bytes: u64) -> Self {
        Self {
            max_capture_bytes,
            entries: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Captures `path`'s current state before a mutating tool runs.
    pub async fn begin_capture(&self, path: impl Into<PathBuf>) -> Result<PendingCapture> {
        let path = path.into();
        let before = capture_file_state(&path, self.max_capture_bytes).await?;
        Ok(PendingCapture { path, before })
    }

    /// Discards a pending capture after the tool call failed. No-op, kept
    /// for symmetry with [`Self::commit`] at call sites.
    pub fn discard(&self, _pending: PendingCapture) {}

    /// Re-reads `pending.path` after a successful mutation and commits the
    /// before/after pair as a new entry. Starting a new entry clears the
    /// redo stack, matching the usual editor convention that a fresh edit
    /// invalidates any pending redo.
    pub async fn commit(
        &mut self,
        pending: PendingCapture,
        turn_id: impl Into<String>,
        turn_number: i32,
    ) -> Result<()> {
        let after = capture_file_state(&pending.path, self.max_capture_bytes).await?;
        let entry = SnapshotEntry {
            turn_id: turn_id.into(),
            turn_number,
            path: pending.path,
            before: pending.before,
            after,
            captured_at_ms: now_ms(),
        };
        debug!(
            turn_id = %entry.turn_id,
            path = %entry.path.display(),
            "committed snapshot entry"
        );
        self.entries.push(entry);
        self.redo_stack.clear();
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[SnapshotEntry] {
        &self.entries
    }

    pub fn entries_for_turn<'a>(
        &'a self,
        turn_id: &'a str,
    ) -> impl Iterator<Item = &'a SnapshotEntry> {
        self.entries.iter().filter(move |e| e.turn_id == turn_id)
    }

    /// Reverts the filesystem to `before` for every entry whose
    /// `turn_number` is strictly newer than `boundary_turn_number`, latest
    /// first, then removes those entries from the ledger (they move to the
    /// redo stack).
    pub async fn undo_to(&mut self, boundary_turn_number: i32) -> Result<Vec<UndoOutcome>> {
        let split_at = self
            .entries
            .iter()
            .position(|e| e.turn_number > boundary_turn_number)
            .unwrap_or(self.entries.len());

        let mut to_undo = self.entries.split_off(split_at);
        let mut outcomes = Vec::with_capacity(to_undo.len());

        for entry in to_undo.iter().rev() {
            outcomes.push(revert_one(entry).await?);
        }

        self.redo_stack.append(&mut to_undo);
        Ok(outcomes)
    }

    /// Replays `after` for every entry on the redo stack, in the
    /// chronological order they were originally committed, moving them
    /// back onto the ledger.
    pub async fn redo(&mut self) -> Result<Vec<UndoOutcome>> {
        let mut to_redo = std::mem::take(&mut self.redo_stack);
        let mut outcomes = Vec::with_capacity(to_redo.len());

        for entry in &to_redo {
            outcomes.push(replay_one(entry).await?);
        }

        self.entries.append(&mut to_redo);
        Ok(outcomes)
    }

    /// Drops every entry strictly newer than `boundary_turn_number` without
    /// touching the filesystem — the "commit past the boundary" case,
    /// where the user has accepted those changes and the undo stack for
    /// them is no longer needed.
    pub fn discard_past(&mut self, boundary_turn_number: i32) {
        self.entries.retain(|e| e.turn_number <= boundary_turn_number);
        self.redo_stack.clear();
    }
}

impl Default for SnapshotLedger {
    fn default() -> Self {
        Self::new()
    }
}

async fn revert_one(entry: &SnapshotEntry) -> Result<UndoOutcome> {
    match &entry.before {
        FileState::Captured(bytes) => {
            restore_file(&entry.path, bytes).await?;
            Ok(UndoOutcome::Applied {
                path: entry.path.clone(),
            })
        }
        FileState::Omitted(OmittedReason::Absent) => {
            remove_file(&entry.path).await?;
            Ok(UndoOutcome::Applied {
                path: entry.path.clone(),
            })
        }
        FileState::Omitted(reason) => {
            warn!(
                path = %entry.path.display(),
                ?reason,
                "undo skipped: before-state was not captured"
            );
            Ok(UndoOutcome::Noop {
                path: entry.path.clone(),
                reason: *reason,
            })
        }
    }
}

async fn replay_one(entry: &SnapshotEntry) -> Result<UndoOutcome> {
    match &entry.after {
        FileState::Captured(bytes) => {
            restore_file(&entry.path, bytes).await?;
            Ok(UndoOutcome::Applied {
                path: entry.path.clone(),
            })
        }
        FileState::Omitted(reason) => {
            warn!(
                path = %entry.path.display(),
                ?reason,
                "redo skipped: after-state was not captured"
            );
            Ok(UndoOutcome::Noop {
                path: entry.path.clone(),
                reason: *reason,
            })
        }
    }
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "ledger.test.rs"]
mod tests;

//! Snapshot/undo ledger (C8): captures before/after bytes around mutating
//! file-tool calls, keyed by the turn that produced them, and reverts or
//! replays those captures on undo/redo.

pub mod capture;
pub mod error;
pub mod ledger;

pub use capture::DEFAULT_MAX_CAPTURE_BYTES;
pub use capture::FileState;
pub use capture::OmittedReason;
pub use error::Result;
pub use error::SnapshotError;
pub use ledger::PendingCapture;
pub use ledger::SnapshotEntry;
pub use ledger::SnapshotLedger;
pub use ledger::UndoOutcome;

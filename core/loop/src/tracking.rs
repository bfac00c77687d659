//! Per-run bookkeeping that doesn't belong on the wire: recursion depth for
//! nested queries, and the counters that decide when auto-compaction and
//! session-memory extraction should run.

use std::time::Duration;
use std::time::Instant;

/// Tracks the recursion chain for a single `run()` invocation of the agent
/// loop. `depth` increases by one every time [`crate::driver::AgentLoop`]
/// recurses into another turn within the same run.
#[derive(Debug, Clone)]
pub struct QueryTracking {
    /// Identifier shared by every turn produced within this run.
    pub chain_id: String,
    /// Recursion depth, starting at 0 for the initial call.
    pub depth: i32,
}

impl QueryTracking {
    /// Start tracking for a fresh top-level run.
    pub fn new_root(chain_id: String) -> Self {
        Self { chain_id, depth: 0 }
    }
}

/// Tracks auto-compaction and session-memory-extraction state across turns.
#[derive(Debug, Clone)]
pub struct AutoCompactTracking {
    /// Number of turns processed since this tracking was created.
    pub turn_counter: i32,
    /// Turn ID of the most recent compaction, if one has happened.
    pub last_compacted_turn_id: Option<String>,
    /// Turn number at which the most recent compaction happened.
    pub last_compacted_turn_number: Option<i32>,
    /// Whether a session-memory extraction is currently in flight.
    pub extraction_in_progress: bool,
    /// Number of extractions completed so far.
    pub extraction_count: i32,
    tokens_at_last_extraction: i32,
    tool_calls_at_last_extraction: i32,
    tool_calls_total: i32,
    last_extraction_at: Option<Instant>,
}

impl AutoCompactTracking {
    /// Create fresh tracking state for a new run.
    pub fn new() -> Self {
        Self {
            turn_counter: 0,
            last_compacted_turn_id: None,
            last_compacted_turn_number: None,
            extraction_in_progress: false,
            extraction_count: 0,
            tokens_at_last_extraction: 0,
            tool_calls_at_last_extraction: 0,
            tool_calls_total: 0,
            last_extraction_at: None,
        }
    }

    /// Record that a (Tier 1 or Tier 2) compaction has applied to `turn_id`.
    pub fn mark_compacted(&mut self, turn_id: &str, turn_number: i32) {
        self.last_compacted_turn_id = Some(turn_id.to_string());
        self.last_compacted_turn_number = Some(turn_number);
    }

    /// Record that a tool call happened, for extraction cadence tracking.
    pub fn record_tool_call(&mut self) {
        self.tool_calls_total += 1;
    }

    /// Mark an extraction as having started; blocks `should_trigger` until
    /// [`Self::mark_extraction_completed`] is called.
    pub fn mark_extraction_started(&mut self) {
        self.extraction_in_progress = true;
    }

    /// Record a completed extraction at `current_tokens`, keyed to the last
    /// message it summarized.
    pub fn mark_extraction_completed(&mut self, current_tokens: i32, _last_message_id: &str) {
        self.extraction_in_progress = false;
        self.extraction_count += 1;
        self.tokens_at_last_extraction = current_tokens;
        self.tool_calls_at_last_extraction = self.tool_calls_total;
        self.last_extraction_at = Some(Instant::now());
    }

    /// Mark an in-flight extraction as failed, clearing the in-progress flag
    /// without advancing the extraction counters.
    pub fn mark_extraction_failed(&mut self) {
        self.extraction_in_progress = false;
    }

    /// Tokens added to the conversation since the last extraction.
    pub fn tokens_since_extraction(&self, current_tokens: i32) -> i32 {
        (current_tokens - self.tokens_at_last_extraction).max(0)
    }

    /// Tool calls made since the last extraction.
    pub fn tool_calls_since_extraction(&self) -> i32 {
        (self.tool_calls_total - self.tool_calls_at_last_extraction).max(0)
    }

    /// Time elapsed since the last extraction, or `Duration::MAX` if none has
    /// happened yet (so cooldown checks never block the first extraction).
    pub fn time_since_extraction(&self) -> Duration {
        match self.last_extraction_at {
            Some(t) => t.elapsed(),
            None => Duration::MAX,
        }
    }
}

impl Default for AutoCompactTracking {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tracking.test.rs"]
mod tests;

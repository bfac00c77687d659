//! The history store (C2): accumulates turns and exposes the *effective
//! history* sent to the model, distinct from the full history that is
//! persisted and shown to the user.

use crate::tracked::TrackedMessage;
use crate::turn::TokenUsage;
use crate::turn::Turn;
use tracing::debug;
use turnkit_provider::Message;

/// Tuning knobs for when the history store considers itself due for
/// compaction.
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    pub context_window: i64,
    pub compaction_threshold: f64,
    pub max_turns: i32,
    pub auto_compact: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            context_window: 128_000,
            compaction_threshold: 0.8,
            max_turns: 100,
            auto_compact: true,
        }
    }
}

/// Marks where compaction cut the history: everything before this boundary
/// was folded into `compacted_summary`.
#[derive(Debug, Clone)]
pub struct CompactionBoundary {
    pub turn_id: String,
    pub turn_number: i32,
    pub turns_compacted: i32,
    pub tokens_saved: i64,
    pub timestamp_ms: i64,
}

/// Accumulates turns for one session and exposes the effective history
/// view the turn engine sends to the model.
#[derive(Debug, Clone)]
pub struct MessageHistory {
    pub config: HistoryConfig,
    pub system_message: Option<TrackedMessage>,
    turns: Vec<Turn>,
    compacted_summary: Option<String>,
    compaction_boundary: Option<CompactionBoundary>,
}

impl MessageHistory {
    pub fn new() -> Self {
        Self::with_config(HistoryConfig::default())
    }

    pub fn with_config(config: HistoryConfig) -> Self {
        Self {
            config,
            system_message: None,
            turns: Vec::new(),
            compacted_summary: None,
            compaction_boundary: None,
        }
    }

    pub fn set_system_message(&mut self, message: TrackedMessage) {
        self.system_message = Some(message);
    }

    pub fn add_turn(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    pub fn current_turn(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn current_turn_mut(&mut self) -> Option<&mut Turn> {
        self.turns.last_mut()
    }

    /// All turns recorded so far, oldest first.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Mutable access to all turns, for in-place edits (e.g. micro-compaction).
    pub fn turns_mut(&mut self) -> &mut [Turn] {
        &mut self.turns
    }

    pub fn total_usage(&self) -> TokenUsage {
        let mut total = TokenUsage::default();
        for turn in &self.turns {
            total.add(turn.usage);
        }
        total
    }

    pub fn compacted_summary(&self) -> Option<&String> {
        self.compacted_summary.as_ref()
    }

    pub fn compaction_boundary(&self) -> Option<&CompactionBoundary> {
        self.compaction_boundary.as_ref()
    }

    /// Fold everything but the last `keep_turns` turns into a summary.
    ///
    /// `turn_id` and `tokens_saved` describe the compaction event for the
    /// boundary record; the actual summarization text is supplied by the
    /// caller (the compactor, C3), not computed here.
    pub fn apply_compaction(
        &mut self,
        summary: String,
        keep_turns: usize,
        turn_id: impl Into<String>,
        tokens_saved: i64,
    ) {
        let total_turns = self.turns.len();
        let turns_compacted = total_turns.saturating_sub(keep_turns);
        if turns_compacted > 0 {
            self.turns.drain(0..turns_compacted);
        }
        debug!(turns_compacted, tokens_saved, "applied history compaction");

        self.compacted_summary = Some(summary);
        self.compaction_boundary = Some(CompactionBoundary {
            turn_id: turn_id.into(),
            turn_number: total_turns as i32,
            turns_compacted: turns_compacted as i32,
            tokens_saved,
            timestamp_ms: now_ms(),
        });
    }

    /// Returns `true` once either the turn count or estimated token usage
    /// crosses the configured compaction threshold.
    pub fn needs_compaction(&self) -> bool {
        if !self.config.auto_compact {
            return false;
        }
        if self.turns.len() as i32 >= self.config.max_turns {
            return true;
        }
        let usage = self.total_usage();
        let total_tokens = usage.input_tokens + usage.output_tokens;
        let threshold = (self.config.context_window as f64 * self.config.compaction_threshold) as i64;
        total_tokens >= threshold
    }

    /// The effective history sent to the model: the system message (if
    /// any), the compacted summary (if compaction has run), and every
    /// surviving turn's messages in order.
    pub fn messages_for_api(&self) -> Vec<Message> {
        let mut messages = Vec::new();

        if let Some(system) = &self.system_message {
            messages.push(system.inner.clone());
        }

        if let Some(summary) = &self.compacted_summary {
            messages.push(Message::assistant(summary.clone()));
        }

        for turn in &self.turns {
            messages.push(turn.user_message.inner.clone());
            if let Some(assistant) = &turn.assistant_message {
                messages.push(assistant.inner.clone());
            }
        }

        messages
    }

    pub fn clear(&mut self) {
        self.turns.clear();
        self.compacted_summary = None;
        self.compaction_boundary = None;
    }
}

impl Default for MessageHistory {
    fn default() -> Self {
        Self::new()
    }
}

fn now_ms() -> i64 {
    use std::time::SystemTime;
    use std::time::UNIX_EPOCH;
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Builder for [`MessageHistory`] with a fluent config API.
#[derive(Debug, Clone, Default)]
pub struct HistoryBuilder {
    config: HistoryConfig,
    system_message: Option<String>,
}

impl HistoryBuilder {
    pub fn new() -> Self {
        Self {
            config: HistoryConfig::default(),
            system_message: None,
        }
    }

    pub fn context_window(mut self, context_window: i64) -> Self {
        self.config.context_window = context_window;
        self
    }

    pub fn compaction_threshold(mut self, threshold: f64) -> Self {
        self.config.compaction_threshold = threshold;
        self
    }

    pub fn max_turns(mut self, max_turns: i32) -> Self {
        self.config.max_turns = max_turns;
        self
    }

    pub fn auto_compact(mut self, auto_compact: bool) -> Self {
        self.config.auto_compact = auto_compact;
        self
    }

    pub fn system_message(mut self, content: impl Into<String>) -> Self {
        self.system_message = Some(content.into());
        self
    }

    pub fn build(self) -> MessageHistory {
        let mut history = MessageHistory::with_config(self.config);
        if let Some(content) = self.system_message {
            history.set_system_message(TrackedMessage::system(content, "system"));
        }
        history
    }
}

#[cfg(test)]
#[path = "history.test.rs"]
mod tests;

//! The history store (C2): tracked messages, turns, and the effective
//! history the turn engine sends to the model.

pub mod factory;
pub mod history;
pub mod normalization;
pub mod tracked;
pub mod turn;
pub mod type_guards;

pub use history::CompactionBoundary;
pub use history::HistoryBuilder;
pub use history::HistoryConfig;
pub use history::MessageHistory;
pub use tracked::MessageSource;
pub use tracked::TrackedMessage;
pub use turn::AbortReason;
pub use turn::TokenUsage;
pub use turn::ToolCallStatus;
pub use turn::TrackedToolCall;
pub use turn::Turn;

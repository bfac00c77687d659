//! A message annotated with the turn it belongs to and where it came from.

use turnkit_provider::ContentBlock;
use turnkit_provider::Message;
use turnkit_provider::Role;
use turnkit_provider::ToolCall;
use uuid::Uuid;

/// Where a message originated, beyond its wire-level [`Role`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageSource {
    User,
    Assistant { request_id: Option<String> },
    Tool { call_id: String },
    System,
    SystemReminder { reminder_type: String },
    CompactionSummary,
    Subagent { agent_id: String },
}

impl MessageSource {
    pub fn assistant(request_id: Option<String>) -> Self {
        MessageSource::Assistant { request_id }
    }

    pub fn tool(call_id: impl Into<String>) -> Self {
        MessageSource::Tool {
            call_id: call_id.into(),
        }
    }

    pub fn subagent(agent_id: impl Into<String>) -> Self {
        MessageSource::Subagent {
            agent_id: agent_id.into(),
        }
    }
}

/// A message plus the bookkeeping the history store and turn engine need:
/// which turn it belongs to, where it came from, whether it has been
/// superseded (tombstoned) by a later edit, and whether it's meta content
/// (e.g. a system reminder) rather than user-authored input.
#[derive(Debug, Clone)]
pub struct TrackedMessage {
    pub uuid: Uuid,
    pub turn_id: String,
    pub inner: Message,
    pub source: MessageSource,
    tombstoned: bool,
    meta: bool,
}

impl TrackedMessage {
    pub fn new(inner: Message, turn_id: impl Into<String>, source: MessageSource) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            turn_id: turn_id.into(),
            inner,
            source,
            tombstoned: false,
            meta: false,
        }
    }

    pub fn new_meta(inner: Message, turn_id: impl Into<String>, source: MessageSource) -> Self {
        let mut msg = Self::new(inner, turn_id, source);
        msg.meta = true;
        msg
    }

    pub fn user(content: impl Into<String>, turn_id: impl Into<String>) -> Self {
        Self::new(Message::user(content), turn_id, MessageSource::User)
    }

    pub fn assistant(
        content: impl Into<String>,
        turn_id: impl Into<String>,
        request_id: Option<String>,
    ) -> Self {
        Self::new(
            Message::assistant(content),
            turn_id,
            MessageSource::assistant(request_id),
        )
    }

    pub fn assistant_with_content(
        content: Vec<ContentBlock>,
        turn_id: impl Into<String>,
        request_id: Option<String>,
    ) -> Self {
        Self::new(
            Message::new(Role::Assistant, content),
            turn_id,
            MessageSource::assistant(request_id),
        )
    }

    pub fn system(content: impl Into<String>, turn_id: impl Into<String>) -> Self {
        Self::new(Message::system(content), turn_id, MessageSource::System)
    }

    pub fn tool_result(
        call_id: impl Into<String>,
        content: impl Into<String>,
        turn_id: impl Into<String>,
    ) -> Self {
        let call_id = call_id.into();
        Self::new(
            Message::tool_result(
                &call_id,
                turnkit_provider::ToolResultContent::text(content.into()),
            ),
            turn_id,
            MessageSource::tool(call_id),
        )
    }

    pub fn tool_error(
        call_id: impl Into<String>,
        error: impl Into<String>,
        turn_id: impl Into<String>,
    ) -> Self {
        let call_id = call_id.into();
        Self::new(
            Message::tool_error(&call_id, error.into()),
            turn_id,
            MessageSource::tool(call_id),
        )
    }

    pub fn system_reminder(
        content: impl Into<String>,
        reminder_type: impl Into<String>,
        turn_id: impl Into<String>,
    ) -> Self {
        Self::new_meta(
            Message::user(content),
            turn_id,
            MessageSource::SystemReminder {
                reminder_type: reminder_type.into(),
            },
        )
    }

    pub fn role(&self) -> Role {
        self.inner.role
    }

    pub fn text(&self) -> String {
        self.inner.text()
    }

    pub fn is_tombstoned(&self) -> bool {
        self.tombstoned
    }

    pub fn tombstone(&mut self) {
        self.tombstoned = true;
    }

    pub fn is_meta(&self) -> bool {
        self.meta
    }

    pub fn set_meta(&mut self, meta: bool) {
        self.meta = meta;
    }

    pub fn has_tool_calls(&self) -> bool {
        self.inner.content.iter().any(ContentBlock::is_tool_use)
    }

    pub fn tool_calls(&self) -> Vec<ToolCall> {
        self.inner
            .content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::ToolUse { id, name, input } => {
                    Some(ToolCall::new(id.clone(), name.clone(), input.clone()))
                }
                _ => None,
            })
            .collect()
    }
}

impl From<TrackedMessage> for Message {
    fn from(tracked: TrackedMessage) -> Self {
        tracked.inner
    }
}

#[cfg(test)]
#[path = "tracked.test.rs"]
mod tests;

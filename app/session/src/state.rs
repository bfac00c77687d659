//! Session state aggregate that wires together all components.
//!
//! [`SessionState`] is the runtime container for an active session: it
//! holds the message history, the tool registry, and the resolved model,
//! and drives turns through an [`AgentLoop`].

use std::sync::Arc;

use turnkit_config::Config;
use turnkit_context::ContextInjection;
use turnkit_context::ConversationContext;
use turnkit_context::EnvironmentInfo;
use turnkit_context::InjectionPosition;
use turnkit_loop::AgentLoop;
use turnkit_loop::CompactionConfig;
use turnkit_loop::FallbackConfig;
use turnkit_loop::LoopResult;
use turnkit_message::MessageHistory;
use turnkit_protocol::CompactConfig;
use turnkit_protocol::LoopConfig;
use turnkit_protocol::LoopEvent;
use turnkit_protocol::ProviderType;
use turnkit_protocol::RoleSelection;
use turnkit_protocol::RoleSelections;
use turnkit_protocol::ThinkingLevel;
use turnkit_protocol::TokenUsage;
use turnkit_protocol::model::ModelRole;
use turnkit_tools::ToolRegistry;

use serde::Deserialize;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::info;

use crate::model_registry::ModelRegistry;
use crate::session::Session;

/// Result of a single turn in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnResult {
    pub final_text: String,
    pub turns_completed: i32,
    pub usage: TokenUsage,
    pub is_complete: bool,
}

impl TurnResult {
    pub fn from_loop_result(result: &LoopResult) -> Self {
        Self {
            final_text: result.final_text.clone(),
            turns_completed: result.turns_completed,
            usage: TokenUsage::new(
                result.total_input_tokens as i64,
                result.total_output_tokens as i64,
            ),
            is_complete: true,
        }
    }
}

/// Runtime aggregate for an active conversation.
pub struct SessionState {
    pub session: Session,
    pub message_history: MessageHistory,
    pub tool_registry: Arc<ToolRegistry>,

    model_registry: Arc<ModelRegistry>,
    cancel_token: CancellationToken,
    loop_config: LoopConfig,
    compact_config: CompactConfig,
    total_turns: i32,
    total_input_tokens: i32,
    total_output_tokens: i32,
    context_window: i32,
    provider_type: ProviderType,
    system_prompt_suffix: Option<String>,
    config: Arc<Config>,
}

impl SessionState {
    /// Create a new session state from a session and configuration.
    pub async fn new(
        session: Session,
        config: Arc<Config>,
        model_registry: Arc<ModelRegistry>,
    ) -> anyhow::Result<Self> {
        let primary_model = session
            .primary_model()
            .ok_or_else(|| anyhow::anyhow!("Session has no main model configured"))?;
        let provider_name = primary_model.provider().to_string();
        let model_name = primary_model.model_name().to_string();

        info!(
            session_id = %session.id,
            model = %model_name,
            provider = %provider_name,
            "Creating session state"
        );

        let provider_type = primary_model.model.provider_type;

        let context_window = config
            .resolve_model_info(&provider_name, &model_name)
            .and_then(|info| info.context_window)
            .map(|cw| cw as i32)
            .unwrap_or(200_000);

        let mut session = session;
        let main_spec = turnkit_protocol::model::ModelSpec::new(&provider_name, &model_name);
        if session.selections.get(ModelRole::Main).is_none() {
            session
                .selections
                .set(ModelRole::Main, RoleSelection::new(main_spec));
        }

        let mut tool_registry = ToolRegistry::new();
        turnkit_tools::builtin::register_builtin_tools(&mut tool_registry);

        let loop_config = LoopConfig {
            max_turns: session.max_turns,
            ..LoopConfig::default()
        };

        Ok(Self {
            session,
            message_history: MessageHistory::new(),
            tool_registry: Arc::new(tool_registry),
            model_registry,
            cancel_token: CancellationToken::new(),
            loop_config,
            compact_config: config.compact_config.clone(),
            total_turns: 0,
            total_input_tokens: 0,
            total_output_tokens: 0,
            context_window,
            provider_type,
            system_prompt_suffix: None,
            config,
        })
    }

    /// Run a single turn with the given user input.
    pub async fn run_turn(&mut self, user_input: &str) -> anyhow::Result<TurnResult> {
        let (event_tx, mut event_rx) = mpsc::channel::<LoopEvent>(256);

        let event_task = tokio::spawn(async move {
            while let Some(event) = event_rx.recv().await {
                Self::handle_event(&event);
            }
        });

        let result = self.run_turn_internal(user_input, event_tx).await;

        let _ = event_task.await;
        result
    }

    /// Run a single turn, forwarding all events to the provided channel.
    pub async fn run_turn_streaming(
        &mut self,
        user_input: &str,
        event_tx: mpsc::Sender<LoopEvent>,
    ) -> anyhow::Result<TurnResult> {
        self.run_turn_internal(user_input, event_tx).await
    }

    async fn run_turn_internal(
        &mut self,
        user_input: &str,
        event_tx: mpsc::Sender<LoopEvent>,
    ) -> anyhow::Result<TurnResult> {
        info!(
            session_id = %self.session.id,
            input_len = user_input.len(),
            "Running turn"
        );

        self.session.touch();

        let main_selection = self
            .session
            .selections
            .get_or_main(ModelRole::Main)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Session has no main model"))?;
        let model = self.model_registry.resolve(&main_selection.model)?;

        let environment = EnvironmentInfo::builder()
            .cwd(&self.session.working_dir)
            .model(main_selection.model.model.as_str())
            .context_window(self.context_window)
            .max_output_tokens(16_384)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build environment: {e}"))?;

        let context = ConversationContext::builder()
            .environment(environment)
            .tool_names(self.tool_registry.tool_names())
            .injections(self.build_suffix_injections())
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build context: {e}"))?;

        let mut loop_instance = AgentLoop::builder()
            .model(model)
            .tool_registry(self.tool_registry.clone())
            .message_history(self.message_history.clone())
            .context(context)
            .config(self.loop_config.clone())
            .fallback_config(FallbackConfig::default())
            .compaction_config(CompactionConfig::default())
            .compact_config(self.compact_config.clone())
            .event_tx(event_tx)
            .cancel_token(self.cancel_token.clone())
            .build();

        let result = loop_instance.run(user_input).await?;

        self.message_history = loop_instance.message_history().clone();
        self.total_turns += result.turns_completed;
        self.total_input_tokens += result.total_input_tokens;
        self.total_output_tokens += result.total_output_tokens;

        Ok(TurnResult::from_loop_result(&result))
    }

    /// Run a turn with an optional per-call model override.
    ///
    /// `model_override` can be a full `"provider/model"` spec or a bare
    /// model name resolved against the session's current provider.
    pub async fn run_skill_turn(
        &mut self,
        prompt: &str,
        model_override: Option<&str>,
    ) -> anyhow::Result<TurnResult> {
        let saved_selection = self.override_main_selection(model_override)?;
        let result = self.run_turn(prompt).await;
        self.restore_main_selection(saved_selection);
        result
    }

    fn override_main_selection(
        &mut self,
        model_override: Option<&str>,
    ) -> anyhow::Result<Option<RoleSelection>> {
        let Some(model_name) = model_override else {
            return Ok(None);
        };
        let current = self.session.selections.get(ModelRole::Main).cloned();
        let spec = if model_name.contains('/') {
            model_name
                .parse::<turnkit_protocol::model::ModelSpec>()
                .map_err(|e| anyhow::anyhow!("Invalid model spec '{}': {}", model_name, e))?
        } else {
            let provider = self.provider().to_string();
            turnkit_protocol::model::ModelSpec::new(provider, model_name)
        };
        info!(model = %spec, "Overriding model for turn");
        self.session
            .selections
            .set(ModelRole::Main, RoleSelection::new(spec));
        Ok(current)
    }

    fn restore_main_selection(&mut self, saved: Option<RoleSelection>) {
        if let Some(original) = saved {
            self.session.selections.set(ModelRole::Main, original);
        }
    }

    fn handle_event(event: &LoopEvent) {
        match event {
            LoopEvent::TurnStarted {
                turn_id,
                turn_number,
            } => {
                debug!(turn_id, turn_number, "Turn started");
            }
            LoopEvent::TurnCompleted { turn_id, usage } => {
                debug!(
                    turn_id,
                    input_tokens = usage.input_tokens,
                    output_tokens = usage.output_tokens,
                    "Turn completed"
                );
            }
            LoopEvent::Error { error } => {
                tracing::error!(code = %error.code, message = %error.message, "Loop error");
            }
            _ => {
                debug!(?event, "Loop event");
            }
        }
    }

    /// Cancel the current operation.
    pub fn cancel(&self) {
        info!(session_id = %self.session.id, "Cancelling session");
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Get a clone of the cancellation token.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Replace the cancellation token with a fresh one.
    ///
    /// Call this after a turn is cancelled so the next turn can proceed;
    /// `CancellationToken` is one-shot.
    pub fn reset_cancel_token(&mut self) {
        self.cancel_token = CancellationToken::new();
    }

    pub fn session_id(&self) -> &str {
        &self.session.id
    }

    pub fn model(&self) -> &str {
        self.session.model().unwrap_or("")
    }

    pub fn provider(&self) -> &str {
        self.session.provider().unwrap_or("")
    }

    pub fn total_turns(&self) -> i32 {
        self.total_turns
    }

    pub fn total_input_tokens(&self) -> i32 {
        self.total_input_tokens
    }

    pub fn total_output_tokens(&self) -> i32 {
        self.total_output_tokens
    }

    pub fn history(&self) -> &MessageHistory {
        &self.message_history
    }

    pub fn history_mut(&mut self) -> &mut MessageHistory {
        &mut self.message_history
    }

    pub fn set_loop_config(&mut self, config: LoopConfig) {
        self.loop_config = config;
    }

    pub fn loop_config(&self) -> &LoopConfig {
        &self.loop_config
    }

    /// Get all current role selections.
    pub fn get_selections(&self) -> RoleSelections {
        self.session.selections.clone()
    }

    /// Get selection for a specific role, falling back to Main.
    pub fn selection(&self, role: ModelRole) -> Option<RoleSelection> {
        self.session.selections.get_or_main(role).cloned()
    }

    pub fn thinking_level(&self, role: ModelRole) -> Option<ThinkingLevel> {
        self.session
            .selections
            .get_or_main(role)
            .and_then(|s| s.thinking_level.clone())
    }

    pub fn provider_type(&self) -> ProviderType {
        self.provider_type
    }

    /// Switch the model for a specific role.
    pub fn switch_role(&mut self, role: ModelRole, selection: RoleSelection) {
        info!(
            role = %role,
            model = %selection.model,
            thinking = ?selection.thinking_level,
            "Switching role"
        );
        self.session.selections.set(role, selection);
    }

    /// Switch only the thinking level for a role. Returns `true` if the
    /// role selection exists and was updated.
    pub fn switch_thinking_level(&mut self, role: ModelRole, level: ThinkingLevel) -> bool {
        info!(role = %role, thinking = %level, "Switching thinking level for role");
        self.session.selections.set_thinking_level(role, level)
    }

    /// Clear the thinking level override for a role. Returns `true` if the
    /// role selection exists and was updated.
    pub fn clear_thinking_level(&mut self, role: ModelRole) -> bool {
        if let Some(mut selection) = self.session.selections.get(role).cloned() {
            selection.clear_thinking_level();
            self.session.selections.set(role, selection);
            info!(role = %role, "Cleared thinking level for role");
            true
        } else {
            false
        }
    }

    /// Set a suffix to append to the end of the system prompt.
    pub fn set_system_prompt_suffix(&mut self, suffix: String) {
        self.system_prompt_suffix = Some(suffix);
    }

    fn build_suffix_injections(&self) -> Vec<ContextInjection> {
        self.system_prompt_suffix
            .as_ref()
            .map(|suffix| {
                vec![ContextInjection {
                    label: "system-prompt-suffix".to_string(),
                    content: suffix.clone(),
                    position: InjectionPosition::EndOfPrompt,
                }]
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "state.test.rs"]
mod tests;

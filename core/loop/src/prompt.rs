//! System prompt assembly.
//!
//! `turnkit_context::ConversationContext` aggregates everything a prompt
//! needs (environment, memory files, tool names, injections, output style)
//! but deliberately stops short of rendering text — that's this module's job.

use turnkit_context::ConversationContext;
use turnkit_context::InjectionPosition;

/// Render the full system prompt for a turn from the current conversation
/// context.
pub(crate) fn build_system_prompt(context: &ConversationContext) -> String {
    let mut sections = Vec::new();

    sections.push(identity_section(context));
    sections.push(environment_section(context));

    if !context.tool_names.is_empty() {
        sections.push(before_tools_injections(context));
        sections.push(tools_section(context));
    }

    if !context.memory_files.is_empty() {
        sections.push(memory_section(context));
    }

    if let Some(style) = &context.output_style {
        if style.keep_coding_instructions {
            sections.push(coding_instructions_section());
        }
    } else {
        sections.push(coding_instructions_section());
    }

    sections.push(end_of_prompt_injections(context));

    if let Some(style) = &context.output_style {
        sections.push(style.content.clone());
    }

    sections.into_iter().filter(|s| !s.is_empty()).collect::<Vec<_>>().join("\n\n")
}

fn identity_section(context: &ConversationContext) -> String {
    if let Some(subagent) = context.subagent_type {
        format!("You are a {subagent} subagent assisting with a coding task.")
    } else {
        "You are an interactive CLI assistant that helps with software engineering tasks."
            .to_string()
    }
}

fn environment_section(context: &ConversationContext) -> String {
    let env = &context.environment;
    let mut lines = vec![
        "## Environment".to_string(),
        format!("Working directory: {}", env.cwd.display()),
        format!("Platform: {} ({})", env.platform, env.os_version),
        format!("Date: {}", env.date),
        format!("Model: {}", env.model),
    ];
    if env.is_git_repo {
        match &env.git_branch {
            Some(branch) => lines.push(format!("Git branch: {branch}")),
            None => lines.push("Git repository: yes".to_string()),
        }
    }
    lines.join("\n")
}

fn before_tools_injections(context: &ConversationContext) -> String {
    render_injections(context, InjectionPosition::BeforeTools)
}

fn tools_section(context: &ConversationContext) -> String {
    let mut lines = vec!["## Available Tools".to_string()];
    for name in &context.tool_names {
        lines.push(format!("- {name}"));
    }
    if !context.mcp_server_names.is_empty() {
        lines.push(format!(
            "Connected MCP servers: {}",
            context.mcp_server_names.join(", ")
        ));
    }
    let after = render_injections(context, InjectionPosition::AfterTools);
    if after.is_empty() {
        lines.join("\n")
    } else {
        format!("{}\n\n{after}", lines.join("\n"))
    }
}

fn memory_section(context: &ConversationContext) -> String {
    let mut files = context.memory_files.clone();
    files.sort_by_key(|f| f.priority);
    let mut lines = vec!["## Project Memory".to_string()];
    for file in files {
        lines.push(format!("### {}\n{}", file.path, file.content));
    }
    lines.join("\n\n")
}

fn coding_instructions_section() -> String {
    "## Task Management\nUse the available tools to explore, plan, and implement changes. \
     Prefer small, verifiable steps. Follow the existing code's conventions."
        .to_string()
}

fn end_of_prompt_injections(context: &ConversationContext) -> String {
    render_injections(context, InjectionPosition::EndOfPrompt)
}

fn render_injections(context: &ConversationContext, position: InjectionPosition) -> String {
    context
        .injections
        .iter()
        .filter(|injection| injection.position == position)
        .map(|injection| format!("## {}\n{}", injection.label, injection.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render the prompt used for background conversation summarization, as a
/// standalone system message (not derived from [`ConversationContext`] since
/// the summarizer runs with its own minimal request).
pub(crate) fn build_summarization_prompt(max_summary_tokens: i32, focus: Option<&str>) -> String {
    let focus_line = match focus {
        Some(focus) => format!("\n\nPay particular attention to: {focus}"),
        None => String::new(),
    };
    format!(
        r#"You are summarizing an ongoing coding conversation so it can be resumed later without the full transcript.

Cover:
1. The user's current goal
2. Progress made so far
3. Key technical decisions
4. Files created or modified
5. Remaining work

Be concise. Maximum {max_summary_tokens} tokens.{focus_line}"#
    )
}

#[cfg(test)]
#[path = "prompt.test.rs"]
mod tests;

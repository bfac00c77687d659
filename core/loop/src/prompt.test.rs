use super::*;
use std::path::PathBuf;
use turnkit_context::ConversationContext;
use turnkit_context::EnvironmentInfo;
use turnkit_context::MemoryFile;

fn test_context(tool_names: Vec<String>) -> ConversationContext {
    let environment = EnvironmentInfo::builder()
        .cwd(PathBuf::from("/workspace"))
        .model("test-model")
        .is_git_repo(true)
        .git_branch("main")
        .build()
        .unwrap();

    ConversationContext::builder()
        .environment(environment)
        .tool_names(tool_names)
        .build()
        .unwrap()
}

#[test]
fn includes_environment_details() {
    let context = test_context(vec![]);
    let prompt = build_system_prompt(&context);
    assert!(prompt.contains("/workspace"));
    assert!(prompt.contains("main"));
}

#[test]
fn lists_tools_when_present() {
    let context = test_context(vec!["Read".to_string(), "Write".to_string()]);
    let prompt = build_system_prompt(&context);
    assert!(prompt.contains("- Read"));
    assert!(prompt.contains("- Write"));
}

#[test]
fn omits_tools_section_when_empty() {
    let context = test_context(vec![]);
    let prompt = build_system_prompt(&context);
    assert!(!prompt.contains("## Available Tools"));
}

#[test]
fn includes_memory_files_sorted_by_priority() {
    let mut context = test_context(vec![]);
    context.memory_files = vec![
        MemoryFile {
            path: "low.md".to_string(),
            content: "low priority".to_string(),
            priority: 10,
        },
        MemoryFile {
            path: "high.md".to_string(),
            content: "high priority".to_string(),
            priority: 0,
        },
    ];
    let prompt = build_system_prompt(&context);
    let high_idx = prompt.find("high.md").unwrap();
    let low_idx = prompt.find("low.md").unwrap();
    assert!(high_idx < low_idx);
}

#[test]
fn summarization_prompt_mentions_token_budget() {
    let prompt = build_summarization_prompt(4000, None);
    assert!(prompt.contains("4000 tokens"));
}

#[test]
fn summarization_prompt_includes_focus() {
    let prompt = build_summarization_prompt(4000, Some("authentication changes"));
    assert!(prompt.contains("authentication changes"));
}

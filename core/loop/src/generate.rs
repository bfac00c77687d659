//! Single-shot generation on top of the streaming-only [`Model`] trait.
//!
//! `turnkit_provider::Model` only exposes `stream()`; callers that just want
//! a collected response (auto-compaction summaries, session-memory
//! extraction) drain the stream here instead of processing parts themselves.

use futures::StreamExt;
use turnkit_provider::ContentBlock;
use turnkit_provider::FinishReason;
use turnkit_provider::GenerateRequest;
use turnkit_provider::GenerateResponse;
use turnkit_provider::HyperError;
use turnkit_provider::Model;
use turnkit_provider::StreamOptions;
use turnkit_provider::StreamPart;
use turnkit_provider::TokenUsage;

/// Convert a [`GenerateRequest`] into the [`StreamOptions`] `Model::stream`
/// expects, carrying over messages, tools, and max_tokens.
pub(crate) fn request_to_stream_options(request: GenerateRequest) -> StreamOptions {
    let mut options = StreamOptions::new(request.messages);
    if let Some(tools) = request.tools {
        options = options.with_tools(tools);
    }
    if let Some(choice) = request.tool_choice {
        options = options.with_tool_choice(choice);
    }
    if let Some(temperature) = request.temperature {
        options = options.with_temperature(temperature);
    }
    options.top_p = request.top_p;
    options.max_tokens = request.max_tokens;
    options
}

/// Run `request` against `model` to completion, assembling the streamed
/// parts into a single [`GenerateResponse`]. Does not emit any incremental
/// events; for that, drive `model.stream()` directly as the turn engine does.
pub(crate) async fn generate(
    model: &dyn Model,
    request: GenerateRequest,
) -> Result<GenerateResponse, HyperError> {
    let options = request_to_stream_options(request);
    let mut stream = model.stream(options).await?;

    let mut text_buf = String::new();
    let mut content = Vec::new();
    let mut finish_reason = FinishReason::Stop;
    let mut usage: Option<TokenUsage> = None;

    while let Some(part) = stream.next().await {
        match part? {
            StreamPart::Text { delta } => text_buf.push_str(&delta),
            StreamPart::Reasoning { delta } => {
                if !delta.is_empty() {
                    content.push(ContentBlock::thinking(delta));
                }
            }
            StreamPart::ToolInputDelta { .. } => {}
            StreamPart::ToolCall {
                tool_call_id,
                name,
                arguments,
            } => {
                if !text_buf.is_empty() {
                    content.push(ContentBlock::text(std::mem::take(&mut text_buf)));
                }
                content.push(ContentBlock::tool_use(tool_call_id, name, arguments));
            }
            StreamPart::Finish {
                reason,
                usage: final_usage,
            } => {
                finish_reason = reason;
                usage = final_usage;
            }
            StreamPart::Error { error } => return Err(error),
        }
    }

    if !text_buf.is_empty() {
        content.push(ContentBlock::text(text_buf));
    }

    let mut response = GenerateResponse::new(uuid::Uuid::new_v4().to_string(), model.id())
        .with_content(content)
        .with_finish_reason(finish_reason);
    if let Some(usage) = usage {
        response = response.with_usage(usage);
    }
    Ok(response)
}

#[cfg(test)]
#[path = "generate.test.rs"]
mod tests;

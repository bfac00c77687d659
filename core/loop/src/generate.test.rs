use super::*;
use futures::stream;
use futures::StreamExt;
use turnkit_provider::Message;
use turnkit_provider::StreamResult;

#[derive(Debug)]
struct ScriptedModel {
    id: String,
    parts: Vec<StreamPart>,
}

#[async_trait::async_trait]
impl Model for ScriptedModel {
    fn id(&self) -> &str {
        &self.id
    }

    async fn stream(&self, _options: StreamOptions) -> Result<StreamResult, HyperError> {
        let parts = self.parts.clone().into_iter().map(Ok).collect::<Vec<_>>();
        Ok(stream::iter(parts).boxed())
    }
}

#[tokio::test]
async fn collects_text_into_single_block() {
    let model = ScriptedModel {
        id: "test-model".to_string(),
        parts: vec![
            StreamPart::Text {
                delta: "Hello, ".to_string(),
            },
            StreamPart::Text {
                delta: "world!".to_string(),
            },
            StreamPart::Finish {
                reason: FinishReason::Stop,
                usage: Some(TokenUsage::new(10, 5)),
            },
        ],
    };

    let request = GenerateRequest::new(vec![Message::user("hi")]);
    let response = generate(&model, request).await.unwrap();

    assert_eq!(response.text(), "Hello, world!");
    assert_eq!(response.finish_reason, FinishReason::Stop);
    assert_eq!(response.usage.unwrap().prompt_tokens, 10);
}

#[tokio::test]
async fn splits_text_around_tool_calls() {
    let model = ScriptedModel {
        id: "test-model".to_string(),
        parts: vec![
            StreamPart::Text {
                delta: "Let me check.".to_string(),
            },
            StreamPart::ToolCall {
                tool_call_id: "call-1".to_string(),
                name: "Read".to_string(),
                arguments: serde_json::json!({"path": "a.txt"}),
            },
            StreamPart::Finish {
                reason: FinishReason::ToolCalls,
                usage: None,
            },
        ],
    };

    let request = GenerateRequest::new(vec![Message::user("hi")]);
    let response = generate(&model, request).await.unwrap();

    assert!(response.has_tool_calls());
    assert_eq!(response.tool_calls().len(), 1);
    assert_eq!(response.tool_calls()[0].name, "Read");
    assert_eq!(response.text(), "Let me check.");
    assert!(response.stopped_for_tool_calls());
}

#[tokio::test]
async fn propagates_mid_stream_errors() {
    let model = ScriptedModel {
        id: "test-model".to_string(),
        parts: vec![StreamPart::Error {
            error: HyperError::InvalidRequest("boom".to_string()),
        }],
    };

    let request = GenerateRequest::new(vec![Message::user("hi")]);
    let err = generate(&model, request).await.unwrap_err();
    assert!(err.to_string().contains("boom"));
}

use super::*;
use crate::stream::StreamPart;
use futures::stream;
use futures::StreamExt;

#[derive(Debug)]
struct EchoModel {
    id: String,
}

#[async_trait::async_trait]
impl Model for EchoModel {
    fn id(&self) -> &str {
        &self.id
    }

    async fn stream(&self, options: StreamOptions) -> Result<StreamResult, HyperError> {
        let text = options
            .messages
            .last()
            .map(|m| m.text())
            .unwrap_or_default();
        let parts = vec![
            Ok(StreamPart::Text { delta: text }),
            Ok(StreamPart::Finish {
                reason: crate::response::FinishReason::Stop,
                usage: None,
            }),
        ];
        Ok(stream::iter(parts).boxed())
    }
}

#[tokio::test]
async fn model_stream_yields_text_then_finish() {
    let model = EchoModel {
        id: "echo-1".to_string(),
    };
    let options = StreamOptions::new(vec![crate::messages::Message::user("hello")]);

    let mut parts = model.stream(options).await.unwrap();
    let first = parts.next().await.unwrap().unwrap();
    assert!(matches!(first, StreamPart::Text { delta } if delta == "hello"));

    let second = parts.next().await.unwrap().unwrap();
    assert!(second.is_finish());
}

use super::*;
use crate::messages::Message;

#[test]
fn stream_options_builder_sets_fields() {
    let options = StreamOptions::new(vec![Message::user("hi")])
        .with_temperature(0.5)
        .with_tool_choice(ToolChoice::Auto);

    assert_eq!(options.messages.len(), 1);
    assert_eq!(options.temperature, Some(0.5));
    assert!(matches!(options.tool_choice, Some(ToolChoice::Auto)));
}

#[test]
fn stream_options_default_abort_signal_is_not_cancelled() {
    let options = StreamOptions::new(vec![]);
    assert!(!options.abort_signal.is_cancelled());
}

#[test]
fn finish_part_is_recognized() {
    let part = StreamPart::Finish {
        reason: FinishReason::Stop,
        usage: None,
    };
    assert!(part.is_finish());
    assert!(!part.is_error());
}

#[test]
fn error_part_is_recognized() {
    let part = StreamPart::Error {
        error: HyperError::StreamError("boom".to_string()),
    };
    assert!(part.is_error());
    assert!(!part.is_finish());
}

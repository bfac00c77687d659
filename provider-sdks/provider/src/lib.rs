//! LLM provider client: a narrow streaming interface (C1) the turn engine
//! drives without depending on any vendor's wire format, plus the retry
//! policy that wraps every call made through it.

pub mod error;
pub mod messages;
pub mod model;
pub mod options;
pub mod provider;
pub mod rate_limits;
pub mod registry;
pub mod request;
pub mod response;
pub mod retry;
pub mod stream;
pub mod telemetry;
pub mod tools;

pub use error::HyperError;
pub use error::Result;
pub use messages::ContentBlock;
pub use messages::Message;
pub use messages::Role;
pub use model::Model;
pub use model::ModelInfo;
pub use options::ProviderOptions;
pub use options::ProviderOptionsData;
pub use provider::Provider;
pub use provider::ProviderConfig;
pub use registry::ProviderRegistry;
pub use request::GenerateRequest;
pub use response::FinishReason;
pub use response::GenerateResponse;
pub use response::TokenUsage;
pub use retry::RetryConfig;
pub use retry::RetryExecutor;
pub use stream::StreamOptions;
pub use stream::StreamPart;
pub use stream::StreamResult;
pub use telemetry::NoopTelemetry;
pub use telemetry::RequestTelemetry;
pub use tools::ToolCall;
pub use tools::ToolChoice;
pub use tools::ToolDefinition;

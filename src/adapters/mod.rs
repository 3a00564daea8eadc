// Adapters layer: concrete implementations for external systems.

pub mod http;
pub mod retry;

pub use http::ChatCompletionClient;
pub use retry::RetryPolicy;

pub mod engine;
pub mod normalizer;
pub mod output;
pub mod pipeline;
pub mod prompt;

pub use crate::domain::model::{CompletionRequest, Prompt, SourceText, SustainableCode};
pub use crate::domain::ports::{CompletionProvider, ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;

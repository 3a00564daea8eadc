use crate::domain::model::{CompletionRequest, Prompt, SourceText, SustainableCode};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub trait Storage: Send + Sync {
    fn read_text(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
    fn write_text(
        &self,
        path: &Path,
        contents: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &Path;
    fn output_path(&self) -> &Path;
    fn model(&self) -> &str;
    fn temperature(&self) -> f64;
}

/// Anything that can answer a chat-completion request with plain text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn load_source(&self) -> Result<SourceText>;
    fn build_prompt(&self, source: &SourceText) -> Prompt;
    async fn request_completion(&self, prompt: Prompt) -> Result<String>;
    fn normalize(&self, raw: &str) -> SustainableCode;
    async fn save(&self, code: SustainableCode) -> Result<PathBuf>;
}

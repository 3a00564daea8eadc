use crate::core::normalizer;
use crate::core::prompt::{self, SYSTEM_INSTRUCTION};
use crate::core::{CompletionProvider, ConfigProvider, Pipeline, Storage};
use crate::domain::model::{ChatMessage, CompletionRequest, Prompt, SourceText, SustainableCode};
use crate::utils::error::Result;
use std::path::PathBuf;

/// Read → prompt → complete → normalize → write, for a single source file.
pub struct SustainablePipeline<S: Storage, P: CompletionProvider, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) provider: P,
    pub(crate) config: C,
}

impl<S: Storage, P: CompletionProvider, C: ConfigProvider> SustainablePipeline<S, P, C> {
    pub fn new(storage: S, provider: P, config: C) -> Self {
        Self {
            storage,
            provider,
            config,
        }
    }

    pub fn completion_request(&self, prompt: Prompt) -> CompletionRequest {
        CompletionRequest {
            model: self.config.model().to_string(),
            messages: vec![
                ChatMessage::system(SYSTEM_INSTRUCTION),
                ChatMessage::user(prompt.into_inner()),
            ],
            temperature: self.config.temperature(),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, P: CompletionProvider, C: ConfigProvider> Pipeline
    for SustainablePipeline<S, P, C>
{
    async fn load_source(&self) -> Result<SourceText> {
        let path = self.config.input_path();
        let content = self.storage.read_text(path).await?;
        tracing::info!("📄 Successfully read file: {}", path.display());
        Ok(SourceText::new(path, content))
    }

    fn build_prompt(&self, source: &SourceText) -> Prompt {
        prompt::build_prompt(source)
    }

    async fn request_completion(&self, prompt: Prompt) -> Result<String> {
        let request = self.completion_request(prompt);
        tracing::info!(
            "🌱 Sending code to {} for sustainability analysis...",
            request.model
        );
        self.provider.complete(&request).await
    }

    fn normalize(&self, raw: &str) -> SustainableCode {
        normalizer::normalize(raw)
    }

    async fn save(&self, code: SustainableCode) -> Result<PathBuf> {
        let path = self.config.output_path();
        tracing::debug!("Writing {} bytes to {}", code.len(), path.display());
        self.storage.write_text(path, code.as_str()).await?;
        Ok(path.to_path_buf())
    }
}

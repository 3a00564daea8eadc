use crate::adapters::ChatCompletionClient;
use crate::config::cli::LocalStorage;
use crate::config::credentials::resolve_api_key;
use crate::config::Settings;
use crate::core::engine::SustainabilityEngine;
use crate::core::pipeline::SustainablePipeline;
use crate::core::{prompt, Storage};
use crate::domain::model::SourceText;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::path::PathBuf;

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Written(PathBuf),
    DryRun { prompt: String, output: PathBuf },
}

/// Runs one analysis with already-resolved settings.
///
/// `lookup` reads environment variables; the API key is resolved through it
/// before any file or network I/O happens.
pub async fn run<F>(settings: &Settings, lookup: F) -> Result<RunOutcome>
where
    F: Fn(&str) -> Option<String>,
{
    settings.validate()?;

    if settings.dry_run {
        return dry_run(settings).await;
    }

    let api_key = resolve_api_key(&settings.api_key_env, lookup)?;

    let client = ChatCompletionClient::new(
        settings.endpoint.clone(),
        api_key,
        settings.timeout,
        settings.retry.clone(),
    )?;
    tracing::debug!(
        "Using endpoint {} (timeout {:?}, max retries {})",
        client.endpoint(),
        settings.timeout,
        settings.retry.max_retries
    );

    let pipeline = SustainablePipeline::new(LocalStorage::new(), client, settings.clone());
    let engine = SustainabilityEngine::new(pipeline);

    engine.run().await.map(RunOutcome::Written)
}

async fn dry_run(settings: &Settings) -> Result<RunOutcome> {
    tracing::info!("🔍 DRY RUN MODE - No request will be sent and nothing will be written");

    let content = LocalStorage::new().read_text(&settings.input).await?;
    let source = SourceText::new(&settings.input, content);
    let prompt = prompt::build_prompt(&source);

    Ok(RunOutcome::DryRun {
        prompt: prompt.into_inner(),
        output: settings.output.clone(),
    })
}

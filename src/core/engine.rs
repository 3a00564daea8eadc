use crate::core::Pipeline;
use crate::domain::model::RunState;
use crate::utils::error::Result;
use std::path::PathBuf;
use std::time::Instant;

/// Drives a [`Pipeline`] through its states, stopping at the first failure.
pub struct SustainabilityEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> SustainabilityEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<PathBuf> {
        let started = Instant::now();
        let mut state = RunState::Start;

        match self.run_steps(&mut state).await {
            Ok(output_path) => {
                debug_assert!(state.is_terminal());
                tracing::info!("⏱️ Finished in {:.2?}", started.elapsed());
                Ok(output_path)
            }
            Err(e) => {
                let failed_in = state.clone();
                transition(&mut state, RunState::Failed(e.to_string()));
                tracing::debug!("Run aborted after state {}", failed_in);
                Err(e)
            }
        }
    }

    async fn run_steps(&self, state: &mut RunState) -> Result<PathBuf> {
        let source = self.pipeline.load_source().await?;
        transition(state, RunState::Loaded);

        let prompt = self.pipeline.build_prompt(&source);
        drop(source);
        transition(state, RunState::PromptBuilt);

        let raw = self.pipeline.request_completion(prompt).await?;
        transition(state, RunState::Responded);

        let code = self.pipeline.normalize(&raw);
        if code.is_empty() {
            tracing::warn!("Completion contained no code after removing fences");
        }
        transition(state, RunState::Normalized);

        let output_path = self.pipeline.save(code).await?;
        transition(state, RunState::Saved);

        Ok(output_path)
    }
}

fn transition(state: &mut RunState, next: RunState) {
    tracing::debug!("State: {} -> {}", state, next);
    *state = next;
}

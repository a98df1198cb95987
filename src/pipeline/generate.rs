//! Question generation: prompt the model, parse, and degrade to synthesis.
//!
//! The model is reached through [`TextGenerator`], a one-method seam that
//! keeps the pipeline independent of any provider SDK. [`LlmGenerator`]
//! adapts an `edgequake_llm` chat provider to it.
//!
//! ## Degrade path
//!
//! [`QuestionGenerator::from_model`] returns `Result<Vec<Mcq>, GenerationError>`;
//! [`QuestionGenerator::generate`] matches on it and, for any error, builds the
//! questions from [`crate::pipeline::facts`] output instead. A model failure
//! or sparse output never reaches the caller as an error. There is no retry:
//! one failed call goes straight to the fallback.

use crate::config::SamplingConfig;
use crate::error::GenerationError;
use crate::output::{Mcq, QuestionSource};
use crate::pipeline::fallback::synthesize;
use crate::pipeline::facts::extract_facts;
use crate::pipeline::parse::parse_mcqs;
use crate::pipeline::preprocess::truncate_chars;
use crate::prompts::{after_assistant_marker, McqPrompt};
use edgequake_llm::{ChatMessage, CompletionOptions, LLMProvider};
use futures::future::BoxFuture;
use rand::Rng;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

const PREVIEW_CHARS: usize = 300;

/// A language model: prompt in, generated text out.
///
/// Implementations may echo the prompt; everything up to the last
/// [`crate::prompts::ASSISTANT_MARKER`] is discarded by the caller.
pub trait TextGenerator: Send + Sync {
    /// Short label used in logs and in [`crate::McqBatch::model`].
    fn name(&self) -> &str;

    fn generate<'a>(
        &'a self,
        prompt: &'a McqPrompt,
        sampling: &'a SamplingConfig,
    ) -> BoxFuture<'a, Result<String, GenerationError>>;
}

/// [`TextGenerator`] backed by an `edgequake_llm` chat provider.
pub struct LlmGenerator {
    provider: Arc<dyn LLMProvider>,
    label: String,
}

impl LlmGenerator {
    pub fn new(provider: Arc<dyn LLMProvider>, label: impl Into<String>) -> Self {
        Self {
            provider,
            label: label.into(),
        }
    }
}

impl TextGenerator for LlmGenerator {
    fn name(&self) -> &str {
        &self.label
    }

    fn generate<'a>(
        &'a self,
        prompt: &'a McqPrompt,
        sampling: &'a SamplingConfig,
    ) -> BoxFuture<'a, Result<String, GenerationError>> {
        Box::pin(async move {
            let messages = vec![
                ChatMessage::system(prompt.system.as_str()),
                ChatMessage::user(prompt.user.as_str()),
            ];
            let options = build_options(sampling);
            let start = Instant::now();

            let response = self
                .provider
                .chat(&messages, Some(&options))
                .await
                .map_err(|e| GenerationError::ModelFailed {
                    detail: e.to_string(),
                })?;

            debug!(
                "{}: {} input tokens, {} output tokens, {:?}",
                self.label,
                response.prompt_tokens,
                response.completion_tokens,
                start.elapsed()
            );
            Ok(response.content)
        })
    }
}

/// Build `CompletionOptions` from the sampling config.
///
/// Chat APIs take an additive frequency penalty (0 = off) rather than a
/// multiplicative repetition penalty (1 = off); the offset from 1 is sent,
/// clamped to the API's range.
fn build_options(sampling: &SamplingConfig) -> CompletionOptions {
    CompletionOptions {
        temperature: Some(sampling.temperature),
        max_tokens: Some(sampling.max_new_tokens),
        top_p: Some(sampling.top_p),
        frequency_penalty: Some(frequency_penalty(sampling.repetition_penalty)),
        ..Default::default()
    }
}

fn frequency_penalty(repetition_penalty: f32) -> f32 {
    (repetition_penalty - 1.0).clamp(-2.0, 2.0)
}

/// Turns normalized text into question candidates, model first.
pub struct QuestionGenerator {
    generator: Option<Arc<dyn TextGenerator>>,
    sampling: SamplingConfig,
    system_prompt: Option<String>,
}

impl QuestionGenerator {
    /// `None` skips the model and always synthesises.
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, sampling: SamplingConfig) -> Self {
        Self {
            generator,
            sampling,
            system_prompt: None,
        }
    }

    pub fn with_system_prompt(mut self, prompt: Option<String>) -> Self {
        self.system_prompt = prompt;
        self
    }

    /// Label of the model consulted, or `"fallback"` without one.
    pub fn model_name(&self) -> &str {
        self.generator.as_deref().map_or("fallback", |g| g.name())
    }

    /// Up to `count` candidates and the path that produced them.
    pub async fn generate<R: Rng + ?Sized>(
        &self,
        text: &str,
        count: usize,
        rng: &mut R,
    ) -> (Vec<Mcq>, QuestionSource) {
        match self.from_model(text, count).await {
            Ok(mcqs) => (mcqs, QuestionSource::Model),
            Err(reason) => {
                warn!("Using fallback: {}", reason);
                let extracted = extract_facts(text);
                (synthesize(&extracted, count, rng), QuestionSource::Fallback)
            }
        }
    }

    /// Ask the model and parse its answer.
    ///
    /// Fewer than `count / 2` parsed questions counts as a failure.
    pub async fn from_model(&self, text: &str, count: usize) -> Result<Vec<Mcq>, GenerationError> {
        let generator = self.generator.as_deref().ok_or(GenerationError::Disabled)?;
        let prompt = McqPrompt::new(text, count, self.system_prompt.as_deref());

        info!("Generating {} questions with {}", count, generator.name());
        let raw = generator.generate(&prompt, &self.sampling).await?;
        let generated = after_assistant_marker(&raw);
        debug!(
            "Generated text preview:\n{}...",
            truncate_chars(generated, PREVIEW_CHARS)
        );

        let mcqs = parse_mcqs(generated, count);
        if mcqs.len() < count / 2 {
            return Err(GenerationError::LowYield {
                parsed: mcqs.len(),
                requested: count,
            });
        }
        info!("Parsed {} questions from model output", mcqs.len());
        Ok(mcqs)
    }
}

//! Configuration types for PDF-to-quiz generation.
//!
//! All request behaviour is controlled through [`McqConfig`], built via its
//! [`McqConfigBuilder`]. The thresholds of every heuristic stage live here so
//! two runs can be compared by diffing their configs.

use crate::error::Pdf2McqError;
use crate::pipeline::generate::TextGenerator;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Configuration for one quiz-generation request.
///
/// Built via [`McqConfig::builder()`] or using [`McqConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2mcq::McqConfig;
///
/// let config = McqConfig::builder()
///     .question_count(5)
///     .fallback_only(true)
///     .seed(7)
///     .build()
///     .unwrap();
/// assert_eq!(config.max_chars, 1500);
/// ```
#[derive(Clone)]
pub struct McqConfig {
    /// Number of questions requested. Default: 5.
    ///
    /// The returned batch may be smaller when fewer candidates survive
    /// validation, never larger.
    pub question_count: usize,

    /// Hard cap on the normalized text, in characters. Default: 1500.
    ///
    /// Small chat models lose the output format when the prompt body grows;
    /// the cap is applied after ranking and may cut mid-sentence.
    pub max_chars: usize,

    /// Minimum normalized length accepted, in characters. Default: 50.
    pub min_text_chars: usize,

    /// Sentences kept by the ranker inside the pipeline. Default: 20.
    pub ranker_top_n: usize,

    /// Lines shorter than this (trimmed) are treated as noise. Default: 10.
    pub min_line_chars: usize,

    /// Lines occurring more often than this are headers/footers. Default: 3.
    pub max_line_repeats: usize,

    /// Sampling parameters forwarded to the model.
    pub sampling: SamplingConfig,

    /// LLM model identifier, e.g. "gpt-4.1-nano". If None, uses provider default.
    pub model: Option<String>,

    /// LLM provider name (e.g. "openai", "anthropic", "ollama").
    pub provider_name: Option<String>,

    /// Pre-constructed generator. Takes precedence over `provider_name`.
    pub generator: Option<Arc<dyn TextGenerator>>,

    /// Custom system prompt. If None, uses the built-in quiz prompt.
    pub system_prompt: Option<String>,

    /// Skip the model and synthesise questions from extracted facts. Default: false.
    pub fallback_only: bool,

    /// Seed for choice shuffling. If None, seeded from the OS.
    pub seed: Option<u64>,
}

impl Default for McqConfig {
    fn default() -> Self {
        Self {
            question_count: 5,
            max_chars: 1500,
            min_text_chars: 50,
            ranker_top_n: 20,
            min_line_chars: 10,
            max_line_repeats: 3,
            sampling: SamplingConfig::default(),
            model: None,
            provider_name: None,
            generator: None,
            system_prompt: None,
            fallback_only: false,
            seed: None,
        }
    }
}

impl fmt::Debug for McqConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("McqConfig")
            .field("question_count", &self.question_count)
            .field("max_chars", &self.max_chars)
            .field("min_text_chars", &self.min_text_chars)
            .field("ranker_top_n", &self.ranker_top_n)
            .field("min_line_chars", &self.min_line_chars)
            .field("max_line_repeats", &self.max_line_repeats)
            .field("sampling", &self.sampling)
            .field("model", &self.model)
            .field("provider_name", &self.provider_name)
            .field(
                "generator",
                &self.generator.as_ref().map(|g| g.name().to_string()),
            )
            .field("system_prompt", &self.system_prompt.as_ref().map(|p| p.len()))
            .field("fallback_only", &self.fallback_only)
            .field("seed", &self.seed)
            .finish()
    }
}

impl McqConfig {
    /// Create a new builder for `McqConfig`.
    pub fn builder() -> McqConfigBuilder {
        McqConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`McqConfig`].
#[derive(Debug)]
pub struct McqConfigBuilder {
    config: McqConfig,
}

impl McqConfigBuilder {
    pub fn question_count(mut self, n: usize) -> Self {
        self.config.question_count = n.max(1);
        self
    }

    pub fn max_chars(mut self, n: usize) -> Self {
        self.config.max_chars = n;
        self
    }

    pub fn min_text_chars(mut self, n: usize) -> Self {
        self.config.min_text_chars = n;
        self
    }

    pub fn ranker_top_n(mut self, n: usize) -> Self {
        self.config.ranker_top_n = n;
        self
    }

    pub fn min_line_chars(mut self, n: usize) -> Self {
        self.config.min_line_chars = n;
        self
    }

    pub fn max_line_repeats(mut self, n: usize) -> Self {
        self.config.max_line_repeats = n;
        self
    }

    pub fn sampling(mut self, sampling: SamplingConfig) -> Self {
        self.config.sampling = sampling;
        self
    }

    pub fn max_new_tokens(mut self, n: usize) -> Self {
        self.config.sampling.max_new_tokens = n;
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.sampling.temperature = t;
        self
    }

    pub fn top_p(mut self, p: f32) -> Self {
        self.config.sampling.top_p = p;
        self
    }

    pub fn repetition_penalty(mut self, p: f32) -> Self {
        self.config.sampling.repetition_penalty = p;
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = Some(model.into());
        self
    }

    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.config.provider_name = Some(name.into());
        self
    }

    pub fn generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.config.generator = Some(generator);
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    pub fn fallback_only(mut self, v: bool) -> Self {
        self.config.fallback_only = v;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<McqConfig, Pdf2McqError> {
        let c = &self.config;
        if c.max_chars < c.min_text_chars {
            return Err(Pdf2McqError::InvalidConfig(format!(
                "max_chars ({}) must be ≥ min_text_chars ({})",
                c.max_chars, c.min_text_chars
            )));
        }
        if c.ranker_top_n == 0 {
            return Err(Pdf2McqError::InvalidConfig(
                "ranker_top_n must be ≥ 1".into(),
            ));
        }
        if !(0.0..=2.0).contains(&c.sampling.temperature) {
            return Err(Pdf2McqError::InvalidConfig(format!(
                "temperature must be 0.0–2.0, got {}",
                c.sampling.temperature
            )));
        }
        if c.sampling.top_p <= 0.0 || c.sampling.top_p > 1.0 {
            return Err(Pdf2McqError::InvalidConfig(format!(
                "top_p must be in (0, 1], got {}",
                c.sampling.top_p
            )));
        }
        if c.sampling.repetition_penalty <= 0.0 {
            return Err(Pdf2McqError::InvalidConfig(format!(
                "repetition_penalty must be > 0, got {}",
                c.sampling.repetition_penalty
            )));
        }
        Ok(self.config)
    }
}

/// Sampling parameters for one generation call.
///
/// The chat provider adapter forwards all four; `repetition_penalty` is
/// sent as a frequency penalty of `repetition_penalty - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Upper bound on generated tokens. Default: 800.
    ///
    /// Five questions in the expected format take roughly 400 tokens; the
    /// headroom covers chattier models.
    pub max_new_tokens: usize,
    /// Sampling randomness. Default: 0.6.
    pub temperature: f32,
    /// Nucleus sampling threshold. Default: 0.9.
    pub top_p: f32,
    /// Penalty discouraging repeated n-grams. Default: 1.3.
    pub repetition_penalty: f32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            max_new_tokens: 800,
            temperature: 0.6,
            top_p: 0.9,
            repetition_penalty: 1.3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_pipeline_constants() {
        let c = McqConfig::default();
        assert_eq!(c.question_count, 5);
        assert_eq!(c.max_chars, 1500);
        assert_eq!(c.min_text_chars, 50);
        assert_eq!(c.ranker_top_n, 20);
        assert_eq!(c.sampling.max_new_tokens, 800);
        assert!(!c.fallback_only);
    }

    #[test]
    fn question_count_is_clamped() {
        let c = McqConfig::builder().question_count(0).build().unwrap();
        assert_eq!(c.question_count, 1);
    }

    #[test]
    fn rejects_cap_below_minimum() {
        let err = McqConfig::builder()
            .max_chars(20)
            .min_text_chars(50)
            .build()
            .unwrap_err();
        assert!(matches!(err, Pdf2McqError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_bad_top_p() {
        assert!(McqConfig::builder().top_p(0.0).build().is_err());
        assert!(McqConfig::builder().top_p(1.5).build().is_err());
        assert!(McqConfig::builder().top_p(1.0).build().is_ok());
    }

    #[test]
    fn rejects_non_positive_repetition_penalty() {
        assert!(McqConfig::builder().repetition_penalty(0.0).build().is_err());
        let c = McqConfig::builder().repetition_penalty(1.1).build().unwrap();
        assert_eq!(c.sampling.repetition_penalty, 1.1);
    }

    #[test]
    fn rejects_bad_temperature() {
        assert!(McqConfig::builder().temperature(3.0).build().is_err());
    }

    #[test]
    fn debug_lists_seed() {
        let c = McqConfig::builder().seed(3).build().unwrap();
        let s = format!("{c:?}");
        assert!(s.contains("seed: Some(3)"), "got: {s}");
    }
}

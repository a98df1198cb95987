//! Request entry points: PDF bytes in, validated question batch out.
//!
//! Every entry point runs the same stages in order, each consuming its
//! input fully before the next starts:
//!
//! ```text
//! bytes ──▶ extract ──▶ preprocess ──▶ generate ──▶ validate ──▶ McqBatch
//! ```
//!
//! Only three conditions are fatal: an empty upload, too little text after
//! preprocessing, and no candidate surviving validation. A failing model is
//! absorbed by the fallback synthesiser inside [`QuestionGenerator`].

use crate::config::McqConfig;
use crate::error::Pdf2McqError;
use crate::output::McqBatch;
use crate::pipeline::extract::{extract_text, has_pdf_extension};
use crate::pipeline::generate::{LlmGenerator, QuestionGenerator, TextGenerator};
use crate::pipeline::preprocess::{truncate_chars, Preprocessor};
use crate::pipeline::validate::retain_valid;
use edgequake_llm::{LLMProvider, ProviderFactory};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Environment variable naming the provider, honoured with [`MODEL_ENV`].
pub const PROVIDER_ENV: &str = "PDF2MCQ_LLM_PROVIDER";
/// Environment variable naming the model, honoured with [`PROVIDER_ENV`].
pub const MODEL_ENV: &str = "PDF2MCQ_MODEL";

const DEFAULT_MODEL: &str = "gpt-4.1-nano";
const SUMMARY_CHARS: usize = 50;

/// Generate a quiz from the bytes of a PDF document.
///
/// This is the primary entry point for the library.
///
/// # Returns
/// `Ok(McqBatch)` with between 1 and `config.question_count` questions.
/// The batch records whether they came from the model or the fallback.
///
/// # Errors
/// - [`Pdf2McqError::EmptyFile`] when `pdf_bytes` is empty
/// - [`Pdf2McqError::TextTooShort`] when extraction fails or preprocessing
///   leaves fewer than `config.min_text_chars` characters
/// - [`Pdf2McqError::GenerationFailed`] when no candidate is valid
///
/// # Example
/// ```rust,no_run
/// use pdf2mcq::{produce_mcqs, McqConfig};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let bytes = std::fs::read("lecture.pdf")?;
/// let batch = produce_mcqs(&bytes, &McqConfig::default()).await?;
/// for q in &batch.questions {
///     println!("{} -> {:?}", q.question, q.correct_choice());
/// }
/// # Ok(())
/// # }
/// ```
pub async fn produce_mcqs(pdf_bytes: &[u8], config: &McqConfig) -> Result<McqBatch, Pdf2McqError> {
    if pdf_bytes.is_empty() {
        return Err(Pdf2McqError::EmptyFile);
    }
    info!("Processing PDF: {} bytes", pdf_bytes.len());

    let extract_start = Instant::now();
    let raw = extract_text(pdf_bytes.to_vec()).await;
    debug!(
        "Extracted {} chars in {}ms",
        raw.chars().count(),
        extract_start.elapsed().as_millis()
    );

    produce_mcqs_from_text(&raw, config).await
}

/// Generate a quiz from a PDF on disk.
///
/// Rejects paths without a `.pdf` extension before reading the file.
pub async fn produce_mcqs_from_file(
    path: impl AsRef<Path>,
    config: &McqConfig,
) -> Result<McqBatch, Pdf2McqError> {
    let path = path.as_ref();
    if !has_pdf_extension(path) {
        return Err(Pdf2McqError::NotAPdf {
            path: path.to_path_buf(),
        });
    }
    if !path.exists() {
        return Err(Pdf2McqError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| Pdf2McqError::Internal(format!("reading '{}': {}", path.display(), e)))?;
    produce_mcqs(&bytes, config).await
}

/// Generate a quiz from already-extracted text, skipping PDF extraction.
pub async fn produce_mcqs_from_text(
    raw_text: &str,
    config: &McqConfig,
) -> Result<McqBatch, Pdf2McqError> {
    let total_start = Instant::now();

    // ── Step 1: Normalize ────────────────────────────────────────────────
    let text = Preprocessor::from_config(config).run(raw_text);
    let text_chars = text.chars().count();
    info!("Preprocessed text: {} chars", text_chars);
    if text_chars < config.min_text_chars {
        return Err(Pdf2McqError::TextTooShort {
            chars: text_chars,
            min: config.min_text_chars,
        });
    }

    // ── Step 2: Resolve the model ────────────────────────────────────────
    // An unresolvable model is a model failure: synthesise instead.
    let generator = if config.fallback_only {
        None
    } else {
        match resolve_generator(config) {
            Ok(generator) => Some(generator),
            Err(e) => {
                warn!("No model available, questions will be synthesised: {}", e);
                None
            }
        }
    };
    let questions = QuestionGenerator::new(generator, config.sampling)
        .with_system_prompt(config.system_prompt.clone());

    // ── Step 3: Generate candidates ──────────────────────────────────────
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let count = config.question_count.max(1);
    let (candidates, source) = questions.generate(&text, count, &mut rng).await;

    // ── Step 4: Validate ─────────────────────────────────────────────────
    let candidate_count = candidates.len();
    let valid = retain_valid(candidates);
    if valid.is_empty() {
        return Err(Pdf2McqError::GenerationFailed {
            candidates: candidate_count,
        });
    }
    if valid.len() < candidate_count {
        debug!(
            "Dropped {} invalid candidates",
            candidate_count - valid.len()
        );
    }

    info!(
        "Returning {} questions ({:?}) in {}ms",
        valid.len(),
        source,
        total_start.elapsed().as_millis()
    );
    for (i, mcq) in valid.iter().enumerate() {
        info!("Q{}: {}...", i + 1, truncate_chars(&mcq.question, SUMMARY_CHARS));
    }

    Ok(McqBatch::new(valid, source, questions.model_name(), text_chars))
}

/// Synchronous wrapper around [`produce_mcqs`].
///
/// Creates a temporary tokio runtime internally.
pub fn produce_mcqs_sync(pdf_bytes: &[u8], config: &McqConfig) -> Result<McqBatch, Pdf2McqError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Pdf2McqError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(produce_mcqs(pdf_bytes, config))
}

// ── Internal helpers ─────────────────────────────────────────────────────

fn create_provider(provider_name: &str, model: &str) -> Result<Arc<dyn LLMProvider>, Pdf2McqError> {
    ProviderFactory::create_llm_provider(provider_name, model).map_err(|e| {
        Pdf2McqError::ProviderNotConfigured {
            provider: provider_name.to_string(),
            hint: format!("{e}"),
        }
    })
}

fn named_generator(provider_name: &str, model: &str) -> Result<Arc<dyn TextGenerator>, Pdf2McqError> {
    let provider = create_provider(provider_name, model)?;
    Ok(Arc::new(LlmGenerator::new(
        provider,
        format!("{provider_name}/{model}"),
    )))
}

/// Resolve the text generator, from most-specific to least-specific.
///
/// 1. **Pre-built generator** (`config.generator`), used as-is.
/// 2. **Named provider + model** (`config.provider_name`); the provider reads
///    its API key from the environment.
/// 3. **Environment pair** ([`PROVIDER_ENV`] + [`MODEL_ENV`]), both set and
///    non-empty.
/// 4. **Auto-detection**: OpenAI when `OPENAI_API_KEY` is set, otherwise
///    whatever [`ProviderFactory::from_env`] finds.
///
/// The `produce_*` entry points log a resolution error and synthesise
/// questions instead of returning it.
pub fn resolve_generator(config: &McqConfig) -> Result<Arc<dyn TextGenerator>, Pdf2McqError> {
    // 1) Caller-supplied generator
    if let Some(ref generator) = config.generator {
        return Ok(Arc::clone(generator));
    }

    // 2) Provider name + model
    if let Some(ref name) = config.provider_name {
        let model = config.model.as_deref().unwrap_or(DEFAULT_MODEL);
        return named_generator(name, model);
    }

    // 3) Environment pair
    if let (Ok(prov), Ok(model)) = (std::env::var(PROVIDER_ENV), std::env::var(MODEL_ENV)) {
        if !prov.is_empty() && !model.is_empty() {
            return named_generator(&prov, &model);
        }
    }

    // 4) Auto-detect, OpenAI first when its key is present
    if let Ok(openai_key) = std::env::var("OPENAI_API_KEY") {
        if !openai_key.is_empty() {
            let model = config.model.as_deref().unwrap_or(DEFAULT_MODEL);
            return named_generator("openai", model);
        }
    }

    let (llm_provider, _embedding) =
        ProviderFactory::from_env().map_err(|e| Pdf2McqError::ProviderNotConfigured {
            provider: "auto".to_string(),
            hint: format!(
                "No LLM provider could be auto-detected from environment.\n\
                Set OPENAI_API_KEY, ANTHROPIC_API_KEY, or configure a provider,\n\
                or run with fallback_only to skip the model.\n\
                Error: {}",
                e
            ),
        })?;

    Ok(Arc::new(LlmGenerator::new(llm_provider, "auto")))
}

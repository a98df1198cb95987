//! # pdf2mcq
//!
//! Turn PDF documents into three-choice quizzes.
//!
//! Lecture notes and handouts carry a lot of text a quiz should ignore:
//! page numbers, repeated headers, copyright lines. This crate strips that
//! noise, keeps the most information-dense sentences, and asks a language
//! model for questions in a fixed format. Model output is parsed tolerantly;
//! when the model fails or produces too little, questions are synthesised
//! from definitions mined in the text, so a readable PDF always yields a
//! quiz.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF bytes
//!  │
//!  ├─ 1. Extract     page text via pdfium (spawn_blocking)
//!  ├─ 2. Normalize   noise filter → sentence ranking → stopwords → 1500-char cap
//!  ├─ 3. Generate    LLM prompt → tolerant parse
//!  │                 └─ on failure / low yield: facts → synthesised questions
//!  ├─ 4. Validate    exactly 3 non-empty choices, answer in range
//!  └─ 5. Output      McqBatch (questions + where they came from)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2mcq::{produce_mcqs_from_file, McqConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Provider auto-detected from OPENAI_API_KEY / ANTHROPIC_API_KEY / GEMINI_API_KEY
//!     let config = McqConfig::default();
//!     let batch = produce_mcqs_from_file("lecture.pdf", &config).await?;
//!     println!("{}", serde_json::to_string_pretty(&batch)?);
//!     Ok(())
//! }
//! ```
//!
//! Without any API key, set `fallback_only` to build questions from the
//! text alone:
//!
//! ```rust
//! use pdf2mcq::{produce_mcqs_from_text, McqConfig, QuestionSource};
//!
//! # tokio_test::block_on(async {
//! let config = McqConfig::builder().fallback_only(true).seed(1).build().unwrap();
//! let text = "Photosynthesis is the process plants use to convert light into energy. \
//!             Mitochondria are the powerhouse of the cell.";
//! let batch = produce_mcqs_from_text(text, &config).await.unwrap();
//! assert_eq!(batch.source, QuestionSource::Fallback);
//! # });
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2mcq` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! pdf2mcq = { version = "0.1", default-features = false }
//! ```
//!
//! ## Custom models
//!
//! Anything implementing [`TextGenerator`] can be injected through
//! [`McqConfigBuilder::generator`], e.g. a local model or a test double.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod produce;
pub mod prompts;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{McqConfig, McqConfigBuilder, SamplingConfig};
pub use error::{ExtractionError, GenerationError, Pdf2McqError};
pub use output::{Mcq, McqBatch, QuestionSource};
pub use pipeline::facts::{extract_facts, ExtractedFacts};
pub use pipeline::generate::{LlmGenerator, QuestionGenerator, TextGenerator};
pub use pipeline::preprocess::Preprocessor;
pub use produce::{
    produce_mcqs, produce_mcqs_from_file, produce_mcqs_from_text, produce_mcqs_sync,
    resolve_generator,
};
pub use prompts::McqPrompt;

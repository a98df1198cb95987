//! Error types for the pdf2mcq library.
//!
//! Three error types reflect three distinct failure modes:
//!
//! * [`Pdf2McqError`] (**fatal**): the request cannot produce a quiz
//!   (empty upload, not a PDF, too little text, nothing survived validation).
//!   Returned as `Err(Pdf2McqError)` from the top-level `produce_*` functions.
//!   Its `Display` string is the human-readable failure detail for the caller.
//!
//! * [`ExtractionError`] (**recovered**): the PDF library could not read the
//!   document. Logged and replaced by empty text, which then surfaces as
//!   [`Pdf2McqError::TextTooShort`] further down the pipeline.
//!
//! * [`GenerationError`] (**recovered**): the model call failed or its output
//!   was too sparse. The question generator matches on it to switch to the
//!   fallback synthesiser; it never reaches the caller.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdf2mcq library.
#[derive(Debug, Error)]
pub enum Pdf2McqError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The upload contained no bytes.
    #[error("Empty file")]
    EmptyFile,

    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// The input does not carry a `.pdf` extension.
    #[error("Only PDF files supported (got '{path}')")]
    NotAPdf { path: PathBuf },

    /// Preprocessing left too little text to build questions from.
    #[error("Text too short after preprocessing ({chars} chars, need at least {min})")]
    TextTooShort { chars: usize, min: usize },

    // ── Generation errors ─────────────────────────────────────────────────
    /// No candidate question survived structural validation.
    #[error("Generation failed: none of {candidates} candidate questions passed validation")]
    GenerationFailed { candidates: usize },

    /// The configured provider is not initialised (missing API key etc.).
    #[error("LLM provider '{provider}' is not configured.\n{hint}")]
    ProviderNotConfigured { provider: String, hint: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Server error: {0}")]
    Internal(String),
}

/// The PDF library could not produce text for a document.
#[derive(Debug, Clone, Error)]
pub enum ExtractionError {
    /// Neither `PDFIUM_LIB_PATH` nor the system library could be loaded.
    #[error("failed to bind to pdfium: {0}")]
    Bind(String),

    /// The bytes could not be opened as a PDF document.
    #[error("failed to open PDF: {0}")]
    Open(String),

    /// A page's text layer could not be read.
    #[error("page {page}: failed to read text: {detail}")]
    PageText { page: usize, detail: String },
}

/// Why model-based generation did not produce a usable set of questions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The model call itself failed.
    #[error("model call failed: {detail}")]
    ModelFailed { detail: String },

    /// The model answered, but fewer than half the requested questions parsed.
    #[error("only {parsed} of {requested} questions could be parsed from model output")]
    LowYield { parsed: usize, requested: usize },

    /// No model is configured for this run.
    #[error("model generation disabled")]
    Disabled,
}

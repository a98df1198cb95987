//! Output types: single questions and the batch returned to the caller.

use serde::{Deserialize, Serialize};

/// A multiple-choice question with exactly three choices.
///
/// Candidates come from the model parser or the fallback synthesiser and are
/// only handed to callers after [`crate::pipeline::validate::is_valid`]
/// accepted them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mcq {
    /// Question text, ending in `?`.
    pub question: String,
    /// Answer choices in display order.
    pub choices: Vec<String>,
    /// Position of the correct choice (0-based).
    #[serde(rename = "correctIndex")]
    pub correct_index: usize,
}

impl Mcq {
    pub fn new(question: impl Into<String>, choices: Vec<String>, correct_index: usize) -> Self {
        Self {
            question: question.into(),
            choices,
            correct_index,
        }
    }

    /// The text of the correct choice, if the index is in range.
    pub fn correct_choice(&self) -> Option<&str> {
        self.choices.get(self.correct_index).map(String::as_str)
    }
}

/// Where the questions of a batch came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionSource {
    /// Parsed from language-model output.
    Model,
    /// Synthesised from extracted facts and terms.
    Fallback,
}

/// The successful result of a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McqBatch {
    /// Always `true`; failures are reported as [`crate::Pdf2McqError`].
    pub success: bool,
    /// Validated questions, at most the requested count.
    pub questions: Vec<Mcq>,
    /// `questions.len()`, kept for API consumers.
    pub count: usize,
    /// Which path produced the questions.
    pub source: QuestionSource,
    /// Name of the generator consulted (`"fallback"` when the model was skipped).
    pub model: String,
    /// The text went through noise filtering, ranking and stopword trimming.
    pub preprocessed: bool,
    /// Length of the normalized text, in characters.
    pub text_chars: usize,
}

impl McqBatch {
    pub fn new(
        questions: Vec<Mcq>,
        source: QuestionSource,
        model: impl Into<String>,
        text_chars: usize,
    ) -> Self {
        Self {
            success: true,
            count: questions.len(),
            questions,
            source,
            model: model.into(),
            preprocessed: true,
            text_chars,
        }
    }
}

//! Integration tests for the full text-to-quiz pipeline.
//!
//! A scripted in-process generator stands in for the model, so these run
//! without network access or API keys. PDF extraction is only exercised on
//! inputs it must reject.

use futures::future::BoxFuture;
use pdf2mcq::pipeline::facts::extract_facts;
use pdf2mcq::pipeline::fallback::synthesize;
use pdf2mcq::pipeline::validate::{is_valid, retain_valid};
use pdf2mcq::{
    produce_mcqs, produce_mcqs_from_file, produce_mcqs_from_text, GenerationError, McqConfig,
    McqPrompt, Pdf2McqError, QuestionSource, SamplingConfig, TextGenerator,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ── Test helpers ─────────────────────────────────────────────────────────────

const BIOLOGY_NOTES: &str = "BIO 101 Lecture Notes\n\
    Page 1\n\
    Photosynthesis is the process plants use to convert light into energy.\n\
    Mitochondria are the powerhouse of the cell and produce ATP for Eukaryotes.\n\
    BIO 101 Lecture Notes\n\
    Page 2\n\
    Chloroplasts contain chlorophyll which absorbs red and blue light.\n\
    Ribosomes build proteins by joining amino acids in a chain.\n\
    BIO 101 Lecture Notes\n\
    Page 3\n\
    Copyright 2024 State University\n\
    The Nucleus stores DNA and controls the activities of the Cell.\n\
    BIO 101 Lecture Notes\n\
    Page 4";

/// Replays a fixed reply and counts how often it was asked.
struct Scripted {
    reply: Result<String, GenerationError>,
    calls: AtomicUsize,
}

impl Scripted {
    fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing(detail: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(GenerationError::ModelFailed {
                detail: detail.to_string(),
            }),
            calls: AtomicUsize::new(0),
        })
    }
}

impl TextGenerator for Scripted {
    fn name(&self) -> &str {
        "scripted-model"
    }

    fn generate<'a>(
        &'a self,
        prompt: &'a McqPrompt,
        _sampling: &'a SamplingConfig,
    ) -> BoxFuture<'a, Result<String, GenerationError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // Echo the rendered prompt like a raw completion model would.
        let reply = self
            .reply
            .clone()
            .map(|answer| format!("{}{}", prompt.render(), answer));
        Box::pin(async move { reply })
    }
}

fn config_with(generator: Arc<Scripted>) -> McqConfig {
    McqConfig::builder()
        .generator(generator)
        .seed(2024)
        .build()
        .unwrap()
}

const FIVE_QUESTIONS: &str = "\
Question 1: What process converts light into energy in plants?
A) Respiration
B) Photosynthesis
C) Fermentation
Correct: B

Question 2: Which organelle is the powerhouse of the cell?
A) Mitochondria
B) Nucleus
C) Ribosome
Correct: A

Question 3: What pigment absorbs light in chloroplasts?
A) Keratin
B) Melanin
C) Chlorophyll
Correct: C

Question 4: What do ribosomes build?
A) Proteins
B) Lipids
C) Sugars
Correct: A

Question 5: Where is DNA stored?
A) Membrane
B) Nucleus
C) Vacuole
Correct: B";

// ── Model path ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn model_output_is_parsed_and_returned() {
    let model = Scripted::replying(FIVE_QUESTIONS);
    let batch = produce_mcqs_from_text(BIOLOGY_NOTES, &config_with(model.clone()))
        .await
        .unwrap();

    assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    assert_eq!(batch.source, QuestionSource::Model);
    assert_eq!(batch.model, "scripted-model");
    assert_eq!(batch.count, 5);
    assert_eq!(batch.questions[0].correct_choice(), Some("Photosynthesis"));
    assert_eq!(batch.questions[4].question, "Where is DNA stored?");
    assert!(batch.text_chars <= 1500);
}

#[tokio::test]
async fn invalid_model_questions_are_dropped() {
    let reply = "Question 1: Short?\nA) a\nB) b\nC) c\nCorrect: A\n\
                 Question 2: Which organelle is the powerhouse of the cell?\n\
                 A) Mitochondria\nB) Nucleus\nC) Ribosome\nCorrect: A\n\
                 Question 3: Which molecule carries genetic information?\n\
                 A) DNA\nB) ATP\nC) Glucose\nCorrect: A";
    let config = McqConfig::builder()
        .generator(Scripted::replying(reply))
        .question_count(3)
        .build()
        .unwrap();
    let batch = produce_mcqs_from_text(BIOLOGY_NOTES, &config).await.unwrap();

    assert_eq!(batch.source, QuestionSource::Model);
    assert_eq!(batch.count, 2, "the too-short question is dropped");
    assert!(batch.questions.iter().all(is_valid));
}

#[tokio::test]
async fn never_returns_more_than_requested() {
    let config = McqConfig::builder()
        .generator(Scripted::replying(FIVE_QUESTIONS))
        .question_count(2)
        .build()
        .unwrap();
    let batch = produce_mcqs_from_text(BIOLOGY_NOTES, &config).await.unwrap();
    assert_eq!(batch.count, 2);
}

// ── Degrade path ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn model_failure_uses_fallback() {
    let model = Scripted::failing("CUDA out of memory");
    let batch = produce_mcqs_from_text(BIOLOGY_NOTES, &config_with(model.clone()))
        .await
        .unwrap();

    assert_eq!(model.calls.load(Ordering::SeqCst), 1, "no retry");
    assert_eq!(batch.source, QuestionSource::Fallback);
    assert!(batch.count >= 1);
    assert!(batch.questions.iter().all(is_valid));
}

#[tokio::test]
async fn low_yield_uses_fallback() {
    let one = "Question 1: What do ribosomes build?\nA) Proteins\nB) Lipids\nC) Sugars\nCorrect: A";
    let batch = produce_mcqs_from_text(BIOLOGY_NOTES, &config_with(Scripted::replying(one)))
        .await
        .unwrap();
    assert_eq!(batch.source, QuestionSource::Fallback);
}

#[tokio::test]
async fn unparseable_output_uses_fallback() {
    let reply = "Sure! Here are some great questions about biology for you.";
    let batch = produce_mcqs_from_text(BIOLOGY_NOTES, &config_with(Scripted::replying(reply)))
        .await
        .unwrap();
    assert_eq!(batch.source, QuestionSource::Fallback);
    for mcq in &batch.questions {
        let answer = mcq.correct_choice().unwrap();
        assert!(
            !["Unknown", "None", "Other"].contains(&answer),
            "padding literal used as answer: {mcq:?}"
        );
    }
}

#[tokio::test]
async fn missing_provider_uses_fallback() {
    for var in [
        "OPENAI_API_KEY",
        "ANTHROPIC_API_KEY",
        "GEMINI_API_KEY",
        "PDF2MCQ_LLM_PROVIDER",
        "PDF2MCQ_MODEL",
    ] {
        std::env::remove_var(var);
    }

    let batch = produce_mcqs_from_text(BIOLOGY_NOTES, &McqConfig::default())
        .await
        .unwrap();
    assert_eq!(batch.source, QuestionSource::Fallback);
    assert!(batch.count >= 1);
    assert!(batch.questions.iter().all(is_valid));
}

#[test]
fn worked_example_produces_two_questions() {
    let extracted = extract_facts(
        "Photosynthesis is the process plants use to convert light into energy. \
         Mitochondria are the powerhouse of the cell.",
    );
    assert_eq!(
        extracted.facts.get("Photosynthesis").map(String::as_str),
        Some("the process plants use to convert")
    );
    assert_eq!(
        extracted.facts.get("Mitochondria").map(String::as_str),
        Some("the powerhouse of the cell")
    );

    let mut rng = StdRng::seed_from_u64(17);
    let mcqs = synthesize(&extracted, 2, &mut rng);
    assert_eq!(mcqs.len(), 2);
    assert_eq!(mcqs[0].correct_choice(), Some("Photosynthesis"));
    assert_eq!(mcqs[1].correct_choice(), Some("Mitochondria"));
    assert_eq!(retain_valid(mcqs.clone()), mcqs);
}

// ── Input errors ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_upload_is_rejected() {
    let err = produce_mcqs(b"", &McqConfig::default()).await.unwrap_err();
    assert!(matches!(err, Pdf2McqError::EmptyFile));
}

#[tokio::test]
async fn noise_only_text_is_too_short() {
    let config = config_with(Scripted::replying(FIVE_QUESTIONS));
    let err = produce_mcqs_from_text("Page 1\nPage 2\n3\n\n", &config)
        .await
        .unwrap_err();
    assert!(
        matches!(err, Pdf2McqError::TextTooShort { chars: 0, min: 50 }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn unreadable_pdf_is_too_short() {
    let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    file.write_all(b"%PDF-1.7 this is not really a pdf").unwrap();

    let config = McqConfig::builder().fallback_only(true).build().unwrap();
    let err = produce_mcqs_from_file(file.path(), &config).await.unwrap_err();
    assert!(matches!(err, Pdf2McqError::TextTooShort { .. }), "got {err:?}");
}

#[tokio::test]
async fn non_pdf_extension_is_rejected_before_reading() {
    let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    let err = produce_mcqs_from_file(file.path(), &McqConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Pdf2McqError::NotAPdf { .. }));
}

// ── Output shape ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn batch_serialises_like_the_upload_response() {
    let batch = produce_mcqs_from_text(BIOLOGY_NOTES, &config_with(Scripted::replying(FIVE_QUESTIONS)))
        .await
        .unwrap();
    let json = serde_json::to_value(&batch).unwrap();

    assert_eq!(json["success"], true);
    assert_eq!(json["count"], 5);
    assert_eq!(json["source"], "model");
    assert_eq!(json["preprocessed"], true);
    assert_eq!(json["questions"][1]["correctIndex"], 0);
    assert_eq!(json["questions"][1]["choices"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn seeded_fallback_is_reproducible() {
    let config = McqConfig::builder()
        .fallback_only(true)
        .seed(5)
        .build()
        .unwrap();
    let first = produce_mcqs_from_text(BIOLOGY_NOTES, &config).await.unwrap();
    let second = produce_mcqs_from_text(BIOLOGY_NOTES, &config).await.unwrap();
    assert_eq!(first.questions, second.questions);
    assert_eq!(first.model, "fallback");
}

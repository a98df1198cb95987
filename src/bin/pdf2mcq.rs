//! CLI binary for pdf2mcq.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `McqConfig` and prints the quiz.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2mcq::{produce_mcqs_from_file, McqBatch, McqConfig, QuestionSource};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const CHOICE_LETTERS: [char; 3] = ['A', 'B', 'C'];

const AFTER_HELP: &str = r#"EXAMPLES:
  # Five questions, printed as a quiz
  pdf2mcq lecture.pdf

  # Ten questions as JSON
  pdf2mcq --count 10 --json lecture.pdf > quiz.json

  # No model at all: questions synthesised from the text
  pdf2mcq --offline --seed 42 lecture.pdf

  # Use a specific model
  pdf2mcq --provider anthropic --model claude-haiku-4-20250514 lecture.pdf

ENVIRONMENT VARIABLES:
  OPENAI_API_KEY          OpenAI API key
  ANTHROPIC_API_KEY       Anthropic API key
  GEMINI_API_KEY          Google Gemini API key
  PDF2MCQ_LLM_PROVIDER    Provider used when --provider is absent (needs PDF2MCQ_MODEL)
  PDF2MCQ_MODEL           Model ID
  PDFIUM_LIB_PATH         Path to libpdfium; the system library is used otherwise
  RUST_LOG                Log filter, overrides --verbose/--quiet
"#;

/// Generate multiple-choice quizzes from PDF documents.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2mcq",
    version,
    about = "Generate multiple-choice quizzes from PDF documents",
    long_about = "Extract the text of a PDF, keep its most informative sentences, and turn \
them into three-choice questions with an LLM. When the model fails or returns too few \
questions, they are synthesised from definitions found in the text instead.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file path.
    input: PathBuf,

    /// Write the JSON batch to this file instead of printing the quiz.
    #[arg(short, long, env = "PDF2MCQ_OUTPUT")]
    output: Option<PathBuf>,

    /// Number of questions to generate.
    #[arg(short = 'n', long, env = "PDF2MCQ_COUNT", default_value_t = 5,
          value_parser = clap::value_parser!(u16).range(1..=50))]
    count: u16,

    /// LLM model ID (e.g. gpt-4.1-nano, gpt-4.1-mini, claude-haiku-4-20250514).
    #[arg(long, env = "PDF2MCQ_MODEL")]
    model: Option<String>,

    /// LLM provider: openai, anthropic, gemini, ollama, azure.
    #[arg(
        long,
        env = "PDF2MCQ_PROVIDER",
        long_help = "LLM provider. Auto-detected from API key env vars if not set.\n\
          Supported: openai, anthropic, gemini, azure, ollama, or any OpenAI-compatible URL."
    )]
    provider: Option<String>,

    /// Skip the model; synthesise questions from the text only.
    #[arg(long, env = "PDF2MCQ_OFFLINE")]
    offline: bool,

    /// Seed for choice shuffling (reproducible output).
    #[arg(long, env = "PDF2MCQ_SEED")]
    seed: Option<u64>,

    /// Path to a text file containing a custom system prompt.
    #[arg(long, env = "PDF2MCQ_SYSTEM_PROMPT")]
    system_prompt: Option<PathBuf>,

    /// Max LLM output tokens.
    #[arg(long, env = "PDF2MCQ_MAX_TOKENS", default_value_t = 800)]
    max_tokens: usize,

    /// LLM temperature (0.0–2.0).
    #[arg(long, env = "PDF2MCQ_TEMPERATURE", default_value_t = 0.6)]
    temperature: f32,

    /// Nucleus sampling threshold.
    #[arg(long, env = "PDF2MCQ_TOP_P", default_value_t = 0.9)]
    top_p: f32,

    /// Repetition penalty (1.0 = off), sent as a frequency penalty.
    #[arg(long, env = "PDF2MCQ_REPETITION_PENALTY", default_value_t = 1.3)]
    repetition_penalty: f32,

    /// Character cap on the text sent to the model.
    #[arg(long, env = "PDF2MCQ_MAX_CHARS", default_value_t = 1500)]
    max_chars: usize,

    /// Output the batch as JSON instead of a readable quiz.
    #[arg(long, env = "PDF2MCQ_JSON")]
    json: bool,

    /// Disable the spinner.
    #[arg(long, env = "PDF2MCQ_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2MCQ_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2MCQ_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner replaces INFO-level library logs unless --verbose.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = build_config(&cli).await?;

    let spinner = show_progress.then(|| {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_prefix("Generating");
        bar.set_message(format!("{} questions from {}", cli.count, cli.input.display()));
        bar.enable_steady_tick(Duration::from_millis(80));
        bar
    });

    let start = Instant::now();
    let result = produce_mcqs_from_file(&cli.input, &config).await;
    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
    let batch = result.context("Quiz generation failed")?;

    if let Some(ref output_path) = cli.output {
        let json = serde_json::to_string_pretty(&batch).context("Failed to serialise output")?;
        tokio::fs::write(output_path, json)
            .await
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
    } else if cli.json {
        let json = serde_json::to_string_pretty(&batch).context("Failed to serialise output")?;
        println!("{json}");
    } else {
        print_quiz(&batch);
    }

    if !cli.quiet && !cli.json {
        print_summary(&batch, start.elapsed(), cli.output.as_ref());
    }

    Ok(())
}

/// Map CLI args to `McqConfig`.
async fn build_config(cli: &Cli) -> Result<McqConfig> {
    let mut builder = McqConfig::builder()
        .question_count(cli.count as usize)
        .max_chars(cli.max_chars)
        .max_new_tokens(cli.max_tokens)
        .temperature(cli.temperature)
        .top_p(cli.top_p)
        .repetition_penalty(cli.repetition_penalty)
        .fallback_only(cli.offline);

    if let Some(ref path) = cli.system_prompt {
        let prompt = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read system prompt from {:?}", path))?;
        builder = builder.system_prompt(prompt);
    }
    if let Some(ref model) = cli.model {
        builder = builder.model(model.clone());
    }
    if let Some(ref provider) = cli.provider {
        builder = builder.provider_name(provider.clone());
    }
    if let Some(seed) = cli.seed {
        builder = builder.seed(seed);
    }

    builder.build().context("Invalid configuration")
}

fn print_quiz(batch: &McqBatch) {
    for (i, mcq) in batch.questions.iter().enumerate() {
        println!("{}", bold(&format!("{}. {}", i + 1, mcq.question)));
        for (letter, choice) in CHOICE_LETTERS.iter().zip(&mcq.choices) {
            println!("   {letter}) {choice}");
        }
        if let Some(letter) = CHOICE_LETTERS.get(mcq.correct_index) {
            println!("   {}", dim(&format!("Correct: {letter}")));
        }
        println!();
    }
}

fn print_summary(batch: &McqBatch, elapsed: Duration, output: Option<&PathBuf>) {
    let (mark, source) = match batch.source {
        QuestionSource::Model => (green("✔"), format!("from {}", batch.model)),
        QuestionSource::Fallback => (yellow("⚠"), "synthesised from the text".to_string()),
    };
    let target = output
        .map(|p| format!("  →  {}", bold(&p.display().to_string())))
        .unwrap_or_default();
    eprintln!(
        "{mark} {} questions {source}  {}{target}",
        bold(&batch.count.to_string()),
        dim(&format!("{}ms, {} chars of text", elapsed.as_millis(), batch.text_chars)),
    );
}

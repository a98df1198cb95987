//! Prompts for model-based quiz generation.
//!
//! The output format described in [`DEFAULT_SYSTEM_PROMPT`] is exactly what
//! [`crate::pipeline::parse`] expects first (`Question N:` blocks, lettered
//! choices, a `Correct:` line). Change both together.
//!
//! Callers can override the system prompt via
//! [`crate::config::McqConfig::system_prompt`].

/// Default system prompt: the quiz format the parser understands.
pub const DEFAULT_SYSTEM_PROMPT: &str = r#"You are a quiz creator. Generate questions in this exact format:

Question 1: [question text]?
A) [choice]
B) [choice]
C) [choice]
Correct: A
"#;

/// Marker preceding the model's turn in the chat template.
pub const ASSISTANT_MARKER: &str = "<|assistant|>";

const SYSTEM_MARKER: &str = "<|system|>";
const USER_MARKER: &str = "<|user|>";
const END_OF_TURN: &str = "</s>";

/// A prompt split into its system instruction and user request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McqPrompt {
    pub system: String,
    pub user: String,
}

impl McqPrompt {
    /// Build the prompt asking for `count` questions about `text`.
    pub fn new(text: &str, count: usize, system_override: Option<&str>) -> Self {
        Self {
            system: system_override.unwrap_or(DEFAULT_SYSTEM_PROMPT).to_string(),
            user: user_request(text, count),
        }
    }

    /// Render as a single chat-template string for raw completion models.
    ///
    /// Ends with [`ASSISTANT_MARKER`] so the completion starts with the answer.
    pub fn render(&self) -> String {
        format!(
            "{SYSTEM_MARKER}\n{}\n{END_OF_TURN}\n{USER_MARKER}\n{}{END_OF_TURN}\n{ASSISTANT_MARKER}\n",
            self.system.trim_end(),
            self.user
        )
    }
}

fn user_request(text: &str, count: usize) -> String {
    format!(
        "Create {count} multiple choice questions from this text. Each question must have exactly 3 answer choices (A, B, C) and indicate the correct answer.\n\n\
         Text:\n{text}\n\n\
         Create {count} questions now:"
    )
}

/// Keep only what follows the last assistant marker, trimmed.
///
/// Completion backends often echo the whole prompt; chat backends return the
/// answer alone, in which case the text is returned as is.
pub fn after_assistant_marker(generated: &str) -> &str {
    generated
        .rsplit(ASSISTANT_MARKER)
        .next()
        .unwrap_or(generated)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_count_and_text() {
        let p = McqPrompt::new("Cells divide by mitosis.", 5, None);
        assert!(p.user.contains("Create 5 multiple choice questions"));
        assert!(p.user.contains("Cells divide by mitosis."));
        assert!(p.system.contains("Correct: A"));
    }

    #[test]
    fn system_override_replaces_default() {
        let p = McqPrompt::new("x", 3, Some("Be brief."));
        assert_eq!(p.system, "Be brief.");
    }

    #[test]
    fn render_ends_with_assistant_turn() {
        let rendered = McqPrompt::new("body", 2, None).render();
        assert!(rendered.starts_with("<|system|>"));
        assert!(rendered.trim_end().ends_with(ASSISTANT_MARKER));
        assert!(rendered.contains("<|user|>"));
    }

    #[test]
    fn strips_echoed_prompt() {
        let echoed = "<|system|>\nrules\n</s>\n<|assistant|>\n  Question 1: Why?  ";
        assert_eq!(after_assistant_marker(echoed), "Question 1: Why?");
    }

    #[test]
    fn text_without_marker_is_kept() {
        assert_eq!(after_assistant_marker("  Question 1: Why?\n"), "Question 1: Why?");
    }
}

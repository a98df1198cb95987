//! Tolerant parsing of model output into question candidates.
//!
//! Models drift from the requested format, so blocks are located with an
//! ordered list of strategies and the first strategy that finds anything
//! wins (results are never merged):
//!
//! 1. `Question N:` markers anywhere in the text
//! 2. lines starting with `N.` or `QN:`
//!
//! Inside a block the first line is the question; lines such as `A) …`,
//! `b. …` or `C: …` are choices, and `Correct: B` / `Answer B` names the
//! answer. Candidates are not validated here.

use crate::output::Mcq;
use once_cell::sync::Lazy;
use regex::Regex;

static RE_QUESTION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Question\s+\d+:\s*").unwrap());

static RE_NUMBERED_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^(?:\d+\.|Q\d+:)\s*").unwrap());

static RE_CHOICE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^([ABC])[).:]\s*(.+)").unwrap());

static RE_CORRECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:Correct|Answer):?\s*([ABC])").unwrap());

const CHOICES_PER_QUESTION: usize = 3;
const MIN_BLOCK_LINES: usize = 4;

/// Locates question blocks; returns an empty list when its format is absent.
type BlockStrategy = fn(&str) -> Vec<&str>;

const BLOCK_STRATEGIES: [BlockStrategy; 2] = [question_marker_blocks, numbered_blocks];

/// Parse up to `target` question candidates from generated text.
pub fn parse_mcqs(text: &str, target: usize) -> Vec<Mcq> {
    let blocks = BLOCK_STRATEGIES
        .iter()
        .map(|strategy| strategy(text))
        .find(|blocks| !blocks.is_empty())
        .unwrap_or_default();

    blocks
        .into_iter()
        .filter_map(parse_block)
        .take(target)
        .collect()
}

fn question_marker_blocks(text: &str) -> Vec<&str> {
    split_at_markers(text, &RE_QUESTION_MARKER)
}

fn numbered_blocks(text: &str) -> Vec<&str> {
    split_at_markers(text, &RE_NUMBERED_MARKER)
}

/// Text between the end of each marker and the start of the next one.
fn split_at_markers<'t>(text: &'t str, marker: &Regex) -> Vec<&'t str> {
    let markers: Vec<_> = marker.find_iter(text).collect();
    markers
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let end = markers.get(i + 1).map_or(text.len(), |next| next.start());
            &text[m.end()..end]
        })
        .filter(|block| !block.trim().is_empty())
        .collect()
}

fn parse_block(block: &str) -> Option<Mcq> {
    let lines: Vec<&str> = block
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.len() < MIN_BLOCK_LINES {
        return None;
    }

    let question = normalise_question(lines[0]);

    let mut choices = Vec::new();
    let mut correct_index = 0;
    for line in &lines[1..] {
        if let Some(caps) = RE_CHOICE.captures(line) {
            choices.push(caps[2].trim().to_string());
        }
        if let Some(caps) = RE_CORRECT.captures(line) {
            correct_index = letter_index(&caps[1]);
        }
    }

    if choices.len() < CHOICES_PER_QUESTION {
        return None;
    }
    choices.truncate(CHOICES_PER_QUESTION);

    Some(Mcq::new(
        question,
        choices,
        correct_index.min(CHOICES_PER_QUESTION - 1),
    ))
}

/// Strip `?`/`:` from both ends, then make sure it ends with `?`.
///
/// A line of only punctuation becomes `"?"`; validation rejects it later.
fn normalise_question(line: &str) -> String {
    let core = line.trim_matches(['?', ':']).trim();
    format!("{core}?")
}

fn letter_index(letter: &str) -> usize {
    match letter.to_ascii_uppercase().as_str() {
        "B" => 1,
        "C" => 2,
        _ => 0,
    }
}

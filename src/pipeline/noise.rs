//! Noise filtering: drop headers, footers, page numbers and boilerplate.
//!
//! Extracted PDF text repeats its running header and footer on every page and
//! scatters page numbers between paragraphs. None of it is quiz material, and
//! left in place it dominates term frequencies in the ranker.
//!
//! A line is discarded when any rule fires:
//! 1. blank after trimming
//! 2. a page number (`7`, `Page 7`, `7 of 12`)
//! 3. shorter than `min_line_chars` once trimmed
//! 4. its exact text occurs more than `max_line_repeats` times in the document
//! 5. contains a copyright or confidentiality marker
//!
//! Kept lines are trimmed and joined with single spaces: the result is one
//! text stream for the sentence splitter.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static RE_PAGE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:page\s*)?\d+(?:\s*of\s*\d+)?$").unwrap());

const BOILERPLATE_MARKERS: [&str; 4] = ["copyright", "©", "all rights reserved", "confidential"];

/// Line-level noise filter with tunable thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoiseFilter {
    /// Trimmed lines shorter than this are dropped.
    pub min_line_chars: usize,
    /// Lines seen more often than this are dropped.
    pub max_line_repeats: usize,
}

impl Default for NoiseFilter {
    fn default() -> Self {
        Self {
            min_line_chars: 10,
            max_line_repeats: 3,
        }
    }
}

impl NoiseFilter {
    pub fn new(min_line_chars: usize, max_line_repeats: usize) -> Self {
        Self {
            min_line_chars,
            max_line_repeats,
        }
    }

    /// Remove noise lines and join the survivors with single spaces.
    pub fn apply(&self, text: &str) -> String {
        let lines: Vec<&str> = text.split('\n').collect();

        // Frequencies are counted on the untrimmed lines, per document.
        let mut line_freq: HashMap<&str, usize> = HashMap::new();
        for line in &lines {
            *line_freq.entry(line).or_insert(0) += 1;
        }

        lines
            .iter()
            .filter(|line| !self.is_noise(line, line_freq[*line]))
            .map(|line| line.trim())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn is_noise(&self, line: &str, occurrences: usize) -> bool {
        let trimmed = line.trim();
        if trimmed.is_empty() || RE_PAGE_NUMBER.is_match(trimmed) {
            return true;
        }
        if trimmed.chars().count() < self.min_line_chars {
            return true;
        }
        if occurrences > self.max_line_repeats {
            return true;
        }
        let lower = trimmed.to_lowercase();
        BOILERPLATE_MARKERS.iter().any(|m| lower.contains(m))
    }
}

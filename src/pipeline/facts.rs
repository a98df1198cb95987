//! Fact and term mining from normalized text.
//!
//! Two definitional patterns run on every sentence, in order, and both may
//! fire:
//!
//! 1. copula: `Photosynthesis is the process …`
//! 2. possession: `Chloroplasts contain chlorophyll …`
//!
//! Each match records `term → short description` in the [`FactsIndex`] and
//! the term in the [`TermList`]. Independently, every capitalised word of the
//! sentence is collected as a term. The term list is what the fallback
//! synthesiser draws distractors from.

use crate::pipeline::rank::starts_uppercase;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Term → description (≤ 6 words), iterated in discovery order.
pub type FactsIndex = IndexMap<String, String>;

/// Distinct candidate terms in discovery order.
pub type TermList = Vec<String>;

pub const MAX_TERMS: usize = 20;
const MAX_DESCRIPTION_WORDS: usize = 6;
const MIN_SENTENCE_CHARS: usize = 20;
const MIN_SENTENCE_WORDS: usize = 5;

/// Never used as fact keys.
pub const GENERIC_TERMS: [&str; 6] = ["The", "This", "That", "Review", "Guide", "Overview"];

/// Extra words skipped when collecting standalone capitalised terms.
const GENERIC_STANDALONE: [&str; 2] = ["Computer", "Parts"];

/// Ordered definitional patterns; group 1 is the term, group 2 the description.
static FACT_PATTERNS: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(r"([A-Z][A-Za-z]+(?:\s+[A-Z][A-Za-z]+)?)\s+(?:is|are)\s+(.+)").unwrap(),
        Regex::new(
            r"([A-Z][A-Za-z]+(?:\s+[A-Z][A-Za-z]+)?)\s+(?:has|have|provides?|contains?|includes?)\s+(.+)",
        )
        .unwrap(),
    ]
});

const WORD_PUNCTUATION: &[char] = &['.', ',', ';', ':', '(', ')', '[', ']', '{', '}', '\'', '"'];

/// Facts and terms mined from one text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFacts {
    pub facts: FactsIndex,
    pub terms: TermList,
}

impl ExtractedFacts {
    fn add_term(&mut self, term: &str) {
        if !self.terms.iter().any(|t| t == term) {
            self.terms.push(term.to_string());
        }
    }
}

/// Mine facts and up to [`MAX_TERMS`] terms from `text`.
pub fn extract_facts(text: &str) -> ExtractedFacts {
    let mut out = ExtractedFacts::default();

    for sentence in text.split('.').map(str::trim) {
        if sentence.chars().count() <= MIN_SENTENCE_CHARS {
            continue;
        }
        // Titles and fragments.
        if is_all_uppercase(sentence) || sentence.split_whitespace().count() < MIN_SENTENCE_WORDS
        {
            continue;
        }

        for pattern in FACT_PATTERNS.iter() {
            let Some(caps) = pattern.captures(sentence) else {
                continue;
            };
            let term = caps[1].trim();
            let description = short_description(&caps[2]);
            if GENERIC_TERMS.contains(&term) || description.is_empty() {
                continue;
            }
            out.facts.insert(term.to_string(), description);
            out.add_term(term);
        }

        for word in sentence.split_whitespace() {
            let clean = word.trim_matches(WORD_PUNCTUATION);
            if clean.chars().count() > 2
                && starts_uppercase(clean)
                && !GENERIC_TERMS.contains(&clean)
                && !GENERIC_STANDALONE.contains(&clean)
            {
                out.add_term(clean);
            }
        }
    }

    out.terms.truncate(MAX_TERMS);
    out
}

/// First six words, trailing `.,;:` removed.
fn short_description(raw: &str) -> String {
    raw.split_whitespace()
        .take(MAX_DESCRIPTION_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end_matches(['.', ',', ';', ':'])
        .to_string()
}

fn is_all_uppercase(s: &str) -> bool {
    s.chars().any(char::is_uppercase) && !s.chars().any(char::is_lowercase)
}

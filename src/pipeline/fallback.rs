//! Deterministic question synthesis from extracted facts and terms.
//!
//! The last line of defence when the model fails or under-produces. Output
//! is plain but always structurally valid:
//!
//! 1. **Fact questions**: for each fact, "Which is <description>?" with the
//!    term as the answer and two unused terms as distractors.
//! 2. **Term triplets**: while more are needed and three unused terms
//!    remain, "What is discussed in the text?" over the next three terms.
//!
//! A term answers at most one question. Choice order comes from the caller's
//! RNG so tests can pin outcomes with a seeded or mock generator.

use crate::output::Mcq;
use crate::pipeline::facts::ExtractedFacts;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use tracing::info;

const DESCRIPTION_WORDS_IN_QUESTION: usize = 5;
const PADDING_CHOICES: [&str; 3] = ["Unknown", "None", "Other"];
const TRIPLET_QUESTION: &str = "What is discussed in the text?";

/// Build up to `target` questions from `extracted`.
pub fn synthesize<R: Rng + ?Sized>(
    extracted: &ExtractedFacts,
    target: usize,
    rng: &mut R,
) -> Vec<Mcq> {
    info!(
        "Creating fallback questions from {} facts and {} terms",
        extracted.facts.len(),
        extracted.terms.len()
    );

    let mut mcqs = Vec::with_capacity(target);
    let mut used: HashSet<&str> = HashSet::new();

    for (term, description) in &extracted.facts {
        if mcqs.len() >= target {
            break;
        }
        if !used.insert(term.as_str()) {
            continue;
        }

        let mut distractors: Vec<&str> = extracted
            .terms
            .iter()
            .map(String::as_str)
            .filter(|t| *t != term && !used.contains(t))
            .take(2)
            .collect();
        for pad in PADDING_CHOICES {
            if distractors.len() == 2 {
                break;
            }
            if pad != term && !distractors.contains(&pad) {
                distractors.push(pad);
            }
        }

        let mut choices = vec![term.clone()];
        choices.extend(distractors.into_iter().map(str::to_string));
        choices.shuffle(rng);
        let correct_index = position_of(&choices, term);

        mcqs.push(Mcq::new(
            format!("Which is {}?", leading_words(description)),
            choices,
            correct_index,
        ));
    }

    while mcqs.len() < target {
        let available: Vec<&str> = extracted
            .terms
            .iter()
            .map(String::as_str)
            .filter(|t| !used.contains(t))
            .take(3)
            .collect();
        if available.len() < 3 {
            break;
        }
        used.extend(available.iter().copied());

        let correct = available[0];
        let mut choices: Vec<String> = available.iter().map(|t| t.to_string()).collect();
        choices.shuffle(rng);
        let correct_index = position_of(&choices, correct);

        mcqs.push(Mcq::new(TRIPLET_QUESTION, choices, correct_index));
    }

    mcqs.truncate(target);
    info!("Created {} fallback questions", mcqs.len());
    mcqs
}

fn leading_words(description: &str) -> String {
    description
        .split_whitespace()
        .take(DESCRIPTION_WORDS_IN_QUESTION)
        .collect::<Vec<_>>()
        .join(" ")
}

fn position_of(choices: &[String], answer: &str) -> usize {
    choices.iter().position(|c| c == answer).unwrap_or_default()
}

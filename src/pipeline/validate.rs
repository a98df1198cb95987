//! Structural validation of question candidates.

use crate::output::Mcq;

const REQUIRED_CHOICES: usize = 3;
const MIN_QUESTION_CHARS: usize = 10;

/// `true` when `mcq` may be returned to a caller: a question longer than ten
/// characters, exactly three non-empty choices, and an in-range answer index.
pub fn is_valid(mcq: &Mcq) -> bool {
    mcq.choices.len() == REQUIRED_CHOICES
        && mcq.correct_index < REQUIRED_CHOICES
        && mcq.question.chars().count() > MIN_QUESTION_CHARS
        && mcq.choices.iter().all(|c| !c.is_empty())
}

/// Keep the valid candidates, in order. Invalid ones are dropped, not repaired.
pub fn retain_valid(candidates: Vec<Mcq>) -> Vec<Mcq> {
    candidates.into_iter().filter(is_valid).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mcq(question: &str, choices: &[&str], correct_index: usize) -> Mcq {
        Mcq::new(
            question,
            choices.iter().map(|c| c.to_string()).collect(),
            correct_index,
        )
    }

    #[test]
    fn accepts_well_formed_question() {
        assert!(is_valid(&mcq("Which gas do plants absorb?", &["O2", "CO2", "N2"], 1)));
    }

    #[test]
    fn rejects_wrong_choice_count() {
        assert!(!is_valid(&mcq("Which gas do plants absorb?", &["O2", "CO2"], 0)));
        assert!(!is_valid(&mcq(
            "Which gas do plants absorb?",
            &["O2", "CO2", "N2", "He"],
            0
        )));
    }

    #[test]
    fn rejects_out_of_range_index() {
        assert!(!is_valid(&mcq("Which gas do plants absorb?", &["O2", "CO2", "N2"], 3)));
    }

    #[test]
    fn rejects_short_question() {
        // Exactly ten characters is not enough.
        assert!(!is_valid(&mcq("Which is ?", &["a", "b", "c"], 0)));
        assert!(is_valid(&mcq("Which is x?", &["a", "b", "c"], 0)));
    }

    #[test]
    fn rejects_empty_choice() {
        assert!(!is_valid(&mcq("Which gas do plants absorb?", &["O2", "", "N2"], 0)));
    }

    #[test]
    fn retain_valid_preserves_order() {
        let kept = retain_valid(vec![
            mcq("First valid question?", &["a", "b", "c"], 0),
            mcq("Bad?", &["a", "b", "c"], 0),
            mcq("Second valid question?", &["a", "b", "c"], 2),
        ]);
        let questions: Vec<&str> = kept.iter().map(|m| m.question.as_str()).collect();
        assert_eq!(questions, vec!["First valid question?", "Second valid question?"]);
    }
}

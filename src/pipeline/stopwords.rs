//! Light, context-aware stopword removal.
//!
//! Only a short list of function words is dropped, and only mid-sentence:
//! a stopword opening the text or a sentence, or standing right before a
//! capitalised word ("the Krebs cycle"), is kept so terms stay readable.
//! Tokens are whitespace-delimited; punctuation stays attached.

const STOPWORDS: [&str; 20] = [
    "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "as", "by", "with",
    "up", "about", "into", "through", "during",
];

fn is_stopword(word: &str) -> bool {
    let lower = word.to_lowercase();
    STOPWORDS.contains(&lower.as_str())
}

/// Drop stopwords that are neither sentence-initial nor next to a term.
pub fn trim_stopwords(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();

    words
        .iter()
        .enumerate()
        .filter(|&(i, word)| {
            if !is_stopword(word) {
                return true;
            }
            let sentence_start = i == 0 || words[i - 1].ends_with('.');
            let before_term = words
                .get(i + 1)
                .is_some_and(|next| super::rank::starts_uppercase(next));
            sentence_start || before_term
        })
        .map(|(_, word)| *word)
        .collect::<Vec<_>>()
        .join(" ")
}

use super::stopwords::STOP_WORDS;

/// Lower-cased alphanumeric word tokens of length >= 2, stop words
/// removed.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.chars().count() >= 2)
        .map(|word| word.to_lowercase())
        .filter(|word| !STOP_WORDS.contains(word.as_str()))
        .collect()
}

/// Index terms for a document or query: unigrams plus adjacent-pair
/// bigrams over the stop-word-filtered token stream.
pub fn terms(text: &str) -> Vec<String> {
    let tokens = tokenize(text);
    let mut terms = tokens.clone();
    for pair in tokens.windows(2) {
        terms.push(format!("{} {}", pair[0], pair[1]));
    }
    terms
}

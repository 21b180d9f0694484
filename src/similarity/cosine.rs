//! Term-frequency cosine similarity between element names.

use std::collections::BTreeMap;

use unicode_segmentation::UnicodeSegmentation;

/// Lowercased words of `text` with punctuation stripped
pub fn normalize_tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .unicode_words()
        .map(|word| word.chars().filter(|c| c.is_alphanumeric()).collect::<String>())
        .filter(|word| !word.is_empty())
        .collect()
}

fn term_frequencies(tokens: &[String]) -> BTreeMap<&str, u64> {
    let mut counts = BTreeMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Cosine of the term-frequency vectors of two texts, in [0, 1].
///
/// Symmetric, exactly 1.0 for identical token multisets, and 0.0 when the
/// texts share no token (empty texts included).
pub fn semantic_similarity(text1: &str, text2: &str) -> f64 {
    let tokens1 = normalize_tokens(text1);
    let tokens2 = normalize_tokens(text2);
    if tokens1.is_empty() || tokens2.is_empty() {
        return 0.0;
    }

    let tf1 = term_frequencies(&tokens1);
    let tf2 = term_frequencies(&tokens2);

    let dot: u64 = tf1
        .iter()
        .filter_map(|(term, a)| tf2.get(term).map(|b| a * b))
        .sum();
    if dot == 0 {
        return 0.0;
    }

    let norm1: u64 = tf1.values().map(|c| c * c).sum();
    let norm2: u64 = tf2.values().map(|c| c * c).sum();

    // sqrt of the product keeps identical vectors at exactly 1.0
    (dot as f64 / ((norm1 * norm2) as f64).sqrt()).clamp(0.0, 1.0)
}

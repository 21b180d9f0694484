//! Lexical-overlap heuristic.
//!
//! Coarser than cosine scoring and never mixed with it: two names are linked
//! when their lower-cased whitespace tokens share at least one word.

use std::collections::HashSet;

use crate::core::model::ModelElement;

/// Lower-cased whitespace tokens of a name
pub fn lexical_tokens(name: &str) -> HashSet<String> {
    name.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Whether two names share a lower-cased token
pub fn lexically_linked(a: &str, b: &str) -> bool {
    let tokens = lexical_tokens(a);
    b.to_lowercase()
        .split_whitespace()
        .any(|token| tokens.contains(token))
}

/// Classes linked to `use_case` by lexical overlap, in input order
pub fn linked_classes<'m>(
    use_case: &ModelElement,
    classes: &[&'m ModelElement],
) -> Vec<&'m ModelElement> {
    let tokens = lexical_tokens(&use_case.name);
    classes
        .iter()
        .filter(|class| {
            class
                .name
                .to_lowercase()
                .split_whitespace()
                .any(|token| tokens.contains(token))
        })
        .copied()
        .collect()
}

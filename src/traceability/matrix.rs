//! Dense use-case × class similarity matrix.

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::model::ModelElement;
use crate::similarity::cosine::semantic_similarity;

/// One scored (use case, class) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixEntry {
    pub use_case: String,
    pub class: String,
    pub score: f64,
}

/// Similarity of every use case to every class.
///
/// Rows and columns are positional, so duplicated names keep their own
/// entries and `len()` is always `rows × columns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceabilityMatrix {
    use_cases: Vec<String>,
    classes: Vec<String>,
    /// Row-major scores
    scores: Vec<f64>,
}

impl TraceabilityMatrix {
    /// Score every pair; no pruning.
    pub fn build(use_cases: &[&ModelElement], classes: &[&ModelElement], parallel: bool) -> Self {
        let columns = classes.len();
        let score = |k: usize| semantic_similarity(&use_cases[k / columns].name, &classes[k % columns].name);
        let total = use_cases.len() * columns;

        let scores: Vec<f64> = if parallel {
            (0..total).into_par_iter().map(score).collect()
        } else {
            (0..total).map(score).collect()
        };

        info!(
            "Traceability matrix built: {} use cases x {} classes",
            use_cases.len(),
            columns
        );

        Self {
            use_cases: use_cases.iter().map(|e| e.name.clone()).collect(),
            classes: classes.iter().map(|e| e.name.clone()).collect(),
            scores,
        }
    }

    pub fn use_cases(&self) -> &[String] {
        &self.use_cases
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Score at row `i`, column `j`
    pub fn score_at(&self, i: usize, j: usize) -> Option<f64> {
        if i >= self.use_cases.len() || j >= self.classes.len() {
            return None;
        }
        self.scores.get(i * self.classes.len() + j).copied()
    }

    /// Score of the first pair with these names
    pub fn get(&self, use_case: &str, class: &str) -> Option<f64> {
        let i = self.use_cases.iter().position(|n| n == use_case)?;
        let j = self.classes.iter().position(|n| n == class)?;
        self.score_at(i, j)
    }

    /// Scores of one row, in class order
    pub fn row(&self, i: usize) -> &[f64] {
        let columns = self.classes.len();
        let start = (i * columns).min(self.scores.len());
        let end = (start + columns).min(self.scores.len());
        &self.scores[start..end]
    }

    /// All entries in row-major order
    pub fn entries(&self) -> impl Iterator<Item = MatrixEntry> + '_ {
        self.scores.iter().enumerate().map(|(k, score)| {
            let columns = self.classes.len();
            MatrixEntry {
                use_case: self.use_cases[k / columns].clone(),
                class: self.classes[k % columns].clone(),
                score: *score,
            }
        })
    }

    /// Name-keyed view; the first pair wins when names repeat.
    pub fn to_name_map(&self) -> IndexMap<String, IndexMap<String, f64>> {
        let mut map: IndexMap<String, IndexMap<String, f64>> = IndexMap::new();
        for entry in self.entries() {
            map.entry(entry.use_case)
                .or_default()
                .entry(entry.class)
                .or_insert(entry.score);
        }
        map
    }
}

/// Dense matrix of every use case against every class
pub fn analyze_traceability(
    use_cases: &[&ModelElement],
    classes: &[&ModelElement],
) -> TraceabilityMatrix {
    TraceabilityMatrix::build(use_cases, classes, false)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn build(use_cases: &[&str], classes: &[&str]) -> TraceabilityMatrix {
        let ucs: Vec<ModelElement> = use_cases
            .iter()
            .enumerate()
            .map(|(i, n)| ModelElement::use_case(format!("uc{i}"), *n))
            .collect();
        let cls: Vec<ModelElement> = classes
            .iter()
            .enumerate()
            .map(|(i, n)| ModelElement::class(format!("c{i}"), *n))
            .collect();
        TraceabilityMatrix::build(
            &ucs.iter().collect::<Vec<_>>(),
            &cls.iter().collect::<Vec<_>>(),
            false,
        )
    }

    #[test]
    fn test_dense_with_duplicate_names() {
        let matrix = build(&["Place Order", "Place Order", "Login"], &["Order", "Order", "Session"]);
        assert_eq!(matrix.len(), 9);
        assert_eq!(matrix.entries().count(), 9);
        assert_eq!(matrix.to_name_map().len(), 2);
    }

    #[test]
    fn test_lookup() {
        let matrix = build(&["Place Order", "Login"], &["Order", "UserManager"]);

        assert_relative_eq!(matrix.get("Place Order", "Order").unwrap(), 1.0 / 2f64.sqrt());
        assert_eq!(matrix.get("Login", "UserManager"), Some(0.0));
        assert_eq!(matrix.score_at(1, 0), Some(0.0));
        assert_eq!(matrix.score_at(2, 0), None);
        assert_eq!(matrix.get("Missing", "Order"), None);
        assert_eq!(matrix.row(0).len(), 2);
    }

    #[test]
    fn test_empty_sides() {
        assert!(build(&[], &["Order"]).is_empty());
        assert!(build(&["Login"], &[]).is_empty());
        assert!(build(&["Login"], &[]).entries().next().is_none());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let ucs = [
            ModelElement::use_case("uc1", "Place Order"),
            ModelElement::use_case("uc2", "Cancel Order"),
        ];
        let cls = [
            ModelElement::class("c1", "Order"),
            ModelElement::class("c2", "Order Cancel"),
            ModelElement::class("c3", "Payment"),
        ];
        let ucs: Vec<&ModelElement> = ucs.iter().collect();
        let cls: Vec<&ModelElement> = cls.iter().collect();
        assert_eq!(
            TraceabilityMatrix::build(&ucs, &cls, true),
            TraceabilityMatrix::build(&ucs, &cls, false)
        );
    }
}

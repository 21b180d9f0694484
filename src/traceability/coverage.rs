//! Semantic coverage: which classes implement a use case, and which of its
//! actions no implementing class provides.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::model::ModelElement;
use crate::linguistic::cache::FeatureCache;
use crate::linguistic::roles::SemanticRoles;

use super::matrix::TraceabilityMatrix;

/// A use-case action no implementing class provides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingFunctionality {
    pub use_case: String,
    /// Implementing class the action was looked for in; `None` when the use
    /// case has no implementing class at all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Lower-cased verb
    pub action: String,
    pub message: String,
}

/// Coverage of one use case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UseCaseCoverage {
    pub use_case: String,
    /// Classes scoring at or above the coverage threshold
    pub implementing_classes: Vec<String>,
    /// Distinct lower-cased verbs of the use-case name
    pub actions: Vec<String>,
    pub covered_actions: Vec<String>,
    /// Covered share of the actions; 1.0 when the name has no verb
    pub coverage_ratio: f64,
    /// Subject, action and object of the use-case name
    #[serde(default)]
    pub roles: SemanticRoles,
}

/// Coverage of every use case
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SemanticCoverage {
    pub use_cases: Vec<UseCaseCoverage>,
    pub missing_functionality: Vec<MissingFunctionality>,
}

impl SemanticCoverage {
    /// Coverage entry for a use case name
    pub fn for_use_case(&self, name: &str) -> Option<&UseCaseCoverage> {
        self.use_cases.iter().find(|c| c.use_case == name)
    }

    /// Use cases with no implementing class
    pub fn unimplemented(&self) -> impl Iterator<Item = &UseCaseCoverage> {
        self.use_cases
            .iter()
            .filter(|c| c.implementing_classes.is_empty())
    }
}

/// Coverage analysis over a prebuilt matrix.
///
/// `use_cases` and `classes` must be the element lists the matrix was built
/// from, in the same order.
pub fn analyze_semantic_coverage(
    matrix: &TraceabilityMatrix,
    use_cases: &[&ModelElement],
    classes: &[&ModelElement],
    cache: &FeatureCache,
    coverage_threshold: f64,
) -> SemanticCoverage {
    let mut coverage = SemanticCoverage::default();

    for (i, use_case) in use_cases.iter().enumerate() {
        let implementing: Vec<&ModelElement> = classes
            .iter()
            .enumerate()
            .filter(|(j, _)| {
                matrix
                    .score_at(i, *j)
                    .is_some_and(|score| score >= coverage_threshold)
            })
            .map(|(_, class)| *class)
            .collect();

        let (entry, missing) = cover_use_case(use_case, &implementing, cache);
        debug!(
            "Use case '{}': {} implementing classes, {} missing actions",
            use_case.name,
            entry.implementing_classes.len(),
            missing.len()
        );
        coverage.use_cases.push(entry);
        coverage.missing_functionality.extend(missing);
    }

    coverage
}

/// Missing functionality of one use case given its implementing classes.
///
/// An action is missing when no method of any implementing class carries it
/// among its own verbs. Each missing action is reported once per implementing
/// class, or once without a class when there is none.
pub fn missing_functionality(
    use_case: &ModelElement,
    implementing: &[&ModelElement],
    cache: &FeatureCache,
) -> Vec<MissingFunctionality> {
    cover_use_case(use_case, implementing, cache).1
}

fn cover_use_case(
    use_case: &ModelElement,
    implementing: &[&ModelElement],
    cache: &FeatureCache,
) -> (UseCaseCoverage, Vec<MissingFunctionality>) {
    let mut actions: Vec<String> = Vec::new();
    for verb in cache.verbs(&use_case.name) {
        if !actions.contains(&verb) {
            actions.push(verb);
        }
    }

    let provided: Vec<String> = implementing
        .iter()
        .flat_map(|class| class.methods())
        .flat_map(|method| cache.verbs(&method.name))
        .collect();

    let mut covered_actions = Vec::new();
    let mut missing = Vec::new();

    for action in &actions {
        if provided.contains(action) {
            covered_actions.push(action.clone());
            continue;
        }
        if implementing.is_empty() {
            missing.push(MissingFunctionality {
                use_case: use_case.name.clone(),
                class: None,
                action: action.clone(),
                message: format!(
                    "Action '{action}' of use case '{}' has no implementing class",
                    use_case.name
                ),
            });
        }
        for class in implementing {
            missing.push(MissingFunctionality {
                use_case: use_case.name.clone(),
                class: Some(class.name.clone()),
                action: action.clone(),
                message: format!("Action '{action}' not implemented in class '{}'", class.name),
            });
        }
    }

    let coverage_ratio = if actions.is_empty() {
        1.0
    } else {
        covered_actions.len() as f64 / actions.len() as f64
    };

    let entry = UseCaseCoverage {
        use_case: use_case.name.clone(),
        implementing_classes: implementing.iter().map(|c| c.name.clone()).collect(),
        actions,
        covered_actions,
        coverage_ratio,
        roles: SemanticRoles::label(cache, &use_case.name),
    };
    (entry, missing)
}

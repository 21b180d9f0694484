//! Precision, recall and F1 against a ground-truth violation list.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::violation::{RuleId, Violation};

/// A violation the model is known to contain
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExpectedViolation {
    pub rule_id: RuleId,
    pub element_name: String,
}

impl ExpectedViolation {
    pub fn new(rule_id: RuleId, element_name: impl Into<String>) -> Self {
        Self {
            rule_id,
            element_name: element_name.into(),
        }
    }
}

impl From<&Violation> for ExpectedViolation {
    fn from(violation: &Violation) -> Self {
        Self::new(violation.rule_id, violation.element_name.clone())
    }
}

/// Detection quality
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
}

/// Compare detected violations with the expected ones by
/// `(rule_id, element_name)`; duplicates count once.
pub fn evaluate(detected: &[Violation], expected: &[ExpectedViolation]) -> EvaluationMetrics {
    let detected: HashSet<ExpectedViolation> = detected.iter().map(ExpectedViolation::from).collect();
    let expected: HashSet<&ExpectedViolation> = expected.iter().collect();

    let true_positives = detected.iter().filter(|d| expected.contains(d)).count();
    let false_positives = detected.len() - true_positives;
    let false_negatives = expected.len() - true_positives;

    let precision = ratio(true_positives, true_positives + false_positives);
    let recall = ratio(true_positives, true_positives + false_negatives);
    let f1_score = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    EvaluationMetrics {
        true_positives,
        false_positives,
        false_negatives,
        precision,
        recall,
        f1_score,
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn detected(items: &[(RuleId, &str)]) -> Vec<Violation> {
        items
            .iter()
            .map(|(rule, name)| Violation::new(*rule, *name, "msg"))
            .collect()
    }

    #[test]
    fn test_empty_inputs_are_zero() {
        assert_eq!(evaluate(&[], &[]), EvaluationMetrics::default());

        let only_detected = evaluate(&detected(&[(RuleId::ActorNameNoun, "Quickly")]), &[]);
        assert_eq!(only_detected.false_positives, 1);
        assert_eq!(only_detected.precision, 0.0);
        assert_eq!(only_detected.recall, 0.0);
        assert_eq!(only_detected.f1_score, 0.0);
    }

    #[test]
    fn test_partial_match() {
        let found = detected(&[
            (RuleId::UseCaseNameVerb, "System"),
            (RuleId::ActorNameNoun, "Quickly"),
            (RuleId::ActorNameNoun, "Quickly"),
        ]);
        let expected = vec![
            ExpectedViolation::new(RuleId::UseCaseNameVerb, "System"),
            ExpectedViolation::new(RuleId::ClassNameNoun, "Fast"),
            ExpectedViolation::new(RuleId::MethodNameVerb, "total"),
        ];

        let metrics = evaluate(&found, &expected);
        assert_eq!(metrics.true_positives, 1);
        assert_eq!(metrics.false_positives, 1);
        assert_eq!(metrics.false_negatives, 2);
        assert_relative_eq!(metrics.precision, 0.5);
        assert_relative_eq!(metrics.recall, 1.0 / 3.0);
        assert_relative_eq!(metrics.f1_score, 0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_ground_truth_deserializes() {
        let yaml = "- rule_id: use_case_name_verb\n  element_name: System\n";
        let parsed: Vec<ExpectedViolation> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed, vec![ExpectedViolation::new(RuleId::UseCaseNameVerb, "System")]);
    }
}

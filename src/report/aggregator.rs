//! Violation aggregation: summary, categories and recommendations.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::violation::{RuleId, Violation, ViolationCategory};

use super::metrics::EvaluationMetrics;

/// Recommendation for rule ids missing from the table
pub const FALLBACK_RECOMMENDATION: &str =
    "Review and refine the model according to UML best practices";

const RECOMMENDATIONS: &[(&str, &str)] = &[
    (
        "actor_name_noun",
        "Ensure all actor names are nouns or noun phrases describing roles",
    ),
    (
        "use_case_name_verb",
        "Use verb phrases for use case names to clearly indicate actions",
    ),
    (
        "class_name_noun",
        "Use singular nouns for class names following Pascal case convention",
    ),
    (
        "method_name_verb",
        "Start method names with verbs following camelCase convention",
    ),
    (
        "use_case_implementation",
        "Ensure all use cases have corresponding implementing classes",
    ),
    (
        "actor_method_mapping",
        "Verify that actor interactions are properly mapped to class methods",
    ),
];

/// Recommendation text for a rule id
pub fn recommendation_for(rule_id: &str) -> &'static str {
    RECOMMENDATIONS
        .iter()
        .find(|(id, _)| *id == rule_id)
        .map_or(FALLBACK_RECOMMENDATION, |(_, text)| *text)
}

/// Violation counts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViolationSummary {
    pub total_violations: usize,
    /// Count per rule id, in order of first appearance
    pub violation_types: IndexMap<String, usize>,
}

/// Violations grouped by category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailedViolations {
    pub naming: Vec<Violation>,
    pub semantic: Vec<Violation>,
    pub relationship: Vec<Violation>,
    pub cross_diagram: Vec<Violation>,
}

impl DetailedViolations {
    pub fn get(&self, category: ViolationCategory) -> &[Violation] {
        match category {
            ViolationCategory::Naming => &self.naming,
            ViolationCategory::Semantic => &self.semantic,
            ViolationCategory::Relationship => &self.relationship,
            ViolationCategory::CrossDiagram => &self.cross_diagram,
        }
    }

    fn bucket_mut(&mut self, category: ViolationCategory) -> &mut Vec<Violation> {
        match category {
            ViolationCategory::Naming => &mut self.naming,
            ViolationCategory::Semantic => &mut self.semantic,
            ViolationCategory::Relationship => &mut self.relationship,
            ViolationCategory::CrossDiagram => &mut self.cross_diagram,
        }
    }
}

/// Report handed to the rendering layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub summary: ViolationSummary,
    pub detailed_violations: DetailedViolations,
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<EvaluationMetrics>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.summary.total_violations == 0
    }
}

/// Ordered violation collector
#[derive(Debug, Clone, Default)]
pub struct ViolationAggregator {
    violations: Vec<Violation>,
}

impl ViolationAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a batch, keeping arrival order
    pub fn extend(&mut self, phase: &str, violations: impl IntoIterator<Item = Violation>) {
        let before = self.violations.len();
        self.violations.extend(violations);
        info!("{}: {} violations", phase, self.violations.len() - before);
    }

    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn summary(&self) -> ViolationSummary {
        let mut violation_types: IndexMap<String, usize> = IndexMap::new();
        for violation in &self.violations {
            *violation_types
                .entry(violation.rule_id.as_str().to_string())
                .or_insert(0) += 1;
        }
        ViolationSummary {
            total_violations: self.violations.len(),
            violation_types,
        }
    }

    pub fn categorize(&self) -> DetailedViolations {
        let mut detailed = DetailedViolations::default();
        for violation in &self.violations {
            detailed
                .bucket_mut(ViolationCategory::of_rule(violation.rule_id.as_str()))
                .push(violation.clone());
        }
        detailed
    }

    /// One recommendation per rule id seen more than once
    pub fn recommendations(&self) -> Vec<String> {
        recommendations_from(&self.summary())
    }

    pub fn build_report(&self, metrics: Option<EvaluationMetrics>) -> ValidationReport {
        let summary = self.summary();
        ValidationReport {
            recommendations: recommendations_from(&summary),
            detailed_violations: self.categorize(),
            summary,
            metrics,
        }
    }
}

fn recommendations_from(summary: &ViolationSummary) -> Vec<String> {
    summary
        .violation_types
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(rule_id, _)| recommendation_for(rule_id).to_string())
        .collect()
}

/// Rule ids with their recommendation, for listings
pub fn recommendation_table() -> Vec<(RuleId, &'static str)> {
    RuleId::ALL
        .into_iter()
        .map(|rule| (rule, recommendation_for(rule.as_str())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(rule: RuleId, name: &str) -> Violation {
        Violation::new(rule, name, format!("{rule} on {name}"))
    }

    fn aggregator() -> ViolationAggregator {
        let mut aggregator = ViolationAggregator::new();
        aggregator.extend(
            "naming",
            vec![
                violation(RuleId::UseCaseNameVerb, "System"),
                violation(RuleId::ActorNameNoun, "Quickly"),
                violation(RuleId::UseCaseNameVerb, "Database"),
            ],
        );
        aggregator.extend(
            "cross-diagram",
            vec![violation(RuleId::CrossDiagramMisalignment, "Login - UserManager")],
        );
        aggregator.push(violation(RuleId::SemanticCoverageGap, "Login"));
        aggregator.push(violation(RuleId::DanglingRelationship, "a1 -> ghost"));
        aggregator.push(violation(RuleId::DanglingRelationship, "a2 -> ghost"));
        aggregator
    }

    #[test]
    fn test_summary_counts_in_first_appearance_order() {
        let summary = aggregator().summary();
        assert_eq!(summary.total_violations, 7);
        let types: Vec<(&str, usize)> = summary
            .violation_types
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        assert_eq!(
            types,
            vec![
                ("use_case_name_verb", 2),
                ("actor_name_noun", 1),
                ("cross_diagram_misalignment", 1),
                ("semantic_coverage_gap", 1),
                ("dangling_relationship", 2),
            ]
        );
    }

    #[test]
    fn test_categories() {
        let detailed = aggregator().categorize();
        assert_eq!(detailed.naming.len(), 3);
        assert_eq!(detailed.semantic.len(), 1);
        assert_eq!(detailed.relationship.len(), 2);
        assert_eq!(detailed.cross_diagram.len(), 1);
        assert_eq!(detailed.get(ViolationCategory::CrossDiagram)[0].element_name, "Login - UserManager");
    }

    #[test]
    fn test_recommendations_only_for_repeated_rules() {
        assert_eq!(
            aggregator().recommendations(),
            vec![
                "Use verb phrases for use case names to clearly indicate actions".to_string(),
                FALLBACK_RECOMMENDATION.to_string(),
            ]
        );

        let mut single = ViolationAggregator::new();
        single.push(violation(RuleId::ActorNameNoun, "Quickly"));
        assert!(single.recommendations().is_empty());
    }

    #[test]
    fn test_recommendation_lookup() {
        assert_eq!(
            recommendation_for("actor_method_mapping"),
            "Verify that actor interactions are properly mapped to class methods"
        );
        assert_eq!(recommendation_for("unknown"), FALLBACK_RECOMMENDATION);
        assert_eq!(recommendation_table().len(), RuleId::ALL.len());
    }

    #[test]
    fn test_report_serializes_expected_shape() {
        let report = aggregator().build_report(None);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["summary"]["total_violations"], 7);
        assert_eq!(json["summary"]["violation_types"]["use_case_name_verb"], 2);
        assert_eq!(json["detailed_violations"]["naming"][0]["rule_id"], "use_case_name_verb");
        assert!(json.get("metrics").is_none());
        assert!(!report.is_clean());
    }

    #[test]
    fn test_empty_report() {
        let report = ViolationAggregator::new().build_report(None);
        assert!(report.is_clean());
        assert!(report.recommendations.is_empty());
    }
}

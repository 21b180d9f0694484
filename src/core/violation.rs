//! Violations reported by the rule, similarity and traceability engines.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::errors::SemtraceError;

/// Closed set of rule identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    /// Actor name has no noun
    ActorNameNoun,
    /// Use case name has no verb
    UseCaseNameVerb,
    /// Class name has no noun
    ClassNameNoun,
    /// Method name has no verb
    MethodNameVerb,
    /// Method name does not start lowercase
    MethodNameCase,
    /// Use case and class fall under the alignment threshold
    CrossDiagramMisalignment,
    /// Use case has no lexically linked class
    UseCaseImplementation,
    /// Actor interaction has no matching method
    ActorMethodMapping,
    /// Use-case verb not covered by any implementing class method
    SemanticCoverageGap,
    /// Relationship endpoint missing from the model
    DanglingRelationship,
}

impl RuleId {
    /// Every rule id, in declaration order
    pub const ALL: [RuleId; 10] = [
        RuleId::ActorNameNoun,
        RuleId::UseCaseNameVerb,
        RuleId::ClassNameNoun,
        RuleId::MethodNameVerb,
        RuleId::MethodNameCase,
        RuleId::CrossDiagramMisalignment,
        RuleId::UseCaseImplementation,
        RuleId::ActorMethodMapping,
        RuleId::SemanticCoverageGap,
        RuleId::DanglingRelationship,
    ];

    /// Wire identifier of the rule
    pub fn as_str(self) -> &'static str {
        match self {
            RuleId::ActorNameNoun => "actor_name_noun",
            RuleId::UseCaseNameVerb => "use_case_name_verb",
            RuleId::ClassNameNoun => "class_name_noun",
            RuleId::MethodNameVerb => "method_name_verb",
            RuleId::MethodNameCase => "method_name_case",
            RuleId::CrossDiagramMisalignment => "cross_diagram_misalignment",
            RuleId::UseCaseImplementation => "use_case_implementation",
            RuleId::ActorMethodMapping => "actor_method_mapping",
            RuleId::SemanticCoverageGap => "semantic_coverage_gap",
            RuleId::DanglingRelationship => "dangling_relationship",
        }
    }

    /// Severity attached to violations of this rule
    pub fn default_severity(self) -> Severity {
        match self {
            RuleId::ActorNameNoun
            | RuleId::UseCaseNameVerb
            | RuleId::ClassNameNoun
            | RuleId::MethodNameVerb
            | RuleId::MethodNameCase
            | RuleId::CrossDiagramMisalignment => Severity::Warning,
            RuleId::UseCaseImplementation
            | RuleId::ActorMethodMapping
            | RuleId::DanglingRelationship => Severity::Error,
            RuleId::SemanticCoverageGap => Severity::Info,
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleId {
    type Err = SemtraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleId::ALL
            .into_iter()
            .find(|rule| rule.as_str() == s)
            .ok_or_else(|| SemtraceError::validation_field(format!("unknown rule id '{s}'"), "rule_id"))
    }
}

/// How serious a violation is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational finding
    Info,
    /// Convention not followed
    Warning,
    /// Traceability broken
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// A single rule failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule that failed
    pub rule_id: RuleId,
    /// Offending element (or "a - b" for pairs)
    pub element_name: String,
    /// Human-readable message
    pub message: String,
    /// Optional severity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

impl Violation {
    /// Create a violation with the rule's default severity
    pub fn new(rule_id: RuleId, element_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule_id,
            element_name: element_name.into(),
            message: message.into(),
            severity: Some(rule_id.default_severity()),
        }
    }

    /// Override the severity
    pub fn with_severity(mut self, severity: Option<Severity>) -> Self {
        self.severity = severity;
        self
    }
}

/// Report bucket a violation lands in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCategory {
    /// Naming conventions
    Naming,
    /// Semantic coverage
    Semantic,
    /// Relationship data quality
    Relationship,
    /// Everything else
    CrossDiagram,
}

impl ViolationCategory {
    /// Categorize by substring match on the rule id; the checks run in order.
    pub fn of_rule(rule_id: &str) -> Self {
        if rule_id.contains("name") {
            ViolationCategory::Naming
        } else if rule_id.contains("semantic") {
            ViolationCategory::Semantic
        } else if rule_id.contains("relationship") {
            ViolationCategory::Relationship
        } else {
            ViolationCategory::CrossDiagram
        }
    }
}

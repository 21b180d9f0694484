//! Traceability checks that produce violations.

use tracing::{debug, warn};

use crate::core::config::{AlignmentScope, TraceabilityConfig};
use crate::core::model::{DesignModel, ElementKind, ModelElement};
use crate::core::violation::{RuleId, Violation};

use super::coverage::MissingFunctionality;
use super::lexical::{lexically_linked, linked_classes};
use super::matrix::TraceabilityMatrix;

/// Flag (use case, class) pairs scoring below the alignment threshold.
///
/// Outer loop over use cases, inner loop over classes. With
/// [`AlignmentScope::AllPairs`] every pair is visited, related or not.
pub fn check_cross_diagram_alignment(
    matrix: &TraceabilityMatrix,
    use_cases: &[&ModelElement],
    classes: &[&ModelElement],
    config: &TraceabilityConfig,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    for (i, use_case) in use_cases.iter().enumerate() {
        for (j, class) in classes.iter().enumerate() {
            if config.alignment_scope == AlignmentScope::LexicallyLinked
                && !lexically_linked(&use_case.name, &class.name)
            {
                continue;
            }
            let Some(score) = matrix.score_at(i, j) else {
                continue;
            };
            if score < config.alignment_threshold {
                violations.push(Violation::new(
                    RuleId::CrossDiagramMisalignment,
                    format!("{} - {}", use_case.name, class.name),
                    format!(
                        "Use case '{}' and class '{}' are not semantically aligned",
                        use_case.name, class.name
                    ),
                ));
            }
        }
    }

    debug!("{} misaligned use case/class pairs", violations.len());
    violations
}

/// Use cases without any lexically linked class
pub fn validate_traceability(
    use_cases: &[&ModelElement],
    classes: &[&ModelElement],
) -> Vec<Violation> {
    use_cases
        .iter()
        .filter(|use_case| linked_classes(use_case, classes).is_empty())
        .map(|use_case| {
            Violation::new(
                RuleId::UseCaseImplementation,
                use_case.name.as_str(),
                format!("Use case '{}' has no implementing classes", use_case.name),
            )
        })
        .collect()
}

/// Actor interactions with no method of a lexically linked class.
///
/// Every relationship from an actor to an existing use case is one
/// interaction, checked in relationship order; a repeated association is
/// reported again. A use case is mapped when some non-empty lower-cased method
/// name is a substring of its lower-cased name.
pub fn validate_actor_method_mapping(model: &DesignModel) -> Vec<Violation> {
    let classes = model.classes();
    let mut violations = Vec::new();

    for actor in model.actors() {
        let reached = model
            .relationships()
            .iter()
            .filter(|relationship| relationship.source_id == actor.id)
            .filter_map(|relationship| model.get(&relationship.target_id))
            .filter(|target| target.kind() == ElementKind::UseCase);

        for use_case in reached {
            let use_case_name = use_case.name.to_lowercase();
            let mapped = linked_classes(use_case, &classes).iter().any(|class| {
                class.methods().iter().any(|method| {
                    let method_name = method.name.to_lowercase();
                    !method_name.is_empty() && use_case_name.contains(&method_name)
                })
            });

            if !mapped {
                violations.push(Violation::new(
                    RuleId::ActorMethodMapping,
                    format!("{} - {}", actor.name, use_case.name),
                    format!(
                        "No corresponding methods found for actor '{}' interaction in use case '{}'",
                        actor.name, use_case.name
                    ),
                ));
            }
        }
    }

    violations
}

/// One violation per missing-functionality entry
pub fn coverage_gap_violations(missing: &[MissingFunctionality]) -> Vec<Violation> {
    missing
        .iter()
        .map(|entry| {
            let element = match &entry.class {
                Some(class) => format!("{} - {}", entry.use_case, class),
                None => entry.use_case.clone(),
            };
            Violation::new(RuleId::SemanticCoverageGap, element, entry.message.clone())
        })
        .collect()
}

/// Relationships pointing at unknown element ids, in relationship order
pub fn check_dangling_relationships(model: &DesignModel) -> Vec<Violation> {
    model
        .dangling_references()
        .into_iter()
        .map(|dangling| {
            let relationship = dangling.relationship;
            warn!(
                "Relationship {} -> {} references unknown ids: {}",
                relationship.source_id,
                relationship.target_id,
                dangling.missing_ids.join(", ")
            );
            Violation::new(
                RuleId::DanglingRelationship,
                format!("{} -> {}", relationship.source_id, relationship.target_id),
                format!(
                    "Relationship '{}' from '{}' to '{}' references unknown element(s): {}",
                    relationship.kind,
                    relationship.source_id,
                    relationship.target_id,
                    dangling.missing_ids.join(", ")
                ),
            )
        })
        .collect()
}

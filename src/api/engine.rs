//! Validation engine: one run over a design model.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::core::config::SemtraceConfig;
use crate::core::errors::Result;
use crate::core::model::{DesignModel, ModelElement};
use crate::core::violation::Violation;
use crate::linguistic::cache::{CacheStats, FeatureCache};
use crate::linguistic::features::LinguisticService;
use crate::linguistic::lexicon::LexiconTagger;
use crate::report::aggregator::{ValidationReport, ViolationAggregator};
use crate::report::metrics::{evaluate, ExpectedViolation};
use crate::rules::naming::NamingRuleEngine;
use crate::similarity::community::{ClusterDetection, GreedyModularityDetector};
use crate::similarity::graph::{GraphStats, SemanticGraph, SimilarityEdge};
use crate::traceability::checks::{
    check_cross_diagram_alignment, check_dangling_relationships, coverage_gap_violations,
    validate_actor_method_mapping, validate_traceability,
};
use crate::traceability::coverage::{analyze_semantic_coverage, SemanticCoverage};
use crate::traceability::matrix::TraceabilityMatrix;

/// Everything one validation run derives from a model
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    /// All violations in reporting order
    pub violations: Vec<Violation>,
    pub graph: SemanticGraph,
    pub clusters: ClusterDetection,
    pub matrix: TraceabilityMatrix,
    pub coverage: SemanticCoverage,
    pub report: ValidationReport,
    /// Linguistic cache usage of the run
    pub cache_stats: CacheStats,
}

/// Serializable analysis artifacts, for exports next to the report
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisArtifacts<'a> {
    pub graph: GraphStats,
    pub edges: Vec<SimilarityEdge>,
    pub clusters: &'a ClusterDetection,
    pub matrix: &'a TraceabilityMatrix,
    pub coverage: &'a SemanticCoverage,
}

impl ValidationOutcome {
    pub fn artifacts(&self) -> AnalysisArtifacts<'_> {
        AnalysisArtifacts {
            graph: self.graph.stats(),
            edges: self.graph.edges(),
            clusters: &self.clusters,
            matrix: &self.matrix,
            coverage: &self.coverage,
        }
    }
}

/// Cross-diagram model validator.
///
/// Holds no per-run state: each call to [`validate`](Self::validate) builds
/// its own feature cache, so one validator can check many models, also from
/// several threads.
pub struct ModelValidator {
    config: Arc<SemtraceConfig>,
    service: Arc<dyn LinguisticService>,
}

impl ModelValidator {
    /// Validator backed by the built-in lexicon tagger
    pub fn new(config: SemtraceConfig) -> Result<Self> {
        let tagger = LexiconTagger::new(&config.linguistic);
        Self::with_service(config, Arc::new(tagger))
    }

    /// Validator backed by an injected linguistic service
    pub fn with_service(config: SemtraceConfig, service: Arc<dyn LinguisticService>) -> Result<Self> {
        config.validate()?;
        info!("Initializing model validator with {}", service.name());
        Ok(Self {
            config: Arc::new(config),
            service,
        })
    }

    pub fn config(&self) -> &SemtraceConfig {
        &self.config
    }

    pub fn service_name(&self) -> &str {
        self.service.name()
    }

    /// Run every engine over the model
    pub fn validate(&self, model: &DesignModel) -> Result<ValidationOutcome> {
        self.run(model, None)
    }

    /// Like [`validate`](Self::validate), with precision/recall/F1 against
    /// the expected violations attached to the report
    pub fn validate_with_ground_truth(
        &self,
        model: &DesignModel,
        expected: &[ExpectedViolation],
    ) -> Result<ValidationOutcome> {
        self.run(model, Some(expected))
    }

    fn run(
        &self,
        model: &DesignModel,
        expected: Option<&[ExpectedViolation]>,
    ) -> Result<ValidationOutcome> {
        let config = &self.config;
        let cache = FeatureCache::new(Arc::clone(&self.service));

        let actors = model.actors();
        let use_cases = model.use_cases();
        let classes = model.classes();
        info!(
            "Validating model: {} actors, {} use cases, {} classes, {} relationships",
            actors.len(),
            use_cases.len(),
            classes.len(),
            model.relationships().len()
        );

        let mut aggregator = ViolationAggregator::new();

        let naming = NamingRuleEngine::new(&cache, &config.rules);
        let naming_violations: Vec<Violation> = actors
            .iter()
            .chain(&use_cases)
            .chain(&classes)
            .flat_map(|element| naming.validate(element))
            .collect();
        aggregator.extend("naming rules", naming_violations);

        let elements: Vec<&ModelElement> = model.elements().collect();
        let graph = SemanticGraph::build(
            &elements,
            &cache,
            config.similarity.clustering_threshold,
            config.performance.parallel,
        );
        let clusters = GreedyModularityDetector::new(config.similarity.resolution).detect(&graph);

        let matrix = TraceabilityMatrix::build(&use_cases, &classes, config.performance.parallel);
        let coverage = analyze_semantic_coverage(
            &matrix,
            &use_cases,
            &classes,
            &cache,
            config.traceability.coverage_threshold,
        );

        let enabled = |violations: Vec<Violation>| -> Vec<Violation> {
            violations
                .into_iter()
                .filter(|v| config.rules.is_enabled(v.rule_id))
                .collect()
        };

        aggregator.extend(
            "cross-diagram alignment",
            enabled(check_cross_diagram_alignment(
                &matrix,
                &use_cases,
                &classes,
                &config.traceability,
            )),
        );
        aggregator.extend(
            "use case implementation",
            enabled(validate_traceability(&use_cases, &classes)),
        );
        aggregator.extend(
            "actor method mapping",
            enabled(validate_actor_method_mapping(model)),
        );
        if config.traceability.report_coverage_gaps {
            aggregator.extend(
                "semantic coverage gaps",
                enabled(coverage_gap_violations(&coverage.missing_functionality)),
            );
        }
        aggregator.extend(
            "dangling relationships",
            enabled(check_dangling_relationships(model)),
        );

        let metrics = expected.map(|expected| evaluate(aggregator.violations(), expected));
        let report = aggregator.build_report(metrics);
        let cache_stats = cache.stats();

        info!(
            "Validation completed: {} violations, {} clusters, {} distinct texts analyzed",
            report.summary.total_violations,
            clusters.clusters.len(),
            cache.len()
        );

        Ok(ValidationOutcome {
            violations: aggregator.into_violations(),
            graph,
            clusters,
            matrix,
            coverage,
            report,
            cache_stats,
        })
    }
}

//! Configuration types and management for semtrace.
//!
//! Every threshold the engines use lives here so that a validation run is fully
//! described by a [`SemtraceConfig`] plus the model and the linguistic service.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, SemtraceError};
use crate::core::violation::RuleId;

/// Default similarity at or above which two elements are considered related.
pub const DEFAULT_CLUSTERING_THRESHOLD: f64 = 0.75;

/// Default similarity below which a use case and a class are misaligned.
pub const DEFAULT_ALIGNMENT_THRESHOLD: f64 = 0.5;

/// Main configuration for the validation engine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SemtraceConfig {
    /// Similarity graph and clustering settings
    #[serde(default)]
    pub similarity: SimilarityConfig,

    /// Traceability and cross-diagram alignment settings
    #[serde(default)]
    pub traceability: TraceabilityConfig,

    /// Naming rule settings
    #[serde(default)]
    pub rules: RulesConfig,

    /// Built-in linguistic service lexicon extensions
    #[serde(default)]
    pub linguistic: LinguisticConfig,

    /// Performance settings
    #[serde(default)]
    pub performance: PerformanceConfig,
}

impl SemtraceConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            SemtraceError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn to_yaml_file(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&path, content).map_err(|e| {
            SemtraceError::io(
                format!("Failed to write config file: {}", path.display()),
                e,
            )
        })
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        self.similarity.validate()?;
        self.traceability.validate()?;
        Ok(())
    }
}

/// Similarity graph and community detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityConfig {
    /// Minimum similarity for an edge in the similarity graph
    pub clustering_threshold: f64,

    /// Modularity resolution (higher = more, smaller clusters)
    pub resolution: f64,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            clustering_threshold: DEFAULT_CLUSTERING_THRESHOLD,
            resolution: 1.0,
        }
    }
}

impl SimilarityConfig {
    /// Validate similarity configuration
    pub fn validate(&self) -> Result<()> {
        check_unit_interval(self.clustering_threshold, "similarity.clustering_threshold")?;

        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return Err(SemtraceError::config_field(
                "resolution must be a positive number",
                "similarity.resolution",
            ));
        }

        Ok(())
    }
}

/// Which (use case, class) pairs the cross-diagram alignment check visits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentScope {
    /// Every use case against every class
    #[default]
    AllPairs,
    /// Only pairs whose names share a lower-cased token
    LexicallyLinked,
}

/// Traceability engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceabilityConfig {
    /// Pairs scoring below this are reported as misaligned
    pub alignment_threshold: f64,

    /// Classes scoring at or above this implement a use case
    pub coverage_threshold: f64,

    /// Pairing scope of the alignment check
    #[serde(default)]
    pub alignment_scope: AlignmentScope,

    /// Emit a violation for every missing-functionality entry
    #[serde(default)]
    pub report_coverage_gaps: bool,
}

impl Default for TraceabilityConfig {
    fn default() -> Self {
        Self {
            alignment_threshold: DEFAULT_ALIGNMENT_THRESHOLD,
            coverage_threshold: DEFAULT_CLUSTERING_THRESHOLD,
            alignment_scope: AlignmentScope::AllPairs,
            report_coverage_gaps: false,
        }
    }
}

impl TraceabilityConfig {
    /// Validate traceability configuration
    pub fn validate(&self) -> Result<()> {
        check_unit_interval(self.alignment_threshold, "traceability.alignment_threshold")?;
        check_unit_interval(self.coverage_threshold, "traceability.coverage_threshold")?;
        Ok(())
    }
}

/// Naming rule configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Require method names to start with a lowercase character
    #[serde(default)]
    pub enforce_method_case: bool,

    /// Rules that are switched off entirely
    #[serde(default)]
    pub disabled: Vec<RuleId>,
}

impl RulesConfig {
    /// Whether a rule should run
    pub fn is_enabled(&self, rule: RuleId) -> bool {
        if rule == RuleId::MethodNameCase && !self.enforce_method_case {
            return false;
        }
        !self.disabled.contains(&rule)
    }
}

/// Lexicon extensions for the built-in rule-based tagger
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinguisticConfig {
    /// Additional words tagged as verbs
    #[serde(default)]
    pub extra_verbs: Vec<String>,

    /// Additional words tagged as adverbs
    #[serde(default)]
    pub extra_adverbs: Vec<String>,

    /// Additional words tagged as adjectives
    #[serde(default)]
    pub extra_adjectives: Vec<String>,
}

/// Performance configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Score element pairs on the rayon thread pool
    pub parallel: bool,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

fn check_unit_interval(value: f64, field: &str) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SemtraceError::config_field(
            format!("{field} must be within [0, 1], got {value}"),
            field,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_thresholds() {
        let config = SemtraceConfig::default();
        assert_eq!(config.similarity.clustering_threshold, 0.75);
        assert_eq!(config.traceability.coverage_threshold, 0.75);
        assert_eq!(config.traceability.alignment_threshold, 0.5);
        assert_eq!(config.traceability.alignment_scope, AlignmentScope::AllPairs);
        assert!(!config.traceability.report_coverage_gaps);
        assert!(config.performance.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let mut config = SemtraceConfig::default();
        config.traceability.alignment_threshold = 1.5;

        match config.validate() {
            Err(SemtraceError::Config { field, .. }) => {
                assert_eq!(field.as_deref(), Some("traceability.alignment_threshold"));
            }
            other => panic!("Expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_positive_resolution_rejected() {
        let mut config = SemtraceConfig::default();
        config.similarity.resolution = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_method_case_rule_opt_in() {
        let mut rules = RulesConfig::default();
        assert!(!rules.is_enabled(RuleId::MethodNameCase));
        assert!(rules.is_enabled(RuleId::MethodNameVerb));

        rules.enforce_method_case = true;
        rules.disabled.push(RuleId::MethodNameVerb);
        assert!(rules.is_enabled(RuleId::MethodNameCase));
        assert!(!rules.is_enabled(RuleId::MethodNameVerb));
    }

    #[test]
    fn test_yaml_round_trip() {
        let mut config = SemtraceConfig::default();
        config.traceability.alignment_scope = AlignmentScope::LexicallyLinked;
        config.linguistic.extra_verbs.push("onboard".to_string());

        let file = NamedTempFile::new().unwrap();
        config.to_yaml_file(file.path()).unwrap();
        let loaded = SemtraceConfig::from_yaml_file(file.path()).unwrap();

        assert_eq!(
            loaded.traceability.alignment_scope,
            AlignmentScope::LexicallyLinked
        );
        assert_eq!(loaded.linguistic.extra_verbs, vec!["onboard".to_string()]);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "traceability:\n  alignment_threshold: 0.3\n  coverage_threshold: 0.6\n";
        let config: SemtraceConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.traceability.alignment_threshold, 0.3);
        assert_eq!(config.similarity.clustering_threshold, 0.75);
        assert_eq!(config.traceability.alignment_scope, AlignmentScope::AllPairs);
    }
}

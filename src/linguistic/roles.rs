//! Semantic role labeling over dependency arcs.

use serde::{Deserialize, Serialize};

use super::cache::FeatureCache;
use super::features::{Dependency, LinguisticFeatures};

const COPULAS: &[&str] = &["is", "are", "was", "were"];

/// Who does what to what, as far as the dependency parse tells
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticRoles {
    /// Typically the actor
    pub subject: Option<String>,
    /// Main verb
    pub action: Option<String>,
    /// Typically a system component
    pub object: Option<String>,
}

impl SemanticRoles {
    pub fn from_features(features: &LinguisticFeatures) -> Self {
        let deps = &features.dependencies;
        Self {
            subject: first_with_label(deps, |label, _| matches!(label, "nsubj" | "nsubjpass")),
            action: first_with_label(deps, |label, token| {
                label == "ROOT" && !COPULAS.contains(&token.to_lowercase().as_str())
            }),
            object: first_with_label(deps, |label, _| matches!(label, "dobj" | "pobj")),
        }
    }

    /// Label the roles of a sentence through the run cache
    pub fn label(cache: &FeatureCache, sentence: &str) -> Self {
        Self::from_features(&cache.features(sentence))
    }
}

fn first_with_label(deps: &[Dependency], pred: impl Fn(&str, &str) -> bool) -> Option<String> {
    deps.iter()
        .find(|d| pred(d.label.as_str(), d.token.as_str()))
        .map(|d| d.token.clone())
}

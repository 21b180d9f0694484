//! Part-of-speech naming rules for model elements.
//!
//! Each element kind has a fixed list of rules; all of them run for every
//! element, so one element can yield several violations. Names are classified
//! through the run's [`FeatureCache`], never through a global tagger.

use tracing::debug;

use crate::core::config::RulesConfig;
use crate::core::model::{ElementKind, Method, ModelElement};
use crate::core::violation::{RuleId, Violation};
use crate::linguistic::cache::FeatureCache;

/// Rules that apply to an element of the given kind, in evaluation order
pub fn rules_for(kind: ElementKind) -> &'static [RuleId] {
    match kind {
        ElementKind::Actor => &[RuleId::ActorNameNoun],
        ElementKind::UseCase => &[RuleId::UseCaseNameVerb],
        ElementKind::Class => &[RuleId::ClassNameNoun],
    }
}

/// Rules that apply to every method of a class, in evaluation order
pub const METHOD_RULES: &[RuleId] = &[RuleId::MethodNameVerb, RuleId::MethodNameCase];

/// Evaluates naming rules against a run's feature cache
pub struct NamingRuleEngine<'a> {
    cache: &'a FeatureCache,
    config: &'a RulesConfig,
}

impl<'a> NamingRuleEngine<'a> {
    pub fn new(cache: &'a FeatureCache, config: &'a RulesConfig) -> Self {
        Self { cache, config }
    }

    /// All naming violations of one element, methods included for classes.
    pub fn validate(&self, element: &ModelElement) -> Vec<Violation> {
        let mut violations: Vec<Violation> = rules_for(element.kind())
            .iter()
            .filter(|rule| self.config.is_enabled(**rule))
            .filter_map(|rule| self.check_element(*rule, element))
            .collect();

        for method in element.methods() {
            violations.extend(self.validate_method(element, method));
        }

        if !violations.is_empty() {
            debug!(
                "{} '{}' has {} naming violations",
                element.kind().as_str(),
                element.name,
                violations.len()
            );
        }
        violations
    }

    /// Naming violations of a single method
    pub fn validate_method(&self, owner: &ModelElement, method: &Method) -> Vec<Violation> {
        METHOD_RULES
            .iter()
            .filter(|rule| self.config.is_enabled(**rule))
            .filter_map(|rule| self.check_method(*rule, owner, method))
            .collect()
    }

    fn check_element(&self, rule: RuleId, element: &ModelElement) -> Option<Violation> {
        let features = self.cache.features(&element.name);
        let name = &element.name;

        match rule {
            RuleId::ActorNameNoun => (!features.has_nominal()).then(|| {
                Violation::new(
                    rule,
                    name.as_str(),
                    format!("Actor name '{name}' should be a noun or noun phrase"),
                )
            }),
            RuleId::UseCaseNameVerb => (!features.has_verb()).then(|| {
                Violation::new(
                    rule,
                    name.as_str(),
                    format!("Use case name '{name}' should contain a verb"),
                )
            }),
            RuleId::ClassNameNoun => (!features.has_nominal()).then(|| {
                Violation::new(
                    rule,
                    name.as_str(),
                    format!("Class name '{name}' should be a noun"),
                )
            }),
            _ => None,
        }
    }

    fn check_method(&self, rule: RuleId, owner: &ModelElement, method: &Method) -> Option<Violation> {
        let name = &method.name;

        match rule {
            RuleId::MethodNameVerb => {
                let features = self.cache.features(name);
                (!features.has_verb()).then(|| {
                    Violation::new(
                        rule,
                        name.as_str(),
                        format!(
                            "Method name '{name}' in class '{}' should contain a verb",
                            owner.name
                        ),
                    )
                })
            }
            RuleId::MethodNameCase => {
                let starts_lower = name.chars().next().is_some_and(char::is_lowercase);
                (!starts_lower).then(|| {
                    Violation::new(
                        rule,
                        name.as_str(),
                        format!("Method name '{name}' should be in camelCase"),
                    )
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::linguistic::lexicon::LexiconTagger;

    fn cache() -> FeatureCache {
        FeatureCache::new(Arc::new(LexiconTagger::default()))
    }

    fn rule_ids(violations: &[Violation]) -> Vec<RuleId> {
        violations.iter().map(|v| v.rule_id).collect()
    }

    #[test]
    fn test_rules_registered_per_kind() {
        assert_eq!(rules_for(ElementKind::Actor), &[RuleId::ActorNameNoun]);
        assert_eq!(rules_for(ElementKind::UseCase), &[RuleId::UseCaseNameVerb]);
        assert_eq!(rules_for(ElementKind::Class), &[RuleId::ClassNameNoun]);
    }

    #[test]
    fn test_use_case_rule() {
        let cache = cache();
        let config = RulesConfig::default();
        let engine = NamingRuleEngine::new(&cache, &config);

        assert!(engine.validate(&ModelElement::use_case("uc1", "Login")).is_empty());

        let violations = engine.validate(&ModelElement::use_case("uc2", "System"));
        assert_eq!(rule_ids(&violations), vec![RuleId::UseCaseNameVerb]);
        assert_eq!(violations[0].element_name, "System");
    }

    #[test]
    fn test_actor_rule() {
        let cache = cache();
        let config = RulesConfig::default();
        let engine = NamingRuleEngine::new(&cache, &config);

        assert!(engine.validate(&ModelElement::actor("a1", "Customer")).is_empty());
        assert_eq!(
            rule_ids(&engine.validate(&ModelElement::actor("a2", "Quickly"))),
            vec![RuleId::ActorNameNoun]
        );
    }

    #[test]
    fn test_empty_name_is_a_violation() {
        let cache = cache();
        let config = RulesConfig::default();
        let engine = NamingRuleEngine::new(&cache, &config);

        assert_eq!(
            rule_ids(&engine.validate(&ModelElement::class("c0", "   "))),
            vec![RuleId::ClassNameNoun]
        );
    }

    #[test]
    fn test_class_rules_do_not_short_circuit() {
        let cache = cache();
        let config = RulesConfig {
            enforce_method_case: true,
            ..RulesConfig::default()
        };
        let engine = NamingRuleEngine::new(&cache, &config);

        let class = ModelElement::class("c1", "Quickly")
            .with_method(Method::named("Balance"))
            .with_method(Method::named("authenticateUser"))
            .with_method(Method::named("total"));

        let violations = engine.validate(&class);
        assert_eq!(
            rule_ids(&violations),
            vec![
                RuleId::ClassNameNoun,
                RuleId::MethodNameVerb,
                RuleId::MethodNameCase,
                RuleId::MethodNameVerb,
            ]
        );
        assert_eq!(violations[3].element_name, "total");
    }

    #[test]
    fn test_disabled_rule_is_skipped() {
        let cache = cache();
        let config = RulesConfig {
            disabled: vec![RuleId::MethodNameVerb],
            ..RulesConfig::default()
        };
        let engine = NamingRuleEngine::new(&cache, &config);

        let class = ModelElement::class("c1", "Account").with_method(Method::named("balance"));
        assert!(engine.validate(&class).is_empty());
    }
}

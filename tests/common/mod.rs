//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use semtrace::core::model::{Method, Relationship};
use semtrace::linguistic::features::{PosTag, TaggedToken};
use semtrace::linguistic::lexicon::split_identifier;
use semtrace::{
    DesignModel, LinguisticFeatures, LinguisticService, ModelElement, ModelValidator, Result,
    SemtraceConfig, SemtraceError,
};

const VERBS: &[&str] = &[
    "login", "authenticate", "withdraw", "deposit", "check", "print", "place", "cancel",
    "transfer", "get", "set", "validate",
];

/// Tags every identifier word: listed verbs as VERB, everything else NOUN
pub struct FixtureService;

impl LinguisticService for FixtureService {
    fn analyze(&self, text: &str) -> Result<LinguisticFeatures> {
        let pos_tags = split_identifier(text)
            .into_iter()
            .map(|word| {
                let lower = word.to_lowercase();
                let tag = if VERBS.contains(&lower.as_str()) {
                    PosTag::Verb
                } else {
                    PosTag::Noun
                };
                TaggedToken { token: word, tag }
            })
            .collect();
        Ok(LinguisticFeatures {
            pos_tags,
            ..LinguisticFeatures::default()
        })
    }

    fn name(&self) -> &str {
        "fixture"
    }
}

/// Fails on every call
pub struct FailingService;

impl LinguisticService for FailingService {
    fn analyze(&self, text: &str) -> Result<LinguisticFeatures> {
        Err(SemtraceError::linguistic(text, "model not loaded"))
    }
}

pub fn fixture_validator(config: SemtraceConfig) -> ModelValidator {
    ModelValidator::with_service(config, Arc::new(FixtureService)).unwrap()
}

/// ATM model: one actor, three use cases, two classes
pub fn atm_model() -> DesignModel {
    DesignModel::new()
        .with_element(ModelElement::actor("a1", "Customer"))
        .unwrap()
        .with_element(ModelElement::use_case("uc1", "Withdraw Cash"))
        .unwrap()
        .with_element(ModelElement::use_case("uc2", "Deposit Cash"))
        .unwrap()
        .with_element(ModelElement::use_case("uc3", "Check Balance"))
        .unwrap()
        .with_element(
            ModelElement::class("c1", "Cash Dispenser")
                .with_method(Method::named("withdraw"))
                .with_method(Method::named("deposit")),
        )
        .unwrap()
        .with_element(
            ModelElement::class("c2", "Account Balance").with_method(Method::named("getBalance")),
        )
        .unwrap()
        .with_relationship(Relationship::new("a1", "uc1", "association"))
        .with_relationship(Relationship::new("a1", "uc3", "association"))
}

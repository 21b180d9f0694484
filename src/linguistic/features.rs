//! Linguistic features and the service boundary that produces them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::errors::Result;

/// Part-of-speech tag.
///
/// Only the tags the rules care about get their own variant; anything else a
/// service produces is kept verbatim in [`PosTag::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PosTag {
    Noun,
    ProperNoun,
    Verb,
    Adjective,
    Adverb,
    /// Produced by the raw-tokenization fallback
    Untagged,
    Other(String),
}

impl PosTag {
    pub fn as_str(&self) -> &str {
        match self {
            PosTag::Noun => "NOUN",
            PosTag::ProperNoun => "PROPN",
            PosTag::Verb => "VERB",
            PosTag::Adjective => "ADJ",
            PosTag::Adverb => "ADV",
            PosTag::Untagged => "",
            PosTag::Other(tag) => tag,
        }
    }

    /// NOUN or PROPN
    pub fn is_nominal(&self) -> bool {
        matches!(self, PosTag::Noun | PosTag::ProperNoun)
    }

    pub fn is_verb(&self) -> bool {
        matches!(self, PosTag::Verb)
    }
}

impl From<&str> for PosTag {
    fn from(tag: &str) -> Self {
        match tag {
            "NOUN" => PosTag::Noun,
            "PROPN" => PosTag::ProperNoun,
            "VERB" => PosTag::Verb,
            "ADJ" => PosTag::Adjective,
            "ADV" => PosTag::Adverb,
            "" => PosTag::Untagged,
            other => PosTag::Other(other.to_string()),
        }
    }
}

impl From<String> for PosTag {
    fn from(tag: String) -> Self {
        PosTag::from(tag.as_str())
    }
}

impl From<PosTag> for String {
    fn from(tag: PosTag) -> Self {
        tag.as_str().to_string()
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token with its part-of-speech tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    pub token: String,
    pub tag: PosTag,
}

/// Named entity span
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: String,
}

/// Syntactic dependency arc
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub token: String,
    pub label: String,
    pub head: String,
}

/// Structured output of one linguistic analysis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinguisticFeatures {
    pub pos_tags: Vec<TaggedToken>,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    #[serde(default)]
    pub noun_phrases: Vec<String>,
    #[serde(default)]
    pub verb_phrases: Vec<String>,
}

impl LinguisticFeatures {
    /// Whitespace tokenization, lowercased, every token untagged.
    pub fn raw_tokens(text: &str) -> Self {
        Self {
            pos_tags: text
                .split_whitespace()
                .map(|token| TaggedToken {
                    token: token.to_lowercase(),
                    tag: PosTag::Untagged,
                })
                .collect(),
            ..Self::default()
        }
    }

    /// No tokens at all
    pub fn is_empty(&self) -> bool {
        self.pos_tags.is_empty()
    }

    pub fn has_nominal(&self) -> bool {
        self.pos_tags.iter().any(|t| t.tag.is_nominal())
    }

    pub fn has_verb(&self) -> bool {
        self.pos_tags.iter().any(|t| t.tag.is_verb())
    }

    /// Tokens tagged NOUN or PROPN, as written
    pub fn nouns(&self) -> Vec<String> {
        self.pos_tags
            .iter()
            .filter(|t| t.tag.is_nominal())
            .map(|t| t.token.clone())
            .collect()
    }

    /// Tokens tagged VERB, as written
    pub fn verbs(&self) -> Vec<String> {
        self.pos_tags
            .iter()
            .filter(|t| t.tag.is_verb())
            .map(|t| t.token.clone())
            .collect()
    }
}

/// Per-element semantic properties cached on similarity-graph nodes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticProperties {
    pub nouns: Vec<String>,
    pub verbs: Vec<String>,
    pub entities: Vec<Entity>,
}

impl From<&LinguisticFeatures> for SemanticProperties {
    fn from(features: &LinguisticFeatures) -> Self {
        Self {
            nouns: features.nouns(),
            verbs: features.verbs(),
            entities: features.entities.clone(),
        }
    }
}

/// External provider of linguistic features.
///
/// Implementations must be deterministic for a given text within one run;
/// results are cached by normalized text.
pub trait LinguisticService: Send + Sync {
    /// Analyze a piece of text
    fn analyze(&self, text: &str) -> Result<LinguisticFeatures>;

    /// Short identifier used in logs
    fn name(&self) -> &str {
        "linguistic-service"
    }
}

/// Cache key: trimmed, internal whitespace collapsed, case kept.
///
/// Taggers split on case boundaries, so case variants must not share a key.
pub fn normalize_key(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

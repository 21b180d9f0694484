//! Rule-based linguistic service.
//!
//! A deterministic stand-in for a statistical tagger, tuned for the short
//! identifiers found in design models ("Place Order", "UserManager",
//! "authenticateUser"). Identifiers are split on whitespace, separators and
//! camelCase boundaries, then tagged from closed word lists and suffix rules.
//! Anything alphabetic that no rule claims is a noun.

use std::collections::HashSet;

use crate::core::config::LinguisticConfig;
use crate::core::errors::Result;

use super::features::{
    Dependency, Entity, LinguisticFeatures, LinguisticService, PosTag, TaggedToken,
};

const VERBS: &[&str] = &[
    "accept", "activate", "add", "allow", "analyze", "apply", "approve", "archive", "assign",
    "attach", "authenticate", "authorize", "browse", "build", "buy", "calculate", "call",
    "cancel", "change", "checkout", "choose", "clear", "close", "collect", "compile", "compute",
    "configure", "confirm", "connect", "convert", "create", "deactivate", "decline", "delete",
    "deliver", "deny", "detect", "disable", "dispatch", "do", "download", "edit", "enable",
    "encrypt", "enroll", "enter", "evaluate", "execute", "fetch", "find", "generate", "get",
    "give", "go", "handle", "has", "initialize", "insert", "install", "invoke", "is", "join",
    "load", "login", "logout", "lookup", "maintain", "make", "manage", "merge", "modify",
    "monitor", "move", "notify", "open", "parse", "pay", "perform", "persist", "place",
    "prepare", "provide", "publish", "put", "read", "receive", "recover", "refresh", "reject",
    "remove", "rename", "render", "renew", "reply", "reset", "resolve", "restore", "retrieve",
    "run", "save", "select", "send", "signin", "signout", "signup", "sort", "start", "stop",
    "store", "submit", "subscribe", "sync", "take", "unsubscribe", "update", "upload", "use",
    "validate", "verify", "withdraw", "write",
];

// Words that are verbs at the head of a multi-word name and nouns elsewhere.
const NOUN_VERBS: &[&str] = &[
    "book", "check", "control", "copy", "count", "deposit", "design", "display", "export",
    "filter", "import", "list", "log", "order", "post", "print", "process", "purchase", "query",
    "record", "refund", "register", "report", "request", "reserve", "return", "review",
    "schedule", "search", "set", "share", "sign", "track", "transfer", "view",
];

const ADVERBS: &[&str] = &[
    "again", "already", "also", "always", "automatically", "never", "now", "often", "quickly",
    "rarely", "securely", "slowly", "soon", "then", "too", "very",
];

const ADJECTIVES: &[&str] = &[
    "active", "available", "big", "default", "external", "global", "internal", "invalid", "large",
    "local", "main", "new", "old", "online", "pending", "primary", "private", "public", "remote",
    "secure", "small", "valid",
];

const FUNCTION_WORDS: &[(&str, &str)] = &[
    ("a", "DET"), ("an", "DET"), ("the", "DET"), ("this", "DET"), ("that", "DET"),
    ("all", "DET"), ("each", "DET"), ("every", "DET"), ("some", "DET"), ("my", "PRON"),
    ("your", "PRON"), ("his", "PRON"), ("her", "PRON"), ("its", "PRON"), ("their", "PRON"),
    ("it", "PRON"), ("to", "ADP"), ("of", "ADP"), ("in", "ADP"), ("on", "ADP"), ("for", "ADP"),
    ("from", "ADP"), ("with", "ADP"), ("by", "ADP"), ("into", "ADP"), ("at", "ADP"),
    ("and", "CCONJ"), ("or", "CCONJ"), ("but", "CCONJ"),
];

// "-ly" nouns the adverb suffix rule must not claim.
const LY_NOUNS: &[&str] = &[
    "ally", "anomaly", "assembly", "belly", "family", "italy", "july", "monopoly", "rally",
    "supply",
];

/// Lexicon-driven tagger implementing [`LinguisticService`]
#[derive(Debug, Clone)]
pub struct LexiconTagger {
    verbs: HashSet<String>,
    noun_verbs: HashSet<String>,
    adverbs: HashSet<String>,
    adjectives: HashSet<String>,
}

impl Default for LexiconTagger {
    fn default() -> Self {
        Self::new(&LinguisticConfig::default())
    }
}

impl LexiconTagger {
    /// Built-in lexicons extended with the configured words
    pub fn new(config: &LinguisticConfig) -> Self {
        fn build(base: &[&str], extra: &[String]) -> HashSet<String> {
            base.iter()
                .map(|w| (*w).to_string())
                .chain(extra.iter().map(|w| w.to_lowercase()))
                .collect()
        }

        Self {
            verbs: build(VERBS, &config.extra_verbs),
            noun_verbs: build(NOUN_VERBS, &[]),
            adverbs: build(ADVERBS, &config.extra_adverbs),
            adjectives: build(ADJECTIVES, &config.extra_adjectives),
        }
    }

    fn is_verb_form(&self, lower: &str, lexicon: &HashSet<String>) -> bool {
        if lexicon.contains(lower) {
            return true;
        }
        verb_stems(lower).iter().any(|stem| lexicon.contains(stem))
    }

    fn tag_token(&self, token: &str, position: usize, token_count: usize) -> PosTag {
        let lower = token.to_lowercase();

        if let Some((_, tag)) = FUNCTION_WORDS.iter().find(|(word, _)| *word == lower) {
            return PosTag::Other((*tag).to_string());
        }
        if lower.chars().all(|c| c.is_ascii_digit()) {
            return PosTag::Other("NUM".to_string());
        }
        if self.is_verb_form(&lower, &self.verbs) {
            return PosTag::Verb;
        }
        if self.is_verb_form(&lower, &self.noun_verbs) {
            return if position == 0 && token_count > 1 {
                PosTag::Verb
            } else {
                PosTag::Noun
            };
        }
        if self.adverbs.contains(&lower)
            || (lower.len() >= 6 && lower.ends_with("ly") && !LY_NOUNS.contains(&lower.as_str()))
        {
            return PosTag::Adverb;
        }
        if self.adjectives.contains(&lower)
            || ["able", "ible", "ful", "ous"]
                .iter()
                .any(|suffix| lower.len() > suffix.len() + 2 && lower.ends_with(suffix))
        {
            return PosTag::Adjective;
        }
        if lower.len() > 4 && (lower.ends_with("ize") || lower.ends_with("ify")) {
            return PosTag::Verb;
        }
        if token.len() >= 2 && token.chars().all(|c| c.is_ascii_uppercase()) {
            return PosTag::ProperNoun;
        }
        PosTag::Noun
    }
}

impl LinguisticService for LexiconTagger {
    fn analyze(&self, text: &str) -> Result<LinguisticFeatures> {
        let tokens = split_identifier(text);
        let pos_tags: Vec<TaggedToken> = tokens
            .iter()
            .enumerate()
            .map(|(position, token)| TaggedToken {
                token: token.clone(),
                tag: self.tag_token(token, position, tokens.len()),
            })
            .collect();

        Ok(LinguisticFeatures {
            entities: entities(&pos_tags),
            dependencies: dependencies(&pos_tags),
            noun_phrases: noun_phrases(&pos_tags),
            verb_phrases: pos_tags
                .iter()
                .filter(|t| t.tag.is_verb())
                .map(|t| t.token.clone())
                .collect(),
            pos_tags,
        })
    }

    fn name(&self) -> &str {
        "lexicon-tagger"
    }
}

/// Split on whitespace, punctuation, `_`, `-` and camelCase boundaries.
///
/// `"HTTPServer"` splits as `["HTTP", "Server"]`; digits form their own tokens.
pub fn split_identifier(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();

    for word in text.split(|c: char| !c.is_alphanumeric()) {
        let chars: Vec<char> = word.chars().collect();
        let mut start = 0;

        for i in 1..chars.len() {
            let (prev, cur) = (chars[i - 1], chars[i]);
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            let boundary = (prev.is_lowercase() && cur.is_uppercase())
                || (prev.is_uppercase() && cur.is_uppercase() && next_is_lower)
                || (prev.is_alphabetic() != cur.is_alphabetic());
            if boundary {
                tokens.push(chars[start..i].iter().collect());
                start = i;
            }
        }
        if start < chars.len() {
            tokens.push(chars[start..].iter().collect());
        }
    }

    tokens
}

/// Candidate base forms of an inflected verb
fn verb_stems(lower: &str) -> Vec<String> {
    let mut stems = Vec::new();
    for suffix in ["ing", "ed", "es", "s"] {
        if let Some(stem) = lower.strip_suffix(suffix) {
            if stem.len() < 2 {
                continue;
            }
            stems.push(stem.to_string());
            if suffix == "ing" || suffix == "ed" {
                stems.push(format!("{stem}e"));
            }
        }
    }
    stems
}

fn entities(tags: &[TaggedToken]) -> Vec<Entity> {
    let mut entities = Vec::new();
    let mut run: Vec<&str> = Vec::new();

    for token in tags.iter().map(Some).chain(std::iter::once(None)) {
        match token {
            Some(t) if t.tag == PosTag::ProperNoun => run.push(&t.token),
            _ if !run.is_empty() => {
                entities.push(Entity {
                    text: run.join(" "),
                    label: "MISC".to_string(),
                });
                run.clear();
            }
            _ => {}
        }
    }

    entities
}

/// Maximal runs of adjectives followed by nouns
fn noun_phrases(tags: &[TaggedToken]) -> Vec<String> {
    let mut phrases = Vec::new();
    let mut run: Vec<&str> = Vec::new();
    let mut has_noun = false;

    for token in tags.iter().map(Some).chain(std::iter::once(None)) {
        match token {
            Some(t) if t.tag == PosTag::Adjective && !has_noun => run.push(&t.token),
            Some(t) if t.tag.is_nominal() => {
                run.push(&t.token);
                has_noun = true;
            }
            _ => {
                if has_noun {
                    phrases.push(run.join(" "));
                }
                run.clear();
                has_noun = false;
                if let Some(t) = token {
                    if t.tag == PosTag::Adjective {
                        run.push(&t.token);
                    }
                }
            }
        }
    }

    phrases
}

/// Flat dependency structure: the first verb (or last noun) is the root.
fn dependencies(tags: &[TaggedToken]) -> Vec<Dependency> {
    let root = tags
        .iter()
        .position(|t| t.tag.is_verb())
        .or_else(|| tags.iter().rposition(|t| t.tag.is_nominal()));
    let Some(root) = root else {
        return Vec::new();
    };
    let root_token = &tags[root].token;
    let root_is_verb = tags[root].tag.is_verb();

    tags.iter()
        .enumerate()
        .map(|(i, t)| {
            let next_is_nominal = tags.get(i + 1).is_some_and(|n| n.tag.is_nominal());
            let (label, head) = if i == root {
                ("ROOT", t.token.clone())
            } else if t.tag.is_nominal() && next_is_nominal && i + 1 != root {
                ("compound", tags[i + 1].token.clone())
            } else if t.tag.is_nominal() && !root_is_verb && next_is_nominal {
                ("compound", root_token.clone())
            } else if t.tag.is_nominal() && root_is_verb && i < root {
                ("nsubj", root_token.clone())
            } else if t.tag.is_nominal() && root_is_verb {
                ("dobj", root_token.clone())
            } else if t.tag == PosTag::Adjective {
                ("amod", root_token.clone())
            } else {
                ("dep", root_token.clone())
            };
            Dependency {
                token: t.token.clone(),
                label: label.to_string(),
                head,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(text: &str) -> Vec<(String, String)> {
        LexiconTagger::default()
            .analyze(text)
            .unwrap()
            .pos_tags
            .into_iter()
            .map(|t| (t.token, t.tag.as_str().to_string()))
            .collect()
    }

    fn tag_of(text: &str) -> Vec<String> {
        tags(text).into_iter().map(|(_, tag)| tag).collect()
    }

    #[test]
    fn test_split_identifier() {
        assert_eq!(split_identifier("authenticateUser"), vec!["authenticate", "User"]);
        assert_eq!(split_identifier("UserManager"), vec!["User", "Manager"]);
        assert_eq!(split_identifier("HTTPServer"), vec!["HTTP", "Server"]);
        assert_eq!(split_identifier("place_order-v2"), vec!["place", "order", "v", "2"]);
        assert_eq!(split_identifier("Withdraw  Cash!"), vec!["Withdraw", "Cash"]);
        assert!(split_identifier("   ").is_empty());
    }

    #[test]
    fn test_common_names() {
        assert_eq!(tag_of("Login"), vec!["VERB"]);
        assert_eq!(tag_of("System"), vec!["NOUN"]);
        assert_eq!(tag_of("Customer"), vec!["NOUN"]);
        assert_eq!(tag_of("Quickly"), vec!["ADV"]);
        assert_eq!(tag_of("Authenticate User"), vec!["VERB", "NOUN"]);
        assert_eq!(tag_of("UserManager"), vec!["NOUN", "NOUN"]);
        assert_eq!(tag_of("authenticateUser"), vec!["VERB", "NOUN"]);
    }

    #[test]
    fn test_noun_verbs_depend_on_position() {
        assert_eq!(tag_of("Place Order"), vec!["VERB", "NOUN"]);
        assert_eq!(tag_of("Order History"), vec!["VERB", "NOUN"]);
        assert_eq!(tag_of("Report"), vec!["NOUN"]);
        assert_eq!(tag_of("ReportGenerator"), vec!["VERB", "NOUN"]);
        assert_eq!(tag_of("Search Catalog"), vec!["VERB", "NOUN"]);
    }

    #[test]
    fn test_inflected_verbs() {
        assert_eq!(tag_of("creates"), vec!["VERB"]);
        assert_eq!(tag_of("validated"), vec!["VERB"]);
        assert_eq!(tag_of("updating"), vec!["VERB"]);
    }

    #[test]
    fn test_suffix_rules() {
        assert_eq!(tag_of("Family"), vec!["NOUN"]);
        assert_eq!(tag_of("Reusable"), vec!["ADJ"]);
        assert_eq!(tag_of("normalize"), vec!["VERB"]);
        assert_eq!(tag_of("ATM"), vec!["PROPN"]);
    }

    #[test]
    fn test_extra_verbs_from_config() {
        let config = LinguisticConfig {
            extra_verbs: vec!["Onboard".to_string()],
            ..LinguisticConfig::default()
        };
        let tagger = LexiconTagger::new(&config);
        let features = tagger.analyze("Onboard Employee").unwrap();
        assert!(features.pos_tags[0].tag.is_verb());
    }

    #[test]
    fn test_phrases_and_dependencies() {
        let features = LexiconTagger::default()
            .analyze("Customer withdraws new cash")
            .unwrap();

        assert_eq!(features.verb_phrases, vec!["withdraws"]);
        assert_eq!(features.noun_phrases, vec!["Customer", "new cash"]);

        let labels: Vec<_> = features
            .dependencies
            .iter()
            .map(|d| (d.token.as_str(), d.label.as_str(), d.head.as_str()))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("Customer", "nsubj", "withdraws"),
                ("withdraws", "ROOT", "withdraws"),
                ("new", "amod", "withdraws"),
                ("cash", "dobj", "withdraws"),
            ]
        );
    }

    #[test]
    fn test_entities_from_acronyms() {
        let features = LexiconTagger::default().analyze("Use ATM Card").unwrap();
        assert_eq!(features.entities.len(), 1);
        assert_eq!(features.entities[0].text, "ATM");
    }

    #[test]
    fn test_empty_text() {
        let features = LexiconTagger::default().analyze("").unwrap();
        assert!(features.is_empty());
        assert!(features.dependencies.is_empty());
    }
}

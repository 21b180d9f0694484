//! Per-run feature cache in front of a linguistic service.
//!
//! Many rules and engines look at the same names. A [`FeatureCache`] is created
//! at the start of a validation run and dropped at its end; entries are keyed by
//! [`normalize_key`] and never invalidated mid-run.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, warn};

use super::features::{normalize_key, LinguisticFeatures, LinguisticService, SemanticProperties};

/// Cache hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub fallbacks: usize,
}

/// Memoizing wrapper around a [`LinguisticService`]
pub struct FeatureCache {
    service: Arc<dyn LinguisticService>,
    entries: DashMap<String, Arc<LinguisticFeatures>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
    fallbacks: AtomicUsize,
}

impl FeatureCache {
    pub fn new(service: Arc<dyn LinguisticService>) -> Self {
        Self {
            service,
            entries: DashMap::new(),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
            fallbacks: AtomicUsize::new(0),
        }
    }

    /// Features for `text`; never fails.
    ///
    /// A service error or an empty result for non-blank text degrades to
    /// [`LinguisticFeatures::raw_tokens`].
    pub fn features(&self, text: &str) -> Arc<LinguisticFeatures> {
        let key = normalize_key(text);
        if let Some(hit) = self.entries.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Arc::clone(hit.value());
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let features = match self.service.analyze(text) {
            Ok(features) if !features.is_empty() || key.is_empty() => features,
            Ok(_) => {
                warn!(
                    "{} returned no tokens for '{}', using raw tokenization",
                    self.service.name(),
                    text
                );
                self.fallbacks.fetch_add(1, Ordering::Relaxed);
                LinguisticFeatures::raw_tokens(text)
            }
            Err(e) => {
                warn!("{} failed: {}; using raw tokenization", self.service.name(), e);
                self.fallbacks.fetch_add(1, Ordering::Relaxed);
                LinguisticFeatures::raw_tokens(text)
            }
        };
        debug!("Analyzed '{}' into {} tokens", text, features.pos_tags.len());

        let entry = self.entries.entry(key).or_insert_with(|| Arc::new(features));
        Arc::clone(entry.value())
    }

    /// Nouns, verbs and entities of `text`
    pub fn semantic_properties(&self, text: &str) -> SemanticProperties {
        SemanticProperties::from(self.features(text).as_ref())
    }

    /// Lower-cased verb tokens of `text`
    pub fn verbs(&self, text: &str) -> Vec<String> {
        self.features(text)
            .verbs()
            .into_iter()
            .map(|verb| verb.to_lowercase())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            fallbacks: self.fallbacks.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::{Result, SemtraceError};
    use crate::linguistic::features::{PosTag, TaggedToken};
    use crate::linguistic::lexicon::LexiconTagger;

    struct CountingService {
        calls: AtomicUsize,
    }

    impl LinguisticService for CountingService {
        fn analyze(&self, text: &str) -> Result<LinguisticFeatures> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(LinguisticFeatures {
                pos_tags: text
                    .split_whitespace()
                    .map(|t| TaggedToken {
                        token: t.to_string(),
                        tag: PosTag::Verb,
                    })
                    .collect(),
                ..LinguisticFeatures::default()
            })
        }
    }

    struct BrokenService;

    impl LinguisticService for BrokenService {
        fn analyze(&self, text: &str) -> Result<LinguisticFeatures> {
            Err(SemtraceError::linguistic(text, "model not loaded"))
        }
    }

    struct SilentService;

    impl LinguisticService for SilentService {
        fn analyze(&self, _text: &str) -> Result<LinguisticFeatures> {
            Ok(LinguisticFeatures::default())
        }
    }

    #[test]
    fn test_cache_hits_on_normalized_text() {
        let service = Arc::new(CountingService {
            calls: AtomicUsize::new(0),
        });
        let cache = FeatureCache::new(service.clone());

        cache.features("Place Order");
        cache.features("  Place   Order ");
        cache.features("Place\tOrder");

        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 2,
                misses: 1,
                fallbacks: 0
            }
        );
    }

    #[test]
    fn test_case_variants_are_analyzed_separately() {
        let cache = FeatureCache::new(Arc::new(LexiconTagger::default()));

        let noun = cache.features("Setup");
        let method = cache.features("setUp");

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().misses, 2);
        assert!(!noun.has_verb());
        assert!(method.has_verb());
    }

    #[test]
    fn test_service_error_falls_back_to_raw_tokens() {
        let cache = FeatureCache::new(Arc::new(BrokenService));
        let features = cache.features("Authenticate User");

        assert_eq!(features.pos_tags.len(), 2);
        assert!(features.pos_tags.iter().all(|t| t.tag == PosTag::Untagged));
        assert_eq!(cache.stats().fallbacks, 1);
    }

    #[test]
    fn test_empty_result_falls_back_but_blank_text_does_not() {
        let cache = FeatureCache::new(Arc::new(SilentService));

        assert_eq!(cache.features("Login").pos_tags[0].token, "login");
        assert!(cache.features("   ").is_empty());
        assert_eq!(cache.stats().fallbacks, 1);
    }

    #[test]
    fn test_verbs_are_lowercased() {
        let cache = FeatureCache::new(Arc::new(CountingService {
            calls: AtomicUsize::new(0),
        }));
        assert_eq!(cache.verbs("Authenticate"), vec!["authenticate".to_string()]);
    }
}

//! Holder of the currently loaded model
//!
//! Readers take an `Arc` snapshot and keep using it for the whole request;
//! a retrain replaces the `Arc` in one store, so a request sees either the
//! old model or the new one, never a mix.

use crate::error::{RecommenderError, Result};
use crate::recommender::model::{ScoringProfile, VocabularyModel};
use log::{info, warn};
use std::sync::{Arc, RwLock};

#[derive(Debug)]
pub struct ModelRegistry {
    current: RwLock<Option<Arc<VocabularyModel>>>,
    configured_profile: ScoringProfile,
}

impl ModelRegistry {
    pub fn new(configured_profile: ScoringProfile) -> Self {
        Self {
            current: RwLock::new(None),
            configured_profile,
        }
    }

    pub fn with_model(model: VocabularyModel, configured_profile: ScoringProfile) -> Self {
        let registry = Self::new(configured_profile);
        registry.swap(Arc::new(model));
        registry
    }

    /// Snapshot of the loaded model, or `ModelNotLoaded`
    pub fn current(&self) -> Result<Arc<VocabularyModel>> {
        self.peek().ok_or(RecommenderError::ModelNotLoaded)
    }

    pub fn peek(&self) -> Option<Arc<VocabularyModel>> {
        let guard = self.current.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.peek().is_some()
    }

    /// Install a new model, returning the one it replaced
    pub fn swap(&self, model: Arc<VocabularyModel>) -> Option<Arc<VocabularyModel>> {
        if model.is_stale_against(&self.configured_profile) {
            warn!(
                "Loaded model was trained with scoring profile {:?}, configuration now has {:?}; retrain to apply",
                model.profile, self.configured_profile
            );
        }
        info!(
            "Activating model trained at {} ({} terms)",
            model.trained_at,
            model.vocabulary_size()
        );

        let mut guard = self.current.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.replace(model)
    }

    pub fn configured_profile(&self) -> &ScoringProfile {
        &self.configured_profile
    }

    /// Whether the active model's baked-in profile differs from configuration
    pub fn is_profile_stale(&self) -> bool {
        self.peek()
            .map(|model| model.is_stale_against(&self.configured_profile))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::processing::vectorizer::TfIdfVectorizer;

    fn model(doc: &str, profile: ScoringProfile) -> VocabularyModel {
        VocabularyModel::new(TfIdfVectorizer::fit(&[doc.to_string()], 500).unwrap(), profile, 1)
    }

    #[test]
    fn test_empty_registry() {
        let registry = ModelRegistry::new(Config::default().scoring_profile());
        assert!(!registry.is_loaded());
        assert!(matches!(registry.current(), Err(RecommenderError::ModelNotLoaded)));
        assert!(!registry.is_profile_stale());
    }

    #[test]
    fn test_swap_keeps_old_snapshot_alive() {
        let profile = Config::default().scoring_profile();
        let registry = ModelRegistry::with_model(model("python", profile), profile);

        let in_flight = registry.current().unwrap();
        let previous = registry.swap(Arc::new(model("rust go", profile)));

        assert!(in_flight.vectorizer.contains("python"));
        assert!(previous.unwrap().vectorizer.contains("python"));
        assert!(registry.current().unwrap().vectorizer.contains("rust"));
    }

    #[test]
    fn test_stale_profile_detection() {
        let configured = Config::default().scoring_profile();
        let mut trained = configured;
        trained.min_match_threshold = 0.3;

        let registry = ModelRegistry::with_model(model("python", trained), configured);
        assert!(registry.is_profile_stale());
    }

    #[test]
    fn test_concurrent_readers_see_whole_models() {
        let profile = Config::default().scoring_profile();
        let registry = Arc::new(ModelRegistry::with_model(model("python", profile), profile));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        let snapshot = registry.current().unwrap();
                        let size = snapshot.vocabulary_size();
                        assert!(size == 1 || size == 2);
                    }
                })
            })
            .collect();

        for i in 0..50 {
            let doc = if i % 2 == 0 { "rust go" } else { "python" };
            registry.swap(Arc::new(model(doc, profile)));
        }

        for reader in readers {
            reader.join().unwrap();
        }
    }
}

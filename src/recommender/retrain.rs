//! Explicit retrain trigger: fetch corpus, fit, persist, swap

use crate::error::Result;
use crate::recommender::artifact::ArtifactStore;
use crate::recommender::builder::VocabularyBuilder;
use crate::recommender::model::VocabularyModel;
use crate::recommender::registry::ModelRegistry;
use crate::store::DataStore;
use log::{error, info};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct Retrainer<S, A> {
    store: Arc<S>,
    artifacts: A,
    artifact_path: PathBuf,
    builder: VocabularyBuilder,
    registry: Arc<ModelRegistry>,
    running: Mutex<()>,
}

impl<S: DataStore, A: ArtifactStore> Retrainer<S, A> {
    pub fn new(
        store: Arc<S>,
        artifacts: A,
        artifact_path: PathBuf,
        builder: VocabularyBuilder,
        registry: Arc<ModelRegistry>,
    ) -> Self {
        Self {
            store,
            artifacts,
            artifact_path,
            builder,
            registry,
            running: Mutex::new(()),
        }
    }

    pub fn registry(&self) -> &Arc<ModelRegistry> {
        &self.registry
    }

    /// Any failure leaves the active model untouched. Overlapping calls run
    /// one after the other.
    pub async fn retrain(&self) -> Result<Arc<VocabularyModel>> {
        let _guard = self.running.lock().await;
        info!("Retrain started");

        let outcome = self.fit_and_persist().await;
        match outcome {
            Ok(model) => {
                let model = Arc::new(model);
                self.registry.swap(Arc::clone(&model));
                info!(
                    "Retrain complete: {} documents, {} terms",
                    model.document_count,
                    model.vocabulary_size()
                );
                Ok(model)
            }
            Err(e) => {
                error!("Retrain failed, keeping previous model: {}", e);
                Err(e)
            }
        }
    }

    async fn fit_and_persist(&self) -> Result<VocabularyModel> {
        let corpus = self.store.fetch_skill_corpus().await?;
        info!("Fetched {} skill entries", corpus.len());

        let model = self.builder.fit(&corpus)?;
        self.artifacts.save(&self.artifact_path, &model)?;
        Ok(model)
    }
}

//! Persistence of trained models

use crate::error::{RecommenderError, Result};
use crate::recommender::model::VocabularyModel;
use log::info;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

pub trait ArtifactStore: Send + Sync {
    fn load(&self, path: &Path) -> Result<VocabularyModel>;

    fn save(&self, path: &Path, model: &VocabularyModel) -> Result<()>;
}

/// Pretty-printed JSON, written to a sibling temp file then renamed into
/// place so readers never observe a partial artifact
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonArtifactStore;

impl ArtifactStore for JsonArtifactStore {
    fn load(&self, path: &Path) -> Result<VocabularyModel> {
        if !path.exists() {
            return Err(RecommenderError::ModelLoading(format!(
                "Model artifact not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let model: VocabularyModel = serde_json::from_str(&content).map_err(|e| {
            RecommenderError::ModelLoading(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        model.validate()?;

        info!(
            "Loaded model from {} ({} terms, trained {})",
            path.display(),
            model.vocabulary_size(),
            model.trained_at
        );
        Ok(model)
    }

    fn save(&self, path: &Path, model: &VocabularyModel) -> Result<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        let mut temp = NamedTempFile::new_in(parent)?;
        serde_json::to_writer_pretty(&mut temp, model)?;
        temp.flush()?;
        temp.persist(path).map_err(|e| RecommenderError::Io(e.error))?;

        info!("Saved model to {}", path.display());
        Ok(())
    }
}

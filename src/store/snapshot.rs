//! JSON snapshot reader for offline training and local serving
//!
//! A snapshot directory holds `freelancers.json` (array of freelancer rows)
//! and optionally `reviews.json` (array of review rows).

use crate::error::{RecommenderError, Result};
use crate::processing::skills::SkillField;
use crate::store::{DataStore, RawFreelancer, RawReview};
use log::{info, warn};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio::fs;

pub const FREELANCERS_FILE: &str = "freelancers.json";
pub const REVIEWS_FILE: &str = "reviews.json";

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read_rows<T: DeserializeOwned>(&self, file: &str, required: bool) -> Result<Vec<T>> {
        let path = self.dir.join(file);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
                warn!("Snapshot file {} not found, treating as empty", path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(RecommenderError::UpstreamFetch(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let rows: Option<Vec<T>> = serde_json::from_str(&content).map_err(|e| {
            RecommenderError::UpstreamFetch(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        let rows = rows.unwrap_or_default();
        info!("Read {} rows from {}", rows.len(), path.display());
        Ok(rows)
    }
}

impl DataStore for SnapshotStore {
    async fn fetch_candidates(&self) -> Result<Vec<RawFreelancer>> {
        self.read_rows(FREELANCERS_FILE, true).await
    }

    async fn fetch_reviews(&self) -> Result<Vec<RawReview>> {
        self.read_rows(REVIEWS_FILE, false).await
    }

    async fn fetch_skill_corpus(&self) -> Result<Vec<SkillField>> {
        let freelancers: Vec<RawFreelancer> = self.read_rows(FREELANCERS_FILE, true).await?;
        Ok(freelancers.into_iter().map(|f| f.skills).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_mixed_shapes() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(FREELANCERS_FILE),
            r#"[
                {"id": 1, "username": "ana", "skills": ["Python", "SQL"], "experience": "4"},
                {"id": "b2", "username": "bo", "skills": "java;spring", "experience": null},
                {"id": 3, "skills": null}
            ]"#,
        )
        .unwrap();
        std::fs::write(
            temp_dir.path().join(REVIEWS_FILE),
            r#"[{"freelancer": 1, "stars": 5}, {"freelancer": 1, "stars": "n/a"}]"#,
        )
        .unwrap();

        let store = SnapshotStore::new(temp_dir.path());
        let freelancers = store.fetch_candidates().await.unwrap();
        let reviews = store.fetch_reviews().await.unwrap();
        let corpus = store.fetch_skill_corpus().await.unwrap();

        assert_eq!(freelancers.len(), 3);
        assert_eq!(reviews.len(), 2);
        assert_eq!(corpus[1], SkillField::Text("java;spring".to_string()));
        assert!(corpus[2].is_missing());
    }

    #[tokio::test]
    async fn test_missing_reviews_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(FREELANCERS_FILE), "[]").unwrap();

        let store = SnapshotStore::new(temp_dir.path());
        assert!(store.fetch_reviews().await.unwrap().is_empty());
        assert!(store.fetch_candidates().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_freelancers_file_is_upstream_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(temp_dir.path());

        assert!(matches!(
            store.fetch_candidates().await,
            Err(RecommenderError::UpstreamFetch(_))
        ));
    }

    #[tokio::test]
    async fn test_malformed_file_is_upstream_error() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(FREELANCERS_FILE), "{not json").unwrap();

        let store = SnapshotStore::new(temp_dir.path());
        assert!(matches!(
            store.fetch_candidates().await,
            Err(RecommenderError::UpstreamFetch(_))
        ));
    }
}

//! CSV dataset reader for offline training
//!
//! The dataset is a header row plus one row per freelancer. Only the skills
//! column is required; `id`, `username`/`name` and
//! `years_of_experience`/`experience` are picked up when present.

use crate::error::{RecommenderError, Result};
use crate::processing::skills::SkillField;
use crate::store::{DataStore, RawFreelancer, RawReview};
use ::csv::{ReaderBuilder, StringRecord};
use log::info;
use serde_json::Value;
use std::path::{Path, PathBuf};

pub const DEFAULT_SKILLS_COLUMN: &str = "Skills";

#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
    skills_column: String,
}

struct Dataset {
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

impl Dataset {
    /// Exact header match first, then case-insensitive
    fn column(&self, names: &[&str]) -> Option<usize> {
        names
            .iter()
            .find_map(|name| self.headers.iter().position(|h| h.trim() == *name))
            .or_else(|| {
                names.iter().find_map(|name| {
                    self.headers
                        .iter()
                        .position(|h| h.trim().eq_ignore_ascii_case(name))
                })
            })
    }
}

fn cell(row: &StringRecord, index: Option<usize>) -> Value {
    match index.and_then(|i| row.get(i)) {
        Some(text) if !text.trim().is_empty() => Value::String(text.to_string()),
        _ => Value::Null,
    }
}

fn skills_cell(row: &StringRecord, index: usize) -> SkillField {
    match row.get(index) {
        Some(text) if !text.trim().is_empty() => SkillField::Text(text.to_string()),
        _ => SkillField::Missing,
    }
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>, skills_column: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            skills_column: skills_column.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Dataset> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            RecommenderError::UpstreamFetch(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        let parse_error = |e: ::csv::Error| {
            RecommenderError::UpstreamFetch(format!("Failed to parse {}: {}", self.path.display(), e))
        };

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_reader(bytes.as_slice());
        let headers = reader.headers().map_err(parse_error)?.clone();
        let rows = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(parse_error)?;

        info!("Read {} rows from {}", rows.len(), self.path.display());
        Ok(Dataset { headers, rows })
    }

    fn skills_index(&self, dataset: &Dataset) -> Result<usize> {
        dataset.column(&[self.skills_column.as_str()]).ok_or_else(|| {
            RecommenderError::Configuration(format!(
                "Column '{}' not found in {}",
                self.skills_column,
                self.path.display()
            ))
        })
    }
}

impl DataStore for CsvStore {
    async fn fetch_candidates(&self) -> Result<Vec<RawFreelancer>> {
        let dataset = self.read().await?;
        let skills = self.skills_index(&dataset)?;
        let id = dataset.column(&["id"]);
        let username = dataset.column(&["username", "name"]);
        let experience = dataset.column(&["years_of_experience", "experience"]);

        Ok(dataset
            .rows
            .iter()
            .enumerate()
            .map(|(row_number, row)| RawFreelancer {
                id: match cell(row, id) {
                    Value::Null => Value::from(row_number),
                    value => value,
                },
                username: cell(row, username),
                skills: skills_cell(row, skills),
                experience: cell(row, experience),
            })
            .collect())
    }

    /// The dataset layout has no review rows
    async fn fetch_reviews(&self) -> Result<Vec<RawReview>> {
        Ok(Vec::new())
    }

    async fn fetch_skill_corpus(&self) -> Result<Vec<SkillField>> {
        let dataset = self.read().await?;
        let skills = self.skills_index(&dataset)?;
        Ok(dataset.rows.iter().map(|row| skills_cell(row, skills)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::skills::to_token_string;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_dataset(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("final_dataset.csv");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_skill_corpus_fills_blanks() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_dataset(
            &temp_dir,
            "name,Skills,rating,years_of_experience\n\
             ana,\"Python; SQL\",4.5,3\n\
             bo,,3,1\n\
             cy,Java;Spring,5,7\n",
        );
        let store = CsvStore::new(path, DEFAULT_SKILLS_COLUMN);

        let corpus = store.fetch_skill_corpus().await.unwrap();

        assert_eq!(corpus.len(), 3);
        assert_eq!(to_token_string(&corpus[0]), "python sql");
        assert!(corpus[1].is_missing());
        assert_eq!(to_token_string(&corpus[2]), "java spring");
    }

    #[tokio::test]
    async fn test_candidates_from_optional_columns() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_dataset(
            &temp_dir,
            "name,skills,years_of_experience\nana,Rust,4\nbo,Go,\n",
        );
        let store = CsvStore::new(path, DEFAULT_SKILLS_COLUMN);

        let candidates = store.fetch_candidates().await.unwrap();

        assert_eq!(candidates[0].id, json!(0));
        assert_eq!(candidates[1].id, json!(1));
        assert_eq!(candidates[0].username, json!("ana"));
        assert_eq!(candidates[0].experience, json!("4"));
        assert_eq!(candidates[1].experience, Value::Null);
        assert!(store.fetch_reviews().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_column_and_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_dataset(&temp_dir, "name,rating\nana,4\n");

        assert!(matches!(
            CsvStore::new(path, "Skills").fetch_skill_corpus().await,
            Err(RecommenderError::Configuration(_))
        ));
        assert!(matches!(
            CsvStore::new(temp_dir.path().join("absent.csv"), "Skills")
                .fetch_skill_corpus()
                .await,
            Err(RecommenderError::UpstreamFetch(_))
        ));
    }
}

//! Data store readers for freelancer and review records

pub mod dataset;
pub mod memory;
pub mod rest;
pub mod snapshot;

use crate::error::Result;
use crate::processing::skills::SkillField;
use serde::Deserialize;
use serde_json::Value;
use std::future::Future;

pub use dataset::CsvStore;
pub use memory::InMemoryStore;
pub use rest::RestStore;
pub use snapshot::SnapshotStore;

/// Freelancer row as fetched; every column is optional and loosely typed
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFreelancer {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub username: Value,
    #[serde(default)]
    pub skills: SkillField,
    #[serde(default)]
    pub experience: Value,
}

/// Review row: the reviewed freelancer's id and a star value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawReview {
    #[serde(default)]
    pub freelancer: Value,
    #[serde(default)]
    pub stars: Value,
}

/// Read side of the external store. Empty sequences are valid answers.
pub trait DataStore: Send + Sync {
    fn fetch_candidates(&self) -> impl Future<Output = Result<Vec<RawFreelancer>>> + Send;

    fn fetch_reviews(&self) -> impl Future<Output = Result<Vec<RawReview>>> + Send;

    /// Skill columns used as the training corpus
    fn fetch_skill_corpus(&self) -> impl Future<Output = Result<Vec<SkillField>>> + Send;
}

//! The trained artifact: vocabulary, IDF weights and the scoring profile

use crate::error::{RecommenderError, Result};
use crate::processing::vectorizer::TfIdfVectorizer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bumped whenever the serialized layout changes
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub skills: f64,
    pub rating: f64,
    pub experience: f64,
}

impl ScoreWeights {
    pub fn total(&self) -> f64 {
        self.skills + self.rating + self.experience
    }
}

/// Weights and threshold captured at fit time. Scoring always applies the
/// profile stored in the artifact; a config change takes effect on retrain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringProfile {
    pub weights: ScoreWeights,
    pub min_match_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyModel {
    pub format_version: u32,
    pub trained_at: DateTime<Utc>,
    pub document_count: usize,
    pub profile: ScoringProfile,
    pub vectorizer: TfIdfVectorizer,
}

impl VocabularyModel {
    pub fn new(vectorizer: TfIdfVectorizer, profile: ScoringProfile, document_count: usize) -> Self {
        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            trained_at: Utc::now(),
            document_count,
            profile,
            vectorizer,
        }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }

    /// True when the artifact was trained with a different profile than the
    /// one currently configured
    pub fn is_stale_against(&self, configured: &ScoringProfile) -> bool {
        self.profile != *configured
    }

    pub fn validate(&self) -> Result<()> {
        if self.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(RecommenderError::IncompatibleArtifact {
                found: self.format_version,
                expected: ARTIFACT_FORMAT_VERSION,
            });
        }
        self.vectorizer.validate()
    }
}

//! Vocabulary fitting over a skill corpus

use crate::error::{RecommenderError, Result};
use crate::processing::skills::{to_token_string, SkillField};
use crate::processing::vectorizer::TfIdfVectorizer;
use crate::recommender::model::{ScoringProfile, VocabularyModel};
use log::{debug, info};

pub struct VocabularyBuilder {
    max_features: usize,
    profile: ScoringProfile,
}

impl VocabularyBuilder {
    pub fn new(max_features: usize, profile: ScoringProfile) -> Self {
        Self {
            max_features,
            profile,
        }
    }

    /// Normalize, drop empty entries and fit. Pure: persisting the result is
    /// the caller's job.
    pub fn fit(&self, corpus: &[SkillField]) -> Result<VocabularyModel> {
        let documents: Vec<String> = corpus
            .iter()
            .map(to_token_string)
            .filter(|text| !text.is_empty())
            .collect();

        debug!(
            "{} of {} corpus entries have usable skills",
            documents.len(),
            corpus.len()
        );

        if documents.is_empty() {
            return Err(RecommenderError::EmptyCorpus);
        }

        let vectorizer = TfIdfVectorizer::fit(&documents, self.max_features)?;
        info!(
            "Fitted vocabulary of {} terms over {} documents",
            vectorizer.vocabulary_size(),
            documents.len()
        );

        Ok(VocabularyModel::new(vectorizer, self.profile, documents.len()))
    }
}

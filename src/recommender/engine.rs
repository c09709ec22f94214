//! Scoring pipeline: normalize, scale, vectorize, filter, combine, rank

use crate::error::{RecommenderError, Result};
use crate::processing::features::{cosine_similarity, min_max_scale};
use crate::processing::reviews::{aggregate_reviews, Reputation};
use crate::processing::skills::{
    to_display_name, to_display_string, to_identifier, to_number_or_default, to_token_string,
};
use crate::recommender::model::{ScoringProfile, VocabularyModel};
use crate::store::{RawFreelancer, RawReview};
use log::debug;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TOP_N: usize = 5;

/// A freelancer after ingestion-boundary normalization
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub skills_display: String,
    pub skill_text: String,
    pub rating: f64,
    pub experience: f64,
    pub completed_projects: u32,
}

impl Candidate {
    pub fn from_raw(raw: &RawFreelancer, reputation: Option<&Reputation>) -> Self {
        let reputation = reputation.copied().unwrap_or_default();
        Self {
            id: to_identifier(&raw.id).unwrap_or_default(),
            name: to_display_name(&raw.username),
            skills_display: to_display_string(&raw.skills),
            skill_text: to_token_string(&raw.skills),
            rating: reputation.rating,
            experience: to_number_or_default(&raw.experience, 0.0),
            completed_projects: reputation.completed_projects,
        }
    }
}

/// Join freelancers with their aggregated reviews, keeping snapshot order
pub fn prepare_candidates(freelancers: &[RawFreelancer], reviews: &[RawReview]) -> Vec<Candidate> {
    let reputations = aggregate_reviews(reviews);
    freelancers
        .iter()
        .map(|raw| {
            let reputation = to_identifier(&raw.id).and_then(|id| reputations.get(&id));
            Candidate::from_raw(raw, reputation)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub skills: Vec<String>,
    pub top_n: usize,
}

impl Query {
    pub fn new(skills: Vec<String>, top_n: usize) -> Self {
        Self { skills, top_n }
    }

    pub fn validate(&self) -> Result<()> {
        if self.skills.iter().all(|s| s.trim().is_empty()) {
            return Err(RecommenderError::InvalidInput(
                "at least one skill is required".to_string(),
            ));
        }
        if self.top_n == 0 {
            return Err(RecommenderError::InvalidInput(
                "top_n must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }

    /// Requested skills as one lowercase document
    pub fn skill_text(&self) -> String {
        self.skills.join(" ").to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub id: String,
    pub name: String,
    pub score: f64,
    #[serde(rename = "match")]
    pub match_percentage: f64,
    pub rating: f64,
    pub experience: f64,
    pub completed_projects: u32,
    pub skills: String,
}

pub struct ScoringEngine {
    profile: ScoringProfile,
}

impl ScoringEngine {
    pub fn new(profile: ScoringProfile) -> Self {
        Self { profile }
    }

    /// Engine applying the profile the model was trained with
    pub fn for_model(model: &VocabularyModel) -> Self {
        Self::new(model.profile)
    }

    pub fn profile(&self) -> &ScoringProfile {
        &self.profile
    }

    /// Full pipeline from raw store records
    pub fn recommend(
        &self,
        model: &VocabularyModel,
        freelancers: &[RawFreelancer],
        reviews: &[RawReview],
        query: &Query,
    ) -> Result<Vec<ScoredResult>> {
        if freelancers.is_empty() {
            return Err(RecommenderError::NoCandidates);
        }
        let candidates = prepare_candidates(freelancers, reviews);
        self.score(model, &candidates, query)
    }

    pub fn score(
        &self,
        model: &VocabularyModel,
        candidates: &[Candidate],
        query: &Query,
    ) -> Result<Vec<ScoredResult>> {
        if candidates.is_empty() {
            return Err(RecommenderError::NoCandidates);
        }
        query.validate()?;

        // Scaling covers the whole batch, before the match filter
        let ratings: Vec<f64> = candidates.iter().map(|c| c.rating).collect();
        let experiences: Vec<f64> = candidates.iter().map(|c| c.experience).collect();
        let rating_norm = min_max_scale(&ratings);
        let experience_norm = min_max_scale(&experiences);

        let vectorizer = &model.vectorizer;
        let query_vector = vectorizer.transform(&query.skill_text());
        let weights = self.profile.weights;

        let mut results: Vec<ScoredResult> = candidates
            .iter()
            .enumerate()
            .filter_map(|(i, candidate)| {
                let similarity =
                    cosine_similarity(&query_vector, &vectorizer.transform(&candidate.skill_text));
                if similarity < self.profile.min_match_threshold {
                    return None;
                }

                let score = weights.skills * similarity
                    + weights.rating * rating_norm[i]
                    + weights.experience * experience_norm[i];

                Some(ScoredResult {
                    id: candidate.id.clone(),
                    name: candidate.name.clone(),
                    score,
                    match_percentage: similarity * 100.0,
                    rating: candidate.rating,
                    experience: candidate.experience,
                    completed_projects: candidate.completed_projects,
                    skills: candidate.skills_display.clone(),
                })
            })
            .collect();

        debug!(
            "{} of {} candidates passed the {:.2} match threshold",
            results.len(),
            candidates.len(),
            self.profile.min_match_threshold
        );

        if results.is_empty() {
            return Err(RecommenderError::NoMatch {
                skills: query.skills.clone(),
            });
        }

        // Stable: equal scores keep snapshot order
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(query.top_n);
        Ok(results)
    }
}

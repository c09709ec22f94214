//! Request-level orchestration: snapshot model, fetch live data, score

use crate::api::{RecommendRequest, RecommendResponse};
use crate::error::{RecommenderError, Result};
use crate::recommender::engine::{Query, ScoredResult, ScoringEngine};
use crate::recommender::registry::ModelRegistry;
use crate::store::DataStore;
use log::{info, warn};
use std::sync::Arc;

pub struct RecommendationService<S> {
    store: Arc<S>,
    registry: Arc<ModelRegistry>,
    default_top_n: usize,
}

impl<S: DataStore> RecommendationService<S> {
    pub fn new(store: Arc<S>, registry: Arc<ModelRegistry>, default_top_n: usize) -> Self {
        Self {
            store,
            registry,
            default_top_n,
        }
    }

    pub fn registry(&self) -> &Arc<ModelRegistry> {
        &self.registry
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Score a validated query against a freshly fetched snapshot
    pub async fn recommend(&self, query: &Query) -> Result<Vec<ScoredResult>> {
        let model = self.registry.current()?;
        query.validate()?;

        let freelancers = self.store.fetch_candidates().await?;
        if freelancers.is_empty() {
            return Err(RecommenderError::NoCandidates);
        }
        let reviews = self.store.fetch_reviews().await?;
        info!(
            "Scoring {} freelancers ({} reviews) for skills {:?}",
            freelancers.len(),
            reviews.len(),
            query.skills
        );

        ScoringEngine::for_model(&model).recommend(&model, &freelancers, &reviews, query)
    }

    /// Boundary entry point: never fails, every error becomes a response
    pub async fn handle(&self, request: RecommendRequest) -> RecommendResponse {
        let result = match request.into_query(self.default_top_n) {
            Ok(query) => self.recommend(&query).await,
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            warn!("Recommendation request failed: {}", e);
        }
        RecommendResponse::from_result(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::processing::skills::SkillField;
    use crate::recommender::builder::VocabularyBuilder;
    use crate::store::{InMemoryStore, RawFreelancer, RawReview};
    use serde_json::json;

    fn service(store: InMemoryStore, loaded: bool) -> RecommendationService<InMemoryStore> {
        let profile = Config::default().scoring_profile();
        let registry = if loaded {
            let model = VocabularyBuilder::new(500, profile)
                .fit(&[SkillField::from("python django"), SkillField::from("java")])
                .unwrap();
            ModelRegistry::with_model(model, profile)
        } else {
            ModelRegistry::new(profile)
        };
        RecommendationService::new(Arc::new(store), Arc::new(registry), 5)
    }

    fn store() -> InMemoryStore {
        InMemoryStore::new(
            vec![
                RawFreelancer {
                    id: json!(1),
                    username: json!("ana"),
                    skills: SkillField::from(vec!["Python", "Django"]),
                    experience: json!(3),
                },
                RawFreelancer {
                    id: json!(2),
                    username: json!("bo"),
                    skills: SkillField::from("java"),
                    experience: json!(5),
                },
            ],
            vec![RawReview { freelancer: json!(1), stars: json!(4) }],
        )
    }

    #[tokio::test]
    async fn test_handle_success() {
        let service = service(store(), true);
        let response = service
            .handle(RecommendRequest::new(vec!["Python".to_string()], None))
            .await;

        assert!(response.success);
        assert_eq!(response.total, 1);
        assert_eq!(response.recommendations[0].name, "ana");
        assert_eq!(response.recommendations[0].completed_projects, 1);
    }

    #[tokio::test]
    async fn test_model_not_loaded() {
        let service = service(store(), false);
        let response = service
            .handle(RecommendRequest::new(vec!["Python".to_string()], None))
            .await;

        assert!(!response.success);
        assert!(response.error.unwrap().contains("No vocabulary model"));
    }

    #[tokio::test]
    async fn test_upstream_failure_becomes_error_response() {
        let store = store();
        store.set_failing(true);
        let service = service(store, true);

        let response = service
            .handle(RecommendRequest::new(vec!["Python".to_string()], Some(2)))
            .await;

        assert!(!response.success);
        assert!(response.error.unwrap().contains("fetch failed"));
    }

    #[tokio::test]
    async fn test_invalid_request_becomes_error_response() {
        let service = service(store(), true);
        let response = service.handle(RecommendRequest::new(vec![], Some(2))).await;

        assert!(!response.success);
        assert!(response.error.is_some());
    }
}

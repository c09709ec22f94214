use crate::api::{RecommendRequest, RecommendResponse};
use crate::error::RecommenderError;
use crate::server::SharedState;
use crate::store::DataStore;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use log::warn;
use serde_json::{json, Value};

pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "Freelancer Recommendation API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "recommend": "POST /recommend",
            "retrain": "POST /retrain",
            "health": "GET /health",
        },
    }))
}

pub async fn health<S: DataStore + 'static>(State(state): State<SharedState<S>>) -> Json<Value> {
    let registry = state.registry();
    let model = registry.peek();

    Json(json!({
        "status": "ok",
        "model_loaded": model.is_some(),
        "vocabulary_size": model.as_ref().map(|m| m.vocabulary_size()),
        "trained_at": model.as_ref().map(|m| m.trained_at.to_rfc3339()),
        "profile_stale": registry.is_profile_stale(),
    }))
}

/// Malformed bodies still get the structured failure shape
pub async fn recommend<S: DataStore + 'static>(
    State(state): State<SharedState<S>>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> (StatusCode, Json<RecommendResponse>) {
    match payload {
        Ok(Json(request)) => (StatusCode::OK, Json(state.service.handle(request).await)),
        Err(rejection) => {
            warn!("Rejected recommend body: {}", rejection.body_text());
            let err = RecommenderError::InvalidInput(rejection.body_text());
            (StatusCode::BAD_REQUEST, Json(RecommendResponse::failure(&err)))
        }
    }
}

pub async fn retrain<S: DataStore + 'static>(
    State(state): State<SharedState<S>>,
) -> (StatusCode, Json<Value>) {
    match state.retrainer.retrain().await {
        Ok(model) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "vocabulary_size": model.vocabulary_size(),
                "document_count": model.document_count,
            })),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "error": e.to_string() })),
        ),
    }
}

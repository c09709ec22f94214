//! HTTP surface: axum router, CORS and the background retrain loop

pub mod handlers;

use crate::config::ServerConfig;
use crate::error::{RecommenderError, Result};
use crate::recommender::artifact::JsonArtifactStore;
use crate::recommender::registry::ModelRegistry;
use crate::recommender::retrain::Retrainer;
use crate::service::RecommendationService;
use crate::store::DataStore;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use log::{error, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

pub struct AppState<S> {
    pub service: RecommendationService<S>,
    pub retrainer: Retrainer<S, JsonArtifactStore>,
}

impl<S: DataStore> AppState<S> {
    pub fn new(
        service: RecommendationService<S>,
        retrainer: Retrainer<S, JsonArtifactStore>,
    ) -> Self {
        Self { service, retrainer }
    }

    pub fn registry(&self) -> &Arc<ModelRegistry> {
        self.service.registry()
    }
}

pub type SharedState<S> = Arc<AppState<S>>;

pub fn create_router<S: DataStore + 'static>(state: SharedState<S>, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health::<S>))
        .route("/recommend", post(handlers::recommend::<S>))
        .route("/retrain", post(handlers::retrain::<S>))
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

/// `"*"` anywhere in the list allows any origin; unparsable origins are skipped
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if origins.iter().any(|origin| origin.trim() == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(allowed)
}

/// Calls `retrain()` every `every`; the first tick fires after one full period
pub fn spawn_periodic_retrain<S: DataStore + 'static>(
    state: SharedState<S>,
    every: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + every, every);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            info!("Scheduled retrain");
            if let Err(e) = state.retrainer.retrain().await {
                error!("Scheduled retrain failed: {}", e);
            }
        }
    })
}

pub async fn serve<S: DataStore + 'static>(
    state: SharedState<S>,
    config: &ServerConfig,
    retrain_every: Option<Duration>,
) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| RecommenderError::Server(format!("Invalid bind address: {}", e)))?;

    let retrain_task = retrain_every.map(|every| {
        info!("Retraining every {}s", every.as_secs());
        spawn_periodic_retrain(Arc::clone(&state), every)
    });

    let app = create_router(state, &config.cors_origins);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| RecommenderError::Server(e.to_string()));

    if let Some(task) = retrain_task {
        task.abort();
    }
    result
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down"),
        Err(e) => {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

//! Codebench API /v1: REST endpoints
//!
//! Stateless scoring endpoints (`/v1/normalize`, `/v1/aggregate`) plus the
//! query-bound views that fetch a comparison set from the upstream query
//! service first. Analysis requests fan out to the analysis service.
pub mod backend;
pub mod config;
pub mod error;
pub mod handlers;
pub mod memory;
pub mod metrics;
pub mod middleware;
pub mod orchestrate;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use backend::{HttpBackend, QueryBackend};
use codebench_compare::Comparator;
use codebench_core::CodebenchError;
use codebench_report::renderer::ReportRenderer;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn QueryBackend>,
    pub comparator: Arc<Comparator>,
    pub renderer: Arc<ReportRenderer<'static>>,
    pub metrics: Arc<metrics::ApiMetrics>,
}

impl AppState {
    pub fn new(backend: Arc<dyn QueryBackend>, comparator: Comparator) -> Result<Self, CodebenchError> {
        let renderer = ReportRenderer::builtin().map_err(CodebenchError::RenderError)?;
        let metrics = metrics::ApiMetrics::new()
            .map_err(|e| CodebenchError::ConfigError(format!("metrics registry: {}", e)))?;

        Ok(Self {
            backend,
            comparator: Arc::new(comparator),
            renderer: Arc::new(renderer),
            metrics: Arc::new(metrics),
        })
    }

    /// State backed by the HTTP upstream named in the configuration
    pub fn from_config(config: &ApiConfig) -> Result<Self, CodebenchError> {
        let backend = Arc::new(HttpBackend::new(config)?);
        Self::new(backend, config.load_comparator()?)
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handlers::health))
        .route("/v1/normalize", post(handlers::normalize))
        .route("/v1/aggregate", post(handlers::aggregate))
        .route("/v1/queries/{id}/comparison", get(handlers::query_comparison))
        .route("/v1/queries/{id}/progress", get(handlers::query_progress))
        .route("/v1/queries/{id}/report", get(handlers::query_report))
        .route("/v1/queries/{id}/analyze", post(handlers::analyze_query))
        .route("/v1/queries/{id}/codes/{code_id}/analyze", post(handlers::analyze_code))
        .route("/metrics", get(handlers::metrics))
        .route_layer(from_fn_with_state(state.clone(), middleware::track_requests))
        .layer(from_fn(middleware::request_context))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors())
        .with_state(state)
}

pub async fn run(config: ApiConfig) -> Result<(), CodebenchError> {
    let state = AppState::from_config(&config)?;
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&config.addr)
        .await
        .map_err(|e| CodebenchError::ConfigError(format!("bind {}: {}", config.addr, e)))?;

    tracing::info!(
        "Codebench API listening on {} (upstream {})",
        config.addr,
        config.upstream_url
    );
    axum::serve(listener, app)
        .await
        .map_err(|e| CodebenchError::UpstreamError(format!("server error: {}", e)))
}

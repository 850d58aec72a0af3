//! API Handlers
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use codebench_compare::{analysis_progress, AggregateView, AnalysisProgress};
use codebench_core::{
    CategoryScores, CodebenchError, ComparisonSet, RawMetrics, RequestContext, CODEBENCH_VERSION,
};
use codebench_report::{render_with, COMPARISON_TEMPLATE};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::orchestrate::{self, AnalysisFailure};
use crate::AppState;

/// Drift above this many points is logged
const DRIFT_LOG_THRESHOLD: f64 = 10.0;

/// Aggregate view plus what a client needs to cache and drive the UI
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ComparisonResponse<'a> {
    fingerprint: String,
    prompt: &'a str,
    progress: AnalysisProgress,
    #[serde(flatten)]
    view: AggregateView<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisResponse<'a> {
    fully_succeeded: bool,
    requested: &'a [i64],
    succeeded: &'a [i64],
    failed: &'a [AnalysisFailure],
    comparison: ComparisonResponse<'a>,
}

fn comparison<'a>(state: &AppState, set: &'a ComparisonSet, ctx: &RequestContext) -> ComparisonResponse<'a> {
    let view = state.comparator.aggregate(set);
    state.metrics.aggregations.inc();

    for row in &view.table {
        if let Some(drift) = row.drift() {
            state.metrics.score_drift.observe(drift);
            if drift > DRIFT_LOG_THRESHOLD {
                debug!(
                    trace_id = %ctx.trace_id,
                    code_id = row.id,
                    llm = %row.llm_name,
                    drift,
                    "Upstream totalScore differs from category mean"
                );
            }
        }
    }

    ComparisonResponse {
        fingerprint: set.fingerprint(),
        prompt: &set.user_prompt,
        progress: analysis_progress(set),
        view,
    }
}

pub async fn health() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok", "version": CODEBENCH_VERSION })))
}

pub async fn normalize(
    State(state): State<AppState>,
    payload: Result<Json<RawMetrics>, JsonRejection>,
) -> ApiResult<Json<CategoryScores>> {
    let Json(metrics) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    Ok(Json(state.comparator.profile().normalize(&metrics)))
}

pub async fn aggregate(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    payload: Result<Json<ComparisonSet>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(set) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let response = comparison(&state, &set, &ctx);
    Ok(Json(serde_json::to_value(&response)?))
}

pub async fn query_comparison(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(query_id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let set = state.backend.fetch_comparison_set(query_id).await?;
    let response = comparison(&state, &set, &ctx);
    Ok(Json(serde_json::to_value(&response)?))
}

pub async fn query_progress(
    State(state): State<AppState>,
    Path(query_id): Path<i64>,
) -> ApiResult<Json<AnalysisProgress>> {
    let set = state.backend.fetch_comparison_set(query_id).await?;
    Ok(Json(analysis_progress(&set)))
}

pub async fn query_report(
    State(state): State<AppState>,
    Path(query_id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let set = state.backend.fetch_comparison_set(query_id).await?;
    let markdown = render_with(&state.renderer, COMPARISON_TEMPLATE, &set, &state.comparator)?;
    Ok(([(header::CONTENT_TYPE, "text/markdown; charset=utf-8")], markdown))
}

pub async fn analyze_query(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(query_id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let run = orchestrate::analyze_all(state.backend.clone(), query_id).await?;
    state.metrics.record_analyses(run.succeeded.len(), run.failed.len());
    info!(
        query_id,
        user = %ctx.user_label(),
        succeeded = run.succeeded.len(),
        failed = run.failed.len(),
        "Analysis run finished"
    );

    let response = AnalysisResponse {
        fully_succeeded: run.fully_succeeded(),
        requested: &run.requested,
        succeeded: &run.succeeded,
        failed: &run.failed,
        comparison: comparison(&state, &run.set, &ctx),
    };
    Ok(Json(serde_json::to_value(&response)?))
}

pub async fn analyze_code(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path((query_id, code_id)): Path<(i64, i64)>,
) -> ApiResult<Json<Value>> {
    let result = orchestrate::analyze_one(state.backend.clone(), query_id, code_id).await;
    match &result {
        Ok(_) => state.metrics.record_analyses(1, 0),
        Err(CodebenchError::NotFound(_)) => {}
        Err(_) => state.metrics.record_analyses(0, 1),
    }
    let set = result?;

    let response = comparison(&state, &set, &ctx);
    Ok(Json(serde_json::to_value(&response)?))
}

pub async fn metrics(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let body = state
        .metrics
        .encode()
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body))
}

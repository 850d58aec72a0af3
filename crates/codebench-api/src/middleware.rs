//! Request middleware: CORS, request context and request counting.
use axum::{
    extract::{MatchedPath, Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use codebench_core::RequestContext;
use tower_http::cors::CorsLayer;
use tracing::Instrument;

use crate::AppState;

/// Header the session layer sets to the authenticated user id
pub const USER_ID_HEADER: &str = "x-user-id";
/// Response header echoing the request's trace id
pub const TRACE_ID_HEADER: &str = "x-trace-id";

pub fn cors() -> CorsLayer {
    CorsLayer::permissive()
}

/// Attach a [`RequestContext`] to the request and run it inside a span
/// carrying the trace id and user.
pub async fn request_context(mut req: Request, next: Next) -> Response {
    let mut ctx = RequestContext::new();
    if let Some(user) = req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        ctx = ctx.with_user(user);
    }

    let span = tracing::info_span!("request", trace_id = %ctx.trace_id, user = %ctx.user_label());
    let trace_id = ctx.trace_id.clone();
    req.extensions_mut().insert(ctx);

    let mut response = next.run(req).instrument(span).await;
    if let Ok(value) = HeaderValue::from_str(&trace_id) {
        response.headers_mut().insert(TRACE_ID_HEADER, value);
    }
    response
}

/// Count requests per matched route and status
pub async fn track_requests(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(req).await;
    state
        .metrics
        .http_requests
        .with_label_values(&[route.as_str(), response.status().as_str()])
        .inc();
    response
}

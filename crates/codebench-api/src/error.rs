//! Error handling
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use codebench_core::CodebenchError;
use codebench_report::ReportError;
use serde_json::json;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// Query or analysis service failed or returned garbage
    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => msg.clone(),
            ApiError::Upstream(msg) => {
                tracing::error!("Upstream error: {}", msg);
                "Upstream service error".to_string()
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<CodebenchError> for ApiError {
    fn from(err: CodebenchError) -> Self {
        match err {
            CodebenchError::NotFound(_) => ApiError::NotFound(err.to_string()),
            CodebenchError::UpstreamError(_) | CodebenchError::SchemaError(_) => {
                ApiError::Upstream(err.to_string())
            }
            CodebenchError::ConfigError(_) | CodebenchError::RenderError(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        ApiError::Internal(CodebenchError::RenderError(err.to_string()).to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

//! Unified Error Model
//!
//! Scoring itself never fails; these cover configuration and the calls to
//! the external services.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodebenchError {
    #[error("CONFIG/{0}")]
    ConfigError(String),

    #[error("UPSTREAM/{0}")]
    UpstreamError(String),

    #[error("NOT_FOUND/{0}")]
    NotFound(String),

    #[error("RENDER/{0}")]
    RenderError(String),

    #[error("SCHEMA/{0}")]
    SchemaError(String),
}

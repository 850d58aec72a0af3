//! Request Context: identity and tracing data for one API call
use chrono::{DateTime, Utc};

/// Per-request context built at the HTTP boundary.
///
/// The session layer authenticates users; only the resulting identity is
/// visible here.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub user_id: Option<String>,
    pub trace_id: String,
    pub received_at: DateTime<Utc>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            user_id: None,
            trace_id: uuid::Uuid::new_v4().to_string(),
            received_at: Utc::now(),
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// User id for log fields
    pub fn user_label(&self) -> &str {
        self.user_id.as_deref().unwrap_or("anonymous")
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

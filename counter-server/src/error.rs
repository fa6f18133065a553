//! Aggregator error taxonomy and its wire mapping
//!
//! Every error resolves at the handler boundary into the same JSON shape
//! the storefront widget has always consumed: `{ "error": <string> }` with
//! an optional `"details"` string. Nothing is retried internally.

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use shopify_admin::ClientError;
use thiserror::Error;

/// Aggregator error
#[derive(Debug, Error)]
pub enum AppError {
    /// Required configuration absent; checked before any network call
    #[error("Missing environment variables: {}", .0.join(", "))]
    MissingConfig(Vec<&'static str>),

    /// Non-success upstream response, surfaced verbatim (status + body)
    #[error("Shopify API error")]
    Upstream { status: StatusCode, body: String },

    /// Inbound request declared a shop domain other than the configured one
    #[error("Forbidden: request origin does not match the configured shop")]
    ShopOriginMismatch,

    /// Anything else, caught at the handler boundary
    #[error("Server error")]
    Internal(String),
}

impl AppError {
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::MissingConfig(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream { status, .. } => *status,
            Self::ShopOriginMismatch => StatusCode::FORBIDDEN,
        }
    }

    /// Diagnostic payload for the `details` field. The upstream body and
    /// internal error messages pass through unsanitized, matching the
    /// behavior the widget was built against.
    fn details(&self) -> Option<&str> {
        match self {
            Self::Upstream { body, .. } => Some(body),
            Self::Internal(message) => Some(message),
            Self::MissingConfig(_) | Self::ShopOriginMismatch => None,
        }
    }
}

impl From<ClientError> for AppError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Api { status, body } => Self::Upstream { status, body },
            ClientError::Timeout => Self::Internal("upstream request timed out".into()),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        if status.is_server_error() {
            tracing::error!(error = %self, details = ?self.details(), "request failed");
        } else {
            tracing::warn!(error = %self, %status, "request rejected");
        }

        let mut body = serde_json::json!({ "error": self.to_string() });
        if let Some(details) = self.details() {
            body["details"] = details.into();
        }
        (status, Json(body)).into_response()
    }
}

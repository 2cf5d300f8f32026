//! Protocol error values for the OAuth endpoints.
//!
//! Endpoint handlers are linear validation pipelines returning the first
//! failure as an [`OAuthError`]; axum renders it as the structured JSON body
//! the protocol requires.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// An OAuth protocol error: taxonomy code, human-readable description, and
/// the HTTP status it travels with.
#[derive(Debug, Clone)]
pub struct OAuthError {
    status: StatusCode,
    code: &'static str,
    description: String,
}

impl OAuthError {
    /// Malformed body or missing required field.
    pub fn invalid_request(description: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, code: "invalid_request", description: description.into() }
    }

    /// Unknown client or bad secret. Defaults to 401 (token endpoint); the
    /// authorization endpoint downgrades to 400 via [`Self::with_status`].
    pub fn invalid_client(description: impl Into<String>) -> Self {
        Self { status: StatusCode::UNAUTHORIZED, code: "invalid_client", description: description.into() }
    }

    /// Registration rejected or redirect target not on the allow-list.
    pub fn invalid_redirect_uri(description: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, code: "invalid_redirect_uri", description: description.into() }
    }

    /// Bad/expired/replayed code, binding mismatch, or PKCE failure.
    pub fn invalid_grant(description: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, code: "invalid_grant", description: description.into() }
    }

    /// Anything but the authorization_code grant.
    pub fn unsupported_grant_type(description: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, code: "unsupported_grant_type", description: description.into() }
    }

    /// Override the HTTP status while keeping the taxonomy code.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn code(&self) -> &'static str {
        self.code
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl IntoResponse for OAuthError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({
                "error": self.code,
                "error_description": self.description,
            })),
        )
            .into_response()
    }
}

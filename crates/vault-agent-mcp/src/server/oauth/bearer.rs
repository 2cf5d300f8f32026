//! Bearer token enforcement for protected path prefixes.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::config::defaults;
use crate::server::transport::HttpState;

/// Token identity attached to authenticated requests for downstream handlers.
#[derive(Debug, Clone)]
pub struct BearerContext {
    pub client_id: String,
    pub scope: String,
}

/// Middleware guarding the configured path prefixes.
///
/// Requests outside the protected prefixes pass through untouched. Inside
/// them, a valid bearer token is required; every rejection carries the RFC
/// 6750 `WWW-Authenticate` challenge pointing at the resource metadata so a
/// compliant client can recover by walking the discovery chain.
pub async fn enforce(
    State(state): State<Arc<HttpState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();
    if !state.config.protected_paths.iter().any(|prefix| path.starts_with(prefix)) {
        return next.run(request).await;
    }

    let Some(raw) = request.headers().get(header::AUTHORIZATION) else {
        return unauthorized(&state, "authorization header missing");
    };
    let Some(token) = raw.to_str().ok().and_then(|v| v.strip_prefix("Bearer ")) else {
        return unauthorized(&state, "invalid authorization scheme");
    };

    let Some(access) = state.store.validate_token(token).await else {
        return unauthorized(&state, "invalid or expired token");
    };

    request
        .extensions_mut()
        .insert(BearerContext { client_id: access.client_id, scope: access.scope });

    next.run(request).await
}

fn unauthorized(state: &HttpState, description: &str) -> Response {
    let challenge = format!(
        "Bearer realm=\"{realm}\", resource_metadata=\"{metadata}\", scope=\"{scope}\", \
         error=\"invalid_token\", error_description=\"{description}\"",
        realm = state.config.base_url,
        metadata = state.config.resource_metadata_url(),
        scope = defaults::SCOPE,
    );

    let mut response = (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": "invalid_token",
            "error_description": description,
        })),
    )
        .into_response();

    if let Ok(value) = HeaderValue::from_str(&challenge) {
        response.headers_mut().insert(header::WWW_AUTHENTICATE, value);
    }
    response
}

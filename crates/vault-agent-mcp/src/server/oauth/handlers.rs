//! OAuth 2.0 endpoint handlers.
//!
//! Implements:
//! - RFC 9728: OAuth Protected Resource Metadata
//! - RFC 8414: OAuth Authorization Server Metadata
//! - RFC 7591: Dynamic Client Registration
//! - RFC 7636: PKCE (S256)
//! - RFC 6749: OAuth 2.0 Authorization Code Grant

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use super::error::OAuthError;
use super::pkce;
use crate::config::defaults;
use crate::server::transport::HttpState;

// ─── RFC 9728: Protected Resource Metadata ───────────────────────────────────

/// `GET /.well-known/oauth-protected-resource`
///
/// Tells clients where to find the authorization server for this resource.
pub async fn protected_resource_metadata(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "resource": state.config.base_url,
        "authorization_servers": [state.config.base_url],
        "bearer_methods_supported": ["header"],
        "scopes_supported": [defaults::SCOPE]
    }))
}

// ─── RFC 8414: Authorization Server Metadata ─────────────────────────────────

/// `GET /.well-known/oauth-authorization-server`
///
/// Describes the OAuth endpoints and capabilities.
pub async fn authorization_server_metadata(
    State(state): State<Arc<HttpState>>,
) -> impl IntoResponse {
    let issuer = &state.config.base_url;
    Json(serde_json::json!({
        "issuer": issuer,
        "authorization_endpoint": format!("{issuer}/oauth/authorize"),
        "token_endpoint": format!("{issuer}/oauth/token"),
        "registration_endpoint": format!("{issuer}/oauth/register"),
        "scopes_supported": [defaults::SCOPE],
        "response_types_supported": ["code"],
        "grant_types_supported": ["authorization_code"],
        "token_endpoint_auth_methods_supported": ["client_secret_post"],
        "code_challenge_methods_supported": [pkce::METHOD_S256]
    }))
}

// ─── RFC 7591: Dynamic Client Registration ───────────────────────────────────

/// `POST /oauth/register`
///
/// Register a new OAuth client dynamically. The body is parsed by hand so a
/// malformed payload maps to `invalid_request` rather than an extractor
/// rejection.
pub async fn register(
    State(state): State<Arc<HttpState>>,
    body: String,
) -> Result<Response, OAuthError> {
    let payload: serde_json::Value = serde_json::from_str(&body)
        .map_err(|_| OAuthError::invalid_request("request body is not valid JSON"))?;

    let uris = payload
        .get("redirect_uris")
        .and_then(|v| v.as_array())
        .filter(|uris| !uris.is_empty())
        .ok_or_else(|| {
            OAuthError::invalid_redirect_uri("redirect_uris must be a non-empty array")
        })?;

    let mut redirect_uris = Vec::with_capacity(uris.len());
    for uri in uris {
        let uri = uri
            .as_str()
            .ok_or_else(|| OAuthError::invalid_redirect_uri("redirect_uris must be strings"))?;
        url::Url::parse(uri)
            .map_err(|_| OAuthError::invalid_redirect_uri("redirect_uris must be absolute URIs"))?;
        redirect_uris.push(uri.to_owned());
    }

    let client = state.store.register_client(redirect_uris).await?;

    tracing::info!(client_id = %client.client_id, "Registered OAuth client");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "client_id": client.client_id,
            "client_secret": client.client_secret,
            "redirect_uris": client.redirect_uris,
            "client_id_issued_at": client.created_at.timestamp(),
            "grant_types": ["authorization_code"],
            "response_types": ["code"],
            "token_endpoint_auth_method": "client_secret_post"
        })),
    )
        .into_response())
}

// ─── Authorization Endpoint ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AuthorizeQuery {
    pub client_id: Option<String>,
    pub redirect_uri: Option<String>,
    pub response_type: Option<String>,
    pub code_challenge: Option<String>,
    pub code_challenge_method: Option<String>,
    pub scope: Option<String>,
    pub state: Option<String>,
    pub resource: Option<String>,
}

/// `GET /oauth/authorize`
///
/// Auto-approve the authorization request. This is a single-user server, so
/// there is no consent page: any client that resolves and presents valid
/// PKCE parameters receives a code.
///
/// Client and redirect-URI failures answer directly with 400 instead of
/// redirecting: until the redirect target is checked against the client's
/// allow-list, redirecting would turn this endpoint into an open redirector.
/// Only once the target is verified do failures travel back on it.
pub async fn authorize(
    State(state): State<Arc<HttpState>>,
    Query(query): Query<AuthorizeQuery>,
) -> Result<Response, OAuthError> {
    let Some(client_id) = query.client_id.as_deref() else {
        return Err(OAuthError::invalid_request("client_id is required"));
    };
    let Some(redirect_uri) = query.redirect_uri.as_deref() else {
        return Err(OAuthError::invalid_request("redirect_uri is required"));
    };

    let resolved = state.store.get_client(client_id).await.ok_or_else(|| {
        OAuthError::invalid_client("unknown client_id").with_status(StatusCode::BAD_REQUEST)
    })?;

    if !resolved.client().redirect_allowed(redirect_uri) {
        return Err(OAuthError::invalid_redirect_uri(
            "redirect_uri is not registered for this client",
        ));
    }

    // The redirect target is trusted from here on.
    let oauth_state = query.state.as_deref().unwrap_or_default();

    let Some(code_challenge) = query.code_challenge.as_deref() else {
        return error_redirect(redirect_uri, "code_challenge is required", oauth_state);
    };
    if query.code_challenge_method.as_deref() != Some(pkce::METHOD_S256) {
        return error_redirect(redirect_uri, "code_challenge_method must be S256", oauth_state);
    }

    let scope = query.scope.as_deref().unwrap_or(defaults::SCOPE);
    let code = state
        .store
        .create_authorization_code(
            client_id.to_owned(),
            redirect_uri.to_owned(),
            code_challenge.to_owned(),
            pkce::METHOD_S256.to_owned(),
            scope.to_owned(),
            query.resource.clone(),
            state.config.auth_code_ttl,
        )
        .await;

    tracing::info!(client_id = %client_id, "Auto-approved authorization request");

    redirect(redirect_uri, &[("code", &code), ("state", oauth_state)])
}

/// 302 back to a verified redirect target with query parameters appended.
fn redirect(redirect_uri: &str, params: &[(&str, &str)]) -> Result<Response, OAuthError> {
    let mut url = url::Url::parse(redirect_uri).map_err(|_| {
        OAuthError::invalid_redirect_uri("redirect_uri is not a valid absolute URI")
    })?;
    url.query_pairs_mut().extend_pairs(params);
    Ok((StatusCode::FOUND, [(header::LOCATION, String::from(url))]).into_response())
}

/// PKCE-precondition failure: redirect with the error and the original state.
fn error_redirect(
    redirect_uri: &str,
    description: &str,
    oauth_state: &str,
) -> Result<Response, OAuthError> {
    redirect(
        redirect_uri,
        &[
            ("error", "invalid_request"),
            ("error_description", description),
            ("state", oauth_state),
        ],
    )
}

// ─── Token Endpoint ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub grant_type: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub code: Option<String>,
    pub redirect_uri: Option<String>,
    pub code_verifier: Option<String>,
}

/// `POST /oauth/token`
///
/// Exchange an authorization code for a bearer token.
///
/// The code is consumed before the binding and PKCE checks run, so one
/// exchange attempt burns it regardless of outcome: an intercepted request
/// can be replayed at most once, and even a failed exchange invalidates the
/// code for everyone. Missing required fields fail earlier, as malformed
/// requests, without touching the code.
pub async fn token(
    State(state): State<Arc<HttpState>>,
    axum::Form(form): axum::Form<TokenRequest>,
) -> Result<Response, OAuthError> {
    let grant_type = form
        .grant_type
        .as_deref()
        .ok_or_else(|| OAuthError::invalid_request("grant_type is required"))?;
    if grant_type != "authorization_code" {
        return Err(OAuthError::unsupported_grant_type(
            "only the authorization_code grant type is supported",
        ));
    }

    let client_id = form
        .client_id
        .as_deref()
        .ok_or_else(|| OAuthError::invalid_request("client_id is required"))?;
    let code = form.code.as_deref().ok_or_else(|| OAuthError::invalid_request("code is required"))?;
    let redirect_uri = form
        .redirect_uri
        .as_deref()
        .ok_or_else(|| OAuthError::invalid_request("redirect_uri is required"))?;
    let code_verifier = form
        .code_verifier
        .as_deref()
        .ok_or_else(|| OAuthError::invalid_request("code_verifier is required"))?;

    let resolved = state
        .store
        .get_client(client_id)
        .await
        .ok_or_else(|| OAuthError::invalid_client("unknown client"))?;

    // Ambient clients carry an empty secret and skip this check; the
    // relaxation exists for one trusted front-end and is opt-in at deploy
    // time, never the default.
    if resolved.requires_secret()
        && form.client_secret.as_deref() != Some(resolved.client().client_secret.as_str())
    {
        return Err(OAuthError::invalid_client("invalid client credentials"));
    }

    let auth_code = state
        .store
        .consume_authorization_code(code)
        .await
        .ok_or_else(|| OAuthError::invalid_grant("invalid or expired authorization code"))?;

    if auth_code.client_id != client_id || auth_code.redirect_uri != redirect_uri {
        return Err(OAuthError::invalid_grant(
            "authorization code was issued to a different client or redirect_uri",
        ));
    }

    if !pkce::verify(code_verifier, &auth_code.code_challenge, &auth_code.code_challenge_method) {
        return Err(OAuthError::invalid_grant("PKCE verification failed"));
    }

    let ttl = state.config.access_token_ttl;
    let access_token = state
        .store
        .create_access_token(&auth_code.client_id, &auth_code.scope, auth_code.resource.clone(), ttl)
        .await;

    tracing::info!(client_id = %auth_code.client_id, "Issued access token");

    Ok(token_success(&access_token, ttl, &auth_code.scope))
}

/// Token response with the cache headers RFC 6749 §5.1 requires.
fn token_success(access_token: &str, ttl: Duration, scope: &str) -> Response {
    let mut response = Json(serde_json::json!({
        "access_token": access_token,
        "token_type": "Bearer",
        "expires_in": ttl.as_secs(),
        "scope": scope
    }))
    .into_response();

    let headers = response.headers_mut();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    response
}

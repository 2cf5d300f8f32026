//! Integration tests for the OAuth 2.0 authorization flow.
//!
//! Tests the full lifecycle: discovery → registration → authorization →
//! token exchange → bearer-gated MCP access.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::json;
use tempfile::TempDir;
use tower::ServiceExt;
use url::Url;

use vault_agent_mcp::config::Config;
use vault_agent_mcp::server::transport::create_router;
use vault_agent_mcp::tools::{self, ToolContext};
use vault_agent_mcp::VaultStore;

// RFC 7636 Appendix B verifier/challenge pair.
const CODE_VERIFIER: &str = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
const CODE_CHALLENGE: &str = "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM";

const REDIRECT_URI: &str = "https://client.example/cb";
const BASE_URL: &str = "https://notes.example.com";

fn build_app(vault: &TempDir, ambient: bool) -> Router {
    let mut config = Config::for_testing(vault.path());
    config.allow_ambient_clients = ambient;
    let ctx = ToolContext::new(Arc::new(VaultStore::new(vault.path())));
    create_router(tools::register_all_tools(), ctx, config)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register a client with the default redirect URI; returns the 201 body.
async fn register_client(app: &Router) -> serde_json::Value {
    let response = app
        .clone()
        .oneshot(
            Request::post("/oauth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "redirect_uris": [REDIRECT_URI] }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Run the authorization request and return the redirect Location URL.
async fn authorize_raw(app: &Router, params: &[(&str, &str)]) -> axum::response::Response {
    let query = serde_urlencoded::to_string(params).unwrap();
    app.clone()
        .oneshot(Request::get(format!("/oauth/authorize?{query}")).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Happy-path authorization; returns the issued code.
async fn authorize(app: &Router, client_id: &str, redirect_uri: &str, state: &str) -> String {
    let response = authorize_raw(
        app,
        &[
            ("client_id", client_id),
            ("redirect_uri", redirect_uri),
            ("response_type", "code"),
            ("code_challenge", CODE_CHALLENGE),
            ("code_challenge_method", "S256"),
            ("state", state),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    let location = response.headers().get(header::LOCATION).unwrap().to_str().unwrap();
    let url = Url::parse(location).unwrap();
    url.query_pairs().find(|(k, _)| k == "code").map(|(_, v)| v.into_owned()).unwrap()
}

/// POST the token form; returns status and JSON body.
async fn exchange(app: &Router, form: &[(&str, &str)]) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::post("/oauth/token")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(serde_urlencoded::to_string(form).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    (status, body_json(response).await)
}

// ─── Discovery ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_protected_resource_metadata() {
    let vault = TempDir::new().unwrap();
    let app = build_app(&vault, false);

    let response = app
        .oneshot(Request::get("/.well-known/oauth-protected-resource").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["resource"], BASE_URL);
    assert!(json["authorization_servers"].as_array().unwrap().contains(&json!(BASE_URL)));
    assert!(json["bearer_methods_supported"].as_array().unwrap().contains(&json!("header")));
    assert!(json["scopes_supported"].as_array().unwrap().contains(&json!("mcp")));
}

#[tokio::test]
async fn test_authorization_server_metadata() {
    let vault = TempDir::new().unwrap();
    let app = build_app(&vault, false);

    let response = app
        .oneshot(
            Request::get("/.well-known/oauth-authorization-server").body(Body::empty()).unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["issuer"], BASE_URL);
    assert_eq!(json["authorization_endpoint"], format!("{BASE_URL}/oauth/authorize"));
    assert_eq!(json["token_endpoint"], format!("{BASE_URL}/oauth/token"));
    assert_eq!(json["registration_endpoint"], format!("{BASE_URL}/oauth/register"));
    assert_eq!(json["grant_types_supported"], json!(["authorization_code"]));
    assert_eq!(json["response_types_supported"], json!(["code"]));
    assert_eq!(json["token_endpoint_auth_methods_supported"], json!(["client_secret_post"]));
    assert!(json["code_challenge_methods_supported"].as_array().unwrap().contains(&json!("S256")));
}

// ─── Dynamic Client Registration ─────────────────────────────────────────────

#[tokio::test]
async fn test_register_client_issues_credentials() {
    let vault = TempDir::new().unwrap();
    let app = build_app(&vault, false);

    let json = register_client(&app).await;

    assert!(!json["client_id"].as_str().unwrap().is_empty());
    assert!(!json["client_secret"].as_str().unwrap().is_empty());
    assert_eq!(json["redirect_uris"], serde_json::json!([REDIRECT_URI]));
    assert!(json["client_id_issued_at"].as_i64().unwrap() > 0);
    assert_eq!(json["grant_types"], serde_json::json!(["authorization_code"]));
    assert_eq!(json["response_types"], serde_json::json!(["code"]));
    assert_eq!(json["token_endpoint_auth_method"], "client_secret_post");
}

#[tokio::test]
async fn test_register_rejects_malformed_json() {
    let vault = TempDir::new().unwrap();
    let app = build_app(&vault, false);

    let response = app
        .oneshot(
            Request::post("/oauth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "invalid_request");
}

#[tokio::test]
async fn test_register_rejects_bad_redirect_uris() {
    let vault = TempDir::new().unwrap();
    let app = build_app(&vault, false);

    for body in [
        json!({}),
        json!({ "redirect_uris": [] }),
        json!({ "redirect_uris": "not-an-array" }),
        json!({ "redirect_uris": [42] }),
        json!({ "redirect_uris": ["/relative/path"] }),
    ] {
        let response = app
            .clone()
            .oneshot(
                Request::post("/oauth/register")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "invalid_redirect_uri");
    }
}

// ─── Authorization Endpoint ──────────────────────────────────────────────────

#[tokio::test]
async fn test_authorize_unknown_client_is_direct_error() {
    let vault = TempDir::new().unwrap();
    let app = build_app(&vault, false);

    let response = authorize_raw(
        &app,
        &[
            ("client_id", "nobody"),
            ("redirect_uri", REDIRECT_URI),
            ("response_type", "code"),
            ("code_challenge", CODE_CHALLENGE),
            ("code_challenge_method", "S256"),
        ],
    )
    .await;

    // Never a redirect: the target is unverified at this point.
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "invalid_client");
}

#[tokio::test]
async fn test_authorize_unregistered_redirect_is_direct_error() {
    let vault = TempDir::new().unwrap();
    let app = build_app(&vault, false);
    let client = register_client(&app).await;

    let response = authorize_raw(
        &app,
        &[
            ("client_id", client["client_id"].as_str().unwrap()),
            ("redirect_uri", "https://attacker.example/cb"),
            ("response_type", "code"),
            ("code_challenge", CODE_CHALLENGE),
            ("code_challenge_method", "S256"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "invalid_redirect_uri");
}

#[tokio::test]
async fn test_authorize_missing_challenge_redirects_with_error() {
    let vault = TempDir::new().unwrap();
    let app = build_app(&vault, false);
    let client = register_client(&app).await;

    let response = authorize_raw(
        &app,
        &[
            ("client_id", client["client_id"].as_str().unwrap()),
            ("redirect_uri", REDIRECT_URI),
            ("response_type", "code"),
            ("state", "xyz-state"),
        ],
    )
    .await;

    // The redirect target passed the allow-list check, so the failure
    // travels back on it rather than as a bare 400.
    assert_eq!(response.status(), StatusCode::FOUND);
    let location = response.headers().get(header::LOCATION).unwrap().to_str().unwrap();
    let url = Url::parse(location).unwrap();
    assert!(location.starts_with(REDIRECT_URI));

    let pairs: Vec<(String, String)> =
        url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect();
    assert!(pairs.contains(&("error".to_owned(), "invalid_request".to_owned())));
    assert!(pairs.contains(&("state".to_owned(), "xyz-state".to_owned())));
    assert!(pairs.iter().all(|(k, _)| k != "code"));
}

#[tokio::test]
async fn test_authorize_plain_method_redirects_with_error() {
    let vault = TempDir::new().unwrap();
    let app = build_app(&vault, false);
    let client = register_client(&app).await;

    let response = authorize_raw(
        &app,
        &[
            ("client_id", client["client_id"].as_str().unwrap()),
            ("redirect_uri", REDIRECT_URI),
            ("response_type", "code"),
            ("code_challenge", "challenge-value"),
            ("code_challenge_method", "plain"),
            ("state", "s1"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    let location = response.headers().get(header::LOCATION).unwrap().to_str().unwrap();
    assert!(location.contains("error=invalid_request"));
}

#[tokio::test]
async fn test_authorize_echoes_state_alongside_code() {
    let vault = TempDir::new().unwrap();
    let app = build_app(&vault, false);
    let client = register_client(&app).await;

    let response = authorize_raw(
        &app,
        &[
            ("client_id", client["client_id"].as_str().unwrap()),
            ("redirect_uri", REDIRECT_URI),
            ("response_type", "code"),
            ("code_challenge", CODE_CHALLENGE),
            ("code_challenge_method", "S256"),
            ("state", "abc 123"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    let location = response.headers().get(header::LOCATION).unwrap().to_str().unwrap();
    let url = Url::parse(location).unwrap();

    let pairs: Vec<(String, String)> =
        url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect();
    assert!(pairs.iter().any(|(k, _)| k == "code"));
    assert!(pairs.contains(&("state".to_owned(), "abc 123".to_owned())));
}

// ─── Token Endpoint ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_full_flow_issues_usable_token() {
    let vault = TempDir::new().unwrap();
    let app = build_app(&vault, false);

    let client = register_client(&app).await;
    let client_id = client["client_id"].as_str().unwrap();
    let client_secret = client["client_secret"].as_str().unwrap();

    let code = authorize(&app, client_id, REDIRECT_URI, "st").await;

    let response = app
        .clone()
        .oneshot(
            Request::post("/oauth/token")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(
                    serde_urlencoded::to_string([
                        ("grant_type", "authorization_code"),
                        ("client_id", client_id),
                        ("client_secret", client_secret),
                        ("code", code.as_str()),
                        ("redirect_uri", REDIRECT_URI),
                        ("code_verifier", CODE_VERIFIER),
                    ])
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get(header::CACHE_CONTROL).unwrap(), "no-store");

    let json = body_json(response).await;
    let access_token = json["access_token"].as_str().unwrap().to_owned();
    assert!(!access_token.is_empty());
    assert_eq!(json["token_type"], "Bearer");
    assert_eq!(json["expires_in"], 3600);
    assert_eq!(json["scope"], "mcp");

    // The token opens the bearer gate.
    let response = app
        .oneshot(
            Request::post("/mcp")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {access_token}"))
                .body(Body::from(
                    json!({"jsonrpc": "2.0", "method": "tools/list", "id": 1}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_code_is_single_use() {
    let vault = TempDir::new().unwrap();
    let app = build_app(&vault, false);

    let client = register_client(&app).await;
    let client_id = client["client_id"].as_str().unwrap();
    let client_secret = client["client_secret"].as_str().unwrap();
    let code = authorize(&app, client_id, REDIRECT_URI, "").await;

    let form = [
        ("grant_type", "authorization_code"),
        ("client_id", client_id),
        ("client_secret", client_secret),
        ("code", code.as_str()),
        ("redirect_uri", REDIRECT_URI),
        ("code_verifier", CODE_VERIFIER),
    ];

    let (status, _) = exchange(&app, &form).await;
    assert_eq!(status, StatusCode::OK);

    // Immediate retry with otherwise-correct parameters.
    let (status, json) = exchange(&app, &form).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_grant");
}

#[tokio::test]
async fn test_wrong_verifier_rejected_and_code_burned() {
    let vault = TempDir::new().unwrap();
    let app = build_app(&vault, false);

    let client = register_client(&app).await;
    let client_id = client["client_id"].as_str().unwrap();
    let client_secret = client["client_secret"].as_str().unwrap();
    let code = authorize(&app, client_id, REDIRECT_URI, "").await;

    let (status, json) = exchange(
        &app,
        &[
            ("grant_type", "authorization_code"),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("code", code.as_str()),
            ("redirect_uri", REDIRECT_URI),
            ("code_verifier", "not-the-right-verifier"),
        ],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_grant");

    // The failed attempt consumed the code: a follow-up with the correct
    // verifier is also rejected.
    let (status, json) = exchange(
        &app,
        &[
            ("grant_type", "authorization_code"),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("code", code.as_str()),
            ("redirect_uri", REDIRECT_URI),
            ("code_verifier", CODE_VERIFIER),
        ],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_grant");
}

#[tokio::test]
async fn test_redirect_uri_mismatch_rejected() {
    let vault = TempDir::new().unwrap();
    let app = build_app(&vault, false);

    let response = app
        .clone()
        .oneshot(
            Request::post("/oauth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "redirect_uris": [REDIRECT_URI, "https://client.example/other"] })
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    let client = body_json(response).await;
    let client_id = client["client_id"].as_str().unwrap();
    let client_secret = client["client_secret"].as_str().unwrap();

    let code = authorize(&app, client_id, REDIRECT_URI, "").await;

    // Both URIs are registered, but the exchange must use the one the code
    // was minted with.
    let (status, json) = exchange(
        &app,
        &[
            ("grant_type", "authorization_code"),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("code", code.as_str()),
            ("redirect_uri", "https://client.example/other"),
            ("code_verifier", CODE_VERIFIER),
        ],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_grant");
}

#[tokio::test]
async fn test_code_bound_to_issuing_client() {
    let vault = TempDir::new().unwrap();
    let app = build_app(&vault, false);

    let first = register_client(&app).await;
    let second = register_client(&app).await;

    let code =
        authorize(&app, first["client_id"].as_str().unwrap(), REDIRECT_URI, "").await;

    // The second client authenticates fine but cannot redeem the first
    // client's code.
    let (status, json) = exchange(
        &app,
        &[
            ("grant_type", "authorization_code"),
            ("client_id", second["client_id"].as_str().unwrap()),
            ("client_secret", second["client_secret"].as_str().unwrap()),
            ("code", code.as_str()),
            ("redirect_uri", REDIRECT_URI),
            ("code_verifier", CODE_VERIFIER),
        ],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_grant");
}

#[tokio::test]
async fn test_wrong_secret_rejected() {
    let vault = TempDir::new().unwrap();
    let app = build_app(&vault, false);

    let client = register_client(&app).await;
    let client_id = client["client_id"].as_str().unwrap();
    let code = authorize(&app, client_id, REDIRECT_URI, "").await;

    let (status, json) = exchange(
        &app,
        &[
            ("grant_type", "authorization_code"),
            ("client_id", client_id),
            ("client_secret", "wrong-secret"),
            ("code", code.as_str()),
            ("redirect_uri", REDIRECT_URI),
            ("code_verifier", CODE_VERIFIER),
        ],
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "invalid_client");
}

#[tokio::test]
async fn test_unsupported_grant_type() {
    let vault = TempDir::new().unwrap();
    let app = build_app(&vault, false);

    let (status, json) =
        exchange(&app, &[("grant_type", "client_credentials"), ("client_id", "x")]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "unsupported_grant_type");
}

#[tokio::test]
async fn test_missing_field_does_not_burn_code() {
    let vault = TempDir::new().unwrap();
    let app = build_app(&vault, false);

    let client = register_client(&app).await;
    let client_id = client["client_id"].as_str().unwrap();
    let client_secret = client["client_secret"].as_str().unwrap();
    let code = authorize(&app, client_id, REDIRECT_URI, "").await;

    // Missing code_verifier is a malformed request, checked before the code
    // is consumed.
    let (status, json) = exchange(
        &app,
        &[
            ("grant_type", "authorization_code"),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("code", code.as_str()),
            ("redirect_uri", REDIRECT_URI),
        ],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_request");

    // The code is still live.
    let (status, _) = exchange(
        &app,
        &[
            ("grant_type", "authorization_code"),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("code", code.as_str()),
            ("redirect_uri", REDIRECT_URI),
            ("code_verifier", CODE_VERIFIER),
        ],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

// ─── Bearer Enforcement Gate ─────────────────────────────────────────────────

#[tokio::test]
async fn test_mcp_requires_bearer_token() {
    let vault = TempDir::new().unwrap();
    let app = build_app(&vault, false);

    let response = app
        .oneshot(
            Request::post("/mcp")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"jsonrpc": "2.0", "method": "tools/list", "id": 1}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let www_auth =
        response.headers().get(header::WWW_AUTHENTICATE).unwrap().to_str().unwrap().to_owned();
    assert!(www_auth.starts_with(&format!("Bearer realm=\"{BASE_URL}\"")));
    assert!(www_auth
        .contains(&format!("resource_metadata=\"{BASE_URL}/.well-known/oauth-protected-resource\"")));
    assert!(www_auth.contains("scope=\"mcp\""));
    assert!(www_auth.contains("error=\"invalid_token\""));

    assert_eq!(body_json(response).await["error"], "invalid_token");
}

#[tokio::test]
async fn test_mcp_rejects_non_bearer_scheme() {
    let vault = TempDir::new().unwrap();
    let app = build_app(&vault, false);

    let response = app
        .oneshot(
            Request::post("/mcp")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                .body(Body::from(json!({"jsonrpc": "2.0", "method": "ping", "id": 1}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_mcp_rejects_unknown_token() {
    let vault = TempDir::new().unwrap();
    let app = build_app(&vault, false);

    let response = app
        .oneshot(
            Request::post("/mcp")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, "Bearer not-a-real-token")
                .body(Body::from(json!({"jsonrpc": "2.0", "method": "ping", "id": 1}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "invalid_token");
}

#[tokio::test]
async fn test_health_and_discovery_bypass_gate() {
    let vault = TempDir::new().unwrap();
    let app = build_app(&vault, false);

    for path in ["/health", "/", "/.well-known/oauth-authorization-server"] {
        let response =
            app.clone().oneshot(Request::get(path).body(Body::empty()).unwrap()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{path} should bypass the gate");
    }
}

// ─── Ambient Clients ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_ambient_client_full_flow_without_registration() {
    let vault = TempDir::new().unwrap();
    let app = build_app(&vault, true);
    let ambient_redirect = "https://claude.ai/api/mcp/auth_callback";

    // No registration: the client id is accepted as-is.
    let code = authorize(&app, "mcp_anything", ambient_redirect, "s").await;

    // No client_secret either: the synthesized client has none.
    let (status, json) = exchange(
        &app,
        &[
            ("grant_type", "authorization_code"),
            ("client_id", "mcp_anything"),
            ("code", code.as_str()),
            ("redirect_uri", ambient_redirect),
            ("code_verifier", CODE_VERIFIER),
        ],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!json["access_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_ambient_client_restricted_to_fixed_redirects() {
    let vault = TempDir::new().unwrap();
    let app = build_app(&vault, true);

    let response = authorize_raw(
        &app,
        &[
            ("client_id", "mcp_anything"),
            ("redirect_uri", "https://attacker.example/cb"),
            ("response_type", "code"),
            ("code_challenge", CODE_CHALLENGE),
            ("code_challenge_method", "S256"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "invalid_redirect_uri");
}

#[tokio::test]
async fn test_unknown_client_rejected_when_ambient_disabled() {
    let vault = TempDir::new().unwrap();
    let app = build_app(&vault, false);

    let response = authorize_raw(
        &app,
        &[
            ("client_id", "mcp_anything"),
            ("redirect_uri", "https://claude.ai/api/mcp/auth_callback"),
            ("response_type", "code"),
            ("code_challenge", CODE_CHALLENGE),
            ("code_challenge_method", "S256"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "invalid_client");
}

//! HTTP transport for the MCP server.
//!
//! Wires the OAuth authorization server, the discovery documents, and the
//! bearer-gated `/mcp` endpoint into one axum router. Tool calls arrive as
//! JSON-RPC 2.0 over POST; a GET opens a keep-alive SSE stream.

use std::borrow::Cow;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::sse::{Event, KeepAlive, Sse},
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use futures::stream;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::oauth::{bearer, handlers, CredentialStore};
use crate::config::Config;
use crate::tools::{McpTool, ToolContext};

/// JSON-RPC 2.0 request.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: Cow<'static, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 error.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcResponse {
    /// JSON-RPC version constant.
    const VERSION: &'static str = "2.0";

    #[must_use]
    pub fn success(id: Option<serde_json::Value>, result: serde_json::Value) -> Self {
        Self { jsonrpc: Cow::Borrowed(Self::VERSION), result: Some(result), error: None, id }
    }

    #[must_use]
    pub fn error(id: Option<serde_json::Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: Cow::Borrowed(Self::VERSION),
            result: None,
            error: Some(JsonRpcError { code, message: message.into(), data: None }),
            id,
        }
    }
}

/// MCP tool info for tools/list response.
#[derive(Debug, Serialize)]
pub struct McpToolInfo {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

/// Shared state for HTTP handlers.
pub struct HttpState {
    pub tools: Vec<Box<dyn McpTool>>,
    pub ctx: ToolContext,
    pub store: CredentialStore,
    pub config: Config,
}

/// Create the HTTP router.
pub fn create_router(tools: Vec<Box<dyn McpTool>>, ctx: ToolContext, config: Config) -> Router {
    let store = CredentialStore::new(config.allow_ambient_clients);
    let state = Arc::new(HttpState { tools, ctx, store, config });

    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        // OAuth discovery + endpoints (outside the bearer gate)
        .route(
            "/.well-known/oauth-authorization-server",
            get(handlers::authorization_server_metadata),
        )
        .route(
            "/.well-known/oauth-protected-resource",
            get(handlers::protected_resource_metadata),
        )
        .route("/oauth/register", post(handlers::register))
        .route("/oauth/authorize", get(handlers::authorize))
        .route("/oauth/token", post(handlers::token))
        // MCP endpoint, guarded by the bearer gate below
        .route("/mcp", post(handle_mcp_post).get(handle_mcp_get))
        .layer(middleware::from_fn_with_state(Arc::clone(&state), bearer::enforce))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "vault-agent-mcp",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn readiness_check(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ready",
        "service": "vault-agent-mcp",
        "version": env!("CARGO_PKG_VERSION"),
        "tools": state.tools.len()
    }))
}

/// Handle POST requests to /mcp.
async fn handle_mcp_post(
    State(state): State<Arc<HttpState>>,
    bearer: Option<Extension<bearer::BearerContext>>,
    Json(req): Json<JsonRpcRequest>,
) -> Response {
    let client_id = bearer.as_ref().map_or("-", |e| e.0.client_id.as_str());
    tracing::debug!(client_id, method = %req.method, "Handling MCP request");

    let is_notification = req.id.is_none();

    let response = match req.method.as_str() {
        "initialize" => handle_initialize(req.id, &req.params),
        "notifications/initialized" | "initialized" => {
            if is_notification {
                return StatusCode::ACCEPTED.into_response();
            }
            JsonRpcResponse::success(req.id, serde_json::json!({}))
        }
        "tools/list" => handle_tools_list(req.id, &state.tools),
        "tools/call" => handle_tools_call(req.id, &req.params, &state.tools, &state.ctx).await,
        "ping" => JsonRpcResponse::success(req.id, serde_json::json!({})),
        "notifications/cancelled" => {
            if is_notification {
                return StatusCode::ACCEPTED.into_response();
            }
            JsonRpcResponse::success(req.id, serde_json::json!({}))
        }
        _ => {
            if is_notification {
                return StatusCode::ACCEPTED.into_response();
            }
            JsonRpcResponse::error(req.id, -32601, format!("Method not found: {}", req.method))
        }
    };

    Json(response).into_response()
}

/// Handle GET requests to /mcp.
///
/// The server never initiates messages, so the stream only carries
/// keep-alives; clients that open it per the streamable HTTP transport just
/// hold an idle connection.
async fn handle_mcp_get() -> impl IntoResponse {
    let pending = stream::pending::<Result<Event, Infallible>>();
    Sse::new(pending)
        .keep_alive(KeepAlive::new().interval(Duration::from_secs(15)).text("ping"))
}

pub(crate) fn handle_initialize(
    id: Option<serde_json::Value>,
    params: &serde_json::Value,
) -> JsonRpcResponse {
    let protocol_version =
        params.get("protocolVersion").and_then(|v| v.as_str()).unwrap_or("2024-11-05");

    tracing::info!("MCP initialize: protocol version {}", protocol_version);

    JsonRpcResponse::success(
        id,
        serde_json::json!({
            "protocolVersion": protocol_version,
            "capabilities": {
                "tools": {
                    "listChanged": false
                }
            },
            "serverInfo": {
                "name": "vault-agent-mcp",
                "version": env!("CARGO_PKG_VERSION")
            }
        }),
    )
}

pub(crate) fn handle_tools_list(
    id: Option<serde_json::Value>,
    tools: &[Box<dyn McpTool>],
) -> JsonRpcResponse {
    let tool_list: Vec<McpToolInfo> = tools
        .iter()
        .map(|t| McpToolInfo {
            name: t.name().to_string(),
            description: t.description().to_string(),
            input_schema: t.input_schema(),
        })
        .collect();

    JsonRpcResponse::success(id, serde_json::json!({ "tools": tool_list }))
}

pub(crate) async fn handle_tools_call(
    id: Option<serde_json::Value>,
    params: &serde_json::Value,
    tools: &[Box<dyn McpTool>],
    ctx: &ToolContext,
) -> JsonRpcResponse {
    let Some(tool_name) = params.get("name").and_then(|v| v.as_str()) else {
        return JsonRpcResponse::error(id, -32602, "Missing 'name' parameter");
    };

    let arguments = params.get("arguments").cloned().unwrap_or(serde_json::json!({}));

    let Some(tool) = tools.iter().find(|t| t.name() == tool_name) else {
        return JsonRpcResponse::error(id, -32602, format!("Tool not found: {tool_name}"));
    };

    tracing::info!(tool = %tool_name, "Executing tool");

    match tool.execute(ctx, arguments).await {
        Ok(result) => JsonRpcResponse::success(
            id,
            serde_json::json!({
                "content": [{
                    "type": "text",
                    "text": result
                }]
            }),
        ),
        Err(e) => {
            tracing::error!(tool = %tool_name, error = %e, "Tool execution failed");
            JsonRpcResponse::error(id, -32000, format!("Tool error: {}", e.to_user_message()))
        }
    }
}

//! Stdio transport for the MCP protocol.
//!
//! Handles JSON-RPC 2.0 over stdin/stdout for local clients. Local processes
//! already hold vault-level trust, so the OAuth gate does not apply here.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use super::transport::{
    handle_initialize, handle_tools_call, handle_tools_list, JsonRpcRequest, JsonRpcResponse,
};
use crate::tools::{McpTool, ToolContext};

/// Handle MCP protocol over stdio until stdin closes.
pub async fn run_stdio(tools: Vec<Box<dyn McpTool>>, ctx: ToolContext) -> anyhow::Result<()> {
    let stdin = tokio::io::stdin();
    let mut stdout = tokio::io::stdout();
    let mut reader = BufReader::new(stdin);
    let mut line = String::new();

    tracing::info!("MCP stdio server ready, waiting for requests...");

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;

        if bytes_read == 0 {
            // EOF
            tracing::info!("Stdin closed, shutting down");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let request: JsonRpcRequest = match serde_json::from_str(trimmed) {
            Ok(req) => req,
            Err(e) => {
                let error_response =
                    JsonRpcResponse::error(None, -32700, format!("Parse error: {e}"));
                write_response(&mut stdout, &error_response).await?;
                continue;
            }
        };

        tracing::debug!(method = %request.method, "Received request");

        let response = handle_request(request, &tools, &ctx).await;
        if let Some(response) = response {
            write_response(&mut stdout, &response).await?;
        }
    }

    Ok(())
}

async fn write_response(
    stdout: &mut tokio::io::Stdout,
    response: &JsonRpcResponse,
) -> anyhow::Result<()> {
    let response_json = serde_json::to_string(response)?;
    stdout.write_all(response_json.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    Ok(())
}

/// Dispatch one request; notifications produce no response.
async fn handle_request(
    req: JsonRpcRequest,
    tools: &[Box<dyn McpTool>],
    ctx: &ToolContext,
) -> Option<JsonRpcResponse> {
    let is_notification = req.id.is_none();

    let response = match req.method.as_str() {
        "initialize" => handle_initialize(req.id, &req.params),
        "notifications/initialized" | "initialized" => {
            if is_notification {
                return None;
            }
            JsonRpcResponse::success(req.id, serde_json::json!({}))
        }
        "tools/list" => handle_tools_list(req.id, tools),
        "tools/call" => handle_tools_call(req.id, &req.params, tools, ctx).await,
        "ping" => JsonRpcResponse::success(req.id, serde_json::json!({})),
        _ => {
            if is_notification {
                return None;
            }
            JsonRpcResponse::error(req.id, -32601, format!("Method not found: {}", req.method))
        }
    };

    Some(response)
}

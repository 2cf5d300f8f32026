//! Note tools: vault_read, vault_write.

use serde::Deserialize;
use serde_json::json;

use super::{McpTool, ToolContext};
use crate::error::ToolResult;

/// Note reading tool.
pub struct ReadNoteTool;

#[derive(Debug, Deserialize)]
struct ReadInput {
    path: String,
}

#[async_trait::async_trait]
impl McpTool for ReadNoteTool {
    fn name(&self) -> &'static str {
        "vault_read"
    }

    fn description(&self) -> &'static str {
        "Read a markdown note inside the vault and return its content."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Vault-relative path of the note (must end in .md)"
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: ReadInput = serde_json::from_value(input)?;
        let content = ctx.vault.read(&params.path).await?;
        Ok(serde_json::to_string_pretty(&json!({ "content": content }))?)
    }
}

/// Note writing tool.
pub struct WriteNoteTool;

#[derive(Debug, Deserialize)]
struct WriteInput {
    path: String,
    content: String,
}

#[async_trait::async_trait]
impl McpTool for WriteNoteTool {
    fn name(&self) -> &'static str {
        "vault_write"
    }

    fn description(&self) -> &'static str {
        "Create or overwrite a markdown note inside the vault. \
         Parent directories are created as needed."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Vault-relative path of the note (must end in .md)"
                },
                "content": {
                    "type": "string",
                    "description": "Full note content"
                }
            },
            "required": ["path", "content"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: WriteInput = serde_json::from_value(input)?;
        ctx.vault.write(&params.path, &params.content).await?;
        Ok(serde_json::to_string_pretty(&json!({ "ok": true }))?)
    }
}

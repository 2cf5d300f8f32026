//! Browsing tools: vault_ls, vault_tree, vault_glob.

use serde::Deserialize;
use serde_json::json;

use super::{McpTool, ToolContext};
use crate::error::ToolResult;

/// Directory listing tool.
pub struct LsTool;

#[derive(Debug, Deserialize)]
struct LsInput {
    #[serde(default)]
    path: String,
}

#[async_trait::async_trait]
impl McpTool for LsTool {
    fn name(&self) -> &'static str {
        "vault_ls"
    }

    fn description(&self) -> &'static str {
        "List directories and markdown notes inside the vault. \
         Pass a vault-relative path, or omit it for the vault root."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Vault-relative directory path (empty for the root)",
                    "default": ""
                }
            }
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: LsInput = serde_json::from_value(input)?;
        let entries = ctx.vault.ls(&params.path).await?;
        Ok(serde_json::to_string_pretty(&json!({ "entries": entries }))?)
    }
}

/// Full vault tree tool.
pub struct TreeTool;

#[async_trait::async_trait]
impl McpTool for TreeTool {
    fn name(&self) -> &'static str {
        "vault_tree"
    }

    fn description(&self) -> &'static str {
        "Show the nested directory and note structure of the whole vault."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, ctx: &ToolContext, _input: serde_json::Value) -> ToolResult<String> {
        let tree = ctx.vault.tree().await?;
        Ok(serde_json::to_string_pretty(&json!({ "tree": tree }))?)
    }
}

/// Glob matching tool.
pub struct GlobTool;

#[derive(Debug, Deserialize)]
struct GlobInput {
    pattern: String,
}

#[async_trait::async_trait]
impl McpTool for GlobTool {
    fn name(&self) -> &'static str {
        "vault_glob"
    }

    fn description(&self) -> &'static str {
        "Find notes whose vault-relative path matches a glob pattern \
         (e.g. 'Daily/*.md' or '**/project*.md')."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "pattern": {
                    "type": "string",
                    "description": "Glob pattern matched against vault-relative note paths"
                }
            },
            "required": ["pattern"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: GlobInput = serde_json::from_value(input)?;
        let matches = ctx.vault.glob(&params.pattern).await?;
        Ok(serde_json::to_string_pretty(&json!({ "matches": matches }))?)
    }
}

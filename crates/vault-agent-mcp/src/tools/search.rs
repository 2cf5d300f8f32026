//! Search tool: vault_search.

use serde::Deserialize;
use serde_json::json;

use super::{McpTool, ToolContext};
use crate::error::{ToolError, ToolResult};

/// Full-text note search tool.
pub struct SearchTool;

#[derive(Debug, Deserialize)]
struct SearchInput {
    query: String,
    #[serde(default)]
    case_sensitive: bool,
}

#[async_trait::async_trait]
impl McpTool for SearchTool {
    fn name(&self) -> &'static str {
        "vault_search"
    }

    fn description(&self) -> &'static str {
        "Search all notes in the vault for a literal text query. \
         Returns matching lines with their note path and line number."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Literal text to search for"
                },
                "case_sensitive": {
                    "type": "boolean",
                    "description": "Match case exactly",
                    "default": false
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: SearchInput = serde_json::from_value(input)?;
        if params.query.is_empty() {
            return Err(ToolError::validation("query", "cannot be empty"));
        }

        let matches = ctx.vault.search(&params.query, params.case_sensitive).await?;
        let count = matches.len();
        Ok(serde_json::to_string_pretty(&json!({
            "matches": matches,
            "count": count
        }))?)
    }
}

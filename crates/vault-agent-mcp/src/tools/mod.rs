//! MCP tool implementations.
//!
//! Each tool:
//! 1. Parses and validates its input parameters
//! 2. Calls the vault file-access layer
//! 3. Returns results as a JSON string

mod browse;
mod notes;
mod search;

pub use browse::*;
pub use notes::*;
pub use search::*;

use std::sync::Arc;

use crate::error::ToolResult;
use crate::vault::VaultStore;

/// Tool execution context.
pub struct ToolContext {
    /// Vault file-access layer.
    pub vault: Arc<VaultStore>,
}

impl ToolContext {
    /// Create a new tool context.
    #[must_use]
    pub fn new(vault: Arc<VaultStore>) -> Self {
        Self { vault }
    }
}

/// Trait for MCP tools.
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Tool name (e.g., "vault_read").
    fn name(&self) -> &'static str;

    /// Tool description for the LLM.
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters.
    fn input_schema(&self) -> serde_json::Value;

    /// Execute the tool with the given input.
    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String>;
}

/// Register all tools.
#[must_use]
pub fn register_all_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        // Browsing (3)
        Box::new(browse::LsTool),
        Box::new(browse::TreeTool),
        Box::new(browse::GlobTool),
        // Notes (2)
        Box::new(notes::ReadNoteTool),
        Box::new(notes::WriteNoteTool),
        // Search (1)
        Box::new(search::SearchTool),
    ]
}

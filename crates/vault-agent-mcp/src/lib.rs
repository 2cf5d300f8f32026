//! Vault Agent MCP Server
//!
//! A Model Context Protocol (MCP) server exposing an Obsidian-style note
//! vault to LLM agents, guarded by an embedded OAuth 2.0 authorization
//! server.
//!
//! # Features
//!
//! - **Vault tools**: list, read, write, glob, tree, and search over
//!   markdown notes, confined to the vault root
//! - **OAuth 2.0**: authorization code grant with mandatory PKCE, dynamic
//!   client registration, and well-known discovery metadata
//! - **Bearer gate**: RFC 6750 token enforcement on the MCP endpoint
//! - **Dual transport**: stdio for local clients, HTTP for remote access
//!
//! # Example
//!
//! ```no_run
//! use vault_agent_mcp::{config::Config, server::McpServer, vault::VaultStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::new("/vault", "http://localhost:8001");
//!     let vault = VaultStore::new(config.vault_path.clone());
//!     McpServer::new(vault, config).run_stdio().await
//! }
//! ```

pub mod config;
pub mod error;
pub mod server;
pub mod tools;
pub mod vault;

pub use config::Config;
pub use error::{ToolError, VaultError};
pub use vault::VaultStore;

//! OAuth 2.0 authorization server guarding the vault tools.
//!
//! A self-contained authorization server embedded in the binary: remote MCP
//! clients negotiate access entirely through machine-readable discovery,
//! dynamic registration, and the PKCE-protected authorization code grant,
//! then present the resulting bearer token on every protected call.
//!
//! ## Supported Standards
//! - RFC 9728: OAuth Protected Resource Metadata
//! - RFC 8414: OAuth Authorization Server Metadata
//! - RFC 7591: Dynamic Client Registration
//! - RFC 7636: PKCE (S256)
//! - RFC 6749: Authorization Code Grant
//! - RFC 6750: Bearer Token Usage

pub mod bearer;
pub mod error;
pub mod handlers;
pub mod pkce;
pub mod store;
pub mod types;

pub use store::CredentialStore;

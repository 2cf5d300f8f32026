//! Configuration for the vault agent MCP server.

use std::path::PathBuf;
use std::time::Duration;

/// Protocol and deployment defaults.
pub mod defaults {
    use std::time::Duration;

    /// Authorization code lifetime.
    pub const AUTH_CODE_TTL: Duration = Duration::from_secs(600);

    /// Access token lifetime.
    pub const ACCESS_TOKEN_TTL: Duration = Duration::from_secs(3600);

    /// Scope granted when an authorization request names none.
    pub const SCOPE: &str = "mcp";

    /// Path prefixes guarded by the bearer gate.
    pub const PROTECTED_PATHS: &[&str] = &["/mcp"];

    /// Vault mount point inside the container.
    pub const VAULT_PATH: &str = "/vault";

    /// HTTP port.
    pub const PORT: u16 = 8001;
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the note vault.
    pub vault_path: PathBuf,

    /// Public base URL; doubles as OAuth issuer and resource identifier.
    pub base_url: String,

    /// Accept unregistered client ids at the authorization endpoint.
    ///
    /// When set, unknown client ids resolve to a synthesized client with a
    /// fixed redirect allow-list and no secret. Intended for front-ends that
    /// cannot perform dynamic registration; a deployment-time risk, off by
    /// default.
    pub allow_ambient_clients: bool,

    /// Authorization code lifetime.
    pub auth_code_ttl: Duration,

    /// Access token lifetime.
    pub access_token_ttl: Duration,

    /// Path prefixes guarded by the bearer gate.
    pub protected_paths: Vec<String>,
}

impl Config {
    /// Create a configuration with protocol defaults.
    ///
    /// A trailing slash on `base_url` is stripped so derived endpoint URLs
    /// stay canonical.
    #[must_use]
    pub fn new(vault_path: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            vault_path: vault_path.into(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            allow_ambient_clients: false,
            auth_code_ttl: defaults::AUTH_CODE_TTL,
            access_token_ttl: defaults::ACCESS_TOKEN_TTL,
            protected_paths: defaults::PROTECTED_PATHS.iter().map(|p| (*p).to_owned()).collect(),
        }
    }

    /// Create a test configuration rooted at a temporary vault.
    #[must_use]
    pub fn for_testing(vault_path: impl Into<PathBuf>) -> Self {
        Self::new(vault_path, "https://notes.example.com")
    }

    /// URL of the Protected Resource Metadata document.
    #[must_use]
    pub fn resource_metadata_url(&self) -> String {
        format!("{}/.well-known/oauth-protected-resource", self.base_url)
    }
}

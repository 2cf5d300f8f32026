//! OAuth 2.0 entity types held by the credential store.

use std::time::Instant;

use chrono::{DateTime, Utc};

/// Redirect targets granted to ambient (unregistered) clients.
///
/// These are the callback URLs of the trusted front-end the ambient
/// relaxation exists for; nothing else may receive a code minted for an
/// unregistered client id.
pub const AMBIENT_REDIRECT_URIS: [&str; 2] = [
    "https://claude.ai/api/mcp/auth_callback",
    "https://claude.com/api/mcp/auth_callback",
];

/// A registered (or synthesized) OAuth client.
#[derive(Debug, Clone)]
pub struct Client {
    pub client_id: String,
    /// Empty only for the ambient variant, which skips the secret check.
    pub client_secret: String,
    pub redirect_uris: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Client {
    /// Whether `uri` is on this client's redirect allow-list.
    #[must_use]
    pub fn redirect_allowed(&self, uri: &str) -> bool {
        self.redirect_uris.iter().any(|u| u == uri)
    }
}

/// Result of a client lookup.
///
/// An unknown client id resolves to `Ambient` only when the store accepts
/// unregistered clients; the synthesized record is never persisted.
#[derive(Debug, Clone)]
pub enum ResolvedClient {
    Registered(Client),
    Ambient(Client),
}

impl ResolvedClient {
    #[must_use]
    pub fn client(&self) -> &Client {
        match self {
            Self::Registered(client) | Self::Ambient(client) => client,
        }
    }

    /// Secret verification applies only to clients holding a non-empty secret.
    #[must_use]
    pub fn requires_secret(&self) -> bool {
        match self {
            Self::Registered(client) => !client.client_secret.is_empty(),
            Self::Ambient(_) => false,
        }
    }
}

/// A single-use authorization code.
#[derive(Debug, Clone)]
pub struct AuthorizationCode {
    pub code: String,
    pub client_id: String,
    /// Must match the redirect_uri presented at exchange time.
    pub redirect_uri: String,
    pub code_challenge: String,
    pub code_challenge_method: String,
    pub scope: String,
    pub resource: Option<String>,
    pub expires_at: Instant,
}

impl AuthorizationCode {
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// A bearer access token, reusable until expiry.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub client_id: String,
    pub scope: String,
    pub resource: Option<String>,
    pub expires_at: Instant,
}

impl AccessToken {
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn token_expiring_at(expires_at: Instant) -> AccessToken {
        AccessToken {
            token: "tok".to_owned(),
            client_id: "client1".to_owned(),
            scope: "mcp".to_owned(),
            resource: None,
            expires_at,
        }
    }

    #[test]
    fn test_token_valid_before_expiry() {
        let token = token_expiring_at(Instant::now() + Duration::from_secs(1));
        assert!(!token.is_expired());
    }

    #[test]
    fn test_token_expired_after_expiry() {
        let token = token_expiring_at(Instant::now() - Duration::from_secs(1));
        assert!(token.is_expired());
    }

    #[test]
    fn test_code_expired_boundary() {
        let mut code = AuthorizationCode {
            code: "code".to_owned(),
            client_id: "client1".to_owned(),
            redirect_uri: "https://client.example/cb".to_owned(),
            code_challenge: "challenge".to_owned(),
            code_challenge_method: "S256".to_owned(),
            scope: "mcp".to_owned(),
            resource: None,
            expires_at: Instant::now() + Duration::from_secs(600),
        };
        assert!(!code.is_expired());
        code.expires_at = Instant::now() - Duration::from_secs(1);
        assert!(code.is_expired());
    }

    #[test]
    fn test_ambient_client_skips_secret() {
        let ambient = ResolvedClient::Ambient(Client {
            client_id: "mcp_anything".to_owned(),
            client_secret: String::new(),
            redirect_uris: AMBIENT_REDIRECT_URIS.iter().map(|u| (*u).to_owned()).collect(),
            created_at: Utc::now(),
        });
        assert!(!ambient.requires_secret());
        assert!(ambient.client().redirect_allowed("https://claude.ai/api/mcp/auth_callback"));
    }

    #[test]
    fn test_registered_client_requires_secret() {
        let registered = ResolvedClient::Registered(Client {
            client_id: "client1".to_owned(),
            client_secret: "s3cret".to_owned(),
            redirect_uris: vec!["https://client.example/cb".to_owned()],
            created_at: Utc::now(),
        });
        assert!(registered.requires_secret());
        assert!(!registered.client().redirect_allowed("https://attacker.example/cb"));
    }
}

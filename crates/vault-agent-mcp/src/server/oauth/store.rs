//! In-memory credential store for clients, authorization codes, and tokens.
//!
//! Expiry is lazy: there is no background reaper. Every mutating or
//! validating call first drops the expired entries of its own map, so an
//! expired code or token is never observable even if it has not been
//! physically removed yet. Growth is bounded by entries created since the
//! last access of that category, which is fine at single-client scale.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::sync::RwLock;

use super::error::OAuthError;
use super::types::{
    AccessToken, AuthorizationCode, Client, ResolvedClient, AMBIENT_REDIRECT_URIS,
};

/// Process-local OAuth state store. Cloning shares the underlying maps.
#[derive(Clone)]
pub struct CredentialStore {
    /// Accept unregistered client ids by synthesizing an ambient client.
    ambient: bool,
    clients: Arc<RwLock<HashMap<String, Client>>>,
    auth_codes: Arc<RwLock<HashMap<String, AuthorizationCode>>>,
    access_tokens: Arc<RwLock<HashMap<String, AccessToken>>>,
}

impl CredentialStore {
    #[must_use]
    pub fn new(ambient: bool) -> Self {
        Self {
            ambient,
            clients: Arc::new(RwLock::new(HashMap::new())),
            auth_codes: Arc::new(RwLock::new(HashMap::new())),
            access_tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Generate an unguessable opaque value using two UUIDs (256 bits).
    fn generate_token() -> String {
        format!("{}{}", uuid::Uuid::new_v4().simple(), uuid::Uuid::new_v4().simple())
    }

    /// Register a new client (Dynamic Client Registration).
    ///
    /// The redirect allow-list must be non-empty; contents are validated by
    /// the registration endpoint before this is called.
    pub async fn register_client(&self, redirect_uris: Vec<String>) -> Result<Client, OAuthError> {
        if redirect_uris.is_empty() {
            return Err(OAuthError::invalid_redirect_uri("redirect_uris must not be empty"));
        }

        let client = Client {
            client_id: uuid::Uuid::new_v4().simple().to_string(),
            client_secret: Self::generate_token(),
            redirect_uris,
            created_at: Utc::now(),
        };

        self.clients.write().await.insert(client.client_id.clone(), client.clone());
        Ok(client)
    }

    /// Look up a client by id.
    ///
    /// In ambient mode an unknown id resolves to a synthesized client with
    /// the fixed redirect allow-list and an empty secret; the record is
    /// recomputed per lookup and never stored.
    pub async fn get_client(&self, client_id: &str) -> Option<ResolvedClient> {
        if let Some(client) = self.clients.read().await.get(client_id) {
            return Some(ResolvedClient::Registered(client.clone()));
        }

        if self.ambient {
            return Some(ResolvedClient::Ambient(Client {
                client_id: client_id.to_owned(),
                client_secret: String::new(),
                redirect_uris: AMBIENT_REDIRECT_URIS.iter().map(|u| (*u).to_owned()).collect(),
                created_at: Utc::now(),
            }));
        }

        None
    }

    /// Mint an authorization code binding the approved request parameters.
    ///
    /// Input validation is the authorization endpoint's responsibility; this
    /// always succeeds. Expired codes are swept as a side effect.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_authorization_code(
        &self,
        client_id: String,
        redirect_uri: String,
        code_challenge: String,
        code_challenge_method: String,
        scope: String,
        resource: Option<String>,
        ttl: Duration,
    ) -> String {
        let mut codes = self.auth_codes.write().await;
        codes.retain(|_, code| !code.is_expired());

        let code = Self::generate_token();
        codes.insert(
            code.clone(),
            AuthorizationCode {
                code: code.clone(),
                client_id,
                redirect_uri,
                code_challenge,
                code_challenge_method,
                scope,
                resource,
                expires_at: Instant::now() + ttl,
            },
        );
        code
    }

    /// Atomically take an authorization code (one-time use).
    ///
    /// The sweep and the removal happen under one write lock, so two
    /// concurrent consumers of the same code cannot both observe it: the
    /// first wins, the second gets `None`.
    pub async fn consume_authorization_code(&self, code: &str) -> Option<AuthorizationCode> {
        let mut codes = self.auth_codes.write().await;
        codes.retain(|_, entry| !entry.is_expired());
        codes.remove(code)
    }

    /// Issue an access token. Expired tokens are swept as a side effect.
    pub async fn create_access_token(
        &self,
        client_id: &str,
        scope: &str,
        resource: Option<String>,
        ttl: Duration,
    ) -> String {
        let mut tokens = self.access_tokens.write().await;
        tokens.retain(|_, token| !token.is_expired());

        let token = Self::generate_token();
        tokens.insert(
            token.clone(),
            AccessToken {
                token: token.clone(),
                client_id: client_id.to_owned(),
                scope: scope.to_owned(),
                resource,
                expires_at: Instant::now() + ttl,
            },
        );
        token
    }

    /// Validate a bearer token.
    ///
    /// Never consumes the token (tokens are reusable until expiry, unlike
    /// codes), but sweeps expired entries first so an expired-but-unswept
    /// token is never reported valid.
    pub async fn validate_token(&self, token: &str) -> Option<AccessToken> {
        let mut tokens = self.access_tokens.write().await;
        tokens.retain(|_, entry| !entry.is_expired());
        tokens.get(token).cloned()
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore").field("ambient", &self.ambient).finish()
    }
}

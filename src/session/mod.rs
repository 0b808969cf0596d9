// Session users come from the upstream account service. This module only
// reads them; issuing, refreshing and destroying sessions belongs to the
// account service itself.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::access::Role;
use crate::config;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantMembership {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Authenticated user as reported by the account service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub role: Role,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tenants: Vec<TenantMembership>,
}

/// Source of the current session user. An upstream failure is reported as
/// `None` - unauthenticated is a valid state here, not an error.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn current_user(&self, token: Option<&str>) -> Option<SessionUser>;
}

/// Resolves sessions against the account service over HTTP, forwarding the
/// opaque session cookie. No retries; a failed lookup is a guest request.
pub struct HttpSessionProvider {
    client: reqwest::Client,
    base_url: String,
    cookie_name: String,
    timeout: Duration,
}

impl HttpSessionProvider {
    pub fn from_config() -> Self {
        let account = &config::config().account;
        Self {
            client: reqwest::Client::new(),
            base_url: account.base_url.trim_end_matches('/').to_string(),
            cookie_name: account.session_cookie.clone(),
            timeout: Duration::from_secs(account.timeout_secs),
        }
    }
}

#[async_trait]
impl SessionProvider for HttpSessionProvider {
    async fn current_user(&self, token: Option<&str>) -> Option<SessionUser> {
        let token = token?;
        let url = format!("{}/v1/session", self.base_url);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .header(
                reqwest::header::COOKIE,
                format!("{}={}", self.cookie_name, token),
            )
            .send()
            .await;

        match response {
            Ok(resp) if resp.status() == reqwest::StatusCode::UNAUTHORIZED => None,
            Ok(resp) if resp.status().is_success() => match resp.json::<SessionUser>().await {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!("Account service returned an unreadable session: {}", e);
                    None
                }
            },
            Ok(resp) => {
                tracing::warn!(
                    "Account service answered {} for session lookup, treating as guest",
                    resp.status()
                );
                None
            }
            Err(e) => {
                tracing::warn!("Account service unreachable, treating as guest: {}", e);
                None
            }
        }
    }
}

/// Serves a fixed user regardless of token. Stands in for the account
/// service in development and integration tests.
pub struct FixtureSessionProvider {
    user: Option<SessionUser>,
}

impl FixtureSessionProvider {
    pub fn new(user: Option<SessionUser>) -> Self {
        Self { user }
    }

    /// Build from PORTAL_SESSION_FIXTURE when the environment permits it
    pub fn from_env() -> Option<Self> {
        let raw = std::env::var("PORTAL_SESSION_FIXTURE").ok()?;
        if !config::config().account.allow_session_fixture {
            tracing::warn!("PORTAL_SESSION_FIXTURE is set but fixtures are not allowed here");
            return None;
        }
        match serde_json::from_str::<SessionUser>(&raw) {
            Ok(user) => {
                tracing::info!("Session fixture active for user {} ({})", user.id, user.role.as_str());
                Some(Self::new(Some(user)))
            }
            Err(e) => {
                tracing::warn!("Ignoring unparseable PORTAL_SESSION_FIXTURE: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl SessionProvider for FixtureSessionProvider {
    async fn current_user(&self, _token: Option<&str>) -> Option<SessionUser> {
        self.user.clone()
    }
}

/// Pick the provider for this process: the fixture when configured and
/// permitted, otherwise the real account service client.
pub fn provider_from_env() -> Arc<dyn SessionProvider> {
    match FixtureSessionProvider::from_env() {
        Some(fixture) => Arc::new(fixture),
        None => Arc::new(HttpSessionProvider::from_config()),
    }
}

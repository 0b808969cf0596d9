use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub account: AccountServiceConfig,
    pub toggles: TogglesConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountServiceConfig {
    /// Base URL of the upstream account service, e.g. https://accounts.nimbus.example
    pub base_url: String,
    pub timeout_secs: u64,
    /// Name of the session cookie forwarded to the account service
    pub session_cookie: String,
    /// Whether PORTAL_SESSION_FIXTURE may stand in for the account service
    pub allow_session_fixture: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TogglesConfig {
    /// Optional path to a JSON file overriding the embedded toggle tree
    pub override_path: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("PORTAL_ENABLE_CORS") {
            self.server.enable_cors = v.parse().unwrap_or(self.server.enable_cors);
        }
        if let Ok(v) = env::var("PORTAL_CORS_ORIGINS") {
            self.server.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Ok(v) = env::var("PORTAL_ENABLE_REQUEST_LOGGING") {
            self.server.enable_request_logging =
                v.parse().unwrap_or(self.server.enable_request_logging);
        }

        // Account service overrides
        if let Ok(v) = env::var("PORTAL_ACCOUNT_BASE_URL") {
            match url::Url::parse(&v) {
                Ok(_) => self.account.base_url = v,
                Err(e) => tracing::warn!("Ignoring invalid PORTAL_ACCOUNT_BASE_URL '{}': {}", v, e),
            }
        }
        if let Ok(v) = env::var("PORTAL_ACCOUNT_TIMEOUT_SECS") {
            self.account.timeout_secs = v.parse().unwrap_or(self.account.timeout_secs);
        }
        if let Ok(v) = env::var("PORTAL_SESSION_COOKIE") {
            self.account.session_cookie = v;
        }

        // Toggle tree overrides
        if let Ok(v) = env::var("PORTAL_TOGGLES_PATH") {
            self.toggles.override_path = Some(v);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                enable_cors: true,
                cors_origins: vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                ],
                enable_request_logging: true,
            },
            account: AccountServiceConfig {
                base_url: "http://localhost:4500".to_string(),
                timeout_secs: 5,
                session_cookie: "nimbus_session".to_string(),
                allow_session_fixture: true,
            },
            toggles: TogglesConfig { override_path: None },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                enable_cors: true,
                cors_origins: vec!["https://staging.nimbus.example".to_string()],
                enable_request_logging: true,
            },
            account: AccountServiceConfig {
                base_url: "https://accounts.staging.nimbus.example".to_string(),
                timeout_secs: 5,
                session_cookie: "nimbus_session".to_string(),
                allow_session_fixture: false,
            },
            toggles: TogglesConfig { override_path: None },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                enable_cors: true,
                cors_origins: vec!["https://app.nimbus.example".to_string()],
                enable_request_logging: false,
            },
            account: AccountServiceConfig {
                base_url: "https://accounts.nimbus.example".to_string(),
                timeout_secs: 3,
                session_cookie: "nimbus_session".to_string(),
                allow_session_fixture: false,
            },
            toggles: TogglesConfig { override_path: None },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert!(config.server.enable_cors);
        assert!(config.account.allow_session_fixture);
        assert_eq!(config.account.session_cookie, "nimbus_session");
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(!config.account.allow_session_fixture);
        assert!(!config.server.enable_request_logging);
        assert_eq!(config.account.timeout_secs, 3);
    }
}

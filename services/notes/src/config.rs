//! Service configuration

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Runtime settings for the notes service
///
/// Defaults are overridden by `NOTES_*` environment variables, e.g.
/// `NOTES_PORT=8080` or `NOTES_SECURE_COOKIES=true`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Lifetime of a session in Redis, in seconds
    pub session_ttl_seconds: u64,
    /// Mark the session cookie `Secure`
    pub secure_cookies: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000_i64)?
            .set_default("session_ttl_seconds", 2_592_000_i64)? // 30 days
            .set_default("secure_cookies", false)?
            .add_source(Environment::with_prefix("NOTES").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            session_ttl_seconds: 2_592_000,
            secure_cookies: false,
        }
    }
}

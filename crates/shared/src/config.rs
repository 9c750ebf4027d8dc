//! Application configuration management.

use std::collections::HashMap;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Access-policy table overrides.
    #[serde(default)]
    pub access: AccessConfig,
    /// Session and lockout policy settings.
    #[serde(default)]
    pub session: SessionConfig,
}

/// Access-policy configuration.
///
/// Both maps extend or override the compiled-in policy tables. Keys are
/// feature/operation names, values are lists of capability token strings.
/// Unknown token strings are rejected at engine construction, not here:
/// config is operator input and must fail loudly rather than fail closed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessConfig {
    /// Feature name → required capability tokens (any-of).
    #[serde(default)]
    pub features: HashMap<String, Vec<String>>,
    /// Operation name → required capability tokens (all-of).
    #[serde(default)]
    pub operations: HashMap<String, Vec<String>>,
}

/// Session and login-lockout policy configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Seconds of inactivity before a session expires.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    /// Maximum session lifetime in seconds regardless of activity.
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    /// Consecutive failed logins before lockout.
    #[serde(default = "default_max_attempts")]
    pub max_login_attempts: u32,
    /// Lockout duration in seconds after too many failed logins.
    #[serde(default = "default_lockout")]
    pub lockout_secs: u64,
}

fn default_idle_timeout() -> u64 {
    900 // 15 minutes
}

fn default_max_lifetime() -> u64 {
    43_200 // 12 hours
}

fn default_max_attempts() -> u32 {
    5
}

fn default_lockout() -> u64 {
    900 // 15 minutes
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            max_login_attempts: default_max_attempts(),
            lockout_secs: default_lockout(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("MERIDIAN").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

//! Admin panel configuration
//!
//! Environment-derived settings with usable defaults. The database name
//! is configuration rather than a hard-coded string so that staging and
//! legacy deployments can point the panel at the right database without
//! a code change.

use std::time::Duration;

use admin_security_rs::rate_limit::{DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW_SECS};

/// Configuration for the admin operations layer
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Name of the database holding the admin collections
    pub database: String,
    /// Operations admitted per rate-limit window
    pub max_requests: usize,
    /// Rate-limit window length
    pub window: Duration,
}

impl AdminConfig {
    /// Read configuration from the environment, falling back to defaults.
    ///
    /// Recognized variables: `SALESBUDDY_ADMIN_DB`,
    /// `SALESBUDDY_ADMIN_MAX_REQUESTS`, `SALESBUDDY_ADMIN_WINDOW_SECS`.
    /// Malformed numeric values fall back with a logged warning rather
    /// than failing startup.
    pub fn from_env() -> Self {
        let database = std::env::var("SALESBUDDY_ADMIN_DB")
            .unwrap_or_else(|_| "salesbuddy".to_string());

        let max_requests = read_env_number("SALESBUDDY_ADMIN_MAX_REQUESTS", DEFAULT_MAX_REQUESTS);
        let window_secs = read_env_number("SALESBUDDY_ADMIN_WINDOW_SECS", DEFAULT_WINDOW_SECS);

        Self {
            database,
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            database: "salesbuddy".to_string(),
            max_requests: DEFAULT_MAX_REQUESTS,
            window: Duration::from_secs(DEFAULT_WINDOW_SECS),
        }
    }
}

fn read_env_number<T: std::str::FromStr + Copy>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                log::warn!("invalid value for {}: {:?}; using default", name, raw);
                default
            }
        },
        Err(_) => default,
    }
}

//! Process configuration.
//!
//! Read once at startup from environment variables (after `.env` files have
//! been loaded by `main`). Every value except the ranking endpoint has a
//! default.
//!
//! | Variable               | Default                  |
//! |------------------------|--------------------------|
//! | `FLAKE_ENDPOINT`       | required                 |
//! | `CHAT_API_URL`         | `http://localhost:8090`  |
//! | `BOT_TOKEN`            | unset                    |
//! | `SERVER_HOST`          | `0.0.0.0`                |
//! | `SERVER_PORT`/`PORT`   | `3000`                   |
//! | `SESSION_TIMEOUT_SECS` | `600`                    |
//! | `SESSION_SWEEP_SECS`   | `30`                     |
//! | `HTTP_TIMEOUT_SECS`    | `30`                     |

use std::time::Duration;

use crate::infrastructure::chat_rest::DEFAULT_CHAT_API_URL;
use crate::session::DEFAULT_SESSION_TIMEOUT;

const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(30);
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),
    #[error("Invalid value for {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// Ranking API endpoint, without query parameters.
    pub flake_endpoint: String,
    pub chat_api_url: String,
    pub bot_token: Option<String>,
    pub server_host: String,
    pub server_port: u16,
    /// Idle time after which a paged message stops responding.
    pub session_timeout: Duration,
    /// How often expired sessions are swept.
    pub sweep_interval: Duration,
    /// Timeout for outbound HTTP requests.
    pub http_timeout: Duration,
}

impl AppSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let flake_endpoint = get("FLAKE_ENDPOINT").ok_or(SettingsError::Missing("FLAKE_ENDPOINT"))?;

        let server_port = match get("SERVER_PORT").or_else(|| get("PORT")) {
            Some(raw) => raw.parse().map_err(|_| SettingsError::Invalid {
                name: "SERVER_PORT",
                value: raw,
            })?,
            None => 3000,
        };

        Ok(Self {
            flake_endpoint,
            chat_api_url: get("CHAT_API_URL").unwrap_or_else(|| DEFAULT_CHAT_API_URL.to_string()),
            bot_token: get("BOT_TOKEN"),
            server_host: get("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port,
            session_timeout: seconds(get("SESSION_TIMEOUT_SECS"), "SESSION_TIMEOUT_SECS")?
                .unwrap_or(DEFAULT_SESSION_TIMEOUT),
            sweep_interval: seconds(get("SESSION_SWEEP_SECS"), "SESSION_SWEEP_SECS")?
                .unwrap_or(DEFAULT_SWEEP_INTERVAL),
            http_timeout: seconds(get("HTTP_TIMEOUT_SECS"), "HTTP_TIMEOUT_SECS")?
                .unwrap_or(DEFAULT_HTTP_TIMEOUT),
        })
    }
}

/// Parse a positive number of seconds.
fn seconds(raw: Option<String>, name: &'static str) -> Result<Option<Duration>, SettingsError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Some(Duration::from_secs(secs))),
        _ => Err(SettingsError::Invalid { name, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<AppSettings, SettingsError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppSettings::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn endpoint_is_required() {
        assert!(matches!(
            settings(&[]),
            Err(SettingsError::Missing("FLAKE_ENDPOINT"))
        ));
    }

    #[test]
    fn defaults_apply() {
        let s = settings(&[("FLAKE_ENDPOINT", "https://rank.example/api")]).expect("valid");
        assert_eq!(s.server_port, 3000);
        assert_eq!(s.session_timeout, Duration::from_secs(600));
        assert_eq!(s.chat_api_url, DEFAULT_CHAT_API_URL);
        assert!(s.bot_token.is_none());
    }

    #[test]
    fn overrides_are_parsed() {
        let s = settings(&[
            ("FLAKE_ENDPOINT", "https://rank.example/api"),
            ("PORT", "8081"),
            ("SESSION_TIMEOUT_SECS", "90"),
            ("BOT_TOKEN", "  "),
        ])
        .expect("valid");
        assert_eq!(s.server_port, 8081);
        assert_eq!(s.session_timeout, Duration::from_secs(90));
        assert!(s.bot_token.is_none());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = settings(&[
            ("FLAKE_ENDPOINT", "https://rank.example/api"),
            ("SESSION_TIMEOUT_SECS", "0"),
        ])
        .expect_err("zero timeout");
        assert!(matches!(
            err,
            SettingsError::Invalid {
                name: "SESSION_TIMEOUT_SECS",
                ..
            }
        ));
    }
}

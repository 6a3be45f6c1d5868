use std::fmt;
use std::time::Duration;

use actix_web::cookie::Key;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { var: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(var) => write!(f, "{var} must be set"),
            ConfigError::Invalid { var, reason } => write!(f, "{var} is invalid: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub summarize_webhook_url: String,
    pub delete_webhook_url: Option<String>,
    pub webhook_timeout: Option<Duration>,
    pub session_key: Option<String>,
    pub cookie_secure: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let summarize_webhook_url =
            get("SUMMARIZE_WEBHOOK_URL").ok_or(ConfigError::Missing("SUMMARIZE_WEBHOOK_URL"))?;
        if !is_http_url(&summarize_webhook_url) {
            return Err(ConfigError::Invalid {
                var: "SUMMARIZE_WEBHOOK_URL",
                reason: "must be an http(s) URL".to_string(),
            });
        }

        let delete_webhook_url = get("DELETE_SUMMARY_WEBHOOK_URL");
        if let Some(url) = &delete_webhook_url {
            if !is_http_url(url) {
                return Err(ConfigError::Invalid {
                    var: "DELETE_SUMMARY_WEBHOOK_URL",
                    reason: "must be an http(s) URL".to_string(),
                });
            }
        }

        let webhook_timeout = match get("WEBHOOK_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::Invalid {
                    var: "WEBHOOK_TIMEOUT_SECS",
                    reason: format!("'{raw}' is not a whole number of seconds"),
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let cookie_secure = match get("COOKIE_SECURE").as_deref() {
            None | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "COOKIE_SECURE",
                    reason: format!("expected true or false, got '{other}'"),
                });
            }
        };

        Ok(Self {
            database_url,
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            summarize_webhook_url,
            delete_webhook_url,
            webhook_timeout,
            session_key: get("SESSION_KEY"),
            cookie_secure,
        })
    }

    /// Cookie signing key. Falls back to a random key, which loses sessions
    /// on restart.
    pub fn session_key(&self) -> Key {
        match &self.session_key {
            Some(val) if val.len() >= 64 => {
                log::info!("Using SESSION_KEY from environment");
                Key::from(val.as_bytes())
            }
            Some(val) => {
                log::warn!("SESSION_KEY too short ({} bytes, need 64+), generating random key", val.len());
                Key::generate()
            }
            None => {
                log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
                Key::generate()
            }
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

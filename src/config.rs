//! Startup configuration read from the environment.
//!
//! Configuration is parsed exactly once, before the listener is bound. Any
//! problem is a [`ConfigError`] and the process refuses to start.

use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;

use axum::http::HeaderValue;
use chrono::TimeDelta;
use secrecy::SecretString;

use crate::auth::authenticator::AuthMode;
use crate::auth::secret_hash::{PasswordSecret, parse_secret_hash};

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_SESSION_TTL_SECS: i64 = 8 * 60 * 60;
pub const DEFAULT_BREVO_URL: &str = "https://api.brevo.com/v3/smtp/email";
pub const DEFAULT_MAIL_FROM: &str = "resume@localhost";
pub const DEFAULT_RESUME_PATH: &str = "resume.pdf";

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Env Variable '{0}' missing")]
    Missing(&'static str),
    #[error("Env Variable '{var}' invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Secrets and policy for the selected auth mode.
#[derive(Clone)]
pub struct AuthConfig {
    pub mode: AuthMode,
    pub session_secret: Option<SecretString>,
    pub password: Option<PasswordSecret>,
    pub session_ttl: TimeDelta,
    pub api_key: Option<SecretString>,
}

#[derive(Clone)]
pub struct MailConfig {
    pub brevo_api_key: Option<SecretString>,
    pub brevo_url: String,
    pub from: String,
}

#[derive(Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub auth: AuthConfig,
    pub cookie_secure: bool,
    pub cors_origin: Option<HeaderValue>,
    pub mail: MailConfig,
    pub resume_path: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Blank values are treated as unset. Secrets are kept byte for byte;
    /// every other value is trimmed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| {
            lookup(var)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let secret = |var: &str| {
            lookup(var)
                .filter(|value| !value.trim().is_empty())
                .map(SecretString::from)
        };

        let bind = get("RESUME_GATE_BIND")
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::Invalid {
                var: "RESUME_GATE_BIND",
                reason: err.to_string(),
            })?;

        let mode = match get("RESUME_GATE_AUTH_MODE") {
            Some(mode) => mode.parse::<AuthMode>()?,
            None => AuthMode::Session,
        };

        let password = match (get("ADMIN_PASSWORD_HASH"), secret("ADMIN_PASSWORD")) {
            (Some(hash), _) => Some(PasswordSecret::Hashed(parse_secret_hash(&hash)?)),
            (None, Some(raw)) => Some(PasswordSecret::Raw(raw)),
            (None, None) => None,
        };

        let ttl_secs = match get("SESSION_TTL_SECS") {
            Some(value) => value
                .parse::<i64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    var: "SESSION_TTL_SECS",
                    reason: format!("expected a positive number of seconds, got '{value}'"),
                })?,
            None => DEFAULT_SESSION_TTL_SECS,
        };
        let session_ttl = TimeDelta::try_seconds(ttl_secs).ok_or_else(|| ConfigError::Invalid {
            var: "SESSION_TTL_SECS",
            reason: String::from("out of range"),
        })?;

        let cookie_secure = match get("COOKIE_SECURE") {
            Some(value) => parse_bool("COOKIE_SECURE", &value)?,
            None => true,
        };

        let cors_origin = get("CORS_ORIGIN")
            .map(|origin| {
                HeaderValue::from_str(&origin).map_err(|err| ConfigError::Invalid {
                    var: "CORS_ORIGIN",
                    reason: err.to_string(),
                })
            })
            .transpose()?;

        Ok(Self {
            bind,
            auth: AuthConfig {
                mode,
                session_secret: secret("SESSION_SECRET"),
                password,
                session_ttl,
                api_key: secret("API_KEY"),
            },
            cookie_secure,
            cors_origin,
            mail: MailConfig {
                brevo_api_key: secret("BREVO_API_KEY"),
                brevo_url: get("BREVO_URL").unwrap_or_else(|| DEFAULT_BREVO_URL.to_string()),
                from: get("MAIL_FROM").unwrap_or_else(|| DEFAULT_MAIL_FROM.to_string()),
            },
            resume_path: PathBuf::from(
                get("RESUME_PATH").unwrap_or_else(|| DEFAULT_RESUME_PATH.to_string()),
            ),
        })
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            reason: format!("expected a boolean, got '{value}'"),
        }),
    }
}

impl Display for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "bind={} mode={} session_ttl={}s resume={} secrets=REDACTED",
            self.bind,
            self.auth.mode,
            self.auth.session_ttl.num_seconds(),
            self.resume_path.display()
        )
    }
}

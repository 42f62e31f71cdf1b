use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::auth::api_key::ApiKeyGate;
use crate::auth::error::AuthError;
use crate::auth::secret_hash::CredentialVerifier;
use crate::auth::session::{IssuedSession, SessionCodec};
use crate::config::{AuthConfig, ConfigError};
use crate::prelude::*;

/// How a deployment admits requests. Exactly one mode is active per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthMode {
    Session,
    ApiKey,
}

impl FromStr for AuthMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "session" => Ok(Self::Session),
            "api-key" | "apikey" | "api_key" => Ok(Self::ApiKey),
            other => Err(ConfigError::Invalid {
                var: "RESUME_GATE_AUTH_MODE",
                reason: format!("unknown mode '{other}', expected 'session' or 'api-key'"),
            }),
        }
    }
}

impl Display for AuthMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Session => write!(f, "session"),
            Self::ApiKey => write!(f, "api-key"),
        }
    }
}

/// Password login backed by signed session tokens.
#[derive(Clone)]
pub struct SessionAuth {
    pub verifier: CredentialVerifier,
    pub codec: SessionCodec,
}

/// Identity attached to an admitted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub mode: AuthMode,
    /// Session expiry in unix millis; `None` for API key requests.
    pub expires_at: Option<i64>,
}

#[derive(Clone)]
pub enum Authenticator {
    Session(SessionAuth),
    ApiKey(ApiKeyGate),
}

impl Authenticator {
    /// Builds the authenticator for the configured mode.
    ///
    /// Fails when a secret the mode depends on is absent, so a deployment can
    /// never come up with a gate that lets everything through or nothing.
    pub fn from_config(config: &AuthConfig) -> std::result::Result<Self, ConfigError> {
        match config.mode {
            AuthMode::Session => {
                let secret = config
                    .session_secret
                    .clone()
                    .ok_or(ConfigError::Missing("SESSION_SECRET"))?;
                if config.password.is_none() {
                    return Err(ConfigError::Missing("ADMIN_PASSWORD_HASH or ADMIN_PASSWORD"));
                }
                Ok(Self::Session(SessionAuth {
                    verifier: CredentialVerifier::new(config.password.clone()),
                    codec: SessionCodec::new(secret, config.session_ttl)?,
                }))
            }
            AuthMode::ApiKey => {
                let gate = ApiKeyGate::new(config.api_key.clone());
                if !gate.is_configured() {
                    return Err(ConfigError::Missing("API_KEY"));
                }
                Ok(Self::ApiKey(gate))
            }
        }
    }

    pub fn mode(&self) -> AuthMode {
        match self {
            Self::Session(_) => AuthMode::Session,
            Self::ApiKey(_) => AuthMode::ApiKey,
        }
    }

    /// Exchanges the admin password for a fresh session token.
    pub fn login(&self, candidate: &str) -> Result<IssuedSession> {
        let Self::Session(session) = self else {
            log::warn!("Login attempted while running in api-key mode");
            return Err(AuthError::ModeMismatch.into());
        };

        session.verifier.authenticate(candidate).map_err(|err| {
            log::warn!("Admin login rejected: {err}");
            Error::Auth(err)
        })?;

        let issued = session.codec.issue()?;
        log::info!("Admin session issued, expires at {}", issued.expires_at);
        Ok(issued)
    }

    /// Admits or rejects a request from the credential it carried.
    ///
    /// `credential` is the session cookie value in session mode and the API
    /// key header value in api-key mode.
    pub fn verify_request(
        &self,
        credential: Option<&str>,
    ) -> std::result::Result<Principal, AuthError> {
        match self {
            Self::Session(session) => {
                let token = credential.ok_or(AuthError::TokenMissing)?;
                let claims = session.codec.decode(token)?;
                Ok(Principal {
                    mode: AuthMode::Session,
                    expires_at: Some(claims.exp),
                })
            }
            Self::ApiKey(gate) => {
                gate.authorize(credential.unwrap_or_default())?;
                Ok(Principal {
                    mode: AuthMode::ApiKey,
                    expires_at: None,
                })
            }
        }
    }

    /// Session lifetime, used for the cookie `Max-Age`.
    pub fn session_ttl_secs(&self) -> Option<i64> {
        match self {
            Self::Session(session) => Some(session.codec.ttl().num_seconds()),
            Self::ApiKey(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use secrecy::SecretString;

    use super::*;
    use crate::auth::secret_hash::PasswordSecret;

    fn secret(value: &str) -> Option<SecretString> {
        Some(SecretString::from(value.to_string()))
    }

    fn session_config() -> AuthConfig {
        AuthConfig {
            mode: AuthMode::Session,
            session_secret: secret("signing-secret"),
            password: Some(PasswordSecret::Raw(SecretString::from("hunter2".to_string()))),
            session_ttl: TimeDelta::hours(8),
            api_key: None,
        }
    }

    fn api_key_config() -> AuthConfig {
        AuthConfig {
            mode: AuthMode::ApiKey,
            session_secret: None,
            password: None,
            session_ttl: TimeDelta::hours(8),
            api_key: secret("k-123"),
        }
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("session".parse::<AuthMode>().unwrap(), AuthMode::Session);
        assert_eq!("API-KEY".parse::<AuthMode>().unwrap(), AuthMode::ApiKey);
        assert!("both".parse::<AuthMode>().is_err());
        assert_eq!(AuthMode::ApiKey.to_string(), "api-key");
    }

    #[test]
    fn test_session_mode_requires_secrets() {
        let mut config = session_config();
        config.session_secret = None;
        assert!(matches!(
            Authenticator::from_config(&config),
            Err(ConfigError::Missing("SESSION_SECRET"))
        ));

        let mut config = session_config();
        config.password = None;
        assert!(Authenticator::from_config(&config).is_err());
    }

    #[test]
    fn test_api_key_mode_requires_key() {
        let mut config = api_key_config();
        config.api_key = secret("");
        assert!(matches!(
            Authenticator::from_config(&config),
            Err(ConfigError::Missing("API_KEY"))
        ));
    }

    #[test]
    fn test_login_then_verify() {
        let auth = Authenticator::from_config(&session_config()).unwrap();
        assert_eq!(auth.mode(), AuthMode::Session);
        assert_eq!(auth.session_ttl_secs(), Some(8 * 60 * 60));

        let issued = auth.login("hunter2").unwrap();
        let principal = auth.verify_request(Some(&issued.token)).unwrap();
        assert_eq!(principal.mode, AuthMode::Session);
        assert_eq!(principal.expires_at, Some(issued.expires_at));
    }

    #[test]
    fn test_login_failures() {
        let auth = Authenticator::from_config(&session_config()).unwrap();
        assert!(matches!(
            auth.login("hunter3"),
            Err(Error::Auth(AuthError::WrongCredentials))
        ));
        assert!(matches!(
            auth.login(""),
            Err(Error::Auth(AuthError::MissingCredentials))
        ));
    }

    #[test]
    fn test_session_verify_failures() {
        let auth = Authenticator::from_config(&session_config()).unwrap();
        assert_eq!(auth.verify_request(None), Err(AuthError::TokenMissing));
        assert_eq!(
            auth.verify_request(Some("garbage")),
            Err(AuthError::MalformedToken)
        );
    }

    #[test]
    fn test_api_key_mode() {
        let auth = Authenticator::from_config(&api_key_config()).unwrap();
        assert_eq!(auth.mode(), AuthMode::ApiKey);
        assert_eq!(auth.session_ttl_secs(), None);

        let principal = auth.verify_request(Some("k-123")).unwrap();
        assert_eq!(principal.mode, AuthMode::ApiKey);
        assert_eq!(principal.expires_at, None);

        assert_eq!(
            auth.verify_request(Some("k-124")),
            Err(AuthError::ApiKeyMismatch)
        );
        assert_eq!(auth.verify_request(None), Err(AuthError::ApiKeyMissing));
        assert!(matches!(
            auth.login("k-123"),
            Err(Error::Auth(AuthError::ModeMismatch))
        ));
    }

    #[test]
    fn test_modes_never_mix() {
        // A session token is not an API key and vice versa.
        let session = Authenticator::from_config(&session_config()).unwrap();
        let token = session.login("hunter2").unwrap().token;

        let api = Authenticator::from_config(&api_key_config()).unwrap();
        assert!(api.verify_request(Some(&token)).is_err());
        assert!(session.verify_request(Some("k-123")).is_err());
    }
}

//! Static API key gate.
//!
//! Used by deployments that skip interactive login altogether and let a
//! caller present one long-lived key per request.

use secrecy::{ExposeSecret, SecretString};

use crate::auth::error::AuthError;
use crate::crypto::digest_eq;

#[derive(Clone)]
pub struct ApiKeyGate {
    key: Option<SecretString>,
}

impl ApiKeyGate {
    /// Builds the gate. An empty key counts as not configured.
    pub fn new(key: Option<SecretString>) -> Self {
        Self {
            key: key.filter(|key| !key.expose_secret().is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.key.is_some()
    }

    pub fn authorize(&self, provided: &str) -> Result<(), AuthError> {
        let Some(expected) = &self.key else {
            return Err(AuthError::NotConfigured);
        };
        if provided.is_empty() {
            return Err(AuthError::ApiKeyMissing);
        }
        if !digest_eq(provided.as_bytes(), expected.expose_secret().as_bytes()) {
            return Err(AuthError::ApiKeyMismatch);
        }
        Ok(())
    }

    pub fn check(&self, provided: &str) -> bool {
        self.authorize(provided).is_ok()
    }
}

impl std::fmt::Debug for ApiKeyGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.key {
            Some(_) => write!(f, "ApiKeyGate([REDACTED])"),
            None => write!(f, "ApiKeyGate(None)"),
        }
    }
}

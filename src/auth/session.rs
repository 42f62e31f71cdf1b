//! Signed, expiring admin session tokens.
//!
//! A token is two URL-safe base64 (unpadded) segments joined by a dot:
//!
//! ```text
//! base64url({"exp":<unix millis>,"kind":"admin"}) "." base64url(HMAC-SHA256(payload segment))
//! ```
//!
//! The signature covers the exact payload segment bytes as they appear in the
//! token. Verification checks the signature first and only decodes the
//! payload once the signature is accepted, so nothing in the payload is
//! trusted or even parsed for a forged token.
//!
//! Tokens are not stored server-side. Logging out only drops the cookie on
//! the client; a copied token keeps working until it expires or the signing
//! secret changes.
//!
//! # Examples
//!
//! ```rust
//! use chrono::TimeDelta;
//! use resume_gate::auth::session::SessionCodec;
//! use secrecy::SecretString;
//!
//! let codec = SessionCodec::new(
//!     SecretString::from("signing-secret".to_string()),
//!     TimeDelta::hours(8),
//! )
//! .unwrap();
//!
//! let issued = codec.issue().unwrap();
//! assert!(codec.verify(&issued.token));
//! assert!(!codec.verify("not.a-token"));
//! ```

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{TimeDelta, Utc};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use super::SESSION_KIND;
use crate::auth::error::AuthError;
use crate::config::ConfigError;
use crate::prelude::*;

type HmacSha256 = Hmac<Sha256>;

const SEPARATOR: char = '.';

/// Claims carried in the payload segment.
///
/// Field order is fixed by the struct, which keeps the serialized form
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Expiry instant in unix milliseconds.
    pub exp: i64,
    pub kind: String,
}

/// A freshly issued token and the instant it stops being accepted.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: i64,
}

/// Issues and verifies session tokens with a process-wide signing key.
#[derive(Clone)]
pub struct SessionCodec {
    mac: HmacSha256,
    ttl: TimeDelta,
}

impl SessionCodec {
    pub fn new(secret: SecretString, ttl: TimeDelta) -> std::result::Result<Self, ConfigError> {
        let key = secret.expose_secret();
        if key.is_empty() {
            return Err(ConfigError::Missing("SESSION_SECRET"));
        }
        if ttl <= TimeDelta::zero() {
            return Err(ConfigError::Invalid {
                var: "SESSION_TTL_SECS",
                reason: String::from("must be positive"),
            });
        }
        let mac = HmacSha256::new_from_slice(key.as_bytes()).map_err(|err| {
            ConfigError::Invalid {
                var: "SESSION_SECRET",
                reason: err.to_string(),
            }
        })?;

        Ok(Self { mac, ttl })
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    pub fn issue(&self) -> Result<IssuedSession> {
        self.issue_at(Utc::now().timestamp_millis())
    }

    /// Issues a token expiring one TTL after `now` (unix millis).
    pub fn issue_at(&self, now: i64) -> Result<IssuedSession> {
        let exp = now
            .checked_add(self.ttl.num_milliseconds())
            .ok_or(Error::AuthTokenCreation)?;
        let claims = SessionClaims {
            exp,
            kind: String::from(SESSION_KIND),
        };

        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?);
        let signature = URL_SAFE_NO_PAD.encode(self.sign(payload.as_bytes()));

        Ok(IssuedSession {
            token: format!("{payload}{SEPARATOR}{signature}"),
            expires_at: exp,
        })
    }

    pub fn verify(&self, token: &str) -> bool {
        self.decode(token).is_ok()
    }

    pub fn decode(&self, token: &str) -> std::result::Result<SessionClaims, AuthError> {
        self.decode_at(token, Utc::now().timestamp_millis())
    }

    /// Verifies `token` as of `now` (unix millis) and returns its claims.
    pub fn decode_at(
        &self,
        token: &str,
        now: i64,
    ) -> std::result::Result<SessionClaims, AuthError> {
        let mut segments = token.split(SEPARATOR);
        let (Some(payload), Some(signature), None) =
            (segments.next(), segments.next(), segments.next())
        else {
            return Err(AuthError::MalformedToken);
        };
        if payload.is_empty() || signature.is_empty() {
            return Err(AuthError::MalformedToken);
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| AuthError::BadSignature)?;
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        // verify_slice compares in constant time and rejects length mismatches
        mac.verify_slice(&signature)
            .map_err(|_| AuthError::BadSignature)?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| AuthError::InvalidPayload)?;
        let claims: SessionClaims =
            serde_json::from_slice(&payload).map_err(|_| AuthError::InvalidPayload)?;

        if claims.kind != SESSION_KIND {
            return Err(AuthError::InvalidPayload);
        }
        if now > claims.exp {
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }

    fn sign(&self, payload: &[u8]) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}

//! Admin password verification using Argon2.
//!
//! The admin password is configured either as an Argon2 PHC string (the
//! recommended form, carrying algorithm, parameters, salt and derived key)
//! or as a raw static secret. [`CredentialVerifier`] checks a login attempt
//! against whichever one is configured and fails closed when neither is.
//!
//! # Examples
//!
//! ```rust
//! use resume_gate::auth::secret_hash::{
//!     CredentialVerifier, PasswordSecret, generate_secret_hash, parse_secret_hash,
//! };
//!
//! let hash = generate_secret_hash("correct horse").unwrap();
//! let verifier = CredentialVerifier::new(Some(PasswordSecret::Hashed(
//!     parse_secret_hash(&hash).unwrap(),
//! )));
//!
//! assert!(verifier.verify("correct horse"));
//! assert!(!verifier.verify("correct horsE"));
//! ```

use argon2::{
    Argon2, PasswordHasher, PasswordVerifier,
    password_hash::{self, PasswordHashString, SaltString},
};
use rand::rngs::OsRng;
use secrecy::{ExposeSecret, SecretString};

use crate::auth::error::AuthError;
use crate::config::ConfigError;
use crate::crypto::constant_time_eq;
use crate::prelude::*;

/// Stored form of the admin password.
#[derive(Clone)]
pub enum PasswordSecret {
    /// Argon2 PHC string, e.g. `$argon2id$v=19$m=19456,t=2,p=1$<salt>$<key>`.
    Hashed(PasswordHashString),
    /// Plain shared secret.
    Raw(SecretString),
}

/// Generates an Argon2id PHC string for `pw` with a random salt.
///
/// This is what operators put in `ADMIN_PASSWORD_HASH`.
pub fn generate_secret_hash(pw: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    Ok(argon2.hash_password(pw.as_bytes(), &salt)?.to_string())
}

/// Parses and validates a configured PHC string.
///
/// The string must name an Argon2 variant and carry both a salt and a
/// derived key.
pub fn parse_secret_hash(hash: &str) -> std::result::Result<PasswordHashString, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        var: "ADMIN_PASSWORD_HASH",
        reason,
    };

    let parsed = PasswordHashString::new(hash.trim()).map_err(|err| invalid(err.to_string()))?;
    {
        let view = parsed.password_hash();
        argon2::Algorithm::try_from(view.algorithm).map_err(|err| invalid(err.to_string()))?;
        if view.salt.is_none() || view.hash.is_none() {
            return Err(invalid(String::from("missing salt or derived key")));
        }
    }
    Ok(parsed)
}

/// Re-derives the key for `pw` with the salt and parameters stored in `hash`
/// and compares it with the stored key in constant time.
pub fn is_secret_valid(pw: &str, hash: &PasswordHashString) -> bool {
    Argon2::default()
        .verify_password(pw.as_bytes(), &hash.password_hash())
        .is_ok()
}

impl From<password_hash::Error> for Error {
    fn from(value: password_hash::Error) -> Self {
        Self::PasswordHash(value)
    }
}

/// Checks a candidate admin password against the configured secret.
#[derive(Clone)]
pub struct CredentialVerifier {
    secret: Option<PasswordSecret>,
}

impl CredentialVerifier {
    pub fn new(secret: Option<PasswordSecret>) -> Self {
        Self { secret }
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// Returns `Ok(())` only if `supplied` matches the configured secret.
    ///
    /// Blank input is rejected before any comparison takes place.
    pub fn authenticate(&self, supplied: &str) -> std::result::Result<(), AuthError> {
        if supplied.trim().is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let matched = match &self.secret {
            Some(PasswordSecret::Hashed(hash)) => is_secret_valid(supplied, hash),
            Some(PasswordSecret::Raw(secret)) => {
                constant_time_eq(supplied.as_bytes(), secret.expose_secret().as_bytes())
            }
            None => return Err(AuthError::NotConfigured),
        };

        if matched {
            Ok(())
        } else {
            Err(AuthError::WrongCredentials)
        }
    }

    pub fn verify(&self, supplied: &str) -> bool {
        self.authenticate(supplied).is_ok()
    }
}

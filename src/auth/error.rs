//! Reasons a request failed authentication.
//!
//! The variants exist for logging and tests. Every one of them is rendered as
//! the same unauthorized response at the HTTP boundary.

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing Credentials")]
    MissingCredentials,
    #[error("Wrong Credentials")]
    WrongCredentials,
    #[error("Token Missing")]
    TokenMissing,
    #[error("Malformed Token")]
    MalformedToken,
    #[error("Bad Token Signature")]
    BadSignature,
    #[error("Invalid Token Payload")]
    InvalidPayload,
    #[error("Token Expired")]
    TokenExpired,
    #[error("Api Key Missing")]
    ApiKeyMissing,
    #[error("Api Key Mismatch")]
    ApiKeyMismatch,
    #[error("No Secret Configured")]
    NotConfigured,
    #[error("Operation not available in this auth mode")]
    ModeMismatch,
}

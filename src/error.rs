//! Main Crate Error

use crate::auth::error::AuthError;
use crate::config::ConfigError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Generic {0}")]
    Generic(String),

    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("PasswordHash {0}")]
    PasswordHash(argon2::password_hash::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Mail provider rejected the message with status {0}")]
    MailRejected(u16),

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Auth Token Creation")]
    AuthTokenCreation,

    #[error("Context Missing")]
    CtxMissing,
}

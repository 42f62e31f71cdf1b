pub mod api_key;
pub mod authenticator;
pub mod error;
pub mod secret_hash;
pub mod session;

/// Payload tag carried by every admin session token.
pub const SESSION_KIND: &str = "admin";

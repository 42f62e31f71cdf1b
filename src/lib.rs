//! Gatekeeper service for delivering a private resume by email.
//!
//! Requests to the mail endpoint are admitted either by a signed admin
//! session cookie or by a static API key, depending on how the deployment
//! is configured.

pub mod auth;
pub mod config;
pub mod crypto;
pub mod error;
pub mod mailer;
pub mod prelude;
pub mod web;

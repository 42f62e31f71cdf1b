use std::sync::Arc;

use crate::auth::authenticator::Authenticator;
use crate::config::ServerConfig;
use crate::mailer::{self, Mailer, ResumeFile};
use crate::prelude::*;

pub mod api;
pub mod auth;
pub mod ctx;
pub mod error;
pub mod mw_auth;

/// Cookie attributes applied to the session cookie.
#[derive(Debug, Clone, Copy)]
pub struct CookiePolicy {
    pub secure: bool,
}

/// Shared state handed to every handler. Built once at startup, read-only
/// afterwards.
#[derive(Clone)]
pub struct ApiState {
    pub authenticator: Arc<Authenticator>,
    pub mailer: Arc<dyn Mailer>,
    pub resume: ResumeFile,
    pub cookie: CookiePolicy,
}

impl ApiState {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let mailer = mailer::from_config(&config.mail)?;
        Self::with_mailer(config, Arc::from(mailer))
    }

    pub fn with_mailer(config: &ServerConfig, mailer: Arc<dyn Mailer>) -> Result<Self> {
        Ok(Self {
            authenticator: Arc::new(Authenticator::from_config(&config.auth)?),
            mailer,
            resume: ResumeFile::new(config.resume_path.clone()),
            cookie: CookiePolicy {
                secure: config.cookie_secure,
            },
        })
    }
}

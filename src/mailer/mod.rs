//! Outbound mail for the resume delivery endpoint.
//!
//! Delivery itself is a collaborator of the gate, not part of it: handlers
//! only see the [`Mailer`] trait. There is no retry or queueing; a failed
//! send is reported to the caller.

use std::path::PathBuf;

use async_trait::async_trait;
use regex::Regex;

use crate::config::MailConfig;
use crate::prelude::*;

pub mod brevo;
pub mod log_mailer;

pub use self::brevo::BrevoMailer;
pub use self::log_mailer::LogMailer;

pub const RESUME_SUBJECT: &str = "Requested resume";
pub const RESUME_BODY: &str = "Hello,\n\nAs requested, the resume is attached.\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outgoing {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub attachment: Option<Attachment>,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: Outgoing) -> Result<()>;
}

/// Picks the Brevo transport when a provider key is configured and falls
/// back to logging deliveries otherwise.
pub fn from_config(config: &MailConfig) -> Result<Box<dyn Mailer>> {
    match &config.brevo_api_key {
        Some(key) => Ok(Box::new(BrevoMailer::new(
            config.brevo_url.clone(),
            key.clone(),
            config.from.clone(),
        )?)),
        None => {
            tracing::warn!("BREVO_API_KEY not set, outgoing mail will only be logged");
            Ok(Box::new(LogMailer::new(config.from.clone())))
        }
    }
}

pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

/// The file handed out by the send endpoint. Read from disk on every send so
/// it can be replaced without a restart.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    path: PathBuf,
}

impl ResumeFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("resume.pdf"))
    }

    pub async fn load(&self) -> Result<Attachment> {
        let content = tokio::fs::read(&self.path).await?;
        Ok(Attachment {
            name: self.name(),
            content,
        })
    }

    /// Builds the message delivering this resume to `to`.
    pub async fn message_for(&self, to: &str) -> Result<Outgoing> {
        if !valid_email(to) {
            return Err(Error::InvalidEmail);
        }
        Ok(Outgoing {
            to: to.to_string(),
            subject: String::from(RESUME_SUBJECT),
            text: String::from(RESUME_BODY),
            attachment: Some(self.load().await?),
        })
    }
}

use async_trait::async_trait;

use super::{Mailer, Outgoing};
use crate::prelude::*;

/// Mailer that records deliveries in the log instead of sending them.
#[derive(Debug, Clone)]
pub struct LogMailer {
    from: String,
}

impl LogMailer {
    pub fn new(from: String) -> Self {
        Self { from }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: Outgoing) -> Result<()> {
        tracing::info!(
            from = %self.from,
            to = %message.to,
            subject = %message.subject,
            attachment = message.attachment.as_ref().map(|a| a.name.as_str()),
            "Mail delivery skipped, no provider configured"
        );
        Ok(())
    }
}

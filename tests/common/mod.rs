#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use resume_gate::mailer::{Mailer, Outgoing};
use resume_gate::prelude::*;

pub mod api_client;
pub mod test_context;

pub const ADMIN_PASSWORD: &str = "correct horse battery staple";
pub const SESSION_SECRET: &str = "integration-signing-secret";
pub const API_KEY: &str = "rg_live_0123456789abcdef";
pub const RESUME_CONTENT: &[u8] = b"%PDF-1.4 integration resume";

/// Mailer that keeps every message in memory.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<Outgoing>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<Outgoing> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: Outgoing) -> Result<()> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

pub type Outbox = Arc<RecordingMailer>;

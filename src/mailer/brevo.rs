//! Brevo transactional email transport.

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use super::{Mailer, Outgoing};
use crate::prelude::*;

const API_KEY_HEADER: &str = "api-key";
const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct BrevoAttachment<'a> {
    name: &'a str,
    content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoEmail<'a> {
    sender: Address<'a>,
    to: Vec<Address<'a>>,
    subject: &'a str,
    text_content: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachment: Vec<BrevoAttachment<'a>>,
}

pub struct BrevoMailer {
    client: Client,
    url: String,
    api_key: SecretString,
    from: String,
}

impl BrevoMailer {
    pub fn new(url: String, api_key: SecretString, from: String) -> Result<Self> {
        let client = Client::builder().user_agent(APP_USER_AGENT).build()?;
        Ok(Self {
            client,
            url,
            api_key,
            from,
        })
    }
}

#[async_trait]
impl Mailer for BrevoMailer {
    async fn send(&self, message: Outgoing) -> Result<()> {
        let body = BrevoEmail {
            sender: Address { email: &self.from },
            to: vec![Address { email: &message.to }],
            subject: &message.subject,
            text_content: &message.text,
            attachment: message
                .attachment
                .iter()
                .map(|a| BrevoAttachment {
                    name: &a.name,
                    content: STANDARD.encode(&a.content),
                })
                .collect(),
        };

        let response = self
            .client
            .post(&self.url)
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Brevo rejected mail to {}: {}", message.to, status);
            return Err(Error::MailRejected(status.as_u16()));
        }

        tracing::info!("Resume sent to {}", message.to);
        Ok(())
    }
}

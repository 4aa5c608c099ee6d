use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::MailSender;
use crate::error::DeliveryError;
use crate::models::EmailMessage;

#[derive(Clone)]
pub struct SendGridMailer {
    client: Client,
    api_key: String,
    api_url: String,
}

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: Vec<Address<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    content_type: &'static str,
    value: &'a str,
}

/// v3 `mail/send` request body
#[derive(Debug, Serialize)]
struct Payload<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: Address<'a>,
    subject: &'a str,
    content: Vec<Content<'a>>,
}

impl<'a> From<&'a EmailMessage> for Payload<'a> {
    fn from(message: &'a EmailMessage) -> Self {
        Self {
            personalizations: vec![Personalization {
                to: vec![Address { email: &message.to }],
            }],
            from: Address {
                email: &message.from,
            },
            subject: &message.subject,
            // text/plain must precede text/html
            content: vec![
                Content {
                    content_type: "text/plain",
                    value: &message.text,
                },
                Content {
                    content_type: "text/html",
                    value: &message.html,
                },
            ],
        }
    }
}

impl SendGridMailer {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_url,
        }
    }
}

#[async_trait]
impl MailSender for SendGridMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), DeliveryError> {
        let res = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&Payload::from(message))
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }

    fn backend(&self) -> &'static str {
        "sendgrid"
    }
}

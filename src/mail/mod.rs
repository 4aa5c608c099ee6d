pub mod log;
pub mod sendgrid;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{Config, ConfigError, MailBackend};
use crate::error::DeliveryError;
use crate::models::EmailMessage;

pub use log::LogMailer;
pub use sendgrid::SendGridMailer;

/// Delivery of a single message to an outbound mail service
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), DeliveryError>;

    /// Short name used in logs and health output
    fn backend(&self) -> &'static str;
}

/// Mailer handle shared across invocations
#[derive(Clone)]
pub struct Mailer {
    inner: Arc<dyn MailSender>,
}

impl Mailer {
    pub fn new(sender: impl MailSender + 'static) -> Self {
        Self {
            inner: Arc::new(sender),
        }
    }

    /// Create the mailer selected by MAIL_BACKEND
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        match config.mail_backend {
            MailBackend::SendGrid => {
                let api_key = config
                    .sendgrid_api_key
                    .clone()
                    .ok_or(ConfigError::MissingApiKey)?;
                Ok(Self::new(SendGridMailer::new(
                    api_key,
                    config.sendgrid_api_url.clone(),
                )))
            }
            MailBackend::Log => Ok(Self::new(LogMailer)),
        }
    }

    pub async fn send(&self, message: &EmailMessage) -> Result<(), DeliveryError> {
        self.inner.send(message).await
    }

    pub fn backend(&self) -> &'static str {
        self.inner.backend()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Records every message and answers with a canned outcome
    #[derive(Default)]
    pub struct RecordingMailer {
        pub sent: Arc<Mutex<Vec<EmailMessage>>>,
        pub reject_with: Option<(u16, String)>,
    }

    impl RecordingMailer {
        pub fn accepting() -> Self {
            Self::default()
        }

        pub fn rejecting(status: u16, body: &str) -> Self {
            Self {
                sent: Arc::default(),
                reject_with: Some((status, body.to_string())),
            }
        }
    }

    #[async_trait]
    impl MailSender for RecordingMailer {
        async fn send(&self, message: &EmailMessage) -> Result<(), DeliveryError> {
            self.sent.lock().unwrap().push(message.clone());
            match &self.reject_with {
                Some((status, body)) => Err(DeliveryError::Rejected {
                    status: *status,
                    body: body.clone(),
                }),
                None => Ok(()),
            }
        }

        fn backend(&self) -> &'static str {
            "recording"
        }
    }
}

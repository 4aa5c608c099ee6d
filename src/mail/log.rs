//! Mailer that only logs; for local runs without a SendGrid key.

use async_trait::async_trait;

use super::MailSender;
use crate::error::DeliveryError;
use crate::models::EmailMessage;

#[derive(Debug, Clone)]
pub struct LogMailer;

#[async_trait]
impl MailSender for LogMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), DeliveryError> {
        tracing::info!(
            to = %message.to,
            from = %message.from,
            subject = %message.subject,
            text = %message.text,
            "Log mailer: skipping delivery"
        );
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "log"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_never_fails() {
        let message = EmailMessage {
            to: String::new(),
            from: "sender@example.com".to_string(),
            subject: "Subject".to_string(),
            text: "text".to_string(),
            html: "<p>html</p>".to_string(),
        };

        let result = tokio_test::block_on(LogMailer.send(&message));
        assert!(result.is_ok());
    }
}

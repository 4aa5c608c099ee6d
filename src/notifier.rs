//! Invitation notifier: one new invitation record in, one email out.
//!
//! No retry, deduplication or validation happens here. A failed send is
//! logged and handed back to the caller unchanged so the triggering platform
//! sees it.

use crate::config::Config;
use crate::error::DeliveryError;
use crate::mail::Mailer;
use crate::models::{EmailMessage, InvitationRecord};

pub const INVITATION_SUBJECT: &str = "Invitación para unirte a un negocio";

/// Sender and subject shared by every invitation email
#[derive(Debug, Clone, PartialEq)]
pub struct NotifierSettings {
    pub from: String,
    pub subject: String,
}

impl NotifierSettings {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            subject: INVITATION_SUBJECT.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.mail_from.clone())
    }
}

#[derive(Clone)]
pub struct InvitationNotifier {
    settings: NotifierSettings,
    mailer: Mailer,
}

impl InvitationNotifier {
    pub fn new(settings: NotifierSettings, mailer: Mailer) -> Self {
        Self { settings, mailer }
    }

    pub fn mailer(&self) -> &Mailer {
        &self.mailer
    }

    /// Render the invitation email. Values are interpolated verbatim.
    pub fn build_message(&self, record: &InvitationRecord) -> EmailMessage {
        let business_id = record.business_id();
        let code = record.code();

        EmailMessage {
            to: record.email().to_string(),
            from: self.settings.from.clone(),
            subject: self.settings.subject.clone(),
            text: format!(
                "Te han invitado a unirte al negocio {}. Tu código de invitación es: {}. Este código expira en 15 minutos.",
                business_id, code
            ),
            html: format!(
                concat!(
                    "<p>Te han invitado a unirte al negocio <b>{}</b>.<br>\n",
                    "             Tu código de invitación es: <b>{}</b>.<br>\n",
                    "             Este código expira en 15 minutos.</p>",
                ),
                business_id, code
            ),
        }
    }

    /// Send the invitation email for a freshly created record, exactly once.
    pub async fn notify(&self, record: &InvitationRecord) -> Result<(), DeliveryError> {
        tracing::info!(
            email = ?record.email,
            code = ?record.code,
            business_id = ?record.business_id,
            "Invitation received"
        );
        tracing::info!(to = %record.email(), "Preparing invitation email");

        let message = self.build_message(record);

        tracing::info!(backend = self.mailer.backend(), "Sending invitation email");
        match self.mailer.send(&message).await {
            Ok(()) => {
                tracing::info!(to = %message.to, "Invitation email sent");
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    to = %message.to,
                    detail = %e.detail(),
                    error = %e,
                    "Invitation email failed"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::mail::testing::RecordingMailer;

    const SENDER: &str = "invites@example.com";

    fn notifier_with(mailer: RecordingMailer) -> InvitationNotifier {
        InvitationNotifier::new(NotifierSettings::new(SENDER), Mailer::new(mailer))
    }

    #[test]
    fn test_message_carries_record_values() {
        let notifier = notifier_with(RecordingMailer::accepting());
        let message = notifier.build_message(&InvitationRecord::new("a@b.com", "123456", "biz_1"));

        assert_eq!(message.to, "a@b.com");
        assert_eq!(message.from, SENDER);
        assert_eq!(message.subject, INVITATION_SUBJECT);
        assert_eq!(
            message.text,
            "Te han invitado a unirte al negocio biz_1. Tu código de invitación es: 123456. Este código expira en 15 minutos."
        );
        assert_eq!(
            message.html,
            "<p>Te han invitado a unirte al negocio <b>biz_1</b>.<br>\n             Tu código de invitación es: <b>123456</b>.<br>\n             Este código expira en 15 minutos.</p>"
        );
    }

    #[test]
    fn test_sender_and_subject_ignore_input() {
        let notifier = notifier_with(RecordingMailer::accepting());
        let records = [
            InvitationRecord::new("a@b.com", "123456", "biz_1"),
            InvitationRecord::new("x@y.org", "<script>", "Café & Co"),
            InvitationRecord::default(),
        ];

        for record in &records {
            let message = notifier.build_message(record);
            assert_eq!(message.from, SENDER);
            assert_eq!(message.subject, INVITATION_SUBJECT);
            assert!(message.text.contains(record.code()));
            assert!(message.html.contains(record.business_id()));
        }
    }

    #[test]
    fn test_missing_email_yields_empty_recipient() {
        let notifier = notifier_with(RecordingMailer::accepting());
        let record = InvitationRecord {
            email: None,
            code: Some("123456".to_string()),
            business_id: Some("biz_1".to_string()),
        };

        let message = notifier.build_message(&record);
        assert_eq!(message.to, "");
        assert!(message.text.contains("123456"));
    }

    #[tokio::test]
    async fn test_notify_sends_once_on_success() {
        let mailer = RecordingMailer::accepting();
        let sent = mailer.sent.clone();
        let notifier = notifier_with(mailer);

        notifier
            .notify(&InvitationRecord::new("a@b.com", "123456", "biz_1"))
            .await
            .expect("Should send");

        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "a@b.com");
    }

    #[tokio::test]
    async fn test_notify_surfaces_rejection() {
        let mailer = RecordingMailer::rejecting(400, "Does not contain a valid address.");
        let sent = mailer.sent.clone();
        let notifier = notifier_with(mailer);

        let err = notifier
            .notify(&InvitationRecord::new("a@b.com", "123456", "biz_1"))
            .await
            .unwrap_err();

        assert!(matches!(err, DeliveryError::Rejected { status: 400, .. }));
        assert_eq!(err.detail(), "Does not contain a valid address.");
        assert_eq!(sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_repeated_invocations_send_twice() {
        let mailer = RecordingMailer::accepting();
        let sent = mailer.sent.clone();
        let notifier = notifier_with(mailer);
        let record = InvitationRecord::new("a@b.com", "123456", "biz_1");

        notifier.notify(&record).await.unwrap();
        notifier.notify(&record).await.unwrap();

        assert_eq!(sent.lock().unwrap().len(), 2);
    }
}

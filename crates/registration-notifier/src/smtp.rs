//! SMTP delivery through lettre.

use crate::config::MailerConfig;
use crate::error::DeliveryError;
use crate::format::{render, RegistrationEmail};
use crate::{Delivery, Notifier};
use async_trait::async_trait;
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use registration_store::Registration;
use tracing::{info, warn};

/// Sends notifications to the configured operator address over STARTTLS.
pub struct SmtpNotifier {
    config: MailerConfig,
}

impl SmtpNotifier {
    pub fn new(config: MailerConfig) -> Self {
        Self { config }
    }

    fn build_message(
        &self,
        sender: &str,
        recipient: &str,
        email: RegistrationEmail,
    ) -> Result<Message, DeliveryError> {
        let from = Mailbox::new(
            Some(self.config.sender_name.clone()),
            sender.parse::<Address>()?,
        );
        let to = Mailbox::new(None, recipient.parse::<Address>()?);

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(email.subject)
            .multipart(MultiPart::alternative_plain_html(
                email.text_body,
                email.html_body,
            ))?;

        Ok(message)
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, registration: &Registration) -> Result<Delivery, DeliveryError> {
        let Some(credentials) = self.config.credentials() else {
            warn!(
                registration_id = registration.id,
                "Email notification skipped: smtp_user, smtp_pass or notify_email not configured"
            );
            return Ok(Delivery::Skipped);
        };

        let email = render(registration, &self.config.sender_name);
        let message = self.build_message(credentials.user, credentials.recipient, email)?;

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
            .port(self.config.smtp_port)
            .credentials(Credentials::new(
                credentials.user.to_string(),
                credentials.password.to_string(),
            ))
            .timeout(Some(self.config.timeout))
            .build();

        mailer.send(message).await?;

        info!(
            registration_id = registration.id,
            "Notification email sent"
        );
        Ok(Delivery::Sent)
    }
}

//! Operator notifications for new registrations.
//!
//! Delivery is best-effort: [`spawn_notification`] runs it on a detached task
//! and only logs failures, so a registration never fails because of email.

mod config;
mod error;
mod format;
mod smtp;

pub use config::{MailerConfig, MailerCredentials};
pub use error::DeliveryError;
pub use format::{badge_color, format_timestamp, render, RegistrationEmail};
pub use smtp::SmtpNotifier;

use async_trait::async_trait;
use registration_store::Registration;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Outcome of a delivery attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// Delivery is not configured
    Skipped,
}

/// Something that tells an operator about a new registration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Make a single delivery attempt.
    async fn notify(&self, registration: &Registration) -> Result<Delivery, DeliveryError>;
}

/// Deliver a notification in the background, logging and discarding errors.
pub fn spawn_notification(notifier: Arc<dyn Notifier>, registration: Registration) -> JoinHandle<()> {
    tokio::spawn(async move {
        match notifier.notify(&registration).await {
            Ok(delivery) => {
                debug!(registration_id = registration.id, ?delivery, "Notification finished");
            }
            Err(e) => {
                error!(
                    registration_id = registration.id,
                    error = %e,
                    "Failed to send notification email"
                );
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use registration_store::PassType;

    fn registration() -> Registration {
        Registration {
            id: 1,
            full_name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            pass_type: PassType::Vip,
            variant: "A".into(),
            created_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_spawn_notification_delivers_once() {
        let mut mock = MockNotifier::new();
        mock.expect_notify()
            .withf(|r| r.id == 1 && r.full_name == "Jane Doe")
            .times(1)
            .returning(|_| Ok(Delivery::Sent));

        spawn_notification(Arc::new(mock), registration())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_spawn_notification_swallows_errors() {
        let mut mock = MockNotifier::new();
        mock.expect_notify().times(1).returning(|_| {
            let bad = "not an address".parse::<lettre::Address>().unwrap_err();
            Err(DeliveryError::InvalidAddress(bad))
        });

        // The task completes normally even though delivery failed
        let result = spawn_notification(Arc::new(mock), registration()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_spawn_notification_with_skipped_delivery() {
        let notifier: Arc<dyn Notifier> = Arc::new(SmtpNotifier::new(MailerConfig::default()));
        assert!(spawn_notification(notifier, registration()).await.is_ok());
    }
}

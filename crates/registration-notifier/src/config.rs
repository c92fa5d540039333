//! Mail delivery configuration.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

/// SMTP settings for operator notifications.
///
/// Delivery is enabled only when `smtp_user`, `smtp_pass` and `notify_email`
/// are all set.
#[derive(Debug, Clone, Deserialize)]
pub struct MailerConfig {
    /// SMTP relay host
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    /// SMTP port (STARTTLS)
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// SMTP login, also used as the sender address
    #[serde(default)]
    pub smtp_user: Option<String>,

    /// SMTP password
    #[serde(default)]
    pub smtp_pass: Option<SecretString>,

    /// Operator address that receives notifications
    #[serde(default)]
    pub notify_email: Option<String>,

    /// Display name of the sender and brand shown in the message
    #[serde(default = "default_sender_name")]
    pub sender_name: String,

    /// SMTP connection timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

/// Borrowed view of a complete set of delivery settings.
#[derive(Debug, Clone, Copy)]
pub struct MailerCredentials<'a> {
    pub user: &'a str,
    pub password: &'a str,
    pub recipient: &'a str,
}

impl MailerConfig {
    /// Credentials and recipient, if every one of them is configured.
    pub fn credentials(&self) -> Option<MailerCredentials<'_>> {
        let user = self.smtp_user.as_deref().filter(|s| !s.is_empty())?;
        let password = self
            .smtp_pass
            .as_ref()
            .map(|s| s.expose_secret().as_str())
            .filter(|s| !s.is_empty())?;
        let recipient = self.notify_email.as_deref().filter(|s| !s.is_empty())?;

        Some(MailerCredentials {
            user,
            password,
            recipient,
        })
    }

    /// Whether notifications will actually be sent.
    pub fn is_enabled(&self) -> bool {
        self.credentials().is_some()
    }
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_user: None,
            smtp_pass: None,
            notify_email: None,
            sender_name: default_sender_name(),
            timeout: default_timeout(),
        }
    }
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".into()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_sender_name() -> String {
    "Ad Makerrrs".into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

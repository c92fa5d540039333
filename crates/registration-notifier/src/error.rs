//! Notification delivery errors.

use thiserror::Error;

/// Failure to deliver a notification. Never surfaced to API clients.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Invalid email address: {0}")]
    InvalidAddress(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

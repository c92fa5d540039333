//! Registration record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Tier of an event pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PassType {
    Silver,
    Gold,
    Vip,
}

impl PassType {
    /// All pass types, in display order.
    pub const ALL: [PassType; 3] = [PassType::Silver, PassType::Gold, PassType::Vip];

    /// Lowercase wire form, as stored and serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            PassType::Silver => "silver",
            PassType::Gold => "gold",
            PassType::Vip => "vip",
        }
    }
}

impl fmt::Display for PassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the known pass types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown pass type: {0}")]
pub struct UnknownPassType(pub String);

impl FromStr for PassType {
    type Err = UnknownPassType;

    /// Case-sensitive: only the lowercase wire form is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "silver" => Ok(PassType::Silver),
            "gold" => Ok(PassType::Gold),
            "vip" => Ok(PassType::Vip),
            other => Err(UnknownPassType(other.to_string())),
        }
    }
}

/// A validated registration that has not been stored yet.
///
/// Only [`crate::RegistrationDraft::validate`] constructs this, so every value
/// handed to a store already satisfies the field constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegistration {
    pub(crate) full_name: String,
    pub(crate) email: String,
    pub(crate) pass_type: PassType,
    pub(crate) variant: String,
}

impl NewRegistration {
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn pass_type(&self) -> PassType {
        self.pass_type
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }
}

/// A stored registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Registration {
    /// Assigned by the store, strictly increasing
    pub id: i64,

    pub full_name: String,

    pub email: String,

    pub pass_type: PassType,

    /// A/B test bucket label
    pub variant: String,

    /// Assigned by the store at creation
    pub created_at: DateTime<Utc>,
}

impl Registration {
    pub(crate) fn from_new(id: i64, new: NewRegistration, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            full_name: new.full_name,
            email: new.email,
            pass_type: new.pass_type,
            variant: new.variant,
            created_at,
        }
    }
}

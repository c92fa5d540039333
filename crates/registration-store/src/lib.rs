//! Registration records for the event signup backend.
//!
//! Submissions are validated into a [`NewRegistration`] and persisted by a
//! [`Store`], which assigns the id and creation time. Records are never
//! updated or deleted.

mod error;
mod memory;
mod postgres;
mod store;
mod types;
mod validation;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgres::{PostgresConfig, PostgresStore};
pub use store::Store;
pub use types::*;
pub use validation::*;

/// Records returned by a list request when no limit is given.
pub const DEFAULT_LIST_LIMIT: u32 = 100;

/// Largest limit a list request may ask for.
pub const MAX_LIST_LIMIT: u32 = 200;

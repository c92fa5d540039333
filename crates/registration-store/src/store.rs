//! Storage backend selection.

use crate::error::StoreError;
use crate::memory::MemoryStore;
use crate::postgres::{PostgresConfig, PostgresStore};
use crate::types::{NewRegistration, Registration};
use tracing::{info, warn};

/// Registration storage, persistent or in-memory.
pub enum Store {
    /// PostgreSQL table
    Postgres(PostgresStore),
    /// In-memory only (no persistence)
    Memory(MemoryStore),
}

impl Store {
    /// Connect to PostgreSQL when a URL is configured, otherwise use memory.
    pub async fn new(postgres: Option<PostgresConfig>) -> Result<Self, StoreError> {
        match postgres {
            Some(config) => {
                let store = PostgresStore::connect(&config).await?;
                info!("Using PostgreSQL registration storage");
                Ok(Store::Postgres(store))
            }
            None => {
                warn!("No database configured, using in-memory storage (data will be lost on restart)");
                Ok(Store::memory())
            }
        }
    }

    /// Force memory store.
    pub fn memory() -> Self {
        Store::Memory(MemoryStore::new())
    }

    /// Persist a validated registration and return the stored record.
    pub async fn create(&self, new: NewRegistration) -> Result<Registration, StoreError> {
        match self {
            Store::Postgres(s) => s.create(new).await,
            Store::Memory(s) => Ok(s.create(new).await),
        }
    }

    /// Most recent registrations first, at most `limit` of them.
    pub async fn list(&self, limit: u32) -> Result<Vec<Registration>, StoreError> {
        match self {
            Store::Postgres(s) => s.list(limit).await,
            Store::Memory(s) => Ok(s.list(limit).await),
        }
    }

    /// Short backend name for logs.
    pub fn backend(&self) -> &'static str {
        match self {
            Store::Postgres(_) => "postgres",
            Store::Memory(_) => "memory",
        }
    }
}

//! In-memory registration store.

use crate::types::{NewRegistration, Registration};
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct Inner {
    /// Kept in insertion order, which is also id and created_at order
    records: Vec<Registration>,
    last_id: i64,
}

/// Registration store kept in process memory. Data is lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a registration, assigning its id and creation time.
    pub async fn create(&self, new: NewRegistration) -> Registration {
        let mut inner = self.inner.write().await;

        inner.last_id += 1;
        let id = inner.last_id;

        // The clock may step backwards; newest-first ordering must not.
        let now = Utc::now();
        let created_at = match inner.records.last() {
            Some(last) if last.created_at > now => last.created_at,
            _ => now,
        };

        let registration = Registration::from_new(id, new, created_at);
        inner.records.push(registration.clone());

        debug!(registration_id = id, "Memory store: registration created");
        registration
    }

    /// Most recent registrations first, at most `limit` of them.
    pub async fn list(&self, limit: u32) -> Vec<Registration> {
        let inner = self.inner.read().await;
        inner
            .records
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PassType;
    use crate::validation::RegistrationDraft;

    fn new_registration(name: &str, pass_type: &str) -> NewRegistration {
        RegistrationDraft {
            full_name: Some(name.into()),
            email: Some("someone@example.com".into()),
            pass_type: Some(pass_type.into()),
            variant: None,
        }
        .validate()
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamp() {
        let store = MemoryStore::new();
        let before = Utc::now();

        let registration = store.create(new_registration("Jane Doe", "gold")).await;

        assert_eq!(registration.id, 1);
        assert_eq!(registration.full_name, "Jane Doe");
        assert_eq!(registration.pass_type, PassType::Gold);
        assert_eq!(registration.variant, "A");
        assert!(registration.created_at >= before);
    }

    #[tokio::test]
    async fn test_ids_strictly_increase() {
        let store = MemoryStore::new();

        let mut previous = 0;
        for i in 0..10 {
            let registration = store
                .create(new_registration(&format!("Person {}", i), "silver"))
                .await;
            assert!(registration.id > previous);
            previous = registration.id;
        }

        assert_eq!(store.list(100).await.len(), 10);
    }

    #[tokio::test]
    async fn test_list_empty() {
        let store = MemoryStore::new();
        assert!(store.list(100).await.is_empty());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let store = MemoryStore::new();
        store.create(new_registration("First", "silver")).await;
        store.create(new_registration("Second", "gold")).await;
        store.create(new_registration("Third", "vip")).await;

        let listed = store.list(100).await;
        let names: Vec<&str> = listed.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, vec!["Third", "Second", "First"]);

        for pair in listed.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[tokio::test]
    async fn test_list_respects_limit() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store
                .create(new_registration(&format!("Person {}", i), "vip"))
                .await;
        }

        let listed = store.list(2).await;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].full_name, "Person 4");
        assert_eq!(listed[1].full_name, "Person 3");

        assert!(store.list(0).await.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_unique_ids() {
        let store = std::sync::Arc::new(MemoryStore::new());

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .create(new_registration(&format!("Person {}", i), "gold"))
                        .await
                        .id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }
}

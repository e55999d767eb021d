//! In-memory record store for tests and offline use.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{RecordStore, StoreError};
use crate::models::{User, UserFields};

/// Record store backed by an in-process map.
///
/// Documents are keyed by id in a `BTreeMap`, so enumeration order is
/// stable within a process but carries no meaning, same as the remote
/// store. `update` writes at the given id whether or not a document exists
/// there, matching the remote store's PUT semantics.
#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<BTreeMap<String, UserFields>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a document at a fixed id, bypassing id assignment. Intended
    /// for test setup.
    pub async fn insert(&self, id: impl Into<String>, fields: UserFields) {
        self.documents.write().await.insert(id.into(), fields);
    }

    /// Number of documents currently stored.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .map(|(id, fields)| User {
                id: id.clone(),
                name: fields.name.clone(),
                email: fields.email.clone(),
            })
            .collect())
    }

    async fn create(&self, fields: &UserFields) -> Result<(), StoreError> {
        let id = Uuid::new_v4().to_string();
        self.documents.write().await.insert(id, fields.clone());
        Ok(())
    }

    async fn update(&self, id: &str, fields: &UserFields) -> Result<(), StoreError> {
        self.documents
            .write()
            .await
            .insert(id.to_string(), fields.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.documents.write().await.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_assigns_id() {
        let store = MemoryStore::new();
        store
            .create(&UserFields::new("Ada", "ada@example.com"))
            .await
            .unwrap();

        let users = store.list_all().await.unwrap();
        assert_eq!(users.len(), 1);
        assert!(!users[0].id.is_empty());
        assert_eq!(users[0].name, "Ada");
    }

    #[tokio::test]
    async fn test_update_replaces_document() {
        let store = MemoryStore::new();
        store
            .insert("k1", UserFields::new("Ada", "ada@example.com"))
            .await;

        store
            .update("k1", &UserFields::new("Grace", "grace@example.com"))
            .await
            .unwrap();

        let users = store.list_all().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, "k1");
        assert_eq!(users[0].name, "Grace");
        assert_eq!(users[0].email, "grace@example.com");
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryStore::new();
        store
            .insert("k1", UserFields::new("Ada", "ada@example.com"))
            .await;

        store.delete("k1").await.unwrap();
        store.delete("k1").await.unwrap();

        assert!(store.is_empty().await);
    }
}

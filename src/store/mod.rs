//! Access to the remote collection of user records.
//!
//! The collection lives in a schemaless JSON document store addressed by a
//! single base URL, one path segment per document. [`RestStore`] talks to
//! the real store over HTTP; [`MemoryStore`] keeps documents in process for
//! tests and offline use. Both implement [`RecordStore`].

mod memory;
mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

use async_trait::async_trait;

use crate::models::{User, UserFields};

/// Errors that can occur during record store operations.
#[derive(Debug)]
pub enum StoreError {
    /// No API URL configured
    NotConfigured,
    /// Transport failure or non-success HTTP status
    Network(String),
    /// Unexpected response body shape
    MalformedResponse(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotConfigured => {
                write!(f, "Store not configured. Add api_url to config.")
            }
            StoreError::Network(e) => write!(f, "Network error: {}", e),
            StoreError::MalformedResponse(e) => write!(f, "Malformed response: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

/// CRUD access to a remote collection of user records.
///
/// Mutating operations do not return the affected record; the store assigns
/// ids on create, so the caller re-reads the collection to observe the
/// result. `delete` is idempotent: removing an id that no longer exists is
/// not an error.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Reads the entire collection. An empty or null collection yields an
    /// empty vec. Order follows the store's map enumeration and carries no
    /// meaning.
    async fn list_all(&self) -> Result<Vec<User>, StoreError>;

    /// Appends a new document; the store assigns its id.
    async fn create(&self, fields: &UserFields) -> Result<(), StoreError>;

    /// Replaces the document at `id` with exactly `fields`. A full replace,
    /// not a merge.
    async fn update(&self, id: &str, fields: &UserFields) -> Result<(), StoreError>;

    /// Removes the document at `id`.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: RecordStore + ?Sized> RecordStore for &S {
    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        (**self).list_all().await
    }

    async fn create(&self, fields: &UserFields) -> Result<(), StoreError> {
        (**self).create(fields).await
    }

    async fn update(&self, id: &str, fields: &UserFields) -> Result<(), StoreError> {
        (**self).update(id, fields).await
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        (**self).delete(id).await
    }
}

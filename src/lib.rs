//! userdash
//!
//! Client-side CRUD synchronizer for a user directory held in a remote
//! JSON document store. The [`dashboard::Dashboard`] controller keeps an
//! in-memory record list, an edit draft, and an optional selection
//! reconciled against the store, re-reading the full collection after
//! every mutation. The [`store`] module provides the HTTP client and an
//! in-memory stand-in; the CLI in [`commands`] is one presentation layer
//! over the controller.

pub mod commands;
pub mod config;
pub mod dashboard;
pub mod models;
pub mod store;

pub use config::{Config, ConfigError};
pub use dashboard::{Dashboard, DraftField, Snapshot};
pub use models::{User, UserFields};
pub use store::{MemoryStore, RecordStore, RestStore, StoreError};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}

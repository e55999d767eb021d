//! HTTP client for a Firebase-style JSON document store.
//!
//! The store exposes one collection at a base URL, with the whole
//! collection at `{base}.json` and individual documents at
//! `{base}/{id}.json`. Reading the collection returns a map of id to
//! document fields, or `null` when the collection is empty.

use async_trait::async_trait;
use serde_json::Value;

use super::{RecordStore, StoreError};
use crate::config::Config;
use crate::models::{User, UserFields};

/// REST client bound to a single collection endpoint.
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
}

impl RestStore {
    /// Creates a store for the collection at `base_url`. A trailing slash
    /// is stripped so path building stays uniform.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Creates a store from config.
    ///
    /// Returns an error if no API URL is configured.
    pub fn from_config(config: &Config) -> Result<Self, StoreError> {
        let url = config
            .api_url
            .value
            .clone()
            .ok_or(StoreError::NotConfigured)?;
        Ok(Self::new(url))
    }

    fn collection_url(&self) -> String {
        format!("{}.json", self.base_url)
    }

    fn document_url(&self, id: &str) -> String {
        format!("{}/{}.json", self.base_url, id)
    }

    fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        if !response.status().is_success() {
            return Err(StoreError::Network(format!(
                "server returned {}",
                response.status()
            )));
        }
        Ok(response)
    }
}

/// Maps a collection response body into records.
///
/// The store returns `null` for an empty collection and an object keyed by
/// document id otherwise. Anything else is a malformed response.
fn parse_collection(body: Value) -> Result<Vec<User>, StoreError> {
    match body {
        Value::Null => Ok(Vec::new()),
        Value::Object(map) => {
            let mut users = Vec::with_capacity(map.len());
            for (id, fields) in map {
                let fields: UserFields = serde_json::from_value(fields).map_err(|e| {
                    StoreError::MalformedResponse(format!("document '{}': {}", id, e))
                })?;
                users.push(User {
                    id,
                    name: fields.name,
                    email: fields.email,
                });
            }
            Ok(users)
        }
        other => Err(StoreError::MalformedResponse(format!(
            "expected object or null, got: {}",
            other
        ))),
    }
}

#[async_trait]
impl RecordStore for RestStore {
    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        let response = self
            .client
            .get(self.collection_url())
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        let response = Self::check_status(response)?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| StoreError::MalformedResponse(e.to_string()))?;

        parse_collection(body)
    }

    async fn create(&self, fields: &UserFields) -> Result<(), StoreError> {
        let response = self
            .client
            .post(self.collection_url())
            .json(fields)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        Self::check_status(response)?;

        // The store reports the assigned id in the response body, but the
        // caller re-reads the collection after every mutation, so it is
        // discarded here.
        Ok(())
    }

    async fn update(&self, id: &str, fields: &UserFields) -> Result<(), StoreError> {
        let response = self
            .client
            .put(self.document_url(id))
            .json(fields)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        Self::check_status(response)?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.document_url(id))
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        Self::check_status(response)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collection_url() {
        let store = RestStore::new("https://example.firebaseio.com/users");
        assert_eq!(
            store.collection_url(),
            "https://example.firebaseio.com/users.json"
        );
    }

    #[test]
    fn test_collection_url_strips_trailing_slash() {
        let store = RestStore::new("https://example.firebaseio.com/users/");
        assert_eq!(
            store.collection_url(),
            "https://example.firebaseio.com/users.json"
        );
    }

    #[test]
    fn test_document_url() {
        let store = RestStore::new("https://example.firebaseio.com/users");
        assert_eq!(
            store.document_url("k1"),
            "https://example.firebaseio.com/users/k1.json"
        );
    }

    #[test]
    fn test_parse_collection_map() {
        let body = json!({
            "k1": { "name": "Ada", "email": "ada@example.com" },
            "k2": { "name": "Grace", "email": "grace@example.com" },
        });

        let users = parse_collection(body).unwrap();
        assert_eq!(users.len(), 2);
        let ada = users.iter().find(|u| u.id == "k1").unwrap();
        assert_eq!(ada.name, "Ada");
        assert_eq!(ada.email, "ada@example.com");
    }

    #[test]
    fn test_parse_collection_null_is_empty() {
        let users = parse_collection(Value::Null).unwrap();
        assert!(users.is_empty());
    }

    #[test]
    fn test_parse_collection_rejects_non_object() {
        let result = parse_collection(json!([1, 2, 3]));
        assert!(matches!(result, Err(StoreError::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_collection_rejects_scalar_document() {
        let result = parse_collection(json!({ "k1": 42 }));
        assert!(matches!(result, Err(StoreError::MalformedResponse(_))));
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// A persisted user record.
///
/// The `id` is assigned by the remote store when the record is created and
/// never changes afterward. `name` and `email` are opaque strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// The mutable fields of a user record.
///
/// This is both the payload of create/update calls and the edit draft the
/// dashboard composes before committing. Missing fields in a store response
/// deserialize as empty strings, matching how the store treats absent keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl UserFields {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Returns true when both fields are non-empty. An incomplete draft is
    /// never submitted to the store.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_complete() {
        assert!(UserFields::new("Ada", "ada@example.com").is_complete());
        assert!(!UserFields::new("", "ada@example.com").is_complete());
        assert!(!UserFields::new("Ada", "").is_complete());
        assert!(!UserFields::default().is_complete());
    }

    #[test]
    fn test_missing_fields_deserialize_as_empty() {
        let fields: UserFields = serde_json::from_str(r#"{"name":"Ada"}"#).unwrap();
        assert_eq!(fields.name, "Ada");
        assert_eq!(fields.email, "");
    }
}

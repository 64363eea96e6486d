//! Data models for Phonebook
//!
//! Defines the core data structures: Contact, its identifier, and the
//! NewContact candidate accepted by the store and returned by contact sources.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque contact identifier
///
/// Freshly generated identifiers are UUID v4 text, but any string read back
/// from storage is accepted as-is so that records round-trip unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
    /// Generate a new unique identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ContactId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ContactId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A stored contact
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    /// Unique identifier
    pub id: ContactId,
    /// Display name, trimmed
    pub name: String,
    /// Phone number, trimmed, format unchecked
    pub number: String,
}

impl Contact {
    /// Create a contact with a fresh ID from already-validated fields
    pub(crate) fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            id: ContactId::generate(),
            name: name.into(),
            number: number.into(),
        }
    }

    /// Create a contact with a specific ID (for loading from storage)
    pub fn with_id(
        id: impl Into<ContactId>,
        name: impl Into<String>,
        number: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            number: number.into(),
        }
    }

    /// Key used for case-insensitive name comparison
    pub fn name_key(&self) -> String {
        name_key(&self.name)
    }
}

/// A contact candidate: what the editor submits and sources return
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub number: String,
}

impl NewContact {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
        }
    }
}

/// Normalize a name for uniqueness checks and filtering
pub(crate) fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = ContactId::generate();
        let b = ContactId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn test_contact_with_id() {
        let contact = Contact::with_id("abc123", "Ann", "555-0100");
        assert_eq!(contact.id.as_str(), "abc123");
        assert_eq!(contact.name, "Ann");
        assert_eq!(contact.number, "555-0100");
    }

    #[test]
    fn test_name_key_ignores_case_and_padding() {
        assert_eq!(name_key("  Ann "), "ann");
        assert_eq!(name_key("ÉMILE"), "émile");
        let contact = Contact::with_id("1", "Bo Diddley", "1");
        assert_eq!(contact.name_key(), "bo diddley");
    }

    #[test]
    fn test_contact_serialization_shape() {
        let contact = Contact::with_id("id-1", "Ann", "1");
        let json = serde_json::to_value(&contact).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "id-1", "name": "Ann", "number": "1"})
        );

        let back: Contact = serde_json::from_value(json).unwrap();
        assert_eq!(back, contact);
    }
}

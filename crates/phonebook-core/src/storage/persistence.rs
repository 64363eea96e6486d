//! Contact list persistence
//!
//! Serializes the full contact list as a JSON array of `{id, name, number}`
//! records under the fixed key [`CONTACTS_KEY`].

use std::collections::HashSet;

use tracing::{debug, warn};

use super::error::{PersistenceError, PersistenceResult};
use super::kv::KeyValueStorage;
use crate::models::Contact;

/// Storage key holding the serialized contact list
pub const CONTACTS_KEY: &str = "contacts";

/// Persistence adapter between the contact store and a key-value medium
pub struct ContactPersistence<S> {
    storage: S,
}

impl<S: KeyValueStorage> ContactPersistence<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Write the full contact list
    pub fn save(&mut self, contacts: &[Contact]) -> PersistenceResult<()> {
        let json = serde_json::to_string(contacts).map_err(PersistenceError::Serialize)?;
        self.storage.set_item(CONTACTS_KEY, &json)?;
        debug!("Saved {} contact(s)", contacts.len());
        Ok(())
    }

    /// Read the contact list
    ///
    /// Returns an empty list if nothing has been stored yet. Returns
    /// `PersistenceError::Parse` if the stored value is not a valid list;
    /// nothing is partially loaded in that case. Records repeating an
    /// earlier id or name (ignoring case) are dropped; the first one wins.
    pub fn load(&self) -> PersistenceResult<Vec<Contact>> {
        let Some(raw) = self.storage.get_item(CONTACTS_KEY)? else {
            debug!("No stored contacts");
            return Ok(Vec::new());
        };

        let contacts: Vec<Contact> = serde_json::from_str(&raw)
            .map_err(|e| PersistenceError::parse(CONTACTS_KEY, e))?;
        let contacts = dedupe(contacts);

        debug!("Loaded {} contact(s)", contacts.len());
        Ok(contacts)
    }
}

/// Drop records whose id or name key was already seen
fn dedupe(contacts: Vec<Contact>) -> Vec<Contact> {
    let mut ids: HashSet<String> = HashSet::new();
    let mut names: HashSet<String> = HashSet::new();

    contacts
        .into_iter()
        .filter(|contact| {
            if ids.contains(contact.id.as_str()) {
                warn!("Skipping stored contact with duplicate id '{}'", contact.id);
                return false;
            }
            if names.contains(&contact.name_key()) {
                warn!(
                    "Skipping stored contact '{}' ({}): name already taken",
                    contact.name, contact.id
                );
                return false;
            }
            ids.insert(contact.id.as_str().to_string());
            names.insert(contact.name_key());
            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};
    use tempfile::TempDir;

    fn sample() -> Vec<Contact> {
        vec![
            Contact::with_id("a1", "Ann", "459-12-56"),
            Contact::with_id("b2", "Bo", "443-89-12"),
            Contact::with_id("c3", "Cy Twombly", "+1 (555) 0100"),
        ]
    }

    #[test]
    fn test_load_absent_key_is_empty() {
        let persistence = ContactPersistence::new(MemoryStorage::new());
        assert!(persistence.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let mut persistence = ContactPersistence::new(MemoryStorage::new());
        let contacts = sample();

        persistence.save(&contacts).unwrap();
        assert_eq!(persistence.load().unwrap(), contacts);
    }

    #[test]
    fn test_round_trip_through_files() {
        let temp_dir = TempDir::new().unwrap();
        let contacts = sample();

        let mut persistence = ContactPersistence::new(FileStorage::new(temp_dir.path()));
        persistence.save(&contacts).unwrap();

        // Fresh adapter over the same directory
        let reopened = ContactPersistence::new(FileStorage::new(temp_dir.path()));
        assert_eq!(reopened.load().unwrap(), contacts);
    }

    #[test]
    fn test_save_writes_json_array_under_contacts_key() {
        let storage = MemoryStorage::new();
        let mut persistence = ContactPersistence::new(storage.clone());
        persistence
            .save(&[Contact::with_id("x", "Ann", "1")])
            .unwrap();

        let raw = storage.get(CONTACTS_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{"id": "x", "name": "Ann", "number": "1"}])
        );
    }

    #[test]
    fn test_load_foreign_ids() {
        // Identifiers written by another producer are kept verbatim
        let storage = MemoryStorage::with_item(
            CONTACTS_KEY,
            r#"[{"id":"V1StGXR8_Z5jdHi6B-myT","name":"Rosie Simpson","number":"459-12-56"}]"#,
        );
        let contacts = ContactPersistence::new(storage).load().unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].id.as_str(), "V1StGXR8_Z5jdHi6B-myT");
    }

    #[test]
    fn test_load_malformed_value() {
        let storage = MemoryStorage::with_item(CONTACTS_KEY, "{not json");
        let err = ContactPersistence::new(storage).load().unwrap_err();

        assert!(matches!(err, PersistenceError::Parse { .. }));
        assert!(err.to_string().starts_with("Can't read from local storage."));
    }

    #[test]
    fn test_load_wrong_shape() {
        let storage = MemoryStorage::with_item(CONTACTS_KEY, r#"{"contacts": []}"#);
        let err = ContactPersistence::new(storage).load().unwrap_err();
        assert!(matches!(err, PersistenceError::Parse { .. }));
    }

    #[test]
    fn test_load_keeps_first_of_duplicate_names() {
        let storage = MemoryStorage::with_item(
            CONTACTS_KEY,
            r#"[{"id":"a","name":"Ann","number":"1"},{"id":"b","name":"ANN","number":"2"},{"id":"c","name":"Bo","number":"3"}]"#,
        );
        let contacts = ContactPersistence::new(storage).load().unwrap();

        assert_eq!(
            contacts,
            vec![
                Contact::with_id("a", "Ann", "1"),
                Contact::with_id("c", "Bo", "3"),
            ]
        );
    }

    #[test]
    fn test_load_keeps_first_of_duplicate_ids() {
        let storage = MemoryStorage::with_item(
            CONTACTS_KEY,
            r#"[{"id":"1","name":"Ann","number":"1"},{"id":"1","name":"Bo","number":"2"},{"id":"2","name":"Cy","number":"3"}]"#,
        );
        let contacts = ContactPersistence::new(storage).load().unwrap();

        let names: Vec<&str> = contacts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Cy"]);
    }
}

//! Contact store
//!
//! The `ContactStore` is the single source of truth for the contact list.
//! It owns the in-memory list (insertion order) and the persistence adapter,
//! and writes the full list back to storage after every committed mutation.
//!
//! ## Usage
//!
//! ```ignore
//! let (mut store, load_error) = ContactStore::open(FileStorage::new(dir));
//!
//! store.add("Ann", "459-12-56")?;
//! let matches = store.filter("an");
//! ```

use tracing::{debug, info, warn};

use crate::error::{ContactError, ContactResult};
use crate::models::{name_key, Contact, ContactId};
use crate::storage::{ContactPersistence, KeyValueStorage, PersistenceError};

/// In-memory contact list backed by a key-value storage
pub struct ContactStore<S> {
    /// Contacts in insertion order
    contacts: Vec<Contact>,
    /// Persistence adapter
    persistence: ContactPersistence<S>,
}

impl<S: KeyValueStorage> ContactStore<S> {
    /// Create an empty store without reading storage
    pub fn empty(storage: S) -> Self {
        Self {
            contacts: Vec::new(),
            persistence: ContactPersistence::new(storage),
        }
    }

    /// Open the store, loading any previously saved contacts
    ///
    /// If the stored value cannot be read, the store starts empty and the
    /// load error is returned alongside it so the caller can report it.
    pub fn open(storage: S) -> (Self, Option<PersistenceError>) {
        let mut store = Self::empty(storage);
        match store.persistence.load() {
            Ok(contacts) => {
                info!("Opened contact store with {} contact(s)", contacts.len());
                store.contacts = contacts;
                (store, None)
            }
            Err(e) => {
                warn!("Failed to load contacts, starting empty: {}", e);
                (store, Some(e))
            }
        }
    }

    // ==================== Mutations ====================

    /// Add a new contact
    ///
    /// Both fields are trimmed. Fails without touching the store if either is
    /// blank or if a contact with the same name (ignoring case) exists.
    pub fn add(&mut self, name: &str, number: &str) -> ContactResult<&Contact> {
        let name = name.trim();
        let number = number.trim();

        if name.is_empty() {
            return Err(ContactError::EmptyName);
        }
        if number.is_empty() {
            return Err(ContactError::EmptyNumber);
        }
        if self.contains_name(name) {
            debug!("Rejected duplicate contact name: {}", name);
            return Err(ContactError::DuplicateName {
                name: name.to_string(),
            });
        }

        self.contacts.push(Contact::new(name, number));
        self.save()?;

        let index = self.contacts.len() - 1;
        Ok(&self.contacts[index])
    }

    /// Remove the contact with the given ID
    ///
    /// Returns whether a contact was removed. An unknown ID leaves the list
    /// unchanged; the list is still written back.
    pub fn remove(&mut self, id: &ContactId) -> ContactResult<bool> {
        let before = self.contacts.len();
        self.contacts.retain(|c| &c.id != id);
        let removed = self.contacts.len() != before;

        self.save()?;
        Ok(removed)
    }

    fn save(&mut self) -> ContactResult<()> {
        self.persistence.save(&self.contacts)?;
        Ok(())
    }

    // ==================== Queries ====================

    /// All contacts in insertion order
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Contacts whose name contains `query`, ignoring case
    ///
    /// A blank query matches every contact. Order is always store order.
    pub fn filter(&self, query: &str) -> Vec<&Contact> {
        let needle = name_key(query);
        if needle.is_empty() {
            return self.contacts.iter().collect();
        }

        self.contacts
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Get a contact by ID
    pub fn get(&self, id: &ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| &c.id == id)
    }

    /// Contacts whose ID starts with `prefix`
    pub fn find_by_id_prefix(&self, prefix: &str) -> Vec<&Contact> {
        self.contacts
            .iter()
            .filter(|c| c.id.as_str().starts_with(prefix))
            .collect()
    }

    /// Whether a contact with this name (ignoring case) exists
    pub fn contains_name(&self, name: &str) -> bool {
        let key = name_key(name);
        self.contacts.iter().any(|c| c.name_key() == key)
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, CONTACTS_KEY};
    use std::collections::HashSet;

    fn store_with(names: &[(&str, &str)]) -> ContactStore<MemoryStorage> {
        let mut store = ContactStore::empty(MemoryStorage::new());
        for (name, number) in names {
            store.add(name, number).unwrap();
        }
        store
    }

    fn names(contacts: &[&Contact]) -> Vec<String> {
        contacts.iter().map(|c| c.name.clone()).collect()
    }

    #[test]
    fn test_add_grows_store_with_distinct_ids() {
        let mut store = ContactStore::empty(MemoryStorage::new());
        let inputs = ["Ann", "Bo", "Cy", "Dee", "Eve"];

        for (i, name) in inputs.iter().enumerate() {
            store.add(name, "555").unwrap();
            assert_eq!(store.len(), i + 1);
        }

        let ids: HashSet<_> = store.contacts().iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids.len(), inputs.len());
    }

    #[test]
    fn test_add_trims_fields() {
        let mut store = ContactStore::empty(MemoryStorage::new());
        let contact = store.add("  Ann  ", " 459-12-56 ").unwrap();
        assert_eq!(contact.name, "Ann");
        assert_eq!(contact.number, "459-12-56");
    }

    #[test]
    fn test_add_case_only_duplicate_is_rejected() {
        let mut store = store_with(&[("Ann", "1")]);
        let before = store.contacts().to_vec();

        let err = store.add("ann", "2").unwrap_err();
        assert!(matches!(err, ContactError::DuplicateName { .. }));
        assert_eq!(err.to_string(), "ann is already in contacts");
        assert_eq!(store.len(), 1);
        assert_eq!(store.contacts(), before.as_slice());
    }

    #[test]
    fn test_add_duplicate_with_padding_is_rejected() {
        let mut store = store_with(&[("Ann", "1")]);
        let err = store.add("  ANN ", "2").unwrap_err();
        assert_eq!(err.to_string(), "ANN is already in contacts");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_blank_fields_are_rejected() {
        let mut store = ContactStore::empty(MemoryStorage::new());
        assert!(matches!(
            store.add("   ", "1"),
            Err(ContactError::EmptyName)
        ));
        assert!(matches!(
            store.add("Ann", "  "),
            Err(ContactError::EmptyNumber)
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_persists() {
        let storage = MemoryStorage::new();
        let mut store = ContactStore::empty(storage.clone());
        store.add("Ann", "1").unwrap();

        let raw = storage.get(CONTACTS_KEY).unwrap();
        assert!(raw.contains("\"Ann\""));
    }

    #[test]
    fn test_remove_present_id() {
        let mut store = store_with(&[("Ann", "1"), ("Bo", "2"), ("Cy", "3")]);
        let id = store.contacts()[1].id.clone();

        assert!(store.remove(&id).unwrap());
        assert_eq!(store.len(), 2);
        assert!(store.get(&id).is_none());
        assert_eq!(names(&store.filter("")), vec!["Ann", "Cy"]);
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let mut store = store_with(&[("Ann", "1"), ("Bo", "2")]);
        let before = store.contacts().to_vec();

        assert!(!store.remove(&ContactId::from("missing")).unwrap());
        assert_eq!(store.contacts(), before.as_slice());
    }

    #[test]
    fn test_remove_persists() {
        let storage = MemoryStorage::new();
        let mut store = ContactStore::empty(storage.clone());
        store.add("Ann", "1").unwrap();
        let id = store.contacts()[0].id.clone();

        store.remove(&id).unwrap();
        assert_eq!(storage.get(CONTACTS_KEY), Some("[]".to_string()));
    }

    #[test]
    fn test_filter_blank_returns_everything_in_order() {
        let store = store_with(&[("Cy", "3"), ("Ann", "1"), ("Bo", "2")]);
        assert_eq!(names(&store.filter("")), vec!["Cy", "Ann", "Bo"]);
        assert_eq!(names(&store.filter("   ")), vec!["Cy", "Ann", "Bo"]);
    }

    #[test]
    fn test_filter_substring_ignores_case_and_keeps_order() {
        let store = store_with(&[
            ("Rosie Simpson", "459-12-56"),
            ("Hermione Kline", "443-89-12"),
            ("Eden Clements", "645-17-79"),
            ("Annie Copeland", "227-91-26"),
        ]);

        assert_eq!(
            names(&store.filter(" IE ")),
            vec!["Rosie Simpson", "Annie Copeland"]
        );
        assert_eq!(
            names(&store.filter("e")),
            vec![
                "Rosie Simpson",
                "Hermione Kline",
                "Eden Clements",
                "Annie Copeland"
            ]
        );
        assert!(store.filter("zz").is_empty());
    }

    #[test]
    fn test_filter_does_not_mutate() {
        let store = store_with(&[("Ann", "1"), ("Bo", "2")]);
        let before = store.contacts().to_vec();
        let _ = store.filter("bo");
        assert_eq!(store.contacts(), before.as_slice());
    }

    #[test]
    fn test_open_loads_saved_contacts() {
        let storage = MemoryStorage::new();
        let saved = {
            let mut store = ContactStore::empty(storage.clone());
            store.add("Ann", "1").unwrap();
            store.add("Bo", "2").unwrap();
            store.contacts().to_vec()
        };

        let (store, err) = ContactStore::open(storage);
        assert!(err.is_none());
        assert_eq!(store.contacts(), saved.as_slice());
    }

    #[test]
    fn test_open_absent_key_is_empty() {
        let (store, err) = ContactStore::open(MemoryStorage::new());
        assert!(err.is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_open_malformed_value_falls_back_to_empty() {
        let storage = MemoryStorage::with_item(CONTACTS_KEY, "[{\"id\": 1");
        let (store, err) = ContactStore::open(storage);

        assert!(matches!(err, Some(PersistenceError::Parse { .. })));
        assert!(store.is_empty());
    }

    #[test]
    fn test_find_by_id_prefix() {
        let mut store = ContactStore::empty(MemoryStorage::new());
        store.add("Ann", "1").unwrap();
        let id = store.contacts()[0].id.clone();

        let found = store.find_by_id_prefix(&id.as_str()[..8]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, id);
        assert!(store.find_by_id_prefix("not-an-id").is_empty());
    }
}

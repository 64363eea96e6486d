//! Application shell
//!
//! `Phonebook` wires user actions to the contact store: it owns the store,
//! the live filter string and the notifier that reports each outcome.
//! Views (terminal UI, command line) hold one `Phonebook` and render from
//! [`Phonebook::visible_contacts`].
//!
//! ## Lifecycle
//!
//! `Phonebook::open` performs the one-time startup read. A load failure is
//! reported through the notifier and the phonebook starts empty. Once
//! `open` returns the phonebook is ready and stays ready.

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::import::{import_batch, ImportSummary};
use crate::models::{Contact, ContactId};
use crate::notify::{messages, Notifier};
use crate::source::ContactSource;
use crate::storage::KeyValueStorage;
use crate::store::ContactStore;

/// Contact list application state
pub struct Phonebook<S, N> {
    store: ContactStore<S>,
    /// Live name filter
    filter: String,
    notifier: N,
}

impl<S: KeyValueStorage, N: Notifier> Phonebook<S, N> {
    /// Load the contact list from `storage`
    pub fn open(storage: S, notifier: N) -> Self {
        let (store, load_error) = ContactStore::open(storage);
        if let Some(e) = load_error {
            notifier.notify_failure(&e.to_string());
        }

        Self {
            store,
            filter: String::new(),
            notifier,
        }
    }

    pub fn store(&self) -> &ContactStore<S> {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    // ==================== Editor ====================

    /// Handle a submitted contact form
    ///
    /// Returns true if the contact was added and the form should be cleared.
    pub fn submit_contact(&mut self, name: &str, number: &str) -> bool {
        match self.store.add(name, number) {
            Ok(contact) => {
                self.notifier
                    .notify_success(&messages::contact_added(&contact.name));
                true
            }
            Err(e) => {
                self.notifier.notify_failure(&e.to_string());
                // A write failure still added the contact
                !e.is_rejection()
            }
        }
    }

    // ==================== List ====================

    /// Handle a delete request
    ///
    /// Success is reported even when no contact had this ID.
    pub fn delete_contact(&mut self, id: &ContactId) {
        match self.store.remove(id) {
            Ok(removed) => {
                if !removed {
                    warn!("Delete requested for unknown contact {}", id);
                }
                self.notifier.notify_success(messages::CONTACT_REMOVED);
            }
            Err(e) => self.notifier.notify_failure(&e.to_string()),
        }
    }

    // ==================== Filter ====================

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    pub fn reset_filter(&mut self) {
        self.filter.clear();
    }

    /// Contacts matching the current filter, in store order
    pub fn visible_contacts(&self) -> Vec<&Contact> {
        self.store.filter(&self.filter)
    }

    // ==================== Randomize ====================

    /// Fetch sample contacts and add each of them
    ///
    /// Each entry is reported through the notifier. A failed fetch adds
    /// nothing and is returned to the caller.
    pub async fn randomize(&mut self, source: &dyn ContactSource) -> Result<ImportSummary> {
        let entries = source
            .fetch_sample_contacts()
            .await
            .context("Failed to fetch sample contacts")?;
        debug!("Fetched {} sample contact(s)", entries.len());

        Ok(import_batch(&mut self.store, entries, &self.notifier))
    }
}

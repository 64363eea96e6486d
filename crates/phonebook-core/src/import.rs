//! Batch import
//!
//! Adds a sequence of candidate contacts one by one. Every entry is
//! reported on its own; a rejected entry never stops the rest of the batch.

use serde::Serialize;
use tracing::info;

use crate::models::NewContact;
use crate::notify::{messages, Notifier};
use crate::storage::KeyValueStorage;
use crate::store::ContactStore;

/// Outcome counts of a batch import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub added: usize,
    pub rejected: usize,
}

/// Add every entry to the store, notifying once per entry
pub fn import_batch<S, N>(
    store: &mut ContactStore<S>,
    entries: impl IntoIterator<Item = NewContact>,
    notifier: &N,
) -> ImportSummary
where
    S: KeyValueStorage,
    N: Notifier + ?Sized,
{
    let mut summary = ImportSummary::default();

    for entry in entries {
        match store.add(&entry.name, &entry.number) {
            Ok(contact) => {
                notifier.notify_success(&messages::contact_added(&contact.name));
                summary.added += 1;
            }
            Err(e) => {
                notifier.notify_failure(&e.to_string());
                if e.is_rejection() {
                    summary.rejected += 1;
                } else {
                    // Kept in memory, only the write failed
                    summary.added += 1;
                }
            }
        }
    }

    info!(
        "Imported batch: {} added, {} rejected",
        summary.added, summary.rejected
    );
    summary
}

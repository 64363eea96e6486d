//! Phonebook Core Library
//!
//! This crate provides the core functionality for Phonebook, a small contact
//! list persisted to a local key-value store.
//!
//! # Quick Start
//!
//! ```text
//! let storage = FileStorage::new(config.storage_dir());
//! let notifier = RecordingNotifier::new();
//! let mut phonebook = Phonebook::open(storage, notifier.clone());
//!
//! phonebook.submit_contact("Ann", "459-12-56");
//! for note in notifier.drain() {
//!     println!("{}", note.message());
//! }
//! phonebook.set_filter("an");
//! let visible = phonebook.visible_contacts();
//! ```
//!
//! # Modules
//!
//! - `app`: Application shell wiring user actions to the store
//! - `store`: The contact list and its invariants
//! - `models`: Contact data structures
//! - `storage`: Key-value media and contact persistence
//! - `source`: Sample contact sources for "randomize"
//! - `import`: Batch import of candidate contacts
//! - `notify`: User notification seam
//! - `config`: Application configuration

pub mod app;
pub mod config;
pub mod error;
pub mod import;
pub mod models;
pub mod notify;
pub mod source;
pub mod storage;
pub mod store;

pub use app::Phonebook;
pub use config::Config;
pub use error::{ContactError, ContactResult};
pub use import::{import_batch, ImportSummary};
pub use models::{Contact, ContactId, NewContact};
pub use notify::{Notification, Notifier, RecordingNotifier};
pub use source::{ContactSource, FixedSource, RandomUserSource};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, PersistenceError};
pub use store::ContactStore;

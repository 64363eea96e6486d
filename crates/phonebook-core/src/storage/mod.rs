//! Storage layer
//!
//! Handles persistence of the contact list to a key-value medium.
//!
//! ## Architecture
//!
//! - **KeyValueStorage**: string keys, string values, synchronous
//! - **ContactPersistence**: JSON encoding of the list under one fixed key
//!
//! The store calls `ContactPersistence::save` after every committed mutation.

pub mod error;
pub mod kv;
pub mod persistence;

pub use error::{PersistenceError, PersistenceResult};
pub use kv::{FileStorage, KeyValueStorage, MemoryStorage};
pub use persistence::{ContactPersistence, CONTACTS_KEY};

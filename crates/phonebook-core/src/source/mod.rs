//! Sample contact sources
//!
//! A `ContactSource` supplies candidate contacts on demand, for the
//! "randomize data" action. The result is fed through the batch importer.

mod random_user;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::NewContact;

pub use random_user::{RandomUserSource, DEFAULT_SOURCE_URL};

/// Supplier of candidate contacts
#[async_trait]
pub trait ContactSource: Send + Sync {
    /// Fetch one batch of candidate contacts
    async fn fetch_sample_contacts(&self) -> Result<Vec<NewContact>>;
}

/// Source returning a fixed list, for offline use and tests
#[derive(Debug, Clone, Default)]
pub struct FixedSource {
    contacts: Vec<NewContact>,
}

impl FixedSource {
    pub fn new(contacts: Vec<NewContact>) -> Self {
        Self { contacts }
    }
}

#[async_trait]
impl ContactSource for FixedSource {
    async fn fetch_sample_contacts(&self) -> Result<Vec<NewContact>> {
        Ok(self.contacts.clone())
    }
}

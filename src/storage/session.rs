//! The record list shared by the commands of one shell session.

use crate::SystemError;
use crate::core::schema::CollectionRecord;

use super::collections::CollectionStore;

/// Owns the store and the most recently loaded record list.
///
/// Index 0 of [`Session::records`] is always the most recent record of the
/// last successful load.
#[derive(Debug, Clone)]
pub struct Session {
    store: CollectionStore,
    records: Vec<CollectionRecord>,
}

impl Session {
    /// Create a session and perform the initial load.
    pub fn open(store: CollectionStore) -> Result<Self, SystemError> {
        let records = store.load_all()?;
        Ok(Session { store, records })
    }

    /// Replace the record list with a fresh load.
    ///
    /// The previous list is kept if loading fails.
    pub fn reload(&mut self) -> Result<&[CollectionRecord], SystemError> {
        self.records = self.store.load_all()?;
        Ok(&self.records)
    }

    pub fn records(&self) -> &[CollectionRecord] {
        &self.records
    }

    pub fn store(&self) -> &CollectionStore {
        &self.store
    }
}

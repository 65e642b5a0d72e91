//! In-memory document store for tests and embedding.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;

use oficina_core::UserId;

use crate::document::{Collection, Document, Record};
use crate::error::StoreError;
use crate::store::DocumentStore;

/// Keeps every document in a single mutex-guarded map.
///
/// Each operation holds the map lock for its whole load-mutate-save, so the
/// per-user serialization guarantee of [`DocumentStore`] holds trivially.
#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: Mutex<HashMap<UserId, Document>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn load(&self, user_id: UserId) -> Result<Document, StoreError> {
        let documents = self.documents.lock().unwrap();
        Ok(documents
            .get(&user_id)
            .cloned()
            .unwrap_or_else(|| Document::empty(user_id, Utc::now())))
    }

    fn save(&self, user_id: UserId, document: &Document) -> Result<(), StoreError> {
        let mut documents = self.documents.lock().unwrap();
        documents.insert(user_id, document.clone());
        Ok(())
    }

    fn replace_collection(
        &self,
        user_id: UserId,
        collection: Collection,
        items: Vec<Record>,
    ) -> Result<usize, StoreError> {
        let mut documents = self.documents.lock().unwrap();
        let document = documents
            .entry(user_id)
            .or_insert_with(|| Document::empty(user_id, Utc::now()));
        let count = items.len();
        *document.collection_mut(collection) = items;
        document.updated_at = Utc::now();
        Ok(count)
    }

    fn append_item(
        &self,
        user_id: UserId,
        collection: Collection,
        item: Record,
    ) -> Result<usize, StoreError> {
        if item.is_empty() {
            return Err(StoreError::Validation(format!(
                "cannot append an empty record to '{collection}'"
            )));
        }

        let mut documents = self.documents.lock().unwrap();
        let document = documents
            .entry(user_id)
            .or_insert_with(|| Document::empty(user_id, Utc::now()));
        document.collection_mut(collection).push(item);
        document.updated_at = Utc::now();
        Ok(document.collection(collection).len())
    }

    fn sync(&self, user_id: UserId, document: &Document) -> Result<(), StoreError> {
        self.save(user_id, document)
    }
}

//! Filesystem-backed document store: one JSON file per user id.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::debug;

use oficina_core::UserId;

use crate::document::{Collection, Document, Record};
use crate::error::StoreError;
use crate::store::DocumentStore;

/// Stores each user's document as `<dir>/<user id>.json`, pretty-printed.
///
/// Writes go through a temp file + rename so a crashed write never leaves a
/// half-written document behind. Mutations take a per-user lock around the
/// whole load-mutate-save sequence; different users never contend.
pub struct FsDocumentStore {
    dir: PathBuf,
    locks: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl FsDocumentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            locks: Mutex::new(HashMap::new()),
        })
    }

    fn path_for(&self, user_id: UserId) -> PathBuf {
        self.dir.join(format!("{user_id}.json"))
    }

    fn user_lock(&self, user_id: UserId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap();
        locks.entry(user_id).or_default().clone()
    }

    fn read_document(&self, user_id: UserId) -> Result<Document, StoreError> {
        match std::fs::read(self.path_for(user_id)) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(user_id = %user_id, "no document on disk, serving empty default");
                Ok(Document::empty(user_id, Utc::now()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write_document(&self, user_id: UserId, document: &Document) -> Result<(), StoreError> {
        let path = self.path_for(user_id);
        let tmp = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(document)?;
        std::fs::write(&tmp, bytes)?;
        std::fs::rename(&tmp, &path)?;
        debug!(user_id = %user_id, path = %path.display(), "document persisted");
        Ok(())
    }
}

impl DocumentStore for FsDocumentStore {
    fn load(&self, user_id: UserId) -> Result<Document, StoreError> {
        self.read_document(user_id)
    }

    fn save(&self, user_id: UserId, document: &Document) -> Result<(), StoreError> {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock().unwrap();
        self.write_document(user_id, document)
    }

    fn replace_collection(
        &self,
        user_id: UserId,
        collection: Collection,
        items: Vec<Record>,
    ) -> Result<usize, StoreError> {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock().unwrap();

        let mut document = self.read_document(user_id)?;
        let count = items.len();
        *document.collection_mut(collection) = items;
        document.updated_at = Utc::now();
        self.write_document(user_id, &document)?;
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

        let lock = self.user_lock(user_id);
        let _guard = lock.lock().unwrap();

        let mut document = self.read_document(user_id)?;
        document.collection_mut(collection).push(item);
        document.updated_at = Utc::now();
        let count = document.collection(collection).len();
        self.write_document(user_id, &document)?;
        Ok(count)
    }

    fn sync(&self, user_id: UserId, document: &Document) -> Result<(), StoreError> {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock().unwrap();
        self.write_document(user_id, document)
    }
}

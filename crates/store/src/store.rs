//! Document store contract.

use std::sync::Arc;

use oficina_core::UserId;

use crate::document::{Collection, Document, Record};
use crate::error::StoreError;

/// Durable, per-user document storage.
///
/// Granularity is always the whole document: every mutation is a
/// load-mutate-save of the full backing record. Implementations must
/// serialize mutations **per user id** so two concurrent mutations of the
/// same document cannot lose an update; operations on different users are
/// independent.
///
/// Reads follow the read-or-default contract: a user with no persisted
/// document loads as [`Document::empty`], never as an error. Errors are
/// reserved for unreadable or unwritable storage.
pub trait DocumentStore: Send + Sync {
    /// Load the user's document, or the empty default if none exists yet.
    fn load(&self, user_id: UserId) -> Result<Document, StoreError>;

    /// Persist the full document, overwriting any prior content.
    fn save(&self, user_id: UserId, document: &Document) -> Result<(), StoreError>;

    /// Overwrite one named collection, returning the new item count.
    fn replace_collection(
        &self,
        user_id: UserId,
        collection: Collection,
        items: Vec<Record>,
    ) -> Result<usize, StoreError>;

    /// Append one record to a named collection, preserving prior order.
    /// Returns the collection's new length. Empty records are rejected.
    fn append_item(
        &self,
        user_id: UserId,
        collection: Collection,
        item: Record,
    ) -> Result<usize, StoreError>;

    /// Unconditional full overwrite with caller-supplied content (no merge).
    ///
    /// Same persistence path as [`save`](Self::save); callers use it to push
    /// a client-reconciled full state rather than a single collection.
    fn sync(&self, user_id: UserId, document: &Document) -> Result<(), StoreError>;
}

impl<S> DocumentStore for Arc<S>
where
    S: DocumentStore + ?Sized,
{
    fn load(&self, user_id: UserId) -> Result<Document, StoreError> {
        (**self).load(user_id)
    }

    fn save(&self, user_id: UserId, document: &Document) -> Result<(), StoreError> {
        (**self).save(user_id, document)
    }

    fn replace_collection(
        &self,
        user_id: UserId,
        collection: Collection,
        items: Vec<Record>,
    ) -> Result<usize, StoreError> {
        (**self).replace_collection(user_id, collection, items)
    }

    fn append_item(
        &self,
        user_id: UserId,
        collection: Collection,
        item: Record,
    ) -> Result<usize, StoreError> {
        (**self).append_item(user_id, collection, item)
    }

    fn sync(&self, user_id: UserId, document: &Document) -> Result<(), StoreError> {
        (**self).sync(user_id, document)
    }
}

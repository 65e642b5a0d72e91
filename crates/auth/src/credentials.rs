//! Durable credential records.
//!
//! All identities live in one backing record set, rewritten in full on
//! every mutation. Email matching is exact and case-sensitive.

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use oficina_core::UserId;
use oficina_store::StoreError;

/// A registered user's credential record.
///
/// `password_hash` is an argon2 PHC string, never the plaintext; it is
/// serialized into the backing store but must not appear in any
/// outward-facing projection (the HTTP layer maps identities to DTOs).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Durable list of registered identities.
pub trait CredentialStore: Send + Sync {
    /// Exact-match scan over all identities.
    fn exists(&self, email: &str) -> Result<bool, StoreError>;

    /// Append one identity and persist the full list.
    fn add(&self, identity: Identity) -> Result<(), StoreError>;

    fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError>;

    fn find_by_id(&self, id: UserId) -> Result<Option<Identity>, StoreError>;
}

/// File-backed credential store: one JSON array, rewritten whole on every
/// mutation. Writers serialize behind an internal mutex; a temp-file +
/// rename keeps a crashed write from truncating the list.
pub struct FsCredentialStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FsCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// A missing file is the empty list; a corrupt file is an error, never
    /// an empty list (that would re-open every email for registration).
    fn load_all(&self) -> Result<Vec<Identity>, StoreError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save_all(&self, identities: &[Identity]) -> Result<(), StoreError> {
        let tmp = self.path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(identities)?;
        std::fs::write(&tmp, bytes)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!(count = identities.len(), path = %self.path.display(), "credentials persisted");
        Ok(())
    }
}

impl CredentialStore for FsCredentialStore {
    fn exists(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.load_all()?.iter().any(|i| i.email == email))
    }

    fn add(&self, identity: Identity) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap();
        let mut identities = self.load_all()?;
        identities.push(identity);
        self.save_all(&identities)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        Ok(self.load_all()?.into_iter().find(|i| i.email == email))
    }

    fn find_by_id(&self, id: UserId) -> Result<Option<Identity>, StoreError> {
        Ok(self.load_all()?.into_iter().find(|i| i.id == id))
    }
}

/// In-memory credential store for tests.
#[derive(Default)]
pub struct MemoryCredentialStore {
    identities: Mutex<Vec<Identity>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn exists(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.identities.lock().unwrap().iter().any(|i| i.email == email))
    }

    fn add(&self, identity: Identity) -> Result<(), StoreError> {
        self.identities.lock().unwrap().push(identity);
        Ok(())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        Ok(self
            .identities
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.email == email)
            .cloned())
    }

    fn find_by_id(&self, id: UserId) -> Result<Option<Identity>, StoreError> {
        Ok(self
            .identities
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == id)
            .cloned())
    }
}

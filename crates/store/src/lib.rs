//! `oficina-store` — the per-user document store.
//!
//! Each registered user owns exactly one document holding three ordered
//! collections of business records (service orders, sales, catalog items).
//! The store exposes whole-document granularity only: every mutation is a
//! load-mutate-save of the full document.

pub mod document;
pub mod error;
pub mod fs;
pub mod memory;
pub mod store;

pub use document::{Collection, Document, Fields, Record};
pub use error::StoreError;
pub use fs::FsDocumentStore;
pub use memory::MemoryDocumentStore;
pub use store::DocumentStore;

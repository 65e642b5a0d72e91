//! `oficina-core` — shared foundation for the backend.
//!
//! This crate contains only cross-cutting primitives (identifiers and the
//! failure taxonomy). Storage and transport concerns live elsewhere.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::UserId;

//! `oficina-auth` — credentials, session tokens and the access gate.
//!
//! Three pieces compose here: the credential store (durable identities),
//! the token service (stateless signed session tokens) and the
//! authentication service tying both to the per-user document store.

pub mod credentials;
pub mod gate;
pub mod service;
pub mod token;

pub use credentials::{CredentialStore, FsCredentialStore, Identity, MemoryCredentialStore};
pub use gate::{AccessGate, Unauthorized};
pub use service::{AuthService, LoginToken, BAD_CREDENTIALS};
pub use token::{Claims, TokenKeys, TokenService, TOKEN_LIFETIME_SECONDS};

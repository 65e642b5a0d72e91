//! Authentication service: registration, login, identity lookup.

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use tracing::{info, warn};

use oficina_core::{DomainError, DomainResult, UserId};
use oficina_store::{Document, DocumentStore};

use crate::credentials::{CredentialStore, Identity};
use crate::token::TokenService;

/// Login failure message — deliberately identical whether the email is
/// unknown or the password is wrong, so callers cannot probe which emails
/// are registered.
pub const BAD_CREDENTIALS: &str = "email ou senha incorretos";

const MIN_PASSWORD_LEN: usize = 6;

/// A successful login: the signed token plus the fields callers echo back.
#[derive(Debug, Clone)]
pub struct LoginToken {
    pub token: String,
    pub user_id: UserId,
    pub email: String,
    pub expires_in_seconds: i64,
}

/// Composes the credential store, the token service and the document store.
///
/// Stores are injected, never reached through ambient globals; tests run the
/// whole service against the in-memory backends.
pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
    tokens: Arc<TokenService>,
    documents: Arc<dyn DocumentStore>,
}

impl AuthService {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        tokens: Arc<TokenService>,
        documents: Arc<dyn DocumentStore>,
    ) -> Self {
        Self {
            credentials,
            tokens,
            documents,
        }
    }

    /// Register a new identity and initialize its empty document.
    ///
    /// The document is persisted *before* the identity: a failure between
    /// the two steps can leave an unreferenced document (inert, since
    /// documents are only reachable through an authenticated identity) but
    /// never an identity without a document.
    pub fn register(&self, email: &str, password: &str) -> DomainResult<Identity> {
        let email = email.trim();
        if email.is_empty() {
            return Err(DomainError::validation("email is required"));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(DomainError::validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        if self.credentials.exists(email)? {
            return Err(DomainError::conflict(format!(
                "email '{email}' is already registered"
            )));
        }

        let id = UserId::new();
        let now = Utc::now();
        let password_hash = hash_password(password)?;

        self.documents.save(id, &Document::empty(id, now))?;

        let identity = Identity {
            id,
            email: email.to_string(),
            password_hash,
            created_at: now,
        };
        self.credentials.add(identity.clone())?;

        info!(user_id = %id, email, "user registered");
        Ok(identity)
    }

    /// Authenticate and issue a session token.
    pub fn login(&self, email: &str, password: &str) -> DomainResult<LoginToken> {
        if email.is_empty() || password.is_empty() {
            return Err(DomainError::validation("email and password are required"));
        }

        let Some(identity) = self.credentials.find_by_email(email)? else {
            warn!(email, "login failed: unknown email");
            return Err(DomainError::authentication(BAD_CREDENTIALS));
        };

        if !verify_password(password, &identity.password_hash) {
            warn!(email, "login failed: password mismatch");
            return Err(DomainError::authentication(BAD_CREDENTIALS));
        }

        let token = self.tokens.issue(identity.id, &identity.email)?;
        info!(user_id = %identity.id, "login succeeded");

        Ok(LoginToken {
            token,
            user_id: identity.id,
            email: identity.email,
            expires_in_seconds: self.tokens.expires_in_seconds(),
        })
    }

    pub fn verify(&self, token: &str) -> bool {
        self.tokens.verify(token)
    }

    pub fn identity_of(&self, token: &str) -> Option<UserId> {
        self.tokens.subject_of(token)
    }

    pub fn email_of(&self, token: &str) -> Option<String> {
        self.tokens.email_of(token)
    }

    pub fn profile(&self, user_id: UserId) -> DomainResult<Identity> {
        self.credentials
            .find_by_id(user_id)?
            .ok_or_else(|| DomainError::not_found(format!("no identity with id {user_id}")))
    }
}

fn hash_password(password: &str) -> DomainResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| DomainError::storage(format!("password hashing failed: {e}")))
}

fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

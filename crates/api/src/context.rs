//! Per-request authenticated context.

use oficina_core::UserId;

/// Identity extracted from a verified bearer token.
///
/// Inserted by the auth middleware; present on every protected route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    user_id: UserId,
    email: String,
}

impl AuthContext {
    pub fn new(user_id: UserId, email: String) -> Self {
        Self { user_id, email }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

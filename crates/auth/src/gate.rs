//! Access gate: bearer header in, identity id out.

use std::sync::Arc;

use thiserror::Error;

use oficina_core::{DomainError, UserId};

use crate::token::{Claims, TokenService};

/// The gate's only failure outcome.
///
/// Missing header, wrong scheme, malformed token, bad signature, expiry —
/// the caller is never told which, so the gate cannot be used as an oracle.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("unauthorized")]
pub struct Unauthorized;

impl From<Unauthorized> for DomainError {
    fn from(_: Unauthorized) -> Self {
        DomainError::Unauthorized
    }
}

/// Translates an `Authorization` header value into an authenticated
/// identity id (the owner of the document being accessed).
pub struct AccessGate {
    tokens: Arc<TokenService>,
}

impl AccessGate {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    /// Verified claims for a `Bearer <token>` header value.
    pub fn claims(&self, header: Option<&str>) -> Result<Claims, Unauthorized> {
        let header = header.ok_or(Unauthorized)?;
        let token = header.strip_prefix("Bearer ").ok_or(Unauthorized)?.trim();
        if token.is_empty() {
            return Err(Unauthorized);
        }
        self.tokens.claims_of(token).ok_or(Unauthorized)
    }

    /// The authenticated identity id, or `Unauthorized`.
    pub fn authorize(&self, header: Option<&str>) -> Result<UserId, Unauthorized> {
        self.claims(header).map(|c| c.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKeys;

    fn gate() -> (AccessGate, Arc<TokenService>) {
        let tokens = Arc::new(TokenService::new(TokenKeys::from_secret(b"test-secret")));
        (AccessGate::new(tokens.clone()), tokens)
    }

    #[test]
    fn valid_bearer_yields_the_subject() {
        let (gate, tokens) = gate();
        let user = UserId::new();
        let token = tokens.issue(user, "alice@example.com").unwrap();

        let header = format!("Bearer {token}");
        assert_eq!(gate.authorize(Some(&header)), Ok(user));
    }

    #[test]
    fn every_rejection_collapses_to_unauthorized() {
        let (gate, tokens) = gate();
        let token = tokens.issue(UserId::new(), "alice@example.com").unwrap();

        // Missing header.
        assert_eq!(gate.authorize(None), Err(Unauthorized));
        // Wrong scheme.
        assert_eq!(gate.authorize(Some(&format!("Basic {token}"))), Err(Unauthorized));
        // Bare token without the scheme.
        assert_eq!(gate.authorize(Some(&token)), Err(Unauthorized));
        // Empty token.
        assert_eq!(gate.authorize(Some("Bearer ")), Err(Unauthorized));
        // Garbage token.
        assert_eq!(gate.authorize(Some("Bearer nonsense")), Err(Unauthorized));
    }

    #[test]
    fn token_signed_elsewhere_is_rejected() {
        let (gate, _) = gate();
        let foreign = TokenService::new(TokenKeys::from_secret(b"other-secret"));
        let token = foreign.issue(UserId::new(), "eve@example.com").unwrap();

        assert_eq!(gate.authorize(Some(&format!("Bearer {token}"))), Err(Unauthorized));
    }
}

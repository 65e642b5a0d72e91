//! Stateless session tokens (HS256).
//!
//! A token is a self-contained signed artifact binding a user id and email
//! to a fixed validity window. There is no server-side session table and no
//! revocation list: validity is re-derived from the token itself on every
//! use, and logout is client-side discard.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use oficina_core::{DomainError, DomainResult, UserId};

/// Fixed token lifetime: 7 days. Not configurable per call.
pub const TOKEN_LIFETIME_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Signed token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's identity id.
    pub sub: UserId,
    pub email: String,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds.
    pub exp: i64,
}

/// Process-wide symmetric signing key material.
///
/// The only way to build a [`TokenService`]; rotating the key means
/// constructing a new `TokenKeys` and rebuilding the service.
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

/// Issues and verifies session tokens. Read-only after construction, safe
/// for unlimited concurrent use.
pub struct TokenService {
    keys: TokenKeys,
    validation: Validation,
}

impl TokenService {
    pub fn new(keys: TokenKeys) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact: the embedded `exp` against wall-clock time,
        // no grace period.
        validation.leeway = 0;
        Self { keys, validation }
    }

    /// Produce a signed token with `iat = now` and `exp = now + 7 days`.
    pub fn issue(&self, user_id: UserId, email: &str) -> DomainResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            email: email.to_owned(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(TOKEN_LIFETIME_SECONDS)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(|e| DomainError::storage(format!("token encoding failed: {e}")))
    }

    /// Decode and validate; `None` covers malformed tokens, bad signatures
    /// and expiry alike.
    pub fn claims_of(&self, token: &str) -> Option<Claims> {
        decode::<Claims>(token, &self.keys.decoding, &self.validation)
            .map(|data| data.claims)
            .ok()
    }

    /// Fails closed: any parse/signature/expiry failure is `false`, never
    /// an error.
    pub fn verify(&self, token: &str) -> bool {
        self.claims_of(token).is_some()
    }

    /// The subject, only if [`verify`](Self::verify) would succeed.
    pub fn subject_of(&self, token: &str) -> Option<UserId> {
        self.claims_of(token).map(|c| c.sub)
    }

    /// The bound email, only if [`verify`](Self::verify) would succeed.
    pub fn email_of(&self, token: &str) -> Option<String> {
        self.claims_of(token).map(|c| c.email)
    }

    pub fn expires_in_seconds(&self) -> i64 {
        TOKEN_LIFETIME_SECONDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret";

    fn service() -> TokenService {
        TokenService::new(TokenKeys::from_secret(SECRET))
    }

    fn mint_with(secret: &[u8], claims: &Claims) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret),
        )
        .unwrap()
    }

    #[test]
    fn issued_token_verifies_and_carries_subject_and_email() {
        let svc = service();
        let user = UserId::new();

        let token = svc.issue(user, "alice@example.com").unwrap();

        assert!(svc.verify(&token));
        assert_eq!(svc.subject_of(&token), Some(user));
        assert_eq!(svc.email_of(&token).as_deref(), Some("alice@example.com"));
    }

    #[test]
    fn expired_token_fails_closed() {
        let svc = service();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: UserId::new(),
            email: "old@example.com".into(),
            iat: now - 120,
            exp: now - 60,
        };
        let token = mint_with(SECRET, &claims);

        assert!(!svc.verify(&token));
        assert_eq!(svc.subject_of(&token), None);
        assert_eq!(svc.email_of(&token), None);
    }

    #[test]
    fn foreign_signature_fails_closed() {
        let svc = service();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: UserId::new(),
            email: "mallory@example.com".into(),
            iat: now,
            exp: now + 3600,
        };
        let token = mint_with(b"some-other-secret", &claims);

        assert!(!svc.verify(&token));
    }

    #[test]
    fn garbage_fails_closed() {
        let svc = service();
        assert!(!svc.verify(""));
        assert!(!svc.verify("not.a.token"));
        assert_eq!(svc.subject_of("definitely not jwt"), None);
    }
}

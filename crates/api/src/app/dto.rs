//! Request/response DTOs and JSON mapping helpers.

use serde::Deserialize;
use serde_json::{Value, json};

use oficina_auth::{Identity, LoginToken};
use oficina_store::Record;

/// Body for both register and login. Fields are optional so missing input
/// maps to a 400, not a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Full-document payload for `/api/data/sync`. Absent collections sync as
/// empty; the authenticated user id and server timestamps are never taken
/// from the client.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncRequest {
    pub orders: Vec<Record>,
    pub sales: Vec<Record>,
    pub catalog_items: Vec<Record>,
}

impl SyncRequest {
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty() && self.sales.is_empty() && self.catalog_items.is_empty()
    }
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

/// Outward projection of an identity: the password verifier never leaves
/// the auth crate.
pub fn identity_to_json(identity: &Identity) -> Value {
    json!({
        "userId": identity.id,
        "email": identity.email,
        "createdAt": identity.created_at,
    })
}

pub fn login_to_json(login: &LoginToken) -> Value {
    json!({
        "token": login.token,
        "userId": login.user_id,
        "email": login.email,
        "expiresInSeconds": login.expires_in_seconds,
    })
}

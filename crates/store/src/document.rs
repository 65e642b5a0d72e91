//! Document model: one JSON document per user, three named collections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use oficina_core::UserId;

use crate::error::StoreError;

/// Ordered mapping backing a single business record.
pub type Fields = serde_json::Map<String, Value>;

/// One business record (a service order, a sale, a catalog item).
///
/// The store does not enforce any schema beyond "a mapping": callers own the
/// field names. Field order is preserved through persistence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Fields);

impl Record {
    pub fn new(fields: Fields) -> Self {
        Self(fields)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

impl From<Fields> for Record {
    fn from(fields: Fields) -> Self {
        Self(fields)
    }
}

/// The three named collections of a user document.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Collection {
    Orders,
    Sales,
    CatalogItems,
}

impl Collection {
    /// Wire name, as used for document JSON keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Orders => "orders",
            Self::Sales => "sales",
            Self::CatalogItems => "catalogItems",
        }
    }

    pub const ALL: [Collection; 3] = [Self::Orders, Self::Sales, Self::CatalogItems];
}

impl core::fmt::Display for Collection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Collection {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "orders" => Ok(Self::Orders),
            "sales" => Ok(Self::Sales),
            "catalog-items" | "catalogItems" => Ok(Self::CatalogItems),
            other => Err(StoreError::Validation(format!(
                "unknown collection '{other}'"
            ))),
        }
    }
}

/// The full per-user document.
///
/// # Invariants
/// - Addressed by `user_id` only (never by email).
/// - A user with no persisted document reads as `Document::empty` — absence
///   is never an error.
/// - Collections keep insertion order across load/save round-trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub user_id: UserId,
    pub orders: Vec<Record>,
    pub sales: Vec<Record>,
    pub catalog_items: Vec<Record>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// The default document: all three collections empty, both timestamps
    /// set to `now`.
    pub fn empty(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            orders: Vec::new(),
            sales: Vec::new(),
            catalog_items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn collection(&self, collection: Collection) -> &[Record] {
        match collection {
            Collection::Orders => &self.orders,
            Collection::Sales => &self.sales,
            Collection::CatalogItems => &self.catalog_items,
        }
    }

    pub fn collection_mut(&mut self, collection: Collection) -> &mut Vec<Record> {
        match collection {
            Collection::Orders => &mut self.orders,
            Collection::Sales => &mut self.sales,
            Collection::CatalogItems => &mut self.catalog_items,
        }
    }
}

use std::fmt;

use chrono::{DateTime, Utc};

use crate::id::ObjectId;

/// Status assigned to every listing at creation.
pub const DEFAULT_STATUS: &str = "FOR_SALE";

/// Ownership password. Stored and compared as a plain integer, never hashed.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Password(i64);

impl Password {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

// Keep the secret out of logs.
impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// A product-for-sale document as held by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub id: ObjectId,
    pub title: String,
    pub content: String,
    pub author: String,
    pub password: Password,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

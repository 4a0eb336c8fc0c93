use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use market_types::{Listing, ObjectId, Password};

/// Fields supplied by a client when creating a listing.
#[derive(Debug, Clone)]
pub struct NewListing {
    pub title: String,
    pub content: String,
    pub author: String,
    pub password: Password,
}

/// Replacement values applied by an update. `author` is fixed at creation.
#[derive(Debug, Clone)]
pub struct ListingUpdate {
    pub title: String,
    pub content: String,
    pub password: Password,
    pub status: String,
}

/// Raw `products` row, before identifiers and timestamps are parsed.
pub struct ListingRow {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub password: i64,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<ListingRow> for Listing {
    type Error = anyhow::Error;

    fn try_from(row: ListingRow) -> Result<Self> {
        let id: ObjectId = row
            .id
            .parse()
            .with_context(|| format!("corrupt product id '{}'", row.id))?;
        Ok(Listing {
            created_at: parse_timestamp(&row.created_at)
                .with_context(|| format!("corrupt created_at on product '{}'", row.id))?,
            updated_at: parse_timestamp(&row.updated_at)
                .with_context(|| format!("corrupt updated_at on product '{}'", row.id))?,
            id,
            title: row.title,
            content: row.content,
            author: row.author,
            password: Password::new(row.password),
            status: row.status,
        })
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
}

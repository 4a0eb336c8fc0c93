use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, Row};

use market_types::{DEFAULT_STATUS, Listing, ObjectId};

use crate::models::{ListingRow, ListingUpdate, NewListing};
use crate::{Database, ListingStore};

const LISTING_COLUMNS: &str =
    "id, title, content, author, password, status, created_at, updated_at";

impl ListingStore for Database {
    fn create(&self, new: NewListing) -> Result<Listing> {
        let now = now_millis();
        let listing = Listing {
            id: ObjectId::new(),
            title: new.title,
            content: new.content,
            author: new.author,
            password: new.password,
            status: DEFAULT_STATUS.to_string(),
            created_at: now,
            updated_at: now,
        };

        self.with_conn_mut(|conn| {
            let stamp = format_timestamp(&now);
            conn.execute(
                "INSERT INTO products (id, title, content, author, password, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
                rusqlite::params![
                    listing.id.to_hex(),
                    &listing.title,
                    &listing.content,
                    &listing.author,
                    listing.password.value(),
                    &listing.status,
                    stamp,
                ],
            )?;
            Ok(())
        })?;

        Ok(listing)
    }

    fn find(&self) -> Result<Vec<Listing>> {
        self.with_conn(query_all)
    }

    fn find_one(&self, id: &ObjectId) -> Result<Option<Listing>> {
        self.with_conn(|conn| query_by_id(conn, id))
    }

    fn update_one(&self, id: &ObjectId, update: ListingUpdate) -> Result<u64> {
        let stamp = format_timestamp(&now_millis());
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "UPDATE products
                 SET title = ?1, content = ?2, password = ?3, status = ?4, updated_at = ?5
                 WHERE id = ?6",
                rusqlite::params![
                    &update.title,
                    &update.content,
                    update.password.value(),
                    &update.status,
                    stamp,
                    id.to_hex(),
                ],
            )?;
            Ok(changed as u64)
        })
    }

    fn delete_one(&self, id: &ObjectId) -> Result<u64> {
        self.with_conn_mut(|conn| {
            let removed = conn.execute("DELETE FROM products WHERE id = ?1", [id.to_hex()])?;
            Ok(removed as u64)
        })
    }
}

fn query_all(conn: &Connection) -> Result<Vec<Listing>> {
    // rowid breaks ties between listings created in the same millisecond
    let mut stmt = conn.prepare(&format!(
        "SELECT {LISTING_COLUMNS} FROM products ORDER BY created_at DESC, rowid DESC"
    ))?;

    let rows = stmt
        .query_map([], map_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    rows.into_iter().map(Listing::try_from).collect()
}

fn query_by_id(conn: &Connection, id: &ObjectId) -> Result<Option<Listing>> {
    let mut stmt = conn.prepare(&format!("SELECT {LISTING_COLUMNS} FROM products WHERE id = ?1"))?;

    let row = stmt.query_row([id.to_hex()], map_row).optional()?;

    row.map(Listing::try_from).transpose()
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<ListingRow> {
    Ok(ListingRow {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        author: row.get(3)?,
        password: row.get(4)?,
        status: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

/// Current time truncated to the millisecond precision the store keeps.
fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

// Fixed-width RFC 3339 so that text ordering matches time ordering.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

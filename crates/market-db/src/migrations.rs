use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 =
        conn.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    if version < 1 {
        info!("Running migration v1 (products collection)");
        conn.execute_batch(
            "
            CREATE TABLE products (
                id          TEXT PRIMARY KEY,
                title       TEXT NOT NULL UNIQUE,
                content     TEXT NOT NULL,
                author      TEXT NOT NULL UNIQUE,
                password    INTEGER NOT NULL,
                status      TEXT NOT NULL DEFAULT 'FOR_SALE',
                created_at  TEXT NOT NULL,
                updated_at  TEXT NOT NULL
            );

            CREATE INDEX idx_products_created
                ON products(created_at);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}

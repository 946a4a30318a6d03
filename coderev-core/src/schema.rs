//! SQLite schema for the durable local store.

/// DDL to create the schema_version tracking table.
///
/// Applied unconditionally on every open (before checking the version),
/// using `IF NOT EXISTS` so it is safe to run multiple times.
pub const SCHEMA_VERSION_DDL: &str = "
    CREATE TABLE IF NOT EXISTS schema_version (
        version INTEGER NOT NULL
    ) STRICT;
";

/// DDL for the full v1 schema: a single key/value table.
///
/// The review history lives in one row of `local_store`, keyed by
/// [`crate::storage::HISTORY_KEY`], holding the JSON-serialized item array.
/// The whole value is rewritten on every history change — no delta writes.
pub const SCHEMA_V1_SQL: &str = "
    CREATE TABLE IF NOT EXISTS local_store (
        key    TEXT PRIMARY KEY,
        value  TEXT NOT NULL
    ) STRICT;
";

/// Runs forward-only schema migration to bring the DB to the latest version.
///
/// Idempotent: safe to call on every open regardless of whether the schema
/// has already been applied.
///
/// # Errors
///
/// Returns `rusqlite::Error` if the DDL fails or the version row cannot be
/// read.
pub fn migrate(db: &mut rusqlite::Connection) -> rusqlite::Result<()> {
    db.execute_batch(SCHEMA_VERSION_DDL)?;

    let version: i64 = db
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |r| r.get(0),
        )
        .unwrap_or(0);

    if version < 1 {
        let tx = db.transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;
        tx.execute_batch(SCHEMA_V1_SQL)?;
        tx.execute("INSERT INTO schema_version (version) VALUES (1)", [])?;
        tx.commit()?;
    }

    Ok(())
}

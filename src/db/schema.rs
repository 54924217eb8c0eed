/// Complete database schema for the note slot storage.
///
/// Uses CREATE TABLE IF NOT EXISTS for idempotent execution.
/// The collection is stored as one serialized value per key.
pub const INITIAL_SCHEMA: &str = r#"
-- Key-value table: one row per persisted slot
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL
);
"#;

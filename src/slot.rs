//! Persistence slots: where the serialized note collection lives.
//!
//! The store only needs to read and write one opaque string. Encoding and
//! decoding stay in the store; a slot just keeps the bytes.

use std::cell::RefCell;
use std::rc::Rc;

use crate::Database;
use crate::error::SlotError;

/// Key under which the note collection is stored.
pub const NOTES_KEY: &str = "notes";

/// A single key-value slot holding the serialized collection.
pub trait PersistenceSlot {
    /// Returns the stored text, or `None` if nothing has been written yet.
    fn read(&self) -> Result<Option<String>, SlotError>;

    /// Replaces the stored text.
    fn write(&mut self, raw: &str) -> Result<(), SlotError>;
}

/// Slot backed by the `kv` table of a SQLite database.
///
/// # Examples
///
/// ```
/// use jot::{Database, PersistenceSlot, SqliteSlot};
///
/// # fn main() -> anyhow::Result<()> {
/// let mut slot = SqliteSlot::new(Database::in_memory()?);
/// assert_eq!(slot.read()?, None);
///
/// slot.write("[]")?;
/// assert_eq!(slot.read()?.as_deref(), Some("[]"));
/// # Ok(())
/// # }
/// ```
pub struct SqliteSlot {
    db: Database,
    key: String,
}

impl SqliteSlot {
    /// Creates a slot stored under the default `notes` key.
    pub fn new(db: Database) -> Self {
        Self::with_key(db, NOTES_KEY)
    }

    /// Creates a slot stored under a custom key.
    pub fn with_key(db: Database, key: impl Into<String>) -> Self {
        Self {
            db,
            key: key.into(),
        }
    }

    /// Returns a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl PersistenceSlot for SqliteSlot {
    fn read(&self) -> Result<Option<String>, SlotError> {
        Ok(self.db.get_value(&self.key)?)
    }

    fn write(&mut self, raw: &str) -> Result<(), SlotError> {
        self.db.set_value(&self.key, raw)?;
        Ok(())
    }
}

/// In-memory slot. Clones share the same storage, so a test can keep a
/// handle and inspect what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    contents: Rc<RefCell<Option<String>>>,
}

impl MemorySlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot pre-filled with raw text.
    pub fn with_contents(raw: impl Into<String>) -> Self {
        Self {
            contents: Rc::new(RefCell::new(Some(raw.into()))),
        }
    }

    /// Returns a copy of the stored text.
    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl PersistenceSlot for MemorySlot {
    fn read(&self) -> Result<Option<String>, SlotError> {
        Ok(self.contents())
    }

    fn write(&mut self, raw: &str) -> Result<(), SlotError> {
        *self.contents.borrow_mut() = Some(raw.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn memory_slot_clones_share_storage() {
        let slot = MemorySlot::new();
        let mut writer = slot.clone();

        writer.write("[]").unwrap();

        assert_eq!(slot.contents().as_deref(), Some("[]"));
    }

    #[test]
    fn sqlite_slot_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.db");

        {
            let mut slot = SqliteSlot::new(Database::open(&path).unwrap());
            slot.write(r#"[{"id":"1"}]"#).unwrap();
        }

        let slot = SqliteSlot::new(Database::open(&path).unwrap());
        assert_eq!(slot.read().unwrap().as_deref(), Some(r#"[{"id":"1"}]"#));
    }

    #[test]
    fn sqlite_slots_with_different_keys_do_not_collide() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.db");

        let mut a = SqliteSlot::with_key(Database::open(&path).unwrap(), "a");
        let b = SqliteSlot::with_key(Database::open(&path).unwrap(), "b");

        a.write("x").unwrap();

        assert_eq!(b.read().unwrap(), None);
    }
}

pub mod boundary;
pub mod config;
pub mod db;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod models;
pub mod projector;
pub mod session;
pub mod slot;
pub mod store;
pub mod utils;

pub use boundary::{
    AssumeNo, AssumeYes, Clock, Confirm, FixedClock, IdGenerator, MonotonicIdGenerator,
    SequentialIdGenerator, StdinConfirm, SystemClock,
};
pub use config::Config;
pub use db::Database;
pub use error::{NoteError, SlotError};
pub use lifecycle::{
    EMPTY_TRASH_PROMPT, EmptyTrashOutcome, PURGE_PROMPT, PurgeOutcome, TRASH_RETENTION_NOTICE,
};
pub use models::{Note, NoteBuilder, NoteDraft, NoteFlag, NoteId, ParseViewError, TagFilter, View};
pub use projector::{ViewCounts, all_tags, count_by_view, project};
pub use session::Session;
pub use slot::{MemorySlot, NOTES_KEY, PersistenceSlot, SqliteSlot};
pub use store::{NoteStore, NoteStoreBuilder};

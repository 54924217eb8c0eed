use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::boundary::{Clock, IdGenerator, MonotonicIdGenerator, SystemClock};
use crate::error::NoteError;
use crate::slot::PersistenceSlot;
use crate::{Note, NoteBuilder, NoteDraft, NoteFlag, NoteId};

/// Owner of the note collection.
///
/// NoteStore holds every note in memory, newest first, and mirrors the whole
/// collection to its persistence slot after each change. It is the only
/// place notes are mutated; everything else gets read-only slices.
///
/// Operations on an id that is not in the collection are no-ops and return
/// `Ok(None)`. No-ops do not write to the slot.
///
/// # Examples
///
/// ```
/// use jot::{MemorySlot, NoteDraft, NoteStore};
///
/// # fn main() -> anyhow::Result<()> {
/// let mut store = NoteStore::load(MemorySlot::new());
///
/// let note = store.add(NoteDraft::new("Buy milk"))?;
/// assert_eq!(store.notes().len(), 1);
/// assert_eq!(store.get(note.id()).map(|n| n.title()), Some("Buy milk"));
/// # Ok(())
/// # }
/// ```
pub struct NoteStore {
    notes: Vec<Note>,
    slot: Box<dyn PersistenceSlot>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
}

/// Builder for a `NoteStore` with custom clock or id generator.
pub struct NoteStoreBuilder {
    slot: Box<dyn PersistenceSlot>,
    clock: Option<Box<dyn Clock>>,
    ids: Option<Box<dyn IdGenerator>>,
}

impl NoteStoreBuilder {
    /// Sets the clock used for `created_at`/`updated_at`.
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Sets the generator used for new note ids.
    pub fn id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Some(Box::new(ids));
        self
    }

    /// Reads the stored collection and returns the store.
    ///
    /// Never fails: an absent, unreadable or malformed slot yields an empty
    /// collection.
    pub fn load(self) -> NoteStore {
        let notes = read_collection(self.slot.as_ref());
        NoteStore {
            notes,
            slot: self.slot,
            clock: self.clock.unwrap_or_else(|| Box::new(SystemClock)),
            ids: self
                .ids
                .unwrap_or_else(|| Box::new(MonotonicIdGenerator::new())),
        }
    }
}

impl NoteStore {
    /// Starts building a store over the given slot.
    pub fn builder(slot: impl PersistenceSlot + 'static) -> NoteStoreBuilder {
        NoteStoreBuilder {
            slot: Box::new(slot),
            clock: None,
            ids: None,
        }
    }

    /// Loads a store over the given slot with the system clock and
    /// timestamp-based ids.
    pub fn load(slot: impl PersistenceSlot + 'static) -> Self {
        Self::builder(slot).load()
    }

    /// Returns every note, newest first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Looks up a note by id.
    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id() == id)
    }

    /// Writes the full collection to the slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be encoded or the slot
    /// write fails.
    pub fn persist(&mut self) -> Result<(), NoteError> {
        write_collection(self.slot.as_mut(), &self.notes)
    }

    /// Writes `next` to the slot and only then makes it the collection.
    ///
    /// On a failed write the in-memory collection is left as it was.
    fn commit(&mut self, next: Vec<Note>) -> Result<(), NoteError> {
        write_collection(self.slot.as_mut(), &next)?;
        self.notes = next;
        Ok(())
    }

    /// Creates a note from a draft and puts it at the front of the
    /// collection.
    ///
    /// # Errors
    ///
    /// Returns `NoteError::EmptyTitle` without touching the collection when
    /// the draft's title is blank, or a persistence error if the write fails.
    pub fn add(&mut self, draft: NoteDraft) -> Result<Note, NoteError> {
        draft.validate()?;

        let id = self.fresh_id();
        let now = self.clock.now();
        let (title, description, tags) = draft.into_parts();

        let note = NoteBuilder::new()
            .id(id)
            .title(title)
            .description(description)
            .tags(tags)
            .created_at(now)
            .updated_at(now)
            .build();

        let mut next = Vec::with_capacity(self.notes.len() + 1);
        next.push(note.clone());
        next.extend(self.notes.iter().cloned());
        self.commit(next)?;

        debug!(id = %note.id(), "added note");
        Ok(note)
    }

    /// Replaces a note's title, description and tags and bumps `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `NoteError::EmptyTitle` for a blank title, checked before the
    /// lookup, or a persistence error if the write fails.
    pub fn update(&mut self, id: &NoteId, draft: NoteDraft) -> Result<Option<Note>, NoteError> {
        draft.validate()?;

        let Some(index) = self.position(id) else {
            debug!(%id, "update skipped, note not found");
            return Ok(None);
        };

        let now = self.clock.now();
        let mut next = self.notes.clone();
        next[index].apply_draft(draft, now);
        let updated = next[index].clone();
        self.commit(next)?;

        debug!(%id, "updated note");
        Ok(Some(updated))
    }

    /// Sets one lifecycle flag. `updated_at` is left alone.
    pub fn set_flag(
        &mut self,
        id: &NoteId,
        flag: NoteFlag,
        value: bool,
    ) -> Result<Option<Note>, NoteError> {
        self.modify_flag(id, flag, |_| value)
    }

    /// Inverts one lifecycle flag. `updated_at` is left alone.
    pub fn toggle_flag(&mut self, id: &NoteId, flag: NoteFlag) -> Result<Option<Note>, NoteError> {
        self.modify_flag(id, flag, |current| !current)
    }

    /// Removes a note for good, returning it if it existed.
    pub fn permanently_delete(&mut self, id: &NoteId) -> Result<Option<Note>, NoteError> {
        let Some(index) = self.position(id) else {
            debug!(%id, "delete skipped, note not found");
            return Ok(None);
        };

        let mut next = self.notes.clone();
        let removed = next.remove(index);
        self.commit(next)?;

        info!(%id, "permanently deleted note");
        Ok(Some(removed))
    }

    /// Removes every note in the trash and returns how many were removed.
    pub fn empty_trash(&mut self) -> Result<usize, NoteError> {
        let next: Vec<Note> = self
            .notes
            .iter()
            .filter(|note| !note.is_deleted())
            .cloned()
            .collect();
        let removed = self.notes.len() - next.len();

        if removed > 0 {
            self.commit(next)?;
            info!(removed, "emptied trash");
        }

        Ok(removed)
    }

    fn modify_flag(
        &mut self,
        id: &NoteId,
        flag: NoteFlag,
        value: impl FnOnce(bool) -> bool,
    ) -> Result<Option<Note>, NoteError> {
        let Some(index) = self.position(id) else {
            debug!(%id, %flag, "flag change skipped, note not found");
            return Ok(None);
        };

        let mut next = self.notes.clone();
        let value = value(next[index].flag(flag));
        next[index].set_flag(flag, value);
        let changed = next[index].clone();
        self.commit(next)?;

        debug!(%id, %flag, value, "set note flag");
        Ok(Some(changed))
    }

    fn position(&self, id: &NoteId) -> Option<usize> {
        self.notes.iter().position(|note| note.id() == id)
    }

    /// Draws ids until one is not already taken by a stored note.
    fn fresh_id(&mut self) -> NoteId {
        loop {
            let id = self.ids.next_id();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

fn write_collection(slot: &mut dyn PersistenceSlot, notes: &[Note]) -> Result<(), NoteError> {
    let raw = serde_json::to_string(notes)?;
    slot.write(&raw)?;
    debug!(count = notes.len(), "persisted notes");
    Ok(())
}

fn read_collection(slot: &dyn PersistenceSlot) -> Vec<Note> {
    let raw = match slot.read() {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("no stored notes, starting empty");
            return Vec::new();
        }
        Err(e) => {
            warn!(error = %e, "failed to read stored notes, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<Note>>(&raw) {
        Ok(notes) => {
            debug!(count = notes.len(), "loaded notes");
            tidy_loaded(notes)
        }
        Err(e) => {
            warn!(error = %e, "stored notes are malformed, starting empty");
            Vec::new()
        }
    }
}

/// Repairs what a hand-edited or foreign slot can contain: repeated ids
/// (first one wins) and duplicate tags. Titles are taken as stored.
fn tidy_loaded(notes: Vec<Note>) -> Vec<Note> {
    let mut seen = HashSet::new();
    notes
        .into_iter()
        .filter_map(|mut note| {
            if !seen.insert(note.id().clone()) {
                warn!(id = %note.id(), "dropping stored note with repeated id");
                return None;
            }
            note.dedupe_tags();
            Some(note)
        })
        .collect()
}

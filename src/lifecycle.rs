//! Lifecycle actions exposed to the user-facing boundary.
//!
//! Pin, archive, trash and restore are single-flag changes. Permanent
//! removal is irreversible and goes through a `Confirm` capability first.

use tracing::debug;

use crate::boundary::Confirm;
use crate::error::NoteError;
use crate::{Note, NoteFlag, NoteId, NoteStore};

/// Prompt shown before permanently deleting one note.
pub const PURGE_PROMPT: &str = "Permanently delete this note? This cannot be undone.";

/// Prompt shown before emptying the trash.
pub const EMPTY_TRASH_PROMPT: &str = "Empty trash? All deleted notes will be permanently removed.";

/// Notice displayed alongside a non-empty trash. Nothing enforces it.
pub const TRASH_RETENTION_NOTICE: &str = "Items in trash will be permanently deleted after 30 days";

/// Result of a confirmed permanent delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurgeOutcome {
    Deleted(Note),
    /// The user declined the prompt; nothing changed.
    Declined,
    NotFound,
    /// Only trashed notes can be permanently deleted.
    NotInTrash,
}

/// Result of a confirmed empty-trash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyTrashOutcome {
    /// Number of notes removed. Zero when the trash was already empty.
    Emptied(usize),
    Declined,
}

impl NoteStore {
    pub fn pin(&mut self, id: &NoteId) -> Result<Option<Note>, NoteError> {
        self.set_flag(id, NoteFlag::Pinned, true)
    }

    pub fn unpin(&mut self, id: &NoteId) -> Result<Option<Note>, NoteError> {
        self.set_flag(id, NoteFlag::Pinned, false)
    }

    pub fn toggle_pin(&mut self, id: &NoteId) -> Result<Option<Note>, NoteError> {
        self.toggle_flag(id, NoteFlag::Pinned)
    }

    pub fn archive(&mut self, id: &NoteId) -> Result<Option<Note>, NoteError> {
        self.set_flag(id, NoteFlag::Archived, true)
    }

    pub fn unarchive(&mut self, id: &NoteId) -> Result<Option<Note>, NoteError> {
        self.set_flag(id, NoteFlag::Archived, false)
    }

    pub fn toggle_archive(&mut self, id: &NoteId) -> Result<Option<Note>, NoteError> {
        self.toggle_flag(id, NoteFlag::Archived)
    }

    /// Moves a note to the trash. Reversible with `restore`.
    pub fn trash(&mut self, id: &NoteId) -> Result<Option<Note>, NoteError> {
        self.set_flag(id, NoteFlag::Deleted, true)
    }

    /// Takes a note out of the trash with its pin/archive state intact.
    pub fn restore(&mut self, id: &NoteId) -> Result<Option<Note>, NoteError> {
        self.set_flag(id, NoteFlag::Deleted, false)
    }

    /// Permanently deletes a trashed note once the user confirms.
    ///
    /// The prompt is only shown for a note that exists and is in the trash.
    ///
    /// # Examples
    ///
    /// ```
    /// use jot::{AssumeYes, MemorySlot, NoteDraft, NoteStore, PurgeOutcome};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let mut store = NoteStore::load(MemorySlot::new());
    /// let note = store.add(NoteDraft::new("Old idea"))?;
    ///
    /// assert_eq!(store.purge(note.id(), &mut AssumeYes)?, PurgeOutcome::NotInTrash);
    ///
    /// store.trash(note.id())?;
    /// assert!(matches!(store.purge(note.id(), &mut AssumeYes)?, PurgeOutcome::Deleted(_)));
    /// assert!(store.notes().is_empty());
    /// # Ok(())
    /// # }
    /// ```
    pub fn purge(
        &mut self,
        id: &NoteId,
        confirm: &mut dyn Confirm,
    ) -> Result<PurgeOutcome, NoteError> {
        match self.get(id) {
            None => return Ok(PurgeOutcome::NotFound),
            Some(note) if !note.is_deleted() => return Ok(PurgeOutcome::NotInTrash),
            Some(_) => {}
        }

        if !confirm.confirm(PURGE_PROMPT) {
            debug!(%id, "permanent delete declined");
            return Ok(PurgeOutcome::Declined);
        }

        Ok(match self.permanently_delete(id)? {
            Some(note) => PurgeOutcome::Deleted(note),
            None => PurgeOutcome::NotFound,
        })
    }

    /// Empties the trash once the user confirms.
    ///
    /// An already empty trash reports `Emptied(0)` without prompting.
    pub fn empty_trash_confirmed(
        &mut self,
        confirm: &mut dyn Confirm,
    ) -> Result<EmptyTrashOutcome, NoteError> {
        if !self.notes().iter().any(Note::is_deleted) {
            return Ok(EmptyTrashOutcome::Emptied(0));
        }

        if !confirm.confirm(EMPTY_TRASH_PROMPT) {
            debug!("empty trash declined");
            return Ok(EmptyTrashOutcome::Declined);
        }

        Ok(EmptyTrashOutcome::Emptied(self.empty_trash()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::{AssumeNo, AssumeYes};
    use crate::{MemorySlot, NoteDraft, TagFilter, View, project};

    /// Records prompts and answers with a fixed response.
    struct Recorder {
        answer: bool,
        prompts: Vec<String>,
    }

    impl Recorder {
        fn answering(answer: bool) -> Self {
            Self {
                answer,
                prompts: Vec::new(),
            }
        }
    }

    impl Confirm for Recorder {
        fn confirm(&mut self, message: &str) -> bool {
            self.prompts.push(message.to_string());
            self.answer
        }
    }

    fn in_view(store: &NoteStore, view: View, id: &NoteId) -> bool {
        project(store.notes(), view, "", &TagFilter::All)
            .iter()
            .any(|note| note.id() == id)
    }

    #[test]
    fn new_note_appears_only_in_all_view() {
        let mut store = NoteStore::load(MemorySlot::new());
        let note = store.add(NoteDraft::new("Buy milk")).unwrap();

        assert_eq!(store.notes().len(), 1);
        assert!(in_view(&store, View::All, note.id()));
        assert!(!in_view(&store, View::Pinned, note.id()));
        assert!(!in_view(&store, View::Archived, note.id()));
        assert!(!in_view(&store, View::Trash, note.id()));
    }

    #[test]
    fn trash_then_restore_moves_between_views() {
        let mut store = NoteStore::load(MemorySlot::new());
        let note = store.add(NoteDraft::new("Buy milk")).unwrap();

        store.trash(note.id()).unwrap();
        assert!(!in_view(&store, View::All, note.id()));
        assert!(in_view(&store, View::Trash, note.id()));

        store.restore(note.id()).unwrap();
        assert!(in_view(&store, View::All, note.id()));
        assert!(!in_view(&store, View::Trash, note.id()));
    }

    #[test]
    fn restore_keeps_pin_and_archive_state() {
        let mut store = NoteStore::load(MemorySlot::new());
        let note = store.add(NoteDraft::new("n")).unwrap();
        store.pin(note.id()).unwrap();
        store.archive(note.id()).unwrap();

        store.trash(note.id()).unwrap();
        assert!(!in_view(&store, View::Pinned, note.id()));

        let restored = store.restore(note.id()).unwrap().unwrap();
        assert!(restored.is_pinned());
        assert!(restored.is_archived());
        assert!(in_view(&store, View::Pinned, note.id()));
        assert!(in_view(&store, View::Archived, note.id()));
    }

    #[test]
    fn pin_unpin_archive_unarchive() {
        let mut store = NoteStore::load(MemorySlot::new());
        let note = store.add(NoteDraft::new("n")).unwrap();

        assert!(store.pin(note.id()).unwrap().unwrap().is_pinned());
        assert!(!store.unpin(note.id()).unwrap().unwrap().is_pinned());
        assert!(store.archive(note.id()).unwrap().unwrap().is_archived());
        assert!(!store.unarchive(note.id()).unwrap().unwrap().is_archived());
        assert!(store.toggle_pin(note.id()).unwrap().unwrap().is_pinned());
        assert!(store.toggle_archive(note.id()).unwrap().unwrap().is_archived());
    }

    #[test]
    fn purge_asks_before_deleting() {
        let mut store = NoteStore::load(MemorySlot::new());
        let note = store.add(NoteDraft::new("n")).unwrap();
        store.trash(note.id()).unwrap();
        let mut confirm = Recorder::answering(true);

        let outcome = store.purge(note.id(), &mut confirm).unwrap();

        assert!(matches!(outcome, PurgeOutcome::Deleted(ref n) if n.id() == note.id()));
        assert_eq!(confirm.prompts, vec![PURGE_PROMPT.to_string()]);
        assert!(store.notes().is_empty());
    }

    #[test]
    fn purge_declined_keeps_note() {
        let mut store = NoteStore::load(MemorySlot::new());
        let note = store.add(NoteDraft::new("n")).unwrap();
        store.trash(note.id()).unwrap();

        let outcome = store.purge(note.id(), &mut AssumeNo).unwrap();

        assert_eq!(outcome, PurgeOutcome::Declined);
        assert!(store.get(note.id()).is_some());
    }

    #[test]
    fn purge_outside_trash_does_not_prompt() {
        let mut store = NoteStore::load(MemorySlot::new());
        let note = store.add(NoteDraft::new("n")).unwrap();
        let mut confirm = Recorder::answering(true);

        assert_eq!(
            store.purge(note.id(), &mut confirm).unwrap(),
            PurgeOutcome::NotInTrash
        );
        assert_eq!(
            store.purge(&NoteId::new("missing"), &mut confirm).unwrap(),
            PurgeOutcome::NotFound
        );
        assert!(confirm.prompts.is_empty());
        assert_eq!(store.notes().len(), 1);
    }

    #[test]
    fn empty_trash_confirmed_removes_trashed_notes() {
        let mut store = NoteStore::load(MemorySlot::new());
        let a = store.add(NoteDraft::new("a")).unwrap();
        let b = store.add(NoteDraft::new("b")).unwrap();
        store.add(NoteDraft::new("keep")).unwrap();
        store.trash(a.id()).unwrap();
        store.trash(b.id()).unwrap();

        let outcome = store.empty_trash_confirmed(&mut AssumeYes).unwrap();

        assert_eq!(outcome, EmptyTrashOutcome::Emptied(2));
        assert_eq!(store.notes().len(), 1);
        assert_eq!(store.notes()[0].title(), "keep");
    }

    #[test]
    fn empty_trash_declined_changes_nothing() {
        let mut store = NoteStore::load(MemorySlot::new());
        let a = store.add(NoteDraft::new("a")).unwrap();
        store.trash(a.id()).unwrap();
        let mut confirm = Recorder::answering(false);

        let outcome = store.empty_trash_confirmed(&mut confirm).unwrap();

        assert_eq!(outcome, EmptyTrashOutcome::Declined);
        assert_eq!(confirm.prompts, vec![EMPTY_TRASH_PROMPT.to_string()]);
        assert_eq!(store.notes().len(), 1);
    }

    #[test]
    fn empty_trash_with_nothing_trashed_skips_prompt() {
        let mut store = NoteStore::load(MemorySlot::new());
        store.add(NoteDraft::new("a")).unwrap();
        let mut confirm = Recorder::answering(false);

        let outcome = store.empty_trash_confirmed(&mut confirm).unwrap();

        assert_eq!(outcome, EmptyTrashOutcome::Emptied(0));
        assert!(confirm.prompts.is_empty());
    }
}

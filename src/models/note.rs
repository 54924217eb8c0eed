use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{NoteDraft, NoteFlag, NoteId};

/// A note with its title, description, tags and lifecycle flags.
///
/// Notes are the only entity in the system. Flags are independent booleans:
/// a note can be pinned and archived at the same time, and a deleted note
/// keeps its pin/archive state so that restoring it brings it back unchanged.
///
/// The serialized form uses camelCase field names and RFC 3339 timestamps,
/// matching the layout stored in the persistence slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    id: NoteId,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
    #[serde(default)]
    is_pinned: bool,
    #[serde(default)]
    is_archived: bool,
    #[serde(default)]
    is_deleted: bool,
}

impl Note {
    /// Returns the note's unique identifier.
    pub fn id(&self) -> &NoteId {
        &self.id
    }

    /// Returns the note's title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the note's description. May be empty.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the note's tags in insertion order.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns true if the note carries exactly this tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// When this note was created.
    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    /// When the title, description or tags were last edited.
    pub fn updated_at(&self) -> OffsetDateTime {
        self.updated_at
    }

    pub fn is_pinned(&self) -> bool {
        self.is_pinned
    }

    pub fn is_archived(&self) -> bool {
        self.is_archived
    }

    /// Returns true if the note is in the trash.
    pub fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    /// Returns the current value of a lifecycle flag.
    pub fn flag(&self, flag: NoteFlag) -> bool {
        match flag {
            NoteFlag::Pinned => self.is_pinned,
            NoteFlag::Archived => self.is_archived,
            NoteFlag::Deleted => self.is_deleted,
        }
    }

    /// Sets a lifecycle flag. Does not touch `updated_at`.
    pub(crate) fn set_flag(&mut self, flag: NoteFlag, value: bool) {
        match flag {
            NoteFlag::Pinned => self.is_pinned = value,
            NoteFlag::Archived => self.is_archived = value,
            NoteFlag::Deleted => self.is_deleted = value,
        }
    }

    /// Trims tags and drops blank or repeated ones, keeping first occurrences.
    pub(crate) fn dedupe_tags(&mut self) {
        let mut kept: Vec<String> = Vec::with_capacity(self.tags.len());
        for tag in self.tags.drain(..) {
            let tag = tag.trim();
            if !tag.is_empty() && !kept.iter().any(|t| t == tag) {
                kept.push(tag.to_string());
            }
        }
        self.tags = kept;
    }

    /// Replaces the editable fields with those of a validated draft.
    pub(crate) fn apply_draft(&mut self, draft: NoteDraft, now: OffsetDateTime) {
        let (title, description, tags) = draft.into_parts();
        self.title = title;
        self.description = description;
        self.tags = tags;
        self.updated_at = now;
    }
}

/// Builder for constructing `Note` instances with optional fields.
///
/// # Examples
///
/// ```
/// use jot::{NoteBuilder, NoteId};
///
/// let note = NoteBuilder::new()
///     .id(NoteId::new("1"))
///     .title("My first note")
///     .build();
///
/// assert_eq!(note.id().as_str(), "1");
/// assert_eq!(note.title(), "My first note");
/// assert!(note.tags().is_empty());
/// assert!(!note.is_pinned());
/// ```
#[derive(Debug, Default)]
pub struct NoteBuilder {
    id: Option<NoteId>,
    title: Option<String>,
    description: Option<String>,
    tags: Option<Vec<String>>,
    created_at: Option<OffsetDateTime>,
    updated_at: Option<OffsetDateTime>,
    pinned: bool,
    archived: bool,
    deleted: bool,
}

impl NoteBuilder {
    /// Creates a new `NoteBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the note ID.
    pub fn id(mut self, id: NoteId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the note title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the note description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the tags.
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Sets the created timestamp.
    pub fn created_at(mut self, created_at: OffsetDateTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Sets the updated timestamp.
    pub fn updated_at(mut self, updated_at: OffsetDateTime) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    pub fn pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    pub fn archived(mut self, archived: bool) -> Self {
        self.archived = archived;
        self
    }

    pub fn deleted(mut self, deleted: bool) -> Self {
        self.deleted = deleted;
        self
    }

    /// Builds the `Note`, using defaults for optional fields.
    ///
    /// # Panics
    ///
    /// Panics if `id` or `title` have not been set.
    pub fn build(self) -> Note {
        let now = OffsetDateTime::now_utc();
        let created_at = self.created_at.unwrap_or(now);
        Note {
            id: self.id.expect("id is required"),
            title: self.title.expect("title is required"),
            description: self.description.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
            is_pinned: self.pinned,
            is_archived: self.archived,
            is_deleted: self.deleted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_note_builder_creates_note_with_defaults() {
        let note = NoteBuilder::new()
            .id(NoteId::new("1"))
            .title("Test note")
            .build();

        assert_eq!(note.title(), "Test note");
        assert_eq!(note.description(), "");
        assert!(note.tags().is_empty());
        assert!(!note.is_pinned());
        assert!(!note.is_archived());
        assert!(!note.is_deleted());
        assert_eq!(note.created_at(), note.updated_at());
    }

    #[test]
    fn test_note_serializes_with_camel_case_fields() {
        let at = datetime!(2024-03-01 12:00:00 UTC);
        let note = NoteBuilder::new()
            .id(NoteId::new("42"))
            .title("Buy milk")
            .tags(vec!["errand".to_string()])
            .created_at(at)
            .pinned(true)
            .build();

        let value = serde_json::to_value(&note).unwrap();

        assert_eq!(value["id"], "42");
        assert_eq!(value["title"], "Buy milk");
        assert_eq!(value["description"], "");
        assert_eq!(value["tags"][0], "errand");
        assert_eq!(value["createdAt"], "2024-03-01T12:00:00Z");
        assert_eq!(value["updatedAt"], "2024-03-01T12:00:00Z");
        assert_eq!(value["isPinned"], true);
        assert_eq!(value["isArchived"], false);
        assert_eq!(value["isDeleted"], false);
    }

    #[test]
    fn test_note_deserializes_browser_iso_timestamps() {
        let json = r#"{
            "id": "1700000000000",
            "title": "Call mom",
            "description": "Sunday",
            "tags": ["family"],
            "createdAt": "2023-11-14T22:13:20.000Z",
            "updatedAt": "2023-11-14T22:13:20.000Z",
            "isPinned": false,
            "isArchived": true,
            "isDeleted": false
        }"#;

        let note: Note = serde_json::from_str(json).unwrap();

        assert_eq!(note.id().as_str(), "1700000000000");
        assert_eq!(note.created_at(), datetime!(2023-11-14 22:13:20 UTC));
        assert!(note.is_archived());
        assert!(note.has_tag("family"));
    }

    #[test]
    fn test_note_missing_optional_fields_use_defaults() {
        let json = r#"{
            "id": "1",
            "title": "Bare",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }"#;

        let note: Note = serde_json::from_str(json).unwrap();

        assert_eq!(note.description(), "");
        assert!(note.tags().is_empty());
        assert!(!note.is_pinned());
        assert!(!note.is_deleted());
    }

    #[test]
    fn test_set_flag_leaves_updated_at_untouched() {
        let at = datetime!(2024-01-01 00:00:00 UTC);
        let mut note = NoteBuilder::new()
            .id(NoteId::new("1"))
            .title("Flags")
            .created_at(at)
            .build();

        note.set_flag(NoteFlag::Archived, true);
        note.set_flag(NoteFlag::Pinned, true);

        assert!(note.flag(NoteFlag::Archived));
        assert!(note.flag(NoteFlag::Pinned));
        assert!(!note.flag(NoteFlag::Deleted));
        assert_eq!(note.updated_at(), at);
    }
}

use super::Note;
use crate::error::NoteError;

/// Editable fields of a note, as collected before an add or update.
///
/// A draft is the unit that crosses the validation boundary: the store only
/// ever receives drafts, and only after `validate` has accepted them.
///
/// # Examples
///
/// ```
/// use jot::NoteDraft;
///
/// let mut draft = NoteDraft::new("Buy milk");
/// draft.add_tag("urgent");
/// draft.add_tag(" urgent ");
///
/// assert_eq!(draft.tags(), ["urgent"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    title: String,
    description: String,
    tags: Vec<String>,
}

impl NoteDraft {
    /// Creates a draft with a title, an empty description and no tags.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds each tag in turn, with the same rules as `add_tag`.
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        for tag in tags {
            self.add_tag(tag.as_ref());
        }
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Adds a tag, trimmed. Returns false when the trimmed tag is empty or
    /// already present.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Removes a tag. Returns false when the tag was not present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    /// Replaces all tags, applying `add_tag` rules to each.
    pub fn replace_tags<I, T>(&mut self, tags: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.tags.clear();
        for tag in tags {
            self.add_tag(tag.as_ref());
        }
    }

    /// Checks that the title is not empty once trimmed.
    ///
    /// # Errors
    ///
    /// Returns `NoteError::EmptyTitle` for an empty or whitespace-only title.
    pub fn validate(&self) -> Result<(), NoteError> {
        if self.title.trim().is_empty() {
            return Err(NoteError::EmptyTitle);
        }
        Ok(())
    }

    pub(crate) fn into_parts(self) -> (String, String, Vec<String>) {
        (self.title, self.description, self.tags)
    }
}

impl From<&Note> for NoteDraft {
    fn from(note: &Note) -> Self {
        Self {
            title: note.title().to_string(),
            description: note.description().to_string(),
            tags: Vec::new(),
        }
        .with_tags(note.tags())
    }
}

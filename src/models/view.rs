use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::Note;

/// Returned when a view or tag filter name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown view '{0}' (expected one of: all, pinned, archived, trash)")]
pub struct ParseViewError(String);

/// The primary filter applied when listing notes.
///
/// Views are mutually exclusive modes, but a note may show up in more than
/// one of them: a pinned note that is not archived appears in both `All` and
/// `Pinned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    /// Notes that are neither archived nor in the trash.
    #[default]
    All,
    /// Pinned notes outside the trash, archived or not.
    Pinned,
    /// Archived notes outside the trash.
    Archived,
    /// Notes in the trash, whatever their other flags.
    Trash,
}

impl View {
    /// Every view, in display order.
    pub const ALL: [View; 4] = [View::All, View::Pinned, View::Archived, View::Trash];

    /// Returns true if the note belongs to this view.
    pub fn matches(self, note: &Note) -> bool {
        match self {
            View::All => !note.is_deleted() && !note.is_archived(),
            View::Pinned => note.is_pinned() && !note.is_deleted(),
            View::Archived => note.is_archived() && !note.is_deleted(),
            View::Trash => note.is_deleted(),
        }
    }

    /// Human readable label, as shown in list headers.
    pub fn label(self) -> &'static str {
        match self {
            View::All => "All Notes",
            View::Pinned => "Pinned",
            View::Archived => "Archived",
            View::Trash => "Trash",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            View::All => "all",
            View::Pinned => "pinned",
            View::Archived => "archived",
            View::Trash => "trash",
        };
        write!(f, "{name}")
    }
}

impl FromStr for View {
    type Err = ParseViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(View::All),
            "pinned" => Ok(View::Pinned),
            "archived" => Ok(View::Archived),
            "trash" => Ok(View::Trash),
            _ => Err(ParseViewError(s.to_string())),
        }
    }
}

/// Tag stage of the view projection.
///
/// The literal name `all` selects every tag, so a tag called "all" can be
/// attached to notes but not filtered on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TagFilter {
    /// No tag filtering.
    #[default]
    All,
    /// Keep notes carrying exactly this tag.
    Tag(String),
}

impl TagFilter {
    /// Creates a filter for a tag name, mapping `all` to `TagFilter::All`.
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        if tag == "all" {
            TagFilter::All
        } else {
            TagFilter::Tag(tag)
        }
    }

    /// Returns true if the note passes this filter.
    pub fn matches(&self, note: &Note) -> bool {
        match self {
            TagFilter::All => true,
            TagFilter::Tag(tag) => note.has_tag(tag),
        }
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagFilter::All => write!(f, "all"),
            TagFilter::Tag(tag) => write!(f, "{tag}"),
        }
    }
}

impl FromStr for TagFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TagFilter::new(s))
    }
}

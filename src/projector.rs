//! View projection: which notes to show for a view, search and tag filter.
//!
//! Everything here is a pure function of the collection. Results keep the
//! collection's order (newest first); nothing is re-sorted.

use std::collections::HashSet;

use crate::{Note, TagFilter, View};

/// Derives the notes to display.
///
/// Stages narrow in order: the view predicate, then a case-insensitive
/// substring search over title and description (skipped for an empty
/// query), then the exact tag filter.
///
/// # Examples
///
/// ```
/// use jot::{NoteBuilder, NoteId, TagFilter, View, project};
///
/// let notes = vec![
///     NoteBuilder::new().id(NoteId::new("2")).title("Buy milk").build(),
///     NoteBuilder::new().id(NoteId::new("1")).title("Call mom").build(),
/// ];
///
/// let shown = project(&notes, View::All, "MILK", &TagFilter::All);
/// assert_eq!(shown.len(), 1);
/// assert_eq!(shown[0].title(), "Buy milk");
/// ```
pub fn project<'a>(
    notes: &'a [Note],
    view: View,
    search_query: &str,
    tag_filter: &TagFilter,
) -> Vec<&'a Note> {
    let query = search_query.to_lowercase();

    notes
        .iter()
        .filter(|note| view.matches(note))
        .filter(|note| query.is_empty() || matches_search(note, &query))
        .filter(|note| tag_filter.matches(note))
        .collect()
}

/// `query` must already be lowercase.
fn matches_search(note: &Note, query: &str) -> bool {
    note.title().to_lowercase().contains(query) || note.description().to_lowercase().contains(query)
}

/// Every distinct tag across the whole collection, in order of first
/// appearance. Trashed and archived notes contribute too.
pub fn all_tags(notes: &[Note]) -> Vec<String> {
    let mut seen = HashSet::new();
    notes
        .iter()
        .flat_map(|note| note.tags().iter().map(String::as_str))
        .filter(|tag| seen.insert(*tag))
        .map(str::to_string)
        .collect()
}

/// Number of notes in each view, ignoring search and tag filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewCounts {
    pub all: usize,
    pub pinned: usize,
    pub archived: usize,
    pub trash: usize,
}

impl ViewCounts {
    /// Returns the count for one view.
    pub fn get(&self, view: View) -> usize {
        match view {
            View::All => self.all,
            View::Pinned => self.pinned,
            View::Archived => self.archived,
            View::Trash => self.trash,
        }
    }
}

/// Counts how many notes fall in each view.
pub fn count_by_view(notes: &[Note]) -> ViewCounts {
    let count = |view: View| notes.iter().filter(|note| view.matches(note)).count();
    ViewCounts {
        all: count(View::All),
        pinned: count(View::Pinned),
        archived: count(View::Archived),
        trash: count(View::Trash),
    }
}

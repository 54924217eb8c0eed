use crate::projector::{self, ViewCounts};
use crate::{Note, NoteStore, TagFilter, View};

/// Application state for one user session.
///
/// Holds the note store together with the current view mode, search text
/// and tag filter. The displayed notes are always derived from these on
/// demand, so they cannot drift out of sync with the store.
pub struct Session {
    /// Owner of the notes; lifecycle actions go through here.
    store: NoteStore,
    /// Primary filter stage.
    view: View,
    /// Search buffer, matched case-insensitively.
    search_query: String,
    /// Tag filter, `All` when no tag is selected.
    tag_filter: TagFilter,
}

impl Session {
    /// Creates a session showing the `All` view with no search or tag filter.
    ///
    /// # Examples
    ///
    /// ```
    /// use jot::{MemorySlot, NoteDraft, NoteStore, Session, View};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let mut session = Session::new(NoteStore::load(MemorySlot::new()));
    /// assert_eq!(session.view(), View::All);
    ///
    /// session.store_mut().add(NoteDraft::new("Buy milk"))?;
    /// session.store_mut().add(NoteDraft::new("Call mom"))?;
    ///
    /// session.set_search_query("milk");
    /// assert_eq!(session.visible_notes().len(), 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(store: NoteStore) -> Self {
        Self {
            store,
            view: View::default(),
            search_query: String::new(),
            tag_filter: TagFilter::default(),
        }
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut NoteStore {
        &mut self.store
    }

    /// Consumes the session, returning the store.
    pub fn into_store(self) -> NoteStore {
        self.store
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn tag_filter(&self) -> &TagFilter {
        &self.tag_filter
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
    }

    pub fn set_tag_filter(&mut self, filter: TagFilter) {
        self.tag_filter = filter;
    }

    /// Notes matching the current view, search and tag filter, newest first.
    pub fn visible_notes(&self) -> Vec<&Note> {
        projector::project(
            self.store.notes(),
            self.view,
            &self.search_query,
            &self.tag_filter,
        )
    }

    /// Every tag in the collection, for populating a tag picker.
    pub fn available_tags(&self) -> Vec<String> {
        projector::all_tags(self.store.notes())
    }

    /// Per-view note counts, ignoring search and tag filter.
    pub fn view_counts(&self) -> ViewCounts {
        projector::count_by_view(self.store.notes())
    }
}

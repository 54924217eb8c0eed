mod draft;
mod flag;
mod ids;
mod note;
mod view;

pub use draft::NoteDraft;
pub use flag::NoteFlag;
pub use ids::NoteId;
pub use note::{Note, NoteBuilder};
pub use view::{ParseViewError, TagFilter, View};

use std::fmt;

/// One of the three independent lifecycle flags on a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteFlag {
    /// Pinned notes are listed in the pinned view.
    Pinned,
    /// Archived notes leave the main view but stay out of the trash.
    Archived,
    /// Soft delete: the note sits in the trash until restored or purged.
    Deleted,
}

impl fmt::Display for NoteFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteFlag::Pinned => write!(f, "pinned"),
            NoteFlag::Archived => write!(f, "archived"),
            NoteFlag::Deleted => write!(f, "deleted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        assert_eq!(NoteFlag::Pinned.to_string(), "pinned");
        assert_eq!(NoteFlag::Archived.to_string(), "archived");
        assert_eq!(NoteFlag::Deleted.to_string(), "deleted");
    }
}

use anyhow::Result;
use jot::{Database, NoteDraft, NoteStore, Session, SqliteSlot, TagFilter, View};

/// Helper function that mimics the core logic of the list command.
///
/// Returns `(title, tags)` pairs for the notes that would be printed.
fn list_notes(
    session: &mut Session,
    view: &str,
    search: &str,
    tag: &str,
) -> Result<Vec<(String, Vec<String>)>> {
    session.set_view(view.parse::<View>()?);
    session.set_search_query(search);
    session.set_tag_filter(TagFilter::new(tag));

    Ok(session
        .visible_notes()
        .into_iter()
        .map(|note| (note.title().to_string(), note.tags().to_vec()))
        .collect())
}

fn seeded_session() -> Result<Session> {
    let mut store = NoteStore::load(SqliteSlot::new(Database::in_memory()?));

    store.add(NoteDraft::new("First note about Rust").with_tags(["rust", "programming"]))?;
    store.add(NoteDraft::new("Second note about learning").with_tags(["learning"]))?;
    store.add(NoteDraft::new("Third note with no tags"))?;
    store.add(
        NoteDraft::new("Fourth note about Rust tutorials")
            .with_description("links to the book")
            .with_tags(["rust", "tutorial"]),
    )?;

    Ok(Session::new(store))
}

#[test]
fn test_list_full_workflow_with_multiple_notes() -> Result<()> {
    let mut session = seeded_session()?;

    let results = list_notes(&mut session, "all", "", "all")?;

    assert_eq!(results.len(), 4, "should return 4 notes");

    // Newest first
    assert_eq!(results[0].0, "Fourth note about Rust tutorials");
    assert_eq!(results[1].0, "Third note with no tags");
    assert_eq!(results[2].0, "Second note about learning");
    assert_eq!(results[3].0, "First note about Rust");

    // Tags keep their insertion order
    assert_eq!(results[0].1, vec!["rust", "tutorial"]);
    assert!(results[1].1.is_empty());
    assert_eq!(results[3].1, vec!["rust", "programming"]);

    Ok(())
}

#[test]
fn test_list_filters_by_tag() -> Result<()> {
    let mut session = seeded_session()?;

    let results = list_notes(&mut session, "all", "", "rust")?;

    let titles: Vec<&str> = results.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Fourth note about Rust tutorials", "First note about Rust"]
    );

    Ok(())
}

#[test]
fn test_list_search_is_case_insensitive_over_description() -> Result<()> {
    let mut session = seeded_session()?;

    let results = list_notes(&mut session, "all", "THE BOOK", "all")?;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].0, "Fourth note about Rust tutorials");

    Ok(())
}

#[test]
fn test_list_search_and_tag_narrow_together() -> Result<()> {
    let mut session = seeded_session()?;

    assert_eq!(list_notes(&mut session, "all", "first", "rust")?.len(), 1);
    assert!(list_notes(&mut session, "all", "first", "learning")?.is_empty());

    Ok(())
}

#[test]
fn test_list_each_view() -> Result<()> {
    let mut session = seeded_session()?;
    let ids: Vec<_> = session
        .store()
        .notes()
        .iter()
        .map(|n| n.id().clone())
        .collect();

    // ids[0] = Fourth, ids[1] = Third, ids[2] = Second, ids[3] = First
    session.store_mut().pin(&ids[0])?;
    session.store_mut().archive(&ids[1])?;
    session.store_mut().pin(&ids[1])?;
    session.store_mut().trash(&ids[2])?;

    let titles = |rows: Vec<(String, Vec<String>)>| -> Vec<String> {
        rows.into_iter().map(|(t, _)| t).collect()
    };

    assert_eq!(
        titles(list_notes(&mut session, "all", "", "all")?),
        vec!["Fourth note about Rust tutorials", "First note about Rust"]
    );
    assert_eq!(
        titles(list_notes(&mut session, "pinned", "", "all")?),
        vec!["Fourth note about Rust tutorials", "Third note with no tags"]
    );
    assert_eq!(
        titles(list_notes(&mut session, "archived", "", "all")?),
        vec!["Third note with no tags"]
    );
    assert_eq!(
        titles(list_notes(&mut session, "trash", "", "all")?),
        vec!["Second note about learning"]
    );

    let counts = session.view_counts();
    assert_eq!(
        (counts.all, counts.pinned, counts.archived, counts.trash),
        (2, 2, 1, 1)
    );

    Ok(())
}

#[test]
fn test_tag_universe_includes_hidden_notes() -> Result<()> {
    let mut session = seeded_session()?;
    let second = session.store().notes()[2].id().clone();
    session.store_mut().trash(&second)?;

    assert_eq!(
        session.available_tags(),
        vec!["rust", "tutorial", "learning", "programming"]
    );

    Ok(())
}

#[test]
fn test_list_unknown_view_is_rejected() -> Result<()> {
    let mut session = seeded_session()?;
    assert!(list_notes(&mut session, "everything", "", "all").is_err());
    Ok(())
}

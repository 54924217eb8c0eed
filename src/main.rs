use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jot::utils::{ensure_database_directory, parse_tags};
use jot::{
    AssumeYes, Config, Confirm, Database, EmptyTrashOutcome, Note, NoteDraft, NoteError, NoteId,
    NoteStore, PurgeOutcome, Session, SqliteSlot, StdinConfirm, TRASH_RETENTION_NOTICE, TagFilter,
    View, logging,
};
use thiserror::Error;
use time::macros::format_description;

/// jot - keep short notes, tag them, pin, archive and trash them
#[derive(Parser)]
#[command(name = "jot")]
#[command(about = "A small local note keeper")]
#[command(version)]
struct Cli {
    /// Path to the notes database (overrides JOT_DB)
    #[arg(long, global = true, value_name = "PATH")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Add a new note
    Add(AddCommand),
    /// Edit a note's title, description or tags
    Edit(EditCommand),
    /// List notes in a view, optionally filtered by search text and tag
    List(ListCommand),
    /// Show one note in full
    Show(IdArg),
    /// List every tag in use
    Tags,
    /// Pin a note
    Pin(IdArg),
    /// Unpin a note
    Unpin(IdArg),
    /// Archive a note
    Archive(IdArg),
    /// Move a note out of the archive
    Unarchive(IdArg),
    /// Move a note to the trash
    Trash(IdArg),
    /// Restore a note from the trash
    Restore(IdArg),
    /// Permanently delete a note from the trash
    Delete(DeleteCommand),
    /// Permanently delete every note in the trash
    EmptyTrash(YesArg),
}

/// Add a new note
#[derive(Parser)]
struct AddCommand {
    /// The note title
    #[arg(value_name = "TITLE")]
    title: String,

    /// Longer description
    #[arg(short, long, value_name = "TEXT", default_value = "")]
    description: String,

    /// Comma-separated tags to apply to the note
    #[arg(short, long, value_name = "TAGS")]
    tags: Option<String>,
}

/// Edit an existing note
#[derive(Parser)]
struct EditCommand {
    /// Id of the note to edit
    #[arg(value_name = "ID")]
    id: String,

    /// New title
    #[arg(long, value_name = "TITLE")]
    title: Option<String>,

    /// New description
    #[arg(short, long, value_name = "TEXT")]
    description: Option<String>,

    /// Comma-separated tags replacing the current ones
    #[arg(short, long, value_name = "TAGS")]
    tags: Option<String>,

    /// Tag to add (repeatable)
    #[arg(long = "add-tag", value_name = "TAG")]
    add_tags: Vec<String>,

    /// Tag to remove (repeatable)
    #[arg(long = "remove-tag", value_name = "TAG")]
    remove_tags: Vec<String>,
}

/// List notes
#[derive(Parser)]
struct ListCommand {
    /// View to list: all, pinned, archived or trash
    #[arg(long, value_name = "VIEW", default_value = "all")]
    view: View,

    /// Case-insensitive text to look for in titles and descriptions
    #[arg(short, long, value_name = "QUERY", default_value = "")]
    search: String,

    /// Only show notes with this exact tag ("all" for any)
    #[arg(long, value_name = "TAG", default_value = "all")]
    tag: String,
}

#[derive(Parser)]
struct IdArg {
    /// Note id
    #[arg(value_name = "ID")]
    id: String,
}

/// Permanently delete a trashed note
#[derive(Parser)]
struct DeleteCommand {
    /// Note id
    #[arg(value_name = "ID")]
    id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

#[derive(Parser)]
struct YesArg {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

/// Errors caused by what the user asked for rather than by the system.
#[derive(Debug, Error)]
enum UserError {
    #[error("Note not found: {0}")]
    NotFound(NoteId),

    #[error("Note {0} is not in the trash; run `jot trash {0}` first")]
    NotInTrash(NoteId),
}

fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        // Determine exit code based on error type
        let exit_code = if is_user_error(&e) { 1 } else { 2 };
        eprintln!("Error: {e:#}");
        std::process::exit(exit_code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::resolve(cli.db)?;
    logging::init(&config.log_filter);

    let store = open_store(&config)?;
    let mut session = Session::new(store);

    let mut stdout = io::stdout().lock();
    execute(&cli.command, &mut session, &mut StdinConfirm, &mut stdout)
}

/// Determines if an error is a user error (vs internal error).
///
/// User errors are validation failures and references to notes that do not
/// exist or are in the wrong state. Everything else is internal.
fn is_user_error(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| {
        cause.is::<UserError>()
            || cause
                .downcast_ref::<NoteError>()
                .is_some_and(NoteError::is_user_error)
    })
}

/// Opens the database at the configured path and loads the store from it.
fn open_store(config: &Config) -> Result<NoteStore> {
    ensure_database_directory(&config.db_path)?;
    let db = Database::open(&config.db_path).with_context(|| {
        format!("Failed to open database: {}", config.db_path.display())
    })?;
    Ok(NoteStore::load(SqliteSlot::new(db)))
}

/// Runs one command against the session.
///
/// Separated from `run` so commands can be tested against an in-memory
/// store and captured output.
fn execute(
    command: &Commands,
    session: &mut Session,
    confirm: &mut dyn Confirm,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Commands::Add(cmd) => execute_add(cmd, session.store_mut(), out),
        Commands::Edit(cmd) => execute_edit(cmd, session.store_mut(), out),
        Commands::List(cmd) => {
            session.set_view(cmd.view);
            session.set_search_query(cmd.search.clone());
            session.set_tag_filter(TagFilter::new(cmd.tag.clone()));
            execute_list(session, out)
        }
        Commands::Show(arg) => execute_show(&NoteId::new(arg.id.as_str()), session.store(), out),
        Commands::Tags => execute_tags(session, out),
        Commands::Pin(arg) => {
            let id = NoteId::new(arg.id.as_str());
            let note = session.store_mut().pin(&id)?;
            report_change(note, id, "Pinned", out)
        }
        Commands::Unpin(arg) => {
            let id = NoteId::new(arg.id.as_str());
            let note = session.store_mut().unpin(&id)?;
            report_change(note, id, "Unpinned", out)
        }
        Commands::Archive(arg) => {
            let id = NoteId::new(arg.id.as_str());
            let note = session.store_mut().archive(&id)?;
            report_change(note, id, "Archived", out)
        }
        Commands::Unarchive(arg) => {
            let id = NoteId::new(arg.id.as_str());
            let note = session.store_mut().unarchive(&id)?;
            report_change(note, id, "Unarchived", out)
        }
        Commands::Trash(arg) => {
            let id = NoteId::new(arg.id.as_str());
            let note = session.store_mut().trash(&id)?;
            report_change(note, id, "Moved to trash", out)
        }
        Commands::Restore(arg) => {
            let id = NoteId::new(arg.id.as_str());
            let note = session.store_mut().restore(&id)?;
            report_change(note, id, "Restored", out)
        }
        Commands::Delete(cmd) => {
            let id = NoteId::new(cmd.id.as_str());
            if cmd.yes {
                execute_delete(&id, session.store_mut(), &mut AssumeYes, out)
            } else {
                execute_delete(&id, session.store_mut(), confirm, out)
            }
        }
        Commands::EmptyTrash(arg) => {
            if arg.yes {
                execute_empty_trash(session.store_mut(), &mut AssumeYes, out)
            } else {
                execute_empty_trash(session.store_mut(), confirm, out)
            }
        }
    }
}

/// Creates a note from the add command's arguments.
fn execute_add(cmd: &AddCommand, store: &mut NoteStore, out: &mut impl Write) -> Result<()> {
    let tags = cmd.tags.as_deref().map(parse_tags).unwrap_or_default();
    let draft = NoteDraft::new(cmd.title.as_str())
        .with_description(cmd.description.as_str())
        .with_tags(&tags);

    let note = store.add(draft)?;

    write!(out, "Note created (id: {})", note.id())?;
    if !note.tags().is_empty() {
        write!(out, " with tags: {}", note.tags().join(", "))?;
    }
    writeln!(out)?;
    Ok(())
}

/// Applies the edit command's changes on top of the note's current fields.
fn execute_edit(cmd: &EditCommand, store: &mut NoteStore, out: &mut impl Write) -> Result<()> {
    let id = NoteId::new(cmd.id.as_str());
    let current = store.get(&id).ok_or_else(|| UserError::NotFound(id.clone()))?;

    let mut draft = NoteDraft::from(current);
    if let Some(title) = &cmd.title {
        draft.set_title(title.as_str());
    }
    if let Some(description) = &cmd.description {
        draft.set_description(description.as_str());
    }
    if let Some(tags) = &cmd.tags {
        draft.replace_tags(parse_tags(tags));
    }
    for tag in &cmd.add_tags {
        draft.add_tag(tag);
    }
    for tag in &cmd.remove_tags {
        draft.remove_tag(tag.trim());
    }

    match store.update(&id, draft)? {
        Some(note) => writeln!(out, "Note updated (id: {})", note.id())?,
        None => return Err(UserError::NotFound(id).into()),
    }
    Ok(())
}

/// Prints the session's visible notes with per-view counts.
fn execute_list(session: &Session, out: &mut impl Write) -> Result<()> {
    let view = session.view();
    let counts = session.view_counts();
    let notes = session.visible_notes();

    writeln!(
        out,
        "all: {}  pinned: {}  archived: {}  trash: {}",
        counts.all, counts.pinned, counts.archived, counts.trash
    )?;
    writeln!(out, "{} ({})", view.label(), notes.len())?;

    if view == View::Trash && !notes.is_empty() {
        writeln!(out, "{TRASH_RETENTION_NOTICE}")?;
    }

    if notes.is_empty() {
        writeln!(out, "No notes found")?;
        if !session.search_query().is_empty() {
            writeln!(out, "Try a different search term")?;
        } else if view == View::All {
            writeln!(out, "Create your first note with `jot add <TITLE>`")?;
        }
        return Ok(());
    }

    for note in notes {
        write_note_line(note, out)?;
    }
    Ok(())
}

fn execute_show(id: &NoteId, store: &NoteStore, out: &mut impl Write) -> Result<()> {
    let note = store.get(id).ok_or_else(|| UserError::NotFound(id.clone()))?;

    writeln!(out, "{}", note.title())?;
    if !note.description().is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", note.description())?;
    }
    writeln!(out)?;
    writeln!(out, "id:      {}", note.id())?;
    if !note.tags().is_empty() {
        writeln!(out, "tags:    {}", format_tags(note))?;
    }
    let flags = format_flags(note);
    if !flags.is_empty() {
        writeln!(out, "status:  {flags}")?;
    }
    writeln!(out, "created: {}", format_date(note.created_at()))?;
    writeln!(out, "updated: {}", format_date(note.updated_at()))?;
    Ok(())
}

fn execute_tags(session: &Session, out: &mut impl Write) -> Result<()> {
    let tags = session.available_tags();
    if tags.is_empty() {
        writeln!(out, "No tags yet")?;
    }
    for tag in tags {
        writeln!(out, "{tag}")?;
    }
    Ok(())
}

fn execute_delete(
    id: &NoteId,
    store: &mut NoteStore,
    confirm: &mut dyn Confirm,
    out: &mut impl Write,
) -> Result<()> {
    match store.purge(id, confirm)? {
        PurgeOutcome::Deleted(note) => writeln!(out, "Permanently deleted (id: {})", note.id())?,
        PurgeOutcome::Declined => writeln!(out, "Cancelled")?,
        PurgeOutcome::NotFound => return Err(UserError::NotFound(id.clone()).into()),
        PurgeOutcome::NotInTrash => return Err(UserError::NotInTrash(id.clone()).into()),
    }
    Ok(())
}

fn execute_empty_trash(
    store: &mut NoteStore,
    confirm: &mut dyn Confirm,
    out: &mut impl Write,
) -> Result<()> {
    match store.empty_trash_confirmed(confirm)? {
        EmptyTrashOutcome::Emptied(0) => writeln!(out, "Trash is already empty")?,
        EmptyTrashOutcome::Emptied(n) => writeln!(out, "Permanently deleted {n} note(s)")?,
        EmptyTrashOutcome::Declined => writeln!(out, "Cancelled")?,
    }
    Ok(())
}

/// Prints the outcome of a flag change, treating an unknown id as an error.
fn report_change(
    note: Option<Note>,
    id: NoteId,
    action: &str,
    out: &mut impl Write,
) -> Result<()> {
    let note = note.ok_or(UserError::NotFound(id))?;
    writeln!(out, "{action} (id: {})", note.id())?;
    Ok(())
}

fn write_note_line(note: &Note, out: &mut impl Write) -> Result<()> {
    write!(out, "[{}] {}", note.id(), note.title())?;
    if !note.tags().is_empty() {
        write!(out, "  {}", format_tags(note))?;
    }
    let flags = format_flags(note);
    if !flags.is_empty() {
        write!(out, "  ({flags})")?;
    }
    writeln!(out, "  {}", format_date(note.updated_at()))?;
    Ok(())
}

fn format_tags(note: &Note) -> String {
    note.tags()
        .iter()
        .map(|tag| format!("#{tag}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_flags(note: &Note) -> String {
    let mut flags = Vec::new();
    if note.is_pinned() {
        flags.push("pinned");
    }
    if note.is_archived() {
        flags.push("archived");
    }
    if note.is_deleted() {
        flags.push("trashed");
    }
    flags.join(", ")
}

fn format_date(at: time::OffsetDateTime) -> String {
    at.format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
        .unwrap_or_else(|_| at.to_string())
}

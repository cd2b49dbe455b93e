use std::time::Duration;

use anyhow::Result;
use notes_store::{LoadError, Note, NoteColor, SessionRegistry, StorageHandle};
use tempfile::TempDir;

fn handle_in(dir: &TempDir, name: &str) -> StorageHandle {
    StorageHandle::new(dir.path().join(name))
}

#[tokio::test]
async fn registry_counts_live_sessions() -> Result<()> {
    let dir = TempDir::new()?;
    let registry = SessionRegistry::new();
    assert_eq!(registry.live_count(), 0);

    let first = registry.open_session(handle_in(&dir, "a.json"));
    let second = registry.open_session(handle_in(&dir, "b.json"));
    assert_eq!(registry.live_count(), 2);

    drop(first);
    assert_eq!(registry.live_count(), 1);
    drop(second);
    assert_eq!(registry.live_count(), 0);
    Ok(())
}

#[tokio::test]
async fn all_closed_resolves_when_last_session_drops() -> Result<()> {
    let dir = TempDir::new()?;
    let registry = SessionRegistry::new();
    let session = registry.open_session(handle_in(&dir, "a.json"));

    let waiter = tokio::spawn({
        let registry = registry.clone();
        async move { registry.all_closed().await }
    });

    drop(session);
    tokio::time::timeout(Duration::from_secs(1), waiter).await??;
    Ok(())
}

#[tokio::test]
async fn edits_track_changes_until_saved() -> Result<()> {
    let dir = TempDir::new()?;
    let registry = SessionRegistry::new();
    let mut session = registry.open_session(handle_in(&dir, "note.json"));
    assert!(!session.is_changed());

    // setting the value already presented is not a change
    session.set_text("");
    session.set_color(NoteColor::LightYellow);
    assert!(!session.is_changed());

    session.set_text("groceries");
    session.set_color(NoteColor::LightGreen);
    assert!(session.is_changed());

    session.try_save().await?;
    assert!(!session.is_changed());
    Ok(())
}

#[tokio::test]
async fn closing_saves_pending_edits() -> Result<()> {
    let dir = TempDir::new()?;
    let registry = SessionRegistry::new();
    let handle = handle_in(&dir, "note.json");

    let mut session = registry.open_session(handle.clone());
    session.set_text("remember this");
    session.try_close().await?;

    assert_eq!(registry.live_count(), 0);
    assert_eq!(handle.try_load().await?.get_text(), "remember this");
    Ok(())
}

#[tokio::test]
async fn reloading_drops_unsaved_edits() -> Result<()> {
    let dir = TempDir::new()?;
    let registry = SessionRegistry::new();
    let handle = handle_in(&dir, "note.json");
    let saved = Note::new("saved text").with_color(NoteColor::LightRed);
    handle.try_save(&saved).await?;

    let mut session = registry.open_session_with(handle, saved.clone());
    session.set_text("abandoned edit");
    session.try_reload().await?;

    assert_eq!(session.get_note(), &saved);
    assert!(!session.is_changed());
    Ok(())
}

#[tokio::test]
async fn deleting_removes_storage_and_closes_the_session() -> Result<()> {
    let dir = TempDir::new()?;
    let registry = SessionRegistry::new();
    let handle = handle_in(&dir, "note.json");

    let mut session = registry.open_session(handle.clone());
    session.set_text("to be deleted");
    session.try_save().await?;

    session.try_delete().await?;
    assert_eq!(registry.live_count(), 0);
    assert!(matches!(
        handle.try_load().await,
        Err(LoadError::NotFound(_))
    ));
    Ok(())
}

#[tokio::test]
async fn two_sessions_own_distinct_notes() -> Result<()> {
    let dir = TempDir::new()?;
    let registry = SessionRegistry::new();

    let mut first = registry.open_session(handle_in(&dir, "a.json"));
    let mut second = registry.open_session(handle_in(&dir, "b.json"));
    first.set_text("first note");
    second.set_text("second note");
    first.try_save().await?;
    second.try_save().await?;

    assert_eq!(
        handle_in(&dir, "a.json").try_load().await?.get_text(),
        "first note"
    );
    assert_eq!(
        handle_in(&dir, "b.json").try_load().await?.get_text(),
        "second note"
    );
    Ok(())
}

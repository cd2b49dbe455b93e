// SPDX-License-Identifier: MPL-2.0

use std::sync::Arc;

use tokio::sync::watch;
use uuid::Uuid;

use crate::{
    color::NoteColor,
    note::Note,
    storage::{DeleteError, LoadError, SaveError, StorageHandle},
};

/// Tracks live note sessions so the hosting process can decide when to
/// terminate, instead of counting windows in a process-wide static.
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    count: Arc<watch::Sender<usize>>,
}

impl SessionRegistry {
    #[must_use]
    pub fn new() -> Self {
        let (count, _) = watch::channel(0);
        Self {
            count: Arc::new(count),
        }
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        *self.count.borrow()
    }

    /// Resolves once no session is left open.
    pub async fn all_closed(&self) {
        let mut live = self.count.subscribe();
        // cannot fail, the registry itself keeps the sender side alive
        let _ = live.wait_for(|count| *count == 0).await;
    }

    /// Open a session presenting a fresh note at `handle`.
    #[must_use]
    pub fn open_session(&self, handle: StorageHandle) -> Session {
        self.open_session_with(handle, Note::default())
    }

    /// Open a session presenting an already loaded note.
    #[must_use]
    pub fn open_session_with(&self, handle: StorageHandle, note: Note) -> Session {
        self.count.send_modify(|count| *count += 1);
        let session = Session {
            id: Uuid::new_v4(),
            handle,
            note,
            is_dirty: false,
            registry: self.clone(),
        };
        tracing::debug!(
            session = %session.id,
            path = %session.handle.get_path().display(),
            "session opened"
        );
        session
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// One live editing session: exclusive owner of a note and of the location
/// its persisted form lives at.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    handle: StorageHandle,
    note: Note,
    is_dirty: bool,
    registry: SessionRegistry,
}

impl Session {
    #[must_use]
    pub fn get_id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn get_handle(&self) -> &StorageHandle {
        &self.handle
    }

    #[must_use]
    pub fn get_note(&self) -> &Note {
        &self.note
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.note.get_text() != text {
            self.note = self.note.with_text(text);
            self.is_dirty = true;
        }
    }

    pub fn set_color(&mut self, color: NoteColor) {
        if self.note.get_color() != color {
            self.note = self.note.with_color(color);
            self.is_dirty = true;
        }
    }

    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.is_dirty
    }

    pub async fn try_save(&mut self) -> Result<(), SaveError> {
        self.handle.try_save(&self.note).await?;
        self.is_dirty = false;
        tracing::info!(session = %self.id, "note saved");
        Ok(())
    }

    /// Replace the presented note with whatever is currently saved,
    /// dropping unsaved edits.
    pub async fn try_reload(&mut self) -> Result<(), LoadError> {
        self.note = self.handle.try_load().await?;
        self.is_dirty = false;
        Ok(())
    }

    /// Remove the persisted note and close the session.
    pub async fn try_delete(self) -> Result<(), DeleteError> {
        self.handle.try_delete().await?;
        tracing::info!(session = %self.id, "note deleted");
        Ok(())
    }

    /// Close the session, saving pending changes first.
    pub async fn try_close(mut self) -> Result<(), SaveError> {
        if self.is_dirty {
            self.try_save().await?;
        } else {
            tracing::debug!(session = %self.id, "note unchanged, skip saving");
        }
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.registry.count.send_modify(|count| *count -= 1);
        tracing::debug!(session = %self.id, "session closed");
    }
}

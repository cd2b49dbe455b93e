use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

use crate::storage::{LoadError, StorageHandle, StoredNote};

const NOTE_FILE_EXT: &str = "json";

#[derive(Debug, Error)]
pub enum StoreError {
    // Failed reading the notes directory
    #[error("Failed reading notes directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed loading note {0}: {1}")]
    Note(Uuid, LoadError),
}

/// Directory of saved notes, one file per note keyed by its id.
#[derive(Debug, Clone)]
pub struct NoteStore {
    root: PathBuf,
}

impl NoteStore {
    pub async fn try_open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    #[must_use]
    pub fn get_root(&self) -> &Path {
        self.root.as_path()
    }

    /// Location of the note with the given id, whether saved yet or not.
    #[must_use]
    pub fn handle(&self, note_id: Uuid) -> StorageHandle {
        let mut path = self.root.join(note_id.to_string());
        path.set_extension(NOTE_FILE_EXT);
        StorageHandle::new(path)
    }

    /// Mint a location for a brand new note.
    #[must_use]
    pub fn new_handle(&self) -> (Uuid, StorageHandle) {
        let id = Uuid::new_v4();
        (id, self.handle(id))
    }

    /// Enumerate saved notes, newest first. Lock sidecars and foreign files
    /// are skipped; a note that fails to load names the failing entry.
    pub async fn try_list(&self) -> Result<Vec<(Uuid, StoredNote)>, StoreError> {
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        let mut notes = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(NOTE_FILE_EXT) {
                continue;
            }
            let Some(id) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| Uuid::parse_str(stem).ok())
            else {
                continue;
            };
            let stored = self
                .handle(id)
                .try_load_stored()
                .await
                .map_err(|e| StoreError::Note(id, e))?;
            notes.push((id, stored));
        }
        notes.sort_by(|(_, a), (_, b)| b.get_modified().cmp(&a.get_modified()));
        Ok(notes)
    }
}

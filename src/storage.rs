use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local, Utc};
use thiserror::Error;

use crate::{color::NoteColor, note::Note};
use lock::{LockError, LockGuard};

mod lock;

#[derive(Debug, Error)]
pub enum SaveError {
    // Failed writing the note file
    #[error("Failed writing note: {0}")]
    Io(#[from] std::io::Error),
    // Failed serializing note content
    #[error("Failed serializing note: {0}")]
    Json(serde_json::Error),
    // Another session is operating on the same location
    #[error("Note at {} is in use by another session", .0.display())]
    Conflict(PathBuf),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("No note was saved at {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed reading note: {0}")]
    Io(std::io::Error),
    // Stored representation does not parse back into a note
    #[error("Failed parsing stored note: {0}")]
    Corrupt(serde_json::Error),
    #[error("Note at {} is in use by another session", .0.display())]
    Conflict(PathBuf),
}

#[derive(Debug, Error)]
pub enum DeleteError {
    #[error("No note was saved at {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed removing note: {0}")]
    Io(std::io::Error),
    #[error("Note at {} is in use by another session", .0.display())]
    Conflict(PathBuf),
}

/// Stable reference to where one note's persisted form lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageHandle {
    path: PathBuf,
}

#[allow(clippy::missing_errors_doc)]
impl StorageHandle {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn get_path(&self) -> &Path {
        self.path.as_path()
    }

    /// Sidecar file held for the duration of every save/load/delete on this
    /// location. While it exists, competing operations fail with `Conflict`.
    #[must_use]
    pub fn get_lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".lock");
        PathBuf::from(name)
    }

    /// Persist the note at this location, overwriting any prior content.
    pub async fn try_save(&self, note: &Note) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let _guard = match LockGuard::try_acquire(self.get_lock_path()) {
            Ok(guard) => guard,
            Err(LockError::Held) => return Err(SaveError::Conflict(self.path.clone())),
            Err(LockError::Io(e)) => return Err(SaveError::Io(e)),
        };
        let stored = StoredNote {
            text: note.get_text().to_string(),
            color: note.get_color(),
            modified: Utc::now(),
        };
        let content = serde_json_fmt::JsonFormat::pretty()
            .ascii(true)
            .format_to_string(&stored)
            .map_err(SaveError::Json)?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }

    /// Reconstruct the note from a prior save at this location.
    pub async fn try_load(&self) -> Result<Note, LoadError> {
        self.try_load_stored().await.map(|stored| stored.get_note())
    }

    /// As [`try_load`](Self::try_load), keeping the storage metadata.
    pub async fn try_load_stored(&self) -> Result<StoredNote, LoadError> {
        let _guard = match LockGuard::try_acquire(self.get_lock_path()) {
            Ok(guard) => guard,
            Err(LockError::Held) => return Err(LoadError::Conflict(self.path.clone())),
            // a missing parent directory means nothing was ever saved here
            Err(LockError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                return Err(LoadError::NotFound(self.path.clone()));
            }
            Err(LockError::Io(e)) => return Err(LoadError::Io(e)),
        };
        let content = tokio::fs::read(&self.path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                LoadError::NotFound(self.path.clone())
            } else {
                LoadError::Io(e)
            }
        })?;
        serde_json::from_slice(&content).map_err(LoadError::Corrupt)
    }

    /// Remove the persisted note at this location.
    pub async fn try_delete(&self) -> Result<(), DeleteError> {
        let _guard = match LockGuard::try_acquire(self.get_lock_path()) {
            Ok(guard) => guard,
            Err(LockError::Held) => return Err(DeleteError::Conflict(self.path.clone())),
            Err(LockError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                return Err(DeleteError::NotFound(self.path.clone()));
            }
            Err(LockError::Io(e)) => return Err(DeleteError::Io(e)),
        };
        tokio::fs::remove_file(&self.path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                DeleteError::NotFound(self.path.clone())
            } else {
                DeleteError::Io(e)
            }
        })
    }
}

/// On-disk document: the note fields plus a timestamp stamped at save time.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
pub struct StoredNote {
    text: String,
    color: NoteColor,
    modified: DateTime<Utc>,
}

impl StoredNote {
    #[must_use]
    pub fn get_note(&self) -> Note {
        Note::from_parts(self.text.clone(), self.color)
    }

    #[must_use]
    pub fn get_modified(&self) -> DateTime<Local> {
        self.modified.into()
    }
}

use crate::error::{Result, VectorStoreError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Reject note ids that could escape the notes directory or collide
/// with artifact naming.
pub fn validate_note_id(note_id: &str) -> Result<()> {
    let valid = !note_id.is_empty()
        && note_id != "."
        && note_id != ".."
        && !note_id.chars().any(|c| matches!(c, '/' | '\\') || c.is_control());
    if valid {
        Ok(())
    } else {
        Err(VectorStoreError::InvalidNoteId(note_id.to_string()))
    }
}

/// Boundary to note storage.
///
/// The core only ever speaks logical note ids and text payloads; file
/// paths are an implementation detail of the store.
#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn read(&self, note_id: &str) -> Result<String>;
    async fn write(&self, note_id: &str, text: &str) -> Result<()>;
    async fn exists(&self, note_id: &str) -> bool;
    /// All known note ids, sorted. The sort order doubles as the stable
    /// tie-break order of ranking.
    async fn list_ids(&self) -> Result<Vec<String>>;
    /// Delete a note; reports whether it existed.
    async fn remove(&self, note_id: &str) -> Result<bool>;
}

/// Filesystem-backed note store: one `<note_id>.txt` per note in a
/// flat directory.
#[derive(Debug, Clone)]
pub struct FsNoteStore {
    dir: PathBuf,
}

impl FsNoteStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn note_path(&self, note_id: &str) -> PathBuf {
        self.dir.join(format!("{note_id}.txt"))
    }
}

#[async_trait]
impl NoteStore for FsNoteStore {
    async fn read(&self, note_id: &str) -> Result<String> {
        validate_note_id(note_id)?;
        match tokio::fs::read_to_string(self.note_path(note_id)).await {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(VectorStoreError::NoteMissing(note_id.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn write(&self, note_id: &str, text: &str) -> Result<()> {
        validate_note_id(note_id)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.note_path(note_id);
        let tmp = path.with_extension("txt.tmp");
        tokio::fs::write(&tmp, text).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn exists(&self, note_id: &str) -> bool {
        validate_note_id(note_id).is_ok() && self.note_path(note_id).exists()
    }

    async fn list_ids(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(ids),
            Err(err) => return Err(err.into()),
        };
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("txt") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }

    async fn remove(&self, note_id: &str) -> Result<bool> {
        validate_note_id(note_id)?;
        match tokio::fs::remove_file(self.note_path(note_id)).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

use crate::error::Result;
use crate::notes::validate_note_id;
use std::path::{Path, PathBuf};

/// Magic prefix of persisted vector artifacts.
pub const VECTOR_ARTIFACT_MAGIC: &[u8; 4] = b"NV01";

/// Which of a note's vector artifacts a path addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorKind {
    /// Externally supplied dense contextual embedding.
    Dense,
    /// Random-Indexing vector of the Latin-script bucket.
    RiLatin,
    /// Random-Indexing vector of the other-script bucket.
    RiOther,
}

impl VectorKind {
    const ALL: [Self; 3] = [Self::Dense, Self::RiLatin, Self::RiOther];

    fn suffix(self) -> &'static str {
        match self {
            Self::Dense => "dense",
            Self::RiLatin => "ri_latin",
            Self::RiOther => "ri_other",
        }
    }
}

/// Per-note vector files under an embeddings directory.
///
/// Artifacts are addressed by logical note id, one file per
/// (note, kind). Format: 4-byte magic, u32 LE dimension, f32 LE
/// payload. Writes are atomic (tmp + rename); reads of absent or
/// undecodable files yield `None`, which retrieval treats as "not yet
/// indexed".
#[derive(Debug, Clone)]
pub struct VectorArtifactStore {
    base_dir: PathBuf,
}

impl VectorArtifactStore {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self, note_id: &str, kind: VectorKind) -> PathBuf {
        self.base_dir
            .join(format!("{note_id}.{}.vec", kind.suffix()))
    }

    pub async fn put(&self, note_id: &str, kind: VectorKind, vector: &[f32]) -> Result<()> {
        validate_note_id(note_id)?;
        let path = self.path(note_id, kind);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = encode_vector(vector);
        let tmp = path.with_extension("vec.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Load one artifact; `None` when absent or undecodable.
    pub async fn get(
        &self,
        note_id: &str,
        kind: VectorKind,
        expected_dimension: usize,
    ) -> Option<Vec<f32>> {
        if validate_note_id(note_id).is_err() {
            return None;
        }
        let path = self.path(note_id, kind);
        let bytes = tokio::fs::read(&path).await.ok()?;
        let decoded = decode_vector(&bytes, expected_dimension);
        if decoded.is_none() {
            log::debug!("Undecodable vector artifact at {path:?}, skipping");
        }
        decoded
    }

    /// Delete one artifact if present.
    pub async fn remove(&self, note_id: &str, kind: VectorKind) -> Result<bool> {
        validate_note_id(note_id)?;
        match tokio::fs::remove_file(self.path(note_id, kind)).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    /// Delete every artifact of a note; reports whether any existed.
    pub async fn remove_all(&self, note_id: &str) -> Result<bool> {
        let mut removed = false;
        for kind in VectorKind::ALL {
            removed |= self.remove(note_id, kind).await?;
        }
        Ok(removed)
    }

    /// Note ids with at least one artifact on disk, sorted.
    ///
    /// Vocabulary snapshots and stray files are ignored. Used by the
    /// consistency report to find artifacts whose note is gone.
    pub async fn list_note_ids(&self) -> Result<Vec<String>> {
        let mut ids = std::collections::BTreeSet::new();
        let mut entries = match tokio::fs::read_dir(&self.base_dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            for kind in VectorKind::ALL {
                let suffix = format!(".{}.vec", kind.suffix());
                if let Some(id) = name.strip_suffix(&suffix) {
                    ids.insert(id.to_string());
                    break;
                }
            }
        }
        Ok(ids.into_iter().collect())
    }

    /// Whether a note has the artifacts retrieval needs: the dense
    /// embedding plus at least one language bucket.
    pub async fn is_indexed(&self, note_id: &str) -> bool {
        if validate_note_id(note_id).is_err() {
            return false;
        }
        let dense = self.path(note_id, VectorKind::Dense);
        if !dense.exists() {
            return false;
        }
        self.path(note_id, VectorKind::RiLatin).exists()
            || self.path(note_id, VectorKind::RiOther).exists()
    }
}

fn encode_vector(vector: &[f32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 + vector.len() * 4);
    out.extend_from_slice(VECTOR_ARTIFACT_MAGIC);
    #[allow(clippy::cast_possible_truncation)]
    let dim = vector.len() as u32;
    out.extend_from_slice(&dim.to_le_bytes());
    for v in vector {
        out.extend_from_slice(&v.to_le_bytes());
    }
    out
}

fn decode_vector(bytes: &[u8], expected_dimension: usize) -> Option<Vec<f32>> {
    if bytes.len() < 8 || &bytes[0..4] != VECTOR_ARTIFACT_MAGIC {
        return None;
    }
    let dim = u32::from_le_bytes(bytes[4..8].try_into().ok()?) as usize;
    if dim != expected_dimension {
        return None;
    }
    let expected_len = 8usize.saturating_add(dim.saturating_mul(4));
    if bytes.len() != expected_len {
        return None;
    }
    let mut vector = Vec::with_capacity(dim);
    for i in 0..dim {
        let start = 8 + i * 4;
        let end = start + 4;
        let val = f32::from_le_bytes(bytes[start..end].try_into().ok()?);
        vector.push(val);
    }
    Some(vector)
}

use serde::{Deserialize, Serialize};

/// One ranked retrieval hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredNote {
    pub note_id: String,
    pub score: f32,
    pub content: String,
}

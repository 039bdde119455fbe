use serde::{Deserialize, Serialize};

/// Statistics of one note-indexing operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexStats {
    /// Tokens routed to the Latin-script bucket.
    pub tokens_latin: usize,

    /// Tokens routed to the other-script bucket.
    pub tokens_other: usize,

    /// Words first seen by the Latin vocabulary during this operation.
    pub new_words_latin: usize,

    /// Words first seen by the other vocabulary during this operation.
    pub new_words_other: usize,

    /// Time taken in milliseconds.
    pub time_ms: u64,
}

impl IndexStats {
    pub fn token_count(&self) -> usize {
        self.tokens_latin + self.tokens_other
    }

    pub fn new_word_count(&self) -> usize {
        self.new_words_latin + self.new_words_other
    }
}

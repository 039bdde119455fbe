use serde::{Deserialize, Serialize};

/// Script bucket a token is routed to.
///
/// `Latin` covers pure-ASCII tokens; everything else (including
/// mixed-script tokens) lands in `Other`. Telugu text always falls in
/// `Other`, but so does any token carrying a single non-ASCII character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Script {
    Latin,
    Other,
}

impl Script {
    /// Classify one token by code-point range.
    pub fn of(token: &str) -> Self {
        if token.chars().all(|c| (c as u32) < 128) {
            Self::Latin
        } else {
            Self::Other
        }
    }
}

/// Token stream split into two script buckets.
///
/// Latin tokens are case-folded; `Other` tokens are left unmodified
/// (case folding is meaningless for the scripts that land there).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub latin: Vec<String>,
    pub other: Vec<String>,
}

impl Partition {
    pub fn is_empty(&self) -> bool {
        self.latin.is_empty() && self.other.is_empty()
    }

    pub fn token_count(&self) -> usize {
        self.latin.len() + self.other.len()
    }
}

/// Partition tokens into script buckets.
///
/// Every token lands in exactly one bucket; there is no error path.
pub fn partition<'a, I>(tokens: I) -> Partition
where
    I: IntoIterator<Item = &'a str>,
{
    let mut split = Partition::default();
    for token in tokens {
        match Script::of(token) {
            Script::Latin => split.latin.push(token.to_lowercase()),
            Script::Other => split.other.push(token.to_string()),
        }
    }
    split
}

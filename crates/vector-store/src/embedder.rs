use crate::error::Result;
use async_trait::async_trait;

/// Dimensionality of the default dense provider (a multilingual
/// transformer encoder's pooled output).
pub const DEFAULT_DENSE_DIMENSION: usize = 768;

/// Boundary to the external dense contextual embedding provider.
///
/// The core treats the provider as an opaque black box: it only
/// consumes the output vector and its dimensionality. Implementations
/// must be deterministic for the same text and model version and define
/// their own timeout contract; nothing inside the core blocks on them.
#[async_trait]
pub trait DenseEmbedder: Send + Sync {
    /// Embed one text into a fixed-length, L2-normalized vector.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Fixed output dimensionality.
    fn dimension(&self) -> usize;
}

/// Deterministic hashed embedder.
///
/// Maps a text to a unit vector derived from an FNV-1a hash expanded
/// through splitmix64. Carries no semantics beyond exact-text identity,
/// which is exactly what the in-repo provider needs: the semantic dense
/// signal comes from an external encoder dropped in behind
/// [`DenseEmbedder`].
pub struct StubEmbedder {
    dimension: usize,
}

impl StubEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

impl Default for StubEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DENSE_DIMENSION)
    }
}

#[async_trait]
impl DenseEmbedder for StubEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(hashed_unit_vector(text, self.dimension))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

fn hashed_unit_vector(text: &str, dimension: usize) -> Vec<f32> {
    let mut state =
        fnv1a_64(text.as_bytes()) ^ (dimension as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let mut vec = Vec::with_capacity(dimension);
    for _ in 0..dimension {
        let bits = splitmix64(&mut state);
        let high = (bits >> 32) as u32;
        let mantissa = high >> 9;
        let unit = f32::from_bits(0x3f80_0000 | mantissa) - 1.0;
        vec.push(unit.mul_add(2.0, -1.0));
    }
    let norm = vec.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in &mut vec {
            *value /= norm;
        }
    }
    vec
}

fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

const fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn embedding_is_deterministic() {
        let embedder = StubEmbedder::new(64);
        let a = embedder.embed("college lo classes").await.unwrap();
        let b = embedder.embed("college lo classes").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[tokio::test]
    async fn different_texts_embed_differently() {
        let embedder = StubEmbedder::new(64);
        let a = embedder.embed("office work").await.unwrap();
        let b = embedder.embed("office works").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn embedding_is_unit_norm() {
        let embedder = StubEmbedder::default();
        let v = embedder.embed("నేను కాలేజీకి వెళ్లాను").await.unwrap();
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
        assert_eq!(v.len(), DEFAULT_DENSE_DIMENSION);
    }
}

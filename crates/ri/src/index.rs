use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Sparse ternary signature of one accumulation event.
///
/// Exactly `nonzeros` distinct positions, each carrying +1 or -1.
/// Never persisted: the note-indexing path draws a fresh one per event,
/// the prediction trainer one per vocabulary word. Independent draws
/// are quasi-orthogonal in high dimension, which lets accumulation
/// approximate a random projection of the co-occurrence space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexVector {
    pairs: Vec<(u32, i8)>,
}

impl IndexVector {
    /// (position, sign) pairs; positions are distinct, signs are ±1.
    pub fn pairs(&self) -> &[(u32, i8)] {
        &self.pairs
    }

    pub fn nonzeros(&self) -> usize {
        self.pairs.len()
    }

    /// Circularly shift every position by `steps` modulo `dimension`.
    ///
    /// Rotation encodes relative direction in sliding-window training:
    /// a rotated copy stays quasi-orthogonal to the original, so left
    /// and right co-occurrence land in distinguishable subspaces.
    pub fn rotated(&self, steps: isize, dimension: usize) -> IndexVector {
        let dim = dimension as isize;
        let pairs = self
            .pairs
            .iter()
            .map(|&(position, sign)| {
                let shifted = (position as isize + steps).rem_euclid(dim);
                (shifted as u32, sign)
            })
            .collect();
        IndexVector { pairs }
    }
}

/// Draws sparse index vectors for a fixed (dimension, nonzeros) space.
///
/// Production use seeds from entropy, so repeated calls are independent
/// random draws. Tests may inject a seed for reproducibility.
pub struct SparseIndexGenerator {
    dimension: usize,
    nonzeros: usize,
    rng: StdRng,
}

impl SparseIndexGenerator {
    /// Entropy-seeded generator.
    ///
    /// `nonzeros` must not exceed `dimension`; distinct positions would
    /// be impossible otherwise.
    pub fn new(dimension: usize, nonzeros: usize) -> Self {
        assert!(
            nonzeros <= dimension,
            "nonzeros ({nonzeros}) must not exceed dimension ({dimension})"
        );
        Self {
            dimension,
            nonzeros,
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded generator for reproducible tests.
    pub fn with_seed(dimension: usize, nonzeros: usize, seed: u64) -> Self {
        assert!(
            nonzeros <= dimension,
            "nonzeros ({nonzeros}) must not exceed dimension ({dimension})"
        );
        Self {
            dimension,
            nonzeros,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Draw one index vector: `nonzeros` positions uniformly without
    /// replacement, signs ±1 with equal probability.
    pub fn generate(&mut self) -> IndexVector {
        let mut pairs = Vec::with_capacity(self.nonzeros);
        let mut taken = std::collections::HashSet::with_capacity(self.nonzeros);
        while pairs.len() < self.nonzeros {
            let position = self.rng.gen_range(0..self.dimension) as u32;
            if !taken.insert(position) {
                continue;
            }
            let sign: i8 = if self.rng.gen_bool(0.5) { 1 } else { -1 };
            pairs.push((position, sign));
        }
        IndexVector { pairs }
    }
}

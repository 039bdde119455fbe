/// Frequency damping weight: `1 / (1 + delta * (freq - 1) / vocab_size)`.
///
/// A word's first occurrence carries the neutral weight 1.0; repeat
/// occurrences are damped monotonically, bounded in (0, 1], with `delta`
/// controlling how sharply over-common words are suppressed relative to
/// the vocabulary size. An empty vocabulary is also neutral.
///
/// The same curve damps a word's contribution into its own accumulator
/// at indexing time and frequent-word dominance in next-word scoring.
pub fn frequency_weight(frequency: u64, vocab_size: usize, delta: f32) -> f32 {
    if vocab_size == 0 {
        return 1.0;
    }
    let excess = frequency.saturating_sub(1) as f32;
    1.0 / (1.0 + delta * excess / vocab_size as f32)
}

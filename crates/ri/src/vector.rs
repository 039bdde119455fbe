/// L2 norm of a dense vector.
pub fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Normalize to unit length in place.
///
/// A zero-norm vector is left untouched: a document or query with no
/// recognized words stays the zero vector instead of raising.
pub fn l2_normalize(v: &mut [f32]) {
    let norm = l2_norm(v);
    if norm > 0.0 {
        for value in v {
            *value /= norm;
        }
    }
}

/// Cosine similarity; 0.0 when either operand has zero norm.
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = l2_norm(a);
    let norm_b = l2_norm(b);
    if norm_a > 0.0 && norm_b > 0.0 {
        dot / (norm_a * norm_b)
    } else {
        0.0
    }
}

/// Element-wise `acc += v`.
pub fn add_assign(acc: &mut [f32], v: &[f32]) {
    for (a, b) in acc.iter_mut().zip(v.iter()) {
        *a += b;
    }
}

/// Scale in place.
pub fn scale(v: &mut [f32], factor: f32) {
    for value in v {
        *value *= factor;
    }
}

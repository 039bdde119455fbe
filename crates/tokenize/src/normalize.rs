/// Normalize raw user input before tokenization.
///
/// Trims, collapses runs of whitespace to single spaces, and strips
/// control characters. Applied to note bodies and queries alike so the
/// indexing and retrieval paths see identical token streams.
pub fn normalize_input(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if ch.is_control() {
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(ch);
    }
    out
}

/// Split normalized text into whitespace-delimited tokens.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

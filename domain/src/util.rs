//! Shared utility functions.

/// Longest prefix of `s` that fits in `max_bytes` without splitting a
/// character.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Single-line preview for log output: newlines flattened, long text cut
/// with a note of how much was dropped.
pub fn preview(s: &str, max_bytes: usize) -> String {
    let cut = truncate_str(s, max_bytes);
    let flat = cut.replace('\n', " ");
    if cut.len() == s.len() {
        flat
    } else {
        format!("{}... (+{} bytes)", flat, s.len() - cut.len())
    }
}

//! Fixed-width, null-terminated string fields.
//!
//! Skin paths (64 bytes) and frame names (16 bytes) share this encoding: the
//! UTF-8 bytes, cut to `width - 1` at a char boundary, then zero padded.

/// Longest prefix of `s` that fits in `max_bytes` without splitting a char.
pub fn truncate_utf8(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Append `s` as a `width`-byte field. The last byte is always zero.
pub fn write_fixed_string(buf: &mut Vec<u8>, s: &str, width: usize) {
    debug_assert!(width > 0);
    let text = truncate_utf8(s, width - 1);
    buf.extend_from_slice(text.as_bytes());
    buf.resize(buf.len() + width - text.len(), 0);
}

/// Encode `s` into a `N`-byte field.
pub fn fixed_string<const N: usize>(s: &str) -> [u8; N] {
    let mut field = [0u8; N];
    let text = truncate_utf8(s, N.saturating_sub(1));
    field[..text.len()].copy_from_slice(text.as_bytes());
    field
}

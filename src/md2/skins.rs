//! The skin name table.

use super::fixed_string::write_fixed_string;

/// Width of a skin path field, terminator included.
pub const SKIN_NAME_SIZE: usize = 64;
/// Longest path stored without reduction to its file name.
pub const MAX_SKIN_PATH: usize = SKIN_NAME_SIZE - 1;

/// Final path component, splitting on both `/` and `\`.
pub fn basename(path: &str) -> &str {
    path.rsplit(|c| c == '/' || c == '\\').next().unwrap_or(path)
}

/// Path as it will be stored in the skin table.
///
/// Paths longer than 63 bytes lose their directories, as do all paths when
/// `basename_only` is set.
pub fn skin_name(path: &str, basename_only: bool) -> &str {
    let too_long = path.len() > MAX_SKIN_PATH;
    if too_long && !basename_only {
        tracing::warn!(
            "Texture path '{}' is too long ({} bytes); truncating to its file name",
            path,
            path.len()
        );
    }
    if too_long || basename_only {
        basename(path)
    } else {
        path
    }
}

/// Append one 64-byte field per skin.
pub fn encode_skins<S: AsRef<str>>(buf: &mut Vec<u8>, skins: &[S], basename_only: bool) {
    for skin in skins {
        write_fixed_string(buf, skin_name(skin.as_ref(), basename_only), SKIN_NAME_SIZE);
    }
}

//! The GL command list.
//!
//! Each triangle becomes its own 3-vertex strip: the count `3`, then three
//! `(s, t, vertex_index)` records. A single zero ends the list. No strip or
//! fan batching is attempted.

use super::geometry::CORNER_ORDER;
use crate::scene::Mesh;

/// Count word for one triangle. Readers treat positive counts as strips
/// and negative ones as fans.
pub const GL_TRIANGLE: i32 = 3;

/// 4-byte words per triangle: the count plus three 3-word records.
pub const GL_WORDS_PER_TRIANGLE: usize = 1 + 3 * 3;

/// Bytes per GL command word.
pub const GL_COMMAND_SIZE: usize = 4;

/// Number of words written for `num_tris` triangles, terminator included.
pub fn command_count(num_tris: usize) -> usize {
    num_tris * GL_WORDS_PER_TRIANGLE + 1
}

/// Append the command list for all meshes and its terminator.
///
/// Texture coordinates are raw floats with `t = 1 - v`. Vertex indices are
/// shifted by the vertex count of earlier meshes.
pub fn encode_gl_commands(buf: &mut Vec<u8>, meshes: &[Mesh]) {
    let mut vertex_base = 0u32;

    for mesh in meshes {
        for tri in &mesh.triangles {
            buf.extend_from_slice(&GL_TRIANGLE.to_le_bytes());
            for corner in CORNER_ORDER {
                let uv = tri.uv(corner);
                buf.extend_from_slice(&uv[0].to_le_bytes());
                buf.extend_from_slice(&(1.0 - uv[1]).to_le_bytes());
                buf.extend_from_slice(&(vertex_base + tri.vertices[corner]).to_le_bytes());
            }
        }
        vertex_base += mesh.vertex_count() as u32;
    }

    buf.extend_from_slice(&0i32.to_le_bytes());
}

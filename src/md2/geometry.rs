//! Texture coordinate and triangle sections.

use crate::scene::Mesh;

/// Skin size the texture coordinates are scaled to.
pub const SKIN_WIDTH: i32 = 1023;
pub const SKIN_HEIGHT: i32 = 1023;

/// Bytes per texture coordinate record.
pub const TEXCOORD_SIZE: usize = 4;
/// Bytes per triangle record.
pub const TRIANGLE_SIZE: usize = 12;

/// Corner order written for every triangle. Reverses the winding, and with
/// it the face normal, to match the engine's front-face rule.
pub const CORNER_ORDER: [usize; 3] = [0, 2, 1];

/// Scale a UV (top-left origin) to skin pixels with a bottom-left origin.
pub fn texcoord(uv: [f32; 2]) -> [i16; 2] {
    let s = (uv[0] as f64 * SKIN_WIDTH as f64).floor();
    let t = ((1.0 - uv[1] as f64) * SKIN_HEIGHT as f64).floor();
    [to_i16(s), to_i16(t)]
}

fn to_i16(v: f64) -> i16 {
    // NaN casts to 0.
    v.clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

/// Append one record per triangle corner, in input corner order.
///
/// Corners are not shared between triangles: the UV index of corner `c` of
/// triangle `t` is `t * 3 + c`.
pub fn encode_texcoords(buf: &mut Vec<u8>, mesh: &Mesh) {
    for tri in &mesh.triangles {
        for corner in 0..3 {
            let [s, t] = texcoord(tri.uv(corner));
            buf.extend_from_slice(&s.to_le_bytes());
            buf.extend_from_slice(&t.to_le_bytes());
        }
    }
}

/// Append the triangle records of all meshes.
///
/// Vertex indices are shifted by the vertex count of earlier meshes and UV
/// indices by three times their triangle count. Counts must already be
/// checked against the format limits.
pub fn encode_triangles(buf: &mut Vec<u8>, meshes: &[Mesh]) {
    let mut vertex_base = 0usize;
    let mut triangle_base = 0usize;

    for mesh in meshes {
        for (ordinal, tri) in mesh.triangles.iter().enumerate() {
            for corner in CORNER_ORDER {
                let index = vertex_base + tri.vertices[corner] as usize;
                buf.extend_from_slice(&(index as u16).to_le_bytes());
            }
            for corner in CORNER_ORDER {
                let index = (triangle_base + ordinal) * 3 + corner;
                buf.extend_from_slice(&(index as u16).to_le_bytes());
            }
        }
        vertex_base += mesh.vertex_count();
        triangle_base += mesh.triangle_count();
    }
}

//! The fixed table of 162 vertex normals used by MD2 frames.
//!
//! Frames store one byte per vertex indexing into this table. Lookup is a
//! linear scan; the table is small and a scan keeps the output exact.

/// Number of entries in the normal table.
pub const NUM_NORMALS: usize = 162;

/// Pre-normalized unit vectors, in the order MD2 readers expect.
pub const MD2_NORMALS: [[f32; 3]; NUM_NORMALS] = [
    [-0.525731, 0.000000, 0.850651],
    [-0.442863, 0.238856, 0.864188],
    [-0.295242, 0.000000, 0.955423],
    [-0.309017, 0.500000, 0.809017],
    [-0.162460, 0.262866, 0.951056],
    [0.000000, 0.000000, 1.000000],
    [0.000000, 0.850651, 0.525731],
    [-0.147621, 0.716567, 0.681718],
    [0.147621, 0.716567, 0.681718],
    [0.000000, 0.525731, 0.850651],
    [0.309017, 0.500000, 0.809017],
    [0.525731, 0.000000, 0.850651],
    [0.295242, 0.000000, 0.955423],
    [0.442863, 0.238856, 0.864188],
    [0.162460, 0.262866, 0.951056],
    [-0.681718, 0.147621, 0.716567],
    [-0.809017, 0.309017, 0.500000],
    [-0.587785, 0.425325, 0.688191],
    [-0.850651, 0.525731, 0.000000],
    [-0.864188, 0.442863, 0.238856],
    [-0.716567, 0.681718, 0.147621],
    [-0.688191, 0.587785, 0.425325],
    [-0.500000, 0.809017, 0.309017],
    [-0.238856, 0.864188, 0.442863],
    [-0.425325, 0.688191, 0.587785],
    [-0.716567, 0.681718, -0.147621],
    [-0.500000, 0.809017, -0.309017],
    [-0.525731, 0.850651, 0.000000],
    [0.000000, 0.850651, -0.525731],
    [-0.238856, 0.864188, -0.442863],
    [0.000000, 0.955423, -0.295242],
    [-0.262866, 0.951056, -0.162460],
    [0.000000, 1.000000, 0.000000],
    [0.000000, 0.955423, 0.295242],
    [-0.262866, 0.951056, 0.162460],
    [0.238856, 0.864188, 0.442863],
    [0.262866, 0.951056, 0.162460],
    [0.500000, 0.809017, 0.309017],
    [0.238856, 0.864188, -0.442863],
    [0.262866, 0.951056, -0.162460],
    [0.500000, 0.809017, -0.309017],
    [0.850651, 0.525731, 0.000000],
    [0.716567, 0.681718, 0.147621],
    [0.716567, 0.681718, -0.147621],
    [0.525731, 0.850651, 0.000000],
    [0.425325, 0.688191, 0.587785],
    [0.864188, 0.442863, 0.238856],
    [0.688191, 0.587785, 0.425325],
    [0.809017, 0.309017, 0.500000],
    [0.681718, 0.147621, 0.716567],
    [0.587785, 0.425325, 0.688191],
    [0.955423, 0.295242, 0.000000],
    [1.000000, 0.000000, 0.000000],
    [0.951056, 0.162460, 0.262866],
    [0.850651, -0.525731, 0.000000],
    [0.955423, -0.295242, 0.000000],
    [0.864188, -0.442863, 0.238856],
    [0.951056, -0.162460, 0.262866],
    [0.809017, -0.309017, 0.500000],
    [0.681718, -0.147621, 0.716567],
    [0.850651, 0.000000, 0.525731],
    [0.864188, 0.442863, -0.238856],
    [0.809017, 0.309017, -0.500000],
    [0.951056, 0.162460, -0.262866],
    [0.525731, 0.000000, -0.850651],
    [0.681718, 0.147621, -0.716567],
    [0.681718, -0.147621, -0.716567],
    [0.850651, 0.000000, -0.525731],
    [0.809017, -0.309017, -0.500000],
    [0.864188, -0.442863, -0.238856],
    [0.951056, -0.162460, -0.262866],
    [0.147621, 0.716567, -0.681718],
    [0.309017, 0.500000, -0.809017],
    [0.425325, 0.688191, -0.587785],
    [0.442863, 0.238856, -0.864188],
    [0.587785, 0.425325, -0.688191],
    [0.688191, 0.587785, -0.425325],
    [-0.147621, 0.716567, -0.681718],
    [-0.309017, 0.500000, -0.809017],
    [0.000000, 0.525731, -0.850651],
    [-0.525731, 0.000000, -0.850651],
    [-0.442863, 0.238856, -0.864188],
    [-0.295242, 0.000000, -0.955423],
    [-0.162460, 0.262866, -0.951056],
    [0.000000, 0.000000, -1.000000],
    [0.295242, 0.000000, -0.955423],
    [0.162460, 0.262866, -0.951056],
    [-0.442863, -0.238856, -0.864188],
    [-0.309017, -0.500000, -0.809017],
    [-0.162460, -0.262866, -0.951056],
    [0.000000, -0.850651, -0.525731],
    [-0.147621, -0.716567, -0.681718],
    [0.147621, -0.716567, -0.681718],
    [0.000000, -0.525731, -0.850651],
    [0.309017, -0.500000, -0.809017],
    [0.442863, -0.238856, -0.864188],
    [0.162460, -0.262866, -0.951056],
    [0.238856, -0.864188, -0.442863],
    [0.500000, -0.809017, -0.309017],
    [0.425325, -0.688191, -0.587785],
    [0.716567, -0.681718, -0.147621],
    [0.688191, -0.587785, -0.425325],
    [0.587785, -0.425325, -0.688191],
    [0.000000, -0.955423, -0.295242],
    [0.000000, -1.000000, 0.000000],
    [0.262866, -0.951056, -0.162460],
    [0.000000, -0.850651, 0.525731],
    [0.000000, -0.955423, 0.295242],
    [0.238856, -0.864188, 0.442863],
    [0.262866, -0.951056, 0.162460],
    [0.500000, -0.809017, 0.309017],
    [0.716567, -0.681718, 0.147621],
    [0.525731, -0.850651, 0.000000],
    [-0.238856, -0.864188, -0.442863],
    [-0.500000, -0.809017, -0.309017],
    [-0.262866, -0.951056, -0.162460],
    [-0.850651, -0.525731, 0.000000],
    [-0.716567, -0.681718, -0.147621],
    [-0.716567, -0.681718, 0.147621],
    [-0.525731, -0.850651, 0.000000],
    [-0.500000, -0.809017, 0.309017],
    [-0.238856, -0.864188, 0.442863],
    [-0.262866, -0.951056, 0.162460],
    [-0.864188, -0.442863, 0.238856],
    [-0.809017, -0.309017, 0.500000],
    [-0.688191, -0.587785, 0.425325],
    [-0.681718, -0.147621, 0.716567],
    [-0.442863, -0.238856, 0.864188],
    [-0.587785, -0.425325, 0.688191],
    [-0.309017, -0.500000, 0.809017],
    [-0.147621, -0.716567, 0.681718],
    [-0.425325, -0.688191, 0.587785],
    [-0.162460, -0.262866, 0.951056],
    [0.442863, -0.238856, 0.864188],
    [0.162460, -0.262866, 0.951056],
    [0.309017, -0.500000, 0.809017],
    [0.147621, -0.716567, 0.681718],
    [0.000000, -0.525731, 0.850651],
    [0.425325, -0.688191, 0.587785],
    [0.587785, -0.425325, 0.688191],
    [0.688191, -0.587785, 0.425325],
    [-0.955423, 0.295242, 0.000000],
    [-0.951056, 0.162460, 0.262866],
    [-1.000000, 0.000000, 0.000000],
    [-0.850651, 0.000000, 0.525731],
    [-0.955423, -0.295242, 0.000000],
    [-0.951056, -0.162460, 0.262866],
    [-0.864188, 0.442863, -0.238856],
    [-0.951056, 0.162460, -0.262866],
    [-0.809017, 0.309017, -0.500000],
    [-0.864188, -0.442863, -0.238856],
    [-0.951056, -0.162460, -0.262866],
    [-0.809017, -0.309017, -0.500000],
    [-0.681718, 0.147621, -0.716567],
    [-0.681718, -0.147621, -0.716567],
    [-0.850651, 0.000000, -0.525731],
    [-0.688191, 0.587785, -0.425325],
    [-0.587785, 0.425325, -0.688191],
    [-0.425325, 0.688191, -0.587785],
    [-0.425325, -0.688191, -0.587785],
    [-0.587785, -0.425325, -0.688191],
    [-0.688191, -0.587785, -0.425325],
];

/// Nearest-normal lookup over [`MD2_NORMALS`].
pub struct NormalCodebook;

impl NormalCodebook {
    /// Index of the table entry that best matches a mesh normal.
    ///
    /// The normal is scored as `n.y*c.x - n.x*c.y + n.z*c.z` against every
    /// candidate `c`. This is a true dot product after moving the normal into
    /// the table's axes with [`to_codebook_axes`](Self::to_codebook_axes).
    /// The input is not renormalized; only the ordering of scores matters.
    pub fn closest_index(normal: [f32; 3]) -> u8 {
        Self::nearest(Self::to_codebook_axes(normal))
    }

    /// Index of the entry with the largest dot product against `direction`,
    /// which must already be expressed in the table's axes.
    ///
    /// Ties keep the lowest index. A NaN direction never beats the first
    /// score and therefore maps to 0.
    pub fn nearest(direction: [f32; 3]) -> u8 {
        let mut best_index = 0;
        let mut best_dot = dot(direction, MD2_NORMALS[0]);

        for (i, candidate) in MD2_NORMALS.iter().enumerate().skip(1) {
            let d = dot(direction, *candidate);
            if d > best_dot {
                best_dot = d;
                best_index = i;
            }
        }

        best_index as u8
    }

    /// Swap X/Y and negate the new Y: `(x, y, z) -> (y, -x, z)`.
    pub fn to_codebook_axes(normal: [f32; 3]) -> [f32; 3] {
        [normal[1], -normal[0], normal[2]]
    }
}

#[inline]
fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_unit_length() {
        for n in MD2_NORMALS.iter() {
            let len = dot(*n, *n).sqrt();
            assert!((len - 1.0).abs() < 1e-4, "{:?} has length {}", n, len);
        }
    }

    #[test]
    fn test_nearest_is_self_consistent() {
        for (i, n) in MD2_NORMALS.iter().enumerate() {
            assert_eq!(NormalCodebook::nearest(*n) as usize, i);
        }
    }

    #[test]
    fn test_closest_index_inverts_axis_remap() {
        // (x, y, z) in table axes comes from (-y, x, z) in mesh axes.
        for (i, n) in MD2_NORMALS.iter().enumerate() {
            let mesh_normal = [-n[1], n[0], n[2]];
            assert_eq!(NormalCodebook::closest_index(mesh_normal) as usize, i);
        }
    }

    #[test]
    fn test_closest_index_matches_score_formula() {
        let normal = [0.3, -0.8, 0.2];
        let score = |c: &[f32; 3]| normal[1] * c[0] - normal[0] * c[1] + normal[2] * c[2];

        let mut expected = 0;
        for (i, c) in MD2_NORMALS.iter().enumerate() {
            if score(c) > score(&MD2_NORMALS[expected]) {
                expected = i;
            }
        }

        assert_eq!(NormalCodebook::closest_index(normal) as usize, expected);
    }

    #[test]
    fn test_up_vector() {
        // +Z is entry 5 and is unaffected by the X/Y remap.
        assert_eq!(NormalCodebook::closest_index([0.0, 0.0, 1.0]), 5);
        // Magnitude does not change the result.
        assert_eq!(NormalCodebook::closest_index([0.0, 0.0, 42.0]), 5);
    }

    #[test]
    fn test_nan_maps_to_first_entry() {
        assert_eq!(NormalCodebook::closest_index([f32::NAN, 0.0, 0.0]), 0);
    }
}

//! Mesh geometry types handed to the exporter.

use crate::error::{ExportError, Result};
use serde::{Deserialize, Serialize};

/// A vertex of a triangulated mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// Position in 3D space.
    pub position: [f32; 3],
    /// Normal vector. Need not be unit length.
    pub normal: [f32; 3],
}

impl Vertex {
    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            normal: [0.0, 0.0, 1.0],
        }
    }
}

/// A triangle: three vertex indices plus one UV per corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub vertices: [u32; 3],
    /// Per-corner UVs with `(0, 0)` at the top left. `None` when the mesh
    /// has no UV layer.
    #[serde(default)]
    pub uvs: Option<[[f32; 2]; 3]>,
}

impl Triangle {
    pub fn new(i0: u32, i1: u32, i2: u32) -> Self {
        Self {
            vertices: [i0, i1, i2],
            uvs: None,
        }
    }

    pub fn with_uvs(mut self, uvs: [[f32; 2]; 3]) -> Self {
        self.uvs = Some(uvs);
        self
    }

    /// UV of one corner, `(0, 0)` when missing.
    pub fn uv(&self, corner: usize) -> [f32; 2] {
        self.uvs.map(|uvs| uvs[corner]).unwrap_or([0.0, 0.0])
    }
}

/// A triangle mesh with its skin (texture) paths.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<Triangle>,
    /// Texture file paths used by this mesh's materials.
    pub skins: Vec<String>,
}

impl Mesh {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a vertex and return its index.
    pub fn add_vertex(&mut self, vertex: Vertex) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(vertex);
        index
    }

    /// Add a triangle and return its ordinal.
    pub fn add_triangle(&mut self, triangle: Triangle) -> usize {
        self.triangles.push(triangle);
        self.triangles.len() - 1
    }

    pub fn with_skin(mut self, path: impl Into<String>) -> Self {
        self.skins.push(path.into());
        self
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn positions(&self) -> Vec<[f32; 3]> {
        self.vertices.iter().map(|v| v.position).collect()
    }

    pub fn normals(&self) -> Vec<[f32; 3]> {
        self.vertices.iter().map(|v| v.normal).collect()
    }

    /// Check that every triangle index points at an existing vertex.
    pub fn validate(&self, mesh_index: usize) -> Result<()> {
        let count = self.vertices.len() as u64;
        for (t, tri) in self.triangles.iter().enumerate() {
            if let Some(&index) = tri.vertices.iter().find(|&&i| u64::from(i) >= count) {
                return Err(ExportError::InvalidIndex {
                    mesh: mesh_index,
                    triangle: t,
                    index,
                });
            }
        }
        Ok(())
    }
}

/// Area-weighted vertex normals from triangle faces.
///
/// Indices must already be validated. Vertices that touch no triangle get `+Z`.
pub fn compute_vertex_normals(positions: &[[f32; 3]], triangles: &[Triangle]) -> Vec<[f32; 3]> {
    use glam::Vec3;

    let mut sums = vec![Vec3::ZERO; positions.len()];
    for tri in triangles {
        let [a, b, c] = tri.vertices.map(|i| Vec3::from_array(positions[i as usize]));
        // Cross product length is twice the area.
        let face = (b - a).cross(c - a);
        for &i in &tri.vertices {
            sums[i as usize] += face;
        }
    }

    sums.into_iter()
        .map(|n| {
            let n = n.normalize_or_zero();
            if n == Vec3::ZERO {
                [0.0, 0.0, 1.0]
            } else {
                n.to_array()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_mesh() -> Mesh {
        let mut mesh = Mesh::new("tri");
        mesh.add_vertex(Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]));
        mesh.add_vertex(Vertex::new([1.0, 0.0, 0.0], [0.0, 0.0, 1.0]));
        mesh.add_vertex(Vertex::new([0.0, 1.0, 0.0], [0.0, 0.0, 1.0]));
        mesh.add_triangle(Triangle::new(0, 1, 2));
        mesh
    }

    #[test]
    fn test_counts() {
        let mesh = triangle_mesh();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(mesh.validate(0).is_ok());
    }

    #[test]
    fn test_missing_uv_defaults_to_origin() {
        let tri = Triangle::new(0, 1, 2);
        assert_eq!(tri.uv(1), [0.0, 0.0]);
        let tri = tri.with_uvs([[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
        assert_eq!(tri.uv(1), [1.0, 0.0]);
    }

    #[test]
    fn test_validate_rejects_out_of_range_index() {
        let mut mesh = triangle_mesh();
        mesh.add_triangle(Triangle::new(0, 2, 7));
        match mesh.validate(4) {
            Err(ExportError::InvalidIndex { mesh, triangle, index }) => {
                assert_eq!((mesh, triangle, index), (4, 1, 7));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_compute_vertex_normals() {
        let mesh = triangle_mesh();
        let normals = compute_vertex_normals(&mesh.positions(), &mesh.triangles);
        for n in normals {
            assert_eq!(n, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_isolated_vertex_gets_up_normal() {
        let normals = compute_vertex_normals(&[[5.0, 5.0, 5.0]], &[]);
        assert_eq!(normals, vec![[0.0, 0.0, 1.0]]);
    }
}

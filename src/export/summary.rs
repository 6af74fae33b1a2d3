//! Pre-export scene statistics and limit checks.

use crate::error::Result;
use crate::md2::HeaderBuilder;
use crate::scene::SceneProvider;
use serde::Serialize;

/// Counts for one mesh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeshSummary {
    pub name: String,
    pub vertices: usize,
    pub triangles: usize,
}

/// What an export of the scene would contain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneSummary {
    pub meshes: Vec<MeshSummary>,
    pub total_vertices: usize,
    pub total_triangles: usize,
    pub skins: Vec<String>,
    pub frame_range: (i32, i32),
}

impl SceneSummary {
    pub fn from_provider<S: SceneProvider + ?Sized>(scene: &S) -> Self {
        let list = scene.list_meshes();
        let meshes: Vec<MeshSummary> = list
            .iter()
            .map(|m| MeshSummary {
                name: m.name.clone(),
                vertices: m.vertex_count(),
                triangles: m.triangle_count(),
            })
            .collect();

        Self {
            total_vertices: meshes.iter().map(|m| m.vertices).sum(),
            total_triangles: meshes.iter().map(|m| m.triangles).sum(),
            meshes,
            skins: scene.skins_for(list),
            frame_range: scene.frame_range(),
        }
    }

    /// Fails exactly when an export would hit a format limit.
    pub fn check_limits(&self) -> Result<()> {
        HeaderBuilder::validate(self.total_vertices, self.total_triangles)
    }
}

//! Scene access for the exporter.
//!
//! The exporter never walks a host scene graph itself. A [`SceneProvider`]
//! supplies already-triangulated meshes, skin paths, and immutable per-frame
//! geometry snapshots in export axes.

pub mod geometry;
pub mod json;
pub mod memory;

pub use geometry::{compute_vertex_normals, Mesh, Triangle, Vertex};
pub use json::JsonScene;
pub use memory::InMemoryScene;

use crate::error::{ExportError, Result};
use serde::{Deserialize, Serialize};

/// Posed vertex data for one mesh at one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshPose {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
}

impl MeshPose {
    pub fn new(positions: Vec<[f32; 3]>, normals: Vec<[f32; 3]>) -> Self {
        Self { positions, normals }
    }

    /// The mesh's own vertices, unchanged.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self {
            positions: mesh.positions(),
            normals: mesh.normals(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

/// Immutable geometry of every mesh at one sample point, in
/// [`SceneProvider::list_meshes`] order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameSnapshot {
    pub meshes: Vec<MeshPose>,
}

impl FrameSnapshot {
    pub fn new(meshes: Vec<MeshPose>) -> Self {
        Self { meshes }
    }

    pub fn from_meshes(meshes: &[Mesh]) -> Self {
        Self {
            meshes: meshes.iter().map(MeshPose::from_mesh).collect(),
        }
    }

    /// All positions, meshes concatenated.
    pub fn positions(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.meshes.iter().flat_map(|m| m.positions.iter().copied())
    }

    /// All normals, meshes concatenated.
    pub fn normals(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.meshes.iter().flat_map(|m| m.normals.iter().copied())
    }

    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(MeshPose::vertex_count).sum()
    }

    /// Check that the snapshot has the same layout as `meshes`.
    pub fn check_topology(&self, meshes: &[Mesh]) -> Result<()> {
        if self.meshes.len() != meshes.len() {
            return Err(ExportError::InvalidScene(format!(
                "frame snapshot has {} meshes, scene has {}",
                self.meshes.len(),
                meshes.len()
            )));
        }
        for (i, (pose, mesh)) in self.meshes.iter().zip(meshes).enumerate() {
            let expected = mesh.vertex_count();
            for actual in [pose.positions.len(), pose.normals.len()] {
                if actual != expected {
                    return Err(ExportError::TopologyMismatch {
                        mesh: i,
                        expected,
                        actual,
                    });
                }
            }
        }
        Ok(())
    }
}

/// A named point on the animation timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineMarker {
    pub frame: i32,
    pub name: String,
}

impl TimelineMarker {
    pub fn new(frame: i32, name: impl Into<String>) -> Self {
        Self {
            frame,
            name: name.into(),
        }
    }
}

/// Source of everything the exporter reads.
pub trait SceneProvider {
    /// Triangulated meshes in export order.
    fn list_meshes(&self) -> &[Mesh];

    /// Unique skin paths used by `meshes`, in first-use order.
    fn skins_for(&self, meshes: &[Mesh]) -> Vec<String> {
        unique_skins(meshes.iter().flat_map(|m| m.skins.iter().map(String::as_str)))
    }

    /// Geometry of every mesh at `frame`, already in export axes.
    fn evaluate_at(&self, frame: i32) -> Result<FrameSnapshot>;

    /// Named timeline markers, in any order.
    fn timeline_markers(&self) -> Vec<TimelineMarker>;

    /// First and last animation frame, inclusive.
    fn frame_range(&self) -> (i32, i32);

    /// Frame sampled for a static (non-animated) export.
    fn current_frame(&self) -> i32 {
        self.frame_range().0
    }
}

/// De-duplicate paths keeping the first occurrence.
pub fn unique_skins<'a>(paths: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut skins: Vec<String> = Vec::new();
    for path in paths {
        if !skins.iter().any(|s| s == path) {
            skins.push(path.to_string());
        }
    }
    skins
}

//! # MD2 Exporter
//!
//! A Rust library for writing triangulated, optionally animated meshes as
//! Quake II MD2 models.
//!
//! ## Overview
//!
//! Geometry comes from a [`SceneProvider`], which hands over triangulated
//! meshes, skin paths and per-frame vertex snapshots. The exporter quantizes
//! every frame to 8-bit fixed point with a normal index from the standard
//! 162-entry table, and writes header, skins, texture coordinates, triangles,
//! frames and GL commands as one little-endian byte stream.
//!
//! ## Quick Start
//!
//! ```ignore
//! use md2_exporter::{export_md2_to_path, ExportConfig, JsonScene};
//!
//! // Load a scene description
//! let scene = JsonScene::from_path("scenes/soldier.json")?;
//!
//! // Export every frame, quantized against one shared bounding box
//! let config = ExportConfig::default().with_animation(true);
//! let report = export_md2_to_path(&scene, &config, "soldier.md2")?;
//! ```
//!
//! ## Library Integration
//!
//! For geometry that already lives in memory, build an [`InMemoryScene`] or
//! implement [`SceneProvider`] directly:
//!
//! ```ignore
//! use md2_exporter::{export_md2, ExportConfig, InMemoryScene, Mesh, Triangle, Vertex};
//!
//! let mut mesh = Mesh::new("body").with_skin("body.pcx");
//! mesh.add_vertex(Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]));
//! mesh.add_vertex(Vertex::new([1.0, 0.0, 0.0], [0.0, 0.0, 1.0]));
//! mesh.add_vertex(Vertex::new([0.0, 1.0, 0.0], [0.0, 0.0, 1.0]));
//! mesh.add_triangle(Triangle::new(0, 1, 2));
//!
//! let bytes = export_md2(&InMemoryScene::new(vec![mesh]), &ExportConfig::default())?;
//! ```

pub mod error;
pub mod types;
pub mod scene;
pub mod md2;
pub mod export;

// Re-export main types for convenience
pub use error::{ExportError, Result};
pub use types::{BoundingBox, Transform};
pub use scene::{FrameSnapshot, InMemoryScene, JsonScene, Mesh, MeshPose, SceneProvider, TimelineMarker, Triangle, Vertex};
pub use md2::{BoundsMode, Header, NormalCodebook};
pub use export::{
    export_md2, export_md2_to_path, ExportConfig, ExportReport, Md2Writer, SceneSummary, TextureCopy,
};

/// Load a JSON scene from a file path.
pub fn load_scene<P: AsRef<std::path::Path>>(path: P) -> Result<JsonScene> {
    JsonScene::from_path(path)
}

#[cfg(feature = "wasm")]
pub mod wasm;

//! Scenes described by a JSON file.
//!
//! A scene file lists objects with a world transform, base geometry, skin
//! paths and sparse pose keys:
//!
//! ```json
//! {
//!   "frame_start": 1,
//!   "frame_end": 20,
//!   "markers": [{ "frame": 1, "name": "stand" }, { "frame": 11, "name": "run" }],
//!   "objects": [{
//!     "name": "body",
//!     "transform": { "translation": [0, 0, 1] },
//!     "vertices": [[0, 0, 0], [1, 0, 0], [0, 1, 0]],
//!     "triangles": [{ "vertices": [0, 1, 2], "uvs": [[0, 0], [1, 0], [0, 1]] }],
//!     "skins": ["textures/body.png"],
//!     "poses": [{ "frame": 20, "vertices": [[0, 0, 1], [1, 0, 1], [0, 1, 1]] }]
//!   }]
//! }
//! ```
//!
//! Between pose keys, vertices, normals and transforms are linearly
//! interpolated; outside the keyed range the nearest key is held. Evaluated
//! geometry is moved to world space and then rotated -90° about Z into the
//! MD2 axes.

use super::{compute_vertex_normals, FrameSnapshot, Mesh, MeshPose, SceneProvider, TimelineMarker, Triangle, Vertex};
use crate::error::{ExportError, Result};
use crate::types::{normal_matrix, Transform};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;
use std::path::Path;

/// Top-level scene file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneFile {
    #[serde(default = "default_frame")]
    pub frame_start: i32,
    #[serde(default = "default_frame")]
    pub frame_end: i32,
    #[serde(default)]
    pub current_frame: Option<i32>,
    #[serde(default)]
    pub markers: Vec<TimelineMarker>,
    pub objects: Vec<ObjectEntry>,
}

fn default_frame() -> i32 {
    1
}

/// One mesh object in a scene file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub transform: Transform,
    pub vertices: Vec<[f32; 3]>,
    /// Per-vertex normals. Computed from the faces when omitted.
    #[serde(default)]
    pub normals: Vec<[f32; 3]>,
    #[serde(default)]
    pub triangles: Vec<Triangle>,
    #[serde(default)]
    pub skins: Vec<String>,
    #[serde(default)]
    pub poses: Vec<PoseKey>,
}

/// Object state at one frame. Absent fields are not keyed at that frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoseKey {
    pub frame: i32,
    #[serde(default)]
    pub vertices: Option<Vec<[f32; 3]>>,
    #[serde(default)]
    pub normals: Option<Vec<[f32; 3]>>,
    #[serde(default)]
    pub transform: Option<Transform>,
}

type Track<T> = Vec<(i32, T)>;

/// Per-object animation data, sorted by frame.
#[derive(Debug, Clone)]
struct ObjectTracks {
    transform: Transform,
    positions: Track<Vec<[f32; 3]>>,
    normals: Track<Vec<[f32; 3]>>,
    transforms: Track<Transform>,
    /// Normals are derived from posed faces instead of read.
    derive_normals: bool,
}

/// A [`SceneProvider`] backed by a parsed [`SceneFile`].
#[derive(Debug, Clone)]
pub struct JsonScene {
    meshes: Vec<Mesh>,
    tracks: Vec<ObjectTracks>,
    markers: Vec<TimelineMarker>,
    frame_start: i32,
    frame_end: i32,
    current_frame: Option<i32>,
}

impl JsonScene {
    /// Load a scene file. Relative skin paths resolve against its directory.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content, path.parent())
    }

    /// Parse a scene from JSON text.
    pub fn from_json_str(json: &str, base_dir: Option<&Path>) -> Result<Self> {
        let file: SceneFile = serde_json::from_str(json)?;
        Self::from_scene_file(file, base_dir)
    }

    /// Parse a scene from JSON bytes.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        let file: SceneFile = serde_json::from_slice(data)?;
        Self::from_scene_file(file, None)
    }

    pub fn from_scene_file(file: SceneFile, base_dir: Option<&Path>) -> Result<Self> {
        let mut meshes = Vec::with_capacity(file.objects.len());
        let mut tracks = Vec::with_capacity(file.objects.len());

        for (index, object) in file.objects.into_iter().enumerate() {
            let (mesh, track) = build_object(index, object, base_dir)?;
            meshes.push(mesh);
            tracks.push(track);
        }

        Ok(Self {
            meshes,
            tracks,
            markers: file.markers,
            frame_start: file.frame_start,
            frame_end: file.frame_end,
            current_frame: file.current_frame,
        })
    }

    /// Geometry of one object at `frame`, in export axes.
    fn evaluate_object(&self, index: usize, frame: i32) -> MeshPose {
        let mesh = &self.meshes[index];
        let track = &self.tracks[index];

        let local_positions = sample(&track.positions, frame, lerp_points).unwrap_or_else(|| mesh.positions());
        let local_normals = if track.derive_normals {
            compute_vertex_normals(&local_positions, &mesh.triangles)
        } else {
            sample(&track.normals, frame, lerp_points).unwrap_or_else(|| mesh.normals())
        };
        let transform = sample(&track.transforms, frame, |a, b, t| a.lerp(b, t)).unwrap_or(track.transform);

        let world = export_axes() * transform.matrix();
        let normal_world = normal_matrix(&world);

        MeshPose {
            positions: local_positions
                .iter()
                .map(|p| world.transform_point3(Vec3::from_array(*p)).to_array())
                .collect(),
            normals: local_normals
                .iter()
                .map(|n| (normal_world * Vec3::from_array(*n)).normalize_or_zero().to_array())
                .collect(),
        }
    }
}

impl SceneProvider for JsonScene {
    fn list_meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    fn evaluate_at(&self, frame: i32) -> Result<FrameSnapshot> {
        Ok(FrameSnapshot::new(
            (0..self.meshes.len()).map(|i| self.evaluate_object(i, frame)).collect(),
        ))
    }

    fn timeline_markers(&self) -> Vec<TimelineMarker> {
        self.markers.clone()
    }

    fn frame_range(&self) -> (i32, i32) {
        (self.frame_start, self.frame_end)
    }

    fn current_frame(&self) -> i32 {
        self.current_frame.unwrap_or(self.frame_start)
    }
}

/// Rotation of -90° about Z, from scene axes to MD2 axes.
pub fn export_axes() -> Mat4 {
    Mat4::from_rotation_z(-FRAC_PI_2)
}

fn build_object(index: usize, object: ObjectEntry, base_dir: Option<&Path>) -> Result<(Mesh, ObjectTracks)> {
    let vertex_count = object.vertices.len();
    let check_len = |actual: usize| {
        if actual == vertex_count {
            Ok(())
        } else {
            Err(ExportError::TopologyMismatch {
                mesh: index,
                expected: vertex_count,
                actual,
            })
        }
    };

    let derive_normals = object.normals.is_empty() && vertex_count > 0;
    if !derive_normals {
        check_len(object.normals.len())?;
    }

    let mut poses = object.poses;
    poses.sort_by_key(|p| p.frame);

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut transforms = Vec::new();
    for pose in poses {
        if let Some(v) = pose.vertices {
            check_len(v.len())?;
            positions.push((pose.frame, v));
        }
        if let Some(n) = pose.normals {
            check_len(n.len())?;
            normals.push((pose.frame, n));
        }
        if let Some(t) = pose.transform {
            transforms.push((pose.frame, t));
        }
    }

    let base_normals = if derive_normals {
        compute_vertex_normals(&object.vertices, &[])
    } else {
        object.normals
    };

    let mut mesh = Mesh::new(if object.name.is_empty() {
        format!("object{}", index)
    } else {
        object.name
    });
    mesh.vertices = object
        .vertices
        .into_iter()
        .zip(base_normals)
        .map(|(p, n)| Vertex::new(p, n))
        .collect();
    mesh.triangles = object.triangles;
    mesh.skins = object
        .skins
        .into_iter()
        .map(|s| resolve_skin_path(&s, base_dir))
        .collect();
    mesh.validate(index)?;

    if derive_normals {
        let normals = compute_vertex_normals(&mesh.positions(), &mesh.triangles);
        for (v, n) in mesh.vertices.iter_mut().zip(normals) {
            v.normal = n;
        }
    }

    let tracks = ObjectTracks {
        transform: object.transform,
        positions,
        normals,
        transforms,
        derive_normals,
    };
    Ok((mesh, tracks))
}

fn resolve_skin_path(path: &str, base_dir: Option<&Path>) -> String {
    match base_dir {
        Some(dir) if Path::new(path).is_relative() && !dir.as_os_str().is_empty() => {
            dir.join(path).to_string_lossy().into_owned()
        }
        _ => path.to_string(),
    }
}

/// Value of a keyed track at `frame`; `None` when nothing is keyed.
fn sample<T: Clone>(keys: &[(i32, T)], frame: i32, lerp: impl Fn(&T, &T, f32) -> T) -> Option<T> {
    let (first_frame, first) = keys.first()?;
    if frame <= *first_frame {
        return Some(first.clone());
    }
    let (last_frame, last) = keys.last()?;
    if frame >= *last_frame {
        return Some(last.clone());
    }

    let next = keys.partition_point(|(f, _)| *f <= frame);
    let (f0, a) = &keys[next - 1];
    let (f1, b) = &keys[next];
    if *f0 == frame {
        return Some(a.clone());
    }
    // Keys may sit anywhere in i32, so the spans need a wider type.
    let t = ((i64::from(frame) - i64::from(*f0)) as f64 / (i64::from(*f1) - i64::from(*f0)) as f64) as f32;
    Some(lerp(a, b, t))
}

fn lerp_points(a: &Vec<[f32; 3]>, b: &Vec<[f32; 3]>, t: f32) -> Vec<[f32; 3]> {
    a.iter()
        .zip(b)
        .map(|(p, q)| Vec3::from_array(*p).lerp(Vec3::from_array(*q), t).to_array())
        .collect()
}

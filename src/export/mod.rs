//! MD2 export.
//!
//! [`Md2Writer`] drives a whole export: it reads meshes, skins and frame
//! snapshots from a [`SceneProvider`], validates everything, and only then
//! writes header, skins, texture coordinates, triangles, frames and GL
//! commands in that order.

pub mod markers;
pub mod summary;
pub mod textures;

pub use markers::{FrameNamer, DEFAULT_FRAME_NAME};
pub use summary::{MeshSummary, SceneSummary};
pub use textures::{copy_skins_beside, TextureCopy};

use crate::error::{ExportError, Result};
use crate::md2::{
    encode_gl_commands, encode_skins, encode_texcoords, encode_triangles, BoundingBoxTracker, BoundsMode,
    FrameEncoder, Header, HeaderBuilder, ModelCounts,
};
use crate::scene::{FrameSnapshot, Mesh, SceneProvider};
use crate::types::BoundingBox;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// Export configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Multiplier from scene units to MD2 units.
    pub scale: f32,
    /// Write every frame of the scene's frame range instead of one snapshot.
    pub export_animation: bool,
    /// Quantize all animation frames against one bounding box.
    pub shared_bounding_box: bool,
    /// Store only file names in the skin table.
    pub export_only_basename_skins: bool,
    /// Copy skin textures next to the output file (path exports only).
    pub copy_textures_beside_output: bool,
    /// Name the first copied texture after the output file.
    pub rename_first_texture_to_output_basename: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            scale: 10.0,
            export_animation: false,
            shared_bounding_box: true,
            export_only_basename_skins: true,
            copy_textures_beside_output: true,
            rename_first_texture_to_output_basename: true,
        }
    }
}

impl ExportConfig {
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_animation(mut self, enabled: bool) -> Self {
        self.export_animation = enabled;
        self
    }

    pub fn with_shared_bounding_box(mut self, enabled: bool) -> Self {
        self.shared_bounding_box = enabled;
        self
    }

    pub fn with_basename_skins(mut self, enabled: bool) -> Self {
        self.export_only_basename_skins = enabled;
        self
    }

    pub fn with_texture_copy(mut self, copy: bool, rename_first: bool) -> Self {
        self.copy_textures_beside_output = copy;
        self.rename_first_texture_to_output_basename = rename_first;
        self
    }

    /// Load a config from JSON; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Bounding box mode for the frames this config exports.
    pub fn bounds_mode(&self) -> BoundsMode {
        if self.export_animation && self.shared_bounding_box {
            BoundsMode::Shared
        } else {
            BoundsMode::PerFrame
        }
    }
}

/// One frame ready to encode.
#[derive(Debug, Clone)]
pub struct PreparedFrame {
    pub frame: i32,
    pub name: String,
    pub snapshot: FrameSnapshot,
    pub bbox: BoundingBox,
}

/// A fully validated export. Writing it cannot fail except on I/O.
#[derive(Debug, Clone)]
pub struct PreparedExport<'a> {
    pub header: Header,
    pub meshes: &'a [Mesh],
    /// Skin paths as they will be referenced (before basename reduction).
    pub skins: Vec<String>,
    pub frames: Vec<PreparedFrame>,
}

/// Result of an export to a file.
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub path: PathBuf,
    pub header: Header,
    pub bytes_written: usize,
    pub textures: Vec<TextureCopy>,
}

/// Writes scenes as MD2 models.
pub struct Md2Writer {
    config: ExportConfig,
}

impl Md2Writer {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Inclusive range of frames to sample.
    fn frame_range<S: SceneProvider + ?Sized>(&self, scene: &S) -> Result<RangeInclusive<i32>> {
        if !self.config.export_animation {
            let frame = scene.current_frame();
            return Ok(frame..=frame);
        }
        let (start, end) = scene.frame_range();
        if end < start {
            return Err(ExportError::InvalidFrameRange { start, end });
        }
        Ok(start..=end)
    }

    /// Gather and validate everything an export needs.
    ///
    /// The header is checked before any frame is sampled. Every frame
    /// snapshot is taken here, and in shared mode the common bounding box is
    /// complete before this returns.
    pub fn prepare<'a, S: SceneProvider + ?Sized>(&self, scene: &'a S) -> Result<PreparedExport<'a>> {
        let meshes = scene.list_meshes();
        for (i, mesh) in meshes.iter().enumerate() {
            mesh.validate(i)?;
        }

        let skins = scene.skins_for(meshes);
        let frames = self.frame_range(scene)?;
        let num_frames = frame_count(&frames);

        let counts = ModelCounts::from_meshes(meshes, skins.len(), num_frames);
        let header = HeaderBuilder::build(counts)?;
        if counts.num_xyz == 0 {
            return Err(ExportError::EmptyScene);
        }

        tracing::info!(
            "Preparing MD2 export: {} meshes, {} vertices, {} triangles, {} skins, {} frames",
            meshes.len(),
            counts.num_xyz,
            counts.num_tris,
            counts.num_skins,
            counts.num_frames
        );

        let mut snapshots = Vec::with_capacity(num_frames);
        for frame in frames.clone() {
            let snapshot = scene.evaluate_at(frame)?;
            snapshot.check_topology(meshes)?;
            snapshots.push(snapshot);
        }

        let boxes = BoundingBoxTracker::for_frames(self.config.bounds_mode(), &snapshots)?;

        let namer = FrameNamer::new(if self.config.export_animation {
            scene.timeline_markers()
        } else {
            Vec::new()
        });

        let frames = frames
            .zip(snapshots)
            .zip(boxes)
            .map(|((frame, snapshot), bbox)| PreparedFrame {
                frame,
                name: if self.config.export_animation {
                    namer.name_for(frame)
                } else {
                    DEFAULT_FRAME_NAME.to_string()
                },
                snapshot,
                bbox,
            })
            .collect();

        Ok(PreparedExport {
            header,
            meshes,
            skins,
            frames,
        })
    }

    /// Write a prepared export, returning the number of bytes written.
    pub fn write_prepared<W: Write>(&self, prepared: &PreparedExport<'_>, out: &mut W) -> Result<usize> {
        let header = &prepared.header;
        let mut written = 0usize;

        emit(out, &mut written, &header.to_bytes())?;

        let mut section = Vec::new();
        encode_skins(&mut section, &prepared.skins, self.config.export_only_basename_skins);
        emit(out, &mut written, &section)?;

        for mesh in prepared.meshes {
            section.clear();
            encode_texcoords(&mut section, mesh);
            emit(out, &mut written, &section)?;
        }

        section.clear();
        encode_triangles(&mut section, prepared.meshes);
        emit(out, &mut written, &section)?;

        for frame in &prepared.frames {
            tracing::debug!(
                "Writing frame {} as '{}' (bbox {:?} - {:?})",
                frame.frame,
                frame.name,
                frame.bbox.min,
                frame.bbox.max
            );
            let bytes = FrameEncoder::encode_snapshot(&frame.name, &frame.snapshot, &frame.bbox, self.config.scale);
            emit(out, &mut written, &bytes)?;
        }

        section.clear();
        encode_gl_commands(&mut section, prepared.meshes);
        emit(out, &mut written, &section)?;

        out.flush()?;
        debug_assert_eq!(written, header.file_size());
        Ok(written)
    }

    /// Export `scene` to `out`.
    ///
    /// All validation happens before the first byte is written; on error
    /// `out` has received nothing unless the error is an I/O failure.
    pub fn write<S: SceneProvider + ?Sized, W: Write>(&self, scene: &S, out: &mut W) -> Result<Header> {
        let prepared = self.prepare(scene)?;
        self.write_prepared(&prepared, out)?;
        Ok(prepared.header)
    }

    /// Export `scene` to a file, copying textures beside it if configured.
    ///
    /// The model is written to `<name>.tmp` next to `path` and renamed over
    /// it only once complete, so a failed export never leaves a partial or
    /// truncated model. Nothing is created when validation fails, and
    /// textures are copied only after the model file could be created.
    pub fn write_to_path<S: SceneProvider + ?Sized, P: AsRef<Path>>(&self, scene: &S, path: P) -> Result<ExportReport> {
        let path = path.as_ref();
        let mut prepared = self.prepare(scene)?;

        let tmp_path = temp_path(path)?;
        let file = File::create(&tmp_path)?;

        let textures = if self.config.copy_textures_beside_output {
            let copies = copy_skins_beside(
                &prepared.skins,
                path,
                self.config.rename_first_texture_to_output_basename,
            );
            prepared.skins = copies.iter().map(TextureCopy::referenced_path).collect();
            copies
        } else {
            Vec::new()
        };

        let mut out = BufWriter::new(file);
        let outcome = self.write_prepared(&prepared, &mut out).and_then(|written| {
            out.get_ref().sync_all()?;
            Ok(written)
        });
        drop(out);

        let bytes_written = match outcome.and_then(|written| replace_file(&tmp_path, path).map(|()| written)) {
            Ok(written) => written,
            Err(e) => {
                if let Err(remove_err) = fs::remove_file(&tmp_path) {
                    tracing::warn!("Could not remove partial file {:?}: {}", tmp_path, remove_err);
                }
                return Err(e);
            }
        };

        tracing::info!("Exported MD2 ({} bytes) to {:?}", bytes_written, path);

        Ok(ExportReport {
            path: path.to_path_buf(),
            header: prepared.header,
            bytes_written,
            textures,
        })
    }
}

/// Sibling path the model is written to before it replaces `path`.
fn temp_path(path: &Path) -> Result<PathBuf> {
    let name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, format!("output path {:?} has no file name", path))
    })?;
    let mut tmp_name = OsString::from(name);
    tmp_name.push(".tmp");
    Ok(path.with_file_name(tmp_name))
}

fn replace_file(from: &Path, to: &Path) -> Result<()> {
    #[cfg(windows)]
    {
        // Windows rename fails if the destination exists.
        if to.is_file() {
            fs::remove_file(to)?;
        }
    }
    fs::rename(from, to)?;
    Ok(())
}

/// Number of frames in `range`, which may span all of i32.
fn frame_count(range: &RangeInclusive<i32>) -> usize {
    let span = i64::from(*range.end()) - i64::from(*range.start()) + 1;
    usize::try_from(span.max(0)).unwrap_or(usize::MAX)
}

fn emit<W: Write>(out: &mut W, written: &mut usize, section: &[u8]) -> Result<()> {
    out.write_all(section)?;
    *written += section.len();
    Ok(())
}

/// Export a scene to MD2 bytes. Textures are never copied.
pub fn export_md2<S: SceneProvider + ?Sized>(scene: &S, config: &ExportConfig) -> Result<Vec<u8>> {
    let writer = Md2Writer::new(config.clone());
    let prepared = writer.prepare(scene)?;
    let mut bytes = Vec::with_capacity(prepared.header.file_size());
    writer.write_prepared(&prepared, &mut bytes)?;
    Ok(bytes)
}

/// Export a scene to an MD2 file.
pub fn export_md2_to_path<S: SceneProvider + ?Sized, P: AsRef<Path>>(
    scene: &S,
    config: &ExportConfig,
    path: P,
) -> Result<ExportReport> {
    Md2Writer::new(config.clone()).write_to_path(scene, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::md2::frame::FRAME_HEADER_SIZE;
    use crate::scene::{InMemoryScene, MeshPose, Triangle, Vertex};
    use std::fs;

    fn read_i32(bytes: &[u8], at: usize) -> i32 {
        i32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
    }

    fn read_f32(bytes: &[u8], at: usize) -> f32 {
        f32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
    }

    /// Header field by position after the magic.
    fn field(bytes: &[u8], index: usize) -> i32 {
        read_i32(bytes, 4 + index * 4)
    }

    const FRAME_SIZE: usize = 3;
    const NUM_SKINS: usize = 4;
    const NUM_XYZ: usize = 5;
    const NUM_ST: usize = 6;
    const NUM_TRIS: usize = 7;
    const NUM_GL_COMMANDS: usize = 8;
    const NUM_FRAMES: usize = 9;
    const OFS_SKINS: usize = 10;
    const OFS_FRAMES: usize = 13;
    const OFS_END: usize = 15;

    fn triangle_mesh() -> Mesh {
        let mut mesh = Mesh::new("tri");
        mesh.add_vertex(Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]));
        mesh.add_vertex(Vertex::new([1.0, 0.0, 0.0], [0.0, 0.0, 1.0]));
        mesh.add_vertex(Vertex::new([0.0, 1.0, 0.0], [0.0, 0.0, 1.0]));
        mesh.add_triangle(Triangle::new(0, 1, 2).with_uvs([[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]));
        mesh
    }

    fn static_config() -> ExportConfig {
        ExportConfig::default()
            .with_scale(1.0)
            .with_texture_copy(false, false)
    }

    /// A pose translating every vertex of `mesh` by `offset`.
    fn translated(mesh: &Mesh, offset: [f32; 3]) -> FrameSnapshot {
        let positions = mesh
            .positions()
            .iter()
            .map(|p| [p[0] + offset[0], p[1] + offset[1], p[2] + offset[2]])
            .collect();
        FrameSnapshot::new(vec![MeshPose::new(positions, mesh.normals())])
    }

    fn frame_header(bytes: &[u8], frame: usize) -> &[u8] {
        let frame_size = field(bytes, FRAME_SIZE) as usize;
        let start = field(bytes, OFS_FRAMES) as usize + frame * frame_size;
        &bytes[start..start + 24]
    }

    #[test]
    fn test_single_triangle_scene() {
        let scene = InMemoryScene::new(vec![triangle_mesh()]);
        let bytes = export_md2(&scene, &static_config()).unwrap();

        assert_eq!(&bytes[..4], b"IDP2");
        assert_eq!(field(&bytes, NUM_XYZ), 3);
        assert_eq!(field(&bytes, NUM_TRIS), 1);
        assert_eq!(field(&bytes, NUM_ST), 3);
        assert_eq!(field(&bytes, NUM_FRAMES), 1);
        assert_eq!(field(&bytes, OFS_END) as usize, bytes.len());

        let ofs = field(&bytes, OFS_FRAMES) as usize;
        // Bounding box [0,0,0]-[1,1,0].
        assert_eq!(read_f32(&bytes, ofs), 1.0 / 255.0);
        assert_eq!(read_f32(&bytes, ofs + 4), 1.0 / 255.0);
        assert_eq!(read_f32(&bytes, ofs + 8), 0.0);
        assert_eq!(read_f32(&bytes, ofs + 12), 0.0);
        assert_eq!(read_f32(&bytes, ofs + 16), 0.0);
        assert_eq!(read_f32(&bytes, ofs + 20), 0.0);
        assert_eq!(&bytes[ofs + 24..ofs + 30], b"frame\0");

        let v0 = ofs + FRAME_HEADER_SIZE;
        assert_eq!(&bytes[v0..v0 + 3], &[0, 0, 0]);
        assert_eq!(&bytes[v0 + 4..v0 + 7], &[255, 0, 0]);
        assert_eq!(&bytes[v0 + 8..v0 + 11], &[0, 255, 0]);
    }

    #[test]
    fn test_too_many_vertices_writes_nothing() {
        let mut mesh = Mesh::new("big");
        mesh.vertices = vec![Vertex::default(); 65536];
        mesh.add_triangle(Triangle::new(0, 1, 2));
        let scene = InMemoryScene::new(vec![mesh]);

        let mut out: Vec<u8> = Vec::new();
        let result = Md2Writer::new(static_config()).write(&scene, &mut out);
        assert!(matches!(
            result,
            Err(ExportError::FormatLimitExceeded { count: 65536, limit: 65535, .. })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_too_many_triangles_creates_no_file() {
        let mut mesh = triangle_mesh();
        mesh.triangles = vec![Triangle::new(0, 1, 2); 21846];
        let scene = InMemoryScene::new(vec![mesh]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.md2");
        let result = export_md2_to_path(&scene, &static_config(), &path);
        assert!(matches!(result, Err(ExportError::FormatLimitExceeded { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn test_shared_bounding_box_across_frames() {
        let mesh = triangle_mesh();
        let scene = InMemoryScene::new(vec![mesh.clone()])
            .with_frame_range(1, 2)
            .with_pose(1, translated(&mesh, [0.0, 0.0, 0.0]))
            .with_pose(2, translated(&mesh, [3.0, -2.0, 1.0]));

        let shared = ExportConfig::default()
            .with_animation(true)
            .with_shared_bounding_box(true)
            .with_texture_copy(false, false);
        let bytes = export_md2(&scene, &shared).unwrap();
        assert_eq!(field(&bytes, NUM_FRAMES), 2);
        assert_eq!(frame_header(&bytes, 0), frame_header(&bytes, 1));

        let per_frame = shared.clone().with_shared_bounding_box(false);
        let bytes = export_md2(&scene, &per_frame).unwrap();
        assert_ne!(frame_header(&bytes, 0), frame_header(&bytes, 1));
    }

    #[test]
    fn test_shared_box_keeps_static_vertices_stable() {
        // Only vertex 2 moves; vertex 0 must keep its quantized position.
        let mesh = triangle_mesh();
        let mut moved = translated(&mesh, [0.0, 0.0, 0.0]);
        moved.meshes[0].positions[2] = [0.0, 3.0, 2.0];
        let scene = InMemoryScene::new(vec![mesh.clone()])
            .with_frame_range(0, 1)
            .with_pose(1, moved);

        let config = static_config().with_animation(true);
        let bytes = export_md2(&scene, &config).unwrap();
        let frame_size = field(&bytes, FRAME_SIZE) as usize;
        let v0 = field(&bytes, OFS_FRAMES) as usize + FRAME_HEADER_SIZE;
        assert_eq!(&bytes[v0..v0 + 4], &bytes[v0 + frame_size..v0 + frame_size + 4]);
    }

    #[test]
    fn test_long_skin_path_stored_as_basename() {
        let long_path = format!("/projects/{}/textures/soldier.pcx", "deeply/nested".repeat(5));
        assert!(long_path.len() > 63);
        let scene = InMemoryScene::new(vec![triangle_mesh().with_skin(long_path)]);

        let config = static_config().with_basename_skins(false);
        let bytes = export_md2(&scene, &config).unwrap();
        let ofs = field(&bytes, OFS_SKINS) as usize;
        let mut expected = b"soldier.pcx".to_vec();
        expected.resize(64, 0);
        assert_eq!(&bytes[ofs..ofs + 64], expected.as_slice());
        assert_eq!(field(&bytes, OFS_END) as usize, bytes.len());
    }

    #[test]
    fn test_static_export_is_idempotent() {
        let scene = InMemoryScene::new(vec![triangle_mesh().with_skin("skin.pcx")]);
        let config = static_config();
        assert_eq!(export_md2(&scene, &config).unwrap(), export_md2(&scene, &config).unwrap());
    }

    #[test]
    fn test_counts_sum_over_meshes() {
        let mut quad = Mesh::new("quad").with_skin("a.png");
        for p in [[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [2.0, 2.0, 1.0], [0.0, 2.0, 1.0]] {
            quad.add_vertex(Vertex::new(p, [0.0, 1.0, 0.0]));
        }
        quad.add_triangle(Triangle::new(0, 1, 2));
        quad.add_triangle(Triangle::new(0, 2, 3));
        let scene = InMemoryScene::new(vec![triangle_mesh().with_skin("a.png"), quad.with_skin("b.png")]);

        let bytes = export_md2(&scene, &static_config()).unwrap();
        assert_eq!(field(&bytes, NUM_XYZ), 7);
        assert_eq!(field(&bytes, NUM_TRIS), 3);
        assert_eq!(field(&bytes, NUM_ST), 9);
        assert_eq!(field(&bytes, NUM_SKINS), 2);
        assert_eq!(field(&bytes, NUM_GL_COMMANDS), 31);
        assert_eq!(field(&bytes, OFS_END) as usize, bytes.len());
    }

    #[test]
    fn test_scale_applies_to_frame_header() {
        let scene = InMemoryScene::new(vec![triangle_mesh()]);
        let bytes = export_md2(&scene, &ExportConfig::default().with_texture_copy(false, false)).unwrap();
        let ofs = field(&bytes, OFS_FRAMES) as usize;
        assert_eq!(read_f32(&bytes, ofs), 10.0 * (1.0 / 255.0));
    }

    #[test]
    fn test_animation_frame_names() {
        let scene = InMemoryScene::new(vec![triangle_mesh()])
            .with_frame_range(1, 3)
            .with_marker(2, "run")
            .with_marker(1, "stand");

        let bytes = export_md2(&scene, &static_config().with_animation(true)).unwrap();
        assert_eq!(field(&bytes, NUM_FRAMES), 3);
        let frame_size = field(&bytes, FRAME_SIZE) as usize;
        let ofs = field(&bytes, OFS_FRAMES) as usize;
        let name = |i: usize| &bytes[ofs + i * frame_size + 24..ofs + i * frame_size + 40];
        assert_eq!(&name(0)[..7], b"stand1\0");
        assert_eq!(&name(1)[..5], b"run2\0");
        assert_eq!(&name(2)[..5], b"run3\0");
    }

    #[test]
    fn test_invalid_frame_range() {
        let scene = InMemoryScene::new(vec![triangle_mesh()]).with_frame_range(5, 2);
        let mut out = Vec::new();
        let result = Md2Writer::new(static_config().with_animation(true)).write(&scene, &mut out);
        assert!(matches!(result, Err(ExportError::InvalidFrameRange { start: 5, end: 2 })));
        assert!(out.is_empty());

        // Static exports ignore the range.
        assert!(export_md2(&scene, &static_config()).is_ok());
    }

    #[test]
    fn test_full_i32_frame_range_is_rejected_before_sampling() {
        let scene = InMemoryScene::new(vec![triangle_mesh()]).with_frame_range(i32::MIN, i32::MAX);
        let mut out = Vec::new();
        let result = Md2Writer::new(static_config().with_animation(true)).write(&scene, &mut out);
        assert!(matches!(
            result,
            Err(ExportError::FormatLimitExceeded { what: "frames", .. })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_frame_count() {
        assert_eq!(frame_count(&(1..=1)), 1);
        assert_eq!(frame_count(&(-5..=4)), 10);
        assert_eq!(frame_count(&(i32::MIN..=i32::MAX)) as u64, 1u64 << 32);
    }

    #[test]
    fn test_topology_mismatch_writes_nothing() {
        let scene = InMemoryScene::new(vec![triangle_mesh()])
            .with_frame_range(1, 2)
            .with_pose(2, FrameSnapshot::new(vec![MeshPose::new(vec![[0.0; 3]], vec![[0.0; 3]])]));

        let mut out = Vec::new();
        let result = Md2Writer::new(static_config().with_animation(true)).write(&scene, &mut out);
        assert!(matches!(result, Err(ExportError::TopologyMismatch { .. })));
        assert!(out.is_empty());
    }

    #[test]
    fn test_empty_scene() {
        let scene = InMemoryScene::new(vec![Mesh::new("nothing")]);
        assert!(matches!(
            export_md2(&scene, &static_config()),
            Err(ExportError::EmptyScene)
        ));
    }

    #[test]
    fn test_export_to_path_copies_textures() {
        let dir = tempfile::tempdir().unwrap();
        let art = dir.path().join("art");
        fs::create_dir_all(&art).unwrap();
        fs::write(art.join("body.png"), b"body").unwrap();
        fs::write(art.join("head.tga"), b"head").unwrap();

        let mesh = triangle_mesh()
            .with_skin(art.join("body.png").to_string_lossy())
            .with_skin(art.join("head.tga").to_string_lossy())
            .with_skin(art.join("missing.pcx").to_string_lossy());
        let scene = InMemoryScene::new(vec![mesh]);

        let out_dir = dir.path().join("out");
        fs::create_dir_all(&out_dir).unwrap();
        let path = out_dir.join("hero.md2");
        let config = static_config().with_texture_copy(true, true);

        let report = export_md2_to_path(&scene, &config, &path).unwrap();
        let bytes = fs::read(&path).unwrap();
        assert_eq!(report.bytes_written, bytes.len());
        assert_eq!(report.header.file_size(), bytes.len());

        assert_eq!(fs::read(out_dir.join("hero.png")).unwrap(), b"body");
        assert_eq!(fs::read(out_dir.join("head.tga")).unwrap(), b"head");
        assert_eq!(report.textures.iter().filter(|t| !t.succeeded()).count(), 1);

        let ofs = field(&bytes, OFS_SKINS) as usize;
        assert_eq!(&bytes[ofs..ofs + 10], b"hero.png\0\0");
        assert_eq!(&bytes[ofs + 64..ofs + 73], b"head.tga\0");
        assert_eq!(&bytes[ofs + 128..ofs + 140], b"missing.pcx\0");
    }

    #[test]
    fn test_export_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hero.md2");
        fs::write(&path, b"stale model").unwrap();

        let scene = InMemoryScene::new(vec![triangle_mesh()]);
        let config = static_config();
        export_md2_to_path(&scene, &config, &path).unwrap();

        assert_eq!(fs::read(&path).unwrap(), export_md2(&scene, &config).unwrap());
        assert!(!dir.path().join("hero.md2.tmp").exists());
    }

    #[test]
    fn test_failed_replace_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in the way makes the final rename fail after the
        // model has been fully written.
        let path = dir.path().join("hero.md2");
        fs::create_dir(&path).unwrap();

        let scene = InMemoryScene::new(vec![triangle_mesh()]);
        let result = export_md2_to_path(&scene, &static_config(), &path);
        assert!(matches!(result, Err(ExportError::Io(_))));
        assert!(path.is_dir());
        assert!(!dir.path().join("hero.md2.tmp").exists());
    }

    #[test]
    fn test_textures_not_copied_when_model_cannot_be_created() {
        let dir = tempfile::tempdir().unwrap();
        let skin = dir.path().join("body.png");
        fs::write(&skin, b"body").unwrap();
        let out_dir = dir.path().join("out");
        fs::create_dir_all(out_dir.join("hero.md2.tmp")).unwrap();

        let scene = InMemoryScene::new(vec![triangle_mesh().with_skin(skin.to_string_lossy())]);
        let config = static_config().with_texture_copy(true, true);
        let result = export_md2_to_path(&scene, &config, out_dir.join("hero.md2"));

        assert!(matches!(result, Err(ExportError::Io(_))));
        assert!(!out_dir.join("hero.png").exists());
        assert!(!out_dir.join("hero.md2").exists());
    }

    #[test]
    fn test_config_from_json_uses_defaults() {
        let config = ExportConfig::from_json_str(r#"{ "scale": 1.5, "export_animation": true }"#).unwrap();
        assert_eq!(config.scale, 1.5);
        assert!(config.export_animation);
        assert!(config.shared_bounding_box);
        assert_eq!(config.bounds_mode(), BoundsMode::Shared);
        assert_eq!(ExportConfig::default().bounds_mode(), BoundsMode::PerFrame);
    }
}

//! The 68-byte MD2 header and section layout.

use super::frame::frame_size;
use super::geometry::{SKIN_HEIGHT, SKIN_WIDTH, TEXCOORD_SIZE, TRIANGLE_SIZE};
use super::glcmds::{command_count, GL_COMMAND_SIZE};
use super::skins::SKIN_NAME_SIZE;
use crate::error::{ExportError, Result};
use crate::scene::Mesh;
use serde::Serialize;

/// File identifier.
pub const MD2_MAGIC: [u8; 4] = *b"IDP2";
/// Format version.
pub const MD2_VERSION: i32 = 8;
/// Size of the header; the skin section starts here.
pub const HEADER_SIZE: usize = 68;

/// Most vertices a model may have.
pub const MAX_VERTICES: usize = 65535;
/// Most triangle corners a model may have (`3 * num_tris`).
pub const MAX_TRIANGLE_CORNERS: usize = 65536;

/// Counts and section offsets of an MD2 file.
///
/// Every `ofs_*` field is the sum of the sizes of all earlier sections, and
/// `ofs_end` is the file size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Header {
    pub skin_width: i32,
    pub skin_height: i32,
    pub frame_size: i32,
    pub num_skins: i32,
    pub num_xyz: i32,
    pub num_st: i32,
    pub num_tris: i32,
    pub num_gl_commands: i32,
    pub num_frames: i32,
    pub ofs_skins: i32,
    pub ofs_st: i32,
    pub ofs_tris: i32,
    pub ofs_frames: i32,
    pub ofs_gl_commands: i32,
    pub ofs_end: i32,
}

impl Header {
    /// Serialize to the on-disk layout (little-endian).
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let fields = [
            MD2_VERSION,
            self.skin_width,
            self.skin_height,
            self.frame_size,
            self.num_skins,
            self.num_xyz,
            self.num_st,
            self.num_tris,
            self.num_gl_commands,
            self.num_frames,
            self.ofs_skins,
            self.ofs_st,
            self.ofs_tris,
            self.ofs_frames,
            self.ofs_gl_commands,
            self.ofs_end,
        ];

        let mut bytes = [0u8; HEADER_SIZE];
        bytes[..4].copy_from_slice(&MD2_MAGIC);
        for (i, field) in fields.iter().enumerate() {
            let at = 4 + i * 4;
            bytes[at..at + 4].copy_from_slice(&field.to_le_bytes());
        }
        bytes
    }

    /// Total file size in bytes.
    pub fn file_size(&self) -> usize {
        self.ofs_end as usize
    }
}

/// Element counts a header is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModelCounts {
    pub num_skins: usize,
    pub num_xyz: usize,
    pub num_tris: usize,
    pub num_frames: usize,
}

impl ModelCounts {
    /// Sum vertex and triangle counts over `meshes`.
    pub fn from_meshes(meshes: &[Mesh], num_skins: usize, num_frames: usize) -> Self {
        Self {
            num_skins,
            num_xyz: meshes.iter().map(Mesh::vertex_count).sum(),
            num_tris: meshes.iter().map(Mesh::triangle_count).sum(),
            num_frames,
        }
    }
}

/// Computes and validates header layout.
pub struct HeaderBuilder;

impl HeaderBuilder {
    /// Check counts against the 16-bit index limits.
    pub fn validate(num_xyz: usize, num_tris: usize) -> Result<()> {
        if num_xyz > MAX_VERTICES {
            return Err(ExportError::FormatLimitExceeded {
                what: "vertices",
                count: num_xyz,
                limit: MAX_VERTICES,
            });
        }
        let corners = num_tris.saturating_mul(3);
        if corners > MAX_TRIANGLE_CORNERS {
            return Err(ExportError::FormatLimitExceeded {
                what: "triangle corners",
                count: corners,
                limit: MAX_TRIANGLE_CORNERS,
            });
        }
        Ok(())
    }

    /// Compute every count and offset, or fail before anything is written.
    pub fn build(counts: ModelCounts) -> Result<Header> {
        Self::validate(counts.num_xyz, counts.num_tris)?;

        let num_st = counts.num_tris * 3;
        let num_gl_commands = command_count(counts.num_tris);
        let frame_size = frame_size(counts.num_xyz);

        let ofs_skins = HEADER_SIZE as u64;
        let ofs_st = ofs_skins + (SKIN_NAME_SIZE * counts.num_skins) as u64;
        let ofs_tris = ofs_st + (TEXCOORD_SIZE * num_st) as u64;
        let ofs_frames = ofs_tris + (TRIANGLE_SIZE * counts.num_tris) as u64;
        let ofs_gl_commands = ofs_frames + frame_size as u64 * counts.num_frames as u64;
        let ofs_end = ofs_gl_commands + (GL_COMMAND_SIZE * num_gl_commands) as u64;

        let field = |what: &'static str, value: u64| -> Result<i32> {
            i32::try_from(value).map_err(|_| ExportError::FormatLimitExceeded {
                what,
                count: value as usize,
                limit: i32::MAX as usize,
            })
        };

        Ok(Header {
            skin_width: SKIN_WIDTH,
            skin_height: SKIN_HEIGHT,
            frame_size: frame_size as i32,
            num_skins: field("skins", counts.num_skins as u64)?,
            num_xyz: counts.num_xyz as i32,
            num_st: num_st as i32,
            num_tris: counts.num_tris as i32,
            num_gl_commands: num_gl_commands as i32,
            num_frames: field("frames", counts.num_frames as u64)?,
            ofs_skins: ofs_skins as i32,
            ofs_st: field("bytes", ofs_st)?,
            ofs_tris: field("bytes", ofs_tris)?,
            ofs_frames: field("bytes", ofs_frames)?,
            ofs_gl_commands: field("bytes", ofs_gl_commands)?,
            ofs_end: field("bytes", ofs_end)?,
        })
    }
}

//! Frame encoding: 8-bit fixed-point vertices plus normal indices.

use super::fixed_string::write_fixed_string;
use super::normals::NormalCodebook;
use crate::scene::FrameSnapshot;
use crate::types::BoundingBox;

/// Bytes before the vertex records: scale, translate and name.
pub const FRAME_HEADER_SIZE: usize = 40;
/// Width of the frame name field, terminator included.
pub const FRAME_NAME_SIZE: usize = 16;
/// Bytes per vertex record.
pub const FRAME_VERTEX_SIZE: usize = 4;

/// Size of one frame holding `num_xyz` vertices.
pub fn frame_size(num_xyz: usize) -> usize {
    FRAME_HEADER_SIZE + FRAME_VERTEX_SIZE * num_xyz
}

/// Maps positions inside a bounding box onto `0..=255` per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantizer {
    min: [f32; 3],
    extent: [f32; 3],
}

impl Quantizer {
    pub fn new(bbox: &BoundingBox) -> Self {
        Self {
            min: bbox.min,
            extent: bbox.dimensions(),
        }
    }

    /// Size of one quantization step per axis; 0 on a flat axis.
    pub fn step(&self) -> [f32; 3] {
        self.extent.map(|e| e / 255.0)
    }

    pub fn min(&self) -> [f32; 3] {
        self.min
    }

    /// `floor((p - min) * 255 / (max - min))`, clamped to a byte.
    ///
    /// A flat axis quantizes to 0. Arithmetic is done in f64 so a vertex on
    /// the box maximum lands exactly on 255.
    pub fn quantize(&self, p: [f32; 3]) -> [u8; 3] {
        let mut q = [0u8; 3];
        for axis in 0..3 {
            let extent = self.extent[axis] as f64;
            if extent <= 0.0 {
                continue;
            }
            let offset = p[axis] as f64 - self.min[axis] as f64;
            let v = (offset * 255.0 / extent).floor();
            // NaN casts to 0.
            q[axis] = v.clamp(0.0, 255.0) as u8;
        }
        q
    }

    /// Position a reader recovers from `q`, before the global scale.
    pub fn reconstruct(&self, q: [u8; 3]) -> [f32; 3] {
        let step = self.step();
        [
            self.min[0] + q[0] as f32 * step[0],
            self.min[1] + q[1] as f32 * step[1],
            self.min[2] + q[2] as f32 * step[2],
        ]
    }
}

/// Encodes one animation frame.
pub struct FrameEncoder;

impl FrameEncoder {
    /// Encode a frame from parallel position and normal slices.
    ///
    /// Layout: `scale * step` (3 × f32), `scale * min` (3 × f32), a 16-byte
    /// name, then one `[x, y, z, normal_index]` record per vertex.
    pub fn encode(
        name: &str,
        positions: &[[f32; 3]],
        normals: &[[f32; 3]],
        bbox: &BoundingBox,
        scale: f32,
    ) -> Vec<u8> {
        debug_assert_eq!(positions.len(), normals.len(), "one normal per position");
        let mut buf = Vec::with_capacity(frame_size(positions.len()));
        Self::encode_into(
            &mut buf,
            name,
            positions.iter().copied().zip(normals.iter().copied()),
            bbox,
            scale,
        );
        buf
    }

    /// Encode every mesh of a snapshot as one frame.
    pub fn encode_snapshot(name: &str, snapshot: &FrameSnapshot, bbox: &BoundingBox, scale: f32) -> Vec<u8> {
        let mut buf = Vec::with_capacity(frame_size(snapshot.vertex_count()));
        Self::encode_into(&mut buf, name, snapshot.positions().zip(snapshot.normals()), bbox, scale);
        buf
    }

    fn encode_into(
        buf: &mut Vec<u8>,
        name: &str,
        vertices: impl Iterator<Item = ([f32; 3], [f32; 3])>,
        bbox: &BoundingBox,
        scale: f32,
    ) {
        let quantizer = Quantizer::new(bbox);

        for s in quantizer.step() {
            buf.extend_from_slice(&(scale * s).to_le_bytes());
        }
        for m in quantizer.min() {
            buf.extend_from_slice(&(scale * m).to_le_bytes());
        }
        write_fixed_string(buf, name, FRAME_NAME_SIZE);

        for (position, normal) in vertices {
            let q = quantizer.quantize(position);
            buf.extend_from_slice(&q);
            buf.push(NormalCodebook::closest_index(normal));
        }
    }
}

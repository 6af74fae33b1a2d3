//! Encoders for the sections of a Quake II MD2 file.
//!
//! A file is laid out as: header, skin names, texture coordinates,
//! triangles, frames, GL commands. Each encoder here is a pure function of
//! its inputs that appends one section to a byte buffer; the offsets come
//! from [`HeaderBuilder`].

pub mod bounds;
pub mod fixed_string;
pub mod frame;
pub mod geometry;
pub mod glcmds;
pub mod header;
pub mod normals;
pub mod skins;

pub use bounds::{BoundingBoxTracker, BoundsMode};
pub use fixed_string::{fixed_string, truncate_utf8, write_fixed_string};
pub use frame::{frame_size, FrameEncoder, Quantizer};
pub use geometry::{encode_texcoords, encode_triangles, texcoord, SKIN_HEIGHT, SKIN_WIDTH};
pub use glcmds::encode_gl_commands;
pub use header::{Header, HeaderBuilder, ModelCounts, MD2_MAGIC, MD2_VERSION};
pub use normals::{NormalCodebook, MD2_NORMALS};
pub use skins::{encode_skins, skin_name};

//! Error types for the MD2 exporter.

use thiserror::Error;

/// Result type alias using ExportError.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Main error type for MD2 export operations.
#[derive(Error, Debug)]
pub enum ExportError {
    /// A count does not fit the 16-bit index fields of the MD2 format.
    #[error("Too many {what} for MD2: {count} (at most {limit} are supported)")]
    FormatLimitExceeded {
        what: &'static str,
        count: usize,
        limit: usize,
    },

    /// I/O error while writing the model or reading the scene.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a JSON scene or config.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The scene has no vertices, so no bounding box can be formed.
    #[error("Scene contains no vertices to export")]
    EmptyScene,

    /// Animation export was requested with an inverted frame range.
    #[error("Invalid frame range: end {end} is before start {start}")]
    InvalidFrameRange { start: i32, end: i32 },

    /// A frame snapshot does not match the base mesh layout.
    #[error("Mesh {mesh}: expected {expected} vertices in frame snapshot, got {actual}")]
    TopologyMismatch {
        mesh: usize,
        expected: usize,
        actual: usize,
    },

    /// A triangle refers to a vertex outside its mesh.
    #[error("Mesh {mesh}: triangle {triangle} references missing vertex {index}")]
    InvalidIndex {
        mesh: usize,
        triangle: usize,
        index: u32,
    },

    /// The scene description is malformed.
    #[error("Invalid scene: {0}")]
    InvalidScene(String),
}

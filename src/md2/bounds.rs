//! Bounding boxes used to quantize frames.

use crate::error::{ExportError, Result};
use crate::scene::FrameSnapshot;
use crate::types::BoundingBox;
use serde::{Deserialize, Serialize};

/// How frame bounding boxes are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundsMode {
    /// Each frame is quantized against its own box.
    PerFrame,
    /// One box over every frame, so static vertices do not jitter between
    /// frames.
    Shared,
}

/// Running min/max over vertex positions.
pub struct BoundingBoxTracker;

impl BoundingBoxTracker {
    /// Grow `bbox` over `vertices`, starting from the first vertex when
    /// `bbox` is `None`. Stays `None` only if both are empty.
    pub fn update(bbox: Option<BoundingBox>, vertices: impl IntoIterator<Item = [f32; 3]>) -> Option<BoundingBox> {
        let mut bbox = bbox;
        for p in vertices {
            match bbox.as_mut() {
                Some(b) => b.include(p),
                None => bbox = Some(BoundingBox::from_point(p)),
            }
        }
        bbox
    }

    /// Box of a single snapshot.
    pub fn frame(snapshot: &FrameSnapshot) -> Result<BoundingBox> {
        Self::update(None, snapshot.positions()).ok_or(ExportError::EmptyScene)
    }

    /// One box over every snapshot. Must be complete before any frame is
    /// quantized.
    pub fn shared(snapshots: &[FrameSnapshot]) -> Result<BoundingBox> {
        snapshots
            .iter()
            .fold(None, |bbox, s| Self::update(bbox, s.positions()))
            .ok_or(ExportError::EmptyScene)
    }

    /// Box to quantize each snapshot with.
    pub fn for_frames(mode: BoundsMode, snapshots: &[FrameSnapshot]) -> Result<Vec<BoundingBox>> {
        match mode {
            BoundsMode::Shared => {
                let bbox = Self::shared(snapshots)?;
                Ok(vec![bbox; snapshots.len()])
            }
            BoundsMode::PerFrame => snapshots.iter().map(Self::frame).collect(),
        }
    }
}

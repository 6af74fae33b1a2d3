//! A scene held entirely in memory.

use super::{FrameSnapshot, Mesh, SceneProvider, TimelineMarker};
use crate::error::Result;
use std::collections::BTreeMap;

/// Scene built from meshes the caller already holds.
///
/// Mesh vertices are taken to be in export axes. Frames without an explicit
/// pose evaluate to the meshes' own vertices.
#[derive(Debug, Clone, Default)]
pub struct InMemoryScene {
    meshes: Vec<Mesh>,
    poses: BTreeMap<i32, FrameSnapshot>,
    markers: Vec<TimelineMarker>,
    frame_start: i32,
    frame_end: i32,
    current_frame: Option<i32>,
}

impl InMemoryScene {
    pub fn new(meshes: Vec<Mesh>) -> Self {
        Self {
            meshes,
            frame_start: 1,
            frame_end: 1,
            ..Self::default()
        }
    }

    pub fn with_frame_range(mut self, start: i32, end: i32) -> Self {
        self.frame_start = start;
        self.frame_end = end;
        self
    }

    pub fn with_current_frame(mut self, frame: i32) -> Self {
        self.current_frame = Some(frame);
        self
    }

    pub fn with_marker(mut self, frame: i32, name: impl Into<String>) -> Self {
        self.markers.push(TimelineMarker::new(frame, name));
        self
    }

    /// Use `snapshot` as the geometry at `frame`.
    pub fn with_pose(mut self, frame: i32, snapshot: FrameSnapshot) -> Self {
        self.poses.insert(frame, snapshot);
        self
    }
}

impl SceneProvider for InMemoryScene {
    fn list_meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    fn evaluate_at(&self, frame: i32) -> Result<FrameSnapshot> {
        Ok(self
            .poses
            .get(&frame)
            .cloned()
            .unwrap_or_else(|| FrameSnapshot::from_meshes(&self.meshes)))
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

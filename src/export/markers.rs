//! Frame names from timeline markers.

use crate::scene::TimelineMarker;

/// Name used when a scene has no markers, and for static exports.
pub const DEFAULT_FRAME_NAME: &str = "frame";

/// Picks the name of each exported frame.
///
/// A frame takes the name of the last marker at or before it, followed by
/// its frame number (`run12`). Frames before the first marker use the first
/// marker. Without markers every frame is `frame<N>`.
#[derive(Debug, Clone, Default)]
pub struct FrameNamer {
    markers: Vec<TimelineMarker>,
}

impl FrameNamer {
    /// Sort markers by frame. Where several share a frame, the last one wins.
    pub fn new(markers: Vec<TimelineMarker>) -> Self {
        let mut sorted = markers;
        sorted.sort_by_key(|m| m.frame);

        let mut unique: Vec<TimelineMarker> = Vec::with_capacity(sorted.len());
        for marker in sorted {
            match unique.last_mut() {
                Some(last) if last.frame == marker.frame => *last = marker,
                _ => unique.push(marker),
            }
        }

        Self { markers: unique }
    }

    pub fn markers(&self) -> &[TimelineMarker] {
        &self.markers
    }

    /// Marker active at `frame`, if there are any markers.
    pub fn active_marker(&self, frame: i32) -> Option<&TimelineMarker> {
        let after = self.markers.partition_point(|m| m.frame <= frame);
        self.markers.get(after.saturating_sub(1))
    }

    pub fn name_for(&self, frame: i32) -> String {
        let base = self
            .active_marker(frame)
            .map(|m| m.name.as_str())
            .unwrap_or(DEFAULT_FRAME_NAME);
        format!("{}{}", base, frame)
    }
}

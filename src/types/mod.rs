//! Shared types used throughout the library.

mod transform;

pub use transform::{normal_matrix, Transform};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl BoundingBox {
    pub fn new(min: [f32; 3], max: [f32; 3]) -> Self {
        Self { min, max }
    }

    /// A zero-size box around a single point.
    pub fn from_point(p: [f32; 3]) -> Self {
        Self { min: p, max: p }
    }

    /// Grow the box to contain `p`.
    pub fn include(&mut self, p: [f32; 3]) {
        for i in 0..3 {
            if p[i] < self.min[i] {
                self.min[i] = p[i];
            }
            if p[i] > self.max[i] {
                self.max[i] = p[i];
            }
        }
    }

    pub fn dimensions(&self) -> [f32; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_include_grows_box() {
        let mut bbox = BoundingBox::from_point([0.0, 2.0, -1.0]);
        bbox.include([1.0, -3.0, 0.5]);
        bbox.include([0.5, 0.0, 4.0]);
        assert_eq!(bbox.min, [0.0, -3.0, -1.0]);
        assert_eq!(bbox.max, [1.0, 2.0, 4.0]);
        assert_eq!(bbox.dimensions(), [1.0, 5.0, 5.0]);
    }

    #[test]
    fn test_point_box_is_flat() {
        let bbox = BoundingBox::from_point([3.0, 3.0, 3.0]);
        assert_eq!(bbox.dimensions(), [0.0; 3]);
    }
}

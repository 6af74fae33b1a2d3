//! Object world transforms for scene descriptions.

use glam::{Mat3, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Translation, rotation and scale of a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub translation: [f32; 3],
    /// Rotation quaternion as `[x, y, z, w]`.
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: [0.0; 3],
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: [1.0; 3],
        }
    }
}

impl Transform {
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_array(self.rotation).normalize()
    }

    /// Object-to-world matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::from_array(self.scale),
            self.rotation_quat(),
            Vec3::from_array(self.translation),
        )
    }

    /// Blend towards `other`; rotation uses slerp.
    pub fn lerp(&self, other: &Transform, t: f32) -> Transform {
        let translation = Vec3::from_array(self.translation).lerp(Vec3::from_array(other.translation), t);
        let scale = Vec3::from_array(self.scale).lerp(Vec3::from_array(other.scale), t);
        let rotation = self.rotation_quat().slerp(other.rotation_quat(), t);
        Transform {
            translation: translation.to_array(),
            rotation: rotation.to_array(),
            scale: scale.to_array(),
        }
    }
}

/// Matrix that carries normals through `m` (inverse-transpose of its linear part).
/// Falls back to the linear part itself when it cannot be inverted.
pub fn normal_matrix(m: &Mat4) -> Mat3 {
    let linear = Mat3::from_mat4(*m);
    if linear.determinant().abs() <= f32::EPSILON {
        linear
    } else {
        linear.inverse().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matrix_is_identity() {
        assert_eq!(Transform::default().matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_lerp_halfway() {
        let a = Transform::default();
        let b = Transform {
            translation: [2.0, 0.0, -4.0],
            scale: [3.0, 1.0, 1.0],
            ..Transform::default()
        };
        let mid = a.lerp(&b, 0.5);
        assert_eq!(mid.translation, [1.0, 0.0, -2.0]);
        assert_eq!(mid.scale, [2.0, 1.0, 1.0]);
    }

    #[test]
    fn test_normal_matrix_undoes_non_uniform_scale() {
        let t = Transform {
            scale: [2.0, 1.0, 1.0],
            ..Transform::default()
        };
        let n = normal_matrix(&t.matrix()) * Vec3::X;
        assert!((n.x - 0.5).abs() < 1e-6);
    }
}

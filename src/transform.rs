//! Spatial transforms for shapes and model nodes.
//!
//! [`Transform`] stores translation, an Euler rotation and a scale separately and only
//! combines them into a matrix when the scene is flattened for rendering. Rotation is kept
//! as Euler angles (XYZ order, radians) because every animation rule in the scene drives a
//! single axis directly, e.g. "arm rotation about Z follows a sine wave".
//!
//! ```
//! use portfolio3d::{Transform, Vec3};
//!
//! let t = Transform::new()
//!     .position(Vec3::new(-15.0, 5.0, -10.0))
//!     .rotation(Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_6))
//!     .uniform_scale(2.0);
//! assert_eq!(t.scale, Vec3::splat(2.0));
//! ```

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Position, rotation and scale of a node relative to its parent.
///
/// # Transformation Order
///
/// [`Transform::matrix()`] applies **Scale → Rotate → Translate**. The rotation is
/// `Rx · Ry · Rz`, so a vector is first rotated about Z, then Y, then X.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Translation relative to the parent.
    pub position: Vec3,
    /// Euler angles in radians, applied in XYZ order.
    pub rotation: Vec3,
    /// Scale factors for each axis.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Creates an identity transform (origin, no rotation, unit scale).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transform positioned at the given location.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Sets the position (translation) component.
    pub fn position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Sets the Euler rotation (radians, XYZ order).
    pub fn rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets non-uniform scale factors for each axis.
    pub fn scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Sets uniform scale on all axes.
    pub fn uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    /// The rotation as a unit quaternion.
    pub fn quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    /// Converts this transform to a 4×4 matrix (SRT order).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn identity_matrix_by_default() {
        assert_eq!(Transform::new().matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn rotation_applies_z_before_x() {
        // Z quarter-turn maps +X to +Y, then X quarter-turn maps +Y to +Z.
        let t = Transform::new().rotation(Vec3::new(FRAC_PI_2, 0.0, FRAC_PI_2));
        let p = t.matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::Z).length() < 1e-5, "got {p:?}");
    }

    #[test]
    fn scale_then_translate() {
        let t = Transform::from_position(Vec3::new(1.0, 0.0, 0.0)).uniform_scale(2.0);
        let p = t.matrix().transform_point3(Vec3::new(1.0, 1.0, 1.0));
        assert!((p - Vec3::new(3.0, 2.0, 2.0)).length() < 1e-6);
    }
}

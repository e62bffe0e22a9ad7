//! Perspective camera and the mouse-parallax rig that drives the background view.

use glam::{Mat4, Vec2, Vec3};

/// Fraction of the remaining distance the parallax camera covers each frame.
pub const EASING_FACTOR: f32 = 0.05;
/// Pointer offset to camera target scale.
pub const PARALLAX_SCALE: f32 = 0.5;

/// A perspective camera that looks at a fixed point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: 75f32.to_radians(),
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    pub fn looking_at(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    /// Normalized view direction.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or(Vec3::NEG_Z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov, aspect, self.near, self.far)
    }
}

/// Mouse-parallax controller for the background camera.
///
/// Each frame the camera's X/Y position moves [`EASING_FACTOR`] of the way toward a
/// target derived from the pointer offset, and the camera keeps looking at the origin.
///
/// ```
/// use portfolio3d::{CameraRig, Vec2};
///
/// let mut rig = CameraRig::new(30.0);
/// for _ in 0..200 {
///     rig.ease_toward(Vec2::new(4.0, -2.0));
/// }
/// assert!((rig.camera.position.x - 2.0).abs() < 1e-3);
/// assert!((rig.camera.position.y - 1.0).abs() < 1e-3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraRig {
    pub camera: Camera,
}

impl CameraRig {
    /// A rig whose camera sits on the +Z axis at `distance`, looking at the origin.
    pub fn new(distance: f32) -> Self {
        Self {
            camera: Camera::new().at(0.0, 0.0, distance).looking_at(Vec3::ZERO),
        }
    }

    /// Camera X/Y the rig settles at for a pointer offset. Screen Y grows downward, so
    /// the vertical target is flipped.
    pub fn target_for(pointer: Vec2) -> Vec2 {
        Vec2::new(pointer.x * PARALLAX_SCALE, -pointer.y * PARALLAX_SCALE)
    }

    /// Advance one frame toward the pointer target.
    pub fn ease_toward(&mut self, pointer: Vec2) {
        let target = Self::target_for(pointer);
        let pos = &mut self.camera.position;
        pos.x += (target.x - pos.x) * EASING_FACTOR;
        pos.y += (target.y - pos.y) * EASING_FACTOR;
        self.camera.target = Vec3::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_is_monotone_and_never_overshoots() {
        let mut rig = CameraRig::new(30.0);
        let pointer = Vec2::new(6.0, 3.0);
        let target = CameraRig::target_for(pointer);

        let mut prev_gap = (target - rig.camera.position.truncate()).length();
        for _ in 0..500 {
            rig.ease_toward(pointer);
            let pos = rig.camera.position.truncate();
            let gap = (target - pos).length();
            assert!(gap <= prev_gap);
            assert!(pos.x <= target.x + 1e-6);
            assert!(pos.y >= target.y - 1e-6);
            prev_gap = gap;
        }
        assert!(prev_gap < 1e-3);
        assert_eq!(rig.camera.position.z, 30.0);
        assert_eq!(rig.camera.target, Vec3::ZERO);
    }

    #[test]
    fn one_step_covers_five_percent() {
        let mut rig = CameraRig::new(10.0);
        rig.ease_toward(Vec2::new(2.0, 0.0));
        assert!((rig.camera.position.x - 0.05).abs() < 1e-7);
    }

    #[test]
    fn view_looks_down_negative_z() {
        let cam = Camera::new().at(0.0, 0.0, 30.0);
        assert!((cam.forward() - Vec3::NEG_Z).length() < 1e-6);
        let p = cam.view_matrix().transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(0.0, 0.0, -30.0)).length() < 1e-5);
    }
}

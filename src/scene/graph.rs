//! The full-window background scene.
//!
//! [`SceneGraph`] owns the three placed models, the particle field, the parallax camera and
//! the seeded RNG behind the flame flicker. Its membership is fixed once composed.

use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::rngs::StdRng;

use crate::animation::{self, Animated, AnimationState, Placement};
use crate::camera::{Camera, CameraRig};
use crate::color::Color;
use crate::models::{Crystal, Robot, Spaceship};
use crate::particles::ParticleField;
use crate::shape::ShapeDescriptor;

use super::{Lighting, Stage};

/// Rest placement of each background model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placements {
    pub robot: Placement,
    pub spaceship: Placement,
    pub crystal: Placement,
}

impl Default for Placements {
    fn default() -> Self {
        Self {
            robot: Placement {
                position: Vec3::new(-15.0, 5.0, -10.0),
                scale: 2.0,
            },
            spaceship: Placement {
                position: Vec3::new(15.0, -5.0, -15.0),
                scale: 1.5,
            },
            crystal: Placement {
                position: Vec3::new(0.0, 10.0, -20.0),
                scale: 3.0,
            },
        }
    }
}

/// The full-window background scene.
///
/// Membership is fixed by [`compose`](super::compose); [`tick`](Animated::tick) only
/// rewrites transforms and the flame flicker.
pub struct SceneGraph {
    pub robot: Robot,
    pub spaceship: Spaceship,
    pub crystal: Crystal,
    pub particles: ParticleField,
    pub rig: CameraRig,
    pub lighting: Lighting,
    pub clear_color: Color,
    pub placements: Placements,
    seed: u64,
    rng: StdRng,
}

impl SceneGraph {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        robot: Robot,
        spaceship: Spaceship,
        crystal: Crystal,
        particles: ParticleField,
        rig: CameraRig,
        lighting: Lighting,
        placements: Placements,
        seed: u64,
        rng: StdRng,
    ) -> Self {
        let clear_color = lighting.fog.map_or(Color::BLACK, |fog| fog.color);
        Self {
            robot,
            spaceship,
            crystal,
            particles,
            rig,
            lighting,
            clear_color,
            placements,
            seed,
            rng,
        }
    }

    /// Seed the particle field and flicker were drawn from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn model_count(&self) -> usize {
        3
    }
}

impl Animated for SceneGraph {
    fn name(&self) -> &str {
        "background"
    }

    fn tick(&mut self, anim: &AnimationState) {
        let t = anim.elapsed;
        self.rig.ease_toward(anim.pointer);
        self.particles.spin();
        animation::animate_robot(&mut self.robot, t);
        animation::animate_spaceship(&mut self.spaceship, self.placements.spaceship, t, &mut self.rng);
        animation::animate_crystal(&mut self.crystal, self.placements.crystal, t);
    }
}

impl Stage for SceneGraph {
    fn camera(&self) -> &Camera {
        &self.rig.camera
    }

    fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    fn world_shapes(&self) -> Vec<(Mat4, &ShapeDescriptor)> {
        let mut out = self.robot.node.world_shapes(Mat4::IDENTITY);
        out.extend(self.spaceship.node.world_shapes(Mat4::IDENTITY));
        out.extend(self.crystal.node.world_shapes(Mat4::IDENTITY));
        out
    }

    fn particles(&self) -> Option<(&ParticleField, Mat4)> {
        let r = self.particles.rotation;
        let rotation = Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z);
        Some((&self.particles, Mat4::from_quat(rotation)))
    }

    fn clear_color(&self) -> Option<Color> {
        Some(self.clear_color)
    }
}

#[cfg(test)]
mod tests {
    use super::super::{CompositionConfig, compose};
    use super::*;
    use glam::Vec2;

    fn small() -> CompositionConfig {
        CompositionConfig::default().particles(64).seed(9)
    }

    #[test]
    fn identical_inputs_give_identical_scenes() {
        let mut a = compose(&small());
        let mut b = compose(&small());
        for i in 0..30 {
            let anim = AnimationState::new(i as f32 / 60.0, Vec2::new(1.5, -0.5));
            a.tick(&anim);
            b.tick(&anim);
        }
        let sa: Vec<Mat4> = a.world_shapes().into_iter().map(|(m, _)| m).collect();
        let sb: Vec<Mat4> = b.world_shapes().into_iter().map(|(m, _)| m).collect();
        assert_eq!(sa, sb);
        assert_eq!(a.rig, b.rig);
        assert_eq!(
            a.spaceship.flame_material.get(),
            b.spaceship.flame_material.get()
        );
    }

    #[test]
    fn repeated_tick_at_same_time_keeps_time_driven_fields() {
        let mut graph = compose(&small());
        let anim = AnimationState::new(2.5, Vec2::ZERO);
        graph.tick(&anim);
        let arm = graph.robot.node.shape(graph.robot.left_arm).transform;
        let ship_y = graph.spaceship.node.transform.position.y;
        let crystal = graph.crystal.node.transform;

        graph.tick(&anim);
        assert_eq!(graph.robot.node.shape(graph.robot.left_arm).transform, arm);
        assert_eq!(graph.spaceship.node.transform.position.y, ship_y);
        assert_eq!(graph.crystal.node.transform.position, crystal.position);
        assert_eq!(graph.crystal.node.transform.scale, crystal.scale);
        assert_eq!(graph.crystal.node.transform.rotation.x, crystal.rotation.x);
    }

    #[test]
    fn membership_is_fixed_by_ticks() {
        let mut graph = compose(&small());
        let before = graph.world_shapes().len();
        for i in 0..10 {
            graph.tick(&AnimationState::new(i as f32, Vec2::ONE));
        }
        assert_eq!(graph.world_shapes().len(), before);
        assert_eq!(before, 14 + 7 + 8);
        assert_eq!(graph.particles.len(), 64);
    }

    #[test]
    fn particles_spin_every_tick() {
        let mut graph = compose(&small());
        graph.tick(&AnimationState::default());
        graph.tick(&AnimationState::default());
        assert!((graph.particles.rotation.y - 0.001).abs() < 1e-7);
        assert!(graph.particles().is_some());
    }
}

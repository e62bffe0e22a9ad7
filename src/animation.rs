//! The per-frame animation driver.
//!
//! Every animated scene implements [`Animated`]; the [`FrameScheduler`] calls
//! [`Animated::tick`] once per display frame on each registered scene with the same
//! [`AnimationState`]. Scenes never see each other.
//!
//! Most rules are pure functions of elapsed time and the part's rest transform, so ticking
//! twice with the same `elapsed` yields the same values. The continuous spins (model Y
//! rotation, particle rotation, showcase rotation) are fixed increments per frame and
//! therefore depend on the frame rate.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::models::{Crystal, Robot, Spaceship};
use crate::models::robot::ARM_REST_ANGLE;
use crate::models::spaceship::FLAME_BASE_OPACITY;
use crate::node::ModelNode;

/// Input to one frame of animation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationState {
    /// Seconds since the scene started; never decreases.
    pub elapsed: f32,
    /// Normalized pointer offset from the viewport centre.
    pub pointer: Vec2,
}

impl AnimationState {
    pub fn new(elapsed: f32, pointer: Vec2) -> Self {
        Self { elapsed, pointer }
    }
}

/// A scene that updates its transforms once per frame.
pub trait Animated {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Apply one frame of animation in place.
    fn tick(&mut self, anim: &AnimationState);
}

/// Per-frame spin increments, in radians per frame.
pub mod spin {
    pub const ROBOT_Y: f32 = 0.01;
    pub const SPACESHIP_Y: f32 = 0.008;
    pub const CRYSTAL_Y: f32 = 0.005;
    pub const SHOWCASE_X: f32 = 0.005;
    pub const SHOWCASE_Y: f32 = 0.01;
}

/// Rest positions and scale the background models oscillate around.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    pub scale: f32,
}

/// Robot: steady Y spin and arms swinging in opposite phase.
pub fn animate_robot(robot: &mut Robot, t: f32) {
    robot.node.transform.rotation.y += spin::ROBOT_Y;
    robot.node.shape_mut(robot.left_arm).transform.rotation.z =
        (t * 2.0).sin() * 0.3 + ARM_REST_ANGLE;
    robot.node.shape_mut(robot.right_arm).transform.rotation.z =
        (t * 2.0 + PI).sin() * 0.3 - ARM_REST_ANGLE;
}

/// Spaceship: Y spin, vertical bob, and flame opacity redrawn from `rng` each frame.
pub fn animate_spaceship<R: Rng + ?Sized>(
    ship: &mut Spaceship,
    rest: Placement,
    t: f32,
    rng: &mut R,
) {
    ship.node.transform.rotation.y += spin::SPACESHIP_Y;
    ship.node.transform.position.y = rest.position.y + t.sin() * 0.5;
    let flicker = FLAME_BASE_OPACITY + rng.r#gen::<f32>() * 0.2;
    ship.flame_material.borrow_mut().set_opacity(flicker);
}

/// Crystal: slow Y spin, X wobble, vertical bob and a pulsing scale.
pub fn animate_crystal(crystal: &mut Crystal, rest: Placement, t: f32) {
    let node = &mut crystal.node;
    node.transform.rotation.y += spin::CRYSTAL_Y;
    node.transform.rotation.x = (t * 0.5).sin() * 0.2;
    node.transform.position.y = rest.position.y + (t * 2.0).sin() * 0.3;
    let pulse = 1.0 + (t * 3.0).sin() * 0.05;
    node.transform.scale = Vec3::splat(rest.scale * pulse);
}

/// Showcase models tumble about X and Y.
pub fn animate_showcase(node: &mut ModelNode) {
    node.transform.rotation.x += spin::SHOWCASE_X;
    node.transform.rotation.y += spin::SHOWCASE_Y;
}

/// Drives every registered scene once per frame.
///
/// Generic over the scene trait object so the application can keep richer scene types
/// (see [`Stage`](crate::scene::Stage)) while still ticking them uniformly.
pub struct FrameScheduler<S: ?Sized = dyn Animated> {
    scenes: Vec<Box<S>>,
    frames: u64,
}

impl<S: ?Sized> Default for FrameScheduler<S> {
    fn default() -> Self {
        Self {
            scenes: Vec::new(),
            frames: 0,
        }
    }
}

impl<S: Animated + ?Sized> FrameScheduler<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a scene; returns its slot.
    pub fn register(&mut self, scene: Box<S>) -> usize {
        log::debug!("[animation] registered scene '{}'", scene.name());
        self.scenes.push(scene);
        self.scenes.len() - 1
    }

    /// Ticks all scenes in registration order.
    pub fn tick(&mut self, anim: &AnimationState) {
        for scene in &mut self.scenes {
            scene.tick(anim);
        }
        self.frames += 1;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn scenes(&self) -> &[Box<S>] {
        &self.scenes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn arms_swing_in_opposite_phase() {
        let mut robot = Robot::build();
        for t in [0.0, 0.3, 1.1, 2.7] {
            animate_robot(&mut robot, t);
            let left = robot.node.shape(robot.left_arm).transform.rotation.z - ARM_REST_ANGLE;
            let right = robot.node.shape(robot.right_arm).transform.rotation.z + ARM_REST_ANGLE;
            assert!((left + right).abs() < 1e-5, "t={t}: {left} vs {right}");
            assert!(left.abs() <= 0.3 + 1e-6);
        }
    }

    #[test]
    fn time_driven_fields_are_idempotent() {
        let rest = Placement {
            position: Vec3::new(0.0, 10.0, -20.0),
            scale: 3.0,
        };
        let mut crystal = Crystal::build();
        animate_crystal(&mut crystal, rest, 4.2);
        let first = crystal.node.transform;
        animate_crystal(&mut crystal, rest, 4.2);
        let second = crystal.node.transform;

        assert_eq!(first.rotation.x, second.rotation.x);
        assert_eq!(first.position, second.position);
        assert_eq!(first.scale, second.scale);
        assert!((second.rotation.y - first.rotation.y - spin::CRYSTAL_Y).abs() < 1e-7);
    }

    #[test]
    fn crystal_pulse_stays_within_five_percent() {
        let rest = Placement {
            position: Vec3::ZERO,
            scale: 3.0,
        };
        let mut crystal = Crystal::build();
        for i in 0..100 {
            animate_crystal(&mut crystal, rest, i as f32 * 0.07);
            let s = crystal.node.transform.scale.x;
            assert!((2.85 - 1e-5..=3.15 + 1e-5).contains(&s));
        }
    }

    #[test]
    fn flame_flicker_is_bounded_and_shared() {
        let rest = Placement {
            position: Vec3::new(15.0, -5.0, -15.0),
            scale: 1.5,
        };
        let mut ship = Spaceship::build();
        let mut rng = StdRng::seed_from_u64(5);
        for i in 0..200 {
            animate_spaceship(&mut ship, rest, i as f32 * 0.016, &mut rng);
            let left = ship.node.shape(ship.left_flame).material().borrow().opacity;
            let right = ship.node.shape(ship.right_flame).material().borrow().opacity;
            assert_eq!(left, right);
            assert!((0.8..=1.0).contains(&left));
            let y = ship.node.transform.position.y;
            assert!((-5.5 - 1e-5..=-4.5 + 1e-5).contains(&y));
        }
    }

    struct Counter {
        ticks: Rc<Cell<u32>>,
    }

    impl Animated for Counter {
        fn name(&self) -> &str {
            "counter"
        }

        fn tick(&mut self, _anim: &AnimationState) {
            self.ticks.set(self.ticks.get() + 1);
        }
    }

    #[test]
    fn scheduler_ticks_each_scene_once_per_frame() {
        let ticks = Rc::new(Cell::new(0));
        let mut scheduler: FrameScheduler = FrameScheduler::new();
        scheduler.register(Box::new(Counter { ticks: Rc::clone(&ticks) }));
        scheduler.register(Box::new(Counter { ticks: Rc::clone(&ticks) }));

        for i in 0..3 {
            scheduler.tick(&AnimationState::new(i as f32, Vec2::ZERO));
        }
        assert_eq!(scheduler.frames(), 3);
        assert_eq!(ticks.get(), 6);
        assert_eq!(scheduler.len(), 2);
        for scene in scheduler.scenes() {
            assert_eq!(scene.name(), "counter");
        }
    }
}

//! Builds the background scene graph and the showcase scenes.

use glam::Vec3;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::camera::CameraRig;
use crate::color::Color;
use crate::models::{Atom, Crystal, DnaHelix, Flower, Robot, Sculpture, Spaceship};
use crate::particles::{DEFAULT_HALF_EXTENT, DEFAULT_PARTICLE_COUNT, ParticleField};

use super::graph::{Placements, SceneGraph};
use super::{Fog, Light, Lighting, Showcase};

/// Distance of the background camera from the origin.
pub const BACKGROUND_CAMERA_DISTANCE: f32 = 30.0;
const ABOUT_CAMERA_DISTANCE: f32 = 8.0;
const PROJECT_CAMERA_DISTANCE: f32 = 6.0;

/// Inputs to [`compose`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompositionConfig {
    pub particle_count: usize,
    pub particle_half_extent: f32,
    /// Fixed RNG seed; `None` draws one from entropy.
    pub seed: Option<u64>,
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            particle_half_extent: DEFAULT_HALF_EXTENT,
            seed: None,
        }
    }
}

impl CompositionConfig {
    pub fn particles(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    pub fn half_extent(mut self, half_extent: f32) -> Self {
        self.particle_half_extent = half_extent;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

fn background_lighting() -> Lighting {
    Lighting::new()
        .with(Light::ambient(Color::WHITE, 0.5))
        .with(Light::point(Color::CYAN, 2.0, Vec3::new(10.0, 10.0, 10.0)))
        .with(Light::point(Color::MAGENTA, 2.0, Vec3::new(-10.0, -10.0, 5.0)))
        .with(Light::spot(Color::WHITE, 1.0, Vec3::new(0.0, 20.0, 0.0)))
        .fog(Fog {
            color: Color::hex(0x0a0a0a),
            density: 0.0008,
        })
}

/// Builds the background scene: each model exactly once, placed and scaled, plus the
/// particle field, lights, fog and the parallax camera.
pub fn compose(config: &CompositionConfig) -> SceneGraph {
    let seed = config.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    let placements = Placements::default();

    let mut robot = Robot::build();
    robot.node.transform.position = placements.robot.position;
    robot.node.transform = robot.node.transform.uniform_scale(placements.robot.scale);

    let mut spaceship = Spaceship::build();
    spaceship.node.transform.position = placements.spaceship.position;
    spaceship.node.transform = spaceship.node.transform.uniform_scale(placements.spaceship.scale);

    let mut crystal = Crystal::build();
    crystal.node.transform.position = placements.crystal.position;
    crystal.node.transform = crystal.node.transform.uniform_scale(placements.crystal.scale);

    let particles =
        ParticleField::generate(&mut rng, config.particle_count, config.particle_half_extent);

    let graph = SceneGraph::new(
        robot,
        spaceship,
        crystal,
        particles,
        CameraRig::new(BACKGROUND_CAMERA_DISTANCE),
        background_lighting(),
        placements,
        seed,
        rng,
    );
    log::info!(
        "[scene] composed {} models, {} particles (seed {})",
        graph.model_count(),
        graph.particles.len(),
        seed
    );
    graph
}

/// The about sculpture followed by the three project models, in inset-slot order.
pub fn compose_showcases() -> Vec<Showcase> {
    let about_lighting = Lighting::new()
        .with(Light::point(Color::CYAN, 1.0, Vec3::new(5.0, 5.0, 5.0)))
        .with(Light::point(Color::MAGENTA, 1.0, Vec3::new(-5.0, -5.0, 5.0)))
        .with(Light::ambient(Color::WHITE, 0.5));
    let project_lighting = Lighting::new()
        .with(Light::point(Color::WHITE, 1.0, Vec3::new(5.0, 5.0, 5.0)))
        .with(Light::point(Color::MAGENTA, 0.5, Vec3::new(-5.0, -5.0, 5.0)));

    let showcases = vec![
        Showcase::new("about", Sculpture::build().node, ABOUT_CAMERA_DISTANCE, about_lighting),
        Showcase::new("dna", DnaHelix::build().node, PROJECT_CAMERA_DISTANCE, project_lighting.clone()),
        Showcase::new("atom", Atom::build().node, PROJECT_CAMERA_DISTANCE, project_lighting.clone()),
        Showcase::new("flower", Flower::build().node, PROJECT_CAMERA_DISTANCE, project_lighting),
    ];
    showcases
        .into_iter()
        .enumerate()
        .map(|(slot, showcase)| {
            log::debug!("[scene] showcase '{}' in slot {}", showcase.name, slot);
            showcase.slot(slot)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Stage;

    #[test]
    fn models_are_placed_and_scaled() {
        let graph = compose(&CompositionConfig::default().particles(10).seed(1));
        let robot = graph.robot.node.transform;
        assert_eq!(robot.position, Vec3::new(-15.0, 5.0, -10.0));
        assert_eq!(robot.scale, Vec3::splat(2.0));
        let ship = graph.spaceship.node.transform;
        assert_eq!(ship.position, Vec3::new(15.0, -5.0, -15.0));
        assert_eq!(ship.scale, Vec3::splat(1.5));
        let crystal = graph.crystal.node.transform;
        assert_eq!(crystal.position, Vec3::new(0.0, 10.0, -20.0));
        assert_eq!(crystal.scale, Vec3::splat(3.0));
    }

    #[test]
    fn default_config_fills_eight_thousand_particles() {
        let graph = compose(&CompositionConfig::default().seed(3));
        assert_eq!(graph.particles.len(), 8000);
        assert_eq!(graph.particles.half_extent(), 50.0);
        assert_eq!(graph.seed(), 3);
    }

    #[test]
    fn same_seed_same_particles() {
        let config = CompositionConfig::default().particles(500).seed(77);
        let a = compose(&config);
        let b = compose(&config);
        assert_eq!(a.particles.positions(), b.particles.positions());
        assert_eq!(a.particles.colors(), b.particles.colors());
    }

    #[test]
    fn background_camera_and_lights() {
        let graph = compose(&CompositionConfig::default().particles(0).seed(0));
        let cam = graph.camera();
        assert_eq!(cam.position, Vec3::new(0.0, 0.0, 30.0));
        assert!((cam.fov - 75f32.to_radians()).abs() < 1e-6);
        assert_eq!((cam.near, cam.far), (0.1, 1000.0));

        let lighting = graph.lighting();
        assert_eq!(lighting.lights.len(), 4);
        assert_eq!(lighting.positional().count(), 3);
        assert_eq!(lighting.ambient(), Color::rgb(0.5, 0.5, 0.5));
        let fog = lighting.fog.expect("background has fog");
        assert_eq!(fog.color, Color::hex(0x0a0a0a));
        assert_eq!(graph.clear_color(), Some(Color::hex(0x0a0a0a)));
    }

    #[test]
    fn showcases_fill_consecutive_slots() {
        let showcases = compose_showcases();
        let names: Vec<&str> = showcases.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["about", "dna", "atom", "flower"]);
        for (i, s) in showcases.iter().enumerate() {
            assert_eq!(s.inset(), Some(i));
            assert!(s.lighting.fog.is_none());
        }
        assert_eq!(showcases[0].camera.position.z, 8.0);
        assert_eq!(showcases[1].camera.position.z, 6.0);
        assert_eq!(showcases[0].model.shape_count(), 4);
        assert_eq!(showcases[1].model.shape_count(), 47);
    }
}

//! The background particle field.
//!
//! Points are scattered uniformly in a cube and tinted somewhere between cyan and
//! magenta. Generation takes any [`rand::Rng`], so tests and reproducible runs pass a
//! seeded [`rand::rngs::StdRng`].

use glam::Vec3;
use rand::Rng;

use crate::color::Color;

/// Default number of particles in the background field.
pub const DEFAULT_PARTICLE_COUNT: usize = 8000;
/// Default half-extent of the cube the particles fill.
pub const DEFAULT_HALF_EXTENT: f32 = 50.0;

/// Per-frame spin of the whole field, in radians per frame about X and Y.
pub const SPIN_PER_FRAME: Vec3 = Vec3::new(0.0002, 0.0005, 0.0);

/// Position and color buffers for a point cloud, plus the cloud's rotation.
#[derive(Clone, Debug)]
pub struct ParticleField {
    positions: Vec<[f32; 3]>,
    colors: Vec<[f32; 3]>,
    half_extent: f32,
    /// Euler rotation of the whole field (radians, XYZ order).
    pub rotation: Vec3,
    /// Point size in world units.
    pub size: f32,
    /// Opacity of every point; points blend additively.
    pub opacity: f32,
}

impl ParticleField {
    /// Scatters `count` points in `[-half_extent, half_extent)³`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, count: usize, half_extent: f32) -> Self {
        let mut positions = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count);

        for _ in 0..count {
            positions.push([
                (rng.r#gen::<f32>() - 0.5) * 2.0 * half_extent,
                (rng.r#gen::<f32>() - 0.5) * 2.0 * half_extent,
                (rng.r#gen::<f32>() - 0.5) * 2.0 * half_extent,
            ]);
            let mix = rng.r#gen::<f32>();
            colors.push(Color::CYAN.lerp(Color::MAGENTA, mix).to_rgb());
        }

        Self {
            positions,
            colors,
            half_extent,
            rotation: Vec3::ZERO,
            size: 0.15,
            opacity: 0.8,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    pub fn half_extent(&self) -> f32 {
        self.half_extent
    }

    /// Advances the field's spin by one frame.
    pub fn spin(&mut self) {
        self.rotation += SPIN_PER_FRAME;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn points_stay_inside_the_cube() {
        let mut rng = StdRng::seed_from_u64(7);
        let field = ParticleField::generate(&mut rng, DEFAULT_PARTICLE_COUNT, DEFAULT_HALF_EXTENT);
        assert_eq!(field.len(), DEFAULT_PARTICLE_COUNT);
        for p in field.positions() {
            for c in p {
                assert!((-DEFAULT_HALF_EXTENT..=DEFAULT_HALF_EXTENT).contains(c));
            }
        }
    }

    #[test]
    fn colors_are_complementary_cyan_magenta_mixes() {
        let mut rng = StdRng::seed_from_u64(11);
        let field = ParticleField::generate(&mut rng, 2000, 10.0);
        for [r, g, b] in field.colors() {
            assert!((r + g - 1.0).abs() < 1e-6);
            assert_eq!(*b, 1.0);
        }
    }

    #[test]
    fn same_seed_same_field() {
        let a = ParticleField::generate(&mut StdRng::seed_from_u64(3), 100, 5.0);
        let b = ParticleField::generate(&mut StdRng::seed_from_u64(3), 100, 5.0);
        assert_eq!(a.positions(), b.positions());
        assert_eq!(a.colors(), b.colors());
    }

    #[test]
    fn spin_accumulates_per_frame() {
        let mut field = ParticleField::generate(&mut StdRng::seed_from_u64(1), 0, 1.0);
        assert!(field.is_empty());
        for _ in 0..10 {
            field.spin();
        }
        assert!((field.rotation.y - 0.005).abs() < 1e-7);
        assert!((field.rotation.x - 0.002).abs() < 1e-7);
    }
}

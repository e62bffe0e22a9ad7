//! Lights and fog attached to a scene.

use glam::Vec3;

use crate::color::Color;

/// Maximum number of positional lights the renderer evaluates per scene.
pub const MAX_LIGHTS: usize = 4;

/// A light source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    /// Uniform light from every direction.
    Ambient { color: Color, intensity: f32 },
    /// Omnidirectional light at a point.
    Point {
        color: Color,
        intensity: f32,
        position: Vec3,
    },
    /// Light at a point aimed at a target. Rendered as a point light with a cone cutoff.
    Spot {
        color: Color,
        intensity: f32,
        position: Vec3,
        target: Vec3,
        /// Half-angle of the cone in radians.
        angle: f32,
    },
}

impl Light {
    pub fn ambient(color: Color, intensity: f32) -> Self {
        Light::Ambient { color, intensity }
    }

    pub fn point(color: Color, intensity: f32, position: Vec3) -> Self {
        Light::Point {
            color,
            intensity,
            position,
        }
    }

    /// A spot light aimed at the origin with a 60° half-angle.
    pub fn spot(color: Color, intensity: f32, position: Vec3) -> Self {
        Light::Spot {
            color,
            intensity,
            position,
            target: Vec3::ZERO,
            angle: std::f32::consts::FRAC_PI_3,
        }
    }
}

/// Exponential-squared distance fog.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fog {
    pub color: Color,
    pub density: f32,
}

impl Fog {
    /// Fraction of the surface color that survives at `distance`.
    pub fn visibility(&self, distance: f32) -> f32 {
        let d = self.density * distance;
        (-(d * d)).exp().clamp(0.0, 1.0)
    }
}

/// All lighting state of one scene.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Lighting {
    pub lights: Vec<Light>,
    pub fog: Option<Fog>,
}

impl Lighting {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, light: Light) -> Self {
        self.lights.push(light);
        self
    }

    pub fn fog(mut self, fog: Fog) -> Self {
        self.fog = Some(fog);
        self
    }

    /// Sum of all ambient lights.
    pub fn ambient(&self) -> Color {
        self.lights
            .iter()
            .filter_map(|light| match *light {
                Light::Ambient { color, intensity } => Some(color.scaled(intensity)),
                _ => None,
            })
            .fold(Color::BLACK, |acc, c| {
                Color::rgb(acc.r + c.r, acc.g + c.g, acc.b + c.b)
            })
    }

    /// Positional lights the renderer uploads; extras beyond [`MAX_LIGHTS`] are dropped.
    pub fn positional(&self) -> impl Iterator<Item = &Light> {
        self.lights
            .iter()
            .filter(|light| !matches!(light, Light::Ambient { .. }))
            .take(MAX_LIGHTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambient_lights_add_up() {
        let lighting = Lighting::new()
            .with(Light::ambient(Color::WHITE, 0.5))
            .with(Light::ambient(Color::rgb(1.0, 0.0, 0.0), 0.25))
            .with(Light::point(Color::CYAN, 2.0, Vec3::ONE));
        let a = lighting.ambient();
        assert!((a.r - 0.75).abs() < 1e-6);
        assert!((a.g - 0.5).abs() < 1e-6);
        assert_eq!(lighting.positional().count(), 1);
    }

    #[test]
    fn positional_lights_are_capped() {
        let mut lighting = Lighting::new();
        for i in 0..7 {
            lighting = lighting.with(Light::point(Color::WHITE, 1.0, Vec3::splat(i as f32)));
        }
        assert_eq!(lighting.positional().count(), MAX_LIGHTS);
    }

    #[test]
    fn fog_visibility_falls_with_distance() {
        let fog = Fog {
            color: Color::hex(0x0a0a0a),
            density: 0.0008,
        };
        assert_eq!(fog.visibility(0.0), 1.0);
        assert!(fog.visibility(100.0) > fog.visibility(1000.0));
        assert!(fog.visibility(30.0) > 0.999);
    }
}

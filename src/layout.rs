//! Procedural placement helpers shared by the model builders.
//!
//! All three layouts are pure functions of their parameters. A count of zero produces no
//! slots, so no builder ever divides by zero when computing an angle step.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

/// One evenly spaced position on a circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialSlot {
    pub index: usize,
    /// `index · 2π / count`.
    pub angle: f32,
    /// Position on the circle in the XZ plane.
    pub position: Vec3,
}

impl RadialSlot {
    /// True for even indices; builders alternate material variants with it.
    pub fn is_even(&self) -> bool {
        self.index % 2 == 0
    }

    /// The same slot projected onto the XY plane instead.
    pub fn xy(&self, radius: f32) -> Vec3 {
        Vec3::new(self.angle.cos() * radius, self.angle.sin() * radius, 0.0)
    }
}

/// Angle between neighbouring radial slots, or `None` when there are none.
pub fn radial_step(count: usize) -> Option<f32> {
    (count > 0).then(|| TAU / count as f32)
}

/// `count` slots evenly spaced around the Y axis at `radius`.
pub fn radial(count: usize, radius: f32) -> Vec<RadialSlot> {
    let Some(step) = radial_step(count) else {
        return Vec::new();
    };
    (0..count)
        .map(|index| {
            let angle = index as f32 * step;
            RadialSlot {
                index,
                angle,
                position: Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius),
            }
        })
        .collect()
}

/// One rung of a double helix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HelixStep {
    pub index: usize,
    /// Angle of strand A, `(index / segments) · 4π`.
    pub angle: f32,
    /// Height of the rung, centred on zero.
    pub y: f32,
    pub strand_a: Vec3,
    /// Diametrically opposite strand A.
    pub strand_b: Vec3,
    /// Every third rung carries a cross-bar.
    pub connector: bool,
}

/// Two full turns of a double helix with `segments` rungs.
pub fn helix(segments: usize, height: f32, radius: f32) -> Vec<HelixStep> {
    if segments == 0 {
        return Vec::new();
    }
    (0..segments)
        .map(|index| {
            let t = index as f32 / segments as f32;
            let angle = t * 2.0 * TAU;
            let y = t * height - height / 2.0;
            let opposite = angle + PI;
            HelixStep {
                index,
                angle,
                y,
                strand_a: Vec3::new(angle.cos() * radius, y, angle.sin() * radius),
                strand_b: Vec3::new(opposite.cos() * radius, y, opposite.sin() * radius),
                connector: index % 3 == 0,
            }
        })
        .collect()
}

/// A tilted circular orbit with its satellites.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitRing {
    pub index: usize,
    pub radius: f32,
    /// Tilt of the orbit plane about X (and Y for the drawn ring), `index · π / rings`.
    pub tilt: f32,
    /// Satellite positions, `index + 2` of them.
    pub satellites: Vec<Vec3>,
}

/// `rings` concentric orbits; ring `k` has radius `base + k · step` and `k + 2` satellites.
pub fn orbital(rings: usize, base_radius: f32, step: f32) -> Vec<OrbitRing> {
    (0..rings)
        .map(|index| {
            let radius = base_radius + index as f32 * step;
            let tilt = index as f32 * PI / rings as f32;
            let count = index + 2;
            let satellites = (0..count)
                .map(|j| {
                    let angle = j as f32 / count as f32 * TAU;
                    Vec3::new(
                        angle.cos() * radius,
                        angle.sin() * radius * tilt.sin(),
                        angle.sin() * radius * tilt.cos(),
                    )
                })
                .collect();
            OrbitRing {
                index,
                radius,
                tilt,
                satellites,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn radial_step_is_full_turn_over_count() {
        for n in 1..=12 {
            let slots = radial(n, 1.5);
            assert_eq!(slots.len(), n);
            let step = radial_step(n).unwrap();
            assert!((step - TAU / n as f32).abs() < EPS);
            for slot in &slots {
                assert!((slot.angle - slot.index as f32 * step).abs() < EPS);
                assert!((slot.position.length() - 1.5).abs() < EPS);
            }
        }
    }

    #[test]
    fn radial_with_zero_count_is_empty() {
        assert!(radial(0, 3.0).is_empty());
        assert_eq!(radial_step(0), None);
    }

    #[test]
    fn helix_twenty_segments() {
        let steps = helix(20, 4.0, 1.0);
        assert_eq!(steps.len(), 20);
        assert_eq!(steps.iter().filter(|s| s.connector).count(), 7);
        for s in &steps {
            let mid = (s.strand_a + s.strand_b) / 2.0;
            assert!((mid - Vec3::new(0.0, s.y, 0.0)).length() < EPS);
            let a = s.strand_a.z.atan2(s.strand_a.x);
            let b = s.strand_b.z.atan2(s.strand_b.x);
            let diff = (a - b).rem_euclid(TAU);
            assert!((diff - PI).abs() < 1e-4, "step {} diff {diff}", s.index);
        }
        assert!((steps[0].y + 2.0).abs() < EPS);
        assert!(steps.last().unwrap().y < 2.0);
    }

    #[test]
    fn helix_with_zero_segments_is_empty() {
        assert!(helix(0, 4.0, 1.0).is_empty());
    }

    #[test]
    fn orbital_rings_grow_and_gain_satellites() {
        let rings = orbital(3, 1.5, 0.7);
        assert_eq!(rings.len(), 3);
        for ring in &rings {
            assert_eq!(ring.satellites.len(), ring.index + 2);
            assert!((ring.radius - (1.5 + ring.index as f32 * 0.7)).abs() < EPS);
            for p in &ring.satellites {
                assert!((p.length() - ring.radius).abs() < 1e-4);
            }
        }
    }
}

//! The floating crystal cluster.

use std::f32::consts::FRAC_PI_2;

use crate::color::Color;
use crate::layout;
use crate::material::{MaterialSpec, SharedMaterial};
use crate::node::{ModelNode, PartId};
use crate::shape::{ShapeDescriptor, ShapeKind};

pub const SATELLITE_COUNT: usize = 6;
pub const SATELLITE_RADIUS: f32 = 1.5;

/// A translucent octahedron ringed by six small crystals and an energy torus.
///
/// Every satellite owns a forked copy of the main crystal material so they can be
/// restyled independently.
#[derive(Clone, Debug)]
pub struct Crystal {
    pub node: ModelNode,
    pub core: PartId,
    pub satellites: Vec<PartId>,
    pub ring: PartId,
}

impl Crystal {
    pub fn build() -> Self {
        let crystal_mat = SharedMaterial::new(
            MaterialSpec::phong(Color::CYAN)
                .emissive(Color::CYAN)
                .emissive_intensity(0.3)
                .opacity(0.8)
                .shininess(100.0),
        );
        let ring_mat = SharedMaterial::new(MaterialSpec::unlit(Color::MAGENTA).opacity(0.6));

        let mut node = ModelNode::new("crystal");
        let core = node.push_shape(ShapeDescriptor::new(ShapeKind::octahedron(1.0, 0), &crystal_mat));

        let satellites = layout::radial(SATELLITE_COUNT, SATELLITE_RADIUS)
            .into_iter()
            .map(|slot| {
                let a = slot.angle;
                let p = slot.position;
                node.push_shape(
                    ShapeDescriptor::new(ShapeKind::octahedron(0.3, 0), &crystal_mat.fork())
                        .at(p.x, (a * 2.0).sin() * 0.5, p.z)
                        .rotated(a, a, a),
                )
            })
            .collect();

        let ring = node.push_shape(
            ShapeDescriptor::new(ShapeKind::torus(1.8, 0.05, 16, 100), &ring_mat)
                .rotated(FRAC_PI_2, 0.0, 0.0),
        );

        Self {
            node,
            core,
            satellites,
            ring,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn satellites_sit_on_the_radius_with_independent_materials() {
        let crystal = Crystal::build();
        assert_eq!(crystal.satellites.len(), SATELLITE_COUNT);
        assert_eq!(crystal.node.shape_count(), SATELLITE_COUNT + 2);

        let core_mat = crystal.node.shape(crystal.core).material();
        for &part in &crystal.satellites {
            let shape = crystal.node.shape(part);
            let p = shape.transform.position;
            let horizontal = (p.x * p.x + p.z * p.z).sqrt();
            assert!((horizontal - SATELLITE_RADIUS).abs() < 1e-5);
            assert!(!shape.material().ptr_eq(core_mat));
            assert_eq!(shape.material().get(), core_mat.get());
        }
    }
}

//! The atom shown in the second project showcase.

use crate::color::Color;
use crate::layout;
use crate::material::{MaterialSpec, SharedMaterial};
use crate::node::{ModelNode, PartId};
use crate::shape::{ShapeDescriptor, ShapeKind};

pub const ORBIT_COUNT: usize = 3;
pub const BASE_ORBIT_RADIUS: f32 = 1.5;
pub const ORBIT_STEP: f32 = 0.7;

/// One electron shell: the drawn orbit ring and the electrons placed on it.
#[derive(Clone, Debug)]
pub struct Shell {
    pub orbit: PartId,
    pub electrons: Vec<PartId>,
}

/// A glowing nucleus with three tilted electron shells.
#[derive(Clone, Debug)]
pub struct Atom {
    pub node: ModelNode,
    pub nucleus: PartId,
    pub shells: Vec<Shell>,
}

impl Atom {
    pub fn build() -> Self {
        let nucleus_mat = SharedMaterial::new(
            MaterialSpec::phong(Color::RED)
                .emissive(Color::RED)
                .emissive_intensity(0.3),
        );

        let mut node = ModelNode::new("atom");
        let nucleus = node.push_shape(ShapeDescriptor::new(ShapeKind::sphere(0.5, 32, 32), &nucleus_mat));

        let electron = ShapeKind::sphere(0.15, 16, 16);
        let shells = layout::orbital(ORBIT_COUNT, BASE_ORBIT_RADIUS, ORBIT_STEP)
            .into_iter()
            .map(|ring| {
                let orbit_mat = SharedMaterial::new(MaterialSpec::unlit(Color::CYAN).opacity(0.3));
                let orbit = node.push_shape(
                    ShapeDescriptor::new(ShapeKind::torus(ring.radius, 0.02, 16, 100), &orbit_mat)
                        .rotated(ring.tilt, ring.tilt, 0.0),
                );
                let electrons = ring
                    .satellites
                    .iter()
                    .map(|p| {
                        let mat = SharedMaterial::new(
                            MaterialSpec::phong(Color::CYAN)
                                .emissive(Color::CYAN)
                                .emissive_intensity(0.5),
                        );
                        node.push_shape(ShapeDescriptor::new(electron, &mat).at(p.x, p.y, p.z))
                    })
                    .collect();
                Shell { orbit, electrons }
            })
            .collect();

        Self {
            node,
            nucleus,
            shells,
        }
    }
}

//! The geometric flower shown in the third project showcase.

use std::f32::consts::FRAC_PI_2;

use crate::color::Color;
use crate::layout;
use crate::material::{MaterialSpec, SharedMaterial};
use crate::node::{ModelNode, PartId};
use crate::shape::{ShapeDescriptor, ShapeKind};

pub const PETAL_COUNT: usize = 8;
pub const PETAL_RADIUS: f32 = 1.2;

/// A glowing centre, eight alternating petals and an outer ring, all in the XY plane.
#[derive(Clone, Debug)]
pub struct Flower {
    pub node: ModelNode,
    pub center: PartId,
    pub petals: Vec<PartId>,
    pub ring: PartId,
}

impl Flower {
    pub fn build() -> Self {
        Self::with_petals(PETAL_COUNT)
    }

    pub fn with_petals(count: usize) -> Self {
        let center_mat = SharedMaterial::new(
            MaterialSpec::phong(Color::YELLOW)
                .emissive(Color::YELLOW)
                .emissive_intensity(0.3),
        );
        let ring_mat = SharedMaterial::new(MaterialSpec::unlit(Color::WHITE).opacity(0.5));

        let mut node = ModelNode::new("flower");
        let center = node.push_shape(ShapeDescriptor::new(ShapeKind::sphere(0.5, 32, 32), &center_mat));

        let petals = layout::radial(count, PETAL_RADIUS)
            .into_iter()
            .map(|slot| {
                let color = if slot.is_even() { Color::MAGENTA } else { Color::CYAN };
                let mat = SharedMaterial::new(MaterialSpec::phong(color).shininess(100.0));
                let p = slot.xy(PETAL_RADIUS);
                node.push_shape(
                    ShapeDescriptor::new(ShapeKind::cuboid(0.5, 1.5, 0.2), &mat)
                        .at(p.x, p.y, p.z)
                        .rotated(0.0, 0.0, slot.angle + FRAC_PI_2),
                )
            })
            .collect();

        let ring = node.push_shape(ShapeDescriptor::new(ShapeKind::torus(2.0, 0.1, 16, 100), &ring_mat));

        Self {
            node,
            center,
            petals,
            ring,
        }
    }
}

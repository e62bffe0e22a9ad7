//! The abstract sculpture shown in the about showcase.

use std::f32::consts::PI;

use crate::color::Color;
use crate::material::{MaterialSpec, SharedMaterial};
use crate::node::{ModelNode, PartId};
use crate::shape::{ShapeDescriptor, ShapeKind};

pub const RING_COUNT: usize = 3;

/// A faceted icosahedron inside three tilted rings.
#[derive(Clone, Debug)]
pub struct Sculpture {
    pub node: ModelNode,
    pub core: PartId,
    pub rings: Vec<PartId>,
}

impl Sculpture {
    pub fn build() -> Self {
        let core_mat = SharedMaterial::new(MaterialSpec::phong(Color::CYAN).flat().shininess(100.0));

        let mut node = ModelNode::new("sculpture");
        let core = node.push_shape(ShapeDescriptor::new(ShapeKind::icosahedron(1.5, 1), &core_mat));

        let rings = (0..RING_COUNT)
            .map(|i| {
                let color = if i % 2 == 0 { Color::CYAN } else { Color::MAGENTA };
                let mat = SharedMaterial::new(MaterialSpec::phong(color).opacity(0.6));
                let k = i as f32;
                node.push_shape(
                    ShapeDescriptor::new(ShapeKind::torus(2.0 + k * 0.5, 0.1, 16, 100), &mat)
                        .rotated(k * PI / 3.0, k * PI / 4.0, 0.0),
                )
            })
            .collect();

        Self { node, core, rings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rings_widen_and_alternate_colors() {
        let sculpture = Sculpture::build();
        assert_eq!(sculpture.node.shape_count(), 1 + RING_COUNT);
        for (i, &part) in sculpture.rings.iter().enumerate() {
            let shape = sculpture.node.shape(part);
            match *shape.kind() {
                ShapeKind::Torus { radius, .. } => assert_eq!(radius, 2.0 + i as f32 * 0.5),
                other => panic!("ring {i} is a {}", other.name()),
            }
            let expected = if i % 2 == 0 { Color::CYAN } else { Color::MAGENTA };
            assert_eq!(shape.material().borrow().base_color, expected);
        }
    }
}

//! The hovering spaceship.

use std::f32::consts::PI;

use crate::color::Color;
use crate::material::{MaterialSpec, SharedMaterial};
use crate::node::{ModelNode, PartId};
use crate::shape::{ShapeDescriptor, ShapeKind};

/// Flame opacity before per-frame flicker is added.
pub const FLAME_BASE_OPACITY: f32 = 0.8;

/// A cone-bodied ship with a glass cockpit, wings, two engines and two flames.
#[derive(Clone, Debug)]
pub struct Spaceship {
    pub node: ModelNode,
    pub body: PartId,
    pub cockpit: PartId,
    pub wings: PartId,
    pub left_engine: PartId,
    pub right_engine: PartId,
    pub left_flame: PartId,
    pub right_flame: PartId,
    /// Shared by both flames; flicker is written here once per frame.
    pub flame_material: SharedMaterial,
}

impl Spaceship {
    pub fn build() -> Self {
        let body_mat = SharedMaterial::new(
            MaterialSpec::phong(Color::MAGENTA)
                .emissive(Color::hex(0x330033))
                .shininess(100.0),
        );
        let cockpit_mat = SharedMaterial::new(
            MaterialSpec::phong(Color::CYAN)
                .emissive(Color::CYAN)
                .emissive_intensity(0.3)
                .opacity(0.7),
        );
        let wing_mat = SharedMaterial::new(
            MaterialSpec::phong(Color::MAGENTA).emissive(Color::hex(0x220022)),
        );
        let engine_mat = SharedMaterial::new(
            MaterialSpec::phong(Color::hex(0x666666))
                .emissive(Color::hex(0xff6600))
                .emissive_intensity(0.5),
        );
        let flame_material = SharedMaterial::new(
            MaterialSpec::unlit(Color::hex(0xff6600)).opacity(FLAME_BASE_OPACITY),
        );

        let engine = ShapeKind::cylinder(0.2, 0.3, 0.8, 8);
        let flame = ShapeKind::cone(0.25, 0.6, 8);

        let mut node = ModelNode::new("spaceship");
        let body = node.push_shape(
            ShapeDescriptor::new(ShapeKind::cone(1.0, 3.0, 8), &body_mat)
                .at(0.0, 1.0, 0.0)
                .rotated(PI, 0.0, 0.0),
        );
        let cockpit = node.push_shape(
            ShapeDescriptor::new(ShapeKind::sphere(0.6, 16, 16), &cockpit_mat).at(0.0, 2.5, 0.0),
        );
        let wings = node.push_shape(
            ShapeDescriptor::new(ShapeKind::cuboid(3.0, 0.1, 1.0), &wing_mat).at(0.0, 0.5, 0.0),
        );
        let left_engine = node.push_shape(ShapeDescriptor::new(engine, &engine_mat).at(-1.2, -0.5, 0.0));
        let right_engine = node.push_shape(ShapeDescriptor::new(engine, &engine_mat).at(1.2, -0.5, 0.0));
        let left_flame = node.push_shape(ShapeDescriptor::new(flame, &flame_material).at(-1.2, -1.2, 0.0));
        let right_flame = node.push_shape(ShapeDescriptor::new(flame, &flame_material).at(1.2, -1.2, 0.0));

        Self {
            node,
            body,
            cockpit,
            wings,
            left_engine,
            right_engine,
            left_flame,
            right_flame,
            flame_material,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seven_parts_and_shared_flames() {
        let ship = Spaceship::build();
        assert_eq!(ship.node.shape_count(), 7);
        assert_eq!(ship.left_flame.index(), 5);
        assert_eq!(ship.right_flame.index(), 6);

        let left = ship.node.shape(ship.left_flame).material();
        let right = ship.node.shape(ship.right_flame).material();
        assert!(left.ptr_eq(right));
        assert!(left.ptr_eq(&ship.flame_material));
        assert_eq!(ship.flame_material.borrow().opacity, FLAME_BASE_OPACITY);
    }

    #[test]
    fn body_points_nose_down() {
        let ship = Spaceship::build();
        assert_eq!(ship.node.shape(ship.body).transform.rotation.x, PI);
    }
}

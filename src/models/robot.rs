//! The waving robot.

use std::f32::consts::FRAC_PI_6;

use crate::color::Color;
use crate::material::{MaterialSpec, SharedMaterial};
use crate::node::{ModelNode, PartId};
use crate::shape::{ShapeDescriptor, ShapeKind};

/// Rest angle of the arms about Z; the left arm uses `+`, the right arm `-`.
pub const ARM_REST_ANGLE: f32 = FRAC_PI_6;

/// A blocky robot: head, eyes, antenna, body, arms, hands, legs and feet.
///
/// Parts sharing a look share one material: eyes and antenna ball, head and hands,
/// arms and legs, body and feet.
#[derive(Clone, Debug)]
pub struct Robot {
    pub node: ModelNode,
    pub head: PartId,
    pub left_eye: PartId,
    pub right_eye: PartId,
    pub antenna: PartId,
    pub antenna_ball: PartId,
    pub body: PartId,
    pub left_arm: PartId,
    pub right_arm: PartId,
    pub left_hand: PartId,
    pub right_hand: PartId,
    pub left_leg: PartId,
    pub right_leg: PartId,
    pub left_foot: PartId,
    pub right_foot: PartId,
}

impl Robot {
    pub fn build() -> Self {
        let head_mat = SharedMaterial::new(
            MaterialSpec::phong(Color::CYAN)
                .emissive(Color::hex(0x003333))
                .shininess(100.0),
        );
        let eye_mat = SharedMaterial::new(
            MaterialSpec::phong(Color::YELLOW)
                .emissive(Color::YELLOW)
                .emissive_intensity(0.5),
        );
        let antenna_mat = SharedMaterial::new(MaterialSpec::phong(Color::MAGENTA));
        let body_mat = SharedMaterial::new(
            MaterialSpec::phong(Color::hex(0x00aaff)).emissive(Color::hex(0x002244)),
        );
        let arm_mat = SharedMaterial::new(MaterialSpec::phong(Color::CYAN));

        let eye = ShapeKind::sphere(0.2, 16, 16);
        let arm = ShapeKind::cylinder(0.2, 0.2, 2.0, 8);
        let hand = ShapeKind::sphere(0.3, 16, 16);
        let leg = ShapeKind::cylinder(0.3, 0.3, 2.0, 8);
        let foot = ShapeKind::cuboid(0.5, 0.3, 0.8);

        let mut node = ModelNode::new("robot");
        let head = node.push_shape(ShapeDescriptor::new(ShapeKind::cube(1.5), &head_mat).at(0.0, 2.5, 0.0));
        let left_eye = node.push_shape(ShapeDescriptor::new(eye, &eye_mat).at(-0.4, 2.7, 0.7));
        let right_eye = node.push_shape(ShapeDescriptor::new(eye, &eye_mat).at(0.4, 2.7, 0.7));
        let antenna = node.push_shape(
            ShapeDescriptor::new(ShapeKind::cylinder(0.05, 0.05, 0.8, 8), &antenna_mat).at(0.0, 3.6, 0.0),
        );
        let antenna_ball = node.push_shape(
            ShapeDescriptor::new(ShapeKind::sphere(0.15, 16, 16), &eye_mat).at(0.0, 4.0, 0.0),
        );
        let body = node.push_shape(
            ShapeDescriptor::new(ShapeKind::cuboid(2.0, 2.5, 1.0), &body_mat).at(0.0, 0.5, 0.0),
        );
        let left_arm = node.push_shape(
            ShapeDescriptor::new(arm, &arm_mat)
                .at(-1.3, 0.5, 0.0)
                .rotated(0.0, 0.0, ARM_REST_ANGLE),
        );
        let right_arm = node.push_shape(
            ShapeDescriptor::new(arm, &arm_mat)
                .at(1.3, 0.5, 0.0)
                .rotated(0.0, 0.0, -ARM_REST_ANGLE),
        );
        let left_hand = node.push_shape(ShapeDescriptor::new(hand, &head_mat).at(-1.6, -0.5, 0.0));
        let right_hand = node.push_shape(ShapeDescriptor::new(hand, &head_mat).at(1.6, -0.5, 0.0));
        let left_leg = node.push_shape(ShapeDescriptor::new(leg, &arm_mat).at(-0.6, -1.5, 0.0));
        let right_leg = node.push_shape(ShapeDescriptor::new(leg, &arm_mat).at(0.6, -1.5, 0.0));
        let left_foot = node.push_shape(ShapeDescriptor::new(foot, &body_mat).at(-0.6, -2.6, 0.2));
        let right_foot = node.push_shape(ShapeDescriptor::new(foot, &body_mat).at(0.6, -2.6, 0.2));

        Self {
            node,
            head,
            left_eye,
            right_eye,
            antenna,
            antenna_ball,
            body,
            left_arm,
            right_arm,
            left_hand,
            right_hand,
            left_leg,
            right_leg,
            left_foot,
            right_foot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fourteen_parts_in_construction_order() {
        let robot = Robot::build();
        assert_eq!(robot.node.children().len(), 14);
        assert_eq!(robot.node.shape_count(), 14);

        let order = [
            (robot.head, "box"),
            (robot.left_eye, "sphere"),
            (robot.right_eye, "sphere"),
            (robot.antenna, "cylinder"),
            (robot.antenna_ball, "sphere"),
            (robot.body, "box"),
            (robot.left_arm, "cylinder"),
            (robot.right_arm, "cylinder"),
            (robot.left_hand, "sphere"),
            (robot.right_hand, "sphere"),
            (robot.left_leg, "cylinder"),
            (robot.right_leg, "cylinder"),
            (robot.left_foot, "box"),
            (robot.right_foot, "box"),
        ];
        for (expected_index, (part, kind)) in order.iter().enumerate() {
            assert_eq!(part.index(), expected_index);
            assert_eq!(robot.node.shape(*part).kind().name(), *kind);
        }
    }

    #[test]
    fn arm_handles_point_at_the_arms() {
        let robot = Robot::build();
        let left = robot.node.shape(robot.left_arm);
        let right = robot.node.shape(robot.right_arm);
        assert_eq!(left.transform.position.x, -1.3);
        assert_eq!(right.transform.position.x, 1.3);
        assert_eq!(left.transform.rotation.z, ARM_REST_ANGLE);
        assert_eq!(right.transform.rotation.z, -ARM_REST_ANGLE);
    }

    #[test]
    fn materials_are_shared_by_look() {
        let robot = Robot::build();
        let mat = |p: PartId| robot.node.shape(p).material().clone();

        assert!(mat(robot.left_eye).ptr_eq(&mat(robot.right_eye)));
        assert!(mat(robot.left_eye).ptr_eq(&mat(robot.antenna_ball)));
        assert!(mat(robot.head).ptr_eq(&mat(robot.left_hand)));
        assert!(mat(robot.left_arm).ptr_eq(&mat(robot.right_leg)));
        assert!(mat(robot.body).ptr_eq(&mat(robot.right_foot)));
        assert!(!mat(robot.head).ptr_eq(&mat(robot.body)));

        mat(robot.right_eye).borrow_mut().set_emissive_intensity(1.0);
        assert_eq!(mat(robot.antenna_ball).borrow().emissive_intensity, 1.0);
    }
}

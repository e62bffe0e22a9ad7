//! Model node trees and named part handles.
//!
//! A [`ModelNode`] is one decorative model: a root transform and an ordered, append-only
//! list of children. Builders keep the [`PartId`] returned by
//! [`ModelNode::push_shape`] for every part the animation driver moves later, so the
//! driver never relies on child positions.
//!
//! ```
//! use portfolio3d::{Color, MaterialSpec, ModelNode, ShapeDescriptor, ShapeKind, SharedMaterial};
//!
//! let steel = SharedMaterial::new(MaterialSpec::phong(Color::WHITE));
//! let mut node = ModelNode::new("arm-demo");
//! let arm = node.push_shape(ShapeDescriptor::new(ShapeKind::cylinder(0.2, 0.2, 2.0, 8), &steel));
//!
//! node.shape_mut(arm).transform.rotation.z = 0.5;
//! assert_eq!(node.shape(arm).transform.rotation.z, 0.5);
//! ```

use glam::Mat4;

use crate::shape::ShapeDescriptor;
use crate::transform::Transform;

/// Handle to a shape child of a [`ModelNode`], captured when the shape is added.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PartId(pub(crate) usize);

impl PartId {
    /// Position of the part among its node's children.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A child of a [`ModelNode`].
#[derive(Clone, Debug)]
pub enum Child {
    Shape(ShapeDescriptor),
    Node(ModelNode),
}

/// A named tree of shapes under a root transform.
#[derive(Clone, Debug)]
pub struct ModelNode {
    name: String,
    pub transform: Transform,
    children: Vec<Child>,
}

impl ModelNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::new(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends a shape and returns its handle.
    pub fn push_shape(&mut self, shape: ShapeDescriptor) -> PartId {
        let id = PartId(self.children.len());
        self.children.push(Child::Shape(shape));
        id
    }

    /// Appends a nested node.
    pub fn push_node(&mut self, node: ModelNode) -> usize {
        self.children.push(Child::Node(node));
        self.children.len() - 1
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    /// Total number of shapes in this subtree.
    pub fn shape_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child {
                Child::Shape(_) => 1,
                Child::Node(node) => node.shape_count(),
            })
            .sum()
    }

    /// Looks up a shape part.
    ///
    /// # Panics
    ///
    /// Panics if `part` does not name a shape of this node; handles only come from
    /// [`push_shape`](Self::push_shape) on the same node, so this is a construction defect.
    pub fn shape(&self, part: PartId) -> &ShapeDescriptor {
        match self.children.get(part.0) {
            Some(Child::Shape(shape)) => shape,
            _ => panic!("model '{}' has no shape part at index {}", self.name, part.0),
        }
    }

    /// Mutable variant of [`shape`](Self::shape), with the same panics.
    pub fn shape_mut(&mut self, part: PartId) -> &mut ShapeDescriptor {
        match self.children.get_mut(part.0) {
            Some(Child::Shape(shape)) => shape,
            _ => panic!("model '{}' has no shape part at index {}", self.name, part.0),
        }
    }

    /// Flattens the subtree into world matrices, depth-first in insertion order.
    pub fn world_shapes(&self, parent: Mat4) -> Vec<(Mat4, &ShapeDescriptor)> {
        let mut out = Vec::with_capacity(self.shape_count());
        self.collect_world(parent, &mut out);
        out
    }

    fn collect_world<'a>(&'a self, parent: Mat4, out: &mut Vec<(Mat4, &'a ShapeDescriptor)>) {
        let world = parent * self.transform.matrix();
        for child in &self.children {
            match child {
                Child::Shape(shape) => out.push((world * shape.transform.matrix(), shape)),
                Child::Node(node) => node.collect_world(world, out),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::material::{MaterialSpec, SharedMaterial};
    use crate::shape::ShapeKind;
    use glam::Vec3;

    fn ball(mat: &SharedMaterial) -> ShapeDescriptor {
        ShapeDescriptor::new(ShapeKind::sphere(0.2, 8, 8), mat)
    }

    #[test]
    fn part_ids_follow_insertion_order() {
        let mat = SharedMaterial::new(MaterialSpec::phong(Color::WHITE));
        let mut node = ModelNode::new("n");
        let a = node.push_shape(ball(&mat));
        let b = node.push_shape(ball(&mat).at(1.0, 0.0, 0.0));
        assert_eq!((a.index(), b.index()), (0, 1));
        assert_eq!(node.shape(b).transform.position.x, 1.0);
    }

    #[test]
    #[should_panic(expected = "no shape part")]
    fn nested_node_is_not_a_shape_part() {
        let mut node = ModelNode::new("outer");
        let idx = node.push_node(ModelNode::new("inner"));
        node.shape(PartId(idx));
    }

    #[test]
    fn world_shapes_compose_parent_transforms() {
        let mat = SharedMaterial::new(MaterialSpec::phong(Color::WHITE));
        let mut inner = ModelNode::new("inner");
        inner.transform = Transform::from_position(Vec3::new(0.0, 1.0, 0.0));
        inner.push_shape(ball(&mat).at(1.0, 0.0, 0.0));

        let mut outer = ModelNode::new("outer");
        outer.transform = Transform::new().uniform_scale(2.0);
        outer.push_shape(ball(&mat));
        outer.push_node(inner);

        let shapes = outer.world_shapes(Mat4::IDENTITY);
        assert_eq!(shapes.len(), 2);
        assert_eq!(outer.shape_count(), 2);
        let p = shapes[1].0.transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(2.0, 2.0, 0.0)).length() < 1e-6);
    }
}

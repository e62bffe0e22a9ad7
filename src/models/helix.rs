//! The DNA double helix shown in the first project showcase.

use std::f32::consts::FRAC_PI_2;

use crate::color::Color;
use crate::layout;
use crate::material::{MaterialSpec, SharedMaterial};
use crate::node::{ModelNode, PartId};
use crate::shape::{ShapeDescriptor, ShapeKind};

pub const SEGMENTS: usize = 20;
pub const HEIGHT: f32 = 4.0;
pub const RADIUS: f32 = 1.0;

/// Two strands of spheres with a cross-bar on every third rung.
#[derive(Clone, Debug)]
pub struct DnaHelix {
    pub node: ModelNode,
    /// `(strand A, strand B)` per rung.
    pub strands: Vec<(PartId, PartId)>,
    pub connectors: Vec<PartId>,
}

impl DnaHelix {
    pub fn build() -> Self {
        Self::with_segments(SEGMENTS)
    }

    pub fn with_segments(segments: usize) -> Self {
        let bead = ShapeKind::sphere(0.15, 16, 16);
        let bar = ShapeKind::cylinder(0.05, 0.05, RADIUS * 2.0, 8);

        let mut node = ModelNode::new("dna-helix");
        let mut strands = Vec::with_capacity(segments);
        let mut connectors = Vec::new();

        for step in layout::helix(segments, HEIGHT, RADIUS) {
            let a = step.strand_a;
            let b = step.strand_b;
            let cyan = SharedMaterial::new(MaterialSpec::phong(Color::CYAN));
            let magenta = SharedMaterial::new(MaterialSpec::phong(Color::MAGENTA));
            let left = node.push_shape(ShapeDescriptor::new(bead, &cyan).at(a.x, a.y, a.z));
            let right = node.push_shape(ShapeDescriptor::new(bead, &magenta).at(b.x, b.y, b.z));
            strands.push((left, right));

            if step.connector {
                let white = SharedMaterial::new(MaterialSpec::phong(Color::WHITE).opacity(0.5));
                connectors.push(node.push_shape(
                    ShapeDescriptor::new(bar, &white)
                        .at(0.0, step.y, 0.0)
                        .rotated(0.0, step.angle, FRAC_PI_2),
                ));
            }
        }

        Self {
            node,
            strands,
            connectors,
        }
    }
}

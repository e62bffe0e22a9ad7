//! Shape descriptors: the draw primitives a model is assembled from.

use glam::Vec3;

use crate::material::SharedMaterial;
use crate::transform::Transform;

/// Geometry of a primitive, with its parameters.
///
/// Sizes are in world units before any node scale is applied; segment counts control
/// tessellation only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeKind {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    /// Capped; top and bottom radii may differ to form a frustum.
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    },
    Cone {
        radius: f32,
        height: f32,
        radial_segments: u32,
    },
    /// Ring in the XY plane.
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    Octahedron {
        radius: f32,
        detail: u32,
    },
    Icosahedron {
        radius: f32,
        detail: u32,
    },
}

impl ShapeKind {
    /// Primitive name, as used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Box { .. } => "box",
            ShapeKind::Sphere { .. } => "sphere",
            ShapeKind::Cylinder { .. } => "cylinder",
            ShapeKind::Cone { .. } => "cone",
            ShapeKind::Torus { .. } => "torus",
            ShapeKind::Octahedron { .. } => "octahedron",
            ShapeKind::Icosahedron { .. } => "icosahedron",
        }
    }

    /// The ordered parameter list of this primitive.
    ///
    /// ```
    /// use portfolio3d::ShapeKind;
    ///
    /// let arm = ShapeKind::cylinder(0.2, 0.2, 2.0, 8);
    /// assert_eq!(arm.dimensions(), vec![0.2, 0.2, 2.0, 8.0]);
    /// ```
    pub fn dimensions(&self) -> Vec<f32> {
        match *self {
            ShapeKind::Box {
                width,
                height,
                depth,
            } => vec![width, height, depth],
            ShapeKind::Sphere {
                radius,
                width_segments,
                height_segments,
            } => vec![radius, width_segments as f32, height_segments as f32],
            ShapeKind::Cylinder {
                radius_top,
                radius_bottom,
                height,
                radial_segments,
            } => vec![radius_top, radius_bottom, height, radial_segments as f32],
            ShapeKind::Cone {
                radius,
                height,
                radial_segments,
            } => vec![radius, height, radial_segments as f32],
            ShapeKind::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => vec![
                radius,
                tube,
                radial_segments as f32,
                tubular_segments as f32,
            ],
            ShapeKind::Octahedron { radius, detail } | ShapeKind::Icosahedron { radius, detail } => {
                vec![radius, detail as f32]
            }
        }
    }

    /// Key identifying identical geometry, used to share GPU meshes.
    pub(crate) fn geometry_key(&self) -> (u8, [u32; 4]) {
        let mut bits = [0u32; 4];
        for (slot, value) in bits.iter_mut().zip(self.dimensions()) {
            *slot = value.to_bits();
        }
        let tag = match self {
            ShapeKind::Box { .. } => 0,
            ShapeKind::Sphere { .. } => 1,
            ShapeKind::Cylinder { .. } => 2,
            ShapeKind::Cone { .. } => 3,
            ShapeKind::Torus { .. } => 4,
            ShapeKind::Octahedron { .. } => 5,
            ShapeKind::Icosahedron { .. } => 6,
        };
        (tag, bits)
    }

    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        ShapeKind::Box {
            width,
            height,
            depth,
        }
    }

    pub fn cube(size: f32) -> Self {
        Self::cuboid(size, size, size)
    }

    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        ShapeKind::Sphere {
            radius,
            width_segments,
            height_segments,
        }
    }

    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Self {
        ShapeKind::Cylinder {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
        }
    }

    pub fn cone(radius: f32, height: f32, radial_segments: u32) -> Self {
        ShapeKind::Cone {
            radius,
            height,
            radial_segments,
        }
    }

    pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        ShapeKind::Torus {
            radius,
            tube,
            radial_segments,
            tubular_segments,
        }
    }

    pub fn octahedron(radius: f32, detail: u32) -> Self {
        ShapeKind::Octahedron { radius, detail }
    }

    pub fn icosahedron(radius: f32, detail: u32) -> Self {
        ShapeKind::Icosahedron { radius, detail }
    }
}

/// A positioned, styled primitive inside a model.
///
/// The geometry and the material handle never change after construction. The
/// transform is the only field the animation driver writes.
#[derive(Clone, Debug)]
pub struct ShapeDescriptor {
    kind: ShapeKind,
    material: SharedMaterial,
    pub transform: Transform,
}

impl ShapeDescriptor {
    pub fn new(kind: ShapeKind, material: &SharedMaterial) -> Self {
        Self {
            kind,
            material: material.clone(),
            transform: Transform::new(),
        }
    }

    /// Sets the local position.
    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.position = Vec3::new(x, y, z);
        self
    }

    /// Sets the local Euler rotation (radians).
    pub fn rotated(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.rotation = Vec3::new(x, y, z);
        self
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn material(&self) -> &SharedMaterial {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::material::MaterialSpec;

    #[test]
    fn descriptor_aliases_the_given_material() {
        let mat = SharedMaterial::new(MaterialSpec::phong(Color::CYAN));
        let shape = ShapeDescriptor::new(ShapeKind::cube(1.5), &mat).at(0.0, 2.5, 0.0);
        assert!(shape.material().ptr_eq(&mat));
        assert_eq!(shape.transform.position, Vec3::new(0.0, 2.5, 0.0));
    }

    #[test]
    fn geometry_key_separates_kinds_with_equal_parameters() {
        let a = ShapeKind::octahedron(1.0, 0);
        let b = ShapeKind::icosahedron(1.0, 0);
        assert_ne!(a.geometry_key(), b.geometry_key());
        assert_eq!(a.geometry_key(), ShapeKind::octahedron(1.0, 0).geometry_key());
    }
}

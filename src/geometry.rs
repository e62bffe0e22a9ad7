//! CPU tessellation of [`ShapeKind`]s.
//!
//! Every primitive the models use is turned into an indexed triangle list here, before any
//! GPU work happens. Triangles wind counter-clockwise when seen from outside the surface.
//!
//! | Kind | Vertices | Indices |
//! |------|----------|---------|
//! | box | 24 | 36 |
//! | sphere (w, h segments) | (w+1)(h+1) | 6wh |
//! | cylinder (r segments) | 6r + 4 | 12r |
//! | cone (r segments) | 4r + 3 | 9r |
//! | torus (r, t segments) | (r+1)(t+1) | 6rt |
//! | octahedron (detail d) | 24(d+1)² | same |
//! | icosahedron (detail d) | 60(d+1)² | same |
//!
//! ```
//! use portfolio3d::{ShapeKind, geometry};
//!
//! let ball = geometry::tessellate(&ShapeKind::sphere(1.0, 16, 16));
//! assert_eq!(ball.vertices.len(), 17 * 17);
//! assert_eq!(ball.triangle_count(), 2 * 16 * 16);
//! ```

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::gpu::GpuContext;
use crate::mesh::{Mesh, Vertex3d};
use crate::shape::ShapeKind;

/// Raw geometry data before GPU upload.
#[derive(Clone, Debug, Default)]
pub struct RawGeometry {
    pub vertices: Vec<Vertex3d>,
    /// Triangle list indices.
    pub indices: Vec<u32>,
}

impl RawGeometry {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds as `(min, max)`.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);

        for v in &self.vertices {
            let p = Vec3::from(v.position);
            min = min.min(p);
            max = max.max(p);
        }

        (min, max)
    }

    /// Iterates triangles as position triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                Vec3::from(self.vertices[tri[0] as usize].position),
                Vec3::from(self.vertices[tri[1] as usize].position),
                Vec3::from(self.vertices[tri[2] as usize].position),
            ]
        })
    }

    pub fn upload(&self, gpu: &GpuContext) -> Mesh {
        Mesh::new(gpu, &self.vertices, &self.indices)
    }

    fn push(&mut self, position: Vec3, normal: Vec3, uv: Vec2) -> u32 {
        self.vertices
            .push(Vertex3d::new(position.into(), normal.into(), uv.into()));
        (self.vertices.len() - 1) as u32
    }
}

/// Tessellates a shape in its local space, centred on the origin.
pub fn tessellate(kind: &ShapeKind) -> RawGeometry {
    match *kind {
        ShapeKind::Box {
            width,
            height,
            depth,
        } => cuboid(Vec3::new(width, height, depth) * 0.5),
        ShapeKind::Sphere {
            radius,
            width_segments,
            height_segments,
        } => sphere(radius, width_segments.max(3), height_segments.max(2)),
        ShapeKind::Cylinder {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
        } => cylinder(radius_top, radius_bottom, height, radial_segments.max(3)),
        ShapeKind::Cone {
            radius,
            height,
            radial_segments,
        } => cylinder(0.0, radius, height, radial_segments.max(3)),
        ShapeKind::Torus {
            radius,
            tube,
            radial_segments,
            tubular_segments,
        } => torus(radius, tube, radial_segments.max(2), tubular_segments.max(3)),
        ShapeKind::Octahedron { radius, detail } => polyhedron(&OCTAHEDRON, radius, detail),
        ShapeKind::Icosahedron { radius, detail } => polyhedron(&ICOSAHEDRON, radius, detail),
    }
}

fn cuboid(half: Vec3) -> RawGeometry {
    // (normal, u, v) with u × v = normal so each quad winds outward
    const FACES: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];

    let mut geo = RawGeometry::default();
    for (n, u, v) in FACES {
        let center = n * half;
        let du = u * half;
        let dv = v * half;
        let a = geo.push(center - du - dv, n, Vec2::new(0.0, 1.0));
        let b = geo.push(center + du - dv, n, Vec2::new(1.0, 1.0));
        let c = geo.push(center + du + dv, n, Vec2::new(1.0, 0.0));
        let d = geo.push(center - du + dv, n, Vec2::new(0.0, 0.0));
        geo.indices.extend_from_slice(&[a, b, c, c, d, a]);
    }
    geo
}

fn sphere(radius: f32, segments: u32, rings: u32) -> RawGeometry {
    let mut geo = RawGeometry::default();

    for ring in 0..=rings {
        let v = ring as f32 / rings as f32;
        let phi = PI * v;
        for seg in 0..=segments {
            let u = seg as f32 / segments as f32;
            let theta = TAU * u;
            let normal = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            geo.push(normal * radius, normal, Vec2::new(u, v));
        }
    }

    for ring in 0..rings {
        for seg in 0..segments {
            let current = ring * (segments + 1) + seg;
            let next = current + segments + 1;
            geo.indices
                .extend_from_slice(&[current, current + 1, next, current + 1, next + 1, next]);
        }
    }
    geo
}

/// Open side wall plus a cap on each end with non-zero radius.
fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, segments: u32) -> RawGeometry {
    let mut geo = RawGeometry::default();
    let half = height * 0.5;
    let slope = (radius_bottom - radius_top) / height;

    for (row, (y, r)) in [(half, radius_top), (-half, radius_bottom)].into_iter().enumerate() {
        for seg in 0..=segments {
            let u = seg as f32 / segments as f32;
            let (sin, cos) = (u * TAU).sin_cos();
            let normal = Vec3::new(sin, slope, cos).normalize();
            geo.push(Vec3::new(r * sin, y, r * cos), normal, Vec2::new(u, row as f32));
        }
    }
    for seg in 0..segments {
        let a = seg;
        let b = seg + segments + 1;
        let c = b + 1;
        let d = a + 1;
        geo.indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    if radius_top > 0.0 {
        cap(&mut geo, radius_top, half, segments, true);
    }
    if radius_bottom > 0.0 {
        cap(&mut geo, radius_bottom, -half, segments, false);
    }
    geo
}

fn cap(geo: &mut RawGeometry, radius: f32, y: f32, segments: u32, top: bool) {
    let normal = if top { Vec3::Y } else { Vec3::NEG_Y };

    let centers = geo.vertices.len() as u32;
    for seg in 0..segments {
        let u = (seg as f32 + 0.5) / segments as f32;
        geo.push(Vec3::new(0.0, y, 0.0), normal, Vec2::new(u, 0.5));
    }
    let rim = geo.vertices.len() as u32;
    for seg in 0..=segments {
        let (sin, cos) = (seg as f32 / segments as f32 * TAU).sin_cos();
        let uv = Vec2::new(sin * 0.5 + 0.5, cos * 0.5 + 0.5);
        geo.push(Vec3::new(radius * sin, y, radius * cos), normal, uv);
    }

    for seg in 0..segments {
        let c = centers + seg;
        let i = rim + seg;
        if top {
            geo.indices.extend_from_slice(&[i, i + 1, c]);
        } else {
            geo.indices.extend_from_slice(&[i + 1, i, c]);
        }
    }
}

/// Ring of radius `radius` in the XY plane, tube of radius `tube` around it.
fn torus(radius: f32, tube: f32, radial: u32, tubular: u32) -> RawGeometry {
    let mut geo = RawGeometry::default();

    for j in 0..=radial {
        let v = j as f32 / radial as f32 * TAU;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let position = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            let uv = Vec2::new(i as f32 / tubular as f32, j as f32 / radial as f32);
            geo.push(position, (position - center).normalize_or_zero(), uv);
        }
    }

    let stride = tubular + 1;
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = stride * j + i - 1;
            let b = stride * (j - 1) + i - 1;
            let c = stride * (j - 1) + i;
            let d = stride * j + i;
            geo.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    geo
}

struct Polyhedron {
    vertices: &'static [[f32; 3]],
    faces: &'static [[usize; 3]],
}

const OCTAHEDRON: Polyhedron = Polyhedron {
    vertices: &[
        [1.0, 0.0, 0.0],
        [-1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
    ],
    faces: &[
        [0, 2, 4],
        [0, 4, 3],
        [0, 3, 5],
        [0, 5, 2],
        [1, 2, 5],
        [1, 5, 3],
        [1, 3, 4],
        [1, 4, 2],
    ],
};

// golden ratio
const T: f32 = 1.618_034;

const ICOSAHEDRON: Polyhedron = Polyhedron {
    vertices: &[
        [-1.0, T, 0.0],
        [1.0, T, 0.0],
        [-1.0, -T, 0.0],
        [1.0, -T, 0.0],
        [0.0, -1.0, T],
        [0.0, 1.0, T],
        [0.0, -1.0, -T],
        [0.0, 1.0, -T],
        [T, 0.0, -1.0],
        [T, 0.0, 1.0],
        [-T, 0.0, -1.0],
        [-T, 0.0, 1.0],
    ],
    faces: &[
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ],
};

/// Non-indexed polyhedron: each face split into `(detail + 1)²` triangles, every vertex
/// pushed onto the sphere of `radius`. Detail 0 gets face normals; subdivided shapes get
/// spherical normals.
fn polyhedron(base: &Polyhedron, radius: f32, detail: u32) -> RawGeometry {
    let cols = detail as usize + 1;
    let mut geo = RawGeometry::default();

    for &face in base.faces {
        let [a, b, c] = face.map(|i| Vec3::from(base.vertices[i]));

        // grid[i][j]: row i runs from the a-c edge to the b-c edge
        let grid: Vec<Vec<Vec3>> = (0..=cols)
            .map(|i| {
                let t = i as f32 / cols as f32;
                let left = a.lerp(c, t);
                let right = b.lerp(c, t);
                let rows = cols - i;
                (0..=rows)
                    .map(|j| {
                        if rows == 0 {
                            left
                        } else {
                            left.lerp(right, j as f32 / rows as f32)
                        }
                    })
                    .collect()
            })
            .collect();

        for i in 0..cols {
            for j in 0..2 * (cols - i) - 1 {
                let k = j / 2;
                let tri = if j % 2 == 0 {
                    [grid[i][k + 1], grid[i + 1][k], grid[i][k]]
                } else {
                    [grid[i][k + 1], grid[i + 1][k + 1], grid[i + 1][k]]
                };
                push_spherical_triangle(&mut geo, tri, radius, detail == 0);
            }
        }
    }
    geo
}

fn push_spherical_triangle(geo: &mut RawGeometry, tri: [Vec3; 3], radius: f32, flat: bool) {
    let dirs = tri.map(|p| p.normalize());
    let [p0, p1, p2] = dirs.map(|d| d * radius);
    let face_normal = (p1 - p0).cross(p2 - p0).normalize_or_zero();

    for d in dirs {
        let normal = if flat { face_normal } else { d };
        let uv = Vec2::new(
            d.z.atan2(-d.x) / TAU + 0.5,
            d.y.clamp(-1.0, 1.0).asin() / PI + 0.5,
        );
        let index = geo.push(d * radius, normal, uv);
        geo.indices.push(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every non-degenerate triangle of a convex shape around the origin faces outward.
    fn assert_outward(geo: &RawGeometry) {
        for [a, b, c] in geo.triangles() {
            let n = (b - a).cross(c - a);
            if n.length() < 1e-6 {
                continue;
            }
            let centroid = (a + b + c) / 3.0;
            assert!(n.dot(centroid) > 0.0, "inward triangle {a} {b} {c}");
        }
    }

    #[test]
    fn box_has_four_vertices_per_face() {
        let geo = tessellate(&ShapeKind::cuboid(2.0, 4.0, 6.0));
        assert_eq!(geo.vertices.len(), 24);
        assert_eq!(geo.indices.len(), 36);
        let (min, max) = geo.bounds();
        assert_eq!(min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(max, Vec3::new(1.0, 2.0, 3.0));
        assert_outward(&geo);
    }

    #[test]
    fn sphere_counts_and_radius() {
        let geo = tessellate(&ShapeKind::sphere(0.6, 16, 12));
        assert_eq!(geo.vertices.len(), 17 * 13);
        assert_eq!(geo.indices.len(), 6 * 16 * 12);
        for v in &geo.vertices {
            assert!((Vec3::from(v.position).length() - 0.6).abs() < 1e-5);
        }
        assert_outward(&geo);
    }

    #[test]
    fn cylinder_and_cone_counts() {
        let cyl = tessellate(&ShapeKind::cylinder(0.2, 0.3, 0.8, 8));
        assert_eq!(cyl.vertices.len(), 6 * 8 + 4);
        assert_eq!(cyl.indices.len(), 12 * 8);
        assert_outward(&cyl);

        let cone = tessellate(&ShapeKind::cone(1.0, 3.0, 8));
        assert_eq!(cone.vertices.len(), 4 * 8 + 3);
        assert_eq!(cone.indices.len(), 9 * 8);
        let (min, max) = cone.bounds();
        assert!((min.y + 1.5).abs() < 1e-6 && (max.y - 1.5).abs() < 1e-6);
        assert_outward(&cone);
    }

    #[test]
    fn torus_lies_in_the_xy_plane() {
        let geo = tessellate(&ShapeKind::torus(1.8, 0.05, 16, 100));
        assert_eq!(geo.vertices.len(), 17 * 101);
        assert_eq!(geo.indices.len(), 6 * 16 * 100);
        let (min, max) = geo.bounds();
        assert!((max.x - 1.85).abs() < 1e-4);
        assert!((max.z - 0.05).abs() < 1e-4);
        assert!((min.z + 0.05).abs() < 1e-4);
    }

    #[test]
    fn polyhedra_subdivide_and_stay_on_the_sphere() {
        let oct = tessellate(&ShapeKind::octahedron(0.3, 0));
        assert_eq!(oct.vertices.len(), 24);
        assert_outward(&oct);

        let ico = tessellate(&ShapeKind::icosahedron(1.5, 1));
        assert_eq!(ico.vertices.len(), 60 * 4);
        assert_eq!(ico.triangle_count(), 80);
        for v in &ico.vertices {
            assert!((Vec3::from(v.position).length() - 1.5).abs() < 1e-5);
        }
        assert_outward(&ico);
    }

    #[test]
    fn undivided_polyhedra_use_face_normals() {
        let oct = tessellate(&ShapeKind::octahedron(1.0, 0));
        for tri in oct.vertices.chunks_exact(3) {
            assert_eq!(tri[0].normal, tri[1].normal);
            assert_eq!(tri[1].normal, tri[2].normal);
        }
    }
}

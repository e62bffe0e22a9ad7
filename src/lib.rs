//! # portfolio3d
//!
//! **A neon 3D backdrop for a portfolio page, rendered natively.**
//!
//! Procedural models built from primitive shapes (a robot, a spaceship, a crystal cluster),
//! a drifting particle field, and a camera that eases toward the mouse. Four small
//! showcase scenes (a sculpture, a DNA helix, an atom, a flower) tumble in insets along the
//! bottom of the window.
//!
//! ## Quick Start
//!
//! ```no_run
//! use portfolio3d::{AppConfig, run};
//!
//! fn main() -> Result<(), portfolio3d::AppError> {
//!     run(AppConfig::new().title("My portfolio").seed(7))
//! }
//! ```
//!
//! ## Layers
//!
//! - **Models** ([`models`]) are pure builders returning a [`ModelNode`] plus named
//!   [`PartId`] handles for the parts that animate.
//! - **Composition** ([`scene::compose()`]) places the models, scatters particles and adds
//!   lights, fog and the camera.
//! - **Animation** ([`animation`]) advances every scene once per frame from an
//!   [`AnimationState`], which the [`Input`] adapter derives from window events.
//! - **Rendering** tessellates each distinct shape once ([`geometry::tessellate`]) and
//!   draws every scene with wgpu.
//!
//! Everything above the renderer is plain data and runs without a GPU, which is how the
//! tests exercise it.

pub mod animation;
mod app;
mod camera;
mod color;
mod error;
pub mod geometry;
mod gpu;
mod input;
pub mod layout;
mod material;
mod mesh;
mod mesh_pass;
pub mod models;
mod node;
mod particle_pass;
mod particles;
mod renderer;
pub mod scene;
mod shape;
mod transform;

pub use animation::{Animated, AnimationState, FrameScheduler, Placement};
pub use app::{AppConfig, run};
pub use camera::{Camera, CameraRig};
pub use color::Color;
pub use error::{AppError, GpuError};
pub use geometry::RawGeometry;
pub use gpu::GpuContext;
pub use input::Input;
pub use material::{MaterialSpec, Shading, SharedMaterial};
pub use mesh::{Mesh, MeshCache, MeshId, Vertex3d};
pub use node::{Child, ModelNode, PartId};
pub use particles::ParticleField;
pub use renderer::{Renderer, Viewport};
pub use scene::{CompositionConfig, SceneGraph, Showcase, Stage, compose, compose_showcases};
pub use shape::{ShapeDescriptor, ShapeKind};
pub use transform::Transform;

// Re-export glam math types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

//! Scene composition: the background scene graph and the showcase scenes.
//!
//! A scene is anything the renderer can draw and the
//! [`FrameScheduler`](crate::FrameScheduler) can tick: it implements [`Stage`].
//!
//! - [`SceneGraph`] is the full-window background: robot, spaceship, crystal, a particle
//!   field and a mouse-parallax camera.
//! - [`Showcase`] is one small inset canvas holding a single tumbling model.
//!
//! Both are built once by [`compose()`] / [`compose_showcases()`]; afterwards only transform
//! values (and flicker-driven material values) change.
//!
//! ```
//! use portfolio3d::scene::{CompositionConfig, compose, compose_showcases};
//!
//! let graph = compose(&CompositionConfig::default().seed(42));
//! assert_eq!(graph.particles.len(), 8000);
//! assert_eq!(compose_showcases().len(), 4);
//! ```

mod compose;
mod graph;
mod lighting;
mod showcase;

pub use compose::{CompositionConfig, compose, compose_showcases};
pub use graph::{Placements, SceneGraph};
pub use lighting::{Fog, Light, Lighting, MAX_LIGHTS};
pub use showcase::Showcase;

use glam::Mat4;

use crate::animation::Animated;
use crate::camera::Camera;
use crate::color::Color;
use crate::particles::ParticleField;
use crate::shape::ShapeDescriptor;

/// A drawable, animated scene.
pub trait Stage: Animated {
    fn camera(&self) -> &Camera;

    fn lighting(&self) -> &Lighting;

    /// Every shape with its world matrix, in construction order.
    fn world_shapes(&self) -> Vec<(Mat4, &ShapeDescriptor)>;

    /// The point cloud and its model matrix, if the scene has one.
    fn particles(&self) -> Option<(&ParticleField, Mat4)> {
        None
    }

    /// Background the scene clears to; `None` draws over what is already there.
    fn clear_color(&self) -> Option<Color> {
        None
    }

    /// Inset slot along the bottom of the window, or `None` for the full window.
    fn inset(&self) -> Option<usize> {
        None
    }
}

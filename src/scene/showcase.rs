//! Small inset scenes holding a single tumbling model.

use glam::Mat4;

use crate::animation::{self, Animated, AnimationState};
use crate::camera::Camera;
use crate::node::ModelNode;
use crate::shape::ShapeDescriptor;

use super::{Lighting, Stage};

/// A small self-contained scene: one model tumbling in front of its own camera.
///
/// Showcases draw into an inset viewport with a transparent background.
#[derive(Clone, Debug)]
pub struct Showcase {
    pub name: String,
    pub model: ModelNode,
    pub camera: Camera,
    pub lighting: Lighting,
    /// Inset slot, counted from the left along the bottom edge of the window.
    pub slot: usize,
}

impl Showcase {
    pub fn new(name: impl Into<String>, model: ModelNode, distance: f32, lighting: Lighting) -> Self {
        Self {
            name: name.into(),
            model,
            camera: Camera::new().at(0.0, 0.0, distance),
            lighting,
            slot: 0,
        }
    }

    pub fn slot(mut self, slot: usize) -> Self {
        self.slot = slot;
        self
    }
}

impl Animated for Showcase {
    fn name(&self) -> &str {
        &self.name
    }

    fn tick(&mut self, _anim: &AnimationState) {
        animation::animate_showcase(&mut self.model);
    }
}

impl Stage for Showcase {
    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    fn world_shapes(&self) -> Vec<(Mat4, &ShapeDescriptor)> {
        self.model.world_shapes(Mat4::IDENTITY)
    }

    fn inset(&self) -> Option<usize> {
        Some(self.slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::spin;
    use crate::models::Flower;

    #[test]
    fn tick_tumbles_the_model() {
        let mut showcase = Showcase::new("flower", Flower::build().node, 6.0, Lighting::new());
        for _ in 0..4 {
            showcase.tick(&AnimationState::default());
        }
        let r = showcase.model.transform.rotation;
        assert!((r.x - 4.0 * spin::SHOWCASE_X).abs() < 1e-6);
        assert!((r.y - 4.0 * spin::SHOWCASE_Y).abs() < 1e-6);
        assert_eq!(r.z, 0.0);
    }

    #[test]
    fn draws_into_its_slot_without_clearing() {
        let showcase = Showcase::new("flower", Flower::build().node, 6.0, Lighting::new()).slot(2);
        assert_eq!(showcase.inset(), Some(2));
        assert_eq!(showcase.clear_color(), None);
        assert!(showcase.particles().is_none());
        assert_eq!(showcase.camera().position.z, 6.0);
    }
}

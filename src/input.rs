//! Translates window events into the pointer offset and aspect ratio the scene consumes.
//!
//! The core never sees winit types: [`Input`] folds `CursorMoved`, `Resized` and
//! `ScaleFactorChanged` events into an [`AnimationState`] once per frame. All positions are
//! kept in logical pixels, so the parallax strength does not depend on the display's scale
//! factor.

use glam::Vec2;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;

use crate::animation::AnimationState;

/// Logical pixels per unit of normalized pointer offset.
pub const POINTER_DIVISOR: f32 = 100.0;

/// Pointer and viewport state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Input {
    /// Viewport size in logical pixels.
    viewport: Vec2,
    aspect: f32,
    pointer: Vec2,
    scale_factor: f64,
}

impl Default for Input {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl Input {
    /// Starts with the pointer resting at the viewport centre (zero offset). `width` and
    /// `height` are logical pixels.
    pub fn new(width: f32, height: f32) -> Self {
        let mut input = Self {
            viewport: Vec2::ONE,
            aspect: 1.0,
            pointer: Vec2::ZERO,
            scale_factor: 1.0,
        };
        input.on_viewport_resize(width, height);
        input
    }

    /// Adapter for a window of physical `size` at `scale_factor`.
    pub fn for_window(size: PhysicalSize<u32>, scale_factor: f64) -> Self {
        let logical = size.to_logical::<f32>(scale_factor);
        let mut input = Self::new(logical.width, logical.height);
        input.scale_factor = scale_factor;
        input
    }

    /// Records a pointer position in logical pixels and returns its offset from the
    /// viewport centre, scaled down by [`POINTER_DIVISOR`].
    pub fn on_pointer_move(&mut self, x: f32, y: f32) -> Vec2 {
        let half = self.viewport * 0.5;
        self.pointer = (Vec2::new(x, y) - half) / POINTER_DIVISOR;
        self.pointer
    }

    /// Records a new viewport size and returns its aspect ratio.
    ///
    /// A zero (minimised) width or height is ignored and the previous aspect is returned.
    pub fn on_viewport_resize(&mut self, width: f32, height: f32) -> f32 {
        if width > 0.0 && height > 0.0 {
            self.viewport = Vec2::new(width, height);
            self.aspect = width / height;
        }
        self.aspect
    }

    /// Feeds a winit event through the adapter. Returns `true` if the event was consumed.
    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(self.scale_factor);
                self.on_pointer_move(logical.x, logical.y);
                true
            }
            WindowEvent::Resized(size) => {
                let logical = size.to_logical::<f32>(self.scale_factor);
                self.on_viewport_resize(logical.width, logical.height);
                true
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.on_scale_factor_changed(*scale_factor);
                true
            }
            _ => false,
        }
    }

    /// Keeps the logical viewport consistent with the window's physical size, which is
    /// unchanged until the following `Resized` event.
    pub fn on_scale_factor_changed(&mut self, scale_factor: f64) {
        if scale_factor > 0.0 {
            let ratio = (self.scale_factor / scale_factor) as f32;
            let (w, h) = (self.viewport.x * ratio, self.viewport.y * ratio);
            self.scale_factor = scale_factor;
            self.on_viewport_resize(w, h);
        }
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Snapshot for one frame of animation.
    pub fn state(&self, elapsed: f32) -> AnimationState {
        AnimationState::new(elapsed, self.pointer)
    }
}

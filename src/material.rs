//! Surface materials and the shared-material handle.
//!
//! Several shapes in a model share one look: the robot's two eyes and its antenna ball
//! use the same glowing yellow, both engine flames use the same translucent orange. Those
//! shapes hold clones of a single [`SharedMaterial`], and a change made through any clone
//! is seen by every shape holding it. Where shapes must vary independently (the crystal's
//! satellites) the builder calls [`SharedMaterial::fork`] instead, which copies the
//! current values into a fresh handle.
//!
//! ```
//! use portfolio3d::{Color, MaterialSpec, SharedMaterial};
//!
//! let flame = SharedMaterial::new(MaterialSpec::unlit(Color::hex(0xff6600)).opacity(0.8));
//! let left = flame.clone();
//! let right = flame.clone();
//!
//! left.borrow_mut().set_opacity(0.95);
//! assert_eq!(right.borrow().opacity, 0.95);
//!
//! let independent = flame.fork();
//! independent.borrow_mut().set_opacity(0.1);
//! assert_eq!(left.borrow().opacity, 0.95);
//! ```

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use crate::color::Color;

/// How a material reacts to scene lights.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Shading {
    /// Smooth Phong lighting with specular highlights.
    #[default]
    Phong,
    /// Phong lighting with per-face normals for a faceted look.
    Flat,
    /// Ignores lights; the base color is drawn as-is.
    Unlit,
}

impl Shading {
    pub(crate) fn shader_flag(self) -> u32 {
        match self {
            Shading::Phong => 0,
            Shading::Flat => 1,
            Shading::Unlit => 2,
        }
    }
}

/// Appearance of a shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialSpec {
    /// Diffuse color.
    pub base_color: Color,
    /// Self-illumination color, added regardless of lighting.
    pub emissive_color: Color,
    /// Multiplier on `emissive_color`, in `[0, 1]`.
    pub emissive_intensity: f32,
    /// Surface opacity in `[0, 1]`. Only honoured when `transparent` is set.
    pub opacity: f32,
    /// Whether the shape is alpha-blended (and drawn after opaque shapes).
    pub transparent: bool,
    /// Specular exponent, `>= 0`.
    pub shininess: f32,
    pub shading: Shading,
}

impl Default for MaterialSpec {
    fn default() -> Self {
        Self {
            base_color: Color::WHITE,
            emissive_color: Color::BLACK,
            emissive_intensity: 1.0,
            opacity: 1.0,
            transparent: false,
            shininess: 30.0,
            shading: Shading::Phong,
        }
    }
}

impl MaterialSpec {
    /// A lit Phong material with the given base color.
    pub fn phong(base_color: Color) -> Self {
        Self {
            base_color,
            ..Default::default()
        }
    }

    /// A material that ignores lighting.
    pub fn unlit(base_color: Color) -> Self {
        Self {
            base_color,
            shading: Shading::Unlit,
            ..Default::default()
        }
    }

    pub fn emissive(mut self, color: Color) -> Self {
        self.emissive_color = color;
        self
    }

    pub fn emissive_intensity(mut self, intensity: f32) -> Self {
        self.set_emissive_intensity(intensity);
        self
    }

    /// Sets the opacity and marks the material transparent.
    pub fn opacity(mut self, opacity: f32) -> Self {
        self.set_opacity(opacity);
        self.transparent = true;
        self
    }

    pub fn shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess.max(0.0);
        self
    }

    pub fn flat(mut self) -> Self {
        self.shading = Shading::Flat;
        self
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn set_emissive_intensity(&mut self, intensity: f32) {
        self.emissive_intensity = intensity.clamp(0.0, 1.0);
    }

    /// Alpha the renderer should blend with.
    pub fn effective_alpha(&self) -> f32 {
        if self.transparent { self.opacity } else { 1.0 }
    }
}

/// Reference-counted handle to a [`MaterialSpec`].
///
/// `clone()` creates an alias: all clones observe the same values. Use
/// [`fork`](Self::fork) for an independent copy.
#[derive(Clone, Debug)]
pub struct SharedMaterial(Rc<RefCell<MaterialSpec>>);

impl SharedMaterial {
    pub fn new(spec: MaterialSpec) -> Self {
        Self(Rc::new(RefCell::new(spec)))
    }

    /// Deep copy into a new, unaliased handle.
    pub fn fork(&self) -> Self {
        Self::new(*self.0.borrow())
    }

    pub fn borrow(&self) -> Ref<'_, MaterialSpec> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, MaterialSpec> {
        self.0.borrow_mut()
    }

    /// Copy of the current values.
    pub fn get(&self) -> MaterialSpec {
        *self.0.borrow()
    }

    /// True when both handles alias the same material.
    pub fn ptr_eq(&self, other: &SharedMaterial) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Number of handles aliasing this material.
    pub fn alias_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_clamp_ranges() {
        let m = MaterialSpec::phong(Color::WHITE)
            .opacity(1.7)
            .emissive_intensity(-0.5)
            .shininess(-3.0);
        assert_eq!(m.opacity, 1.0);
        assert_eq!(m.emissive_intensity, 0.0);
        assert_eq!(m.shininess, 0.0);
        assert!(m.transparent);
    }

    #[test]
    fn opaque_material_ignores_opacity() {
        let mut m = MaterialSpec::phong(Color::WHITE);
        m.set_opacity(0.2);
        assert_eq!(m.effective_alpha(), 1.0);
    }

    #[test]
    fn clones_alias_and_forks_do_not() {
        let a = SharedMaterial::new(MaterialSpec::phong(Color::CYAN));
        let b = a.clone();
        let c = a.fork();

        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
        assert_eq!(a.alias_count(), 2);

        b.borrow_mut().shininess = 100.0;
        assert_eq!(a.borrow().shininess, 100.0);
        assert_eq!(c.borrow().shininess, 30.0);
    }
}

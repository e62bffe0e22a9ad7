//! RGBA colors used by materials, lights and the particle field.
//!
//! Colors are authored in sRGB, like the hex literals they are usually written as. The
//! renderer converts them with [`Color::to_linear`] before upload.

/// RGBA color with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Build an opaque color from a `0xRRGGBB` literal.
    ///
    /// ```
    /// use portfolio3d::Color;
    ///
    /// assert_eq!(Color::hex(0x00ffff), Color::CYAN);
    /// ```
    pub const fn hex(rgb: u32) -> Self {
        let r = ((rgb >> 16) & 0xff) as f32 / 255.0;
        let g = ((rgb >> 8) & 0xff) as f32 / 255.0;
        let b = (rgb & 0xff) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    /// Neon accent used throughout the scene.
    pub const CYAN: Color = Color::rgb(0.0, 1.0, 1.0);
    /// Second neon accent, the complement of [`Color::CYAN`] on the R/G axis.
    pub const MAGENTA: Color = Color::rgb(1.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);

    /// Linear interpolation between two colors; `t = 0` yields `self`.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Returns this color scaled by `k` on the RGB channels, alpha untouched.
    pub fn scaled(self, k: f32) -> Color {
        Color::rgba(self.r * k, self.g * k, self.b * k, self.a)
    }

    /// Converts sRGB channels to linear light; alpha is already linear.
    pub fn to_linear(self) -> Color {
        fn channel(c: f32) -> f32 {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        Color::rgba(channel(self.r), channel(self.g), channel(self.b), self.a)
    }

    pub fn to_rgb(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl From<Color> for wgpu::Color {
    fn from(c: Color) -> Self {
        wgpu::Color {
            r: c.r as f64,
            g: c.g as f64,
            b: c.b as f64,
            a: c.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_decodes_channels() {
        let c = Color::hex(0x003333);
        assert_eq!(c.r, 0.0);
        assert!((c.g - 0.2).abs() < 1e-6);
        assert!((c.b - 0.2).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn cyan_magenta_lerp_is_complementary() {
        for t in [0.0, 0.25, 0.5, 0.9, 1.0] {
            let c = Color::CYAN.lerp(Color::MAGENTA, t);
            assert!((c.r - t).abs() < 1e-6);
            assert!((c.r + c.g - 1.0).abs() < 1e-6);
            assert_eq!(c.b, 1.0);
        }
    }

    #[test]
    fn linear_conversion_keeps_endpoints() {
        assert_eq!(Color::WHITE.to_linear(), Color::WHITE);
        assert_eq!(Color::BLACK.to_linear(), Color::BLACK);
        let mid = Color::rgba(0.5, 0.5, 0.5, 0.5).to_linear();
        assert!((mid.r - 0.214).abs() < 1e-3);
        assert_eq!(mid.a, 0.5);
    }
}

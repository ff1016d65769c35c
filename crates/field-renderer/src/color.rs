/// RGBA color in linear space with values in [0, 1]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Convert sRGB color (0-255) to linear space
    #[inline]
    pub const fn from_srgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        const fn srgb_to_linear(c: u8) -> f32 {
            let x = c as f32 / 255.0;
            if x <= 0.04045 {
                x / 12.92
            } else {
                // Polynomial fit of ((x + 0.055) / 1.055)^2.4, usable in const context
                let t = (x + 0.055) / 1.055;
                t * t * (0.5870 * t + 0.4130)
            }
        }

        Self::new(
            srgb_to_linear(r),
            srgb_to_linear(g),
            srgb_to_linear(b),
            a as f32 / 255.0,
        )
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

/// Hero banner palette
pub mod palette {
    use super::Color;

    /// Page background behind the field
    pub const BACKGROUND: Color = Color::from_srgba(5, 8, 22, 255);
    /// Link stroke, alpha comes from the link opacity
    pub const LINK: Color = Color::from_srgba(0, 102, 255, 255);
    /// Glow gradient at the particle center
    pub const GLOW_CORE: Color = Color::from_srgba(0, 85, 221, 204);
    /// Glow gradient at the gradient radius
    pub const GLOW_EDGE: Color = Color::from_srgba(0, 102, 255, 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_srgba_endpoints() {
        let black = Color::from_srgba(0, 0, 0, 0);
        assert_eq!(black, Color::new(0.0, 0.0, 0.0, 0.0));

        let white = Color::from_srgba(255, 255, 255, 255);
        assert!((white.r - 1.0).abs() < 1e-3);
        assert_eq!(white.a, 1.0);
    }

    #[test]
    fn test_lerp() {
        let a = Color::new(0.0, 0.0, 0.0, 1.0);
        let b = Color::new(1.0, 0.5, 0.0, 0.0);
        assert_eq!(a.lerp(b, 0.5), Color::new(0.5, 0.25, 0.0, 0.5));
        assert_eq!(a.lerp(b, 0.0), a);
    }
}

//! Vertex colors returned by color generators.

/// A linear color with or without an explicit alpha channel.
///
/// Generators that only care about hue return [`Color::Rgb`]; the builders
/// widen it to RGBA with an alpha of `1.0` when writing the color buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    /// Three channels, implicitly opaque.
    Rgb([f32; 3]),
    /// Four channels with explicit alpha.
    Rgba([f32; 4]),
}

impl Color {
    /// Opaque white, used when no color generator is supplied.
    pub const WHITE: Color = Color::Rgb([1.0, 1.0, 1.0]);

    /// Build an opaque color from a `0xRRGGBB` literal.
    #[must_use]
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xff) as f32 / 255.0;
        let g = ((hex >> 8) & 0xff) as f32 / 255.0;
        let b = (hex & 0xff) as f32 / 255.0;
        Color::Rgb([r, g, b])
    }

    /// The four channels written to the color buffer.
    #[inline]
    #[must_use]
    pub fn to_rgba(self) -> [f32; 4] {
        match self {
            Color::Rgb([r, g, b]) => [r, g, b, 1.0],
            Color::Rgba(rgba) => rgba,
        }
    }

    /// Component-wise linear interpolation. The result keeps an alpha channel
    /// only if either endpoint has one.
    #[must_use]
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let a = self.to_rgba();
        let b = other.to_rgba();
        let mix = |i: usize| a[i] + (b[i] - a[i]) * t;
        match (self, other) {
            (Color::Rgb(_), Color::Rgb(_)) => Color::Rgb([mix(0), mix(1), mix(2)]),
            _ => Color::Rgba([mix(0), mix(1), mix(2), mix(3)]),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl From<[f32; 3]> for Color {
    fn from(rgb: [f32; 3]) -> Self {
        Color::Rgb(rgb)
    }
}

impl From<[f32; 4]> for Color {
    fn from(rgba: [f32; 4]) -> Self {
        Color::Rgba(rgba)
    }
}

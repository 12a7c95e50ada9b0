//! RGBA color used by styles and shader parameters.

use serde::{Deserialize, Serialize};

/// Linear RGBA color with `f32` channels in `[0, 1]`.
///
/// Serializes as a plain `[r, g, b, a]` array so style sheets can write
/// `color: (0.1, 0.2, 0.3, 1.0)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from 8-bit channels.
    pub fn from_rgba8(rgba: [u8; 4]) -> Self {
        Self::new(
            rgba[0] as f32 / 255.0,
            rgba[1] as f32 / 255.0,
            rgba[2] as f32 / 255.0,
            rgba[3] as f32 / 255.0,
        )
    }

    /// Convert to 8-bit channels, clamping out-of-range values.
    pub fn to_rgba8(self) -> [u8; 4] {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b), quantize(self.a)]
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// True when the alpha channel is non-zero.
    ///
    /// Shadow features are disabled by giving their color zero alpha.
    pub fn is_visible(self) -> bool {
        self.a != 0.0
    }

    pub fn is_finite(self) -> bool {
        self.to_array().iter().all(|c| c.is_finite())
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<[f32; 4]> for Rgba {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<Rgba> for [f32; 4] {
    fn from(color: Rgba) -> Self {
        color.to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba8_conversion() {
        let color = Rgba::from_rgba8([255, 0, 51, 255]);
        assert_eq!(color.r, 1.0);
        assert_eq!(color.g, 0.0);
        assert!((color.b - 0.2).abs() < 1e-6);
        assert_eq!(color.to_rgba8(), [255, 0, 51, 255]);
    }

    #[test]
    fn rgba8_clamps_out_of_range() {
        assert_eq!(Rgba::new(1.5, -0.5, 0.5, 1.0).to_rgba8(), [255, 0, 128, 255]);
    }

    #[test]
    fn visibility_follows_alpha() {
        assert!(!Rgba::TRANSPARENT.is_visible());
        assert!(Rgba::BLACK.is_visible());
        assert!(Rgba::WHITE.with_alpha(0.01).is_visible());
        assert!(!Rgba::WHITE.with_alpha(0.0).is_visible());
    }

    #[test]
    fn non_finite_channels_detected() {
        assert!(Rgba::WHITE.is_finite());
        assert!(!Rgba::new(f32::NAN, 0.0, 0.0, 1.0).is_finite());
        assert!(!Rgba::new(0.0, 0.0, f32::INFINITY, 1.0).is_finite());
    }

    #[test]
    fn serializes_as_array() {
        let json = serde_json::to_string(&Rgba::new(0.25, 0.5, 0.75, 1.0)).unwrap();
        assert_eq!(json, "[0.25,0.5,0.75,1.0]");
        let parsed: Rgba = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Rgba::new(0.25, 0.5, 0.75, 1.0));
    }
}

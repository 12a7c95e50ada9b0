//! Font style: how a piece of MSDF text should look.
//!
//! A [`FontStyle`] names the font it renders with and carries size, weight,
//! color, and the two shadow effects. It is plain data. The only behavior is
//! validation of the two fields that must never be unusable (font name and
//! color) and the derived shadow predicates.
//!
//! Styles are usually cloned out of a [`StyleRegistry`](crate::StyleRegistry)
//! and then tweaked per text element:
//!
//! ```
//! use glyphfield::{FontStyle, Rgba};
//!
//! let mut style = FontStyle::new("roboto")?;
//! style
//!     .set_size(24.0)
//!     .set_weight(FontStyle::WEIGHT_BOLD)
//!     .set_shadow_color(Rgba::BLACK.with_alpha(0.5));
//! style.set_color(Rgba::WHITE)?;
//! assert!(style.is_shadow_enabled());
//! # Ok::<(), glyphfield::Error>(())
//! ```

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::{Error, Result};

/// Visual description of a piece of distance-field text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FontStyleDef")]
pub struct FontStyle {
    font_name: String,
    size: f32,
    weight: f32,
    color: Rgba,
    all_caps: bool,
    shadow_color: Rgba,
    shadow_offset: [f32; 2],
    shadow_smoothing: f32,
    shadow_clipped: bool,
    inner_shadow_color: Rgba,
    inner_shadow_range: f32,
}

impl FontStyle {
    pub const WEIGHT_LIGHT: f32 = -0.2;
    pub const WEIGHT_REGULAR: f32 = 0.0;
    pub const WEIGHT_BOLD: f32 = 0.2;

    /// Weights outside this range reliably produce artifacts. Not enforced.
    pub const WEIGHT_RANGE: RangeInclusive<f32> = -0.5..=0.5;

    /// Useful range for `shadow_smoothing` and `inner_shadow_range`, in
    /// encoded-distance units. Not enforced.
    pub const SMOOTHING_RANGE: RangeInclusive<f32> = 0.0..=0.5;

    pub const DEFAULT_FONT_NAME: &'static str = "default";
    pub const DEFAULT_SIZE: f32 = 32.0;

    /// Create a style with default values for the given font.
    pub fn new(font_name: impl Into<String>) -> Result<Self> {
        let mut style = Self::default();
        style.set_font_name(font_name)?;
        Ok(style)
    }

    pub fn font_name(&self) -> &str {
        &self.font_name
    }

    /// Replace the font name. Fails on an empty name and leaves the style untouched.
    pub fn set_font_name(&mut self, font_name: impl Into<String>) -> Result<&mut Self> {
        let font_name = font_name.into();
        if font_name.is_empty() {
            return Err(Error::InvalidArgument("font name cannot be empty".into()));
        }
        self.font_name = font_name;
        Ok(self)
    }

    /// Display size in pixels.
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn set_size(&mut self, size: f32) -> &mut Self {
        self.size = size;
        self
    }

    /// Signed offset from the neutral iso-surface threshold. `0.0` reproduces
    /// the font's outline, positive values thicken it.
    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: f32) -> &mut Self {
        if !Self::WEIGHT_RANGE.contains(&weight) {
            tracing::debug!(weight, "font weight outside recommended range");
        }
        self.weight = weight;
        self
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    /// Replace the text color.
    ///
    /// `None` and non-finite channels are rejected with
    /// [`Error::InvalidArgument`], leaving the current color in place.
    pub fn set_color(&mut self, color: impl Into<Option<Rgba>>) -> Result<&mut Self> {
        let Some(color) = color.into() else {
            return Err(Error::InvalidArgument("color cannot be absent".into()));
        };
        if !color.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "color channels must be finite, got {:?}",
                color.to_array()
            )));
        }
        self.color = color;
        Ok(self)
    }

    /// Whether text should be upper-cased before layout.
    pub fn all_caps(&self) -> bool {
        self.all_caps
    }

    pub fn set_all_caps(&mut self, all_caps: bool) -> &mut Self {
        self.all_caps = all_caps;
        self
    }

    pub fn shadow_color(&self) -> Rgba {
        self.shadow_color
    }

    pub fn set_shadow_color(&mut self, color: Rgba) -> &mut Self {
        self.shadow_color = color;
        self
    }

    /// Outer shadow offset in atlas texels. Positive Y points down the atlas.
    pub fn shadow_offset(&self) -> [f32; 2] {
        self.shadow_offset
    }

    pub fn set_shadow_offset(&mut self, offset: [f32; 2]) -> &mut Self {
        self.shadow_offset = offset;
        self
    }

    pub fn shadow_smoothing(&self) -> f32 {
        self.shadow_smoothing
    }

    pub fn set_shadow_smoothing(&mut self, smoothing: f32) -> &mut Self {
        if !Self::SMOOTHING_RANGE.contains(&smoothing) {
            tracing::debug!(smoothing, "shadow smoothing outside [0, 0.5]");
        }
        self.shadow_smoothing = smoothing;
        self
    }

    /// Whether the outer shadow is suppressed underneath the glyph body.
    pub fn shadow_clipped(&self) -> bool {
        self.shadow_clipped
    }

    pub fn set_shadow_clipped(&mut self, clipped: bool) -> &mut Self {
        self.shadow_clipped = clipped;
        self
    }

    pub fn inner_shadow_color(&self) -> Rgba {
        self.inner_shadow_color
    }

    pub fn set_inner_shadow_color(&mut self, color: Rgba) -> &mut Self {
        self.inner_shadow_color = color;
        self
    }

    pub fn inner_shadow_range(&self) -> f32 {
        self.inner_shadow_range
    }

    pub fn set_inner_shadow_range(&mut self, range: f32) -> &mut Self {
        if !Self::SMOOTHING_RANGE.contains(&range) {
            tracing::debug!(range, "inner shadow range outside [0, 0.5]");
        }
        self.inner_shadow_range = range;
        self
    }

    pub fn is_shadow_enabled(&self) -> bool {
        self.shadow_color.is_visible()
    }

    pub fn is_inner_shadow_enabled(&self) -> bool {
        self.inner_shadow_color.is_visible()
    }
}

impl Default for FontStyle {
    fn default() -> Self {
        Self {
            font_name: Self::DEFAULT_FONT_NAME.to_string(),
            size: Self::DEFAULT_SIZE,
            weight: Self::WEIGHT_REGULAR,
            color: Rgba::BLACK,
            all_caps: false,
            shadow_color: Rgba::TRANSPARENT,
            shadow_offset: [2.0, 2.0],
            shadow_smoothing: 0.1,
            shadow_clipped: false,
            inner_shadow_color: Rgba::TRANSPARENT,
            inner_shadow_range: 0.3,
        }
    }
}

// ============================================================================
// DESERIALIZATION
// ============================================================================

/// Unvalidated mirror of [`FontStyle`] used when reading style sheets.
///
/// Every field is optional in the sheet and falls back to the
/// [`FontStyle::default`] value.
#[derive(Deserialize)]
#[serde(default)]
struct FontStyleDef {
    font_name: String,
    size: f32,
    weight: f32,
    color: Rgba,
    all_caps: bool,
    shadow_color: Rgba,
    shadow_offset: [f32; 2],
    shadow_smoothing: f32,
    shadow_clipped: bool,
    inner_shadow_color: Rgba,
    inner_shadow_range: f32,
}

impl Default for FontStyleDef {
    fn default() -> Self {
        let style = FontStyle::default();
        Self {
            font_name: style.font_name,
            size: style.size,
            weight: style.weight,
            color: style.color,
            all_caps: style.all_caps,
            shadow_color: style.shadow_color,
            shadow_offset: style.shadow_offset,
            shadow_smoothing: style.shadow_smoothing,
            shadow_clipped: style.shadow_clipped,
            inner_shadow_color: style.inner_shadow_color,
            inner_shadow_range: style.inner_shadow_range,
        }
    }
}

impl TryFrom<FontStyleDef> for FontStyle {
    type Error = Error;

    fn try_from(def: FontStyleDef) -> Result<Self> {
        let mut style = FontStyle::new(def.font_name)?;
        style.set_color(def.color)?;
        style
            .set_size(def.size)
            .set_weight(def.weight)
            .set_all_caps(def.all_caps)
            .set_shadow_color(def.shadow_color)
            .set_shadow_offset(def.shadow_offset)
            .set_shadow_smoothing(def.shadow_smoothing)
            .set_shadow_clipped(def.shadow_clipped)
            .set_inner_shadow_color(def.inner_shadow_color)
            .set_inner_shadow_range(def.inner_shadow_range);
        Ok(style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let style = FontStyle::default();
        assert_eq!(style.font_name(), "default");
        assert_eq!(style.weight(), 0.0);
        assert_eq!(style.color(), Rgba::BLACK);
        assert!(!style.all_caps());
        assert!(!style.is_shadow_enabled());
        assert!(!style.is_inner_shadow_enabled());
    }

    #[test]
    fn test_new_rejects_empty_font_name() {
        assert!(matches!(FontStyle::new(""), Err(Error::InvalidArgument(_))));
        assert_eq!(FontStyle::new("roboto").unwrap().font_name(), "roboto");
    }

    #[test]
    fn test_empty_font_name_leaves_style_unmodified() {
        let mut style = FontStyle::new("roboto").unwrap();
        let before = style.clone();

        let err = style.set_font_name("").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(style, before);
    }

    #[test]
    fn test_absent_color_leaves_style_unmodified() {
        let mut style = FontStyle::new("roboto").unwrap();
        style.set_color(Rgba::WHITE).unwrap();
        let before = style.clone();

        let err = style.set_color(None).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(style, before);

        let err = style.set_color(Rgba::new(f32::NAN, 0.0, 0.0, 1.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(style.color(), Rgba::WHITE);
    }

    #[test]
    fn test_unconstrained_setters_accept_anything() {
        let mut style = FontStyle::default();
        style
            .set_weight(3.0)
            .set_size(-4.0)
            .set_shadow_smoothing(2.0)
            .set_inner_shadow_range(-1.0);
        assert_eq!(style.weight(), 3.0);
        assert_eq!(style.size(), -4.0);
        assert_eq!(style.shadow_smoothing(), 2.0);
        assert_eq!(style.inner_shadow_range(), -1.0);
    }

    #[test]
    fn test_shadow_predicates_follow_alpha() {
        let mut style = FontStyle::default();
        style.set_shadow_color(Rgba::new(0.0, 0.0, 0.0, 0.4));
        assert!(style.is_shadow_enabled());
        assert!(!style.is_inner_shadow_enabled());

        style.set_inner_shadow_color(Rgba::new(1.0, 0.0, 0.0, 0.0));
        assert!(!style.is_inner_shadow_enabled());
        style.set_inner_shadow_color(Rgba::new(1.0, 0.0, 0.0, 1.0));
        assert!(style.is_inner_shadow_enabled());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = FontStyle::new("roboto").unwrap();
        original
            .set_shadow_color(Rgba::new(0.1, 0.2, 0.3, 0.4))
            .set_shadow_offset([1.0, -1.0]);
        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.set_color(Rgba::WHITE).unwrap();
        copy.set_shadow_offset([9.0, 9.0])
            .set_shadow_color(Rgba::WHITE)
            .set_font_name("other")
            .unwrap();

        assert_eq!(original.color(), Rgba::BLACK);
        assert_eq!(original.shadow_offset(), [1.0, -1.0]);
        assert_eq!(original.shadow_color(), Rgba::new(0.1, 0.2, 0.3, 0.4));
        assert_eq!(original.font_name(), "roboto");
    }

    #[test]
    fn test_ron_partial_style_uses_defaults() {
        let style: FontStyle =
            ron::from_str(r#"(font_name: "roboto", size: 48.0, all_caps: true)"#).unwrap();
        assert_eq!(style.font_name(), "roboto");
        assert_eq!(style.size(), 48.0);
        assert!(style.all_caps());
        assert_eq!(style.shadow_offset(), [2.0, 2.0]);
        assert_eq!(style.color(), Rgba::BLACK);
    }

    #[test]
    fn test_ron_rejects_empty_font_name() {
        let result: std::result::Result<FontStyle, _> = ron::from_str(r#"(font_name: "")"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut style = FontStyle::new("roboto").unwrap();
        style.set_weight(0.15).set_shadow_clipped(true);
        let json = serde_json::to_string(&style).unwrap();
        let parsed: FontStyle = serde_json::from_str(&json).unwrap();
        assert_eq!(style, parsed);
    }
}

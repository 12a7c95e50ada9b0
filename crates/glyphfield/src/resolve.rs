//! Distance-field parameter resolution.
//!
//! Turns a font's bake-time metrics and a [`FontStyle`] into the values the
//! MSDF shader needs. The central quantity is the distance factor:
//!
//! ```text
//! distance_factor = distance_range * size / glyph_size
//! ```
//!
//! The atlas encodes an edge gradient `distance_range` texels wide at
//! `glyph_size` pixels per glyph. Drawn at `size` pixels, that gradient spans
//! `distance_factor` screen pixels, so the shader's anti-aliasing ramp is
//! `1 / distance_factor` wide in encoded-distance units. Get this wrong and
//! text goes blurry when scaled up or aliased when scaled down.
//!
//! Everything else passes through. Shadow smoothing and inner shadow range
//! are already in the normalized `[0, 0.5]` encoded-distance domain, and the
//! shadow offset stays in atlas texels (the shader divides by the atlas size).

use serde::Serialize;

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::font::FontMetrics;
use crate::style::FontStyle;

/// Per-draw shader inputs derived from a font and a style.
///
/// Recomputed on every draw; it has no link back to either input.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ShaderParams {
    /// Screen pixels spanned by the encoded distance range.
    pub distance_factor: f32,
    /// Additive offset on the 0.5 iso-surface threshold.
    pub weight: f32,
    pub color: Rgba,
    pub shadow_color: Rgba,
    /// Outer shadow offset in atlas texels.
    pub shadow_offset: [f32; 2],
    pub shadow_smoothing: f32,
    pub shadow_clipped: bool,
    pub inner_shadow_color: Rgba,
    pub inner_shadow_range: f32,
}

impl ShaderParams {
    pub fn is_shadow_enabled(&self) -> bool {
        self.shadow_color.is_visible()
    }

    pub fn is_inner_shadow_enabled(&self) -> bool {
        self.inner_shadow_color.is_visible()
    }
}

/// Resolve shader parameters for drawing `style` with a font baked with `font`.
///
/// Fails with [`Error::InvalidAsset`] if the glyph size or distance range is
/// not a finite positive number. Pure: identical inputs give identical output.
pub fn resolve(font: &FontMetrics, style: &FontStyle) -> Result<ShaderParams> {
    font.validate()?;

    let distance_factor = font.distance_range * style.size() / font.glyph_size;
    tracing::trace!(font = style.font_name(), distance_factor, "resolved MSDF params");

    // Disabled shadows are still passed through verbatim; the shader skips
    // them on zero alpha.
    Ok(ShaderParams {
        distance_factor,
        weight: style.weight(),
        color: style.color(),
        shadow_color: style.shadow_color(),
        shadow_offset: style.shadow_offset(),
        shadow_smoothing: style.shadow_smoothing(),
        shadow_clipped: style.shadow_clipped(),
        inner_shadow_color: style.inner_shadow_color(),
        inner_shadow_range: style.inner_shadow_range(),
    })
}

/// Resolve against the result of a font lookup.
///
/// `None` means the caller's registry had no font under the style's font
/// name; that is reported as [`Error::MissingAsset`] rather than resolved
/// against some default font.
pub fn resolve_with(font: Option<&FontMetrics>, style: &FontStyle) -> Result<ShaderParams> {
    let font = font.ok_or_else(|| Error::MissingAsset(style.font_name().to_string()))?;
    resolve(font, style)
}

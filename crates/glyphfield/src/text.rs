//! Text draw requests.
//!
//! A [`TextRequest`] is what a label or widget hands to the renderer: the
//! text, the style it is drawn with, and the box it was laid out into.
//! [`prepare`] turns it into a [`PreparedText`] with everything the draw
//! needs (display text after the all-caps transform, atlas-to-screen glyph
//! scale, and shader parameters). Layout and wrapping inside `bounds`
//! belong to the caller's text engine.

use std::borrow::Cow;

use crate::error::Result;
use crate::font::MsdfFont;
use crate::resolve::{resolve, ShaderParams};
use crate::style::FontStyle;
use crate::uniforms::MsdfUniforms;

/// Screen-space rectangle the text was laid out into.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextBounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl TextBounds {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }
}

/// One piece of text to draw.
#[derive(Clone, Copy, Debug)]
pub struct TextRequest<'a> {
    pub text: &'a str,
    pub style: &'a FontStyle,
    pub bounds: TextBounds,
}

impl<'a> TextRequest<'a> {
    pub fn new(text: &'a str, style: &'a FontStyle, bounds: TextBounds) -> Self {
        Self { text, style, bounds }
    }
}

/// A request resolved against its font, ready for layout and drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedText<'a> {
    /// Text as it should be laid out. Borrowed unless all-caps changed it.
    pub display_text: Cow<'a, str>,
    /// Multiplier from atlas glyph metrics to screen pixels.
    pub font_scale: f32,
    pub bounds: TextBounds,
    pub params: ShaderParams,
    /// Atlas page size, when the font file recorded it.
    pub atlas_size: Option<[u32; 2]>,
}

impl PreparedText<'_> {
    /// Uniform block for this draw. Falls back to `fallback_size` when the
    /// font did not record its atlas size (the caller knows its texture).
    pub fn uniforms(&self, fallback_size: [u32; 2]) -> MsdfUniforms {
        MsdfUniforms::new(&self.params, self.atlas_size.unwrap_or(fallback_size))
    }
}

/// Resolve a request against the font its style names.
///
/// The caller looks the font up (see [`StyleRegistry::font_for`](crate::StyleRegistry::font_for));
/// this does no lookup of its own. A font whose name differs from the
/// style's is still used as given, so callers can substitute a fallback
/// face; the mismatch is logged at `warn`.
pub fn prepare<'a>(request: &TextRequest<'a>, font: &MsdfFont) -> Result<PreparedText<'a>> {
    if font.name != request.style.font_name() {
        tracing::warn!(
            font = %font.name,
            style_font = request.style.font_name(),
            "preparing text with a font other than the one the style names"
        );
    }

    let params = resolve(&font.metrics, request.style)?;
    let display_text = if request.style.all_caps() {
        Cow::Owned(request.text.to_uppercase())
    } else {
        Cow::Borrowed(request.text)
    };

    Ok(PreparedText {
        display_text,
        font_scale: font.scale_for(request.style.size()),
        bounds: request.bounds,
        params,
        atlas_size: font.atlas_size,
    })
}

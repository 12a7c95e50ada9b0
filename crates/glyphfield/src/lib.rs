//! Styling and shader parameters for MSDF text.
//!
//! Multi-channel signed distance field (MSDF) atlases store, per texel, the
//! distance to the nearest glyph edge. Drawing them crisply at any size needs
//! three things combined: how the atlas was baked, how the text is styled,
//! and how large it is on screen. This crate does that combination.
//!
//! ```text
//! .fnt header ──► MsdfFont { FontMetrics }──┐
//!                                           ├──► resolve() ──► ShaderParams ──► MsdfUniforms ──► msdf_text.wgsl
//! style sheet ──► StyleRegistry ──► FontStyle ┘
//! ```
//!
//! # Key Types
//!
//! |-----------------------|-------------------------------------------------|
//! | Type                  | Purpose                                         |
//! |-----------------------|-------------------------------------------------|
//! | [`FontStyle`]         | Size, weight, color, shadows for a piece of text |
//! | [`FontMetrics`]       | Atlas glyph size and distance range             |
//! | [`MsdfFont`]          | Loaded font metadata (metrics, atlas, pages)    |
//! | [`ShaderParams`]      | Per-draw values derived by [`resolve()`]        |
//! | [`MsdfUniforms`]      | GPU layout of `ShaderParams`                    |
//! | [`StyleRegistry`]     | Named fonts and styles (the skin)               |
//! | [`TextRequest`]       | Text + style + bounds handed to a renderer      |
//! |-----------------------|-------------------------------------------------|
//!
//! # Example
//!
//! ```
//! use glyphfield::{resolve, FontMetrics, FontStyle, MsdfUniforms};
//!
//! let font = FontMetrics::new(42.0, 6.0)?;
//! let mut style = FontStyle::new("roboto")?;
//! style.set_size(84.0).set_weight(0.1);
//!
//! let params = resolve(&font, &style)?;
//! assert_eq!(params.distance_factor, 12.0);
//!
//! let uniforms = MsdfUniforms::new(&params, [512, 512]);
//! assert_eq!(uniforms.as_bytes().len(), 96);
//! # Ok::<(), glyphfield::Error>(())
//! ```

pub mod color;
pub mod error;
pub mod font;
pub mod registry;
pub mod resolve;
pub mod shader;
pub mod style;
pub mod text;
pub mod uniforms;

// Re-export primary types at crate root for convenience.
pub use color::Rgba;
pub use error::{Error, Result};
pub use font::{load_font, parse_font, FontLoadParams, FontMetrics, MsdfFont};
pub use registry::{FontSource, StyleRegistry, StyleSheet};
pub use resolve::{resolve, resolve_with, ShaderParams};
pub use shader::MSDF_TEXT_WGSL;
pub use style::FontStyle;
pub use text::{prepare, PreparedText, TextBounds, TextRequest};
pub use uniforms::MsdfUniforms;

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn public_types_are_thread_safe() {
        assert_send_sync::<FontStyle>();
        assert_send_sync::<FontMetrics>();
        assert_send_sync::<MsdfFont>();
        assert_send_sync::<ShaderParams>();
        assert_send_sync::<StyleRegistry>();
        assert_send_sync::<MsdfUniforms>();
    }

    #[test]
    fn resolve_concurrently_from_threads() {
        let font = FontMetrics::new(32.0, 4.0).unwrap();
        let style = FontStyle::new("roboto").unwrap();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (1..=4)
                .map(|i| {
                    let (font, style) = (&font, &style);
                    scope.spawn(move || {
                        let mut local = style.clone();
                        local.set_size(16.0 * i as f32);
                        resolve(font, &local).unwrap().distance_factor
                    })
                })
                .collect();
            let factors: Vec<f32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
            assert_eq!(factors, vec![2.0, 4.0, 6.0, 8.0]);
        });
    }
}

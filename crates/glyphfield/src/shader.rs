//! WGSL source for the MSDF text shader.
//!
//! Bind group 0 layout:
//!
//! | Binding | Resource                               |
//! |---------|----------------------------------------|
//! | 0       | [`MsdfUniforms`](crate::MsdfUniforms)  |
//! | 1       | atlas `texture_2d<f32>`                |
//! | 2       | filtering sampler                      |

/// Shader source, entry points [`VERTEX_ENTRY`] and [`FRAGMENT_ENTRY`].
pub const MSDF_TEXT_WGSL: &str = include_str!("../shaders/msdf_text.wgsl");

pub const VERTEX_ENTRY: &str = "vertex";
pub const FRAGMENT_ENTRY: &str = "fragment";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declares_entry_points() {
        assert!(MSDF_TEXT_WGSL.contains(&format!("fn {VERTEX_ENTRY}(")));
        assert!(MSDF_TEXT_WGSL.contains(&format!("fn {FRAGMENT_ENTRY}(")));
    }

    #[test]
    fn uniform_struct_matches_rust_field_order() {
        let fields = [
            "color:",
            "shadow_color:",
            "inner_shadow_color:",
            "shadow_offset:",
            "texture_size:",
            "distance_factor:",
            "font_weight:",
            "shadow_smoothing:",
            "inner_shadow_range:",
            "shadow_clipped:",
        ];
        let start = MSDF_TEXT_WGSL.find("struct MsdfUniforms").unwrap();
        let body = &MSDF_TEXT_WGSL[start..];
        let body = &body[..body.find('}').unwrap()];

        let mut last = 0;
        for field in fields {
            let pos = body
                .lines()
                .position(|line| line.trim_start().starts_with(field))
                .unwrap_or_else(|| panic!("{field} missing from WGSL uniforms"));
            assert!(pos >= last, "{field} out of order");
            last = pos;
        }
    }
}

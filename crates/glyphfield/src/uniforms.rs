//! GPU uniform layout for the MSDF text shader.
//!
//! [`MsdfUniforms`] mirrors the `MsdfUniforms` struct in
//! `shaders/msdf_text.wgsl` byte for byte. Field order is chosen so every
//! `vec4` lands on a 16-byte boundary and the total is a multiple of 16,
//! which keeps it valid under both WGSL uniform rules and std140.

use bytemuck::{Pod, Zeroable};
use serde::Serialize;

use crate::resolve::ShaderParams;

/// Uniform block consumed by `msdf_text.wgsl`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize)]
pub struct MsdfUniforms {
    pub color: [f32; 4],
    pub shadow_color: [f32; 4],
    pub inner_shadow_color: [f32; 4],
    /// Shadow offset in atlas texels.
    pub shadow_offset: [f32; 2],
    /// Atlas page size in texels, used to turn the shadow offset into UV space.
    pub texture_size: [f32; 2],
    pub distance_factor: f32,
    pub font_weight: f32,
    pub shadow_smoothing: f32,
    pub inner_shadow_range: f32,
    /// 1.0 when the shadow is suppressed under the glyph body, 0.0 otherwise.
    pub shadow_clipped: f32,
    /// Padding for alignment.
    #[serde(skip)]
    _padding: [f32; 3],
}

impl MsdfUniforms {
    /// Pack resolved parameters for an atlas page of `texture_size` texels.
    pub fn new(params: &ShaderParams, texture_size: [u32; 2]) -> Self {
        Self {
            color: params.color.to_array(),
            shadow_color: params.shadow_color.to_array(),
            inner_shadow_color: params.inner_shadow_color.to_array(),
            shadow_offset: params.shadow_offset,
            texture_size: [texture_size[0] as f32, texture_size[1] as f32],
            distance_factor: params.distance_factor,
            font_weight: params.weight,
            shadow_smoothing: params.shadow_smoothing,
            inner_shadow_range: params.inner_shadow_range,
            shadow_clipped: if params.shadow_clipped { 1.0 } else { 0.0 },
            _padding: [0.0; 3],
        }
    }

    /// Raw bytes for a uniform buffer write.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

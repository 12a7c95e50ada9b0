//! MSDF font assets and the BMFont `.fnt` header loader.
//!
//! Only the metadata the renderer needs is read from the `.fnt` file: the
//! glyph size the atlas was baked at, the distance range, line metrics, and
//! the atlas page size. Per-glyph `char`/`kerning` records belong to the
//! text layout collaborator and are skipped here.
//!
//! Supported header lines (AngelCode text format, as written by
//! msdf-bmfont-xml and similar generators):
//!
//! ```text
//! info face="Roboto" size=42 bold=0 italic=0 ...
//! common lineHeight=49 base=39 scaleW=512 scaleH=512 pages=1 packed=0 distanceRange=6
//! page id=0 file="roboto.png"
//! distanceField fieldType=msdf distanceRange=6
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::style::FontStyle;

/// Bake-time parameters of a distance-field atlas.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FontMetrics {
    /// Pixel size glyphs were rasterized at when the atlas was generated.
    pub glyph_size: f32,
    /// Width, in atlas pixels, of the distance gradient around each edge.
    pub distance_range: f32,
}

impl FontMetrics {
    /// Create metrics, rejecting values the resolver could not use.
    pub fn new(glyph_size: f32, distance_range: f32) -> Result<Self> {
        let metrics = Self { glyph_size, distance_range };
        metrics.validate()?;
        Ok(metrics)
    }

    /// Check both values are finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        if !(self.glyph_size.is_finite() && self.glyph_size > 0.0) {
            return Err(Error::InvalidAsset(format!(
                "glyph size must be positive, got {}",
                self.glyph_size
            )));
        }
        if !(self.distance_range.is_finite() && self.distance_range > 0.0) {
            return Err(Error::InvalidAsset(format!(
                "distance range must be positive, got {}",
                self.distance_range
            )));
        }
        Ok(())
    }
}

/// A loaded MSDF font: metrics plus the atlas facts the renderer consumes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MsdfFont {
    /// Registry name (usually the face name or the file stem).
    pub name: String,
    pub metrics: FontMetrics,
    /// Atlas page size in texels (`scaleW`, `scaleH`), when known.
    pub atlas_size: Option<[u32; 2]>,
    /// Distance between baselines, in atlas pixels.
    pub line_height: f32,
    /// Baseline offset from the top of a line, in atlas pixels.
    pub base: f32,
    /// Atlas page image files, indexed by page id.
    pub pages: Vec<String>,
    /// Field type from a `distanceField` line (`msdf`, `sdf`, `psdf`).
    pub field_type: Option<String>,
}

impl MsdfFont {
    /// A font known only by its metrics.
    pub fn from_metrics(name: impl Into<String>, metrics: FontMetrics) -> Self {
        Self {
            name: name.into(),
            metrics,
            atlas_size: None,
            line_height: metrics.glyph_size,
            base: metrics.glyph_size,
            pages: Vec::new(),
            field_type: None,
        }
    }

    /// Scale applied to atlas-space glyph quads to draw at `size` pixels.
    pub fn scale_for(&self, size: f32) -> f32 {
        size / self.metrics.glyph_size
    }
}

/// Overrides for values that may be missing from, or wrong in, a `.fnt` file.
///
/// Older generators do not write the distance range into the file, so it has
/// to be supplied here. There is no fallback value: a font with
/// neither a header value nor an override fails to load.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FontLoadParams {
    /// Overrides `info size`.
    pub glyph_size: Option<f32>,
    /// Overrides `common distanceRange` / `distanceField distanceRange`.
    pub distance_range: Option<f32>,
    /// Registry name; defaults to the `info face` value, then the file stem.
    pub name: Option<String>,
}

impl FontLoadParams {
    pub fn new(glyph_size: f32, distance_range: f32) -> Self {
        Self {
            glyph_size: Some(glyph_size),
            distance_range: Some(distance_range),
            name: None,
        }
    }
}

/// Load font metadata from a BMFont text file.
///
/// The registry name is `params.name`, else the `info face` value, else the
/// file stem.
pub fn load_font(path: impl AsRef<Path>, params: &FontLoadParams) -> Result<MsdfFont> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;

    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned());
    let font = build_font(parse_header(&source)?, params, stem)?;
    tracing::debug!(
        path = %path.display(),
        name = %font.name,
        glyph_size = font.metrics.glyph_size,
        distance_range = font.metrics.distance_range,
        "loaded MSDF font"
    );
    Ok(font)
}

/// Parse font metadata from the contents of a BMFont text file.
///
/// Without a name in `params` or an `info face`, the font is named `"default"`.
pub fn parse_font(source: &str, params: &FontLoadParams) -> Result<MsdfFont> {
    build_font(parse_header(source)?, params, None)
}

fn build_font(
    header: FntHeader,
    params: &FontLoadParams,
    fallback_name: Option<String>,
) -> Result<MsdfFont> {
    let glyph_size = params
        .glyph_size
        .or(header.size)
        .ok_or_else(|| Error::InvalidAsset("no glyph size in font file or load params".into()))?;
    let distance_range = params.distance_range.or(header.distance_range).ok_or_else(|| {
        Error::InvalidAsset("no distance range in font file or load params".into())
    })?;

    if let (Some(ours), Some(theirs)) = (params.distance_range, header.distance_range) {
        if ours != theirs {
            tracing::warn!(
                override_range = ours,
                file_range = theirs,
                "distance range override disagrees with font file"
            );
        }
    }

    let metrics = FontMetrics::new(glyph_size, distance_range)?;
    let name = params
        .name
        .clone()
        .or(header.face)
        .or(fallback_name)
        .unwrap_or_else(|| FontStyle::DEFAULT_FONT_NAME.to_string());

    let mut pages: Vec<(u32, String)> = header.pages.into_iter().collect();
    pages.sort_by_key(|(id, _)| *id);

    Ok(MsdfFont {
        name,
        metrics,
        atlas_size: header.atlas_size,
        line_height: header.line_height.unwrap_or(glyph_size),
        base: header.base.unwrap_or(glyph_size),
        pages: pages.into_iter().map(|(_, file)| file).collect(),
        field_type: header.field_type,
    })
}

// ============================================================================
// HEADER PARSING
// ============================================================================

#[derive(Default)]
struct FntHeader {
    face: Option<String>,
    size: Option<f32>,
    line_height: Option<f32>,
    base: Option<f32>,
    atlas_size: Option<[u32; 2]>,
    distance_range: Option<f32>,
    field_type: Option<String>,
    pages: HashMap<u32, String>,
}

fn parse_header(source: &str) -> Result<FntHeader> {
    let mut header = FntHeader::default();

    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let Some((tag, attrs)) = split_tag(raw) else {
            continue;
        };

        match tag {
            "info" => {
                let attrs = parse_attrs(attrs, line)?;
                header.face = attrs.get("face").cloned();
                // Hiero and some converters write negative sizes to mean "match char height".
                header.size = opt_number(&attrs, "size", line)?.map(f32::abs);
            }
            "common" => {
                let attrs = parse_attrs(attrs, line)?;
                header.line_height = opt_number(&attrs, "lineHeight", line)?;
                header.base = opt_number(&attrs, "base", line)?;
                let scale_w = opt_number::<u32>(&attrs, "scaleW", line)?;
                let scale_h = opt_number::<u32>(&attrs, "scaleH", line)?;
                header.atlas_size = scale_w.zip(scale_h).map(|(w, h)| [w, h]);
                if let Some(range) = opt_number(&attrs, "distanceRange", line)? {
                    header.distance_range = Some(range);
                }
            }
            "page" => {
                let attrs = parse_attrs(attrs, line)?;
                let id = opt_number::<u32>(&attrs, "id", line)?.ok_or_else(|| Error::FontParse {
                    line,
                    message: "page without id".into(),
                })?;
                let file = attrs.get("file").cloned().ok_or_else(|| Error::FontParse {
                    line,
                    message: "page without file".into(),
                })?;
                header.pages.insert(id, file);
            }
            "distanceField" => {
                let attrs = parse_attrs(attrs, line)?;
                header.field_type = attrs.get("fieldType").cloned();
                if let Some(range) = opt_number(&attrs, "distanceRange", line)? {
                    header.distance_range = Some(range);
                }
            }
            // Glyph and kerning records follow the header; nothing past here matters.
            "chars" | "char" | "kernings" | "kerning" => break,
            _ => {}
        }
    }

    Ok(header)
}

fn split_tag(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    Some(line.split_once(char::is_whitespace).unwrap_or((line, "")))
}

/// Parse `key=value key="quoted value"` pairs.
fn parse_attrs(attrs: &str, line: usize) -> Result<HashMap<String, String>> {
    let mut out = HashMap::new();
    let mut rest = attrs.trim_start();

    while !rest.is_empty() {
        let Some(eq) = rest.find('=') else {
            return Err(Error::FontParse {
                line,
                message: format!("expected key=value, found {rest:?}"),
            });
        };
        let key = rest[..eq].trim();
        if key.is_empty() || key.contains(char::is_whitespace) {
            return Err(Error::FontParse {
                line,
                message: format!("malformed attribute key {key:?}"),
            });
        }
        let after = &rest[eq + 1..];

        let (value, remainder) = if let Some(quoted) = after.strip_prefix('"') {
            let end = quoted.find('"').ok_or_else(|| Error::FontParse {
                line,
                message: format!("unterminated quote in {key}"),
            })?;
            (&quoted[..end], &quoted[end + 1..])
        } else {
            let end = after.find(char::is_whitespace).unwrap_or(after.len());
            (&after[..end], &after[end..])
        };

        out.insert(key.to_string(), value.to_string());
        rest = remainder.trim_start();
    }

    Ok(out)
}

fn opt_number<T: std::str::FromStr>(
    attrs: &HashMap<String, String>,
    key: &str,
    line: usize,
) -> Result<Option<T>> {
    attrs
        .get(key)
        .map(|value| {
            value.parse::<T>().map_err(|_| Error::FontParse {
                line,
                message: format!("{key}={value} is not a number"),
            })
        })
        .transpose()
}

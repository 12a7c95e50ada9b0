//! Named fonts and styles.
//!
//! The registry is the "skin": it owns loaded fonts and named styles and is
//! passed explicitly to whatever draws text. Nothing in the resolver reaches
//! into it; callers look up a font and a style here and hand both to
//! [`resolve`](crate::resolve()).
//!
//! Style sheets are RON files:
//!
//! ```ron
//! (
//!     fonts: {
//!         "roboto": (path: "font/roboto-42.fnt", distance_range: Some(6.0)),
//!     },
//!     styles: {
//!         "title": (font_name: "roboto", size: 48.0, weight: 0.2),
//!         "caption": (font_name: "roboto", size: 14.0, all_caps: true),
//!     },
//! )
//! ```
//!
//! Font paths are relative to the sheet's directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::font::{load_font, FontLoadParams, MsdfFont};
use crate::resolve::{resolve, ShaderParams};
use crate::style::FontStyle;

/// A font entry in a style sheet.
#[derive(Clone, Debug, Deserialize)]
pub struct FontSource {
    /// Path to the `.fnt` file.
    pub path: PathBuf,
    #[serde(default)]
    pub glyph_size: Option<f32>,
    #[serde(default)]
    pub distance_range: Option<f32>,
}

/// Deserialized style sheet, before fonts are loaded.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct StyleSheet {
    #[serde(default)]
    pub fonts: BTreeMap<String, FontSource>,
    #[serde(default)]
    pub styles: BTreeMap<String, FontStyle>,
}

impl StyleSheet {
    pub fn parse(source: &str) -> Result<Self> {
        Ok(ron::from_str(source)?)
    }
}

/// Registry of loaded fonts and named styles.
#[derive(Clone, Debug, Default)]
pub struct StyleRegistry {
    fonts: BTreeMap<String, MsdfFont>,
    styles: BTreeMap<String, FontStyle>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a style sheet file and every font it names.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let mut registry = Self::new();
        registry.load_sheet(path)?;
        Ok(registry)
    }

    /// Merge a style sheet file into this registry.
    pub fn load_sheet(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        self.add_sheet(StyleSheet::parse(&source)?, base_dir)?;
        tracing::info!(
            sheet = %path.display(),
            fonts = self.fonts.len(),
            styles = self.styles.len(),
            "loaded style sheet"
        );
        Ok(())
    }

    /// Merge an already-parsed sheet, resolving font paths against `base_dir`.
    ///
    /// Every style must name a font that is registered once the sheet's own
    /// fonts are loaded. On failure the registry is left unchanged.
    pub fn add_sheet(&mut self, sheet: StyleSheet, base_dir: &Path) -> Result<()> {
        let mut fonts = Vec::with_capacity(sheet.fonts.len());
        for (name, source) in sheet.fonts {
            let params = FontLoadParams {
                glyph_size: source.glyph_size,
                distance_range: source.distance_range,
                name: Some(name),
            };
            fonts.push(load_font(base_dir.join(&source.path), &params)?);
        }

        for (style_name, style) in &sheet.styles {
            let known = self.fonts.contains_key(style.font_name())
                || fonts.iter().any(|f| f.name == style.font_name());
            if !known {
                tracing::warn!(style = %style_name, font = style.font_name(), "style names unknown font");
                return Err(Error::MissingAsset(style.font_name().to_string()));
            }
        }

        for font in fonts {
            self.add_font(font);
        }
        for (name, style) in sheet.styles {
            self.add_style(name, style);
        }
        Ok(())
    }

    /// Register a font under its own name, replacing any previous one.
    pub fn add_font(&mut self, font: MsdfFont) -> &mut Self {
        if self.fonts.contains_key(&font.name) {
            tracing::debug!(font = %font.name, "replacing registered font");
        }
        self.fonts.insert(font.name.clone(), font);
        self
    }

    /// Register a style, replacing any previous one with the same name.
    pub fn add_style(&mut self, name: impl Into<String>, style: FontStyle) -> &mut Self {
        self.styles.insert(name.into(), style);
        self
    }

    pub fn font(&self, name: &str) -> Result<&MsdfFont> {
        self.fonts
            .get(name)
            .ok_or_else(|| Error::MissingAsset(name.to_string()))
    }

    pub fn style(&self, name: &str) -> Result<&FontStyle> {
        self.styles
            .get(name)
            .ok_or_else(|| Error::MissingStyle(name.to_string()))
    }

    /// The font a style renders with.
    pub fn font_for(&self, style: &FontStyle) -> Result<&MsdfFont> {
        self.font(style.font_name())
    }

    /// Look up the style's font and resolve shader parameters against it.
    pub fn resolve(&self, style: &FontStyle) -> Result<ShaderParams> {
        resolve(&self.font_for(style)?.metrics, style)
    }

    /// Resolve a registered style by name.
    pub fn resolve_named(&self, style_name: &str) -> Result<ShaderParams> {
        self.resolve(self.style(style_name)?)
    }

    pub fn font_names(&self) -> impl Iterator<Item = &str> {
        self.fonts.keys().map(String::as_str)
    }

    pub fn style_names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontMetrics;

    const ROBOTO_FNT: &str = "info face=\"Roboto\" size=42\ncommon lineHeight=49 base=39 scaleW=512 scaleH=512 pages=1 distanceRange=6\npage id=0 file=\"roboto.png\"\n";

    fn registry_with_roboto() -> StyleRegistry {
        let mut registry = StyleRegistry::new();
        registry.add_font(MsdfFont::from_metrics(
            "roboto",
            FontMetrics::new(42.0, 6.0).unwrap(),
        ));
        let mut title = FontStyle::new("roboto").unwrap();
        title.set_size(84.0).set_weight(0.1);
        registry.add_style("title", title);
        registry
    }

    #[test]
    fn test_lookup_failures() {
        let registry = registry_with_roboto();
        assert!(matches!(registry.font("nope"), Err(Error::MissingAsset(name)) if name == "nope"));
        assert!(matches!(registry.style("nope"), Err(Error::MissingStyle(name)) if name == "nope"));
    }

    #[test]
    fn test_resolve_named() {
        let registry = registry_with_roboto();
        let params = registry.resolve_named("title").unwrap();
        assert_eq!(params.distance_factor, 12.0);
        assert_eq!(params.weight, 0.1);
    }

    #[test]
    fn test_resolve_with_unknown_font_is_missing_asset() {
        let registry = registry_with_roboto();
        let style = FontStyle::new("comic").unwrap();
        assert!(matches!(registry.resolve(&style), Err(Error::MissingAsset(name)) if name == "comic"));
    }

    #[test]
    fn test_cloned_style_does_not_touch_registry() {
        let registry = registry_with_roboto();
        let mut local = registry.style("title").unwrap().clone();
        local.set_size(10.0);
        assert_eq!(registry.style("title").unwrap().size(), 84.0);
    }

    #[test]
    fn test_load_sheet_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("font")).unwrap();
        std::fs::write(dir.path().join("font/roboto.fnt"), ROBOTO_FNT).unwrap();
        let sheet = dir.path().join("skin.ron");
        std::fs::write(
            &sheet,
            r#"(
                fonts: {
                    "roboto": (path: "font/roboto.fnt"),
                },
                styles: {
                    "title": (font_name: "roboto", size: 84.0, weight: 0.1),
                    "caption": (font_name: "roboto", size: 21.0, all_caps: true,
                                shadow_color: (0.0, 0.0, 0.0, 0.5)),
                },
            )"#,
        )
        .unwrap();

        let registry = StyleRegistry::load(&sheet).unwrap();
        assert_eq!(registry.font_names().collect::<Vec<_>>(), vec!["roboto"]);
        assert_eq!(registry.style_names().collect::<Vec<_>>(), vec!["caption", "title"]);

        let font = registry.font("roboto").unwrap();
        assert_eq!(font.atlas_size, Some([512, 512]));

        let caption = registry.style("caption").unwrap();
        assert!(caption.all_caps());
        assert!(caption.is_shadow_enabled());
        assert_eq!(registry.resolve(caption).unwrap().distance_factor, 3.0);
        assert_eq!(registry.resolve_named("title").unwrap().distance_factor, 12.0);
    }

    #[test]
    fn test_sheet_with_unknown_font_is_rejected_atomically() {
        let mut registry = registry_with_roboto();
        let sheet = StyleSheet::parse(
            r#"(styles: {
                "body": (font_name: "roboto", size: 16.0),
                "fancy": (font_name: "script", size: 16.0),
            })"#,
        )
        .unwrap();

        let err = registry.add_sheet(sheet, Path::new(".")).unwrap_err();
        assert!(matches!(err, Error::MissingAsset(name) if name == "script"));
        assert!(registry.style("body").is_err());
    }

    #[test]
    fn test_sheet_styles_may_use_previously_registered_fonts() {
        let mut registry = registry_with_roboto();
        let sheet = StyleSheet::parse(r#"(styles: {"body": (font_name: "roboto", size: 21.0)})"#).unwrap();
        registry.add_sheet(sheet, Path::new(".")).unwrap();
        assert_eq!(registry.resolve_named("body").unwrap().distance_factor, 3.0);
    }

    #[test]
    fn test_sheet_parse_errors() {
        assert!(matches!(StyleSheet::parse("(styles: {"), Err(Error::StyleSheet(_))));
        assert!(StyleSheet::parse(r#"(styles: {"bad": (font_name: "")})"#).is_err());
    }
}

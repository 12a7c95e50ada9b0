//! glyphfield command-line tool.
//!
//! Usage:
//!   # Show the metrics the renderer will use for a font
//!   glyphfield inspect assets/font/roboto-42.fnt
//!
//!   # Older .fnt files without a distance range need it supplied
//!   glyphfield inspect roboto.fnt --distance-range 6
//!
//!   # Resolve a named style from a style sheet
//!   glyphfield resolve --sheet assets/skin.ron --style title
//!   glyphfield resolve --sheet assets/skin.ron --style title --size 96 --json
//!
//!   # List styles in a sheet
//!   glyphfield styles --sheet assets/skin.ron
//!
//! Logging goes to stderr; set `RUST_LOG=glyphfield=debug` for load details.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use glyphfield::{FontLoadParams, MsdfFont, MsdfUniforms, ShaderParams, StyleRegistry};

/// Inspect MSDF fonts and resolve text styles.
#[derive(Parser, Debug)]
#[command(name = "glyphfield")]
#[command(about = "Inspect MSDF fonts and resolve glyphfield style sheets")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the metadata read from a BMFont .fnt file
    Inspect {
        /// Path to the .fnt file
        font: PathBuf,

        /// Override the glyph size from the file
        #[arg(long)]
        glyph_size: Option<f32>,

        /// Override (or supply) the distance range
        #[arg(long)]
        distance_range: Option<f32>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Resolve shader parameters for a named style
    Resolve {
        /// RON style sheet
        #[arg(long)]
        sheet: PathBuf,

        /// Style name within the sheet
        #[arg(long)]
        style: String,

        /// Draw size in pixels, replacing the style's own size
        #[arg(long)]
        size: Option<f32>,

        /// Atlas size used when the font file does not record one
        #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"], default_values_t = [512, 512])]
        atlas_size: Vec<u32>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the styles defined in a style sheet
    Styles {
        /// RON style sheet
        #[arg(long)]
        sheet: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "glyphfield=info,warn".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let output = run(args.command)?;
    print!("{output}");
    Ok(())
}

fn run(command: Command) -> Result<String> {
    match command {
        Command::Inspect { font, glyph_size, distance_range, json } => {
            let params = FontLoadParams { glyph_size, distance_range, name: None };
            let loaded = glyphfield::load_font(&font, &params)
                .with_context(|| format!("loading font {}", font.display()))?;
            if json {
                Ok(to_json(&loaded)?)
            } else {
                format_font(&loaded)
            }
        }
        Command::Resolve { sheet, style, size, atlas_size, json } => {
            let registry = StyleRegistry::load(&sheet)
                .with_context(|| format!("loading style sheet {}", sheet.display()))?;

            let mut style_value = registry.style(&style)?.clone();
            if let Some(size) = size {
                style_value.set_size(size);
            }
            let font = registry.font_for(&style_value)?;
            let params = glyphfield::resolve(&font.metrics, &style_value)
                .with_context(|| format!("resolving style {style:?}"))?;
            let texture_size = font
                .atlas_size
                .unwrap_or([atlas_size[0], atlas_size[1]]);
            let uniforms = MsdfUniforms::new(&params, texture_size);

            if json {
                Ok(to_json(&ResolvedOutput {
                    style: &style,
                    font: &font.name,
                    size: style_value.size(),
                    params: &params,
                    uniforms: &uniforms,
                })?)
            } else {
                format_params(&style, font, style_value.size(), &params, &uniforms)
            }
        }
        Command::Styles { sheet } => {
            let registry = StyleRegistry::load(&sheet)
                .with_context(|| format!("loading style sheet {}", sheet.display()))?;
            let mut out = String::new();
            for name in registry.style_names() {
                let style = registry.style(name)?;
                writeln!(out, "{name}\t{}\t{}px", style.font_name(), style.size())?;
            }
            Ok(out)
        }
    }
}

#[derive(Serialize)]
struct ResolvedOutput<'a> {
    style: &'a str,
    font: &'a str,
    size: f32,
    params: &'a ShaderParams,
    uniforms: &'a MsdfUniforms,
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

fn format_font(font: &MsdfFont) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "font:            {}", font.name)?;
    writeln!(out, "glyph size:      {}", font.metrics.glyph_size)?;
    writeln!(out, "distance range:  {}", font.metrics.distance_range)?;
    writeln!(out, "line height:     {}", font.line_height)?;
    writeln!(out, "base:            {}", font.base)?;
    if let Some([w, h]) = font.atlas_size {
        writeln!(out, "atlas:           {w}x{h}")?;
    }
    if let Some(field_type) = &font.field_type {
        writeln!(out, "field type:      {field_type}")?;
    }
    for (id, page) in font.pages.iter().enumerate() {
        writeln!(out, "page {id}:          {page}")?;
    }
    Ok(out)
}

fn format_params(
    style: &str,
    font: &MsdfFont,
    size: f32,
    params: &ShaderParams,
    uniforms: &MsdfUniforms,
) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "style:              {style} ({} @ {size}px)", font.name)?;
    writeln!(out, "distance factor:    {}", params.distance_factor)?;
    writeln!(out, "weight:             {}", params.weight)?;
    writeln!(out, "color:              {:?}", params.color.to_array())?;
    if params.is_shadow_enabled() {
        writeln!(
            out,
            "shadow:             {:?} offset {:?} smoothing {}{}",
            params.shadow_color.to_array(),
            params.shadow_offset,
            params.shadow_smoothing,
            if params.shadow_clipped { " (clipped)" } else { "" }
        )?;
    } else {
        writeln!(out, "shadow:             off")?;
    }
    if params.is_inner_shadow_enabled() {
        writeln!(
            out,
            "inner shadow:       {:?} range {}",
            params.inner_shadow_color.to_array(),
            params.inner_shadow_range
        )?;
    } else {
        writeln!(out, "inner shadow:       off")?;
    }
    let [w, h] = uniforms.texture_size;
    writeln!(out, "texture size:       {w}x{h}")?;
    writeln!(out, "uniform block:      {} bytes", uniforms.as_bytes().len())?;
    Ok(out)
}

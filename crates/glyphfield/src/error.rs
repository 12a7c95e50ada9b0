//! Error types for styling, font loading, and parameter resolution.

use thiserror::Error;

/// Errors produced by glyphfield.
///
/// None of these are transient. Each one points at a caller or asset
/// configuration bug and is reported at the operation that caused it.
#[derive(Error, Debug)]
pub enum Error {
    /// A style mutation was given an unusable value (empty font name, absent color).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Font metrics are unusable for rendering (non-positive glyph size or range).
    #[error("invalid font asset: {0}")]
    InvalidAsset(String),

    /// No style registered under the requested name.
    #[error("style not found: {0:?}")]
    MissingStyle(String),

    /// No font registered under the requested name.
    #[error("font not found: {0:?}")]
    MissingAsset(String),

    /// Malformed line in a BMFont `.fnt` file.
    #[error("font file line {line}: {message}")]
    FontParse { line: usize, message: String },

    /// IO error reading a font or style sheet.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// RON parse error in a style sheet.
    #[error("style sheet parse error: {0}")]
    StyleSheet(#[from] ron::error::SpannedError),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

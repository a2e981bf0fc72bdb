//! Error types for each stage of the pipeline.
//!
//! Every error here is terminal for the render request that produced it;
//! nothing in the crate retries.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a raw `--fa` value into a code point.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Nothing left after stripping the quotes.
    #[error("icon code is empty")]
    Empty,

    /// The hex digits name a surrogate or a value past U+10FFFF.
    #[error("{0:#x} is not a valid Unicode scalar value")]
    InvalidCodePoint(u32),

    /// Neither escape syntax, a bare hex number, nor a single literal glyph.
    #[error("cannot interpret {0:?} as an icon code")]
    Malformed(String),
}

/// Failure to find a code point for an icon name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No rule selecting `.fa-{icon}` carries a `--fa` declaration.
    #[error("icon `{icon}` not found in stylesheet")]
    IconNotFound {
        /// Icon name as requested.
        icon: String,
    },

    /// Matching rules exist, but none of their `--fa` values decode.
    #[error("icon `{icon}` has an undecodable code {token}")]
    InvalidIconCode {
        /// Icon name as requested.
        icon: String,
        /// Raw declaration value of the first failing rule.
        token: String,
        /// Why decoding failed.
        #[source]
        source: DecodeError,
    },
}

/// Failure while measuring, drawing or encoding a glyph.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The glyph has no ink, so no scale maps it onto the canvas.
    #[error("glyph U+{:04X} has no ink extent to scale", u32::from(*.0))]
    DegenerateGlyph(char),

    /// The backend could not measure or draw the text.
    #[error("cannot measure glyph: {0}")]
    Measurement(String),

    /// The canvas could not be encoded.
    #[error("cannot encode PNG: {0}")]
    Encoding(#[from] image::ImageError),
}

/// Failure to obtain a usable font.
#[derive(Error, Debug)]
pub enum FontError {
    /// Reading the font file failed.
    #[error("cannot read font file {path}")]
    Io {
        /// Path of the font file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not a TrueType/OpenType font rusttype understands.
    #[error("font data for `{0}` could not be parsed")]
    Parse(String),
}

//! Sidecar description of a render.
//!
//! [`IconMetadata`] records what was drawn and how it was placed, so asset
//! pipelines can pick up the code point and transform without re-measuring.

#[cfg(feature = "serde-serialize")]
use serde::Serialize;

#[cfg(feature = "serde-deserialize")]
use serde::Deserialize;

use crate::fit::{Alignment, FitTransform, GlyphMetrics};
use crate::render::{RenderRequest, Rendered};

/// Description of one rendered icon, suitable for an asset manifest.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize))]
#[cfg_attr(feature = "serde-deserialize", derive(Deserialize))]
pub struct IconMetadata {
    /// Icon name the glyph was resolved from, e.g. `gear`.
    pub icon: String,
    /// Font family the glyph was drawn with.
    pub family: String,
    /// Code point of the glyph.
    pub code_point: char,
    /// Side length of the square image, in pixels.
    pub size: u32,
    /// Placement of the ink box in the image.
    pub alignment: Alignment,
    /// Ink box of the glyph at a font pixel height of `size`.
    pub metrics: GlyphMetrics,
    /// Transform the glyph was drawn with.
    pub transform: FitTransform,
}

impl IconMetadata {
    /// Collect the metadata of a finished render.
    pub fn new(icon: &str, family: &str, request: &RenderRequest, rendered: &Rendered) -> Self {
        Self {
            icon: icon.to_owned(),
            family: family.to_owned(),
            code_point: request.code_point(),
            size: request.size().get(),
            alignment: request.alignment(),
            metrics: rendered.metrics,
            transform: rendered.transform,
        }
    }
}

//! Fitting a glyph's ink box into a square canvas.
//!
//! Icon glyphs disagree wildly about how much of their advance box they
//! actually cover, so the fit works from the measured ink extents rather
//! than from font metrics: the larger ink dimension is scaled to the canvas
//! side exactly, and the smaller one is placed according to [`Alignment`].

use std::num::NonZeroU32;

use crate::error::RenderError;

/// Ink bounding box of a piece of text, relative to its drawing origin on
/// the baseline, in pixels. Y grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "serde-deserialize", derive(serde::Deserialize))]
pub struct GlyphMetrics {
    /// Distance the ink extends left of the origin. Negative when the ink
    /// starts to the right of it.
    pub left: f32,
    /// Distance the ink extends right of the origin.
    pub right: f32,
    /// Distance the ink extends above the baseline.
    pub ascent: f32,
    /// Distance the ink extends below the baseline.
    pub descent: f32,
}

impl GlyphMetrics {
    /// Horizontal ink extent.
    pub fn width(&self) -> f32 {
        self.left + self.right
    }

    /// Vertical ink extent.
    pub fn height(&self) -> f32 {
        self.ascent + self.descent
    }
}

/// Placement of the ink box along the axis that does not bind the scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "serde-deserialize", derive(serde::Deserialize))]
pub enum Alignment {
    /// Centered on both axes.
    #[default]
    Center,
    /// Flush with the top and left edges.
    TopLeft,
}

/// Uniform scale followed by a translation in canvas pixels.
///
/// A point `(x, y)` in the measured glyph space lands at
/// `(scale * x + translate_x, scale * y + translate_y)` on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "serde-deserialize", derive(serde::Deserialize))]
pub struct FitTransform {
    /// Uniform scale factor.
    pub scale: f32,
    /// Horizontal offset of the drawing origin on the canvas.
    pub translate_x: f32,
    /// Vertical offset of the drawing origin (the baseline) on the canvas.
    pub translate_y: f32,
}

impl FitTransform {
    /// Map a glyph space point onto the canvas.
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (self.scale * x + self.translate_x, self.scale * y + self.translate_y)
    }
}

/// Compute the transform that inscribes the ink box of `metrics` into a
/// `size` by `size` square.
///
/// Fails with [`RenderError::DegenerateGlyph`] when the glyph has no ink
/// extent, in which case no scale is defined. `code_point` only labels the
/// error.
pub fn fit(
    code_point: char,
    metrics: &GlyphMetrics,
    size: NonZeroU32,
    alignment: Alignment,
) -> Result<FitTransform, RenderError> {
    let size = size.get() as f32;
    let (width, height) = (metrics.width(), metrics.height());
    let extent = width.max(height);
    if !(extent.is_finite() && extent > 0.0) {
        return Err(RenderError::DegenerateGlyph(code_point));
    }

    let scale = size / extent;
    let (slack_x, slack_y) = match alignment {
        Alignment::Center => ((size - scale * width) / 2.0, (size - scale * height) / 2.0),
        Alignment::TopLeft => (0.0, 0.0),
    };

    Ok(FitTransform {
        scale,
        translate_x: slack_x + scale * metrics.left,
        translate_y: slack_y + scale * metrics.ascent,
    })
}

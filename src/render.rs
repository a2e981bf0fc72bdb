//! Measure, fit, draw, encode.

use std::num::NonZeroU32;

use log::debug;

use crate::error::RenderError;
use crate::fit::{fit, Alignment, FitTransform, GlyphMetrics};

/// Default side length of the output image, in pixels.
pub const DEFAULT_SIZE: u32 = 250;

/// Text measurement and drawing surface the render engine works against.
pub trait GlyphBackend {
    /// Ink bounding box of `text` at a font pixel height of `px`, relative
    /// to its drawing origin.
    fn measure(&self, text: &str, px: f32) -> Result<GlyphMetrics, RenderError>;

    /// Draw `text` at a font pixel height of `px`, with its origin mapped
    /// through `transform`.
    fn draw(&mut self, text: &str, px: f32, transform: &FitTransform) -> Result<(), RenderError>;

    /// Encode the current canvas contents as PNG.
    fn encode_png(&self) -> Result<Vec<u8>, RenderError>;
}

/// One glyph to render into a square image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderRequest {
    code_point: char,
    size: NonZeroU32,
    alignment: Alignment,
}

impl RenderRequest {
    /// Centered render of `code_point` into a `size` by `size` image.
    pub fn new(code_point: char, size: NonZeroU32) -> Self {
        Self {
            code_point,
            size,
            alignment: Alignment::default(),
        }
    }

    /// Same request with a different placement of the ink box.
    #[must_use]
    pub fn with_alignment(self, alignment: Alignment) -> Self {
        Self { alignment, ..self }
    }

    /// Glyph to render.
    pub fn code_point(&self) -> char {
        self.code_point
    }

    /// Side length of the output image.
    pub fn size(&self) -> NonZeroU32 {
        self.size
    }

    /// Placement of the ink box.
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }
}

/// Result of a successful render.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    /// Encoded PNG image.
    pub png: Vec<u8>,
    /// Ink box measured at the requested size.
    pub metrics: GlyphMetrics,
    /// Transform the glyph was drawn with.
    pub transform: FitTransform,
}

/// Render `request` with `backend`.
///
/// The glyph is measured once at a font pixel height equal to the image
/// size, fitted with [`fit`], drawn once and encoded.
pub fn render<B: GlyphBackend + ?Sized>(
    backend: &mut B,
    request: &RenderRequest,
) -> Result<Rendered, RenderError> {
    let text = request.code_point.to_string();
    let px = request.size.get() as f32;

    let metrics = backend.measure(&text, px)?;
    debug!("U+{:04X} ink box at {px}px: {metrics:?}", u32::from(request.code_point));

    let transform = fit(request.code_point, &metrics, request.size, request.alignment)?;
    debug!("fit transform: {transform:?}");

    backend.draw(&text, px, &transform)?;
    let png = backend.encode_png()?;

    Ok(Rendered {
        png,
        metrics,
        transform,
    })
}

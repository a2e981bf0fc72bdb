//! Font loading and the rusttype-backed canvas.
//!
//! A [`FontHandle`] is an explicit value: every canvas is created from one,
//! and nothing is registered process-wide.

use std::fmt;
use std::num::NonZeroU32;
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, Rgba, RgbaImage};
use log::debug;
use rusttype::{point, Font, Rect, Scale};

use crate::error::{FontError, RenderError};
use crate::fit::{FitTransform, GlyphMetrics};
use crate::render::GlyphBackend;

/// Family name icon fonts are labelled with unless told otherwise.
pub const DEFAULT_FAMILY: &str = "Font Awesome";

/// Fill color of rendered glyphs. Coverage goes into the alpha channel.
const FILL: Rgba<u8> = Rgba([0, 0, 0, 0xFF]);

/// A parsed font together with the family name it is known by.
pub struct FontHandle {
    family: String,
    font: Font<'static>,
}

impl FontHandle {
    /// Parse font data.
    pub fn from_bytes(data: Vec<u8>, family: impl Into<String>) -> Result<Self, FontError> {
        let family = family.into();
        let font = Font::try_from_vec(data).ok_or_else(|| FontError::Parse(family.clone()))?;
        debug!("loaded font `{family}` with {} glyphs", font.glyph_count());
        Ok(Self { family, font })
    }

    /// Read and parse a font file.
    pub fn load(path: impl AsRef<Path>, family: impl Into<String>) -> Result<Self, FontError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_bytes(data, family)
    }

    /// Family name this font was loaded under.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Whether the font maps `c` to a real glyph rather than `.notdef`.
    pub fn has_glyph(&self, c: char) -> bool {
        self.font.glyph(c).id().0 != 0
    }

    /// Fresh transparent `size` by `size` canvas drawing with this font.
    pub fn canvas(&self, size: NonZeroU32) -> GlyphCanvas<'_> {
        GlyphCanvas {
            font: self,
            image: RgbaImage::new(size.get(), size.get()),
        }
    }

    fn check_coverage(&self, text: &str) -> Result<(), RenderError> {
        match text.chars().find(|&c| !self.has_glyph(c)) {
            Some(c) => Err(RenderError::Measurement(format!(
                "font `{}` has no glyph for U+{:04X}",
                self.family,
                u32::from(c)
            ))),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontHandle")
            .field("family", &self.family)
            .field("glyphs", &self.font.glyph_count())
            .finish()
    }
}

/// Square RGBA raster that glyphs of one font are drawn onto.
pub struct GlyphCanvas<'a> {
    font: &'a FontHandle,
    image: RgbaImage,
}

impl GlyphCanvas<'_> {
    /// Pixels drawn so far.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

impl GlyphBackend for GlyphCanvas<'_> {
    fn measure(&self, text: &str, px: f32) -> Result<GlyphMetrics, RenderError> {
        self.font.check_coverage(text)?;

        let ink = self
            .font
            .font
            .layout(text, Scale::uniform(px), point(0.0, 0.0))
            .filter_map(|glyph| {
                let bb = glyph.unpositioned().exact_bounding_box()?;
                let origin = glyph.position();
                Some(Rect {
                    min: point(bb.min.x + origin.x, bb.min.y + origin.y),
                    max: point(bb.max.x + origin.x, bb.max.y + origin.y),
                })
            })
            .reduce(|a, b| Rect {
                min: point(a.min.x.min(b.min.x), a.min.y.min(b.min.y)),
                max: point(a.max.x.max(b.max.x), a.max.y.max(b.max.y)),
            });

        Ok(match ink {
            Some(ink) => GlyphMetrics {
                left: -ink.min.x,
                right: ink.max.x,
                ascent: -ink.min.y,
                descent: ink.max.y,
            },
            None => GlyphMetrics::default(),
        })
    }

    fn draw(&mut self, text: &str, px: f32, transform: &FitTransform) -> Result<(), RenderError> {
        self.font.check_coverage(text)?;

        let (width, height) = self.image.dimensions();
        let image = &mut self.image;
        let glyphs = self.font.font.layout(
            text,
            Scale::uniform(px * transform.scale),
            point(transform.translate_x, transform.translate_y),
        );

        for glyph in glyphs {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };

            glyph.draw(|x, y, coverage| {
                let x = u32::try_from(bb.min.x + x as i32);
                let y = u32::try_from(bb.min.y + y as i32);
                let (Ok(x), Ok(y)) = (x, y) else {
                    return;
                };
                if x >= width || y >= height {
                    return;
                }

                let alpha = (coverage.clamp(0.0, 1.0) * f32::from(FILL.0[3])).round() as u8;
                let pixel = image.get_pixel_mut(x, y);
                if alpha > pixel.0[3] {
                    *pixel = Rgba([FILL.0[0], FILL.0[1], FILL.0[2], alpha]);
                }
            });
        }

        Ok(())
    }

    fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        let (width, height) = self.image.dimensions();
        let mut png = Vec::new();
        PngEncoder::new(&mut png).write_image(
            self.image.as_raw(),
            width,
            height,
            ColorType::Rgba8,
        )?;
        Ok(png)
    }
}

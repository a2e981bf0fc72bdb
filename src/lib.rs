//! Render icon font glyphs into square raster images.
//!
//! Icon fonts such as Font Awesome publish the glyph of each icon through a
//! stylesheet class that sets a custom property, e.g.
//! `.fa-gear { --fa: "\f013"; }`. This crate resolves an icon name to its
//! code point through those declarations and rasterizes the glyph into a
//! PNG, scaled so that its ink fills the square on the binding axis and
//! centered on the other.
//!
//! # Usage
//! ```no_run
//! # fn test() -> Result<(), Box<dyn std::error::Error>> {
//! use std::num::NonZeroU32;
//! use icon_glyphs::{parse_stylesheet, render, resolve, FontHandle, RenderRequest};
//!
//! let css = std::fs::read_to_string("fontawesome.css")?;
//! let code_point = resolve(&parse_stylesheet(&css), "gear")?;
//!
//! let font = FontHandle::load("fa-solid-900.ttf", "Font Awesome")?;
//! let size = NonZeroU32::new(100).unwrap();
//! let mut canvas = font.canvas(size);
//! let rendered = render(&mut canvas, &RenderRequest::new(code_point, size))?;
//! std::fs::write("gear.png", rendered.png)?;
//! # Ok(())
//! # }
//! ```
//!
//! Rendering goes through the [`GlyphBackend`] trait, so the fitting logic
//! can be driven by any surface that measures and draws text.

#![cfg_attr(docs_rs, feature(doc_cfg))]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]

mod code;
mod error;
mod fit;
mod font;
mod meta;
mod render;
mod resolve;
mod stylesheet;

#[cfg(test)]
#[path = "../tests/support/fonts.rs"]
mod test_fonts;

pub use code::decode_icon_code;
pub use error::{DecodeError, FontError, RenderError, ResolveError};
pub use fit::{fit, Alignment, FitTransform, GlyphMetrics};
pub use font::{FontHandle, GlyphCanvas, DEFAULT_FAMILY};
pub use meta::IconMetadata;
pub use render::{render, GlyphBackend, RenderRequest, Rendered, DEFAULT_SIZE};
pub use resolve::{resolve, ICON_CLASS_PREFIX, ICON_CODE_PROPERTY};
pub use stylesheet::{parse_stylesheet, Declaration, StyleRule};

#[cfg(feature = "bin")]
mod cli;

#[cfg(feature = "bin")]
pub use cli::{render_icon, Args};

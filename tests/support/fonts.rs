//! TrueType font lookup shared by the unit and integration tests.
//!
//! `ICON_GLYPHS_TEST_FONT` names the font to use; if it is unset, a few
//! well-known system locations are tried. Tests that need a font return
//! early when none is found and say so on stderr. Setting the variable to a
//! path that is not a file fails the test instead.

use std::env;
use std::path::PathBuf;

pub const FONT_ENV: &str = "ICON_GLYPHS_TEST_FONT";

const CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// A TrueType font with Latin glyphs, if one is configured or installed.
pub fn system_font() -> Option<PathBuf> {
    if let Some(path) = env::var_os(FONT_ENV) {
        let path = PathBuf::from(path);
        assert!(path.is_file(), "{FONT_ENV}={} is not a file", path.display());
        return Some(path);
    }

    let found = CANDIDATES.iter().map(PathBuf::from).find(|p| p.is_file());
    if found.is_none() {
        eprintln!("skipping: no TrueType font found, set {FONT_ENV} to run this test");
    }
    found
}

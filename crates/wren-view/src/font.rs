//! Font metrics backed by fontdue for accurate text measurement.
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "CSS assumes that every font has font metrics that specify a
//! characteristic height above the baseline and a depth below it."

use fontdue::{Font, FontSettings};
use std::fs;
use wren_layout::FontMetrics;

/// Common system font paths to search for a default (regular) font.
const FONT_SEARCH_PATHS: &[&str] = &[
    // macOS
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/SFNS.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    // Windows
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

/// Font metrics implementation backed by fontdue's per-glyph metrics.
///
/// Queries fontdue for exact per-character advance widths, providing
/// accurate text measurement for layout. It uses `Font::metrics()` (not
/// `Font::rasterize()`) to avoid the cost of bitmap generation when only
/// measurements are needed.
pub struct SystemFontMetrics {
    font: Font,
}

impl SystemFontMetrics {
    /// Try to load a font from the common system font locations.
    ///
    /// Returns `None` when no usable font file is found; callers fall
    /// back to fixed-ratio approximate metrics in that case.
    #[must_use]
    pub fn load() -> Option<Self> {
        for path in FONT_SEARCH_PATHS {
            let Ok(bytes) = fs::read(path) else {
                continue;
            };
            if let Ok(font) = Font::from_bytes(bytes, FontSettings::default()) {
                return Some(Self { font });
            }
        }
        None
    }

    /// Wrap an already-loaded fontdue font.
    #[must_use]
    pub fn from_font(font: Font) -> Self {
        Self { font }
    }
}

impl FontMetrics for SystemFontMetrics {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        // Sum per-character advance widths, matching the cursor
        // advancement a glyph renderer would use.
        text.chars()
            .filter(|ch| !ch.is_control())
            .map(|ch| self.font.metrics(ch, font_size).advance_width)
            .sum()
    }

    fn line_height(&self, font_size: f32) -> f32 {
        // [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS2/visudet.html#leading)
        //
        // "We recommend a used value for 'normal' between 1.0 and 1.2."
        font_size * 1.2
    }
}

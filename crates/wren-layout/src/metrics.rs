//! Font metrics abstraction for text measurement during layout.
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "CSS assumes that every font has font metrics that specify a
//! characteristic height above the baseline and a depth below it."

/// Font metrics interface for text measurement during layout.
///
/// Implementors provide the actual per-glyph advance widths and line
/// height values needed for line flow. The layout pass calls these
/// methods to measure words for line breaking and placement; the view
/// crate supplies a real-font implementation, while tests and fontless
/// environments use [`ApproximateFontMetrics`].
pub trait FontMetrics {
    /// Measure the total advance width of a text string at the given font
    /// size.
    ///
    /// This should sum the advance width of each glyph in the string,
    /// matching the cursor advancement a renderer would use.
    fn text_width(&self, text: &str, font_size: f32) -> f32;

    /// Calculate the line height for a given font size.
    ///
    /// [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS2/visudet.html#leading)
    ///
    /// "The initial value of 'line-height' is 'normal'. We recommend a
    /// used value for 'normal' between 1.0 and 1.2."
    fn line_height(&self, font_size: f32) -> f32;
}

/// Approximate font metrics using fixed ratios.
///
/// Implementation note: without access to actual font data, we use fixed
/// ratio approximations. The average advance width of Latin glyphs in a
/// proportional font is approximately 0.6× the font size (typical for
/// Helvetica/Arial body text). Line height uses 1.2×, the upper end of
/// the spec's recommended range for `line-height: normal`.
///
/// Because the ratios are exact constants, layout under these metrics is
/// fully deterministic, which is what the test suite relies on.
pub struct ApproximateFontMetrics;

impl FontMetrics for ApproximateFontMetrics {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        const CHAR_WIDTH_RATIO: f32 = 0.6;
        let count = text.chars().count();
        count as f32 * font_size * CHAR_WIDTH_RATIO
    }

    fn line_height(&self, font_size: f32) -> f32 {
        const LINE_HEIGHT_RATIO: f32 = 1.2;
        font_size * LINE_HEIGHT_RATIO
    }
}

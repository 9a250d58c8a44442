//! Layout context: style and measurement state threaded through a pass.

use serde::Serialize;

use crate::color::ColorValue;

/// Transient style/layout state threaded through the build and layout
/// passes.
///
/// Not persisted: the view rebuilds it from its own configuration before
/// every pass, so two passes with equal contexts are guaranteed to
/// produce equal results.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutContext {
    /// Base text size in pixels.
    pub text_size: f32,
    /// Bold text.
    pub bold: bool,
    /// Italic text.
    pub italic: bool,
    /// Underlined text.
    pub underline: bool,
    /// Struck-through text.
    pub strike_through: bool,
    /// Foreground text color.
    pub text_fg_color: ColorValue,
    /// Background fill behind text runs, if any.
    pub text_bg_color: Option<ColorValue>,
    /// Left margin applied to the content, in pixels.
    pub left_margin: f32,
    /// Maximum line width for wrapping. Zero or negative means
    /// unconstrained (no wrapping).
    pub max_width: f32,
    /// Extra vertical space between lines, in pixels.
    pub vspace: f32,
    /// Extra horizontal space between inline fragments, in pixels.
    pub hspace: f32,
}

impl Default for LayoutContext {
    fn default() -> Self {
        Self {
            text_size: 14.0,
            bold: false,
            italic: false,
            underline: false,
            strike_through: false,
            text_fg_color: ColorValue::BLACK,
            text_bg_color: None,
            left_margin: 0.0,
            max_width: 0.0,
            vspace: 0.0,
            hspace: 0.0,
        }
    }
}

/// A snapshot of the text style in effect for one word, captured by the
/// layout pass and consumed by the draw pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStyle {
    /// Font size in pixels.
    pub size: f32,
    /// Bold.
    pub bold: bool,
    /// Italic.
    pub italic: bool,
    /// Underline decoration.
    pub underline: bool,
    /// Strike-through decoration.
    pub strike_through: bool,
    /// Foreground color.
    pub color: ColorValue,
    /// Background fill, if any.
    pub background: Option<ColorValue>,
}

impl TextStyle {
    /// The style a context implies before any markers apply.
    #[must_use]
    pub fn from_context(ctx: &LayoutContext) -> Self {
        Self {
            size: ctx.text_size,
            bold: ctx.bold,
            italic: ctx.italic,
            underline: ctx.underline,
            strike_through: ctx.strike_through,
            color: ctx.text_fg_color,
            background: ctx.text_bg_color,
        }
    }
}

//! Display list - a sequence of drawing commands.
//!
//! [CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html)
//!
//! The display list is the output of the draw pass. It contains the
//! drawing commands needed to render the box tree, in document order.
//! The renderer consuming it knows nothing about documents or layout;
//! it simply executes the commands. All types serialize, so a headless
//! caller can dump a frame as JSON for inspection or snapshotting.

use serde::Serialize;

use crate::color::ColorValue;

/// Blending mode for subsequent drawing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BlendMode {
    /// Source pixels overwrite the destination.
    Opaque,
    /// Source-over alpha blending.
    Alpha,
}

/// A single drawing command.
///
/// Commands are appended in document order (back to front).
#[derive(Debug, Clone, Serialize)]
pub enum DisplayCommand {
    /// Set the blending mode for all subsequent commands.
    SetBlendMode {
        /// The mode to switch to.
        mode: BlendMode,
    },

    /// Fill a rectangle with a solid color.
    ///
    /// Used for text background fills.
    FillRect {
        /// X coordinate of the rectangle's top-left corner.
        x: f32,
        /// Y coordinate of the rectangle's top-left corner.
        y: f32,
        /// Width of the rectangle in pixels.
        width: f32,
        /// Height of the rectangle in pixels.
        height: f32,
        /// Fill color.
        color: ColorValue,
    },

    /// Draw a run of text.
    DrawText {
        /// X coordinate of the text baseline origin.
        x: f32,
        /// Y coordinate of the text baseline origin.
        y: f32,
        /// The text content to draw.
        text: String,
        /// Font size in pixels.
        font_size: f32,
        /// Bold weight.
        bold: bool,
        /// Italic slant.
        italic: bool,
        /// Underline decoration.
        underline: bool,
        /// Strike-through decoration.
        strike_through: bool,
        /// Text color.
        color: ColorValue,
    },

    /// Draw an image (replaced element content) at a position.
    ///
    /// The `src` string is used as a key to look up the image data in the
    /// renderer's image store.
    DrawImage {
        /// X coordinate of the image's top-left corner.
        x: f32,
        /// Y coordinate of the image's top-left corner.
        y: f32,
        /// Rendered width of the image in pixels.
        width: f32,
        /// Rendered height of the image in pixels.
        height: f32,
        /// The `src` attribute value.
        src: String,
    },
}

/// An ordered sequence of drawing commands.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DisplayList {
    commands: Vec<DisplayCommand>,
}

impl DisplayList {
    /// Create an empty display list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command.
    pub fn push(&mut self, command: DisplayCommand) {
        self.commands.push(command);
    }

    /// The commands in draw order.
    #[must_use]
    pub fn commands(&self) -> &[DisplayCommand] {
        &self.commands
    }

    /// Number of commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the list holds no commands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

//! Inline-level items.
//!
//! [§ 9.2.2 Inline-level elements and inline boxes](https://www.w3.org/TR/CSS2/visuren.html#inline-boxes)
//!
//! An item is an inline-level leaf or marker placed inside a box: a single
//! word of text, an open/close style marker, a forced line break, or a
//! replaced image. Style markers are **flat sequential siblings**, not
//! paired nested nodes: the layout pass tracks an open-marker stack to
//! know which style is active for subsequent siblings until the matching
//! close marker.

use serde::Serialize;

use crate::color::ColorValue;
use crate::context::TextStyle;
use crate::geometry::Rect;
use wren_dom::NodeId;

/// An inline-level unit owned by exactly one box.
///
/// Holds a non-owning handle back to its originating document node, the
/// variant payload, and the rectangle assigned by the layout pass
/// (relative to the owning box's origin).
#[derive(Debug, Clone)]
pub struct InlineItem {
    /// Originating document node.
    pub node: NodeId,
    /// What this item is.
    pub kind: ItemKind,
    /// Position and size, assigned by layout. Markers get a zero-sized
    /// rect at the cursor position.
    pub rect: Rect,
}

impl InlineItem {
    /// Create an item with an unassigned rect.
    #[must_use]
    pub fn new(node: NodeId, kind: ItemKind) -> Self {
        Self {
            node,
            kind,
            rect: Rect::default(),
        }
    }
}

/// The closed set of inline item variants.
#[derive(Debug, Clone)]
pub enum ItemKind {
    /// One whitespace-delimited word of text. The style snapshot is
    /// `None` until the layout pass fills it in.
    Word {
        /// The word itself (no surrounding whitespace).
        text: String,
        /// Font/color snapshot captured at layout time.
        style: Option<TextStyle>,
    },
    /// Opens a style scope affecting following siblings.
    MarkerOpen(Marker),
    /// Closes the innermost open style scope.
    MarkerClose(Marker),
    /// `<br>`: finish the current line.
    LineBreak,
    /// `<img>`: a replaced element with fixed dimensions.
    Image {
        /// The `src` attribute value, resolved by the renderer.
        src: String,
        /// Display width in pixels.
        width: f32,
        /// Display height in pixels.
        height: f32,
    },
}

/// Style scope payloads carried by open/close markers.
#[derive(Debug, Clone, PartialEq)]
pub enum Marker {
    /// `<i>`/`<b>`/`<u>`/`<strike>`/`<strong>`/`<em>`.
    Format(FormatKind),
    /// `<a>`: link color and underline for the enclosed content.
    Anchor {
        /// The `href` attribute value, if present.
        href: Option<String>,
    },
    /// `<font>`: face/size/color overrides for the enclosed content.
    FontScope {
        /// The `face` attribute value, if present.
        face: Option<String>,
        /// Font size in pixels resolved from the legacy `size` attribute.
        size: Option<f32>,
        /// Parsed `color` attribute.
        color: Option<ColorValue>,
    },
}

/// Text format toggles.
///
/// `<strong>` maps to [`FormatKind::Bold`] and `<em>` to
/// [`FormatKind::Italic`] at box-tree build time, so the layout pass only
/// sees the four visual effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FormatKind {
    /// Italic slant.
    Italic,
    /// Bold weight.
    Bold,
    /// Underline decoration.
    Underline,
    /// Strike-through decoration.
    Strike,
}

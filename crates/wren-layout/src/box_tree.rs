//! Block-level layout boxes and the line-flow layout pass.
//!
//! [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
//!
//! "In an inline formatting context, boxes are laid out horizontally, one
//! after the other, beginning at the top of a containing block."
//!
//! A [`LayoutBox`] owns an ordered sequence of inline items and nested
//! boxes. Its layout pass flows that sequence into lines greedily: words
//! and images advance a cursor left to right and wrap at the maximum
//! width; nested boxes are measured recursively and placed in the flow
//! like oversized fragments; a box with the force-line-break flag always
//! starts a new line. Style markers do not occupy space — they push and
//! pop frames on an explicit style stack that determines the font/color
//! snapshot captured by each following word.

use crate::context::{LayoutContext, TextStyle};
use crate::display_list::{DisplayCommand, DisplayList};
use crate::geometry::Rect;
use crate::item::{FormatKind, InlineItem, ItemKind, Marker};
use crate::metrics::FontMetrics;

use crate::color::ColorValue;
use wren_dom::NodeId;

/// Baseline position as a fraction of line height.
///
/// Approximates typical font metrics where the ascender is ~80% of the
/// em square; the draw pass uses it to convert a line-relative top into
/// a baseline origin.
const BASELINE_RATIO: f32 = 0.8;

/// Indentation applied to list item content, in pixels.
///
/// [HTML § 15.3.7 Lists](https://html.spec.whatwg.org/multipage/rendering.html#lists)
/// suggests `padding-inline-start: 40px` for list containers; a smaller
/// fixed indent reads better at this engine's default text size.
const LIST_INDENT: f32 = 20.0;

/// Heading text scale factors, indexed by level - 1.
///
/// [HTML § 15.3.6 Sections and headings](https://html.spec.whatwg.org/multipage/rendering.html#sections-and-headings)
/// "h1 { font-size: 2.00em; } ... h6 { font-size: 0.67em; }"
const HEADING_SCALE: [f32; 6] = [2.0, 1.5, 1.17, 1.0, 0.83, 0.67];

/// What kind of block a [`LayoutBox`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxKind {
    /// A plain flow container (`<div>`, `<p>`, table parts, list items).
    Flow,
    /// A list container (`<ul>`/`<ol>`/`<dl>`): indents its child boxes.
    List,
    /// A heading (`<h1>`..`<h6>`): scales and emboldens its text.
    Heading(u8),
}

/// A child slot of a box: either a nested box or an inline item.
#[derive(Debug, Clone)]
pub enum BoxChild {
    /// A nested block-level box.
    Box(LayoutBox),
    /// An inline-level item.
    Item(InlineItem),
}

/// A block-level layout unit owning an ordered sequence of children.
///
/// Supports the measure/arrange split: [`LayoutBox::layout`] computes the
/// ideal rect (and positions children relative to this box's origin);
/// the parent then assigns the final rect with [`LayoutBox::set_rect`].
#[derive(Debug, Clone)]
pub struct LayoutBox {
    /// Originating document node (non-owning handle into the arena).
    pub node: NodeId,
    /// Block kind.
    pub kind: BoxKind,
    children: Vec<BoxChild>,
    force_line_break: bool,
    ideal_rect: Rect,
    rect: Rect,
}

impl LayoutBox {
    /// Create an empty flow box for a document node.
    #[must_use]
    pub fn new(node: NodeId) -> Self {
        Self::with_kind(node, BoxKind::Flow)
    }

    /// Create an empty box of the given kind.
    #[must_use]
    pub fn with_kind(node: NodeId, kind: BoxKind) -> Self {
        Self {
            node,
            kind,
            children: Vec::new(),
            force_line_break: false,
            ideal_rect: Rect::default(),
            rect: Rect::default(),
        }
    }

    /// Append an inline item.
    pub fn add_item(&mut self, item: InlineItem) {
        self.children.push(BoxChild::Item(item));
    }

    /// Append a nested box.
    pub fn add_box(&mut self, child: LayoutBox) {
        self.children.push(BoxChild::Box(child));
    }

    /// The children in document order.
    #[must_use]
    pub fn children(&self) -> &[BoxChild] {
        &self.children
    }

    /// Set whether this box always starts on a new line.
    pub fn set_force_line_break(&mut self, force: bool) {
        self.force_line_break = force;
    }

    /// Whether this box always starts on a new line.
    #[must_use]
    pub fn breaks_line(&self) -> bool {
        self.force_line_break
    }

    /// The ideal rect computed by the last layout pass.
    #[must_use]
    pub fn ideal_rect(&self) -> Rect {
        self.ideal_rect
    }

    /// The rect assigned by the parent (or the view, for the root).
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Assign the final rect. Children keep their layout-computed
    /// positions, which are relative to this box's origin.
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    /// The context this box lays its content out under: headings scale
    /// the text size and force bold.
    fn effective_context(&self, ctx: &LayoutContext) -> LayoutContext {
        match self.kind {
            BoxKind::Flow | BoxKind::List => ctx.clone(),
            BoxKind::Heading(level) => {
                let index = usize::from(level.clamp(1, 6)) - 1;
                let mut scaled = ctx.clone();
                scaled.text_size = ctx.text_size * HEADING_SCALE[index];
                scaled.bold = true;
                scaled
            }
        }
    }

    /// Lay out this box's content and compute its ideal rect.
    ///
    /// Idempotent: calling twice with the same context and unchanged
    /// children yields the same ideal rect, because all flow state is
    /// rebuilt from scratch on every call.
    pub fn layout(&mut self, ctx: &LayoutContext, metrics: &dyn FontMetrics) {
        let ctx = self.effective_context(ctx);
        let indent = ctx.left_margin;

        // Zero or negative max width means unconstrained: nothing wraps.
        let wrap_width = if ctx.max_width > 0.0 {
            (ctx.max_width - indent).max(1.0)
        } else {
            f32::INFINITY
        };

        let mut flow = LineFlow::new(wrap_width, ctx.vspace);
        let mut styles = StyleStack::new(&ctx);

        for child in &mut self.children {
            match child {
                BoxChild::Item(item) => {
                    Self::layout_item(item, &mut flow, &mut styles, &ctx, metrics);
                }
                BoxChild::Box(nested) => {
                    let mut child_ctx = ctx.clone();
                    // The indent is consumed at this level; list boxes
                    // hand their children a fresh one.
                    child_ctx.left_margin = if self.kind == BoxKind::List {
                        LIST_INDENT
                    } else {
                        0.0
                    };
                    child_ctx.max_width = wrap_width;
                    nested.layout(&child_ctx, metrics);

                    let size = nested.ideal_rect;
                    let placed =
                        flow.place(size.width, size.height, nested.force_line_break);
                    nested.set_rect(Rect::new(
                        indent + placed.x,
                        placed.y,
                        size.width,
                        size.height,
                    ));
                    if nested.force_line_break {
                        flow.break_line(0.0);
                    } else {
                        flow.set_gap(ctx.hspace);
                    }
                }
            }
        }

        flow.finish();
        self.ideal_rect = Rect::sized(indent + flow.widest, flow.total_height());
    }

    /// Lay out a single inline item at the flow cursor.
    fn layout_item(
        item: &mut InlineItem,
        flow: &mut LineFlow,
        styles: &mut StyleStack,
        ctx: &LayoutContext,
        metrics: &dyn FontMetrics,
    ) {
        let indent = ctx.left_margin;
        match &mut item.kind {
            ItemKind::Word { text, style } => {
                let current = styles.current();
                let width = metrics.text_width(text, current.size);
                let height = metrics.line_height(current.size);
                let placed = flow.place(width, height, false);
                item.rect = Rect::new(indent + placed.x, placed.y, width, height);
                // A space of the active size separates consecutive words.
                flow.set_gap(metrics.text_width(" ", current.size) + ctx.hspace);
                *style = Some(current);
            }
            ItemKind::MarkerOpen(marker) => {
                styles.push(marker);
                item.rect = Rect::new(indent + flow.cursor_x, flow.cursor_y, 0.0, 0.0);
            }
            ItemKind::MarkerClose(_) => {
                styles.pop();
                item.rect = Rect::new(indent + flow.cursor_x, flow.cursor_y, 0.0, 0.0);
            }
            ItemKind::LineBreak => {
                let height = metrics.line_height(styles.current().size);
                flow.break_line(height);
                item.rect = Rect::new(indent, flow.cursor_y, 0.0, 0.0);
            }
            ItemKind::Image { width, height, .. } => {
                let placed = flow.place(*width, *height, false);
                item.rect = Rect::new(indent + placed.x, placed.y, *width, *height);
                flow.set_gap(ctx.hspace);
            }
        }
    }

    /// Emit drawing commands for this subtree, in document order.
    ///
    /// `origin_x`/`origin_y` is the absolute position of the parent's
    /// origin; no layout state is mutated.
    pub fn call_draw(&self, list: &mut DisplayList, origin_x: f32, origin_y: f32) {
        let ox = origin_x + self.rect.x;
        let oy = origin_y + self.rect.y;
        for child in &self.children {
            match child {
                BoxChild::Box(nested) => nested.call_draw(list, ox, oy),
                BoxChild::Item(item) => draw_item(item, list, ox, oy),
            }
        }
    }
}

/// Emit the drawing commands for one inline item.
fn draw_item(item: &InlineItem, list: &mut DisplayList, ox: f32, oy: f32) {
    match &item.kind {
        ItemKind::Word {
            text,
            style: Some(style),
        } => {
            let rect = item.rect;
            if let Some(background) = style.background {
                list.push(DisplayCommand::FillRect {
                    x: ox + rect.x,
                    y: oy + rect.y,
                    width: rect.width,
                    height: rect.height,
                    color: background,
                });
            }
            list.push(DisplayCommand::DrawText {
                x: ox + rect.x,
                y: oy + rect.y + rect.height * BASELINE_RATIO,
                text: text.clone(),
                font_size: style.size,
                bold: style.bold,
                italic: style.italic,
                underline: style.underline,
                strike_through: style.strike_through,
                color: style.color,
            });
        }
        ItemKind::Image { src, .. } => {
            let rect = item.rect;
            list.push(DisplayCommand::DrawImage {
                x: ox + rect.x,
                y: oy + rect.y,
                width: rect.width,
                height: rect.height,
                src: src.clone(),
            });
        }
        // Words that never saw a layout pass, and zero-sized markers
        // and breaks, draw nothing.
        ItemKind::Word { style: None, .. }
        | ItemKind::MarkerOpen(_)
        | ItemKind::MarkerClose(_)
        | ItemKind::LineBreak => {}
    }
}

/// Greedy line flow state.
///
/// Tracks a cursor, the current line's height, and the widest line seen.
/// Gaps between fragments are "pending": they are only consumed when
/// another fragment lands on the same line, so lines never end in
/// trailing space.
struct LineFlow {
    max_width: f32,
    vspace: f32,
    cursor_x: f32,
    cursor_y: f32,
    line_height: f32,
    widest: f32,
    pending_gap: f32,
}

impl LineFlow {
    fn new(max_width: f32, vspace: f32) -> Self {
        Self {
            max_width,
            vspace,
            cursor_x: 0.0,
            cursor_y: 0.0,
            line_height: 0.0,
            widest: 0.0,
            pending_gap: 0.0,
        }
    }

    /// Place a fragment of the given size, wrapping if it does not fit.
    ///
    /// A fragment wider than the whole line is still placed at a line
    /// start (and overflows) rather than wrapping forever.
    fn place(&mut self, width: f32, height: f32, force_break: bool) -> Rect {
        if force_break {
            self.break_line(0.0);
        } else if self.cursor_x > 0.0 && self.cursor_x + self.pending_gap + width > self.max_width
        {
            self.break_line(0.0);
        }

        let gap = if self.cursor_x > 0.0 {
            self.pending_gap
        } else {
            0.0
        };
        let rect = Rect::new(self.cursor_x + gap, self.cursor_y, width, height);
        self.cursor_x += gap + width;
        self.line_height = self.line_height.max(height);
        self.widest = self.widest.max(self.cursor_x);
        self.pending_gap = 0.0;
        rect
    }

    /// Set the gap to insert before the next fragment on the same line.
    fn set_gap(&mut self, gap: f32) {
        self.pending_gap = gap;
    }

    /// Finish the current line and move the cursor to the next one.
    ///
    /// `min_height` keeps an empty line (e.g. `<br><br>`) from collapsing
    /// to zero height.
    fn break_line(&mut self, min_height: f32) {
        let height = self.line_height.max(min_height);
        if height > 0.0 {
            self.cursor_y += height + self.vspace;
        }
        self.cursor_x = 0.0;
        self.line_height = 0.0;
        self.pending_gap = 0.0;
    }

    /// Close out the final line without trailing inter-line spacing.
    fn finish(&mut self) {
        self.cursor_y += self.line_height;
        self.cursor_x = 0.0;
        self.line_height = 0.0;
    }

    fn total_height(&self) -> f32 {
        self.cursor_y
    }
}

/// Explicit style stack driven by open/close markers.
///
/// Open and close markers are flat sequential siblings, not nested
/// structure: each open pushes a frame derived from the current style,
/// each close pops one. Unmatched closes are ignored.
struct StyleStack {
    base: TextStyle,
    frames: Vec<TextStyle>,
}

impl StyleStack {
    fn new(ctx: &LayoutContext) -> Self {
        Self {
            base: TextStyle::from_context(ctx),
            frames: Vec::new(),
        }
    }

    /// The style in effect for the next word.
    fn current(&self) -> TextStyle {
        self.frames.last().unwrap_or(&self.base).clone()
    }

    /// Push the frame an open marker implies.
    fn push(&mut self, marker: &Marker) {
        let mut style = self.current();
        match marker {
            Marker::Format(FormatKind::Italic) => style.italic = true,
            Marker::Format(FormatKind::Bold) => style.bold = true,
            Marker::Format(FormatKind::Underline) => style.underline = true,
            Marker::Format(FormatKind::Strike) => style.strike_through = true,
            Marker::Anchor { .. } => {
                style.color = ColorValue::LINK;
                style.underline = true;
            }
            Marker::FontScope { size, color, .. } => {
                if let Some(size) = size {
                    style.size = *size;
                }
                if let Some(color) = color {
                    style.color = *color;
                }
            }
        }
        self.frames.push(style);
    }

    /// Pop the innermost frame; ignores an unmatched close.
    fn pop(&mut self) {
        let _ = self.frames.pop();
    }
}

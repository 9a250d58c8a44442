//! Document-to-box-tree transducer.
//!
//! Walks a parsed document and emits layout boxes and inline items
//! according to per-tag construction rules. The dispatch is data-driven:
//! [`classify`] maps every tag to a [`TagClass`], and the recursive walk
//! matches on the class, so adding a tag means adding one table row.
//!
//! The classification mirrors minimal HTML block/inline semantics without
//! any CSS cascade:
//!
//! - *block-context* tags create a new [`LayoutBox`] and recurse into it
//! - *inline-context* tags append open/close markers into the current box
//!   and recurse in place
//! - *structural skip* tags contribute nothing
//! - unrecognized named tags recurse in place, treating their children as
//!   body content (permissive fallback) — malformed input never aborts
//!   the walk

use wren_common::warning::warn_once;
use wren_dom::{Document, NodeId, NodeType, TagType};

use crate::box_tree::{BoxKind, LayoutBox};
use crate::color::ColorValue;
use crate::item::{FormatKind, InlineItem, ItemKind, Marker};

/// Display size for images whose dimensions are not given as attributes.
///
/// Without image decoding there is no intrinsic size to fall back on, so
/// undimensioned images get a fixed placeholder square.
const DEFAULT_IMAGE_SIZE: f32 = 32.0;

/// Pixel sizes for the legacy `<font size=1..7>` attribute.
///
/// [HTML § 15.3.6 Phrasing content](https://html.spec.whatwg.org/multipage/rendering.html#phrasing-content-3)
/// maps the legacy sizes onto x-small .. xxx-large.
const FONT_SIZE_PX: [f32; 7] = [10.0, 13.0, 16.0, 18.0, 24.0, 32.0, 48.0];

/// Construction class of a tag: how the walker handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClass {
    /// New flow box; recurse into it (`<div>`).
    Block,
    /// New flow box with a forced line break; recurse into it (`<p>`).
    Paragraph,
    /// New heading box carrying its level; recurse into it.
    Heading(u8),
    /// New list box; direct `<li>` children each get their own box.
    List,
    /// New table box; direct `<tr>` children get row boxes.
    Table,
    /// Open format marker, recurse in place, close format marker.
    Format(FormatKind),
    /// Open anchor marker, recurse in place, close anchor marker.
    Anchor,
    /// Open font-scope marker, recurse in place, close font marker.
    FontScope,
    /// Recurse in place without markers (`<span>`).
    Transparent,
    /// Append a line-break item; no recursion (`<br>`).
    LineBreak,
    /// Append an image item (`<img>`).
    Image,
    /// Contribute nothing (`<script>`, `<style>`).
    Skip,
    /// Any other named tag: recurse in place as if its children were
    /// body content.
    Fallback,
}

/// The per-tag construction table.
#[must_use]
pub fn classify(tag: TagType) -> TagClass {
    match tag {
        TagType::Div => TagClass::Block,
        TagType::P => TagClass::Paragraph,
        TagType::H1 | TagType::H2 | TagType::H3 | TagType::H4 | TagType::H5 | TagType::H6 => {
            TagClass::Heading(tag.heading_level().unwrap_or(1))
        }
        TagType::Ul | TagType::Ol | TagType::Dl => TagClass::List,
        TagType::Table => TagClass::Table,
        TagType::I | TagType::Em => TagClass::Format(FormatKind::Italic),
        TagType::B | TagType::Strong => TagClass::Format(FormatKind::Bold),
        TagType::U => TagClass::Format(FormatKind::Underline),
        TagType::Strike => TagClass::Format(FormatKind::Strike),
        TagType::A => TagClass::Anchor,
        TagType::Font => TagClass::FontScope,
        TagType::Span => TagClass::Transparent,
        TagType::Br => TagClass::LineBreak,
        TagType::Img => TagClass::Image,
        TagType::Script | TagType::Style => TagClass::Skip,
        // Structural tags out of position, table/list parts outside their
        // containers, and unknown names all take the permissive path.
        TagType::Html
        | TagType::Head
        | TagType::Title
        | TagType::Body
        | TagType::Tr
        | TagType::Td
        | TagType::Li
        | TagType::Other => TagClass::Fallback,
    }
}

/// Build the box tree for a document.
///
/// Locates the first `<html>` child of the root, then `<head>` (processed
/// only to discard `<title>`) and `<body>` (walked into the returned root
/// box). A document without `<html>`/`<body>` yields an empty box tree —
/// silently, not as an error.
#[must_use]
pub fn build_box_tree(doc: &Document) -> LayoutBox {
    let mut root = LayoutBox::new(doc.root());
    let builder = BoxTreeBuilder { doc };
    builder.parse_tree(doc.root(), &mut root);
    root
}

/// The recursive walk. Methods mirror the construction table: one per
/// structural position, dispatching over [`TagClass`] inside body content.
struct BoxTreeBuilder<'doc> {
    doc: &'doc Document,
}

impl BoxTreeBuilder<'_> {
    /// Document level: find the `<html>` element and descend.
    fn parse_tree(&self, node: NodeId, out: &mut LayoutBox) {
        for &child in self.doc.children(node) {
            if self.doc.tag_type(child) == Some(TagType::Html) {
                self.parse_html(child, out);
                return;
            }
        }
    }

    /// `<html>` level: `<head>` and `<body>` are the only children that
    /// matter.
    fn parse_html(&self, node: NodeId, out: &mut LayoutBox) {
        for &child in self.doc.children(node) {
            match self.doc.tag_type(child) {
                Some(TagType::Head) => self.parse_head(child),
                Some(TagType::Body) => self.parse_body(child, out),
                _ => {}
            }
        }
    }

    /// `<head>` level. `<title>` is recognized and explicitly discarded;
    /// nothing else in the head contributes to layout.
    fn parse_head(&self, node: NodeId) {
        for &child in self.doc.children(node) {
            if self.doc.tag_type(child) == Some(TagType::Title) {
                self.parse_title(child);
            }
        }
    }

    /// Title content never reaches the box tree.
    #[allow(clippy::unused_self, reason = "kept as an explicit dispatch target")]
    fn parse_title(&self, _node: NodeId) {}

    /// Body content: the main dispatch loop, applied recursively.
    fn parse_body(&self, node: NodeId, out: &mut LayoutBox) {
        for &child in self.doc.children(node) {
            let Some(element) = self.doc.as_element(child) else {
                match self.doc.get(child).map(|n| &n.node_type) {
                    Some(NodeType::Text(_)) => self.parse_text(child, out),
                    // Comment nodes and anything else: skip.
                    _ => {}
                }
                continue;
            };

            match classify(element.tag) {
                TagClass::Block => self.parse_block(child, out, BoxKind::Flow, false),
                TagClass::Paragraph => self.parse_block(child, out, BoxKind::Flow, true),
                TagClass::Heading(level) => {
                    self.parse_block(child, out, BoxKind::Heading(level), true);
                }
                TagClass::List => self.parse_list(child, out),
                TagClass::Table => self.parse_table(child, out),
                TagClass::Format(kind) => self.parse_format(child, out, kind),
                TagClass::Anchor => self.parse_anchor(child, out),
                TagClass::FontScope => self.parse_font(child, out),
                TagClass::Transparent => self.parse_body(child, out),
                TagClass::LineBreak => out.add_item(InlineItem::new(child, ItemKind::LineBreak)),
                TagClass::Image => self.parse_image(child, out),
                TagClass::Skip => {}
                TagClass::Fallback => {
                    warn_once(
                        "layout",
                        &format!("no construction rule for <{}>, recursing", element.name),
                    );
                    self.parse_body(child, out);
                }
            }
        }
    }

    /// Text node: tokenize into whitespace-delimited words, one item per
    /// word, preserving order. Each word becomes an independently
    /// placeable fragment, which is the granularity the line-flow pass
    /// wraps at.
    fn parse_text(&self, node: NodeId, out: &mut LayoutBox) {
        let Some(text) = self.doc.as_text(node) else {
            return;
        };
        for word in text.split_whitespace() {
            out.add_item(InlineItem::new(
                node,
                ItemKind::Word {
                    text: word.to_string(),
                    style: None,
                },
            ));
        }
    }

    /// Block-context tag: new box, recurse into it.
    fn parse_block(&self, node: NodeId, out: &mut LayoutBox, kind: BoxKind, breaks: bool) {
        let mut new_box = LayoutBox::with_kind(node, kind);
        new_box.set_force_line_break(breaks);
        self.parse_body(node, &mut new_box);
        out.add_box(new_box);
    }

    /// `<table>`: new box; only direct `<tr>` children are considered.
    fn parse_table(&self, node: NodeId, out: &mut LayoutBox) {
        let mut table_box = LayoutBox::new(node);
        for &child in self.doc.children(node) {
            if self.doc.tag_type(child) == Some(TagType::Tr) {
                self.parse_table_row(child, &mut table_box);
            }
        }
        out.add_box(table_box);
    }

    /// `<tr>`: new row box; each direct `<td>` child's content is parsed
    /// into the row box (cells are not boxes of their own).
    fn parse_table_row(&self, node: NodeId, out: &mut LayoutBox) {
        let mut row_box = LayoutBox::new(node);
        for &child in self.doc.children(node) {
            if self.doc.tag_type(child) == Some(TagType::Td) {
                self.parse_body(child, &mut row_box);
            }
        }
        out.add_box(row_box);
    }

    /// `<ul>`/`<ol>`/`<dl>`: new list box; each direct `<li>` child is
    /// wrapped in its own box and recursed into. Other children are
    /// ignored.
    fn parse_list(&self, node: NodeId, out: &mut LayoutBox) {
        let mut list_box = LayoutBox::with_kind(node, BoxKind::List);
        for &child in self.doc.children(node) {
            if self.doc.tag_type(child) == Some(TagType::Li) {
                let mut item_box = LayoutBox::new(child);
                item_box.set_force_line_break(true);
                self.parse_body(child, &mut item_box);
                list_box.add_box(item_box);
            }
        }
        out.add_box(list_box);
    }

    /// `<img>`: one image item; dimensions from `width`/`height`
    /// attributes, else a placeholder square.
    fn parse_image(&self, node: NodeId, out: &mut LayoutBox) {
        let Some(element) = self.doc.as_element(node) else {
            return;
        };
        let src = element.attr("src").unwrap_or_default().to_string();
        let width = attr_f32(element.attr("width")).unwrap_or(DEFAULT_IMAGE_SIZE);
        let height = attr_f32(element.attr("height")).unwrap_or(DEFAULT_IMAGE_SIZE);
        out.add_item(InlineItem::new(node, ItemKind::Image { src, width, height }));
    }

    /// Format tag: exactly one open marker before and one close marker
    /// after the recursed content, even if the content is empty.
    fn parse_format(&self, node: NodeId, out: &mut LayoutBox, kind: FormatKind) {
        out.add_item(InlineItem::new(node, ItemKind::MarkerOpen(Marker::Format(kind))));
        self.parse_body(node, out);
        out.add_item(InlineItem::new(node, ItemKind::MarkerClose(Marker::Format(kind))));
    }

    /// `<a>`: open/close anchor markers around in-place content.
    fn parse_anchor(&self, node: NodeId, out: &mut LayoutBox) {
        let href = self
            .doc
            .as_element(node)
            .and_then(|e| e.attr("href"))
            .map(str::to_string);
        out.add_item(InlineItem::new(
            node,
            ItemKind::MarkerOpen(Marker::Anchor { href: href.clone() }),
        ));
        self.parse_body(node, out);
        out.add_item(InlineItem::new(node, ItemKind::MarkerClose(Marker::Anchor { href })));
    }

    /// `<font>`: open/close font-scope markers around in-place content.
    fn parse_font(&self, node: NodeId, out: &mut LayoutBox) {
        let marker = self.font_marker(node);
        out.add_item(InlineItem::new(node, ItemKind::MarkerOpen(marker.clone())));
        self.parse_body(node, out);
        out.add_item(InlineItem::new(node, ItemKind::MarkerClose(marker)));
    }

    /// Resolve a `<font>` element's legacy attributes into a marker.
    fn font_marker(&self, node: NodeId) -> Marker {
        let element = self.doc.as_element(node);
        let face = element
            .and_then(|e| e.attr("face"))
            .map(str::to_string);
        let size = element.and_then(|e| e.attr("size")).and_then(legacy_font_size);
        let color = element
            .and_then(|e| e.attr("color"))
            .and_then(ColorValue::parse);
        Marker::FontScope { face, size, color }
    }
}

/// Parse a numeric attribute value (dimensions may carry a `px` suffix).
fn attr_f32(value: Option<&str>) -> Option<f32> {
    let value = value?.trim();
    let value = value.strip_suffix("px").unwrap_or(value).trim();
    let parsed: f32 = value.parse().ok()?;
    (parsed > 0.0).then_some(parsed)
}

/// [HTML § 15.3.6](https://html.spec.whatwg.org/multipage/rendering.html#phrasing-content-3)
///
/// Resolve the legacy `<font size=...>` attribute: absolute `1`..`7`,
/// or `+n`/`-n` relative to the default size 3.
fn legacy_font_size(value: &str) -> Option<f32> {
    let value = value.trim();
    let index: i32 = if let Some(rel) = value.strip_prefix('+') {
        3 + rel.parse::<i32>().ok()?
    } else if value.starts_with('-') {
        3 + value.parse::<i32>().ok()?
    } else {
        value.parse::<i32>().ok()?
    };
    let clamped = index.clamp(1, 7) as usize;
    Some(FONT_SIZE_PX[clamped - 1])
}

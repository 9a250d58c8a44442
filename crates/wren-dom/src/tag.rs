//! Closed tag-type enumeration.
//!
//! The layout engine handles a fixed HTML subset; every element carries one
//! of these variants so downstream dispatch is a `match` over a closed
//! enumeration instead of repeated string comparison. Unrecognized names
//! map to [`TagType::Other`] and are handled permissively.

use strum_macros::Display;

/// Tag types recognized by the layout engine.
///
/// [§ 3.2.5 Content models](https://html.spec.whatwg.org/multipage/dom.html#content-models)
///
/// The subset covers document structure, the flow-content containers the
/// box builder knows how to lay out, the phrasing-content formatting tags
/// it tracks as style markers, and the tags it must actively skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum TagType {
    /// `<html>` document element.
    Html,
    /// `<head>` metadata container.
    Head,
    /// `<title>` document title (discarded by the box builder).
    Title,
    /// `<body>` document body.
    Body,
    /// `<div>` generic flow container.
    Div,
    /// `<table>`
    Table,
    /// `<tr>` table row.
    Tr,
    /// `<td>` table cell.
    Td,
    /// `<img>` replaced element.
    Img,
    /// `<ul>` unordered list.
    Ul,
    /// `<ol>` ordered list.
    Ol,
    /// `<dl>` description list.
    Dl,
    /// `<li>` list item.
    Li,
    /// `<p>` paragraph.
    P,
    /// `<h1>` heading, level 1.
    H1,
    /// `<h2>` heading, level 2.
    H2,
    /// `<h3>` heading, level 3.
    H3,
    /// `<h4>` heading, level 4.
    H4,
    /// `<h5>` heading, level 5.
    H5,
    /// `<h6>` heading, level 6.
    H6,
    /// `<i>` italic.
    I,
    /// `<b>` bold.
    B,
    /// `<u>` underline.
    U,
    /// `<strike>` strike-through.
    Strike,
    /// `<strong>` strong emphasis (rendered bold).
    Strong,
    /// `<em>` emphasis (rendered italic).
    Em,
    /// `<br>` forced line break.
    Br,
    /// `<a>` anchor.
    A,
    /// `<span>` transparent inline container.
    Span,
    /// `<font>` legacy font scope.
    Font,
    /// `<script>` — content never reaches layout.
    Script,
    /// `<style>` — content never reaches layout.
    Style,
    /// Any other named tag; handled by the permissive fallback.
    Other,
}

impl TagType {
    /// Resolve a (lowercase) tag name to its type.
    ///
    /// Unknown names resolve to [`TagType::Other`]; the caller keeps the
    /// raw name alongside, so nothing is lost.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "html" => Self::Html,
            "head" => Self::Head,
            "title" => Self::Title,
            "body" => Self::Body,
            "div" => Self::Div,
            "table" => Self::Table,
            "tr" => Self::Tr,
            "td" => Self::Td,
            "img" => Self::Img,
            "ul" => Self::Ul,
            "ol" => Self::Ol,
            "dl" => Self::Dl,
            "li" => Self::Li,
            "p" => Self::P,
            "h1" => Self::H1,
            "h2" => Self::H2,
            "h3" => Self::H3,
            "h4" => Self::H4,
            "h5" => Self::H5,
            "h6" => Self::H6,
            "i" => Self::I,
            "b" => Self::B,
            "u" => Self::U,
            "strike" => Self::Strike,
            "strong" => Self::Strong,
            "em" => Self::Em,
            "br" => Self::Br,
            "a" => Self::A,
            "span" => Self::Span,
            "font" => Self::Font,
            "script" => Self::Script,
            "style" => Self::Style,
            _ => Self::Other,
        }
    }

    /// Heading level for `<h1>`..`<h6>`, `None` otherwise.
    #[must_use]
    pub fn heading_level(self) -> Option<u8> {
        match self {
            Self::H1 => Some(1),
            Self::H2 => Some(2),
            Self::H3 => Some(3),
            Self::H4 => Some(4),
            Self::H5 => Some(5),
            Self::H6 => Some(6),
            _ => None,
        }
    }
}

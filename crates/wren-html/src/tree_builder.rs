//! Tree construction: tokens to document tree.
//!
//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
//!
//! A single permissive insertion algorithm replaces the spec's 23 insertion
//! modes: good enough for the HTML subset the layout engine consumes, while
//! keeping the parts that change the resulting tree shape —
//! `html`/`head`/`body` scaffolding synthesis, implied end tags, void
//! elements, and raw-text capture. Errors never abort tree construction;
//! stray markup degrades with a warning.

use wren_common::warning::warn_once;
use wren_dom::{AttributesMap, Document, ElementData, NodeId, NodeType};

use crate::token::{Attribute, Token};

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements only have a start tag; end tags must not be specified."
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Start tags that close an open `<p>` element first.
///
/// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
/// "If the stack of open elements has a p element in button scope, then
/// close a p element."
const CLOSES_P: &[&str] = &[
    "p", "div", "table", "ul", "ol", "dl", "li", "h1", "h2", "h3", "h4", "h5", "h6",
];

/// Scope boundaries for closing an open `<p>`: an open paragraph below one
/// of these belongs to an enclosing construct and is left alone.
const P_SCOPE: &[&str] = &["body", "table", "td", "ul", "ol", "dl"];

/// Scope boundaries for closing an open `<li>`.
const LI_SCOPE: &[&str] = &["body", "table", "tr", "td", "ul", "ol", "dl"];

/// Scope boundaries for closing an open `<td>`.
const TD_SCOPE: &[&str] = &["body", "table", "tr"];

/// Scope boundaries for closing an open `<tr>`.
const TR_SCOPE: &[&str] = &["body", "table"];

/// Elements routed into `<head>` while no `<body>` has been started.
const HEAD_CONTENT: &[&str] = &["title", "meta", "link", "script", "style", "base"];

/// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
///
/// Builds a [`Document`] from a stream of tokens.
pub struct TreeBuilder {
    tokens: Vec<Token>,
    doc: Document,
    /// [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    stack: Vec<NodeId>,
    /// The `<html>` element, once created.
    html: Option<NodeId>,
    /// The `<head>` element, once created. Never on the stack: head-content
    /// elements are routed to it directly.
    head: Option<NodeId>,
    /// The `<body>` element, once created.
    body: Option<NodeId>,
    /// Pending character data, flushed into a text node at tag boundaries.
    text_buffer: String,
}

impl TreeBuilder {
    /// Create a tree builder over a token stream.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            doc: Document::new(),
            stack: Vec::new(),
            html: None,
            head: None,
            body: None,
            text_buffer: String::new(),
        }
    }

    /// Consume all tokens and return the finished document.
    #[must_use]
    pub fn run(mut self) -> Document {
        let tokens = std::mem::take(&mut self.tokens);
        for token in tokens {
            match token {
                Token::Character { data } => self.text_buffer.push(data),
                Token::Comment { data } => {
                    self.flush_text();
                    self.insert_comment(data);
                }
                Token::StartTag {
                    name,
                    self_closing,
                    attributes,
                } => {
                    self.flush_text();
                    self.start_tag(&name, attributes, self_closing);
                }
                Token::EndTag { name } => {
                    self.flush_text();
                    self.end_tag(&name);
                }
                Token::EndOfFile => self.flush_text(),
            }
        }
        self.doc
    }

    // =========================================================================
    // Scaffolding synthesis
    // =========================================================================

    /// "If the stack of open elements does not have an html element":
    /// create one, with the given attributes if a real tag supplied them.
    fn ensure_html(&mut self) -> NodeId {
        if let Some(html) = self.html {
            return html;
        }
        let id = self
            .doc
            .alloc(NodeType::Element(ElementData::new("html", AttributesMap::new())));
        self.doc.append_child(NodeId::ROOT, id);
        self.stack.push(id);
        self.html = Some(id);
        id
    }

    /// Get or create the `<head>` element.
    fn ensure_head(&mut self) -> NodeId {
        if let Some(head) = self.head {
            return head;
        }
        let html = self.ensure_html();
        let id = self
            .doc
            .alloc(NodeType::Element(ElementData::new("head", AttributesMap::new())));
        self.doc.append_child(html, id);
        self.head = Some(id);
        id
    }

    /// Get or create the `<body>` element. Creating it pops everything
    /// above `<html>` off the stack.
    fn ensure_body(&mut self) -> NodeId {
        if let Some(body) = self.body {
            return body;
        }
        let html = self.ensure_html();
        self.pop_to(html);
        let id = self
            .doc
            .alloc(NodeType::Element(ElementData::new("body", AttributesMap::new())));
        self.doc.append_child(html, id);
        self.stack.push(id);
        self.body = Some(id);
        id
    }

    // =========================================================================
    // Stack helpers
    // =========================================================================

    /// Truncate the stack so `id` is the topmost element.
    fn pop_to(&mut self, id: NodeId) {
        if let Some(i) = self.stack.iter().position(|&open| open == id) {
            self.stack.truncate(i + 1);
        }
    }

    /// Tag name of an open element.
    fn open_name(&self, id: NodeId) -> &str {
        self.doc.as_element(id).map_or("", |e| e.name.as_str())
    }

    /// [§ 13.2.6.3 Closing elements that have implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#closing-elements-that-have-implied-end-tags)
    ///
    /// Search the stack from the top for an open element named `name`,
    /// stopping at the given scope boundaries; if found, pop it and
    /// everything above it. Used for `<li>`/`<td>`/`<tr>`/`<p>` siblings
    /// without end tags.
    fn close_in_scope(&mut self, name: &str, boundaries: &[&str]) {
        let mut found = None;
        for (i, &id) in self.stack.iter().enumerate().rev() {
            let open = self.open_name(id);
            if open == name {
                found = Some(i);
                break;
            }
            if boundaries.contains(&open) {
                break;
            }
        }
        if let Some(i) = found {
            self.stack.truncate(i);
        }
    }

    /// Where flow content (elements, text) is inserted: the top of the
    /// stack, redirected to `<body>` whenever the top is `<html>` or the
    /// stack is empty.
    fn insertion_point(&mut self) -> NodeId {
        match self.stack.last() {
            Some(&id) if self.html != Some(id) => id,
            _ => self.ensure_body(),
        }
    }

    // =========================================================================
    // Token handling
    // =========================================================================

    /// Flush pending character data into a text node.
    ///
    /// "Any character tokens that are U+0009, U+000A, U+000C, U+000D, or
    /// U+0020 are ignored" outside body content — whitespace-only runs
    /// before the body exists are dropped instead of forcing scaffolding.
    fn flush_text(&mut self) {
        if self.text_buffer.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.text_buffer);
        let parent = match self.stack.last() {
            Some(&id) if self.html != Some(id) => id,
            _ => {
                if text.trim().is_empty() {
                    return;
                }
                self.ensure_body()
            }
        };
        let id = self.doc.alloc(NodeType::Text(text));
        self.doc.append_child(parent, id);
    }

    /// Insert a comment node at the current insertion point (comments
    /// before `<html>` attach to the document root).
    fn insert_comment(&mut self, data: String) {
        let parent = self.stack.last().copied().unwrap_or(NodeId::ROOT);
        let id = self.doc.alloc(NodeType::Comment(data));
        self.doc.append_child(parent, id);
    }

    /// Handle a start tag token.
    fn start_tag(&mut self, name: &str, attributes: Vec<Attribute>, self_closing: bool) {
        match name {
            "html" => {
                if self.html.is_none() {
                    let id = self
                        .doc
                        .alloc(NodeType::Element(ElementData::new("html", collect_attrs(attributes))));
                    self.doc.append_child(NodeId::ROOT, id);
                    self.stack.push(id);
                    self.html = Some(id);
                } else {
                    warn_once("html", "duplicate <html> tag ignored");
                }
            }
            "head" => {
                let _ = self.ensure_head();
            }
            "body" => {
                if self.body.is_none() {
                    let html = self.ensure_html();
                    self.pop_to(html);
                    let id = self
                        .doc
                        .alloc(NodeType::Element(ElementData::new("body", collect_attrs(attributes))));
                    self.doc.append_child(html, id);
                    self.stack.push(id);
                    self.body = Some(id);
                } else {
                    warn_once("html", "duplicate <body> tag ignored");
                }
            }
            _ if self.body.is_none()
                && HEAD_CONTENT.contains(&name)
                && self.stack.last().is_none_or(|&id| self.html == Some(id)) =>
            {
                let head = self.ensure_head();
                self.insert_element_under(head, name, attributes, self_closing);
            }
            _ => {
                if CLOSES_P.contains(&name) {
                    self.close_in_scope("p", P_SCOPE);
                }
                match name {
                    "li" => self.close_in_scope("li", LI_SCOPE),
                    "td" => self.close_in_scope("td", TD_SCOPE),
                    "tr" => self.close_in_scope("tr", TR_SCOPE),
                    _ => {}
                }
                let parent = self.insertion_point();
                self.insert_element_under(parent, name, attributes, self_closing);
            }
        }
    }

    /// Insert an element under `parent`, pushing it onto the stack unless
    /// it is a void element or was self-closing.
    fn insert_element_under(
        &mut self,
        parent: NodeId,
        name: &str,
        attributes: Vec<Attribute>,
        self_closing: bool,
    ) {
        let id = self
            .doc
            .alloc(NodeType::Element(ElementData::new(name, collect_attrs(attributes))));
        self.doc.append_child(parent, id);
        if !self_closing && !VOID_ELEMENTS.contains(&name) {
            self.stack.push(id);
        }
    }

    /// Handle an end tag token.
    fn end_tag(&mut self, name: &str) {
        match name {
            // `<head>` is never on the stack; its end tag is meaningless here.
            "head" => {}
            // [§ 13.2.6.4.7] "An end tag whose tag name is 'br': ...
            // act as described in the 'anything else' entry" — i.e. as a
            // start tag.
            "br" => {
                let parent = self.insertion_point();
                self.insert_element_under(parent, "br", Vec::new(), false);
            }
            _ if VOID_ELEMENTS.contains(&name) => {
                warn_once("html", &format!("end tag </{name}> for void element ignored"));
            }
            _ => {
                let found = self
                    .stack
                    .iter()
                    .rposition(|&id| self.open_name(id) == name);
                match found {
                    Some(i) => self.stack.truncate(i),
                    None => warn_once("html", &format!("unexpected </{name}> ignored")),
                }
            }
        }
    }
}

/// Convert the tokenizer's attribute list into the document's map form.
fn collect_attrs(attributes: Vec<Attribute>) -> AttributesMap {
    attributes
        .into_iter()
        .map(|attr| (attr.name, attr.value))
        .collect()
}

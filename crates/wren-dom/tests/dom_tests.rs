//! Tests for the arena document tree and tag resolution.

use wren_dom::{AttributesMap, Document, ElementData, NodeId, NodeType, TagType, dump_tree};

/// Helper to allocate an element node and return its id.
fn alloc_element(doc: &mut Document, tag: &str) -> NodeId {
    doc.alloc(NodeType::Element(ElementData::new(tag, AttributesMap::new())))
}

#[test]
fn new_document_has_only_the_root() {
    let doc = Document::new();
    assert_eq!(doc.len(), 1);
    assert_eq!(doc.root(), NodeId::ROOT);
    assert!(matches!(
        doc.get(NodeId::ROOT).map(|n| &n.node_type),
        Some(NodeType::Document)
    ));
}

#[test]
fn append_child_wires_sibling_links() {
    let mut doc = Document::new();
    let parent = alloc_element(&mut doc, "div");
    doc.append_child(NodeId::ROOT, parent);

    let first = alloc_element(&mut doc, "p");
    let second = alloc_element(&mut doc, "p");
    doc.append_child(parent, first);
    doc.append_child(parent, second);

    assert_eq!(doc.children(parent), &[first, second]);
    assert_eq!(doc.parent(first), Some(parent));
    assert_eq!(doc.next_sibling(first), Some(second));
    assert_eq!(doc.first_child(parent), Some(first));
    assert_eq!(doc.next_sibling(second), None);
}

#[test]
fn html_and_body_lookup() {
    let mut doc = Document::new();
    let html = alloc_element(&mut doc, "html");
    doc.append_child(NodeId::ROOT, html);
    let head = alloc_element(&mut doc, "head");
    doc.append_child(html, head);
    let body = alloc_element(&mut doc, "body");
    doc.append_child(html, body);

    assert_eq!(doc.html_element(), Some(html));
    assert_eq!(doc.body(), Some(body));
}

#[test]
fn body_lookup_without_html_is_none() {
    let mut doc = Document::new();
    let div = alloc_element(&mut doc, "div");
    doc.append_child(NodeId::ROOT, div);

    assert_eq!(doc.html_element(), None);
    assert_eq!(doc.body(), None);
}

#[test]
fn as_element_and_as_text() {
    let mut doc = Document::new();
    let div = alloc_element(&mut doc, "div");
    doc.append_child(NodeId::ROOT, div);
    let text = doc.alloc(NodeType::Text("hello".to_string()));
    doc.append_child(div, text);

    assert_eq!(doc.as_element(div).map(|e| e.tag), Some(TagType::Div));
    assert_eq!(doc.as_text(text), Some("hello"));
    assert!(doc.as_element(text).is_none());
    assert!(doc.as_text(div).is_none());
}

#[test]
fn element_data_resolves_tag_and_lowercases_name() {
    let data = ElementData::new("DiV", AttributesMap::new());
    assert_eq!(data.tag, TagType::Div);
    assert_eq!(data.name, "div");

    let unknown = ElementData::new("CUSTOM-TAG", AttributesMap::new());
    assert_eq!(unknown.tag, TagType::Other);
    assert_eq!(unknown.name, "custom-tag");
}

#[test]
fn attr_lookup() {
    let mut attrs = AttributesMap::new();
    assert!(attrs.insert("href".to_string(), "/x".to_string()).is_none());
    let data = ElementData::new("a", attrs);
    assert_eq!(data.attr("href"), Some("/x"));
    assert_eq!(data.attr("id"), None);
}

#[test]
fn tag_type_from_name_covers_the_subset() {
    assert_eq!(TagType::from_name("table"), TagType::Table);
    assert_eq!(TagType::from_name("strike"), TagType::Strike);
    assert_eq!(TagType::from_name("h3"), TagType::H3);
    assert_eq!(TagType::from_name("marquee"), TagType::Other);
}

#[test]
fn heading_levels() {
    assert_eq!(TagType::H1.heading_level(), Some(1));
    assert_eq!(TagType::H6.heading_level(), Some(6));
    assert_eq!(TagType::P.heading_level(), None);
}

#[test]
fn tag_type_displays_lowercase() {
    assert_eq!(TagType::Div.to_string(), "div");
    assert_eq!(TagType::H2.to_string(), "h2");
}

#[test]
fn source_url_roundtrip() {
    let mut doc = Document::new();
    assert_eq!(doc.source_url(), None);
    doc.set_source_url("http://x.com/a".to_string());
    assert_eq!(doc.source_url(), Some("http://x.com/a"));
}

#[test]
fn dump_tree_renders_structure() {
    let mut doc = Document::new();
    let div = alloc_element(&mut doc, "div");
    doc.append_child(NodeId::ROOT, div);
    let text = doc.alloc(NodeType::Text("hi".to_string()));
    doc.append_child(div, text);

    let dump = dump_tree(&doc, doc.root(), 0);
    assert!(dump.contains("#document"));
    assert!(dump.contains("<div>"));
    assert!(dump.contains("#text \"hi\""));
}

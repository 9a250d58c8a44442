//! Tests for tree construction: scaffolding synthesis, implied end tags,
//! void elements, and raw-text capture.

use wren_dom::{Document, NodeId, NodeType, TagType};
use wren_html::{ParseError, parse_document};

/// Helper: children of `node` that are elements of the given tag.
fn child_elements(doc: &Document, node: NodeId, tag: TagType) -> Vec<NodeId> {
    doc.children(node)
        .iter()
        .copied()
        .filter(|&id| doc.tag_type(id) == Some(tag))
        .collect()
}

/// Helper: concatenated text content of a node's direct text children.
fn direct_text(doc: &Document, node: NodeId) -> String {
    doc.children(node)
        .iter()
        .filter_map(|&id| doc.as_text(id))
        .collect()
}

#[test]
fn full_document_parses_to_expected_shape() {
    let doc = parse_document(
        "<html><head><title>T</title></head><body><p>hello</p></body></html>",
    )
    .unwrap();

    let html = doc.html_element().expect("html element");
    let body = doc.body().expect("body element");
    let heads = child_elements(&doc, html, TagType::Head);
    assert_eq!(heads.len(), 1);

    let titles = child_elements(&doc, heads[0], TagType::Title);
    assert_eq!(titles.len(), 1);
    assert_eq!(direct_text(&doc, titles[0]), "T");

    let paragraphs = child_elements(&doc, body, TagType::P);
    assert_eq!(paragraphs.len(), 1);
    assert_eq!(direct_text(&doc, paragraphs[0]), "hello");
}

#[test]
fn bare_text_gets_scaffolding() {
    let doc = parse_document("hello world").unwrap();
    let body = doc.body().expect("body should be synthesized");
    assert_eq!(direct_text(&doc, body), "hello world");
}

#[test]
fn bare_paragraph_gets_scaffolding() {
    let doc = parse_document("<p>x</p>").unwrap();
    let body = doc.body().expect("body should be synthesized");
    assert_eq!(child_elements(&doc, body, TagType::P).len(), 1);
}

#[test]
fn title_is_routed_into_head() {
    let doc = parse_document("<title>T</title><p>x</p>").unwrap();
    let html = doc.html_element().unwrap();
    let heads = child_elements(&doc, html, TagType::Head);
    assert_eq!(heads.len(), 1);
    assert_eq!(child_elements(&doc, heads[0], TagType::Title).len(), 1);

    // The paragraph still lands in body.
    let body = doc.body().unwrap();
    assert_eq!(child_elements(&doc, body, TagType::P).len(), 1);
}

#[test]
fn implied_end_tags_for_list_items() {
    let doc = parse_document("<ul><li>a<li>b<li>c</ul>").unwrap();
    let body = doc.body().unwrap();
    let lists = child_elements(&doc, body, TagType::Ul);
    assert_eq!(lists.len(), 1);

    let items = child_elements(&doc, lists[0], TagType::Li);
    assert_eq!(items.len(), 3);
    assert_eq!(direct_text(&doc, items[0]), "a");
    assert_eq!(direct_text(&doc, items[2]), "c");
}

#[test]
fn nested_list_keeps_inner_items() {
    let doc = parse_document("<ul><li>a<ul><li>inner</ul></ul>").unwrap();
    let body = doc.body().unwrap();
    let outer = child_elements(&doc, body, TagType::Ul)[0];
    let outer_items = child_elements(&doc, outer, TagType::Li);
    assert_eq!(outer_items.len(), 1);

    let inner = child_elements(&doc, outer_items[0], TagType::Ul);
    assert_eq!(inner.len(), 1);
    assert_eq!(child_elements(&doc, inner[0], TagType::Li).len(), 1);
}

#[test]
fn implied_end_tags_for_paragraphs() {
    let doc = parse_document("<p>one<p>two").unwrap();
    let body = doc.body().unwrap();
    let paragraphs = child_elements(&doc, body, TagType::P);
    assert_eq!(paragraphs.len(), 2);
    assert_eq!(direct_text(&doc, paragraphs[1]), "two");
}

#[test]
fn div_closes_open_paragraph() {
    let doc = parse_document("<p>one<div>two</div>").unwrap();
    let body = doc.body().unwrap();
    // The div is a sibling of the p, not its child.
    assert_eq!(child_elements(&doc, body, TagType::P).len(), 1);
    assert_eq!(child_elements(&doc, body, TagType::Div).len(), 1);
}

#[test]
fn table_cells_with_implied_ends() {
    let doc = parse_document("<table><tr><td>a<td>b<tr><td>c</table>").unwrap();
    let body = doc.body().unwrap();
    let table = child_elements(&doc, body, TagType::Table)[0];
    let rows = child_elements(&doc, table, TagType::Tr);
    assert_eq!(rows.len(), 2);
    assert_eq!(child_elements(&doc, rows[0], TagType::Td).len(), 2);
    assert_eq!(child_elements(&doc, rows[1], TagType::Td).len(), 1);
}

#[test]
fn void_elements_take_no_children() {
    let doc = parse_document("<p>a<br>b</p>").unwrap();
    let body = doc.body().unwrap();
    let paragraph = child_elements(&doc, body, TagType::P)[0];
    let breaks = child_elements(&doc, paragraph, TagType::Br);
    assert_eq!(breaks.len(), 1);
    assert!(doc.children(breaks[0]).is_empty());
    // Both text runs are direct children of the paragraph.
    assert_eq!(direct_text(&doc, paragraph), "ab");
}

#[test]
fn script_text_is_captured_not_parsed() {
    let doc = parse_document("<body><script>var x = \"<p>\";</script></body>").unwrap();
    let body = doc.body().unwrap();
    let scripts = child_elements(&doc, body, TagType::Script);
    assert_eq!(scripts.len(), 1);
    assert_eq!(direct_text(&doc, scripts[0]), "var x = \"<p>\";");
    // No stray <p> element was created from the string literal.
    assert!(child_elements(&doc, body, TagType::P).is_empty());
}

#[test]
fn comments_become_comment_nodes() {
    let doc = parse_document("<body>a<!-- note -->b</body>").unwrap();
    let body = doc.body().unwrap();
    let comments: Vec<_> = doc
        .children(body)
        .iter()
        .filter(|&&id| {
            matches!(
                doc.get(id).map(|n| &n.node_type),
                Some(NodeType::Comment(_))
            )
        })
        .collect();
    assert_eq!(comments.len(), 1);
}

#[test]
fn unknown_tags_are_kept_as_elements() {
    let doc = parse_document("<body><widget>x</widget></body>").unwrap();
    let body = doc.body().unwrap();
    let unknown = child_elements(&doc, body, TagType::Other);
    assert_eq!(unknown.len(), 1);
    assert_eq!(doc.as_element(unknown[0]).unwrap().name, "widget");
    assert_eq!(direct_text(&doc, unknown[0]), "x");
}

#[test]
fn stray_end_tags_are_ignored() {
    let doc = parse_document("<body>a</span>b</body>").unwrap();
    let body = doc.body().unwrap();
    assert_eq!(direct_text(&doc, body), "ab");
}

#[test]
fn attributes_reach_the_document() {
    let doc = parse_document(r#"<body><a href="/x">link</a></body>"#).unwrap();
    let body = doc.body().unwrap();
    let anchor = child_elements(&doc, body, TagType::A)[0];
    assert_eq!(doc.as_element(anchor).unwrap().attr("href"), Some("/x"));
}

#[test]
fn empty_input_is_a_parse_error() {
    assert!(matches!(parse_document(""), Err(ParseError::EmptyDocument)));
    assert!(matches!(
        parse_document("   \n\t "),
        Err(ParseError::EmptyDocument)
    ));
}

#[test]
fn unterminated_tag_is_a_parse_error() {
    assert!(matches!(
        parse_document("<div class="),
        Err(ParseError::UnexpectedEof { .. })
    ));
}

#[test]
fn comment_only_document_has_no_body() {
    let doc = parse_document("<!-- just a comment -->").unwrap();
    assert_eq!(doc.html_element(), None);
    assert_eq!(doc.body(), None);
}

//! Tests for box-tree construction: the per-tag dispatch rules.

use quickcheck_macros::quickcheck;
use wren_dom::TagType;
use wren_html::parse_document;
use wren_layout::{
    BoxChild, BoxKind, FormatKind, ItemKind, LayoutBox, Marker, TagClass, build_box_tree, classify,
};

/// Helper: parse markup and build its box tree.
fn build(html: &str) -> LayoutBox {
    let doc = parse_document(html).expect("markup should parse");
    build_box_tree(&doc)
}

/// Helper: the direct word texts of a box, in order.
fn words(layout_box: &LayoutBox) -> Vec<String> {
    layout_box
        .children()
        .iter()
        .filter_map(|child| match child {
            BoxChild::Item(item) => match &item.kind {
                ItemKind::Word { text, .. } => Some(text.clone()),
                _ => None,
            },
            BoxChild::Box(_) => None,
        })
        .collect()
}

/// Helper: the direct nested boxes of a box.
fn child_boxes(layout_box: &LayoutBox) -> Vec<&LayoutBox> {
    layout_box
        .children()
        .iter()
        .filter_map(|child| match child {
            BoxChild::Box(nested) => Some(nested),
            BoxChild::Item(_) => None,
        })
        .collect()
}

/// Helper: the direct inline item kinds of a box.
fn item_kinds(layout_box: &LayoutBox) -> Vec<&ItemKind> {
    layout_box
        .children()
        .iter()
        .filter_map(|child| match child {
            BoxChild::Item(item) => Some(&item.kind),
            BoxChild::Box(_) => None,
        })
        .collect()
}

#[test]
fn body_words_become_items_in_order() {
    let root = build("<html><body>one two  three\n four</body></html>");
    assert_eq!(words(&root), ["one", "two", "three", "four"]);
}

#[test]
fn document_without_body_yields_empty_tree() {
    let root = build("<!-- just a comment -->");
    assert!(root.children().is_empty());
}

#[test]
fn head_and_title_content_never_reach_the_tree() {
    let root = build("<head><title>Discard Me</title></head><body>kept</body>");
    assert_eq!(words(&root), ["kept"]);
}

#[test]
fn div_creates_a_nested_box() {
    let root = build("<div>inner</div>after");
    let boxes = child_boxes(&root);
    assert_eq!(boxes.len(), 1);
    assert_eq!(boxes[0].kind, BoxKind::Flow);
    assert!(!boxes[0].breaks_line());
    assert_eq!(words(boxes[0]), ["inner"]);
    assert_eq!(words(&root), ["after"]);
}

#[test]
fn paragraph_box_forces_a_line_break() {
    let root = build("<p>x</p>");
    let boxes = child_boxes(&root);
    assert_eq!(boxes.len(), 1);
    assert!(boxes[0].breaks_line());
}

#[test]
fn list_wraps_each_li_in_its_own_box() {
    let root = build("<ul><li>a</li><li>b</li><li>c</li></ul>");
    let lists = child_boxes(&root);
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].kind, BoxKind::List);

    let items = child_boxes(lists[0]);
    assert_eq!(items.len(), 3);
    assert_eq!(words(items[0]), ["a"]);
    assert_eq!(words(items[1]), ["b"]);
    assert_eq!(words(items[2]), ["c"]);
}

#[test]
fn list_considers_only_direct_li_children() {
    let root = build("<ul><div>stray</div><li>a</li></ul>");
    let lists = child_boxes(&root);
    let items = child_boxes(lists[0]);
    // The stray div is not an item box; only the li is.
    assert_eq!(items.len(), 1);
    assert_eq!(words(items[0]), ["a"]);
}

#[test]
fn ordered_and_definition_lists_build_the_same_shape() {
    for markup in ["<ol><li>a</li><li>b</li></ol>", "<dl><li>a</li><li>b</li></dl>"] {
        let root = build(markup);
        let lists = child_boxes(&root);
        assert_eq!(lists.len(), 1);
        assert_eq!(child_boxes(lists[0]).len(), 2);
    }
}

#[test]
fn table_without_tr_children_has_zero_row_boxes() {
    let root = build("<table><div>x</div><td>loose cell</td></table>");
    let tables = child_boxes(&root);
    assert_eq!(tables.len(), 1);
    assert!(child_boxes(tables[0]).is_empty());
}

#[test]
fn table_rows_and_cells() {
    let root = build("<table><tr><td>a</td><td>b</td></tr><tr><td>c</td></tr></table>");
    let tables = child_boxes(&root);
    let rows = child_boxes(tables[0]);
    assert_eq!(rows.len(), 2);
    // Cell content is parsed into the row box; cells are not boxes of
    // their own.
    assert_eq!(words(rows[0]), ["a", "b"]);
    assert_eq!(words(rows[1]), ["c"]);
}

#[test]
fn paired_format_tags_emit_one_open_and_one_close() {
    let root = build("<b></b>");
    let kinds = item_kinds(&root);
    assert_eq!(kinds.len(), 2);
    assert!(matches!(
        kinds[0],
        ItemKind::MarkerOpen(Marker::Format(FormatKind::Bold))
    ));
    assert!(matches!(
        kinds[1],
        ItemKind::MarkerClose(Marker::Format(FormatKind::Bold))
    ));
}

#[test]
fn format_markers_surround_content() {
    let root = build("<i>word</i>");
    let kinds = item_kinds(&root);
    assert_eq!(kinds.len(), 3);
    assert!(matches!(
        kinds[0],
        ItemKind::MarkerOpen(Marker::Format(FormatKind::Italic))
    ));
    assert!(matches!(kinds[1], ItemKind::Word { .. }));
    assert!(matches!(
        kinds[2],
        ItemKind::MarkerClose(Marker::Format(FormatKind::Italic))
    ));
}

#[test]
fn strong_and_em_map_to_bold_and_italic() {
    let root = build("<strong>a</strong><em>b</em>");
    let kinds = item_kinds(&root);
    assert!(matches!(
        kinds[0],
        ItemKind::MarkerOpen(Marker::Format(FormatKind::Bold))
    ));
    assert!(matches!(
        kinds[3],
        ItemKind::MarkerOpen(Marker::Format(FormatKind::Italic))
    ));
}

#[test]
fn anchor_markers_carry_the_href() {
    let root = build(r#"<a href="/target">link</a>"#);
    let kinds = item_kinds(&root);
    assert_eq!(kinds.len(), 3);
    let ItemKind::MarkerOpen(Marker::Anchor { href }) = kinds[0] else {
        panic!("expected an anchor open marker, got {:?}", kinds[0]);
    };
    assert_eq!(href.as_deref(), Some("/target"));
}

#[test]
fn font_markers_resolve_legacy_attributes() {
    let root = build(r#"<font size="7" color="red">x</font>"#);
    let kinds = item_kinds(&root);
    let ItemKind::MarkerOpen(Marker::FontScope { size, color, .. }) = kinds[0] else {
        panic!("expected a font-scope open marker, got {:?}", kinds[0]);
    };
    assert_eq!(*size, Some(48.0));
    assert_eq!(color.map(|c| (c.r, c.g, c.b)), Some((255, 0, 0)));
}

#[test]
fn span_is_transparent() {
    let root = build("<span>a b</span>");
    assert_eq!(words(&root), ["a", "b"]);
    assert!(child_boxes(&root).is_empty());
    assert_eq!(item_kinds(&root).len(), 2);
}

#[test]
fn unknown_tags_recurse_permissively() {
    let root = build("<widget>a<div>b</div></widget>");
    assert_eq!(words(&root), ["a"]);
    let boxes = child_boxes(&root);
    assert_eq!(boxes.len(), 1);
    assert_eq!(words(boxes[0]), ["b"]);
}

#[test]
fn br_appends_a_line_break_item() {
    let root = build("a<br>b");
    let kinds = item_kinds(&root);
    assert_eq!(kinds.len(), 3);
    assert!(matches!(kinds[1], ItemKind::LineBreak));
}

#[test]
fn img_dimensions_from_attributes() {
    let root = build(r#"<img src="x.png" width="10" height="20">"#);
    let kinds = item_kinds(&root);
    let ItemKind::Image { src, width, height } = kinds[0] else {
        panic!("expected an image item, got {:?}", kinds[0]);
    };
    assert_eq!(src, "x.png");
    assert_eq!(*width, 10.0);
    assert_eq!(*height, 20.0);
}

#[test]
fn img_without_dimensions_gets_a_placeholder_size() {
    let root = build(r#"<img src="x.png">"#);
    let ItemKind::Image { width, height, .. } = item_kinds(&root)[0] else {
        panic!("expected an image item");
    };
    assert_eq!(*width, *height);
    assert!(*width > 0.0);
}

#[test]
fn script_and_comments_are_skipped() {
    let root = build("a<script>var x = 1;</script><!-- note -->b");
    assert_eq!(words(&root), ["a", "b"]);
    assert_eq!(item_kinds(&root).len(), 2);
}

#[test]
fn headings_carry_their_level() {
    let root = build("<h2>title</h2>");
    let boxes = child_boxes(&root);
    assert_eq!(boxes[0].kind, BoxKind::Heading(2));
    assert!(boxes[0].breaks_line());
    assert_eq!(words(boxes[0]), ["title"]);
}

#[test]
fn classification_table() {
    assert_eq!(classify(TagType::Div), TagClass::Block);
    assert_eq!(classify(TagType::P), TagClass::Paragraph);
    assert_eq!(classify(TagType::H4), TagClass::Heading(4));
    assert_eq!(classify(TagType::Ol), TagClass::List);
    assert_eq!(classify(TagType::Table), TagClass::Table);
    assert_eq!(classify(TagType::Strong), TagClass::Format(FormatKind::Bold));
    assert_eq!(classify(TagType::A), TagClass::Anchor);
    assert_eq!(classify(TagType::Font), TagClass::FontScope);
    assert_eq!(classify(TagType::Span), TagClass::Transparent);
    assert_eq!(classify(TagType::Br), TagClass::LineBreak);
    assert_eq!(classify(TagType::Img), TagClass::Image);
    assert_eq!(classify(TagType::Script), TagClass::Skip);
    assert_eq!(classify(TagType::Other), TagClass::Fallback);
}

/// For any list of words placed in the body outside tags, the tree
/// contains exactly those words as items, in source order.
#[quickcheck]
fn word_items_match_source_words(raw: Vec<String>) -> bool {
    let cleaned: Vec<String> = raw
        .iter()
        .map(|word| word.chars().filter(char::is_ascii_alphanumeric).collect())
        .filter(|word: &String| !word.is_empty())
        .collect();
    let html = format!("<html><body>{}</body></html>", cleaned.join(" "));
    let doc = parse_document(&html).expect("generated markup should parse");
    let root = build_box_tree(&doc);
    words(&root) == cleaned
}

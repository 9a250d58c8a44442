//! Tests for the view façade: content replacement, measurement,
//! arrangement, and drawing.

use wren_common::net::Response;
use wren_html::TextEncoding;
use wren_layout::{
    ApproximateFontMetrics, BlendMode, DisplayCommand, FontMetrics, Rect,
};
use wren_view::{HtmlView, ViewError, charset_from_content_type, fetch_following_redirects};

/// Helper: a view with deterministic metrics at the given ideal width.
fn view(ideal_width: f32) -> HtmlView {
    HtmlView::with_metrics(ideal_width, Box::new(ApproximateFontMetrics))
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.01
}

#[test]
fn empty_view_reports_a_placeholder_size() {
    let mut v = view(640.0);
    let size = v.calc_ideal_size();
    assert!(approx(size.width, 640.0));
    assert!(approx(size.height, 400.0));
}

#[test]
fn set_text_loads_content() {
    let mut v = view(640.0);
    v.set_text("<p>hello world</p>").unwrap();
    let size = v.calc_ideal_size();
    assert!(size.height > 0.0);
    assert!(size.height < 400.0);
    assert!(v.document().is_some());
    assert!(v.root_box().is_some());
}

#[test]
fn set_text_failure_leaves_content_untouched() {
    let mut v = view(640.0);
    v.set_text("<p>first load</p>").unwrap();
    let before = v.calc_ideal_size();

    assert!(matches!(v.set_text("<div class="), Err(ViewError::Parse(_))));
    assert!(matches!(v.set_text(""), Err(ViewError::Parse(_))));

    // The previously loaded tree and its measurements are unchanged.
    let after = v.calc_ideal_size();
    assert_eq!(before, after);
    let list = v.draw();
    assert!(list.commands().iter().any(|cmd| matches!(
        cmd,
        DisplayCommand::DrawText { text, .. } if text == "first"
    )));
}

#[test]
fn set_text_replaces_previous_content_entirely() {
    let mut v = view(640.0);
    v.set_text("<p>old content</p>").unwrap();
    v.set_text("<p>new</p>").unwrap();

    let list = v.draw();
    assert!(!list.commands().iter().any(|cmd| matches!(
        cmd,
        DisplayCommand::DrawText { text, .. } if text == "old"
    )));
    assert!(list.commands().iter().any(|cmd| matches!(
        cmd,
        DisplayCommand::DrawText { text, .. } if text == "new"
    )));
}

#[test]
fn calc_ideal_size_is_idempotent() {
    let mut v = view(200.0);
    v.set_text("<p>some words that will wrap across lines</p>").unwrap();
    let first = v.calc_ideal_size();
    let second = v.calc_ideal_size();
    assert_eq!(first, second);
}

#[test]
fn assigned_rect_changes_the_measurement_width() {
    let mut v = view(640.0);
    v.set_text("aaaa bbbb cccc dddd eeee ffff").unwrap();
    let wide = v.calc_ideal_size();

    // Narrow the view: the same content wraps and grows taller.
    v.set_rect(Rect::new(0.0, 0.0, 80.0, 400.0));
    let narrow = v.calc_ideal_size();
    assert!(narrow.height > wide.height);
    assert!(narrow.width <= 80.0);
}

#[test]
fn draw_enables_alpha_blending_first() {
    let mut v = view(640.0);
    v.set_text("<p>x</p>").unwrap();
    let list = v.draw();
    assert!(matches!(
        list.commands().first(),
        Some(DisplayCommand::SetBlendMode {
            mode: BlendMode::Alpha
        })
    ));
}

#[test]
fn draw_on_an_empty_view_is_just_the_blend_switch() {
    let v = view(640.0);
    let list = v.draw();
    assert_eq!(list.len(), 1);
}

#[test]
fn text_size_configuration_affects_measurement() {
    let mut v = view(10_000.0);
    v.set_text("word").unwrap();
    let small = v.calc_ideal_size();

    v.set_text_size(28.0);
    let large = v.calc_ideal_size();
    assert!(large.width > small.width);
    assert!(large.height > small.height);
}

#[test]
fn no_url_until_loaded_from_network() {
    let mut v = view(640.0);
    v.set_text("<p>x</p>").unwrap();
    assert_eq!(v.url(), None);
}

#[test]
fn charset_extraction_from_content_type() {
    assert_eq!(
        charset_from_content_type("text/html; charset=UTF-8"),
        TextEncoding::Utf8
    );
    assert_eq!(
        charset_from_content_type("text/html; CHARSET=iso-8859-1"),
        TextEncoding::Latin1
    );
    assert_eq!(
        charset_from_content_type("text/html; charset=\"utf-8\""),
        TextEncoding::Utf8
    );
    assert_eq!(
        charset_from_content_type("text/html"),
        TextEncoding::Unknown
    );
    assert_eq!(
        charset_from_content_type("text/html; charset=mystery; boundary=x"),
        TextEncoding::Unknown
    );
}

/// Helper: a 302 redirect response pointing at `location`.
fn redirect_to(location: &str) -> Response {
    Response::from_parts(
        302,
        vec![("Location".to_string(), location.to_string())],
        Vec::new(),
    )
}

/// Helper: a 200 response with an HTML body.
fn ok_response(body: &str) -> Response {
    Response::from_parts(
        200,
        vec![("Content-Type".to_string(), "text/html".to_string())],
        body.as_bytes().to_vec(),
    )
}

#[test]
fn redirects_resolve_root_relative_locations() {
    let (response, final_url) = fetch_following_redirects("http://x.com/a/", |url| {
        Ok(match url {
            "http://x.com/a/" => redirect_to("/b"),
            "http://x.com/b" => ok_response("<p>found</p>"),
            other => panic!("unexpected fetch of {other}"),
        })
    })
    .unwrap();
    assert_eq!(final_url, "http://x.com/b");
    assert_eq!(response.status, 200);
}

#[test]
fn redirects_follow_absolute_locations() {
    let (_, final_url) = fetch_following_redirects("http://x.com/a/", |url| {
        Ok(match url {
            "http://x.com/a/" => redirect_to("http://y.com/c"),
            "http://y.com/c" => ok_response("<p>moved</p>"),
            other => panic!("unexpected fetch of {other}"),
        })
    })
    .unwrap();
    assert_eq!(final_url, "http://y.com/c");
}

#[test]
fn redirect_loops_hit_the_cap() {
    let mut fetches = 0;
    let result = fetch_following_redirects("http://x.com/loop", |_| {
        fetches += 1;
        Ok(redirect_to("/loop"))
    });
    assert!(matches!(result, Err(ViewError::TooManyRedirects { .. })));
    // One initial fetch plus one per allowed redirect; no unbounded chase.
    assert!(fetches <= 12);
}

#[test]
fn response_header_lookup_is_case_insensitive() {
    let response = redirect_to("/next");
    assert_eq!(response.header("location"), Some("/next"));
    assert_eq!(response.header("LOCATION"), Some("/next"));
    assert_eq!(response.header("content-length"), None);
}

#[test]
fn system_metrics_fall_back_cleanly() {
    // Whether or not a system font exists on the test machine, view
    // construction must succeed and produce usable metrics.
    let mut v = HtmlView::new(640.0);
    v.set_text("<p>measured text</p>").unwrap();
    assert!(v.calc_ideal_size().height > 0.0);
}

#[test]
fn approximate_metrics_are_deterministic() {
    let metrics = ApproximateFontMetrics;
    assert!(approx(metrics.text_width("abcd", 10.0), 24.0));
    assert!(approx(metrics.line_height(10.0), 12.0));
}

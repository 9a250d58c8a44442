//! Tests for the HTML tokenizer state machine.

use wren_html::{ParseError, Token, Tokenizer};

/// Helper: tokenize a string, asserting the machine finishes cleanly.
fn tokenize(input: &str) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new(input.to_string());
    tokenizer.run().expect("tokenizer should finish");
    tokenizer.into_tokens()
}

/// Helper: collect consecutive character tokens into strings for easier
/// assertions.
fn flatten(tokens: &[Token]) -> Vec<String> {
    let mut out = Vec::new();
    let mut text = String::new();
    for token in tokens {
        match token {
            Token::Character { data } => text.push(*data),
            other => {
                if !text.is_empty() {
                    out.push(std::mem::take(&mut text));
                }
                out.push(format!("{other:?}"));
            }
        }
    }
    if !text.is_empty() {
        out.push(text);
    }
    out
}

#[test]
fn simple_tag_pair() {
    let tokens = tokenize("<p>Hello</p>");
    assert!(matches!(
        &tokens[0],
        Token::StartTag { name, self_closing: false, .. } if name == "p"
    ));
    assert!(matches!(&tokens[6], Token::EndTag { name } if name == "p"));
    assert!(tokens.last().unwrap().is_eof());
}

#[test]
fn tag_names_are_lowercased() {
    let tokens = tokenize("<DiV></DIV>");
    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "div"));
    assert!(matches!(&tokens[1], Token::EndTag { name } if name == "div"));
}

#[test]
fn attributes_quoted_and_unquoted() {
    let tokens = tokenize(r#"<a href="/x" target=_blank rel='nofollow'>"#);
    let Token::StartTag { name, attributes, .. } = &tokens[0] else {
        panic!("expected a start tag, got {:?}", tokens[0]);
    };
    assert_eq!(name, "a");
    assert_eq!(attributes.len(), 3);
    assert_eq!(attributes[0].name, "href");
    assert_eq!(attributes[0].value, "/x");
    assert_eq!(attributes[1].name, "target");
    assert_eq!(attributes[1].value, "_blank");
    assert_eq!(attributes[2].name, "rel");
    assert_eq!(attributes[2].value, "nofollow");
}

#[test]
fn boolean_attribute_has_empty_value() {
    let tokens = tokenize("<input disabled>");
    let Token::StartTag { attributes, .. } = &tokens[0] else {
        panic!("expected a start tag");
    };
    assert_eq!(attributes[0].name, "disabled");
    assert_eq!(attributes[0].value, "");
}

#[test]
fn duplicate_attributes_are_dropped() {
    let tokens = tokenize(r#"<div id="a" id="b">"#);
    let Token::StartTag { attributes, .. } = &tokens[0] else {
        panic!("expected a start tag");
    };
    assert_eq!(attributes.len(), 1);
    assert_eq!(attributes[0].value, "a");
}

#[test]
fn self_closing_flag() {
    let tokens = tokenize("<img src=x />");
    assert!(matches!(
        &tokens[0],
        Token::StartTag { self_closing: true, .. }
    ));
}

#[test]
fn named_character_references() {
    let parts = flatten(&tokenize("a &amp; b &lt;c&gt;"));
    assert_eq!(parts[0], "a & b <c>");
}

#[test]
fn numeric_character_references() {
    let parts = flatten(&tokenize("&#65;&#x42;&#x63;"));
    assert_eq!(parts[0], "ABc");
}

#[test]
fn unknown_entity_stays_literal() {
    let parts = flatten(&tokenize("a &zzz; b"));
    assert_eq!(parts[0], "a &zzz; b");
}

#[test]
fn entity_in_attribute_value() {
    let tokens = tokenize(r#"<a href="?a=1&amp;b=2">"#);
    let Token::StartTag { attributes, .. } = &tokens[0] else {
        panic!("expected a start tag");
    };
    assert_eq!(attributes[0].value, "?a=1&b=2");
}

#[test]
fn comment_token() {
    let tokens = tokenize("<!-- hi there -->");
    assert!(matches!(&tokens[0], Token::Comment { data } if data == " hi there "));
}

#[test]
fn comment_with_embedded_dashes() {
    let tokens = tokenize("<!-- a - b -- c -->");
    assert!(matches!(&tokens[0], Token::Comment { data } if data == " a - b -- c "));
}

#[test]
fn doctype_is_recognized_and_discarded() {
    let tokens = tokenize("<!DOCTYPE html><p>x</p>");
    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "p"));
}

#[test]
fn script_content_is_raw_text() {
    let tokens = tokenize("<script>if (a < b) { f(); }</script>");
    let parts = flatten(&tokens);
    // StartTag, raw text, EndTag, EOF.
    assert!(parts[0].contains("script"));
    assert_eq!(parts[1], "if (a < b) { f(); }");
    assert!(parts[2].contains("EndTag"));
}

#[test]
fn script_end_tag_must_match() {
    let tokens = tokenize("<script></div></script>");
    let parts = flatten(&tokens);
    assert_eq!(parts[1], "</div>");
}

#[test]
fn stray_less_than_is_text() {
    let parts = flatten(&tokenize("a < b"));
    assert_eq!(parts[0], "a < b");
}

#[test]
fn eof_inside_tag_is_an_error() {
    let mut tokenizer = Tokenizer::new("<div".to_string());
    assert!(matches!(
        tokenizer.run(),
        Err(ParseError::UnexpectedEof { context: "tag" })
    ));
}

#[test]
fn eof_inside_attribute_is_an_error() {
    let mut tokenizer = Tokenizer::new("<div class=\"x".to_string());
    assert!(matches!(
        tokenizer.run(),
        Err(ParseError::UnexpectedEof { context: "attribute" })
    ));
}

#[test]
fn eof_inside_comment_is_an_error() {
    let mut tokenizer = Tokenizer::new("<!-- never closed".to_string());
    assert!(matches!(
        tokenizer.run(),
        Err(ParseError::UnexpectedEof { context: "comment" })
    ));
}

#[test]
fn eof_in_raw_text_is_not_an_error() {
    let mut tokenizer = Tokenizer::new("<script>unterminated".to_string());
    assert!(tokenizer.run().is_ok());
}

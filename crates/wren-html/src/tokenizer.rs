//! HTML tokenizer state machine.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! A reduced rendition of the WHATWG tokenizer: data, tag, attribute,
//! comment, and raw-text states, plus a small character reference table.
//! States the layout engine never needs (RCDATA, script escape states,
//! CDATA) are omitted; `<script>` and `<style>` content is captured with a
//! single raw-text state keyed by the element name.

use std::collections::HashMap;
use std::sync::LazyLock;

use wren_common::warning::warn_once;

use crate::error::ParseError;
use crate::token::{Attribute, Token};

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// The tokenizer state machine. Each state corresponds to a section in
/// § 13.2.5 (several spec states are merged where the distinction only
/// matters for error reporting).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    Data,
    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    TagOpen,
    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    EndTagOpen,
    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    TagName,
    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    BeforeAttributeName,
    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    AttributeName,
    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    AfterAttributeName,
    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    BeforeAttributeValue,
    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    AttributeValueDoubleQuoted,
    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    AttributeValueSingleQuoted,
    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    AttributeValueUnquoted,
    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    AfterAttributeValueQuoted,
    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    SelfClosingStartTag,
    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    BogusComment,
    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    MarkupDeclarationOpen,
    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    CommentStart,
    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    CommentStartDash,
    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    Comment,
    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    CommentEndDash,
    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    CommentEnd,
    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    /// (merged: the whole declaration is skipped up to `>`)
    Doctype,
    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    RawText,
    /// [§ 13.2.5.12 RAWTEXT less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-less-than-sign-state)
    RawTextLessThanSign,
    /// [§ 13.2.5.14 RAWTEXT end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-name-state)
    RawTextEndTagName,
}

/// The named character reference table.
///
/// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
///
/// The full spec defines 2,231 entities; this table carries the ones that
/// actually occur in body text. Keys keep the trailing semicolon; the
/// handful of legacy no-semicolon forms get separate entries.
static NAMED_ENTITIES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("amp;", "&"),
        ("amp", "&"), // Legacy (no semicolon)
        ("lt;", "<"),
        ("lt", "<"), // Legacy
        ("gt;", ">"),
        ("gt", ">"), // Legacy
        ("quot;", "\""),
        ("quot", "\""), // Legacy
        ("apos;", "'"),
        ("nbsp;", "\u{00A0}"),
        ("copy;", "\u{00A9}"),
        ("reg;", "\u{00AE}"),
        ("trade;", "\u{2122}"),
        ("mdash;", "\u{2014}"),
        ("ndash;", "\u{2013}"),
        ("hellip;", "\u{2026}"),
        ("bull;", "\u{2022}"),
        ("middot;", "\u{00B7}"),
        ("lsquo;", "\u{2018}"),
        ("rsquo;", "\u{2019}"),
        ("ldquo;", "\u{201C}"),
        ("rdquo;", "\u{201D}"),
        ("laquo;", "\u{00AB}"),
        ("raquo;", "\u{00BB}"),
        ("euro;", "\u{20AC}"),
        ("pound;", "\u{00A3}"),
        ("cent;", "\u{00A2}"),
        ("yen;", "\u{00A5}"),
        ("deg;", "\u{00B0}"),
        ("times;", "\u{00D7}"),
        ("divide;", "\u{00F7}"),
        ("plusmn;", "\u{00B1}"),
    ])
});

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// Converts an input string into a stream of [`Token`]s. Create with
/// [`Tokenizer::new`], drive with [`Tokenizer::run`], collect with
/// [`Tokenizer::into_tokens`].
pub struct Tokenizer {
    /// The input document text.
    input: String,
    /// Byte offset of the next character to consume.
    pos: usize,
    /// "Reconsume in the X state": process the current character again.
    reconsume: bool,
    /// The character most recently consumed.
    current_char: char,
    /// Current state of the machine.
    state: State,
    /// Output token stream.
    tokens: Vec<Token>,

    // Current tag under construction.
    tag_name: String,
    tag_is_end: bool,
    tag_self_closing: bool,
    attributes: Vec<Attribute>,
    attr_name: String,
    attr_value: String,

    /// Data of the comment under construction.
    comment: String,

    /// Element name whose raw text we are inside ("script" or "style").
    raw_text_tag: String,
    /// Candidate end tag name accumulating in `RawTextEndTagName`.
    pending_end_tag: String,
}

impl Tokenizer {
    /// Create a tokenizer over the given input.
    #[must_use]
    pub fn new(input: String) -> Self {
        Self {
            input,
            pos: 0,
            reconsume: false,
            current_char: '\0',
            state: State::Data,
            tokens: Vec::new(),
            tag_name: String::new(),
            tag_is_end: false,
            tag_self_closing: false,
            attributes: Vec::new(),
            attr_name: String::new(),
            attr_value: String::new(),
            comment: String::new(),
            raw_text_tag: String::new(),
            pending_end_tag: String::new(),
        }
    }

    /// Consume the output token stream.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Run the state machine over the whole input.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnexpectedEof`] when the input ends inside a
    /// tag, attribute, comment, or DOCTYPE declaration.
    pub fn run(&mut self) -> Result<(), ParseError> {
        loop {
            let next = if self.reconsume {
                self.reconsume = false;
                Some(self.current_char)
            } else {
                self.consume()
            };

            let Some(c) = next else {
                return self.handle_eof();
            };

            match self.state {
                State::Data => self.data_state(c),
                State::TagOpen => self.tag_open_state(c),
                State::EndTagOpen => self.end_tag_open_state(c),
                State::TagName => self.tag_name_state(c),
                State::BeforeAttributeName => self.before_attribute_name_state(c),
                State::AttributeName => self.attribute_name_state(c),
                State::AfterAttributeName => self.after_attribute_name_state(c),
                State::BeforeAttributeValue => self.before_attribute_value_state(c),
                State::AttributeValueDoubleQuoted => self.attribute_value_quoted_state(c, '"'),
                State::AttributeValueSingleQuoted => self.attribute_value_quoted_state(c, '\''),
                State::AttributeValueUnquoted => self.attribute_value_unquoted_state(c),
                State::AfterAttributeValueQuoted => self.after_attribute_value_quoted_state(c),
                State::SelfClosingStartTag => self.self_closing_start_tag_state(c),
                State::BogusComment => self.bogus_comment_state(c),
                State::MarkupDeclarationOpen => self.markup_declaration_open_state(c),
                State::CommentStart => self.comment_start_state(c),
                State::CommentStartDash => self.comment_start_dash_state(c),
                State::Comment => self.comment_state(c),
                State::CommentEndDash => self.comment_end_dash_state(c),
                State::CommentEnd => self.comment_end_state(c),
                State::Doctype => self.doctype_state(c),
                State::RawText => self.raw_text_state(c),
                State::RawTextLessThanSign => self.raw_text_less_than_sign_state(c),
                State::RawTextEndTagName => self.raw_text_end_tag_name_state(c),
            }
        }
    }

    // =========================================================================
    // Input helpers
    // =========================================================================

    /// "Consume the next input character": return the character at the
    /// current position and advance.
    fn consume(&mut self) -> Option<char> {
        let c = self.input[self.pos..].chars().next()?;
        self.pos += c.len_utf8();
        self.current_char = c;
        Some(c)
    }

    /// "Reconsume in the X state": transition without consuming; the same
    /// character is processed again in the new state.
    const fn reconsume_in(&mut self, state: State) {
        self.reconsume = true;
        self.state = state;
    }

    /// "If the next few characters are an ASCII case-insensitive match
    /// for the word X, consume those characters."
    fn consume_if_match_ignore_case(&mut self, target: &str) -> bool {
        let rest = self.input[self.pos..].as_bytes();
        if rest.len() >= target.len() && rest[..target.len()].eq_ignore_ascii_case(target.as_bytes())
        {
            self.pos += target.len();
            true
        } else {
            false
        }
    }

    /// Map end-of-input to success or [`ParseError::UnexpectedEof`],
    /// depending on the state the input ended in.
    fn handle_eof(&mut self) -> Result<(), ParseError> {
        let context = match self.state {
            // Raw text just ends at EOF; the captured text stands.
            State::Data | State::RawText | State::RawTextLessThanSign | State::RawTextEndTagName => {
                self.tokens.push(Token::EndOfFile);
                return Ok(());
            }
            // "This is an eof-before-tag-name parse error. Emit a U+003C
            // LESS-THAN SIGN character token and an end-of-file token."
            State::TagOpen => {
                self.emit_character('<');
                self.tokens.push(Token::EndOfFile);
                return Ok(());
            }
            State::BogusComment => {
                self.emit_comment();
                self.tokens.push(Token::EndOfFile);
                return Ok(());
            }
            State::EndTagOpen | State::TagName => "tag",
            State::BeforeAttributeName
            | State::AttributeName
            | State::AfterAttributeName
            | State::BeforeAttributeValue
            | State::AttributeValueDoubleQuoted
            | State::AttributeValueSingleQuoted
            | State::AttributeValueUnquoted
            | State::AfterAttributeValueQuoted
            | State::SelfClosingStartTag => "attribute",
            State::MarkupDeclarationOpen
            | State::CommentStart
            | State::CommentStartDash
            | State::Comment
            | State::CommentEndDash
            | State::CommentEnd => "comment",
            State::Doctype => "doctype",
        };
        Err(ParseError::UnexpectedEof { context })
    }

    // =========================================================================
    // Token construction helpers
    // =========================================================================

    /// Emit a character token.
    fn emit_character(&mut self, c: char) {
        self.tokens.push(Token::Character { data: c });
    }

    /// Start building a new tag token.
    fn new_tag(&mut self, is_end: bool) {
        self.tag_name.clear();
        self.tag_is_end = is_end;
        self.tag_self_closing = false;
        self.attributes.clear();
        self.attr_name.clear();
        self.attr_value.clear();
    }

    /// Finish the attribute under construction, if any.
    ///
    /// "If there is already an attribute on the token with the exact same
    /// name, then this is a duplicate-attribute parse error and the new
    /// attribute must be removed from the token."
    fn finish_attribute(&mut self) {
        if self.attr_name.is_empty() {
            return;
        }
        let name = std::mem::take(&mut self.attr_name);
        let value = std::mem::take(&mut self.attr_value);
        if self.attributes.iter().any(|attr| attr.name == name) {
            warn_once("html", &format!("duplicate attribute '{name}' dropped"));
        } else {
            self.attributes.push(Attribute { name, value });
        }
    }

    /// "Emit the current tag token."
    ///
    /// End tags with attributes are an end-tag-with-attributes parse error;
    /// the attributes are dropped. A start tag for a raw-text element
    /// (`script`, `style`) switches the machine to the RAWTEXT state.
    fn emit_current_tag(&mut self) {
        self.finish_attribute();
        let name = std::mem::take(&mut self.tag_name);
        if self.tag_is_end {
            if !self.attributes.is_empty() {
                warn_once("html", &format!("attributes on </{name}> dropped"));
                self.attributes.clear();
            }
            self.tokens.push(Token::EndTag { name });
            self.state = State::Data;
            return;
        }

        let self_closing = self.tag_self_closing;
        let raw_text = !self_closing && matches!(name.as_str(), "script" | "style");
        self.tokens.push(Token::StartTag {
            name: name.clone(),
            self_closing,
            attributes: std::mem::take(&mut self.attributes),
        });
        if raw_text {
            self.raw_text_tag = name;
            self.state = State::RawText;
        } else {
            self.state = State::Data;
        }
    }

    /// Emit the comment under construction.
    fn emit_comment(&mut self) {
        let data = std::mem::take(&mut self.comment);
        self.tokens.push(Token::Comment { data });
        self.state = State::Data;
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    ///
    /// Try to consume a character reference at the current position (the
    /// `&` itself has already been consumed). Returns the replacement text,
    /// or `None` if nothing matched — in which case nothing was consumed
    /// and the `&` stands as literal text.
    fn consume_character_reference(&mut self) -> Option<String> {
        let rest = &self.input[self.pos..];

        // [§ 13.2.5.75 Numeric character reference state]
        if let Some(numeric) = rest.strip_prefix('#') {
            let (digits, radix) = match numeric.strip_prefix(['x', 'X']) {
                Some(hex) => (hex, 16),
                None => (numeric, 10),
            };
            let len = digits
                .chars()
                .take_while(|c| c.is_digit(radix))
                .count();
            if len == 0 {
                return None;
            }
            let value = u32::from_str_radix(&digits[..len], radix).ok()?;
            // Consumed: '#', optional 'x', digits, optional ';'.
            let mut consumed = 1 + usize::from(radix == 16) + len;
            if digits[len..].starts_with(';') {
                consumed += 1;
            }
            self.pos += consumed;
            // "If the number is 0x00 or a surrogate, set it to U+FFFD."
            let replacement = match char::from_u32(value) {
                Some(c) if value != 0 => c,
                _ => '\u{FFFD}',
            };
            return Some(replacement.to_string());
        }

        // [§ 13.2.5.73 Named character reference state]
        //
        // "Consume the maximum number of characters possible, where the
        // consumed characters are one of the identifiers of the named
        // character references table."
        let name_len = rest
            .chars()
            .take_while(char::is_ascii_alphanumeric)
            .count();
        if name_len == 0 || name_len > 31 {
            return None;
        }
        let name = &rest[..name_len];
        if rest[name_len..].starts_with(';') {
            let with_semicolon = format!("{name};");
            if let Some(replacement) = NAMED_ENTITIES.get(with_semicolon.as_str()) {
                self.pos += name_len + 1;
                return Some((*replacement).to_string());
            }
        }
        // Legacy no-semicolon forms (amp, lt, gt, quot).
        if let Some(replacement) = NAMED_ENTITIES.get(name) {
            self.pos += name_len;
            return Some((*replacement).to_string());
        }
        None
    }

    // =========================================================================
    // States
    // =========================================================================

    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    fn data_state(&mut self, c: char) {
        match c {
            '<' => self.state = State::TagOpen,
            '&' => match self.consume_character_reference() {
                Some(replacement) => {
                    for rc in replacement.chars() {
                        self.emit_character(rc);
                    }
                }
                None => self.emit_character('&'),
            },
            _ => self.emit_character(c),
        }
    }

    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    fn tag_open_state(&mut self, c: char) {
        match c {
            '!' => self.state = State::MarkupDeclarationOpen,
            '/' => self.state = State::EndTagOpen,
            '?' => {
                // "This is an unexpected-question-mark-instead-of-tag-name
                // parse error. Create a comment token whose data is the
                // empty string. Reconsume in the bogus comment state."
                self.comment.clear();
                self.reconsume_in(State::BogusComment);
            }
            c if c.is_ascii_alphabetic() => {
                self.new_tag(false);
                self.reconsume_in(State::TagName);
            }
            _ => {
                // "Emit a U+003C LESS-THAN SIGN character token. Reconsume
                // in the data state."
                self.emit_character('<');
                self.reconsume_in(State::Data);
            }
        }
    }

    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    fn end_tag_open_state(&mut self, c: char) {
        match c {
            '>' => {
                // "missing-end-tag-name parse error. Switch to the data state."
                self.state = State::Data;
            }
            c if c.is_ascii_alphabetic() => {
                self.new_tag(true);
                self.reconsume_in(State::TagName);
            }
            _ => {
                self.comment.clear();
                self.reconsume_in(State::BogusComment);
            }
        }
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    fn tag_name_state(&mut self, c: char) {
        match c {
            '\t' | '\n' | '\x0C' | ' ' => self.state = State::BeforeAttributeName,
            '/' => self.state = State::SelfClosingStartTag,
            '>' => self.emit_current_tag(),
            _ => self.tag_name.push(c.to_ascii_lowercase()),
        }
    }

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    fn before_attribute_name_state(&mut self, c: char) {
        match c {
            '\t' | '\n' | '\x0C' | ' ' => {}
            '/' | '>' => self.reconsume_in(State::AfterAttributeName),
            _ => {
                self.finish_attribute();
                self.reconsume_in(State::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    fn attribute_name_state(&mut self, c: char) {
        match c {
            '\t' | '\n' | '\x0C' | ' ' | '/' | '>' => self.reconsume_in(State::AfterAttributeName),
            '=' => self.state = State::BeforeAttributeValue,
            _ => self.attr_name.push(c.to_ascii_lowercase()),
        }
    }

    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    fn after_attribute_name_state(&mut self, c: char) {
        match c {
            '\t' | '\n' | '\x0C' | ' ' => {}
            '/' => {
                self.finish_attribute();
                self.state = State::SelfClosingStartTag;
            }
            '=' => self.state = State::BeforeAttributeValue,
            '>' => self.emit_current_tag(),
            _ => {
                self.finish_attribute();
                self.reconsume_in(State::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    fn before_attribute_value_state(&mut self, c: char) {
        match c {
            '\t' | '\n' | '\x0C' | ' ' => {}
            '"' => self.state = State::AttributeValueDoubleQuoted,
            '\'' => self.state = State::AttributeValueSingleQuoted,
            '>' => {
                // "missing-attribute-value parse error. Emit the current
                // tag token."
                self.emit_current_tag();
            }
            _ => self.reconsume_in(State::AttributeValueUnquoted),
        }
    }

    /// [§ 13.2.5.36/37 Attribute value (quoted) states](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    fn attribute_value_quoted_state(&mut self, c: char, quote: char) {
        match c {
            c if c == quote => self.state = State::AfterAttributeValueQuoted,
            '&' => match self.consume_character_reference() {
                Some(replacement) => self.attr_value.push_str(&replacement),
                None => self.attr_value.push('&'),
            },
            _ => self.attr_value.push(c),
        }
    }

    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    fn attribute_value_unquoted_state(&mut self, c: char) {
        match c {
            '\t' | '\n' | '\x0C' | ' ' => {
                self.finish_attribute();
                self.state = State::BeforeAttributeName;
            }
            '>' => self.emit_current_tag(),
            '&' => match self.consume_character_reference() {
                Some(replacement) => self.attr_value.push_str(&replacement),
                None => self.attr_value.push('&'),
            },
            _ => self.attr_value.push(c),
        }
    }

    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    fn after_attribute_value_quoted_state(&mut self, c: char) {
        match c {
            '\t' | '\n' | '\x0C' | ' ' => {
                self.finish_attribute();
                self.state = State::BeforeAttributeName;
            }
            '/' => {
                self.finish_attribute();
                self.state = State::SelfClosingStartTag;
            }
            '>' => self.emit_current_tag(),
            _ => {
                // "missing-whitespace-between-attributes parse error.
                // Reconsume in the before attribute name state."
                self.finish_attribute();
                self.reconsume_in(State::BeforeAttributeName);
            }
        }
    }

    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    fn self_closing_start_tag_state(&mut self, c: char) {
        match c {
            '>' => {
                self.tag_self_closing = true;
                self.emit_current_tag();
            }
            _ => {
                // "unexpected-solidus-in-tag parse error."
                self.reconsume_in(State::BeforeAttributeName);
            }
        }
    }

    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    fn bogus_comment_state(&mut self, c: char) {
        match c {
            '>' => self.emit_comment(),
            _ => self.comment.push(c),
        }
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    fn markup_declaration_open_state(&mut self, c: char) {
        // The current character is the first one after "<!".
        if c == '-' && self.consume_if_match_ignore_case("-") {
            self.comment.clear();
            self.state = State::CommentStart;
        } else if c.eq_ignore_ascii_case(&'d') && self.consume_if_match_ignore_case("octype") {
            self.state = State::Doctype;
        } else {
            // "incorrectly-opened-comment parse error."
            self.comment.clear();
            self.reconsume_in(State::BogusComment);
        }
    }

    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    fn comment_start_state(&mut self, c: char) {
        match c {
            '-' => self.state = State::CommentStartDash,
            '>' => {
                // "abrupt-closing-of-empty-comment parse error."
                self.emit_comment();
            }
            _ => {
                self.comment.push(c);
                self.state = State::Comment;
            }
        }
    }

    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    fn comment_start_dash_state(&mut self, c: char) {
        match c {
            '-' => self.state = State::CommentEnd,
            '>' => self.emit_comment(),
            _ => {
                self.comment.push('-');
                self.comment.push(c);
                self.state = State::Comment;
            }
        }
    }

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    fn comment_state(&mut self, c: char) {
        match c {
            '-' => self.state = State::CommentEndDash,
            _ => self.comment.push(c),
        }
    }

    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    fn comment_end_dash_state(&mut self, c: char) {
        match c {
            '-' => self.state = State::CommentEnd,
            _ => {
                self.comment.push('-');
                self.comment.push(c);
                self.state = State::Comment;
            }
        }
    }

    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    fn comment_end_state(&mut self, c: char) {
        match c {
            '>' => self.emit_comment(),
            '-' => self.comment.push('-'),
            _ => {
                self.comment.push_str("--");
                self.comment.push(c);
                self.state = State::Comment;
            }
        }
    }

    /// DOCTYPE declarations are recognized and skipped wholesale.
    ///
    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    fn doctype_state(&mut self, c: char) {
        if c == '>' {
            self.state = State::Data;
        }
    }

    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    fn raw_text_state(&mut self, c: char) {
        match c {
            '<' => self.state = State::RawTextLessThanSign,
            _ => self.emit_character(c),
        }
    }

    /// [§ 13.2.5.12 RAWTEXT less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-less-than-sign-state)
    fn raw_text_less_than_sign_state(&mut self, c: char) {
        if c == '/' {
            self.pending_end_tag.clear();
            self.state = State::RawTextEndTagName;
        } else {
            self.emit_character('<');
            self.reconsume_in(State::RawText);
        }
    }

    /// [§ 13.2.5.14 RAWTEXT end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-name-state)
    ///
    /// "If the current end tag token is an appropriate end tag token"
    /// (matches the element that put us in RAWTEXT) the element closes;
    /// otherwise everything consumed so far is flushed back as text.
    fn raw_text_end_tag_name_state(&mut self, c: char) {
        match c {
            c if c.is_ascii_alphabetic() => self.pending_end_tag.push(c.to_ascii_lowercase()),
            '>' if self.pending_end_tag == self.raw_text_tag => {
                let name = std::mem::take(&mut self.pending_end_tag);
                self.tokens.push(Token::EndTag { name });
                self.raw_text_tag.clear();
                self.state = State::Data;
            }
            _ => {
                // Not the appropriate end tag: flush "</name" as text and
                // reprocess the current character as raw text.
                self.emit_character('<');
                self.emit_character('/');
                let pending = std::mem::take(&mut self.pending_end_tag);
                for pc in pending.chars() {
                    self.emit_character(pc);
                }
                self.reconsume_in(State::RawText);
            }
        }
    }
}

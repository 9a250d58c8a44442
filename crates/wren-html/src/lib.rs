//! HTML tokenizer and tree builder for the wren layout engine.
//!
//! # Scope
//!
//! This crate implements a deliberately reduced subset of
//! [WHATWG § 13.2 Parsing HTML documents](https://html.spec.whatwg.org/multipage/parsing.html):
//!
//! - **Tokenizer** ([§ 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Data, tag, attribute, comment, and raw-text states
//!   - A small named/numeric character reference table
//! - **Tree builder** ([§ 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction))
//!   - A single permissive insertion algorithm instead of the full
//!     insertion-mode machinery
//!   - `html`/`head`/`body` scaffolding synthesis
//!   - Implied end tags for `li`, `p`, `td`, `tr`
//!   - Void elements and raw-text (`script`/`style`) capture
//!
//! # Not Implemented
//!
//! - Foster parenting, the adoption agency algorithm, templates, frames
//! - Full named character reference table (2,231 entities)
//! - Encodings beyond UTF-8 and Latin-1

mod encoding;
mod error;
mod token;
mod tokenizer;
mod tree_builder;

pub use encoding::TextEncoding;
pub use error::ParseError;
pub use token::{Attribute, Token};
pub use tokenizer::Tokenizer;
pub use tree_builder::TreeBuilder;

use wren_dom::Document;

/// Parse an in-memory HTML string into a [`Document`].
///
/// Malformed-but-recoverable structures (unknown tags, stray end tags,
/// missing `<body>`) never fail; they degrade with a warning. Parsing
/// fails only on inputs the tokenizer cannot finish: empty/whitespace-only
/// input and constructs left unterminated at end of input.
///
/// # Errors
///
/// Returns [`ParseError::EmptyDocument`] or [`ParseError::UnexpectedEof`].
pub fn parse_document(html: &str) -> Result<Document, ParseError> {
    if html.trim().is_empty() {
        return Err(ParseError::EmptyDocument);
    }

    let mut tokenizer = Tokenizer::new(html.to_string());
    tokenizer.run()?;
    let tokens = tokenizer.into_tokens();

    let builder = TreeBuilder::new(tokens);
    Ok(builder.run())
}

/// Decode a byte stream with the given encoding, then parse it.
///
/// [`TextEncoding::Unknown`] decodes as lossy UTF-8 rather than failing
/// (an unknown charset is non-fatal).
///
/// # Errors
///
/// Same failure modes as [`parse_document`].
pub fn parse_bytes(bytes: &[u8], encoding: TextEncoding) -> Result<Document, ParseError> {
    let text = encoding.decode(bytes);
    parse_document(&text)
}

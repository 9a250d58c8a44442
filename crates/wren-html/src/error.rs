//! Parse failure taxonomy.

use thiserror::Error;

/// Errors that abort a document parse.
///
/// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
///
/// The WHATWG algorithm recovers from everything; this parser keeps that
/// spirit for structural oddities (stray end tags, unknown tags, missing
/// `<body>`) but treats the cases below as hard failures, so a caller that
/// swaps content on success can keep its previous document on failure.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input was empty or contained only whitespace.
    #[error("empty document")]
    EmptyDocument,

    /// The input ended in the middle of a construct.
    #[error("unexpected end of input in {context}")]
    UnexpectedEof {
        /// Which construct was left unterminated ("tag", "comment", ...).
        context: &'static str,
    },
}

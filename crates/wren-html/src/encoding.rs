//! Text encoding detection and decoding.
//!
//! [§ 13.2.3 The input byte stream](https://html.spec.whatwg.org/multipage/parsing.html#the-input-byte-stream)
//!
//! The view façade sniffs a `charset=` token out of the `Content-Type`
//! header and maps it to one of these variants. Anything we don't know
//! decodes as lossy UTF-8 — an unknown charset degrades, it never fails
//! a load.

use wren_common::warning::warn_once;

/// Supported text encodings for document byte streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// UTF-8 (the default for the web).
    Utf8,
    /// ISO-8859-1 / Latin-1: each byte is the Unicode scalar of the same value.
    Latin1,
    /// Unrecognized charset label; decoded as lossy UTF-8.
    #[default]
    Unknown,
}

impl TextEncoding {
    /// [§ 13.2.3.3 Character encodings](https://html.spec.whatwg.org/multipage/parsing.html#character-encodings)
    ///
    /// Resolve a charset label (as found in a `Content-Type` header) to an
    /// encoding. Matching is case-insensitive and tolerates surrounding
    /// whitespace and quotes.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let label = label.trim().trim_matches('"').to_ascii_lowercase();
        match label.as_str() {
            "utf-8" | "utf8" => Self::Utf8,
            // TODO: windows-1252 differs from Latin-1 in the 0x80-0x9F
            // range (smart quotes, dashes); treating it as Latin-1 is the
            // usual approximation short of a full decoder table.
            "iso-8859-1" | "iso8859-1" | "latin1" | "l1" | "windows-1252" | "us-ascii" => {
                Self::Latin1
            }
            _ => {
                warn_once("encoding", &format!("unknown charset '{label}', falling back to UTF-8"));
                Self::Unknown
            }
        }
    }

    /// Decode a byte stream into a string.
    ///
    /// UTF-8 and Unknown decode lossily (invalid sequences become U+FFFD);
    /// Latin-1 maps each byte to the code point of the same value, so it
    /// can never fail.
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 | Self::Unknown => String::from_utf8_lossy(bytes).into_owned(),
            Self::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
        }
    }
}

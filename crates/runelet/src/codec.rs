//! Bidirectional codec between Unicode text and `\U+XXXX ` escape tokens.
//!
//! Encoding replaces every character whose UTF-8 form is longer than one
//! byte with `\U+`, the code point in uppercase hex (zero-padded to at
//! least four digits), and a single trailing space. ASCII-range characters
//! pass through unchanged.
//!
//! The trailing space is the token delimiter: decoding consumes exactly
//! that one space per escape token and copies every other character
//! through verbatim, so `decode(encode(s))` reproduces `s` for any input
//! that does not already contain a literal `\U+` sequence.

use thiserror::Error;

/// Prefix that introduces an escape token.
pub const ESCAPE_PREFIX: &str = "\\U+";

/// Encode text by replacing every multi-byte character with its escape token.
///
/// Total function: every Unicode scalar value is representable, so this
/// cannot fail.
pub fn encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.len_utf8() > 1 {
            out.push_str(&format!("{ESCAPE_PREFIX}{:04X} ", ch as u32));
        } else {
            out.push(ch);
        }
    }
    out
}

/// One decoded unit of an escaped string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A run of text copied through verbatim.
    Literal(&'a str),
    /// A well-formed escape token, resolved to its scalar value.
    Escaped(char),
    /// An escape-shaped token that does not name a Unicode scalar value.
    Invalid(&'a str),
}

/// Iterate over the literal runs and escape tokens of `input`.
///
/// An escape token starts at `\U+` and extends to the next space (its
/// delimiter, consumed together with the token) or to the end of input.
pub fn tokens(input: &str) -> Tokens<'_> {
    Tokens { rest: input }
}

/// Iterator returned by [`tokens`].
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if self.rest.is_empty() {
            return None;
        }
        match self.rest.find(ESCAPE_PREFIX) {
            Some(0) => {
                let end = self.rest.find(' ').unwrap_or(self.rest.len());
                let raw = &self.rest[..end];
                // Consume the delimiter space along with the token.
                self.rest = self.rest.get(end + 1..).unwrap_or("");
                Some(classify(raw))
            }
            Some(start) => {
                let (literal, rest) = self.rest.split_at(start);
                self.rest = rest;
                Some(Token::Literal(literal))
            }
            None => {
                let literal = self.rest;
                self.rest = "";
                Some(Token::Literal(literal))
            }
        }
    }
}

/// Resolve one escape-shaped token to a scalar value, or flag it invalid.
///
/// Invalid when the digit part is empty, contains a non-hex character,
/// overflows `u32`, or names a surrogate / out-of-range code point. Hex
/// case is not significant on decode.
fn classify(raw: &str) -> Token<'_> {
    let digits = &raw[ESCAPE_PREFIX.len()..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Token::Invalid(raw);
    }
    match u32::from_str_radix(digits, 16).ok().and_then(char::from_u32) {
        Some(ch) => Token::Escaped(ch),
        None => Token::Invalid(raw),
    }
}

/// How [`decode`] resolves invalid escape tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodePolicy {
    /// Invalid tokens contribute nothing to the output.
    Skip,
    /// Invalid tokens become U+FFFD REPLACEMENT CHARACTER.
    #[default]
    Replace,
    /// The first invalid token fails the whole decode.
    Reject,
}

/// Error returned by [`decode`] under [`DecodePolicy::Reject`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed escape token `{token}`")]
pub struct DecodeError {
    /// The offending token, escape prefix included.
    pub token: String,
}

/// Decode an escaped string back to text.
///
/// Literal runs are copied through verbatim; escape tokens resolve to
/// their characters, each consuming its single delimiter space. Only
/// [`DecodePolicy::Reject`] can produce an error.
pub fn decode(input: &str, policy: DecodePolicy) -> Result<String, DecodeError> {
    let mut out = String::with_capacity(input.len());
    for token in tokens(input) {
        match token {
            Token::Literal(text) => out.push_str(text),
            Token::Escaped(ch) => out.push(ch),
            Token::Invalid(raw) => match policy {
                DecodePolicy::Skip => {}
                DecodePolicy::Replace => out.push(char::REPLACEMENT_CHARACTER),
                DecodePolicy::Reject => {
                    return Err(DecodeError {
                        token: raw.to_string(),
                    });
                }
            },
        }
    }
    Ok(out)
}

//! Decoding of icon code tokens.
//!
//! Icon stylesheets spell the glyph of an icon in one of three ways:
//!
//! * escaped, as in `"\f013"`: a stylesheet string escape of 1 to 6 hex
//!   digits, optionally followed by one whitespace character;
//! * bare hex, as in `"f013"` or the doubled-backslash `"\\f013"`;
//! * the literal glyph itself.
//!
//! [`decode_icon_code`] checks for escape syntax first and falls back to the
//! other two spellings.

use std::iter::Peekable;
use std::str::Chars;

use crate::error::DecodeError;

const MAX_HEX_DIGITS: usize = 6;

/// Decode the raw value of an icon code declaration into a code point.
///
/// When the escaped spelling encodes more than one code point, the first
/// one wins.
///
/// ```
/// use icon_glyphs::decode_icon_code;
///
/// assert_eq!(decode_icon_code(r#""\f013""#), Ok('\u{f013}'));
/// assert_eq!(decode_icon_code(r#""\1F600 ""#), Ok('\u{1f600}'));
/// assert_eq!(decode_icon_code(r#""f013""#), Ok('\u{f013}'));
/// ```
pub fn decode_icon_code(token: &str) -> Result<char, DecodeError> {
    let content = strip_quotes(token.trim());
    if content.is_empty() {
        return Err(DecodeError::Empty);
    }

    if has_escape_syntax(content) {
        return unescape(content).next().unwrap_or(Err(DecodeError::Empty));
    }

    let bare: String = content.chars().filter(|&c| c != '\\').collect();
    if !bare.is_empty()
        && bare.len() <= MAX_HEX_DIGITS
        && bare.chars().all(|c| c.is_ascii_hexdigit())
    {
        return hex_to_char(&bare);
    }

    let mut chars = content.chars();
    match (chars.next(), chars.next()) {
        (Some(glyph), None) if glyph != '\\' => Ok(glyph),
        _ => Err(DecodeError::Malformed(content.to_owned())),
    }
}

/// Remove one leading and one trailing quote of the same kind.
fn strip_quotes(token: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = token.strip_prefix(quote).and_then(|t| t.strip_suffix(quote)) {
            return inner;
        }
    }

    token.strip_prefix('"').or_else(|| token.strip_suffix('"')).unwrap_or(token)
}

/// Whether `content` holds a backslash that starts a hex escape. An escaped
/// backslash (`\\`) does not count.
fn has_escape_syntax(content: &str) -> bool {
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        if c == '\\' && chars.next().is_some_and(|h| h.is_ascii_hexdigit()) {
            return true;
        }
    }

    false
}

/// Iterate over the code points of a stylesheet string body.
fn unescape(content: &str) -> Unescape<'_> {
    Unescape {
        chars: content.chars().peekable(),
    }
}

struct Unescape<'a> {
    chars: Peekable<Chars<'a>>,
}

impl Iterator for Unescape<'_> {
    type Item = Result<char, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let c = self.chars.next()?;
        if c != '\\' {
            return Some(Ok(c));
        }

        let mut digits = String::with_capacity(MAX_HEX_DIGITS);
        while digits.len() < MAX_HEX_DIGITS {
            match self.chars.next_if(char::is_ascii_hexdigit) {
                Some(h) => digits.push(h),
                None => break,
            }
        }

        if digits.is_empty() {
            // `\` escapes the next character verbatim; a trailing one is dropped.
            return self.chars.next().map(Ok);
        }

        if let Some('\r') = self.chars.next_if(|c| c.is_whitespace()) {
            self.chars.next_if_eq(&'\n');
        }

        Some(hex_to_char(&digits))
    }
}

fn hex_to_char(digits: &str) -> Result<char, DecodeError> {
    let value =
        u32::from_str_radix(digits, 16).map_err(|_| DecodeError::Malformed(digits.to_owned()))?;
    char::from_u32(value).ok_or(DecodeError::InvalidCodePoint(value))
}

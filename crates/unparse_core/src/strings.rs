//! Define pure string helpers shared by backends (literal escaping, identifier casing).
//!
//! ## Notes
//! - Literal escaping is C-family flavoured: backslash escapes for quotes, backslash and control
//!   characters. Non-ASCII scalars are either kept verbatim or written as Unicode escapes.
//! - Casing helpers operate on Unicode scalars (Rust `char`), not bytes or grapheme clusters.

use std::fmt::Write;

/// How a backend spells a Unicode escape for a scalar it does not emit verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnicodeEscape {
    /// `\uXXXX`, with UTF-16 surrogate pairs for scalars outside the BMP (C#, Java).
    Utf16,
    /// `\u{X...}` with the scalar value in hex (Swift, Rust).
    Braced,
}

/// Escape `text` for use inside a C-family string or character literal delimited by `quote`.
///
/// ## Parameters
/// - `text`: the raw literal contents.
/// - `quote`: the delimiter that must be escaped (`"` for strings, `'` for characters).
/// - `preserve_unicode`: keep non-ASCII scalars verbatim instead of escaping them.
/// - `style`: how non-preserved scalars are spelled.
///
/// ## Returns
/// - (`String`): the escaped contents, without surrounding quotes.
///
/// ## Examples
/// ```rust
/// use unparse_core::strings::{escape_literal, UnicodeEscape};
///
/// assert_eq!(escape_literal("a\"b\n", '"', false, UnicodeEscape::Utf16), "a\\\"b\\n");
/// assert_eq!(escape_literal("é", '"', false, UnicodeEscape::Braced), "\\u{e9}");
/// assert_eq!(escape_literal("é", '"', true, UnicodeEscape::Braced), "é");
/// ```
pub fn escape_literal(text: &str, quote: char, preserve_unicode: bool, style: UnicodeEscape) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_ascii_control() => push_unicode_escape(&mut out, c, style),
            c if c.is_ascii() || preserve_unicode => out.push(c),
            c => push_unicode_escape(&mut out, c, style),
        }
    }
    out
}

fn push_unicode_escape(out: &mut String, ch: char, style: UnicodeEscape) {
    // Writing into a String cannot fail.
    match style {
        UnicodeEscape::Utf16 => {
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                let _ = write!(out, "\\u{:04X}", unit);
            }
        }
        UnicodeEscape::Braced => {
            let _ = write!(out, "\\u{{{:x}}}", ch as u32);
        }
    }
}

/// Lower-case the first letter of an identifier, leaving acronym-style names alone.
///
/// ## Notes
/// - If the first two scalars are both upper-case (`URLPath`, `IO`), the name is returned
///   unchanged: lower-casing only the first letter of an acronym produces `uRLPath`.
/// - A single upper-case scalar (`X`) is lower-cased.
/// - Scalars whose lower-case form expands to several scalars are written out in full.
///
/// ## Examples
/// ```rust
/// use unparse_core::strings::lowercase_first_letter;
///
/// assert_eq!(lowercase_first_letter("Red"), "red");
/// assert_eq!(lowercase_first_letter("URLPath"), "URLPath");
/// assert_eq!(lowercase_first_letter("Émile"), "émile");
/// ```
pub fn lowercase_first_letter(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    if let Some(second) = chars.clone().next() {
        if first.is_uppercase() && second.is_uppercase() {
            return name.to_string();
        }
    }
    let mut out: String = first.to_lowercase().collect();
    out.push_str(chars.as_str());
    out
}

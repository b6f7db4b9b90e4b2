use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;

const SPECIAL_CHARS: [&str; 5] = ["&", "<", ">", "\"", "'"];
const ENTITIES: [&str; 5] = ["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"];

// Built once, shared by every slide writer
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(SPECIAL_CHARS)
        .expect("XML escape patterns are valid")
});

// LeftmostLongest so that "&amp;lt;" decodes to "&lt;" and not "<"
static XML_UNESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(ENTITIES)
        .expect("XML entity patterns are valid")
});

/// Escape XML special characters.
///
/// # Examples
///
/// ```
/// use deckwright::common::xml::escape_xml;
/// assert_eq!(escape_xml("ML & ME"), "ML &amp; ME");
/// assert_eq!(escape_xml("<b>\"Λ\"</b>"), "&lt;b&gt;&quot;Λ&quot;&lt;/b&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    XML_ESCAPER.replace_all(s, &ENTITIES)
}

/// Append `s` to `out` with XML special characters escaped.
///
/// Avoids the intermediate allocation of [`escape_xml`] when building a part
/// into a single buffer.
#[inline]
pub fn push_escaped(out: &mut String, s: &str) {
    let mut last = 0;
    for m in XML_ESCAPER.find_iter(s) {
        out.push_str(&s[last..m.start()]);
        out.push_str(ENTITIES[m.pattern().as_usize()]);
        last = m.end();
    }
    out.push_str(&s[last..]);
}

/// Unescape the five predefined XML entities.
///
/// Unknown or malformed entities are left unchanged.
///
/// ```
/// use deckwright::common::xml::unescape_xml;
/// assert_eq!(unescape_xml("&lt;a &amp; b&gt;"), "<a & b>");
/// assert_eq!(unescape_xml("&amp;lt;"), "&lt;");
/// assert_eq!(unescape_xml("&invalid;"), "&invalid;");
/// ```
#[inline]
pub fn unescape_xml(s: &str) -> String {
    XML_UNESCAPER.replace_all(s, &SPECIAL_CHARS)
}

/// Characters XML 1.0 cannot carry in element content, plus `\r` which
/// parsers normalize away.
#[inline]
fn is_restricted_char(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{B}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}')
}

/// Code point of a leading `_xHHHH_` sequence.
fn hex_escape_at(s: &str) -> Option<u32> {
    let bytes = s.as_bytes();
    if bytes.len() < 7 || !bytes.starts_with(b"_x") || bytes[6] != b'_' {
        return None;
    }
    if !bytes[2..6].iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    u32::from_str_radix(&s[2..6], 16).ok()
}

/// Append `s` as OOXML string content (`ST_Xstring`).
///
/// Besides the five predefined entities, characters XML cannot carry are
/// written as `_xHHHH_`, and an underscore that would otherwise start such
/// a sequence is written as `_x005F_`.
///
/// ```
/// use deckwright::common::xml::{push_escaped_text, unescape_text};
/// let mut out = String::new();
/// push_escaped_text(&mut out, "a\u{1}b & _x0041_");
/// assert_eq!(out, "a_x0001_b &amp; _x005F_x0041_");
/// assert_eq!(unescape_text("a_x0001_b & _x005F_x0041_"), "a\u{1}b & _x0041_");
/// ```
pub fn push_escaped_text(out: &mut String, s: &str) {
    let mut last = 0;
    for (i, c) in s.char_indices() {
        if is_restricted_char(c) || (c == '_' && hex_escape_at(&s[i..]).is_some()) {
            push_escaped(out, &s[last..i]);
            out.push_str(&format!("_x{:04X}_", c as u32));
            last = i + c.len_utf8();
        }
    }
    push_escaped(out, &s[last..]);
}

/// Decode the `_xHHHH_` sequences written by [`push_escaped_text`].
///
/// Sequences that do not name a valid character are left unchanged.
pub fn unescape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find("_x") {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match hex_escape_at(tail).and_then(char::from_u32) {
            Some(c) => {
                out.push(c);
                rest = &tail[7..];
            },
            None => {
                out.push_str("_x");
                rest = &tail[2..];
            },
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_escaped_matches_escape_xml() {
        let input = "Score = −log L + Λ Σ w_i b_i^2 & <more> 'quoted' \"text\"";
        let mut out = String::from("<a:t>");
        push_escaped(&mut out, input);
        assert_eq!(out, format!("<a:t>{}", escape_xml(input)));
    }

    #[test]
    fn test_unescape_reverses_escape() {
        let input = "Λ→∞ → Minimum Evolution & 'phases'";
        assert_eq!(unescape_xml(&escape_xml(input)), input);
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(escape_xml("Motivation"), "Motivation");
        assert_eq!(unescape_xml("Motivation"), "Motivation");
    }

    #[test]
    fn test_restricted_chars_encoded() {
        let input = "T\u{B}x\u{1}\r\tend";
        let mut out = String::new();
        push_escaped_text(&mut out, input);
        assert_eq!(out, "T_x000B_x_x0001__x000D_\tend");
        assert!(!out.chars().any(is_restricted_char));
        assert_eq!(unescape_text(&out), input);
    }

    #[test]
    fn test_literal_escape_sequence_survives() {
        let input = "w_i b_i^2 _x0041_ _x12";
        let mut out = String::new();
        push_escaped_text(&mut out, input);
        assert_eq!(out, "w_i b_i^2 _x005F_x0041_ _x12");
        assert_eq!(unescape_text(&out), input);
    }

    #[test]
    fn test_unescape_text_ignores_invalid_sequences() {
        assert_eq!(unescape_text("_xD800_ _xZZZZ_ _x"), "_xD800_ _xZZZZ_ _x");
    }
}

//! Removal of characters XML 1.0 does not allow.

/// Predefined entities that stay as they are.
const PREDEFINED_ENTITIES: &[&str] = &["amp", "lt", "gt", "apos", "quot"];

/// `Char ::= #x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]`
pub fn is_xml_char(c: char) -> bool {
    matches!(
        c as u32,
        0x09 | 0x0A | 0x0D | 0x20..=0xD7FF | 0xE000..=0xFFFD | 0x10000..=0x10FFFF
    )
}

/// Sections copied through without reference handling: `(opener, terminator)`.
const VERBATIM_SECTIONS: &[(&str, &str)] = &[("<![CDATA[", "]]>"), ("<!--", "-->")];

/// Longest reference body considered (`#x10FFFF`, `quot` and friends fit easily).
const MAX_REFERENCE_LEN: usize = 32;

/// Make a vendor document parseable.
///
/// - raw characters outside the XML 1.0 `Char` production are deleted;
/// - numeric character references (`&#4;`, `&#x1F;`) to such characters are deleted;
/// - an `&` that does not start a predefined entity or a numeric reference
///   is escaped to `&amp;`.
///
/// CDATA sections and comments are copied as they are, minus raw forbidden
/// characters. Everything else is copied through unchanged. Never fails.
pub fn sanitize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(c) = rest.chars().next() {
        if c == '<' {
            if let Some(len) = copy_verbatim_section(rest, &mut out) {
                rest = &rest[len..];
                continue;
            }
        }
        if c == '&' {
            match classify_reference(rest) {
                Reference::Keep(len) => {
                    out.push_str(&rest[..len]);
                    rest = &rest[len..];
                }
                Reference::Drop(len) => rest = &rest[len..],
                Reference::Bare => {
                    out.push_str("&amp;");
                    rest = &rest[1..];
                }
            }
            continue;
        }
        if is_xml_char(c) {
            out.push(c);
        }
        rest = &rest[c.len_utf8()..];
    }
    out
}

/// Copy the CDATA section or comment starting at `s` into `out`, minus
/// forbidden characters, and return the bytes consumed. The terminator is
/// matched on the filtered text; an unterminated section runs to the end.
fn copy_verbatim_section(s: &str, out: &mut String) -> Option<usize> {
    let &(open, close) = VERBATIM_SECTIONS
        .iter()
        .find(|(open, _)| s.starts_with(*open))?;
    out.push_str(open);
    let body_start = out.len();
    for (i, c) in s[open.len()..].char_indices() {
        if !is_xml_char(c) {
            continue;
        }
        out.push(c);
        if out[body_start..].ends_with(close) {
            return Some(open.len() + i + c.len_utf8());
        }
    }
    Some(s.len())
}

enum Reference {
    /// A valid reference of this many bytes.
    Keep(usize),
    /// A numeric reference to a forbidden character, this many bytes.
    Drop(usize),
    /// Not a reference at all.
    Bare,
}

/// Classify the reference starting at `s` (which begins with `&`).
///
/// Only the next [`MAX_REFERENCE_LEN`] bytes are looked at. Markup or
/// whitespace ends the search.
fn classify_reference(s: &str) -> Reference {
    let end = s
        .bytes()
        .enumerate()
        .skip(1)
        .take(MAX_REFERENCE_LEN + 1)
        .find(|(_, b)| matches!(b, b';' | b'<' | b'&') || b.is_ascii_whitespace())
        .and_then(|(i, b)| (b == b';').then_some(i));
    let Some(end) = end else {
        return Reference::Bare;
    };
    let body = &s[1..end];
    let len = end + 1;

    if let Some(num) = body.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) if is_digits(hex, 16) => u32::from_str_radix(hex, 16).ok(),
            None if is_digits(num, 10) => num.parse::<u32>().ok(),
            _ => return Reference::Bare,
        };
        return match code.and_then(char::from_u32) {
            Some(c) if is_xml_char(c) => Reference::Keep(len),
            _ => Reference::Drop(len),
        };
    }

    if PREDEFINED_ENTITIES.contains(&body) {
        Reference::Keep(len)
    } else {
        Reference::Bare
    }
}

fn is_digits(s: &str, radix: u32) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_digit(radix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_control_references() {
        assert_eq!(sanitize("<A>x&#4;y</A>"), "<A>xy</A>");
        assert_eq!(sanitize("<A>&#x1F;&#x0;z</A>"), "<A>z</A>");
        assert_eq!(sanitize("<A>&#0;&#8;&#11;&#12;&#31;</A>"), "<A></A>");
    }

    #[test]
    fn keeps_legal_references() {
        let s = "<A>a&#9;b&#10;c&#13;&#233;&#x20AC;&amp;&lt;&gt;&quot;&apos;</A>";
        assert_eq!(sanitize(s), s);
    }

    #[test]
    fn strips_raw_control_chars() {
        assert_eq!(sanitize("<A>a\u{0}b\u{4}c\u{1F}d</A>"), "<A>abcd</A>");
        assert_eq!(sanitize("<A>\t\r\n</A>"), "<A>\t\r\n</A>");
        assert_eq!(sanitize("<A>\u{FFFE}\u{FFFF}</A>"), "<A></A>");
    }

    #[test]
    fn keeps_supplementary_plane() {
        assert_eq!(sanitize("<A>\u{1F600}</A>"), "<A>\u{1F600}</A>");
    }

    #[test]
    fn escapes_bare_ampersand() {
        assert_eq!(sanitize("<A>R&D</A>"), "<A>R&amp;D</A>");
        assert_eq!(sanitize("<A>Smith & Sons</A>"), "<A>Smith &amp; Sons</A>");
        assert_eq!(sanitize("<A>&nbsp;</A>"), "<A>&amp;nbsp;</A>");
        assert_eq!(sanitize("<A>&#;</A>"), "<A>&amp;#;</A>");
        assert_eq!(sanitize("<A>&</A>"), "<A>&amp;</A>");
    }

    #[test]
    fn out_of_range_reference_is_dropped() {
        assert_eq!(sanitize("<A>&#xD800;&#99999999999;</A>"), "<A></A>");
    }

    #[test]
    fn cdata_and_comments_are_copied() {
        assert_eq!(
            sanitize("<A><![CDATA[R&D &#4; x]]></A>"),
            "<A><![CDATA[R&D &#4; x]]></A>"
        );
        assert_eq!(
            sanitize("<A><!-- a & b --><![CDATA[\u{1}y]]>&#4;</A>"),
            "<A><!-- a & b --><![CDATA[y]]></A>"
        );
        assert_eq!(sanitize("<A><![CDATA[open & "), "<A><![CDATA[open & ");
    }

    #[test]
    fn terminator_split_by_control_char_is_idempotent() {
        let once = sanitize("<A><!-- x -\u{1}-> & </A>");
        assert_eq!(once, "<A><!-- x --> &amp; </A>");
        assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn reference_scan_stops_at_markup_and_whitespace() {
        assert_eq!(sanitize("<A>a & b;</A>"), "<A>a &amp; b;</A>");
        assert_eq!(sanitize("<A>&amp</A><B>;</B>"), "<A>&amp;amp</A><B>;</B>");
        let long = format!("<A>&{};</A>", "x".repeat(40));
        assert_eq!(sanitize(&long), format!("<A>&amp;{};</A>", "x".repeat(40)));
    }

    #[test]
    fn many_bare_ampersands() {
        let raw = format!("<A>{}</A>;", "& ".repeat(10_000));
        let clean = sanitize(&raw);
        assert_eq!(clean.matches("&amp;").count(), 10_000);
    }

    #[test]
    fn empty_input() {
        assert_eq!(sanitize(""), "");
    }
}

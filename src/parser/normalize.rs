// src/parser/normalize.rs

//! Raw text normalization ahead of line classification.

/// Cut everything up to and including the boilerplate marker.
///
/// Readability proxies prepend headers and metadata terminated by a
/// known marker line; only the text after the first occurrence is menu
/// content. Without the marker the input passes through untouched.
pub fn strip_boilerplate<'a>(text: &'a str, marker: &str) -> &'a str {
    match text.find(marker) {
        Some(idx) => &text[idx + marker.len()..],
        None => text,
    }
}

/// Normalize whitespace variants the document source emits.
///
/// Carriage returns and zero-width spaces are dropped, non-breaking
/// spaces become plain spaces.
pub fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\r' | '\u{200B}' => {}
            '\u{00A0}' => out.push(' '),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_boilerplate_keeps_remainder() {
        let text = "Title: Meny\nMarkdown Content:\nPizza\n";
        assert_eq!(strip_boilerplate(text, "Markdown Content:"), "\nPizza\n");
    }

    #[test]
    fn test_strip_boilerplate_without_marker() {
        let text = "Pizza\nMargherita";
        assert_eq!(strip_boilerplate(text, "Markdown Content:"), text);
    }

    #[test]
    fn test_strip_boilerplate_first_occurrence_wins() {
        let text = "junk MARK rest MARK tail";
        assert_eq!(strip_boilerplate(text, "MARK"), " rest MARK tail");
    }

    #[test]
    fn test_normalize_whitespace_variants() {
        let text = "a\u{00A0}b\u{200B}c\r\nd";
        assert_eq!(normalize_whitespace(text), "a bc\nd");
    }
}

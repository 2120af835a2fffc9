//! Sanitization primitives
//!
//! Small, pure transforms composed by the validator's per-type
//! sanitizers. Each takes a string slice and returns the cleaned value.

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    // C0 controls (minus \t \n \r), DEL, and C1 controls.
    static ref CONTROL_RANGES: Regex =
        Regex::new("[\\x00-\\x08\\x0B\\x0C\\x0E-\\x1F\\x7F\u{80}-\u{9F}]").unwrap();
    static ref WHITESPACE_RUNS: Regex = Regex::new(r"\s+").unwrap();
}

/// Encode HTML special characters to prevent markup injection.
/// `&` is replaced first so entities are not double-escaped.
pub fn escape_html(input: &str) -> String {
    let mut result = input.replace('&', "&amp;");
    result = result.replace('<', "&lt;");
    result = result.replace('>', "&gt;");
    result = result.replace('"', "&quot;");
    result.replace('\'', "&#39;")
}

/// Remove control characters, keeping newline, tab, and carriage return
pub fn strip_control_chars(input: &str) -> String {
    input
        .chars()
        .filter(|&c| !c.is_control() || c == '\n' || c == '\t' || c == '\r')
        .collect()
}

/// Remove the residual control ranges left after Unicode normalization
pub fn strip_control_ranges(input: &str) -> String {
    CONTROL_RANGES.replace_all(input, "").to_string()
}

/// Apply Unicode compatibility composition (NFKC)
pub fn normalize_nfkc(input: &str) -> String {
    input.nfkc().collect()
}

/// Collapse internal whitespace runs into single spaces
pub fn collapse_whitespace(input: &str) -> String {
    WHITESPACE_RUNS.replace_all(input, " ").to_string()
}

/// Keep only the characters allowed in a person or company name:
/// letters, spaces, hyphens, apostrophes, and periods
pub fn retain_name_chars(input: &str) -> String {
    input
        .chars()
        .filter(|&c| c.is_ascii_alphabetic() || c.is_whitespace() || matches!(c, '-' | '.' | '\''))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("Test <b>\"quotes\"</b> & 'apostrophe'"),
            "Test &lt;b&gt;&quot;quotes&quot;&lt;/b&gt; &amp; &#39;apostrophe&#39;"
        );
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn test_escape_html_no_double_escape() {
        // An ampersand already present is still escaped exactly once.
        assert_eq!(escape_html("a & b"), "a &amp; b");
    }

    #[test]
    fn test_strip_control_chars() {
        assert_eq!(strip_control_chars("Hello\u{0000}World"), "HelloWorld");
        assert_eq!(strip_control_chars("line1\nline2\tend\r"), "line1\nline2\tend\r");
    }

    #[test]
    fn test_strip_control_ranges() {
        assert_eq!(strip_control_ranges("a\u{0007}b\u{009F}c"), "abc");
        assert_eq!(strip_control_ranges("clean"), "clean");
    }

    #[test]
    fn test_normalize_nfkc() {
        // Fullwidth forms compose to ASCII under NFKC.
        assert_eq!(normalize_nfkc("ＡＢＣ"), "ABC");
        // Combining accent composes into a single code point.
        assert_eq!(normalize_nfkc("cafe\u{0301}"), "café");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("John   Ronald  Reuel"), "John Ronald Reuel");
        assert_eq!(collapse_whitespace("already clean"), "already clean");
    }

    #[test]
    fn test_retain_name_chars() {
        assert_eq!(retain_name_chars("John O'Brien"), "John O'Brien");
        assert_eq!(retain_name_chars("Dr. Anne-Marie"), "Dr. Anne-Marie");
        assert_eq!(retain_name_chars("Rob3rt#"), "Robrt");
    }
}

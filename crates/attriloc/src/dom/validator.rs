// ABOUTME: Syntactic HTML prefix check used to screen pipeline input.
// ABOUTME: Accepts text whose first meaningful token looks like an opening tag.

use once_cell::sync::Lazy;
use regex::Regex;

// A tag token: "<", then quoted strings or non-'>'/non-quote characters, then ">".
static TAG_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^<("[^"]*"|'[^']*'|[^'">])*>"#).unwrap());

/// Returns true if the text begins with a well-formed tag token.
///
/// This is a prefix check, not full validation: it accepts anything whose
/// first token parses as an opening tag and rejects plain text input.
pub fn is_html(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    TAG_PREFIX_RE.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_not_html() {
        assert!(!is_html(""));
    }

    #[test]
    fn plain_text_is_not_html() {
        assert!(!is_html("just text"));
        assert!(!is_html("price: 3 < 5"));
    }

    #[test]
    fn leading_tag_is_html() {
        assert!(is_html("<div>x</div>"));
        assert!(is_html("<!DOCTYPE html><html></html>"));
        assert!(is_html(r#"<img src="a.jpg">"#));
    }

    #[test]
    fn quoted_angle_bracket_inside_attribute() {
        assert!(is_html(r#"<div data-label="a > b">x</div>"#));
    }

    #[test]
    fn unclosed_tag_is_not_html() {
        assert!(!is_html("<div"));
    }
}

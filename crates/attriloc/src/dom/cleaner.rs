// ABOUTME: HTML cleaner that strips noise tags, style attributes, and structural wrappers.
// ABOUTME: Serializes a cleaned document in one walk over the parsed tree.

//! Noise removal applied before the inference step.
//!
//! Three rules, applied in a single serialization pass:
//! - `script`, `style`, `a`, `svg` are dropped together with their subtrees;
//! - the `style` attribute is dropped from every remaining element;
//! - structural wrapper tags (`div`, `span`, `ul`, ...) are unwrapped: the tag
//!   is omitted but its children are emitted in place, preserving document
//!   order and text content.
//!
//! The resolver deliberately works on the *original* input, not the cleaned
//! output, since unwrapping may remove the very nodes that held a value.

use scraper::Html;

// Tags removed together with all descendants.
const REMOVE_TAGS: &[&str] = &["script", "style", "a", "svg"];

// Structural wrappers removed while keeping their children in place.
const UNWRAP_TAGS: &[&str] = &[
    "div", "span", "header", "footer", "nav", "aside", "form", "iframe", "noscript", "input",
    "textarea", "button", "ul",
];

/// Clean an HTML document, returning the cleaned markup.
pub fn clean_html(html: &str) -> String {
    let doc = Html::parse_document(html);
    let mut out = String::new();
    for child in doc.tree.root().children() {
        serialize_clean(child, &mut out);
    }
    out
}

fn serialize_clean(node: ego_tree::NodeRef<scraper::Node>, out: &mut String) {
    match node.value() {
        scraper::Node::Text(t) => out.push_str(&escape_text(&**t)),
        scraper::Node::Element(el) => {
            let name = el.name();
            if REMOVE_TAGS.contains(&name) {
                return;
            }
            if UNWRAP_TAGS.contains(&name) {
                for child in node.children() {
                    serialize_clean(child, out);
                }
                return;
            }

            out.push('<');
            out.push_str(name);
            for (k, v) in el.attrs() {
                if k.eq_ignore_ascii_case("style") {
                    continue;
                }
                out.push(' ');
                out.push_str(k);
                out.push_str("=\"");
                out.push_str(&escape_attr(v));
                out.push('"');
            }

            if is_void_element(name) {
                out.push_str(" />");
                return;
            }

            out.push('>');
            for child in node.children() {
                serialize_clean(child, out);
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        scraper::Node::Comment(c) => {
            out.push_str("<!--");
            out.push_str(&**c);
            out.push_str("-->");
        }
        scraper::Node::Doctype(d) => {
            out.push_str("<!DOCTYPE ");
            out.push_str(&d.name());
            out.push('>');
        }
        _ => {}
    }
}

/// Escape text content for re-serialization.
fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape attribute value.
fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Check if tag is a void element.
fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

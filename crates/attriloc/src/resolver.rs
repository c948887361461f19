// ABOUTME: The core selector/xpath resolver locating attribute values in two parse trees.
// ABOUTME: Builds positional CSS paths from scraper and positional XPaths from dom_query.

//! Selector and XPath resolution.
//!
//! The resolver holds two independent parses of the same original (uncleaned)
//! document: a `scraper` tree used for text/attribute search and CSS path
//! construction, and a `dom_query` tree used for XPath construction. The two
//! parsers may tokenize whitespace, self-closing tags, or malformed markup
//! differently, so a match in one tree is not guaranteed a counterpart in the
//! other; when the xpath-side query comes up empty the literal placeholder
//! `"inferred"` is reported while the CSS selector found in the search tree is
//! kept.
//!
//! Numbering schemes intentionally differ between the two paths: CSS segments
//! use the 1-based rank among same-tag siblings (`nth-of-type`), XPath
//! segments use 1 + the count of preceding siblings of any tag, comments
//! included. Downstream consumers may depend on either convention.

use dom_query::{Document, Selection};
use scraper::{ElementRef, Html};

use crate::dom::validator::is_html;
use crate::error::ExtractError;
use crate::record::{
    AttributeRecord, AttributeValue, LocatorEntry, LocatorRecord, SelectorPair, XPATH_INFERRED,
};

/// Resolves attribute values to CSS selectors and XPaths against one document.
///
/// Request-scoped: parse once, resolve once, discard. All lookups use exact
/// string equality — no trimming, no case folding. A value the inference step
/// reworded rather than copied verbatim will simply not match.
pub struct SelectorResolver {
    search_tree: Html,
    xpath_tree: Document,
}

impl SelectorResolver {
    /// Parse the original (uncleaned) document into both tree representations.
    ///
    /// Non-HTML input is rejected here; the HTML parsers themselves are total,
    /// so this prefix check is the screening point for garbage reaching the
    /// resolver.
    pub fn new(html: &str) -> Result<Self, ExtractError> {
        if !is_html(html) {
            return Err(ExtractError::invalid_html(
                "Resolve",
                Some(anyhow::anyhow!("input does not start with a tag token")),
            ));
        }
        Ok(Self {
            search_tree: Html::parse_document(html),
            xpath_tree: Document::from(html),
        })
    }

    /// Resolve every attribute in the record to a locator entry.
    ///
    /// Missing values yield the `Not Found` pair unconditionally; list values
    /// yield one entry per item, index-aligned, never skipping a position.
    pub fn resolve(&self, attributes: &AttributeRecord) -> LocatorRecord {
        LocatorRecord {
            product_name: self.resolve_value(&attributes.product_name),
            product_price: self.resolve_value(&attributes.product_price),
            product_description: self.resolve_value(&attributes.product_description),
            product_images: self.resolve_value(&attributes.product_images),
            product_category: self.resolve_value(&attributes.product_category),
            brand_name: self.resolve_value(&attributes.brand_name),
        }
    }

    fn resolve_value(&self, value: &AttributeValue) -> LocatorEntry {
        match value {
            AttributeValue::Missing => LocatorEntry::One(SelectorPair::not_found()),
            AttributeValue::Text(text) => LocatorEntry::One(self.resolve_scalar(text)),
            AttributeValue::List(items) => LocatorEntry::Many(
                items.iter().map(|item| self.resolve_src(item)).collect(),
            ),
        }
    }

    /// Locate a scalar value by exact text-node match.
    fn resolve_scalar(&self, value: &str) -> SelectorPair {
        let Some(element) = self.find_text_parent(value) else {
            return SelectorPair::unmatched();
        };
        let css_selector = css_path(element);
        let xpath = match self.query_text(value) {
            Some(selection) => xpath_of(&selection),
            None => XPATH_INFERRED.to_string(),
        };
        SelectorPair::found(css_selector, xpath)
    }

    /// Locate a list item by exact `src` attribute match.
    fn resolve_src(&self, item: &str) -> SelectorPair {
        let Some(element) = self.find_src_element(item) else {
            return SelectorPair::unmatched();
        };
        let css_selector = css_path(element);
        let xpath = match self.query_src(item) {
            Some(selection) => xpath_of(&selection),
            None => XPATH_INFERRED.to_string(),
        };
        SelectorPair::found(css_selector, xpath)
    }

    /// First text node in document order equal to `value`; returns its parent
    /// element.
    fn find_text_parent(&self, value: &str) -> Option<ElementRef<'_>> {
        for node in self.search_tree.tree.root().descendants() {
            if let scraper::Node::Text(text) = node.value() {
                if &**text == value {
                    return node.parent().and_then(ElementRef::wrap);
                }
            }
        }
        None
    }

    /// First element in document order whose `src` attribute equals `src`.
    fn find_src_element(&self, src: &str) -> Option<ElementRef<'_>> {
        self.search_tree
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().attr("src") == Some(src))
    }

    /// First element in the xpath tree with a direct text child equal to
    /// `value`.
    fn query_text(&self, value: &str) -> Option<Selection<'_>> {
        let all = self.xpath_tree.select("*");
        let node = all
            .nodes()
            .iter()
            .copied()
            .find(|n| {
                n.children()
                    .into_iter()
                    .any(|child| child.is_text() && &*child.text() == value)
            })?;
        Some(Selection::from(node))
    }

    /// First element in the xpath tree whose `src` attribute equals `src`.
    fn query_src(&self, src: &str) -> Option<Selection<'_>> {
        let all = self.xpath_tree.select("*");
        let node = all
            .nodes()
            .iter()
            .copied()
            .find(|n| Selection::from(*n).attr("src").is_some_and(|v| &*v == src))?;
        Some(Selection::from(node))
    }
}

/// Build the positional CSS path from an element up to the document root.
///
/// Per level: `tag:nth-of-type(k)` when the parent holds more than one child
/// of the same tag, bare `tag` otherwise. Segments are joined root-to-leaf
/// with `" > "`.
fn css_path(element: ElementRef) -> String {
    let mut segments: Vec<String> = Vec::new();
    let mut current = element;
    loop {
        let name = current.value().name();
        let parent = current.parent().and_then(ElementRef::wrap);
        let segment = match parent {
            Some(parent_el) => {
                let same_tag: Vec<ElementRef> = parent_el
                    .children()
                    .filter_map(ElementRef::wrap)
                    .filter(|sibling| sibling.value().name() == name)
                    .collect();
                if same_tag.len() > 1 {
                    let rank = same_tag
                        .iter()
                        .position(|sibling| sibling.id() == current.id())
                        .map_or(1, |i| i + 1);
                    format!("{}:nth-of-type({})", name, rank)
                } else {
                    name.to_string()
                }
            }
            None => name.to_string(),
        };
        segments.push(segment);
        match parent {
            Some(parent_el) => current = parent_el,
            None => break,
        }
    }
    segments.reverse();
    segments.retain(|s| !s.is_empty());
    segments.join(" > ")
}

/// Build the absolute XPath for the first node of a selection.
///
/// Per element level: `tag[k]` where k is 1 + the count of preceding sibling
/// nodes of any tag, comments included; text siblings carry no position and
/// are skipped. Non-element ancestors contribute no segment.
fn xpath_of(selection: &Selection) -> String {
    let Some(first) = selection.nodes().first() else {
        return XPATH_INFERRED.to_string();
    };
    let mut segments: Vec<String> = Vec::new();
    let mut current = Some(*first);
    while let Some(node) = current {
        if node.is_element() {
            if let Some(name) = node.node_name() {
                let mut index = 1usize;
                if let Some(parent) = node.parent() {
                    for sibling in parent.children() {
                        if sibling.id == node.id {
                            break;
                        }
                        if sibling.is_element() || sibling.is_comment() {
                            index += 1;
                        }
                    }
                }
                segments.push(format!("{}[{}]", name.to_lowercase(), index));
            }
        }
        current = node.parent();
    }
    segments.reverse();
    format!("/{}", segments.join("/"))
}

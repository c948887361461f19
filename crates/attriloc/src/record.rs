// ABOUTME: Data model for attribute records, selector pairs, and locator records.
// ABOUTME: Handles the "None" wire sentinel via an explicit Missing variant on AttributeValue.

//! Record types flowing through the pipeline.
//!
//! The inference side speaks a JSON dialect where an absent attribute is the
//! literal string `"None"`. Internally that sentinel is an explicit
//! [`AttributeValue::Missing`] variant; it is restored on serialization so the
//! wire shape round-trips unchanged.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Placeholder emitted for attributes whose value is missing from the record.
pub const NOT_FOUND: &str = "Not Found";
/// Placeholder emitted when a present value cannot be located in the document.
pub const NO_CSS_SELECTOR: &str = "No CSS Selector Found";
/// Placeholder emitted alongside [`NO_CSS_SELECTOR`].
pub const NO_XPATH: &str = "No XPath Found";
/// Placeholder emitted when the search tree located a node but the xpath tree
/// found no counterpart for the same value.
pub const XPATH_INFERRED: &str = "inferred";

/// A single attribute value as produced by the inference step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// The attribute was not present and could not be inferred.
    Missing,
    /// A scalar string value.
    Text(String),
    /// An ordered list of strings (image URLs).
    List(Vec<String>),
}

impl AttributeValue {
    /// Returns true for the Missing variant.
    pub fn is_missing(&self) -> bool {
        matches!(self, AttributeValue::Missing)
    }

    /// Returns the scalar text, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the list items, if any.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            AttributeValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AttributeValue::Missing => serializer.serialize_str("None"),
            AttributeValue::Text(s) => serializer.serialize_str(s),
            AttributeValue::List(items) => items.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // A list containing non-string items must fail here rather than be
        // silently coerced.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            List(Vec<String>),
        }

        match Raw::deserialize(deserializer) {
            Ok(Raw::Text(s)) if s == "None" => Ok(AttributeValue::Missing),
            Ok(Raw::Text(s)) => Ok(AttributeValue::Text(s)),
            Ok(Raw::List(items)) => Ok(AttributeValue::List(items)),
            Err(_) => Err(D::Error::custom(
                "attribute value must be a string or a list of strings",
            )),
        }
    }
}

/// The fixed-schema attribute record produced by the inference step.
///
/// Every key is required; a record missing one fails deserialization, which
/// the caller surfaces as a malformed-record error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRecord {
    pub product_name: AttributeValue,
    pub product_price: AttributeValue,
    pub product_description: AttributeValue,
    pub product_images: AttributeValue,
    pub product_category: AttributeValue,
    pub brand_name: AttributeValue,
}

/// A CSS selector / XPath pair locating one value in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorPair {
    pub css_selector: String,
    pub xpath: String,
}

impl SelectorPair {
    /// A pair locating a matched node.
    pub fn found(css_selector: impl Into<String>, xpath: impl Into<String>) -> Self {
        Self {
            css_selector: css_selector.into(),
            xpath: xpath.into(),
        }
    }

    /// The placeholder pair for a missing attribute value.
    pub fn not_found() -> Self {
        Self {
            css_selector: NOT_FOUND.to_string(),
            xpath: NOT_FOUND.to_string(),
        }
    }

    /// The placeholder pair for a value present in the record but absent from
    /// the document.
    pub fn unmatched() -> Self {
        Self {
            css_selector: NO_CSS_SELECTOR.to_string(),
            xpath: NO_XPATH.to_string(),
        }
    }
}

/// A locator for one attribute: a single pair for scalars, an index-aligned
/// list of pairs for list-typed attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocatorEntry {
    One(SelectorPair),
    Many(Vec<SelectorPair>),
}

/// The per-attribute locator record; keys mirror [`AttributeRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatorRecord {
    pub product_name: LocatorEntry,
    pub product_price: LocatorEntry,
    pub product_description: LocatorEntry,
    pub product_images: LocatorEntry,
    pub product_category: LocatorEntry,
    pub brand_name: LocatorEntry,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record_json() -> serde_json::Value {
        serde_json::json!({
            "product_name": "Widget",
            "product_price": "$9.99",
            "product_description": "None",
            "product_images": ["a.jpg", "b.jpg"],
            "product_category": "Gadgets",
            "brand_name": "None"
        })
    }

    #[test]
    fn deserializes_sentinel_as_missing() {
        let record: AttributeRecord = serde_json::from_value(record_json()).unwrap();
        assert_eq!(record.product_name, AttributeValue::Text("Widget".into()));
        assert_eq!(record.product_description, AttributeValue::Missing);
        assert_eq!(
            record.product_images,
            AttributeValue::List(vec!["a.jpg".into(), "b.jpg".into()])
        );
    }

    #[test]
    fn serializes_missing_as_sentinel() {
        let record: AttributeRecord = serde_json::from_value(record_json()).unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, record_json());
    }

    #[test]
    fn missing_key_fails() {
        let mut value = record_json();
        value.as_object_mut().unwrap().remove("brand_name");
        assert!(serde_json::from_value::<AttributeRecord>(value).is_err());
    }

    #[test]
    fn non_string_list_item_fails() {
        let mut value = record_json();
        value["product_images"] = serde_json::json!(["a.jpg", 42]);
        assert!(serde_json::from_value::<AttributeRecord>(value).is_err());
    }

    #[test]
    fn locator_entry_untagged_shapes() {
        let one = LocatorEntry::One(SelectorPair::not_found());
        let json = serde_json::to_value(&one).unwrap();
        assert_eq!(json["css_selector"], "Not Found");

        let many = LocatorEntry::Many(vec![SelectorPair::unmatched()]);
        let json = serde_json::to_value(&many).unwrap();
        assert_eq!(json[0]["xpath"], "No XPath Found");
    }
}

// ABOUTME: Merge stage zipping attribute values with their resolved locators.
// ABOUTME: Pure structural transformation; no DOM traversal happens here.

use serde::{Deserialize, Serialize};

use crate::record::{AttributeRecord, AttributeValue, LocatorEntry, LocatorRecord, SelectorPair};

/// One attribute value paired with its locator.
///
/// `selectors` is `None` only on the defensive path where a list locator is
/// shorter than the value list, or a scalar locator arrived with a list shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedValue {
    pub value: AttributeValue,
    pub selectors: Option<SelectorPair>,
}

/// A merged entry: a single pair for scalar attributes, an ordered list of
/// pairs for list-typed attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MergedEntry {
    Scalar(MergedValue),
    List(Vec<MergedValue>),
}

/// The final output shape: every attribute key paired with value + locator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub product_name: MergedEntry,
    pub product_price: MergedEntry,
    pub product_description: MergedEntry,
    pub product_images: MergedEntry,
    pub product_category: MergedEntry,
    pub brand_name: MergedEntry,
}

/// Zip an attribute record with its locator record into the final output.
pub fn merge(attributes: &AttributeRecord, locators: &LocatorRecord) -> MergedRecord {
    MergedRecord {
        product_name: merge_entry(&attributes.product_name, &locators.product_name),
        product_price: merge_entry(&attributes.product_price, &locators.product_price),
        product_description: merge_entry(
            &attributes.product_description,
            &locators.product_description,
        ),
        product_images: merge_entry(&attributes.product_images, &locators.product_images),
        product_category: merge_entry(&attributes.product_category, &locators.product_category),
        brand_name: merge_entry(&attributes.brand_name, &locators.brand_name),
    }
}

fn merge_entry(value: &AttributeValue, locator: &LocatorEntry) -> MergedEntry {
    match value {
        AttributeValue::List(items) => {
            let pairs: &[SelectorPair] = match locator {
                LocatorEntry::Many(pairs) => pairs,
                LocatorEntry::One(_) => &[],
            };
            MergedEntry::List(
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| MergedValue {
                        value: AttributeValue::Text(item.clone()),
                        selectors: pairs.get(index).cloned(),
                    })
                    .collect(),
            )
        }
        scalar => MergedEntry::Scalar(MergedValue {
            value: scalar.clone(),
            selectors: match locator {
                LocatorEntry::One(pair) => Some(pair.clone()),
                LocatorEntry::Many(_) => None,
            },
        }),
    }
}

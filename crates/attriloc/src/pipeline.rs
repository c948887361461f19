// ABOUTME: Pipeline orchestration: validate, clean, infer, resolve, merge.
// ABOUTME: Also exposes resolve_selectors for offline use with a pre-computed record.

//! End-to-end extraction pipeline.
//!
//! Stage order matters: inference sees the *cleaned* document (less noise,
//! shorter prompt), while selector resolution runs against the *original*
//! document, because cleaning unwraps the very wrapper elements a selector
//! path may need to pass through.

use crate::dom::cleaner::clean_html;
use crate::dom::validator::is_html;
use crate::error::ExtractError;
use crate::inference::AttributeInferrer;
use crate::merge::{merge, MergedRecord};
use crate::record::{AttributeRecord, LocatorRecord};
use crate::resolver::SelectorResolver;

/// The extraction pipeline, generic over the inference collaborator.
#[derive(Debug, Clone)]
pub struct Pipeline<I> {
    inferrer: I,
}

impl<I: AttributeInferrer> Pipeline<I> {
    /// Create a pipeline around an inference collaborator.
    pub fn new(inferrer: I) -> Self {
        Self { inferrer }
    }

    /// Run the full pipeline on an HTML document.
    ///
    /// Validates the input, cleans it, infers the attribute record from the
    /// cleaned markup, resolves selectors against the original markup, and
    /// merges values with locators into the final output.
    pub async fn extract(&self, html: &str) -> Result<MergedRecord, ExtractError> {
        if !is_html(html) {
            return Err(ExtractError::invalid_html(
                "Extract",
                Some(anyhow::anyhow!("input does not start with a tag token")),
            ));
        }
        let cleaned = clean_html(html);
        let attributes = self.inferrer.infer(&cleaned).await?;
        let locators = resolve_selectors(html, &attributes)?;
        Ok(merge(&attributes, &locators))
    }
}

/// Resolve selectors and XPaths for a pre-computed attribute record.
///
/// This is the offline entry point: no inference happens, so a record
/// obtained elsewhere (or from a previous run) can be re-resolved against
/// the original document.
pub fn resolve_selectors(
    html: &str,
    attributes: &AttributeRecord,
) -> Result<LocatorRecord, ExtractError> {
    let resolver = SelectorResolver::new(html)?;
    Ok(resolver.resolve(attributes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{LocatorEntry, SelectorPair};
    use pretty_assertions::assert_eq;

    struct StubInferrer {
        record: AttributeRecord,
    }

    impl AttributeInferrer for StubInferrer {
        async fn infer(&self, _html: &str) -> Result<AttributeRecord, ExtractError> {
            Ok(self.record.clone())
        }
    }

    struct FailingInferrer;

    impl AttributeInferrer for FailingInferrer {
        async fn infer(&self, _html: &str) -> Result<AttributeRecord, ExtractError> {
            Err(ExtractError::timeout("Infer", None))
        }
    }

    fn stub() -> StubInferrer {
        StubInferrer {
            record: serde_json::from_value(serde_json::json!({
                "product_name": "Widget",
                "product_price": "$9.99",
                "product_description": "None",
                "product_images": ["a.jpg"],
                "product_category": "None",
                "brand_name": "None"
            }))
            .unwrap(),
        }
    }

    const PAGE: &str = concat!(
        "<html><body>",
        "<h1>Widget</h1>",
        r#"<div><p class="price">$9.99</p></div>"#,
        r#"<img src="a.jpg">"#,
        "</body></html>",
    );

    #[tokio::test]
    async fn rejects_non_html_before_inference() {
        let pipeline = Pipeline::new(FailingInferrer);
        let err = pipeline.extract("plain text").await.unwrap_err();
        // Validation fires before the inferrer, so the timeout never happens.
        assert!(err.is_invalid_html());
    }

    #[tokio::test]
    async fn inference_errors_propagate() {
        let pipeline = Pipeline::new(FailingInferrer);
        let err = pipeline.extract(PAGE).await.unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn resolves_against_original_not_cleaned_markup() {
        let pipeline = Pipeline::new(stub());
        let merged = pipeline.extract(PAGE).await.unwrap();
        let json = serde_json::to_value(&merged).unwrap();
        // The price sits under a <div> wrapper the cleaner would unwrap; its
        // selector path must still include intermediate structure from the
        // original document.
        assert_eq!(
            json["product_price"]["selectors"]["css_selector"],
            "html > body > div > p"
        );
        assert_eq!(json["product_name"]["selectors"]["css_selector"], "html > body > h1");
    }

    #[tokio::test]
    async fn merged_output_covers_all_six_keys() {
        let pipeline = Pipeline::new(stub());
        let merged = pipeline.extract(PAGE).await.unwrap();
        let json = serde_json::to_value(&merged).unwrap();
        for key in [
            "product_name",
            "product_price",
            "product_description",
            "product_images",
            "product_category",
            "brand_name",
        ] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(json["product_description"]["value"], "None");
        assert_eq!(
            json["product_description"]["selectors"]["css_selector"],
            "Not Found"
        );
        assert_eq!(json["product_images"][0]["value"], "a.jpg");
    }

    #[test]
    fn offline_resolution_matches_pipeline_resolution() {
        let attributes = stub().record;
        let locators = resolve_selectors(PAGE, &attributes).unwrap();
        match &locators.product_name {
            LocatorEntry::One(pair) => {
                assert_eq!(pair.css_selector, "html > body > h1");
            }
            LocatorEntry::Many(_) => panic!("expected scalar locator"),
        }
        match &locators.product_category {
            LocatorEntry::One(pair) => assert_eq!(pair, &SelectorPair::not_found()),
            LocatorEntry::Many(_) => panic!("expected scalar locator"),
        }
    }

    #[test]
    fn offline_resolution_rejects_non_html() {
        let attributes = stub().record;
        let err = resolve_selectors("not html", &attributes).unwrap_err();
        assert!(err.is_invalid_html());
    }

    #[tokio::test]
    async fn sentinel_fields_stay_missing_through_merge() {
        let pipeline = Pipeline::new(stub());
        let merged = pipeline.extract(PAGE).await.unwrap();
        let json = serde_json::to_value(&merged).unwrap();
        assert_eq!(json["brand_name"]["value"], "None");
    }
}

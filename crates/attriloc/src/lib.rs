// ABOUTME: Main library entry point for the attriloc product attribute locator.
// ABOUTME: Re-exports the public API: Pipeline, InferenceClient, SelectorResolver, records, errors.

//! Attriloc - locate e-commerce product attributes in HTML documents.
//!
//! This crate extracts product attributes (name, price, description, images,
//! category, brand) from an HTML document via a function-calling language
//! model, then reconstructs where each extracted value lives in the markup
//! as a positional CSS selector and an absolute XPath.
//!
//! # Example
//!
//! ```no_run
//! use attriloc::{ExtractError, InferenceClient, Pipeline};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ExtractError> {
//!     let client = InferenceClient::builder()
//!         .endpoint("https://api.example.com/v1/chat/completions")
//!         .model("meta-llama/Llama-3.1-8B-Instruct")
//!         .token("hf_...")
//!         .build();
//!     let pipeline = Pipeline::new(client);
//!     let merged = pipeline.extract("<html>...</html>").await?;
//!     println!("{}", serde_json::to_string_pretty(&merged).unwrap());
//!     Ok(())
//! }
//! ```

pub mod dom;
pub mod error;
pub mod inference;
pub mod merge;
pub mod options;
pub mod pipeline;
pub mod record;
pub mod resolver;

pub use crate::dom::cleaner::clean_html;
pub use crate::dom::validator::is_html;
pub use crate::error::{ErrorCode, ExtractError};
pub use crate::inference::{AttributeInferrer, InferenceClient};
pub use crate::merge::{merge, MergedEntry, MergedRecord, MergedValue};
pub use crate::options::{InferenceClientBuilder, InferenceOptions};
pub use crate::pipeline::{resolve_selectors, Pipeline};
pub use crate::record::{
    AttributeRecord, AttributeValue, LocatorEntry, LocatorRecord, SelectorPair,
};
pub use crate::resolver::SelectorResolver;

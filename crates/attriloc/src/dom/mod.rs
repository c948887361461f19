// ABOUTME: DOM-level preprocessing for the extraction pipeline.
// ABOUTME: Hosts the HTML validator and the noise-stripping cleaner.

//! DOM utilities applied before inference.
//!
//! Submodules:
//! - `validator`: structural check that input text starts with a tag token.
//! - `cleaner`: strips noise tags/attributes and unwraps structural wrappers.

pub mod cleaner;
pub mod validator;

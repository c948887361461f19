// ABOUTME: Attribute inference over a chat-completions API with a function-calling tool schema.
// ABOUTME: Defines the AttributeInferrer trait and the HTTP-backed InferenceClient.

//! Attribute inference.
//!
//! The pipeline treats inference as an opaque collaborator behind the
//! [`AttributeInferrer`] trait: give it cleaned HTML, get back an
//! [`AttributeRecord`]. The default implementation, [`InferenceClient`],
//! posts to an OpenAI-compatible chat-completions endpoint with a single
//! function-calling tool whose parameters mirror the six attribute keys, and
//! reads the record out of the first tool call in the response.
//!
//! The model is instructed to copy attribute values verbatim from the markup
//! wherever they exist; only description, category, and brand may be inferred
//! when absent. Values the model reworded rather than copied will simply fail
//! to resolve to selectors downstream.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ExtractError;
use crate::options::{InferenceClientBuilder, InferenceOptions};
use crate::record::AttributeRecord;

const SYSTEM_PROMPT: &str = "You are an expert in analyzing and parsing HTML content. \
Your expertise lies in identifying and extracting meaningful attributes relevant to e-commerce contexts. \
You should be able to extract attributes such as product name, product price, product description, \
product images, product category, brand name, etc. from the HTML content. \
If the attribute is present, it should be extracted as it is without any modification. \
If product description is missing, generate description of the product by inferring from other attributes. \
The description should be meaningful and relevant to the product. \
If product category is missing, infer it from other attributes. \
If brand name is missing, try to generate brand name from the product name. \
If attributes cannot be generated or inferred then generate 'None' for the missing attributes.";

/// Something that can turn cleaned HTML into an attribute record.
///
/// The pipeline only depends on this trait, so tests can substitute a stub
/// and offline callers can skip the network entirely.
#[allow(async_fn_in_trait)]
pub trait AttributeInferrer {
    async fn infer(&self, html: &str) -> Result<AttributeRecord, ExtractError>;
}

/// HTTP client for a chat-completions endpoint with function calling.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    opts: InferenceOptions,
    http: reqwest::Client,
}

impl InferenceClient {
    /// Create a new InferenceClient with the given options.
    pub fn new(opts: InferenceOptions) -> Self {
        let http = match opts.http_client.clone() {
            Some(client) => client,
            None => reqwest::Client::builder()
                .timeout(opts.timeout)
                .user_agent(opts.user_agent.clone())
                .build()
                .unwrap_or_default(),
        };
        Self { opts, http }
    }

    /// Create a builder for configuring an InferenceClient.
    pub fn builder() -> InferenceClientBuilder {
        InferenceClientBuilder::new()
    }

    /// The options this client was built with.
    pub fn options(&self) -> &InferenceOptions {
        &self.opts
    }

    fn request_body(&self, html: &str) -> Value {
        json!({
            "model": self.opts.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                {
                    "role": "user",
                    "content": format!(
                        "Analyze and parse the following HTML content to extract the different attributes {}",
                        html
                    )
                }
            ],
            "tools": [tool_schema()],
            "tool_choice": "auto",
            "max_tokens": 1000,
            "temperature": 0.0,
            "top_p": 0.9
        })
    }
}

impl AttributeInferrer for InferenceClient {
    async fn infer(&self, html: &str) -> Result<AttributeRecord, ExtractError> {
        let mut request = self
            .http
            .post(&self.opts.endpoint)
            .json(&self.request_body(html));
        if let Some(ref token) = self.opts.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ExtractError::timeout("Infer", Some(e.into()))
            } else {
                ExtractError::inference("Infer", Some(e.into()))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::inference(
                "Infer",
                Some(anyhow::anyhow!("endpoint returned status {}", status)),
            ));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| ExtractError::inference("Infer", Some(e.into())))?;
        parse_record(chat)
    }
}

/// The function-calling tool describing the six attribute keys.
fn tool_schema() -> Value {
    json!({
        "type": "function",
        "function": {
            "name": "extract_ecommerce_attributes",
            "description": "Extract e-commerce attributes from HTML content",
            "parameters": {
                "type": "object",
                "properties": {
                    "product_name": {
                        "type": "string",
                        "description": "The name of the product"
                    },
                    "product_price": {
                        "type": "string",
                        "description": "The price of the product"
                    },
                    "product_description": {
                        "type": "string",
                        "description": "The description of the product"
                    },
                    "product_images": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "The URLs of the images of the product"
                    },
                    "product_category": {
                        "type": "string",
                        "description": "The category in which the product falls into"
                    },
                    "brand_name": {
                        "type": "string",
                        "description": "The name of the brand which produced the product"
                    }
                },
                "required": [
                    "product_name",
                    "product_price",
                    "product_description",
                    "product_images",
                    "product_category",
                    "brand_name"
                ]
            }
        }
    })
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    tool_calls: Vec<ToolCall>,
}

#[derive(Debug, Deserialize)]
struct ToolCall {
    function: FunctionCall,
}

#[derive(Debug, Deserialize)]
struct FunctionCall {
    arguments: Value,
}

/// Extract the attribute record from the first tool call of the first choice.
///
/// `arguments` arrives either as a JSON object or as a JSON-encoded string,
/// depending on the provider; both shapes are accepted.
fn parse_record(chat: ChatResponse) -> Result<AttributeRecord, ExtractError> {
    let call = chat
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.tool_calls.into_iter().next())
        .ok_or_else(|| {
            ExtractError::inference(
                "Infer",
                Some(anyhow::anyhow!("response contained no tool call")),
            )
        })?;

    let parsed = match call.function.arguments {
        Value::String(encoded) => serde_json::from_str(&encoded),
        other => serde_json::from_value(other),
    };
    parsed.map_err(|e| ExtractError::malformed_record("Infer", Some(e.into())))
}

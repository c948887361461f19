// ABOUTME: Configuration options for the inference client including endpoint, model, and timeout.
// ABOUTME: InferenceClientBuilder provides a fluent API for constructing InferenceClient instances.

use std::time::Duration;

use crate::inference::InferenceClient;

/// Configuration options for the inference client.
#[derive(Debug, Clone)]
pub struct InferenceOptions {
    pub endpoint: String,
    pub model: String,
    pub token: Option<String>,
    pub timeout: Duration,
    pub user_agent: String,
    pub http_client: Option<reqwest::Client>,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            token: None,
            timeout: Duration::from_secs(120),
            user_agent: "Attriloc/1.0".to_string(),
            http_client: None,
        }
    }
}

/// Builder for constructing InferenceClient instances with custom configuration.
#[derive(Debug, Clone)]
pub struct InferenceClientBuilder {
    opts: InferenceOptions,
}

impl InferenceClientBuilder {
    /// Create a new InferenceClientBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: InferenceOptions::default(),
        }
    }

    /// Set the chat-completions endpoint URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.opts.endpoint = endpoint.into();
        self
    }

    /// Set the model name sent with each request.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.opts.model = model.into();
        self
    }

    /// Set the bearer token for the Authorization header.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.opts.token = Some(token.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Use a custom HTTP client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Build the InferenceClient with the configured options.
    pub fn build(self) -> InferenceClient {
        InferenceClient::new(self.opts)
    }
}

impl Default for InferenceClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

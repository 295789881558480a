use std::time::Duration;
use serde::{Serialize, Deserialize};
use async_trait::async_trait;
use reqwest::Client;
use log::error;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Groq client for the OpenAI-compatible chat-completions API
#[derive(Debug)]
pub struct Groq {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to the public API)
    endpoint: String,
}

/// Groq chat-completion request
#[derive(Debug, Serialize)]
pub struct GroqRequest {
    /// The model to use
    model: String,

    /// The messages for the conversation
    messages: Vec<GroqMessage>,

    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,

    /// Maximum number of tokens to generate
    max_tokens: u32,
}

/// Chat message format
#[derive(Debug, Serialize, Deserialize)]
pub struct GroqMessage {
    /// Role of the message sender (user, assistant)
    pub role: String,

    /// Content of the message
    pub content: String,
}

/// Token usage information
#[derive(Debug, Deserialize)]
pub struct TokenUsage {
    /// Number of prompt tokens
    pub prompt_tokens: u32,
    /// Number of completion tokens
    pub completion_tokens: u32,
}

/// A single completion choice in a Groq response
#[derive(Debug, Deserialize)]
pub struct GroqChoice {
    /// The generated message
    pub message: GroqMessage,
}

/// Groq chat-completion response
#[derive(Debug, Deserialize)]
pub struct GroqResponse {
    /// The completion choices
    pub choices: Vec<GroqChoice>,
    /// Token usage information
    pub usage: Option<TokenUsage>,
}

impl Default for GroqRequest {
    fn default() -> Self {
        Self {
            model: String::new(),
            messages: Vec::new(),
            temperature: Some(0.7),
            max_tokens: 500,
        }
    }
}

impl GroqRequest {
    /// Create a new Groq request
    pub fn new(model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            max_tokens,
            ..Default::default()
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(GroqMessage {
            role: role.into(),
            content: content.into(),
        });
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

impl Groq {
    /// Create a new Groq client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    fn api_url(&self) -> String {
        if self.endpoint.is_empty() {
            "https://api.groq.com/openai/v1/chat/completions".to_string()
        } else {
            format!(
                "{}/openai/v1/chat/completions",
                self.endpoint.trim_end_matches('/')
            )
        }
    }
}

#[async_trait]
impl Provider for Groq {
    type Request = GroqRequest;
    type Response = GroqResponse;

    /// Complete a chat-completion request
    async fn complete(&self, request: GroqRequest) -> Result<GroqResponse, ProviderError> {
        let response = self.client.post(self.api_url())
            .header("Content-Type", "application/json")
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::ConnectionError(format!("Groq API request timed out: {}", e))
                } else {
                    ProviderError::RequestFailed(format!("Failed to send request to Groq API: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Groq API error ({}): {}", status, error_text);
            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(ProviderError::AuthenticationError(error_text));
            }
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let groq_response = response.json::<GroqResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse Groq API response: {}", e)))?;

        Ok(groq_response)
    }

    /// Test the connection to the Groq API
    async fn test_connection(&self) -> Result<(), ProviderError> {
        let request = GroqRequest::new("llama-3.3-70b-specdec", 10)
            .add_message("user", "Hello");

        self.complete(request).await?;
        Ok(())
    }

    /// Extract text from a Groq response
    fn extract_text(response: &GroqResponse) -> String {
        response.choices.first()
            .map(|c| c.message.content.trim().to_string())
            .unwrap_or_default()
    }
}

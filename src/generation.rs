/*!
 * Generation service: the single seam between the conversation core and the
 * language model.
 *
 * `generate` never fails from the caller's point of view. Any transport,
 * API or timeout error is logged and replaced by a fixed user-facing error
 * text, which the conversation treats as opaque model output.
 */

use std::time::Duration;
use log::{debug, error};
use tokio::time::timeout;

use crate::app_config::{GenerationConfig, GenerationProvider};
use crate::errors::ProviderError;
use crate::providers::Provider;
use crate::providers::groq::{Groq, GroqRequest};
use crate::providers::mock::{MockProvider, MockRequest};

/// Fixed text delivered to the user when generation fails for any reason.
pub const GENERATION_ERROR_TEXT: &str = "❌ The language model could not be reached. Please try again later.";

/// Provider implementation selected from configuration
#[derive(Debug)]
enum GenerationBackend {
    /// Groq hosted API
    Groq {
        /// Groq API client
        client: Groq,
    },
    /// Mock provider (tests only)
    Mock {
        /// Scripted mock client
        client: MockProvider,
    },
}

/// Service that turns a prompt into model-generated text
#[derive(Debug)]
pub struct GenerationService {
    /// Provider implementation
    backend: GenerationBackend,
    /// Model name passed to the provider
    model: String,
    /// Sampling temperature
    temperature: f32,
    /// Completion token budget
    max_tokens: u32,
    /// Upper bound on one generation round trip
    request_timeout: Duration,
}

impl GenerationService {
    /// Create a generation service from configuration
    pub fn from_config(config: &GenerationConfig) -> Self {
        let backend = match config.provider {
            GenerationProvider::Groq => GenerationBackend::Groq {
                client: Groq::new(
                    config.resolved_api_key(),
                    config.endpoint.clone(),
                    config.timeout_secs,
                ),
            },
        };

        Self {
            backend,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            request_timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Create a generation service backed by a mock provider, for tests
    pub fn with_mock(provider: MockProvider) -> Self {
        Self {
            backend: GenerationBackend::Mock { client: provider },
            model: "mock".to_string(),
            temperature: 0.7,
            max_tokens: 500,
            request_timeout: Duration::from_secs(5),
        }
    }

    /// Send a prompt to the model and return its text.
    ///
    /// On any failure the fixed [`GENERATION_ERROR_TEXT`] is returned instead;
    /// callers cannot distinguish it from real content and must not try to.
    pub async fn generate(&self, prompt: &str) -> String {
        debug!("Sending prompt to {} ({} chars)", self.backend_name(), prompt.len());

        match self.complete_with_timeout(prompt).await {
            Ok(text) => text,
            Err(e) => {
                error!("Generation failed: {}", e);
                GENERATION_ERROR_TEXT.to_string()
            }
        }
    }

    /// Check that the configured provider is reachable
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        match &self.backend {
            GenerationBackend::Groq { client } => client.test_connection().await,
            GenerationBackend::Mock { client } => client.test_connection().await,
        }
    }

    fn backend_name(&self) -> &'static str {
        match &self.backend {
            GenerationBackend::Groq { .. } => "groq",
            GenerationBackend::Mock { .. } => "mock",
        }
    }

    async fn complete_with_timeout(&self, prompt: &str) -> Result<String, ProviderError> {
        let timeout_secs = self.request_timeout.as_secs();

        match &self.backend {
            GenerationBackend::Groq { client } => {
                let request = GroqRequest::new(self.model.clone(), self.max_tokens)
                    .temperature(self.temperature)
                    .add_message("user", prompt);

                let response = timeout(self.request_timeout, client.complete(request))
                    .await
                    .map_err(|_| ProviderError::Timeout(timeout_secs))??;

                Ok(Groq::extract_text(&response))
            }
            GenerationBackend::Mock { client } => {
                let request = MockRequest { prompt: prompt.to_string() };

                let response = timeout(self.request_timeout, client.complete(request))
                    .await
                    .map_err(|_| ProviderError::Timeout(timeout_secs))??;

                Ok(MockProvider::extract_text(&response))
            }
        }
    }
}

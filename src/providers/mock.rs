/*!
 * Mock provider implementation for testing.
 *
 * This module provides a mock provider that simulates different behaviors:
 * - `MockProvider::working()` - Always succeeds with a canned completion
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::slow(ms)` - Succeeds after a delay (for timeout testing)
 * - `MockProvider::scripted(...)` - Replays a fixed queue of responses
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Mock request for testing
#[derive(Debug, Clone)]
pub struct MockRequest {
    /// The prompt text sent to the model
    pub prompt: String,
}

/// Mock response for testing
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// The completion text
    pub text: String,
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a canned completion
    Working,
    /// Always fails with an error
    Failing,
    /// Returns an empty response
    Empty,
    /// Simulates a slow response (for timeout testing)
    Slow {
        /// Delay before responding, in milliseconds
        delay_ms: u64,
    },
    /// Replays the scripted response queue, failing when it runs dry
    Scripted,
}

/// Mock provider for testing generation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of completed requests
    request_count: Arc<AtomicUsize>,
    /// Queue of scripted responses
    scripted: Mutex<VecDeque<String>>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            scripted: Mutex::new(VecDeque::new()),
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns empty responses
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create a mock that responds after the given delay
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Create a mock that replays the given responses in order
    pub fn scripted<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let provider = Self::new(MockBehavior::Scripted);
        {
            let mut queue = provider.scripted.lock();
            queue.extend(responses.into_iter().map(|s| s.into()));
        }
        provider
    }

    /// Number of requests completed so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = MockRequest;
    type Response = MockResponse;

    async fn complete(&self, request: MockRequest) -> Result<MockResponse, ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(MockResponse {
                text: format!("[MOCK COMPLETION] {}", request.prompt.lines().next().unwrap_or("")),
            }),
            MockBehavior::Failing => Err(ProviderError::RequestFailed(
                "mock provider configured to fail".to_string(),
            )),
            MockBehavior::Empty => Ok(MockResponse { text: String::new() }),
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
                Ok(MockResponse {
                    text: "[MOCK SLOW COMPLETION]".to_string(),
                })
            }
            MockBehavior::Scripted => {
                let next = self.scripted.lock().pop_front();
                match next {
                    Some(text) => Ok(MockResponse { text }),
                    None => Err(ProviderError::RequestFailed(
                        "scripted mock provider ran out of responses".to_string(),
                    )),
                }
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "mock provider configured to fail".to_string(),
            )),
            _ => Ok(()),
        }
    }

    fn extract_text(response: &MockResponse) -> String {
        response.text.clone()
    }
}

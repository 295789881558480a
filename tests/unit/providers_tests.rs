/*!
 * Tests for provider implementations
 */

use tutorbot::providers::Provider;
use tutorbot::providers::groq::GroqRequest;
use tutorbot::providers::mock::{MockProvider, MockRequest};

/// The Groq request must serialize to the OpenAI-compatible wire shape
#[test]
fn test_groqRequest_whenSerialized_shouldMatchWireFormat() {
    let request = GroqRequest::new("llama-3.3-70b-specdec", 500)
        .temperature(0.7)
        .add_message("user", "Hello");

    let json = serde_json::to_value(&request).expect("serializable request");

    assert_eq!(json["model"], "llama-3.3-70b-specdec");
    assert_eq!(json["max_tokens"], 500);
    assert_eq!(json["messages"][0]["role"], "user");
    assert_eq!(json["messages"][0]["content"], "Hello");
    let temperature = json["temperature"].as_f64().expect("temperature present");
    assert!((temperature - 0.7).abs() < 1e-6);
}

#[tokio::test]
async fn test_mockProvider_withWorkingBehavior_shouldEchoPromptHead() {
    let provider = MockProvider::working();
    let response = provider
        .complete(MockRequest { prompt: "first line\nsecond line".to_string() })
        .await
        .expect("working mock succeeds");

    assert!(response.text.contains("first line"));
    assert!(!response.text.contains("second line"));
}

#[tokio::test]
async fn test_mockProvider_withFailingBehavior_shouldFailCompleteAndConnection() {
    let provider = MockProvider::failing();

    assert!(provider.complete(MockRequest { prompt: "x".to_string() }).await.is_err());
    assert!(provider.test_connection().await.is_err());
}

#[tokio::test]
async fn test_mockProvider_withScriptedQueue_shouldCountRequests() {
    let provider = MockProvider::scripted(["one"]);

    let _ = provider.complete(MockRequest { prompt: "a".to_string() }).await;
    let _ = provider.complete(MockRequest { prompt: "b".to_string() }).await;

    assert_eq!(provider.request_count(), 2);
}

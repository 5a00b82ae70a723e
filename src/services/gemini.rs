use async_trait::async_trait;
use serde_json::{json, Value};

use crate::config::Config;
use crate::models::insight::InsightRequest;
use crate::services::InsightProvider;

/// Gemini `generateContent` client. One attempt per call, bounded by the
/// configured timeout.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.insight_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            model: config.gemini_model.clone(),
            api_key: config.gemini_api_key.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl InsightProvider for GeminiClient {
    async fn generate(&self, request: &InsightRequest) -> anyhow::Result<Option<String>> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&json!({
                "contents": [{
                    "parts": [
                        { "text": request.prompt_text },
                        {
                            "inline_data": {
                                "mime_type": request.mime_type,
                                "data": request.image_data,
                            }
                        }
                    ]
                }]
            }))
            .send()
            .await
            .map_err(|e| e.without_url())?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API error {}: {}", status, body);
        }

        let body: Value = response.json().await.map_err(|e| e.without_url())?;
        tracing::debug!(raw = %body, "Gemini API raw result");

        Ok(first_candidate_text(&body))
    }
}

/// `candidates[0].content.parts[0].text`, if present and non-empty.
fn first_candidate_text(body: &Value) -> Option<String> {
    body["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .filter(|text| !text.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::insight::{request_insight, INSIGHT_ERROR_FALLBACK};
    use std::time::Duration;

    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> InsightRequest {
        InsightRequest {
            prompt_text: "Describe the selfie".into(),
            image_data: "aGVsbG8=".into(),
            mime_type: "image/png".into(),
        }
    }

    fn client_for(server: &MockServer) -> GeminiClient {
        let mut config = Config::for_tests("uploads");
        config.gemini_base_url = server.uri();
        GeminiClient::new(&config).unwrap()
    }

    #[test]
    fn test_first_candidate_text() {
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "text": "{\"mood\":\"calm\"}" }] } }]
        });
        assert_eq!(first_candidate_text(&body).as_deref(), Some("{\"mood\":\"calm\"}"));
        assert_eq!(first_candidate_text(&json!({ "candidates": [] })), None);
        assert_eq!(first_candidate_text(&json!({})), None);
        assert_eq!(
            first_candidate_text(&json!({
                "candidates": [{ "content": { "parts": [{ "text": "" }] } }]
            })),
            None
        );
    }

    #[tokio::test]
    async fn test_generate_sends_prompt_and_inline_image() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-test:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "contents": [{
                    "parts": [
                        { "text": "Describe the selfie" },
                        { "inline_data": { "mime_type": "image/png", "data": "aGVsbG8=" } }
                    ]
                }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "Looks well rested." }] } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server).generate(&request()).await.unwrap();
        assert_eq!(text.as_deref(), Some("Looks well rested."));
    }

    #[tokio::test]
    async fn test_generate_without_candidates_returns_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let text = client_for(&server).generate(&request()).await.unwrap();
        assert!(text.is_none());
    }

    #[tokio::test]
    async fn test_generate_error_status_is_err() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key invalid"))
            .mount(&server)
            .await;

        let err = client_for(&server).generate(&request()).await.unwrap_err();
        assert!(err.to_string().contains("403"));
    }

    #[tokio::test]
    async fn test_connection_error_does_not_expose_api_key() {
        // Nothing listens on port 9.
        let mut config = Config::for_tests("uploads");
        config.gemini_api_key = "SECRET-KEY-123".into();
        let client = GeminiClient::new(&config).unwrap();

        let err = client.generate(&request()).await.unwrap_err();
        assert!(
            !format!("{:#}", err).contains("SECRET-KEY-123"),
            "api key leaked into error: {:#}",
            err
        );
    }

    #[tokio::test]
    async fn test_slow_provider_times_out_into_error_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_secs(3))
                    .set_body_json(json!({
                        "candidates": [{ "content": { "parts": [{ "text": "too late" }] } }]
                    })),
            )
            .mount(&server)
            .await;

        let mut config = Config::for_tests("uploads");
        config.gemini_base_url = server.uri();
        config.insight_timeout_secs = 1;
        let client = GeminiClient::new(&config).unwrap();

        assert!(client.generate(&request()).await.is_err());

        let insight = request_insight(&client, b"img", "image/png", &[]).await;
        assert_eq!(insight, INSIGHT_ERROR_FALLBACK);
    }
}

use base64::{engine::general_purpose, Engine};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ServiceError;
use crate::services::ai_service::{AIService, ImagePayload};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: Blob,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Blob {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Google Gemini `generateContent` client.
pub struct GeminiService {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiService {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Points the client at another host (proxy, local mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ServiceError> {
        self.client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    fn build_request(prompt: &str, image: &ImagePayload) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![
                    Part::Text {
                        text: prompt.to_string(),
                    },
                    Part::InlineData {
                        inline_data: Blob {
                            mime_type: image.mime_type.clone(),
                            data: general_purpose::STANDARD.encode(&image.data),
                        },
                    },
                ],
            }],
        }
    }

    fn extract_text(response: GenerateContentResponse) -> Result<String, ServiceError> {
        let Some(candidate) = response.candidates.into_iter().next() else {
            if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
                return Err(ServiceError::Blocked { reason });
            }
            return Err(ServiceError::EmptyResponse);
        };

        let text: String = candidate
            .content
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return match candidate.finish_reason.as_deref() {
                Some(reason @ ("SAFETY" | "PROHIBITED_CONTENT" | "BLOCKLIST")) => {
                    Err(ServiceError::Blocked {
                        reason: reason.to_string(),
                    })
                }
                _ => Err(ServiceError::EmptyResponse),
            };
        }

        Ok(text)
    }
}

#[async_trait::async_trait]
impl AIService for GeminiService {
    async fn generate_content(&self, prompt: &str, image: &ImagePayload) -> Result<String, ServiceError> {
        log::debug!("📊 Image payload: {} bytes ({})", image.data.len(), image.mime_type);

        let request = Self::build_request(prompt, image);

        log::info!("🤖 Sending request to Gemini with model: {}", self.model);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        log::debug!("📥 Gemini response status: {}", status);

        let response_text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&response_text)
                .map(|body| body.error.message)
                .unwrap_or(response_text);
            log::error!("❌ Gemini API error ({}): {}", status, message);
            return Err(ServiceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        log::debug!("📄 Raw Gemini response size: {} bytes", response_text.len());

        let parsed: GenerateContentResponse = serde_json::from_str(&response_text)?;
        let text = Self::extract_text(parsed)?;

        log::info!("✅ Received {} chars of analysis from Gemini", text.len());
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn payload() -> ImagePayload {
        ImagePayload {
            mime_type: "image/png".to_string(),
            data: vec![1, 2, 3],
        }
    }

    fn service(server: &MockServer) -> GeminiService {
        GeminiService::new("test_key".to_string(), "gemini-1.5-pro".to_string())
            .with_base_url(server.uri())
    }

    #[test]
    fn test_request_shape() {
        let request = GeminiService::build_request("list the ingredients", &payload());
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "contents": [{
                    "role": "user",
                    "parts": [
                        {"text": "list the ingredients"},
                        {"inlineData": {"mimeType": "image/png", "data": "AQID"}}
                    ]
                }]
            })
        );
    }

    #[tokio::test]
    async fn test_generate_content_returns_text_unmodified() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-pro:generateContent"))
            .and(header("x-goog-api-key", "test_key"))
            .and(body_partial_json(json!({
                "contents": [{"parts": [{"text": "prompt"}, {"inlineData": {"mimeType": "image/png"}}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [{"text": "### Unsafe ingredients:\n"}, {"text": "- **Sugar**  risk\n"}]
                    },
                    "finishReason": "STOP"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = service(&server).generate_content("prompt", &payload()).await.unwrap();
        assert_eq!(text, "### Unsafe ingredients:\n- **Sugar**  risk\n");
    }

    #[tokio::test]
    async fn test_api_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": {"code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED"}
            })))
            .mount(&server)
            .await;

        let err = service(&server)
            .generate_content("prompt", &payload())
            .await
            .unwrap_err();

        match err {
            ServiceError::Api { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_plain_text_error_body_is_kept() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let err = service(&server)
            .generate_content("prompt", &payload())
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Api { status: 429, ref message } if message == "quota exceeded"));
    }

    #[tokio::test]
    async fn test_blocked_prompt_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "promptFeedback": {"blockReason": "SAFETY"}
            })))
            .mount(&server)
            .await;

        let err = service(&server)
            .generate_content("prompt", &payload())
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Blocked { ref reason } if reason == "SAFETY"));
    }

    #[tokio::test]
    async fn test_slow_response_hits_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(500))
                    .set_body_json(json!({
                        "candidates": [{"content": {"parts": [{"text": "too late"}]}}]
                    })),
            )
            .mount(&server)
            .await;

        let err = service(&server)
            .with_timeout(Duration::from_millis(50))
            .unwrap()
            .generate_content("prompt", &payload())
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Http { ref source } if source.is_timeout()));
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = service(&server)
            .generate_content("prompt", &payload())
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Parse { .. }));
    }

    #[test]
    fn test_empty_candidate_text_is_empty_response() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "  "}]}, "finishReason": "STOP"}]
        }))
        .unwrap();
        assert!(matches!(
            GeminiService::extract_text(response),
            Err(ServiceError::EmptyResponse)
        ));

        let response: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": []})).unwrap();
        assert!(matches!(
            GeminiService::extract_text(response),
            Err(ServiceError::EmptyResponse)
        ));
    }

    #[test]
    fn test_safety_finish_without_text_is_blocked() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"finishReason": "SAFETY"}]
        }))
        .unwrap();

        assert!(matches!(
            GeminiService::extract_text(response),
            Err(ServiceError::Blocked { ref reason }) if reason == "SAFETY"
        ));
    }
}

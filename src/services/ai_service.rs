use crate::error::ServiceError;

/// Image bytes plus their MIME type, ready to attach to a model request.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Trait for multimodal AI services (Gemini, mocks in tests, etc.)
#[async_trait::async_trait]
pub trait AIService: Send + Sync {
    /// Sends one prompt + image pair and returns the generated text.
    async fn generate_content(&self, prompt: &str, image: &ImagePayload) -> Result<String, ServiceError>;

    fn model_name(&self) -> &str;
}

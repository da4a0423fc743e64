//! Shared helpers for unit tests.

use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::ServiceError;
use crate::services::ai_service::{AIService, ImagePayload};

/// RGBA PNG, so normalization has an alpha channel to drop.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([200u8, 120, 40, 128]));
    encode(DynamicImage::ImageRgba8(img), ImageOutputFormat::Png)
}

pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([90u8, 160, 220]));
    encode(DynamicImage::ImageRgb8(img), ImageOutputFormat::Jpeg(85))
}

fn encode(img: DynamicImage, format: ImageOutputFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    buf
}

/// Records every call and answers with a canned reply (`None` means fail).
pub struct MockAIService {
    reply: Option<String>,
    calls: AtomicUsize,
}

impl MockAIService {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl AIService for MockAIService {
    async fn generate_content(&self, _prompt: &str, image: &ImagePayload) -> Result<String, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(!image.data.is_empty());

        match &self.reply {
            Some(text) => Ok(text.clone()),
            None => Err(ServiceError::Api {
                status: 503,
                message: "model overloaded".to_string(),
            }),
        }
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

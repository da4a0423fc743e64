use image::io::Reader as ImageReader;
use image::ImageFormat;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use crate::error::{AnalysisError, ServiceError};
use crate::services::ai_service::{AIService, ImagePayload};

/// Instruction sent alongside every label photo.
pub const INGREDIENT_PROMPT: &str = "Act as a food expert.\n\
Get all the ingredients from this image if any, if not found then say no ingredients were found.\n\
Now for each ingredient check if it is safe or not, sort them by safe and unsafe, \
explain how it is safe and, if unsafe, why.\n\
Do not add comments or additional information outside the format below.\n\
\n\
Your output should be in the following markdown example format:\n\
### Unsafe ingredients:\n\
- **Ingredient 1**    Health risk of ingredient 1\n\
- **Ingredient 2**    Health risk of ingredient 2\n\
...\n\
### Safe ingredients:\n\
- **Ingredient 3**    Health benefits of ingredient 3\n\
- **Ingredient 4**    Health benefits of ingredient 4\n\
...\n\
### Comments:\n\
Add a short comment on whether the product is safe or unsafe overall.\n";

/// Sends a normalized label image to the AI service and hands back its markdown.
pub struct IngredientExtractor {
    ai: Arc<dyn AIService>,
}

impl IngredientExtractor {
    pub fn new(ai: Arc<dyn AIService>) -> Self {
        Self { ai }
    }

    pub async fn extract(&self, image_path: &Path) -> Result<String, AnalysisError> {
        if !image_path.is_file() {
            log::error!("❌ Error: The file {} does not exist.", image_path.display());
            return Err(AnalysisError::MissingFile {
                path: image_path.to_path_buf(),
            });
        }

        let result = self.request_analysis(image_path).await;
        if let Err(e) = &result {
            log::error!("❌ Error analyzing ingredients ({}): {}", e.kind(), e);
        }
        result
    }

    async fn request_analysis(&self, image_path: &Path) -> Result<String, AnalysisError> {
        let path = image_path.to_path_buf();
        let payload = tokio::task::spawn_blocking(move || load_payload(&path)).await??;

        log::debug!("📸 Starting ingredient analysis for: {}", image_path.display());

        log::info!("🤖 Requesting ingredient analysis from model: {}", self.ai.model_name());
        let text = self.ai.generate_content(INGREDIENT_PROMPT, &payload).await?;

        if text.trim().is_empty() {
            return Err(ServiceError::EmptyResponse.into());
        }

        Ok(text)
    }
}

/// Reads the file and checks its header; pixels are not decoded.
fn load_payload(image_path: &Path) -> Result<ImagePayload, AnalysisError> {
    let image_data = fs::read(image_path)?;
    let format = image::guess_format(&image_data)?;
    let (width, height) = ImageReader::with_format(Cursor::new(&image_data), format).into_dimensions()?;
    log::debug!("🖼️ {:?} image, {}x{}, {} bytes", format, width, height, image_data.len());

    Ok(ImagePayload {
        mime_type: mime_type_for(format).to_string(),
        data: image_data,
    })
}

fn mime_type_for(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "image/png",
        ImageFormat::Jpeg => "image/jpeg",
        _ => "application/octet-stream",
    }
}

use chrono::Utc;

use crate::error::AnalysisError;
use crate::models::{AnalysisReport, ImageSource};
use crate::services::{AnalysisCache, ImageNormalizer, IngredientExtractor};

/// Runs one label photo through cache lookup, normalization and extraction.
pub struct IngredientAnalyzer {
    normalizer: ImageNormalizer,
    extractor: IngredientExtractor,
    cache: AnalysisCache,
}

impl IngredientAnalyzer {
    pub fn new(
        normalizer: ImageNormalizer,
        extractor: IngredientExtractor,
        cache: AnalysisCache,
    ) -> Self {
        Self {
            normalizer,
            extractor,
            cache,
        }
    }

    pub async fn process_image(
        &self,
        image_bytes: &[u8],
        source: ImageSource,
    ) -> Result<AnalysisReport, AnalysisError> {
        log::info!(
            "📨 INCOMING IMAGE - Source: {} | Size: {} bytes",
            source,
            image_bytes.len()
        );

        let key = AnalysisCache::key(image_bytes);
        if let Some(markdown) = self.cache.get(&key) {
            log::info!("♻️ Cache hit for image {}", &key[..12]);
            return Ok(AnalysisReport {
                markdown,
                source,
                cached: true,
                analyzed_at: Utc::now(),
            });
        }

        let normalizer = self.normalizer.clone();
        let owned_bytes = image_bytes.to_vec();
        let normalized = match tokio::task::spawn_blocking(move || normalizer.normalize(&owned_bytes)).await {
            Ok(result) => result,
            Err(join_error) => Err(AnalysisError::from(join_error)),
        }
        .map_err(|e| {
            log::error!("❌ Error processing image ({}): {}", e.kind(), e);
            e
        })?;

        let (width, height) = normalized.dimensions();
        log::debug!(
            "🖼️ Normalized {}x{} image at {}",
            width,
            height,
            normalized.path().display()
        );

        let markdown = self.extractor.extract(normalized.path()).await?;

        self.cache.insert(key, markdown.clone());
        log::debug!("♻️ Cache now holds {} entries", self.cache.len());

        Ok(AnalysisReport {
            markdown,
            source,
            cached: false,
            analyzed_at: Utc::now(),
        })
    }
}

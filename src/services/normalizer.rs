use image::{DynamicImage, ImageOutputFormat};
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::AnalysisError;

/// An RGB PNG on disk. The file is removed when this value is dropped.
#[derive(Debug)]
pub struct NormalizedImage {
    file: NamedTempFile,
    width: u32,
    height: u32,
}

impl NormalizedImage {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Decodes uploaded/captured bytes and rewrites them as a 3-channel PNG.
/// Blocking: callers on the async runtime go through `spawn_blocking`.
#[derive(Debug, Clone)]
pub struct ImageNormalizer {
    temp_dir: PathBuf,
}

impl ImageNormalizer {
    pub fn new(temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            temp_dir: temp_dir.into(),
        }
    }

    pub fn normalize(&self, image_bytes: &[u8]) -> Result<NormalizedImage, AnalysisError> {
        if image_bytes.is_empty() {
            return Err(AnalysisError::EmptyImage);
        }

        let decoded = image::load_from_memory(image_bytes)?;
        log::debug!(
            "🖼️ Decoded {}x{} image ({:?})",
            decoded.width(),
            decoded.height(),
            decoded.color()
        );

        // Drops alpha and palette information.
        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();

        let mut png = Vec::new();
        DynamicImage::ImageRgb8(rgb).write_to(&mut Cursor::new(&mut png), ImageOutputFormat::Png)?;

        fs::create_dir_all(&self.temp_dir)?;
        let mut file = tempfile::Builder::new()
            .prefix("label-")
            .suffix(".png")
            .tempfile_in(&self.temp_dir)?;
        file.write_all(&png)?;
        file.flush()?;

        log::debug!("💾 Wrote {} bytes to: {}", png.len(), file.path().display());

        Ok(NormalizedImage { file, width, height })
    }
}

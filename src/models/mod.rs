use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where the label photo came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    Upload,
    Camera,
}

impl ImageSource {
    /// Parses the `source` form field sent by the web page.
    pub fn from_form_value(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "upload" | "" => Some(ImageSource::Upload),
            "camera" => Some(ImageSource::Camera),
            _ => None,
        }
    }
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ImageSource::Upload => "upload",
            ImageSource::Camera => "camera",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of one successful ingredient analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Markdown exactly as the model returned it.
    pub markdown: String,
    pub source: ImageSource,
    /// Served from the in-memory cache instead of a fresh model call.
    pub cached: bool,
    pub analyzed_at: DateTime<Utc>,
}

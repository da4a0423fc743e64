use std::path::PathBuf;
use thiserror::Error;

/// Shown to the user for every failure kind.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to analyze the image. Please try again.";

/// Failures talking to the generative AI service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("HTTP client error: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },

    #[error("Request blocked by the model: {reason}")]
    Blocked { reason: String },

    #[error("Model returned an empty response")]
    EmptyResponse,
}

/// Everything that can go wrong between receiving image bytes and holding the model's text.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("The file {} does not exist", .path.display())]
    MissingFile { path: PathBuf },

    #[error("Image payload is empty")]
    EmptyImage,

    #[error("Image decode error: {source}")]
    Decode {
        #[from]
        source: image::ImageError,
    },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Image worker failed: {source}")]
    Worker {
        #[from]
        source: tokio::task::JoinError,
    },

    #[error("AI service error: {source}")]
    Service {
        #[from]
        source: ServiceError,
    },
}

impl AnalysisError {
    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::MissingFile { .. } => "missing_file",
            AnalysisError::EmptyImage | AnalysisError::Decode { .. } => "decode",
            AnalysisError::Io { .. } | AnalysisError::Worker { .. } => "io",
            AnalysisError::Service { .. } => "service",
        }
    }

    /// Failure kinds are not distinguished for the end user.
    pub fn user_message(&self) -> &'static str {
        GENERIC_FAILURE_MESSAGE
    }
}

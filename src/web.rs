use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AnalysisReport, ImageSource};

pub mod render;

/// JSON body returned to the page after a successful analysis.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub markdown: String,
    pub html: String,
    pub source: ImageSource,
    pub cached: bool,
    pub analyzed_at: DateTime<Utc>,
}

impl From<AnalysisReport> for AnalysisResponse {
    fn from(report: AnalysisReport) -> Self {
        let html = render::markdown_to_html(&report.markdown);
        Self {
            markdown: report.markdown,
            html,
            source: report.source,
            cached: report.cached,
            analyzed_at: report.analyzed_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub mod server {
    use super::*;
    use axum::{
        extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
        http::StatusCode,
        response::{Html, IntoResponse, Response},
        routing::{get, post},
        Json, Router,
    };
    use std::path::Path;
    use std::sync::Arc;
    use tower_http::services::ServeDir;

    use crate::handlers::IngredientAnalyzer;

    pub struct AppState {
        pub analyzer: Arc<IngredientAnalyzer>,
    }

    pub fn create_router(
        analyzer: Arc<IngredientAnalyzer>,
        max_upload_bytes: usize,
        static_dir: &Path,
    ) -> Router {
        let state = Arc::new(AppState { analyzer });

        Router::new()
            .route("/", get(index_page))
            .route("/analyze", post(analyze_handler))
            .route("/health", get(health_check))
            .nest_service("/static", ServeDir::new(static_dir))
            .layer(DefaultBodyLimit::max(max_upload_bytes))
            .with_state(state)
    }

    fn bad_request(message: impl Into<String>) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: message.into(),
            }),
        )
            .into_response()
    }

    fn upload_error(context: &str, e: MultipartError) -> Response {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            log::warn!("⚠️ Upload rejected, body over limit: {}", e);
            return (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(ErrorResponse {
                    error: "Image too large".to_string(),
                }),
            )
                .into_response();
        }
        log::warn!("⚠️ {}: {}", context, e);
        bad_request(format!("{}: {}", context, e.body_text()))
    }

    async fn analyze_handler(
        State(state): State<Arc<AppState>>,
        mut multipart: Multipart,
    ) -> Response {
        let mut image_bytes = None;
        let mut source = ImageSource::Upload;

        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(e) => return upload_error("Malformed upload", e),
            };

            let name = field.name().map(str::to_owned);
            match name.as_deref() {
                Some("image") => match field.bytes().await {
                    Ok(bytes) => image_bytes = Some(bytes),
                    Err(e) => return upload_error("Could not read image", e),
                },
                Some("source") => {
                    let value = match field.text().await {
                        Ok(value) => value,
                        Err(e) => return upload_error("Could not read image source", e),
                    };
                    match ImageSource::from_form_value(&value) {
                        Some(parsed) => source = parsed,
                        None => return bad_request(format!("Unknown image source: {}", value)),
                    }
                }
                other => {
                    log::debug!("Ignoring form field: {:?}", other);
                }
            }
        }

        let Some(image_bytes) = image_bytes.filter(|bytes| !bytes.is_empty()) else {
            return bad_request("No image provided");
        };

        match state.analyzer.process_image(&image_bytes, source).await {
            Ok(report) => {
                log::info!("✅ Analysis ready (source={}, cached={})", report.source, report.cached);
                (StatusCode::OK, Json(AnalysisResponse::from(report))).into_response()
            }
            Err(e) => {
                log::error!("❌ Failed to analyze the image ({}): {}", e.kind(), e);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(ErrorResponse {
                        error: e.user_message().to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }

    async fn index_page() -> Html<&'static str> {
        Html(include_str!("../static/index.html"))
    }

    async fn health_check() -> &'static str {
        "OK"
    }
}

mod config;
mod error;
mod handlers;
mod models;
mod services;
#[cfg(test)]
mod test_support;
mod web; // Upload / camera page and /analyze endpoint

use anyhow::Result;
use dotenv::dotenv;
use std::sync::Arc;

use config::AppConfig;
use handlers::IngredientAnalyzer;
use services::{AIService, AnalysisCache, GeminiService, ImageNormalizer, IngredientExtractor};
use web::server::create_router;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables first so RUST_LOG from .env applies
    dotenv().ok();

    // Initialize logger
    env_logger::init();

    log::info!("🚀 Starting Ingredient Analyzer...");

    let config = AppConfig::from_env()?;

    let mut gemini = GeminiService::new(config.api_key.clone(), config.model.clone())
        .with_timeout(config.request_timeout)?;
    if let Some(base_url) = &config.base_url {
        gemini = gemini.with_base_url(base_url.as_str());
        log::info!("🔀 Gemini base URL overridden: {}", base_url);
    }
    let ai: Arc<dyn AIService> = Arc::new(gemini);
    log::info!("✅ Gemini service initialized with model: {}", config.model);

    let analyzer = Arc::new(IngredientAnalyzer::new(
        ImageNormalizer::new(&config.temp_dir),
        IngredientExtractor::new(ai),
        AnalysisCache::new(config.cache_enabled),
    ));
    log::info!(
        "✅ Analyzer initialized (temp dir: {}, cache: {})",
        config.temp_dir.display(),
        if config.cache_enabled { "on" } else { "off" }
    );

    let app = create_router(analyzer, config.max_upload_bytes, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr.as_str()).await?;
    log::info!("🌐 Web server listening on {}", config.bind_addr);

    println!("\n🥫 Ingredient Analyzer is running!");
    println!("🌐 Open http://{} in your browser", config.bind_addr);
    println!("📸 Upload a label photo or capture one with your camera");
    println!("\n🛑 Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("❌ Failed to listen for Ctrl+C: {}", e);
            }
        })
        .await?;

    log::info!("🛑 Shutting down...");

    Ok(())
}

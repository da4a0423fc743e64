pub mod ai_service;
pub mod cache;
pub mod extractor;
pub mod gemini; // Google Gemini generateContent client
pub mod normalizer;

pub use ai_service::AIService;
pub use cache::AnalysisCache;
pub use extractor::IngredientExtractor;
pub use gemini::GeminiService;
pub use normalizer::ImageNormalizer;

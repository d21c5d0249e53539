pub mod archetype;
pub mod catalog;
pub mod config;
pub mod deserializers;
pub mod diversify;
pub mod engine;
pub mod error;
pub mod filter;
pub mod lexicon;
pub mod normalize;
pub mod scoring;
pub mod signals;

use once_cell::sync::Lazy;

pub use archetype::Archetype;
pub use catalog::{Catalog, CompositionTemplate, ContentCategory, TextZone};
pub use config::Config;
pub use engine::{RecommendationRequest, Recommender};
pub use error::{RecommenderError, Result};

static DEFAULT_RECOMMENDER: Lazy<Recommender> = Lazy::new(Recommender::default);

// Load env from a simple, standardized location resolution.
// This uses dotenvy::dotenv() which loads .env if present and silently ignores if missing.
pub fn load_env() {
    let _ = dotenvy::dotenv();
}

/// Recommend up to `max_items` template ids for a brief using the built-in configuration.
pub fn recommend_layouts(
    catalog: &Catalog,
    brief: &str,
    category: Option<ContentCategory>,
    max_items: usize,
) -> Vec<String> {
    let request = RecommendationRequest {
        brief: brief.to_string(),
        category,
        max_items: Some(max_items),
    };
    DEFAULT_RECOMMENDER.recommend(catalog, &request)
}

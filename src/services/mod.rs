pub mod candidates;
pub mod classifier;
pub mod recommend;
pub mod scoring;

pub use candidates::CandidateFetcher;
pub use recommend::{get_top_recipes, Recommendation, RecommendLimits};

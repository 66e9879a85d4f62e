pub mod prediction;
pub mod recipe;

pub use prediction::Prediction;
pub use recipe::{normalize_ingredient, Recipe, ScoredRecipe};

use std::collections::HashSet;
use std::sync::Arc;

use crate::{
    db::RecipeStore,
    error::AppResult,
    models::{normalize_ingredient, Recipe},
};

/// Gathers candidate recipes for a set of detected ingredients.
///
/// One store query per ingredient, in input order. Rows merge into a single
/// list deduplicated by recipe id, first seen wins. The `max_total` cap is
/// checked both between ingredients and mid-batch; queries are sequential, so
/// the cap is never exceeded. A failed query aborts the whole fetch.
pub struct CandidateFetcher {
    store: Arc<dyn RecipeStore>,
}

impl CandidateFetcher {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self { store }
    }

    pub async fn fetch(
        &self,
        detected: &[String],
        limit_per_ingredient: u32,
        max_total: usize,
    ) -> AppResult<Vec<Recipe>> {
        let mut seen_ids: HashSet<i64> = HashSet::new();
        let mut candidates: Vec<Recipe> = Vec::new();

        for raw in detected {
            if candidates.len() >= max_total {
                break;
            }

            let Some(ingredient) = normalize_ingredient(raw) else {
                continue;
            };

            let rows = self
                .store
                .recipes_containing(&ingredient, limit_per_ingredient)
                .await?;

            for recipe in rows {
                if !seen_ids.insert(recipe.id) {
                    continue;
                }
                candidates.push(recipe);

                if candidates.len() >= max_total {
                    break;
                }
            }
        }

        Ok(candidates)
    }
}

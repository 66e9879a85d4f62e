use std::sync::Arc;

use crate::{db::RecipeStore, error::AppResult, models::ScoredRecipe, services::scoring};

use super::CandidateFetcher;

/// Tuning knobs for one recommendation pass.
#[derive(Debug, Clone, Copy)]
pub struct RecommendLimits {
    pub top_n: usize,
    pub limit_per_ingredient: u32,
    pub max_total: usize,
}

impl Default for RecommendLimits {
    fn default() -> Self {
        Self {
            top_n: 10,
            limit_per_ingredient: 300,
            max_total: 2000,
        }
    }
}

/// Ranked recipes plus how many deduplicated candidates were retrieved before
/// scoring. `candidate_count` can exceed `recipes.len()`: it reports retrieval
/// breadth independent of ranking.
#[derive(Debug)]
pub struct Recommendation {
    pub recipes: Vec<ScoredRecipe>,
    pub candidate_count: usize,
}

/// Fetch candidates for the detected ingredients, then score and rank them.
pub async fn get_top_recipes(
    store: Arc<dyn RecipeStore>,
    detected: &[String],
    limits: RecommendLimits,
) -> AppResult<Recommendation> {
    let fetcher = CandidateFetcher::new(store);
    let candidates = fetcher
        .fetch(detected, limits.limit_per_ingredient, limits.max_total)
        .await?;
    let candidate_count = candidates.len();

    let recipes = scoring::score_candidates(detected, &candidates, limits.top_n);

    tracing::info!(
        detected = detected.len(),
        candidates = candidate_count,
        ranked = recipes.len(),
        "recommendation computed"
    );

    Ok(Recommendation {
        recipes,
        candidate_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MockRecipeStore;
    use crate::models::Recipe;

    fn recipe(id: i64, ingredients: &[&str]) -> Recipe {
        Recipe {
            id,
            title: Some(format!("Recipe {}", id)),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            instructions: None,
        }
    }

    #[tokio::test]
    async fn test_candidate_count_reports_retrieval_breadth() {
        let mut store = MockRecipeStore::new();
        store
            .expect_recipes_containing()
            .withf(|ingredient, _| ingredient == "apple")
            .returning(|_, _| {
                Ok(vec![
                    recipe(1, &["apple"]),
                    recipe(2, &["apple", "flour"]),
                    recipe(3, &["carrot"]),
                ])
            });

        let limits = RecommendLimits {
            top_n: 1,
            ..RecommendLimits::default()
        };
        let result = get_top_recipes(Arc::new(store), &["apple".to_string()], limits)
            .await
            .unwrap();

        // three candidates retrieved, one survives truncation, carrot-only row
        // never ranked at all
        assert_eq!(result.candidate_count, 3);
        assert_eq!(result.recipes.len(), 1);
        assert_eq!(result.recipes[0].id, 1);
    }

    #[tokio::test]
    async fn test_empty_detected_set_short_circuits() {
        let store = MockRecipeStore::new();

        let result = get_top_recipes(Arc::new(store), &[], RecommendLimits::default())
            .await
            .unwrap();

        assert_eq!(result.candidate_count, 0);
        assert!(result.recipes.is_empty());
    }
}

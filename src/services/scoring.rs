use std::collections::BTreeSet;

use crate::models::{normalize_ingredient, Recipe, ScoredRecipe};

/// Scores candidates by overlap with the detected ingredient set and returns
/// the top `top_n`, best first.
///
/// A candidate with no overlap is dropped, never surfaced. Score is the
/// fraction of *detected* ingredients the recipe uses. The sort is stable, so
/// equal scores keep the candidates' first-seen order. Pure function: inputs
/// are not mutated and identical inputs yield identical output.
pub fn score_candidates(
    detected: &[String],
    candidates: &[Recipe],
    top_n: usize,
) -> Vec<ScoredRecipe> {
    let pantry: BTreeSet<String> = detected
        .iter()
        .filter_map(|raw| normalize_ingredient(raw))
        .collect();

    let mut scored: Vec<ScoredRecipe> = Vec::new();

    for recipe in candidates {
        let required: BTreeSet<String> = recipe
            .ingredients
            .iter()
            .filter_map(|raw| normalize_ingredient(raw))
            .collect();

        // BTreeSet iteration is ordered, so matched/missing come out sorted
        let matched: Vec<String> = required.intersection(&pantry).cloned().collect();
        if matched.is_empty() {
            continue;
        }
        let missing: Vec<String> = required.difference(&pantry).cloned().collect();

        // max(1) guards the degenerate empty-pantry case, which cannot match anyway
        let score = matched.len() as f64 / pantry.len().max(1) as f64;

        scored.push(ScoredRecipe {
            id: recipe.id,
            title: recipe.display_title(),
            score,
            matched,
            missing,
            instructions: recipe.instructions.clone().unwrap_or_default(),
        });
    }

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(top_n);
    scored
}

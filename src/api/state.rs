use std::sync::Arc;

use crate::{db::RecipeStore, services::classifier::IngredientClassifier, services::RecommendLimits};

/// Shared application state
///
/// Built once at startup, cloned into each handler. Both collaborators sit
/// behind traits so tests can swap in stubs.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecipeStore>,
    pub classifier: Arc<dyn IngredientClassifier>,
    pub limits: RecommendLimits,
}

impl AppState {
    pub fn new(
        store: Arc<dyn RecipeStore>,
        classifier: Arc<dyn IngredientClassifier>,
        limits: RecommendLimits,
    ) -> Self {
        Self {
            store,
            classifier,
            limits,
        }
    }
}

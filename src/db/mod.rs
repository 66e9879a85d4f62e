pub mod postgrest;

pub use postgrest::PostgrestStore;

use crate::{error::AppResult, models::Recipe};

/// Read-only boundary to the recipe store.
///
/// The store is any collection that can filter an array-valued column by
/// containment, limit rows, project fields, and report an exact row count.
/// Handlers and services only see this trait; the concrete client lives in
/// [`postgrest`].
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecipeStore: Send + Sync {
    /// Recipes whose ingredient list contains `ingredient`, at most `limit`
    /// rows, projected to {id, title, ingredients, instructions}.
    async fn recipes_containing(&self, ingredient: &str, limit: u32) -> AppResult<Vec<Recipe>>;

    /// Exact number of rows in the backing table.
    async fn count_rows(&self) -> AppResult<u64>;

    /// Backing table name, for diagnostics.
    fn table(&self) -> &str;
}

use reqwest::{header, Client as HttpClient};

use crate::{
    error::{AppError, AppResult},
    models::Recipe,
};

use super::RecipeStore;

/// Fields fetched for candidate rows; everything else stays in the store.
const PROJECTION: &str = "id,title,ingredients,instructions";

/// Recipe store backed by a Supabase PostgREST endpoint.
///
/// Constructed once at startup and shared through [`AppState`]; the wrapped
/// reqwest client pools its connections and opens them lazily on first use,
/// so creation itself never touches the network.
///
/// [`AppState`]: crate::api::AppState
pub struct PostgrestStore {
    http_client: HttpClient,
    base_url: String,
    api_key: String,
    table: String,
}

impl PostgrestStore {
    pub fn new(base_url: String, api_key: String, table: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            table,
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    /// PostgREST `cs` (contains) filter literal for a jsonb ingredient array,
    /// e.g. `cs.["apple"]`.
    fn contains_filter(ingredient: &str) -> String {
        format!("cs.{}", serde_json::json!([ingredient]))
    }

    /// Total row count from a `Content-Range` header such as `0-24/3573`.
    fn parse_content_range_total(content_range: &str) -> AppResult<u64> {
        content_range
            .split_once('/')
            .and_then(|(_, total)| total.parse::<u64>().ok())
            .ok_or_else(|| {
                AppError::Store(format!(
                    "unparseable Content-Range header {:?} in count response",
                    content_range
                ))
            })
    }
}

#[async_trait::async_trait]
impl RecipeStore for PostgrestStore {
    async fn recipes_containing(&self, ingredient: &str, limit: u32) -> AppResult<Vec<Recipe>> {
        let filter = Self::contains_filter(ingredient);
        let limit = limit.to_string();

        let response = self
            .http_client
            .get(self.table_url())
            .header("apikey", &self.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .query(&[
                ("select", PROJECTION),
                ("ingredients", filter.as_str()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Store(format!(
                "store returned status {} for ingredient {:?}: {}",
                status, ingredient, body
            )));
        }

        let rows: Vec<Recipe> = response.json().await?;

        tracing::debug!(ingredient = %ingredient, rows = rows.len(), "store query completed");

        Ok(rows)
    }

    async fn count_rows(&self) -> AppResult<u64> {
        let response = self
            .http_client
            .head(self.table_url())
            .header("apikey", &self.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header("Prefer", "count=exact")
            .query(&[("select", "id")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Store(format!(
                "store returned status {} for count of table {:?}",
                response.status(),
                self.table
            )));
        }

        let content_range = response
            .headers()
            .get(header::CONTENT_RANGE)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError::Store("count response missing Content-Range header".to_string())
            })?;

        Self::parse_content_range_total(content_range)
    }

    fn table(&self) -> &str {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_filter_is_a_json_array_literal() {
        assert_eq!(PostgrestStore::contains_filter("apple"), r#"cs.["apple"]"#);
    }

    #[test]
    fn test_contains_filter_escapes_quotes() {
        assert_eq!(
            PostgrestStore::contains_filter(r#"a"b"#),
            r#"cs.["a\"b"]"#
        );
    }

    #[test]
    fn test_parse_content_range_total() {
        assert_eq!(
            PostgrestStore::parse_content_range_total("0-24/3573").unwrap(),
            3573
        );
        assert_eq!(PostgrestStore::parse_content_range_total("*/0").unwrap(), 0);
        assert!(PostgrestStore::parse_content_range_total("0-24/*").is_err());
        assert!(PostgrestStore::parse_content_range_total("garbage").is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let store = PostgrestStore::new(
            "https://example.supabase.co/".to_string(),
            "key".to_string(),
            "recipes_raw".to_string(),
        );
        assert_eq!(
            store.table_url(),
            "https://example.supabase.co/rest/v1/recipes_raw"
        );
    }
}

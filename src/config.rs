use serde::Deserialize;

use crate::services::RecommendLimits;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Supabase project URL (required)
    pub supabase_url: String,

    /// Supabase service key (required)
    pub supabase_key: String,

    /// Table holding the recipe rows
    #[serde(default = "default_recipes_table")]
    pub supabase_recipes_table: String,

    /// Base URL of the model inference service
    #[serde(default = "default_inference_url")]
    pub inference_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// How many ranked recipes a request returns
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Row limit for each per-ingredient store query
    #[serde(default = "default_limit_per_ingredient")]
    pub limit_per_ingredient: u32,

    /// Global cap on deduplicated candidates per request
    #[serde(default = "default_max_total")]
    pub max_total: usize,
}

fn default_recipes_table() -> String {
    "recipes_raw".to_string()
}

fn default_inference_url() -> String {
    "http://127.0.0.1:8500".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_top_n() -> usize {
    10
}

fn default_limit_per_ingredient() -> u32 {
    300
}

fn default_max_total() -> usize {
    2000
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Missing SUPABASE_URL or SUPABASE_KEY is fatal: the service must not
    /// start without store credentials.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| {
            anyhow::anyhow!(
                "Failed to load config: {}. SUPABASE_URL and SUPABASE_KEY must be set \
                 in the environment or a .env file.",
                e
            )
        })
    }

    /// Recommendation knobs for one request
    pub fn limits(&self) -> RecommendLimits {
        RecommendLimits {
            top_n: self.top_n,
            limit_per_ingredient: self.limit_per_ingredient,
            max_total: self.max_total,
        }
    }
}

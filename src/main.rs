use std::sync::Arc;

use pantry_api::api::{create_router, AppState};
use pantry_api::config::Config;
use pantry_api::db::PostgrestStore;
use pantry_api::services::classifier::InferenceClassifier;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pantry_api=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    let store = PostgrestStore::new(
        config.supabase_url.clone(),
        config.supabase_key.clone(),
        config.supabase_recipes_table.clone(),
    );

    let classifier = InferenceClassifier::connect(config.inference_url.clone())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to reach inference service: {}", e))?;

    let state = AppState::new(Arc::new(store), Arc::new(classifier), config.limits());

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, table = %config.supabase_recipes_table, "recipe service listening");
    axum::serve(listener, app).await?;

    Ok(())
}

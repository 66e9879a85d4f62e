use std::collections::BTreeSet;

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::ScoredRecipe,
    services::recommend,
};

use super::AppState;

// Response types

#[derive(Debug, Serialize)]
pub struct FilePrediction {
    pub filename: String,
    pub label: String,
    pub confidence: f32,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub predictions: Vec<FilePrediction>,
    pub ingredients: Vec<String>,
    pub recipes: Vec<ScoredRecipe>,
    pub candidate_count: usize,
}

// Handlers

/// Liveness probe
pub async fn health() -> Json<Value> {
    Json(json!({ "alive": true }))
}

/// Label vocabulary of the classifier
pub async fn classes(State(state): State<AppState>) -> Json<Value> {
    let classes = state.classifier.classes();
    Json(json!({
        "num_classes": classes.len(),
        "classes": classes,
    }))
}

/// Classify the uploaded images, then recommend recipes for the detected
/// ingredient set. A store failure fails the whole request; see DESIGN.md.
pub async fn predict(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<PredictResponse>> {
    let mut predictions = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("malformed multipart body: {}", e)))?
    {
        let filename = field.file_name().unwrap_or("upload").to_string();
        let data = field.bytes().await.map_err(|e| {
            AppError::InvalidInput(format!("failed to read uploaded file {:?}: {}", filename, e))
        })?;

        let prediction = state.classifier.classify(&data).await?;

        tracing::debug!(
            filename = %filename,
            label = %prediction.label,
            confidence = prediction.confidence,
            "image classified"
        );

        predictions.push(FilePrediction {
            filename,
            label: prediction.label,
            confidence: prediction.confidence,
        });
    }

    if predictions.is_empty() {
        return Err(AppError::InvalidInput(
            "request contained no image files".to_string(),
        ));
    }

    // sorted, deduplicated label set across all uploaded images
    let ingredients: Vec<String> = predictions
        .iter()
        .map(|p| p.label.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let result = recommend::get_top_recipes(state.store.clone(), &ingredients, state.limits).await?;

    Ok(Json(PredictResponse {
        predictions,
        ingredients,
        recipes: result.recipes,
        candidate_count: result.candidate_count,
    }))
}

/// Total rows in the recipe table. Store failures come back as an
/// error-shaped payload, never as an HTTP error.
pub async fn dbcount(State(state): State<AppState>) -> Json<Value> {
    let table = state.store.table().to_string();

    match state.store.count_rows().await {
        Ok(total) => Json(json!({ "table": table, "total_rows": total })),
        Err(e) => {
            tracing::warn!(error = %e, table = %table, "recipe table count failed");
            Json(json!({ "error": e.to_string(), "table": table, "total_rows": null }))
        }
    }
}

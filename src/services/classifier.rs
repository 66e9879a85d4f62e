use reqwest::{header, Client as HttpClient};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::Prediction,
};

/// Black-box boundary to the image classifier.
///
/// The service consumes labels and confidences only; inference itself happens
/// behind this trait.
#[async_trait::async_trait]
pub trait IngredientClassifier: Send + Sync {
    /// Classify one image, returning the winning label and its confidence.
    async fn classify(&self, image: &[u8]) -> AppResult<Prediction>;

    /// The label vocabulary the classifier can produce.
    fn classes(&self) -> &[String];
}

#[derive(Debug, Deserialize)]
struct LabelsResponse {
    labels: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct InferResponse {
    label: String,
    confidence: f32,
}

/// Classifier that delegates to the model inference service over HTTP.
///
/// `GET {base}/labels` serves the vocabulary, `POST {base}/infer` takes raw
/// image bytes and answers `{label, confidence}`.
pub struct InferenceClassifier {
    http_client: HttpClient,
    base_url: String,
    classes: Vec<String>,
}

impl InferenceClassifier {
    /// Connects to the inference service and loads the label vocabulary once
    /// for the process lifetime.
    pub async fn connect(base_url: String) -> AppResult<Self> {
        let http_client = HttpClient::new();
        let base_url = base_url.trim_end_matches('/').to_string();

        let response = http_client
            .get(format!("{}/labels", base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Classifier(format!(
                "inference service returned status {} for label vocabulary",
                response.status()
            )));
        }

        let labels: LabelsResponse = response.json().await?;

        tracing::info!(num_classes = labels.labels.len(), "classifier vocabulary loaded");

        Ok(Self {
            http_client,
            base_url,
            classes: labels.labels,
        })
    }
}

#[async_trait::async_trait]
impl IngredientClassifier for InferenceClassifier {
    async fn classify(&self, image: &[u8]) -> AppResult<Prediction> {
        let response = self
            .http_client
            .post(format!("{}/infer", self.base_url))
            .header(header::CONTENT_TYPE, "application/octet-stream")
            .body(image.to_vec())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Classifier(format!(
                "inference service returned status {}: {}",
                status, body
            )));
        }

        let inferred: InferResponse = response.json().await?;

        Ok(Prediction {
            label: inferred.label,
            confidence: inferred.confidence,
        })
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }
}

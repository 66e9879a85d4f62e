use serde::{Deserialize, Serialize};

/// Classifier output for one image: the winning label and its confidence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub confidence: f32,
}

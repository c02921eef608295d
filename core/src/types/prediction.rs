use serde::{Deserialize, Serialize};

/// A single classifier output paired with its label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,

    /// Probability in [0, 1]
    #[serde(rename = "prob")]
    pub probability: f32,
}

impl Prediction {
    /// Creates a new Prediction
    pub fn new(label: impl Into<String>, probability: f32) -> Self {
        Self {
            label: label.into(),
            probability,
        }
    }
}

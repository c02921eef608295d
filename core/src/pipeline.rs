use crate::decode::{FormatResolver, ANONYMOUS_SOURCE};
use crate::error::{CxrError, Result};
use crate::model::Classifier;
use crate::normalize::{NormalizeConfig, Normalizer};
use crate::ranking::{rank_predictions, resolve_labels};
use crate::types::{ModelTensor, Prediction};
use base64::Engine;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Number of predictions returned by default
pub const DEFAULT_TOP_N: usize = 5;

/// Decodes and normalizes an X-ray file
///
/// A `.dcm`/`.dicom` extension makes DICOM the first decoder tried;
/// any other extension starts with the raster decoder.
///
/// # Errors
///
/// Returns an I/O error (`NotFound` for missing files), a decode error
/// when neither decoder accepts the content, or a normalization error.
pub fn load_xray_file(path: &Path, config: &NormalizeConfig) -> Result<ModelTensor> {
    let decoded = FormatResolver::resolve_path(path)?;
    debug!("{}: decoded as {}", path.display(), decoded.kind);
    Normalizer::new(*config).normalize(decoded.array)
}

/// Decodes and normalizes an in-memory X-ray, trying DICOM first
pub fn load_xray_bytes(bytes: &[u8], config: &NormalizeConfig) -> Result<ModelTensor> {
    let decoded = FormatResolver::resolve(bytes, None, ANONYMOUS_SOURCE)?;
    debug!("{} bytes decoded as {}", bytes.len(), decoded.kind);
    Normalizer::new(*config).normalize(decoded.array)
}

/// Runs the classifier and ranks its outputs
///
/// Labels come from the classifier when usable, otherwise from the
/// fallback lists keyed by output count.
pub fn predict_tensor<C>(
    classifier: &C,
    tensor: &ModelTensor,
    top_n: Option<usize>,
) -> Result<Vec<Prediction>>
where
    C: Classifier + ?Sized,
{
    let probs = classifier.predict(tensor)?;
    let labels = resolve_labels(classifier.labels(), probs.len());
    info!("{} produced {} outputs", classifier.name(), probs.len());
    rank_predictions(&labels, &probs, top_n)
}

fn normalize_config_for<C>(classifier: &C) -> NormalizeConfig
where
    C: Classifier + ?Sized,
{
    let (height, width) = classifier.input_size();
    NormalizeConfig::default().with_size(height, width)
}

/// Full pipeline for a file: decode, normalize, classify, rank
pub fn predict_file<C>(classifier: &C, path: &Path, top_n: Option<usize>) -> Result<Vec<Prediction>>
where
    C: Classifier + ?Sized,
{
    let tensor = load_xray_file(path, &normalize_config_for(classifier))?;
    predict_tensor(classifier, &tensor, top_n)
}

/// Full pipeline for an in-memory image
pub fn predict_bytes<C>(
    classifier: &C,
    bytes: &[u8],
    top_n: Option<usize>,
) -> Result<Vec<Prediction>>
where
    C: Classifier + ?Sized,
{
    let tensor = load_xray_bytes(bytes, &normalize_config_for(classifier))?;
    predict_tensor(classifier, &tensor, top_n)
}

/// Structured prediction output: `{"model": ..., "top5": [{"label", "prob"}, ...]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionSummary {
    pub model: String,
    pub top5: Vec<Prediction>,
}

impl PredictionSummary {
    /// Keeps the first [`DEFAULT_TOP_N`] of already ranked predictions
    pub fn new(model: impl Into<String>, ranked: &[Prediction]) -> Self {
        Self {
            model: model.into(),
            top5: ranked.iter().take(DEFAULT_TOP_N).cloned().collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Decodes a base64 image payload, accepting an optional `data:` URL prefix
///
/// # Example
///
/// ```
/// use cxrcat_core::pipeline::decode_base64_payload;
///
/// assert_eq!(decode_base64_payload("data:image/png;base64,AQID").unwrap(), vec![1, 2, 3]);
/// assert_eq!(decode_base64_payload("  AQID\n").unwrap(), vec![1, 2, 3]);
/// assert!(decode_base64_payload("").is_err());
/// ```
pub fn decode_base64_payload(payload: &str) -> Result<Vec<u8>> {
    let payload = payload.trim();
    let encoded = match payload.split_once(',') {
        Some((prefix, rest)) if prefix.trim().to_lowercase().starts_with("data:") => rest,
        _ => payload,
    };

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| CxrError::InvalidInput(format!("Invalid base64 payload: {}", e)))?;

    if bytes.is_empty() {
        return Err(CxrError::InvalidInput("Empty upload".to_string()));
    }
    Ok(bytes)
}

//! Classifier boundary
//!
//! The classifier itself is external: anything that maps a
//! [`ModelTensor`] to a probability vector can implement [`Classifier`].
//! [`ModelCache`] provides the load-once handle a host process keeps.

use crate::error::{CxrError, Result};
use crate::types::ModelTensor;
use log::{debug, info};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the reference chest X-ray classifier
pub const DEFAULT_MODEL_NAME: &str = "densenet121-res224-chex";

/// An opaque model mapping a normalized tensor to per-label probabilities
pub trait Classifier {
    /// Model identifier reported in structured output
    fn name(&self) -> &str;

    /// Declared output labels, if the model exposes any
    fn labels(&self) -> Option<&[String]>;

    /// Expected `(height, width)` of the input tensor
    fn input_size(&self) -> (usize, usize) {
        (224, 224)
    }

    /// Runs inference on a `1x1xHxW` tensor
    fn predict(&self, tensor: &ModelTensor) -> Result<Vec<f32>>;
}

/// Process-wide, load-once holder for an expensive classifier
///
/// The loader runs at most once even when several threads ask for the
/// model concurrently; a failed load leaves the cache empty so a later
/// call may retry.
///
/// # Example
///
/// ```
/// use cxrcat_core::model::{ModelCache, PrecomputedClassifier};
///
/// static MODEL: ModelCache<PrecomputedClassifier> = ModelCache::new();
///
/// let model = MODEL
///     .get_or_load(|| Ok(PrecomputedClassifier::new("demo", None, vec![0.5])))
///     .unwrap();
/// assert!(MODEL.is_loaded());
/// assert!(std::ptr::eq(model, MODEL.get().unwrap()));
/// ```
pub struct ModelCache<C> {
    cell: OnceCell<C>,
}

impl<C> ModelCache<C> {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Returns the cached model, running `load` on first access
    pub fn get_or_load<F>(&self, load: F) -> Result<&C>
    where
        F: FnOnce() -> Result<C>,
    {
        self.cell.get_or_try_init(|| {
            info!("Loading classifier");
            load()
        })
    }

    pub fn get(&self) -> Option<&C> {
        self.cell.get()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<C> Default for ModelCache<C> {
    fn default() -> Self {
        Self::new()
    }
}

fn default_model_name() -> String {
    DEFAULT_MODEL_NAME.to_string()
}

/// Classifier that replays a stored output record
///
/// The record is the JSON form `{"model": ..., "labels": [...], "probs": [...]}`
/// where `model` and `labels` are optional. Every call to
/// [`Classifier::predict`] returns the stored probabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecomputedClassifier {
    #[serde(default = "default_model_name")]
    model: String,

    #[serde(default)]
    labels: Option<Vec<String>>,

    probs: Vec<f32>,
}

impl PrecomputedClassifier {
    pub fn new(model: impl Into<String>, labels: Option<Vec<String>>, probs: Vec<f32>) -> Self {
        Self {
            model: model.into(),
            labels,
            probs,
        }
    }

    /// Parses an output record from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let classifier: Self = serde_json::from_str(json)?;
        if classifier.probs.is_empty() {
            return Err(CxrError::Model("output record has no probabilities".to_string()));
        }
        Ok(classifier)
    }

    /// Reads an output record from a JSON file
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        debug!("Read classifier outputs from {}", path.display());
        Self::from_json(&json)
    }
}

impl Classifier for PrecomputedClassifier {
    fn name(&self) -> &str {
        &self.model
    }

    fn labels(&self) -> Option<&[String]> {
        self.labels.as_deref()
    }

    fn predict(&self, tensor: &ModelTensor) -> Result<Vec<f32>> {
        let (height, width) = self.input_size();
        let shape = tensor.shape();
        if shape != (1, 1, height, width) {
            return Err(CxrError::Model(format!(
                "expected input shape (1, 1, {}, {}), got {:?}",
                height, width, shape
            )));
        }
        Ok(self.probs.clone())
    }
}

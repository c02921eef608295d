//! Ranking of classifier outputs
//!
//! Implements label resolution for classifiers with missing or unusable
//! label lists, and the stable descending sort of predictions.

mod labels;
mod rank;

pub use labels::{resolve_labels, synthetic_labels, FALLBACK_LABELS};
pub use rank::{rank_predictions, Ranker};

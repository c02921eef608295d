use crate::error::{CxrError, Result};
use crate::types::Prediction;
use log::debug;

/// Pairs labels with probabilities and sorts them, highest first
///
/// Equal probabilities keep their input order.
///
/// # Errors
///
/// Returns `LengthMismatch` when the two sequences differ in length.
///
/// # Example
///
/// ```
/// use cxrcat_core::ranking::rank_predictions;
///
/// let labels = vec!["A".to_string(), "B".to_string(), "C".to_string()];
/// let ranked = rank_predictions(&labels, &[0.2, 0.9, 0.2], None).unwrap();
/// let order: Vec<&str> = ranked.iter().map(|p| p.label.as_str()).collect();
/// assert_eq!(order, ["B", "A", "C"]);
/// ```
pub fn rank_predictions(
    labels: &[String],
    probs: &[f32],
    top_n: Option<usize>,
) -> Result<Vec<Prediction>> {
    if labels.len() != probs.len() {
        return Err(CxrError::LengthMismatch {
            labels: labels.len(),
            probs: probs.len(),
        });
    }

    let mut ranked: Vec<Prediction> = labels
        .iter()
        .zip(probs)
        .map(|(label, &prob)| Prediction::new(label.as_str(), prob))
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| sort_key(b.probability).total_cmp(&sort_key(a.probability)));

    if let Some(n) = top_n {
        ranked.truncate(n);
    }
    debug!("Ranked {} of {} predictions", ranked.len(), labels.len());

    Ok(ranked)
}

/// Total order key with `-0.0` folded into `0.0`
fn sort_key(probability: f32) -> f32 {
    if probability == 0.0 {
        0.0
    } else {
        probability
    }
}

/// Ranking with a fixed truncation
#[derive(Debug, Clone, Copy, Default)]
pub struct Ranker {
    top_n: Option<usize>,
}

impl Ranker {
    /// Keeps every prediction
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps only the first `n` predictions
    pub fn top(n: usize) -> Self {
        Self { top_n: Some(n) }
    }

    pub fn top_n(&self) -> Option<usize> {
        self.top_n
    }

    pub fn rank(&self, labels: &[String], probs: &[f32]) -> Result<Vec<Prediction>> {
        rank_predictions(labels, probs, self.top_n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("L{}", i)).collect()
    }

    #[test]
    fn test_sorted_descending() {
        let probs = [0.1, 0.7, 0.3, 0.9, 0.5];
        let ranked = rank_predictions(&labels(5), &probs, None).unwrap();
        let values: Vec<f32> = ranked.iter().map(|p| p.probability).collect();
        assert_eq!(values, vec![0.9, 0.7, 0.5, 0.3, 0.1]);
        assert_eq!(ranked[0].label, "L3");
    }

    #[test]
    fn test_ties_keep_input_order() {
        let probs = [0.5, 0.8, 0.5, 0.5, 0.8];
        let ranked = rank_predictions(&labels(5), &probs, None).unwrap();
        let order: Vec<&str> = ranked.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(order, ["L1", "L4", "L0", "L2", "L3"]);
    }

    #[rstest]
    #[case(&[-0.0, 0.0, 0.0], ["L0", "L1", "L2"])]
    #[case(&[0.0, -0.0, 0.0], ["L0", "L1", "L2"])]
    #[case(&[0.0, 0.2, -0.0], ["L1", "L0", "L2"])]
    fn test_signed_zeros_tie(#[case] probs: &[f32], #[case] expected: [&str; 3]) {
        let ranked = rank_predictions(&labels(3), probs, None).unwrap();
        let order: Vec<&str> = ranked.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(order, expected);
    }

    #[rstest]
    #[case(3, 2)]
    #[case(0, 1)]
    #[case(2, 0)]
    fn test_length_mismatch(#[case] n_labels: usize, #[case] n_probs: usize) {
        let probs = vec![0.5; n_probs];
        let err = rank_predictions(&labels(n_labels), &probs, None).unwrap_err();
        assert!(matches!(
            err,
            CxrError::LengthMismatch { labels, probs } if labels == n_labels && probs == n_probs
        ));
    }

    #[rstest]
    #[case(Ranker::new(), 4)]
    #[case(Ranker::top(2), 2)]
    #[case(Ranker::top(10), 4)]
    #[case(Ranker::top(0), 0)]
    fn test_truncation(#[case] ranker: Ranker, #[case] expected: usize) {
        let ranked = ranker.rank(&labels(4), &[0.1, 0.2, 0.3, 0.4]).unwrap();
        assert_eq!(ranked.len(), expected);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let probs = vec![0.1, 0.9];
        let names = labels(2);
        let _ = rank_predictions(&names, &probs, None).unwrap();
        assert_eq!(probs, vec![0.1, 0.9]);
        assert_eq!(names, labels(2));
    }
}

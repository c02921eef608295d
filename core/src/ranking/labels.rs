use log::warn;

/// Label names used when an 18-output classifier exposes no usable labels
pub const FALLBACK_LABELS: [&str; 18] = [
    "Atelectasis",
    "Consolidation",
    "Infiltration",
    "Pneumothorax",
    "Edema",
    "Emphysema",
    "Fibrosis",
    "Effusion",
    "Pneumonia",
    "Pleural Thickening",
    "Cardiomegaly",
    "Nodule",
    "Mass",
    "Hernia",
    "Lung Lesion",
    "Fracture",
    "Lung Opacity",
    "Enlarged Cardiomediastinum",
];

/// Returns `output_0 .. output_{n-1}`
pub fn synthetic_labels(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("output_{}", i)).collect()
}

/// Picks the label list for a probability vector of length `probs_len`
///
/// # Algorithm
///
/// 1. Declared labels are used when non-empty, every entry is non-blank,
///    and their count equals `probs_len`
/// 2. Otherwise [`FALLBACK_LABELS`] when `probs_len` is 18
/// 3. Otherwise synthetic `output_<i>` names
pub fn resolve_labels(declared: Option<&[String]>, probs_len: usize) -> Vec<String> {
    if let Some(labels) = declared {
        let populated = !labels.is_empty() && labels.iter().all(|l| !l.trim().is_empty());
        if populated && labels.len() == probs_len {
            return labels.to_vec();
        }
        warn!(
            "Ignoring {} declared labels for {} outputs",
            labels.len(),
            probs_len
        );
    }

    if probs_len == FALLBACK_LABELS.len() {
        FALLBACK_LABELS.iter().map(|l| l.to_string()).collect()
    } else {
        synthetic_labels(probs_len)
    }
}

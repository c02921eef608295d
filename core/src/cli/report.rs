use crate::types::Prediction;
use std::fmt;

/// Band thresholds and layout of the text report
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportConfig {
    /// Lower bound (inclusive) of the positive band
    pub pos_threshold: f32,

    /// Lower bound (inclusive) of the borderline band
    pub borderline_low: f32,

    /// Number of characters in each bar
    pub bar_width: usize,

    /// Maximum number of entries rendered in the "other" band
    pub other_limit: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            pos_threshold: 0.70,
            borderline_low: 0.55,
            bar_width: 22,
            other_limit: 5,
        }
    }
}

impl ReportConfig {
    pub fn with_thresholds(mut self, pos_threshold: f32, borderline_low: f32) -> Self {
        self.pos_threshold = pos_threshold;
        self.borderline_low = borderline_low;
        self
    }

    pub fn with_bar_width(mut self, bar_width: usize) -> Self {
        self.bar_width = bar_width;
        self
    }

    pub fn with_other_limit(mut self, other_limit: usize) -> Self {
        self.other_limit = other_limit;
        self
    }
}

/// Ranked predictions split into the three report bands
///
/// `other` holds every prediction below `borderline_low`; the report
/// renders only the first `other_limit` of them.
#[derive(Debug, Clone, PartialEq)]
pub struct BandedReport<'a> {
    pub positive: Vec<&'a Prediction>,
    pub borderline: Vec<&'a Prediction>,
    pub other: Vec<&'a Prediction>,
}

impl<'a> BandedReport<'a> {
    /// Partitions predictions, keeping their order within each band
    pub fn partition(predictions: &'a [Prediction], config: &ReportConfig) -> Self {
        let mut bands = Self {
            positive: Vec::new(),
            borderline: Vec::new(),
            other: Vec::new(),
        };

        for pred in predictions {
            if pred.probability >= config.pos_threshold {
                bands.positive.push(pred);
            } else if pred.probability >= config.borderline_low {
                bands.borderline.push(pred);
            } else {
                bands.other.push(pred);
            }
        }

        bands
    }
}

/// Text report formatter for ranked predictions
///
/// # Example
///
/// ```
/// use cxrcat_core::{Prediction, TextReport};
///
/// let preds = vec![Prediction::new("Effusion", 0.95), Prediction::new("Mass", 0.10)];
/// let text = TextReport::new(&preds).to_string();
/// assert!(text.starts_with("=== Predicted positives (≥ 70%) ==="));
/// assert!(text.contains("- Effusion                 95.00%  [#####################-]"));
/// ```
pub struct TextReport<'a> {
    predictions: &'a [Prediction],
    config: ReportConfig,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report with default thresholds
    pub fn new(predictions: &'a [Prediction]) -> Self {
        Self::with_config(predictions, ReportConfig::default())
    }

    pub fn with_config(predictions: &'a [Prediction], config: ReportConfig) -> Self {
        Self {
            predictions,
            config,
        }
    }

    fn bar(&self, probability: f32) -> String {
        let width = self.config.bar_width;
        let filled = ((probability * width as f32).round().max(0.0) as usize).min(width);
        format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
    }

    fn write_section(
        &self,
        f: &mut fmt::Formatter<'_>,
        title: &str,
        preds: &[&Prediction],
    ) -> fmt::Result {
        writeln!(f, "{}", title)?;
        if preds.is_empty() {
            return write!(f, "(none)");
        }

        for (i, pred) in preds.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let percent = format!("{:.2}%", pred.probability * 100.0);
            write!(
                f,
                "- {:<24} {:>6}  [{}]",
                pred.label,
                percent,
                self.bar(pred.probability)
            )?;
        }
        Ok(())
    }
}

/// Threshold as a percentage with up to two decimals, trailing zeros dropped
fn percent(threshold: f32) -> String {
    let text = format!("{:.2}", threshold as f64 * 100.0);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bands = BandedReport::partition(self.predictions, &self.config);
        let pos = percent(self.config.pos_threshold);
        let low = percent(self.config.borderline_low);
        let shown_other = bands.other.len().min(self.config.other_limit);

        self.write_section(
            f,
            &format!("=== Predicted positives (≥ {}%) ===", pos),
            &bands.positive,
        )?;
        writeln!(f)?;
        writeln!(f)?;

        self.write_section(
            f,
            &format!("=== Borderline ({}–{}%) ===", low, pos),
            &bands.borderline,
        )?;
        writeln!(f)?;
        writeln!(f)?;

        self.write_section(
            f,
            &format!("=== Top other findings (< {}%) ===", low),
            &bands.other[..shown_other],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn scenario() -> Vec<Prediction> {
        vec![
            Prediction::new("A", 0.95),
            Prediction::new("B", 0.60),
            Prediction::new("C", 0.40),
            Prediction::new("D", 0.10),
            Prediction::new("E", 0.05),
        ]
    }

    fn labels<'a>(preds: &[&'a Prediction]) -> Vec<&'a str> {
        preds.iter().map(|p| p.label.as_str()).collect()
    }

    #[test]
    fn test_partition_default_thresholds() {
        let preds = scenario();
        let bands = BandedReport::partition(&preds, &ReportConfig::default());
        assert_eq!(labels(&bands.positive), ["A"]);
        assert_eq!(labels(&bands.borderline), ["B"]);
        assert_eq!(labels(&bands.other), ["C", "D", "E"]);
    }

    #[test]
    fn test_partition_is_exhaustive_and_disjoint() {
        let preds: Vec<Prediction> = (0..=20)
            .map(|i| Prediction::new(format!("P{}", i), i as f32 / 20.0))
            .collect();
        let bands = BandedReport::partition(&preds, &ReportConfig::default());
        assert_eq!(
            bands.positive.len() + bands.borderline.len() + bands.other.len(),
            preds.len()
        );
        for pred in &preds {
            let hits = [&bands.positive, &bands.borderline, &bands.other]
                .iter()
                .filter(|band| band.iter().any(|p| std::ptr::eq(*p, pred)))
                .count();
            assert_eq!(hits, 1, "{} in {} bands", pred.label, hits);
        }
    }

    #[rstest]
    #[case(0.70, "positive")]
    #[case(0.6999, "borderline")]
    #[case(0.55, "borderline")]
    #[case(0.5499, "other")]
    fn test_band_boundaries(#[case] prob: f32, #[case] band: &str) {
        let preds = vec![Prediction::new("X", prob)];
        let bands = BandedReport::partition(&preds, &ReportConfig::default());
        let actual = if !bands.positive.is_empty() {
            "positive"
        } else if !bands.borderline.is_empty() {
            "borderline"
        } else {
            "other"
        };
        assert_eq!(actual, band);
    }

    #[test]
    fn test_text_report_format() {
        let preds = scenario();
        let output = TextReport::new(&preds).to_string();
        let expected = [
            "=== Predicted positives (≥ 70%) ===",
            "- A                        95.00%  [#####################-]",
            "",
            "=== Borderline (55–70%) ===",
            "- B                        60.00%  [#############---------]",
            "",
            "=== Top other findings (< 55%) ===",
            "- C                        40.00%  [#########-------------]",
            "- D                        10.00%  [##--------------------]",
            "- E                         5.00%  [#---------------------]",
        ]
        .join("\n");
        assert_eq!(output, expected);
    }

    #[test]
    fn test_empty_bands_render_none() {
        let preds = vec![Prediction::new("Low", 0.2)];
        let output = TextReport::new(&preds).to_string();
        let sections: Vec<&str> = output.split("\n\n").collect();
        assert_eq!(sections.len(), 3);
        assert!(sections[0].ends_with("\n(none)"));
        assert!(sections[1].ends_with("\n(none)"));
        assert!(sections[2].contains("- Low"));
    }

    #[test]
    fn test_no_predictions_renders_three_placeholders() {
        let output = TextReport::new(&[]).to_string();
        assert_eq!(output.matches("(none)").count(), 3);
    }

    #[test]
    fn test_other_band_shows_at_most_five() {
        let preds: Vec<Prediction> = (0..9)
            .map(|i| Prediction::new(format!("L{}", i), 0.5 - i as f32 * 0.05))
            .collect();
        let output = TextReport::new(&preds).to_string();
        let other = output.split("\n\n").nth(2).unwrap();
        assert_eq!(other.lines().filter(|l| l.starts_with("- ")).count(), 5);
        assert!(other.contains("- L4 "));
        assert!(!other.contains("- L5 "));
    }

    #[test]
    fn test_custom_config() {
        let preds = vec![Prediction::new("A", 0.5)];
        let config = ReportConfig::default()
            .with_thresholds(0.5, 0.3)
            .with_bar_width(4);
        let output = TextReport::with_config(&preds, config).to_string();
        assert!(output.starts_with("=== Predicted positives (≥ 50%) ===\n- A"));
        assert!(output.contains("[##--]"));
        assert!(output.contains("=== Borderline (30–50%) ==="));
    }

    #[rstest]
    #[case(0.70, "70")]
    #[case(0.55, "55")]
    #[case(0.555, "55.5")]
    #[case(0.1234, "12.34")]
    #[case(0.0, "0")]
    #[case(1.0, "100")]
    fn test_threshold_percent(#[case] threshold: f32, #[case] expected: &str) {
        assert_eq!(percent(threshold), expected);
    }

    #[test]
    fn test_header_matches_fractional_bound() {
        let preds = vec![Prediction::new("Edge", 0.556)];
        let config = ReportConfig::default().with_thresholds(0.70, 0.555);
        let output = TextReport::with_config(&preds, config).to_string();
        let borderline = output.split("\n\n").nth(1).unwrap();
        assert!(borderline.starts_with("=== Borderline (55.5–70%) ==="));
        assert!(borderline.contains("- Edge "));
        assert!(output.contains("=== Top other findings (< 55.5%) ==="));
    }

    #[rstest]
    #[case(0.0, "----------------------")]
    #[case(1.0, "######################")]
    #[case(0.5, "###########-----------")]
    fn test_bar_extremes(#[case] prob: f32, #[case] expected: &str) {
        let preds = [];
        let report = TextReport::new(&preds);
        assert_eq!(report.bar(prob), expected);
    }
}

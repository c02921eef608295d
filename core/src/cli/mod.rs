pub mod report;

use crate::error::Result;
use crate::pipeline::{PredictionSummary, DEFAULT_TOP_N};
use crate::types::Prediction;
use clap::{Parser, ValueEnum};
use report::{ReportConfig, TextReport};
use std::path::PathBuf;

/// Command-line arguments for cxrcat
#[derive(Parser, Debug)]
#[command(name = "cxrcat")]
#[command(about = "Chest radiograph preprocessing and prediction report tool")]
#[command(version)]
pub struct Cli {
    /// Path to a DICOM or raster image
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Classifier output record to rank ({"model", "labels", "probs"})
    #[arg(short, long, value_name = "JSON")]
    pub scores: Option<PathBuf>,

    /// Number of top predictions in JSON output (at most 5)
    #[arg(short, long, default_value_t = DEFAULT_TOP_N)]
    pub top: usize,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Lower bound of the positive band
    #[arg(long, default_value_t = 0.70)]
    pub pos_threshold: f32,

    /// Lower bound of the borderline band
    #[arg(long, default_value_t = 0.55)]
    pub borderline_low: f32,

    /// Width of the report bars
    #[arg(long, default_value_t = 22)]
    pub bar_width: usize,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Report settings from the threshold flags
    pub fn report_config(&self) -> ReportConfig {
        ReportConfig::default()
            .with_thresholds(self.pos_threshold, self.borderline_low)
            .with_bar_width(self.bar_width)
    }

    /// Renders a full ranked list in the selected format
    ///
    /// The text report bands every prediction; `--top` only limits the
    /// JSON summary.
    pub fn render(&self, model: &str, ranked: &[Prediction]) -> Result<String> {
        match self.format {
            OutputFormat::Text => {
                Ok(TextReport::with_config(ranked, self.report_config()).to_string())
            }
            OutputFormat::Json => {
                let shown = &ranked[..ranked.len().min(self.top)];
                PredictionSummary::new(model, shown).to_json()
            }
        }
    }
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}

pub mod cli;
pub mod decode;
pub mod error;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod ranking;
pub mod types;

pub use cli::report::{BandedReport, ReportConfig, TextReport};
pub use decode::{Decoded, FormatResolver, SourceKind};
pub use error::{CxrError, DecodeError, DecodeFailure, Result};
pub use model::{Classifier, ModelCache, PrecomputedClassifier, DEFAULT_MODEL_NAME};
pub use normalize::{NormalizeConfig, Normalizer};
pub use pipeline::{predict_bytes, predict_file, predict_tensor, PredictionSummary};
pub use ranking::{rank_predictions, Ranker};
pub use types::*;

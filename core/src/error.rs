use std::fmt;
use thiserror::Error;

/// Result type for cxrcat operations
pub type Result<T> = std::result::Result<T, CxrError>;

/// Error types for cxrcat operations
#[derive(Error, Debug)]
pub enum CxrError {
    /// Neither decoder could interpret the input
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Label and probability sequences differ in length
    #[error("Length mismatch: {labels} labels for {probs} probabilities")]
    LengthMismatch { labels: usize, probs: usize },

    /// Decoded intensities exceed the range expected by the normalizer
    #[error("Intensity out of range: max value {max} higher than expected {limit}")]
    IntensityOutOfRange { max: f32, limit: f32 },

    /// Image without any pixels
    #[error("Image has no pixels")]
    EmptyImage,

    /// Classifier loading or inference error
    #[error("Model error: {0}")]
    Model(String),

    /// Malformed caller input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Unified failure raised once every decode attempt for a source has failed
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Failed to load {source_id}: {last}")]
pub struct DecodeError {
    /// File name, or `<bytes>` for anonymous buffers
    pub source_id: String,

    /// Failure reported by the last decoder tried
    pub last: DecodeFailure,
}

/// Failure of a single decoder attempt
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeFailure {
    /// DICOM metadata or pixel data could not be read
    Dicom(String),
    /// Raster codec failure
    Raster(String),
}

impl fmt::Display for DecodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeFailure::Dicom(msg) => write!(f, "DICOM decode failed: {}", msg),
            DecodeFailure::Raster(msg) => write!(f, "image decode failed: {}", msg),
        }
    }
}

// Convert dicom-object errors
impl From<dicom_object::ReadError> for DecodeFailure {
    fn from(e: dicom_object::ReadError) -> Self {
        DecodeFailure::Dicom(format!("{}", e))
    }
}

impl From<dicom_pixeldata::Error> for DecodeFailure {
    fn from(e: dicom_pixeldata::Error) -> Self {
        DecodeFailure::Dicom(format!("{}", e))
    }
}

impl From<image::ImageError> for DecodeFailure {
    fn from(e: image::ImageError) -> Self {
        DecodeFailure::Raster(format!("{}", e))
    }
}

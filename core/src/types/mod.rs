//! Core type definitions for chest radiograph processing
//!
//! - [`PhotometricInterpretation`]: Pixel polarity convention of a DICOM image
//! - [`CalibratedArray`]: Decoded single-channel intensities
//! - [`ModelTensor`]: Normalized 1x1xHxW classifier input
//! - [`Prediction`]: Label and probability pair

mod photometric;
mod prediction;
mod tensor;

pub use photometric::PhotometricInterpretation;
pub use prediction::Prediction;
pub use tensor::{CalibratedArray, ModelTensor};

use crate::error::DecodeFailure;
use crate::types::{CalibratedArray, PhotometricInterpretation};
use dicom_object::{from_reader, DefaultDicomObject, InMemDicomObject};
use dicom_pixeldata::{ConvertOptions, ModalityLutOption, PixelDecoder};
use log::{debug, warn};
use ndarray::Array2;

use super::tags::{
    get_float_value, get_string_value, PHOTOMETRIC_INTERPRETATION, RESCALE_INTERCEPT,
    RESCALE_SLOPE,
};

const PREAMBLE_LEN: usize = 128;
const DICM_MAGIC: &[u8; 4] = b"DICM";

/// Linear modality rescale (`value * slope + intercept`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rescale {
    pub slope: f32,
    pub intercept: f32,
}

impl Default for Rescale {
    fn default() -> Self {
        Self {
            slope: 1.0,
            intercept: 0.0,
        }
    }
}

impl Rescale {
    /// Reads RescaleSlope/RescaleIntercept, falling back to 1.0/0.0 when absent
    pub fn from_dicom(dcm: &InMemDicomObject) -> Self {
        let fallback = Self::default();
        Self {
            slope: get_float_value(dcm, RESCALE_SLOPE)
                .map(|v| v as f32)
                .unwrap_or(fallback.slope),
            intercept: get_float_value(dcm, RESCALE_INTERCEPT)
                .map(|v| v as f32)
                .unwrap_or(fallback.intercept),
        }
    }
}

fn preamble_magic(bytes: &[u8]) -> bool {
    bytes.len() >= PREAMBLE_LEN + DICM_MAGIC.len()
        && &bytes[PREAMBLE_LEN..PREAMBLE_LEN + DICM_MAGIC.len()] == DICM_MAGIC
}

/// Decodes a DICOM file into calibrated 0..=255 intensities
///
/// # Algorithm
///
/// 1. Decode stored pixel values of the first frame as f32
/// 2. Apply `value * slope + intercept` (defaults 1.0 / 0.0)
/// 3. MONOCHROME1: `value = max - value`
/// 4. Shift so the minimum is zero
/// 5. Scale by `255 / max`, dividing by 1.0 instead when `max <= 0`
pub fn decode_dicom(bytes: &[u8]) -> Result<CalibratedArray, DecodeFailure> {
    let dcm = read_object(bytes)?;
    let stored = stored_pixels(&dcm)?;

    let rescale = Rescale::from_dicom(&dcm);
    let photometric = PhotometricInterpretation::from_str(
        &get_string_value(&dcm, PHOTOMETRIC_INTERPRETATION).unwrap_or_default(),
    );
    debug!(
        "DICOM {}x{}, rescale {:?}, photometric {}",
        stored.nrows(),
        stored.ncols(),
        rescale,
        photometric
    );
    if !photometric.is_monochrome() {
        warn!("{} pixel data, using the first sample only", photometric);
    }

    Ok(calibrate(stored, rescale, &photometric))
}

fn read_object(bytes: &[u8]) -> Result<DefaultDicomObject, DecodeFailure> {
    // the reader expects to start at the magic code
    let body = if preamble_magic(bytes) {
        &bytes[PREAMBLE_LEN..]
    } else {
        bytes
    };
    Ok(from_reader(body)?)
}

/// Extracts the first sample of the first frame without any LUT applied
fn stored_pixels(dcm: &DefaultDicomObject) -> Result<CalibratedArray, DecodeFailure> {
    let decoded = dcm.decode_pixel_data()?;
    let rows = decoded.rows() as usize;
    let cols = decoded.columns() as usize;
    let samples = decoded.samples_per_pixel() as usize;
    let frames = decoded.number_of_frames() as usize;
    if frames > 1 {
        debug!("{} frames, using the first", frames);
    }

    let options = ConvertOptions::new().with_modality_lut(ModalityLutOption::None);
    let values = decoded
        .to_ndarray_with_options::<f32>(&options)?
        .into_raw_vec();

    if values.len() < rows * cols * samples {
        return Err(DecodeFailure::Dicom(format!(
            "pixel data holds {} values, expected at least {}",
            values.len(),
            rows * cols * samples
        )));
    }

    Ok(Array2::from_shape_fn((rows, cols), |(r, c)| {
        values[(r * cols + c) * samples]
    }))
}

/// Applies rescale, polarity correction and 0..=255 scaling to stored values
pub fn calibrate(
    mut img: CalibratedArray,
    rescale: Rescale,
    photometric: &PhotometricInterpretation,
) -> CalibratedArray {
    img.mapv_inplace(|v| v * rescale.slope + rescale.intercept);

    if photometric.is_inverted() {
        let max = max_value(&img);
        img.mapv_inplace(|v| max - v);
    }

    let min = min_value(&img);
    img.mapv_inplace(|v| v - min);

    let max = max_value(&img);
    let divisor = if max > 0.0 { max } else { 1.0 };
    img.mapv_inplace(|v| (v / divisor) * 255.0);

    img
}

fn min_value(img: &CalibratedArray) -> f32 {
    img.iter().copied().fold(f32::INFINITY, f32::min)
}

fn max_value(img: &CalibratedArray) -> f32 {
    img.iter().copied().fold(f32::NEG_INFINITY, f32::max)
}

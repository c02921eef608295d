//! Decoding of radiograph sources into calibrated intensity arrays
//!
//! [`FormatResolver`] picks the decoder implied by the format hint, falls
//! back to the other one exactly once, and reports a single [`DecodeError`]
//! when both fail.

mod dicom;
mod raster;
pub mod tags;

pub use dicom::{calibrate, decode_dicom, Rescale};
pub use raster::decode_raster;

#[cfg(test)]
pub(crate) use dicom::fixtures::dicom_bytes as dicom_fixture;

use crate::error::{DecodeError, DecodeFailure, Result};
use crate::types::CalibratedArray;
use log::{debug, info, warn};
use std::fmt;
use std::path::Path;

/// Identifier used in errors for sources without a file name
pub const ANONYMOUS_SOURCE: &str = "<bytes>";

/// Decoder family for a radiograph source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// DICOM container with calibration metadata
    Dicom,
    /// Generic raster image (PNG, JPEG, ...)
    Raster,
}

impl SourceKind {
    /// Maps a file extension (with or without the leading dot) to a kind
    ///
    /// `dcm` and `dicom` are DICOM, anything else is raster.
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.trim().trim_start_matches('.');
        if ext.eq_ignore_ascii_case("dcm") || ext.eq_ignore_ascii_case("dicom") {
            SourceKind::Dicom
        } else {
            SourceKind::Raster
        }
    }

    /// The decoder tried when this one fails
    pub fn other(self) -> Self {
        match self {
            SourceKind::Dicom => SourceKind::Raster,
            SourceKind::Raster => SourceKind::Dicom,
        }
    }

    fn decode(self, bytes: &[u8]) -> std::result::Result<CalibratedArray, DecodeFailure> {
        match self {
            SourceKind::Dicom => decode_dicom(bytes),
            SourceKind::Raster => decode_raster(bytes),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Dicom => write!(f, "dicom"),
            SourceKind::Raster => write!(f, "raster"),
        }
    }
}

/// Decoded intensities along with the decoder that produced them
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub kind: SourceKind,
    pub array: CalibratedArray,
}

/// Two-step decoder selection with a single fallback
///
/// # Example
///
/// ```
/// use cxrcat_core::decode::{FormatResolver, SourceKind};
///
/// assert_eq!(
///     FormatResolver::decode_order(Some("DCM")),
///     [SourceKind::Dicom, SourceKind::Raster]
/// );
/// assert_eq!(
///     FormatResolver::decode_order(Some(".png")),
///     [SourceKind::Raster, SourceKind::Dicom]
/// );
/// // without a hint DICOM is tried first
/// assert_eq!(FormatResolver::decode_order(None)[0], SourceKind::Dicom);
///
/// let err = FormatResolver::resolve(b"garbage", None, "upload").unwrap_err();
/// assert_eq!(err.source_id, "upload");
/// ```
pub struct FormatResolver;

impl FormatResolver {
    /// Returns the decoders to try, in order, for an optional extension hint
    pub fn decode_order(hint: Option<&str>) -> [SourceKind; 2] {
        let first = hint
            .map(SourceKind::from_extension)
            .unwrap_or(SourceKind::Dicom);
        [first, first.other()]
    }

    /// Decodes `bytes`, trying the hinted decoder first and the other once
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] carrying `source_id` and the failure of
    /// the second decoder when both attempts fail.
    pub fn resolve(
        bytes: &[u8],
        hint: Option<&str>,
        source_id: &str,
    ) -> std::result::Result<Decoded, DecodeError> {
        let [first, second] = Self::decode_order(hint);

        let first_failure = match first.decode(bytes) {
            Ok(array) => return Ok(Decoded { kind: first, array }),
            Err(failure) => failure,
        };
        debug!(
            "{}: {} decoder failed ({}), trying {}",
            source_id, first, first_failure, second
        );

        match second.decode(bytes) {
            Ok(array) => {
                info!("{}: decoded as {} after fallback", source_id, second);
                Ok(Decoded {
                    kind: second,
                    array,
                })
            }
            Err(last) => {
                warn!("{}: no decoder could read the input", source_id);
                Err(DecodeError {
                    source_id: source_id.to_string(),
                    last,
                })
            }
        }
    }

    /// Reads a file fully and resolves it using its extension as the hint
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a decode error
    /// if neither decoder accepts its content.
    pub fn resolve_path(path: &Path) -> Result<Decoded> {
        let bytes = std::fs::read(path)?;
        let hint = path.extension().and_then(|ext| ext.to_str());
        Ok(Self::resolve(
            &bytes,
            hint,
            &path.display().to_string(),
        )?)
    }
}

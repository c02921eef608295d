use ndarray::{Array2, Array4, ArrayView4};

/// Single-channel intensities produced by a decoder, indexed `[row, col]`
///
/// Values are not bounded yet; DICOM input is already scaled to 0..=255,
/// raster input carries its raw codec values.
pub type CalibratedArray = Array2<f32>;

/// Classifier input with logical shape `[batch=1, channel=1, height, width]`
#[derive(Debug, Clone, PartialEq)]
pub struct ModelTensor {
    data: Array4<f32>,
}

impl ModelTensor {
    pub(crate) fn new(data: Array4<f32>) -> Self {
        Self { data }
    }

    /// Returns the `(batch, channel, height, width)` shape
    pub fn shape(&self) -> (usize, usize, usize, usize) {
        self.data.dim()
    }

    pub fn view(&self) -> ArrayView4<'_, f32> {
        self.data.view()
    }

    /// Returns the (min, max) value range of the tensor
    pub fn value_range(&self) -> (f32, f32) {
        self.data
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}

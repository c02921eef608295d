use crate::error::{CxrError, Result};
use crate::types::{CalibratedArray, ModelTensor};
use log::debug;
use ndarray::{s, Array2, Axis};

/// Half-width of the classifier's canonical input range
pub const OUTPUT_SCALE: f32 = 1024.0;

/// Target resolution and intensity range of the classifier input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizeConfig {
    pub height: usize,
    pub width: usize,

    /// Largest intensity the decoded array may hold
    pub max_value: f32,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            height: 224,
            width: 224,
            max_value: 255.0,
        }
    }
}

impl NormalizeConfig {
    /// Sets the target spatial size
    pub fn with_size(mut self, height: usize, width: usize) -> Self {
        self.height = height;
        self.width = width;
        self
    }
}

/// Turns decoded intensities into a `1x1xHxW` classifier tensor
///
/// # Example
///
/// ```
/// use cxrcat_core::normalize::{NormalizeConfig, Normalizer};
/// use ndarray::Array2;
///
/// let normalizer = Normalizer::new(NormalizeConfig::default().with_size(4, 4));
/// let tensor = normalizer.normalize(Array2::from_elem((6, 10), 255.0)).unwrap();
/// assert_eq!(tensor.shape(), (1, 1, 4, 4));
/// assert_eq!(tensor.value_range(), (1024.0, 1024.0));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    config: NormalizeConfig,
}

impl Normalizer {
    pub fn new(config: NormalizeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizeConfig {
        &self.config
    }

    /// Scales, center-crops and reshapes a decoded array
    ///
    /// # Steps
    ///
    /// 1. Map `[0, max_value]` onto `[-1024, 1024]`
    /// 2. Add the channel axis
    /// 3. Crop the centered window with the target aspect ratio and
    ///    resample it to exactly `height x width`
    /// 4. Add the batch axis
    ///
    /// # Errors
    ///
    /// Returns `EmptyImage` for arrays without pixels and
    /// `IntensityOutOfRange` when a value exceeds `max_value`.
    pub fn normalize(&self, img: CalibratedArray) -> Result<ModelTensor> {
        if img.is_empty() {
            return Err(CxrError::EmptyImage);
        }
        if self.config.height == 0 || self.config.width == 0 {
            return Err(CxrError::InvalidInput(format!(
                "target size {}x{} has no pixels",
                self.config.height, self.config.width
            )));
        }

        let max = img.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        if max > self.config.max_value {
            return Err(CxrError::IntensityOutOfRange {
                max,
                limit: self.config.max_value,
            });
        }

        let scaled = img.mapv(|v| (2.0 * (v / self.config.max_value) - 1.0) * OUTPUT_SCALE);
        let cropped = center_crop(&scaled, self.config.height, self.config.width);
        let resized = resize_bilinear(&cropped, self.config.height, self.config.width);
        debug!(
            "normalized {:?} -> crop {:?} -> {:?}",
            img.dim(),
            cropped.dim(),
            resized.dim()
        );

        // channel axis, then batch axis
        let tensor = resized.insert_axis(Axis(0)).insert_axis(Axis(0));
        Ok(ModelTensor::new(tensor))
    }
}

/// Crops the largest centered window whose aspect ratio matches `height:width`
///
/// For square targets this is the `min(h, w)` square, offset by
/// `dim / 2 - side / 2` along each axis.
pub fn center_crop(img: &Array2<f32>, height: usize, width: usize) -> Array2<f32> {
    let (rows, cols) = img.dim();

    // widest window of the target ratio that fits: compare rows*width with cols*height
    let (crop_rows, crop_cols) = if rows * width <= cols * height {
        (rows, (rows * width / height).max(1))
    } else {
        ((cols * height / width).max(1), cols)
    };

    let top = rows / 2 - crop_rows / 2;
    let left = cols / 2 - crop_cols / 2;
    img.slice(s![top..top + crop_rows, left..left + crop_cols])
        .to_owned()
}

/// Bilinear resampling with half-pixel centers
///
/// Returns the input unchanged when it already has the requested size.
pub fn resize_bilinear(img: &Array2<f32>, height: usize, width: usize) -> Array2<f32> {
    let (rows, cols) = img.dim();
    if rows == height && cols == width {
        return img.clone();
    }

    let row_taps = taps(rows, height);
    let col_taps = taps(cols, width);

    Array2::from_shape_fn((height, width), |(r, c)| {
        let (r0, r1, fr) = row_taps[r];
        let (c0, c1, fc) = col_taps[c];
        let top = img[[r0, c0]] * (1.0 - fc) + img[[r0, c1]] * fc;
        let bottom = img[[r1, c0]] * (1.0 - fc) + img[[r1, c1]] * fc;
        top * (1.0 - fr) + bottom * fr
    })
}

/// Source indices and interpolation weight for each output position
fn taps(src_len: usize, dst_len: usize) -> Vec<(usize, usize, f32)> {
    let scale = src_len as f32 / dst_len as f32;
    (0..dst_len)
        .map(|i| {
            let pos = ((i as f32 + 0.5) * scale - 0.5).max(0.0);
            let i0 = (pos.floor() as usize).min(src_len - 1);
            let i1 = (i0 + 1).min(src_len - 1);
            (i0, i1, pos - i0 as f32)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rstest::rstest;

    #[rstest]
    #[case(224, 224)]
    #[case(512, 300)]
    #[case(300, 512)]
    #[case(100, 100)]
    #[case(1, 7)]
    fn test_output_shape_is_fixed(#[case] rows: usize, #[case] cols: usize) {
        let normalizer = Normalizer::default();
        let img = Array2::from_shape_fn((rows, cols), |(r, c)| ((r + c) % 256) as f32);
        let tensor = normalizer.normalize(img).unwrap();
        assert_eq!(tensor.shape(), (1, 1, 224, 224));
    }

    #[test]
    fn test_value_mapping_endpoints() {
        let normalizer = Normalizer::new(NormalizeConfig::default().with_size(1, 3));
        let tensor = normalizer
            .normalize(array![[0.0, 127.5, 255.0]])
            .unwrap();
        let values: Vec<f32> = tensor.view().iter().copied().collect();
        assert_eq!(values, vec![-1024.0, 0.0, 1024.0]);
    }

    #[test]
    fn test_center_crop_square_from_wide() {
        let img = Array2::from_shape_fn((2, 6), |(r, c)| (r * 10 + c) as f32);
        let cropped = center_crop(&img, 4, 4);
        // side 2, left = 6/2 - 2/2 = 2
        assert_eq!(cropped, array![[2.0, 3.0], [12.0, 13.0]]);
    }

    #[test]
    fn test_center_crop_square_from_tall() {
        let img = Array2::from_shape_fn((5, 3), |(r, c)| (r * 10 + c) as f32);
        let cropped = center_crop(&img, 2, 2);
        // side 3, top = 5/2 - 3/2 = 1
        assert_eq!(cropped.dim(), (3, 3));
        assert_eq!(cropped[[0, 0]], 10.0);
        assert_eq!(cropped[[2, 2]], 32.0);
    }

    #[test]
    fn test_center_crop_non_square_target() {
        let img = Array2::<f32>::zeros((100, 100));
        assert_eq!(center_crop(&img, 50, 100).dim(), (50, 100));
        assert_eq!(center_crop(&img, 100, 25).dim(), (100, 25));
    }

    #[test]
    fn test_resize_constant_stays_constant() {
        let img = Array2::from_elem((3, 3), 7.0);
        let resized = resize_bilinear(&img, 5, 5);
        assert!(resized.iter().all(|&v| (v - 7.0).abs() < 1e-6));
    }

    #[test]
    fn test_resize_upsample_interpolates() {
        let img = array![[0.0, 4.0]];
        let resized = resize_bilinear(&img, 1, 4);
        assert_eq!(resized, array![[0.0, 1.0, 3.0, 4.0]]);
    }

    #[test]
    fn test_crop_and_resize_idempotent_on_matching_size() {
        let img = Array2::from_shape_fn((4, 4), |(r, c)| (r * 4 + c) as f32);
        let once = resize_bilinear(&center_crop(&img, 4, 4), 4, 4);
        assert_eq!(once, img);
        let twice = resize_bilinear(&center_crop(&once, 4, 4), 4, 4);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_out_of_range_input_rejected() {
        let err = Normalizer::default()
            .normalize(array![[0.0, 4095.0]])
            .unwrap_err();
        assert!(matches!(
            err,
            CxrError::IntensityOutOfRange { max, limit } if max == 4095.0 && limit == 255.0
        ));
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = Normalizer::default()
            .normalize(Array2::zeros((0, 5)))
            .unwrap_err();
        assert!(matches!(err, CxrError::EmptyImage));
    }

    #[test]
    fn test_deterministic() {
        let img = Array2::from_shape_fn((37, 53), |(r, c)| ((r * 7 + c * 3) % 256) as f32);
        let normalizer = Normalizer::new(NormalizeConfig::default().with_size(16, 16));
        let a = normalizer.normalize(img.clone()).unwrap();
        let b = normalizer.normalize(img).unwrap();
        assert_eq!(a, b);
    }
}

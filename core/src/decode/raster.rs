use crate::error::DecodeFailure;
use crate::types::CalibratedArray;
use image::{DynamicImage, GenericImageView, ImageBuffer, Pixel};
use log::debug;
use ndarray::Array2;

/// Decodes a PNG/JPEG/BMP/TIFF image into raw single-channel intensities
///
/// Multi-channel images keep their first channel only; no luminance
/// weighting is done. Values keep the codec's native range (0..=255 for
/// 8-bit images, 0..=65535 for 16-bit ones).
pub fn decode_raster(bytes: &[u8]) -> Result<CalibratedArray, DecodeFailure> {
    let image = image::load_from_memory(bytes)?;
    let (width, height) = image.dimensions();
    debug!("raster {}x{}, color {:?}", width, height, image.color());
    Ok(first_channel_of(&image))
}

fn first_channel_of(image: &DynamicImage) -> CalibratedArray {
    match image {
        DynamicImage::ImageLuma8(buf) => first_channel(buf),
        DynamicImage::ImageLumaA8(buf) => first_channel(buf),
        DynamicImage::ImageRgb8(buf) => first_channel(buf),
        DynamicImage::ImageRgba8(buf) => first_channel(buf),
        DynamicImage::ImageLuma16(buf) => first_channel(buf),
        DynamicImage::ImageLumaA16(buf) => first_channel(buf),
        DynamicImage::ImageRgb16(buf) => first_channel(buf),
        DynamicImage::ImageRgba16(buf) => first_channel(buf),
        DynamicImage::ImageRgb32F(buf) => first_channel(buf),
        DynamicImage::ImageRgba32F(buf) => first_channel(buf),
        other => first_channel(&other.to_rgba16()),
    }
}

fn first_channel<P>(buf: &ImageBuffer<P, Vec<P::Subpixel>>) -> CalibratedArray
where
    P: Pixel,
    P::Subpixel: Into<f32>,
{
    let (width, height) = buf.dimensions();
    Array2::from_shape_fn((height as usize, width as usize), |(r, c)| {
        buf.get_pixel(c as u32, r as u32).channels()[0].into()
    })
}

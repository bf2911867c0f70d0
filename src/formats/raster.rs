use std::path::Path;

use image::DynamicImage;
use ndarray::{Array, ArrayD, IxDyn};

use super::{FormatError, Result};

/// Grayscale images decode to `(Y, X)`, everything else to `(Y, X, 3)`.
pub(crate) fn read_common_raster(path: &Path) -> Result<ArrayD<f32>> {
    let image = image::open(path)?;
    let (width, height) = (image.width() as usize, image.height() as usize);
    match image {
        DynamicImage::ImageLuma8(buffer) => {
            let values = buffer
                .pixels()
                .map(|pixel| f32::from(pixel.0[0]) / 255.0)
                .collect::<Vec<_>>();
            to_array(&[height, width], values)
        }
        DynamicImage::ImageLuma16(buffer) => {
            let values = buffer
                .pixels()
                .map(|pixel| f32::from(pixel.0[0]) / 65_535.0)
                .collect::<Vec<_>>();
            to_array(&[height, width], values)
        }
        DynamicImage::ImageRgb16(buffer) => {
            let values = buffer
                .pixels()
                .flat_map(|pixel| pixel.0)
                .map(|sample| f32::from(sample) / 65_535.0)
                .collect::<Vec<_>>();
            to_array(&[height, width, 3], values)
        }
        other => {
            let values = other
                .to_rgb8()
                .pixels()
                .flat_map(|pixel| pixel.0)
                .map(|sample| f32::from(sample) / 255.0)
                .collect::<Vec<_>>();
            to_array(&[height, width, 3], values)
        }
    }
}

fn to_array(shape: &[usize], values: Vec<f32>) -> Result<ArrayD<f32>> {
    Array::from_shape_vec(IxDyn(shape), values)
        .map_err(|error| FormatError::UnsupportedLayout(error.to_string()))
}

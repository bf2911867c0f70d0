use std::fs::File;
use std::path::Path;

use ndarray::{Array, ArrayD, IxDyn};
use tiff::decoder::{Decoder, DecodingResult};

use super::{FormatError, Result};

/// Single pages decode to `(Y, X)` (or `(Y, X, C)` for RGB), page stacks
/// to `(Z, Y, X)`.
pub(crate) fn read_tiff(path: &Path) -> Result<ArrayD<f32>> {
    let file = File::open(path)?;
    let mut decoder = Decoder::new(file)?;
    let (width, height) = decoder.dimensions()?;
    let plane = width as usize * height as usize;
    let mut pages = Vec::new();

    loop {
        pages.push(decode_tiff_page(&mut decoder)?);
        if !decoder.more_images() {
            break;
        }
        decoder.next_image()?;
        if decoder.dimensions()? != (width, height) {
            return Err(FormatError::UnsupportedLayout(
                "TIFF pages must have identical dimensions".into(),
            ));
        }
    }

    let (height, width) = (height as usize, width as usize);
    if pages.len() == 1 {
        let page = pages.remove(0);
        let shape = match page.len() {
            len if len == plane => vec![height, width],
            len if plane > 0 && len % plane == 0 => vec![height, width, len / plane],
            len => {
                return Err(FormatError::UnsupportedLayout(format!(
                    "TIFF page holds {len} samples for a {width}x{height} image"
                )));
            }
        };
        return to_array(&shape, page);
    }

    if pages.iter().any(|page| page.len() != plane) {
        return Err(FormatError::UnsupportedLayout(
            "multi-page TIFF stacks must be single-channel".into(),
        ));
    }
    let depth = pages.len();
    to_array(&[depth, height, width], pages.concat())
}

fn decode_tiff_page(decoder: &mut Decoder<File>) -> Result<Vec<f32>> {
    let values = match decoder.read_image()? {
        DecodingResult::U8(buffer) => buffer
            .into_iter()
            .map(|value| f32::from(value) / 255.0)
            .collect(),
        DecodingResult::U16(buffer) => buffer
            .into_iter()
            .map(|value| f32::from(value) / 65_535.0)
            .collect(),
        DecodingResult::I16(buffer) => buffer.into_iter().map(f32::from).collect(),
        DecodingResult::F32(buffer) => buffer,
        _ => {
            return Err(FormatError::UnsupportedLayout(
                "TIFF samples must be u8, u16, i16 or f32".into(),
            ));
        }
    };
    Ok(values)
}

fn to_array(shape: &[usize], values: Vec<f32>) -> Result<ArrayD<f32>> {
    Array::from_shape_vec(IxDyn(shape), values)
        .map_err(|error| FormatError::UnsupportedLayout(error.to_string()))
}

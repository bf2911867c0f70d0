use ndarray::{ArrayD, Axis};
use serde::Serialize;
use thiserror::Error;

use crate::model::DisplayArray;


/// Highest rank shown without slicing.
pub const MAX_DISPLAY_RANK: usize = 3;

pub type Result<T> = std::result::Result<T, ReduceError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReduceError {
    #[error("{0}-dimensional data is not supported")]
    UnsupportedDimensionality(usize),
}

/// Layout knowledge the reducer cannot infer from the shape alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum FormatHint {
    #[default]
    Standard,
    /// Axis 1 of 4-D data is the tilt axis.
    TiltSeries,
}

/// Drops every length-1 axis.
pub fn squeeze(mut data: ArrayD<f32>) -> ArrayD<f32> {
    for axis in (0..data.ndim()).rev() {
        if data.len_of(Axis(axis)) == 1 {
            data = data.index_axis_move(Axis(axis), 0);
        }
    }
    data
}

/// Brings `data` down to at most three dimensions.
///
/// Four-dimensional data keeps index 0 of its first axis, or of axis 1 for
/// tilt series, and comes back marked partial.
pub fn reduce(data: ArrayD<f32>, hint: FormatHint) -> Result<DisplayArray> {
    let data = squeeze(data);
    match data.ndim() {
        rank if rank <= MAX_DISPLAY_RANK => Ok(DisplayArray::full(data)),
        4 => {
            let axis = match hint {
                FormatHint::TiltSeries => Axis(1),
                FormatHint::Standard => Axis(0),
            };
            log::info!(
                "showing index 0 of axis {} of {:?} data, partial view",
                axis.index(),
                data.shape()
            );
            Ok(DisplayArray {
                data: data.index_axis_move(axis, 0),
                partial: true,
            })
        }
        rank => Err(ReduceError::UnsupportedDimensionality(rank)),
    }
}
